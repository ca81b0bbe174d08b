//! In-memory stand-in for the remote player, speaking the line protocol over
//! a duplex pipe.

use crate::dialer::Dialer;
use crate::error::ClientError;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use parking_lot::{Mutex, MutexGuard};
use player_primitives::Attributes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{duplex, DuplexStream};
use tokio_util::codec::{Framed, LinesCodec};

pub(crate) fn song(file: &str, title: &str, artist: &str, album: &str, time: &str) -> Attributes {
    [
        ("file", file),
        ("Title", title),
        ("Artist", artist),
        ("Album", album),
        ("Time", time),
    ]
    .into_iter()
    .collect()
}

#[derive(Debug, Default)]
pub(crate) struct MockState {
    pub library: Vec<Attributes>,
    pub queue: Vec<Attributes>,
    pub current: Option<usize>,
    pub playing: bool,
    pub elapsed: f64,
    /// Every request line, in wire order
    pub received: Vec<String>,
    /// Lines that were not a well-formed command
    pub garbled: Vec<String>,
    /// Drop the connection instead of answering the next request
    pub hang_up_next: bool,
    /// Read requests but never answer
    pub silent: bool,
    /// Hold back the next reply this long; it is computed before the wait
    pub stall_next: Option<Duration>,
}

impl MockState {
    fn handle(&mut self, line: &str) -> Vec<String> {
        self.received.push(line.to_owned());

        let Some(words) = tokenize(line) else {
            return self.reject(line);
        };
        let args: Vec<&str> = words.iter().skip(1).map(String::as_str).collect();

        match (words[0].as_str(), args.as_slice()) {
            ("play", []) => {
                if !self.queue.is_empty() {
                    self.current.get_or_insert(0);
                    self.playing = true;
                }
                ok()
            }
            ("stop", []) => {
                self.playing = false;
                ok()
            }
            ("next", []) => {
                match self.current {
                    Some(i) if i + 1 < self.queue.len() => self.current = Some(i + 1),
                    _ => {
                        self.current = None;
                        self.playing = false;
                    }
                }
                ok()
            }
            ("status", []) => self.status(),
            ("currentsong", []) => {
                let mut lines = self
                    .current
                    .map(|i| render(&self.queue[i]))
                    .unwrap_or_default();
                lines.extend(ok());
                lines
            }
            ("add", [uri]) => {
                let entry = self.lookup(uri);
                self.queue.push(entry);
                ok()
            }
            ("addid", [uri, position]) => match position.parse::<usize>() {
                Ok(position) if position <= self.queue.len() => {
                    let entry = self.lookup(uri);
                    self.queue.insert(position, entry);
                    if let Some(current) = self.current.as_mut() {
                        if position <= *current {
                            *current += 1;
                        }
                    }
                    vec![format!("Id: {}", self.queue.len()), "OK".to_owned()]
                }
                _ => ack(2, "addid", "Bad song index"),
            },
            ("move", [from, to]) => {
                let len = self.queue.len();
                match (from.parse::<usize>(), to.parse::<usize>()) {
                    (Ok(from), Ok(to)) if from < len && to < len => {
                        let entry = self.queue.remove(from);
                        self.queue.insert(to, entry);
                        if self.current == Some(from) {
                            self.current = Some(to);
                        }
                        ok()
                    }
                    _ => ack(2, "move", "Bad song index"),
                }
            }
            ("clear", []) => {
                self.queue.clear();
                self.current = None;
                self.playing = false;
                ok()
            }
            ("playlistinfo", []) => {
                let mut lines = Vec::new();
                for (pos, entry) in self.queue.iter().enumerate() {
                    lines.extend(render(entry));
                    lines.push(format!("Pos: {}", pos));
                }
                lines.extend(ok());
                lines
            }
            ("search", [tag, term]) => {
                let term = term.to_lowercase();
                let key = tag_key(tag);
                self.query(|entry| {
                    entry
                        .iter()
                        .filter(|(k, _)| key.map_or(true, |key| *k == key))
                        .any(|(_, v)| v.to_lowercase().contains(&term))
                })
            }
            ("find", [tag, value]) => {
                let key = tag_key(tag);
                self.query(|entry| key.is_some_and(|key| entry.get(key) == Some(*value)))
            }
            ("findadd", [tag, value]) => {
                let key = tag_key(tag);
                let matches: Vec<Attributes> = self
                    .library
                    .iter()
                    .filter(|entry| key.is_some_and(|key| entry.get(key) == Some(*value)))
                    .cloned()
                    .collect();
                self.queue.extend(matches);
                ok()
            }
            _ => self.reject(line),
        }
    }

    fn status(&self) -> Vec<String> {
        let state = match (self.playing, self.current) {
            (true, Some(_)) => "play",
            _ => "stop",
        };
        let mut lines = vec![
            "volume: 100".to_owned(),
            "repeat: 0".to_owned(),
            "random: 0".to_owned(),
            "consume: 0".to_owned(),
            format!("playlistlength: {}", self.queue.len()),
            format!("state: {}", state),
        ];
        if let Some(current) = self.current {
            lines.push(format!("song: {}", current));
            lines.push(format!("elapsed: {:.3}", self.elapsed));
            if current + 1 < self.queue.len() {
                lines.push(format!("nextsong: {}", current + 1));
            }
        }
        lines.extend(ok());
        lines
    }

    fn lookup(&self, uri: &str) -> Attributes {
        self.library
            .iter()
            .find(|entry| entry.get("file") == Some(uri))
            .cloned()
            .unwrap_or_else(|| [("file", uri)].into_iter().collect())
    }

    fn query(&self, matches: impl Fn(&Attributes) -> bool) -> Vec<String> {
        let mut lines: Vec<String> = self
            .library
            .iter()
            .filter(|entry| matches(entry))
            .flat_map(render)
            .collect();
        lines.extend(ok());
        lines
    }

    fn reject(&mut self, line: &str) -> Vec<String> {
        self.garbled.push(line.to_owned());
        ack(5, "", &format!("unknown command \"{}\"", line))
    }
}

fn tag_key(tag: &str) -> Option<&'static str> {
    match tag {
        "any" => None,
        "artist" => Some("Artist"),
        "album" => Some("Album"),
        "title" => Some("Title"),
        "file" => Some("file"),
        _ => Some(""),
    }
}

fn render(entry: &Attributes) -> Vec<String> {
    entry.iter().map(|(k, v)| format!("{}: {}", k, v)).collect()
}

fn ok() -> Vec<String> {
    vec!["OK".to_owned()]
}

fn ack(code: u32, command: &str, message: &str) -> Vec<String> {
    vec![format!("ACK [{}@0] {{{}}} {}", code, command, message)]
}

/// Splits a request line into words, honoring quoted arguments.
/// `None` for an empty line or an unterminated quote.
fn tokenize(line: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| *c == ' ') {
            chars.next();
        }
        let Some(&first) = chars.peek() else {
            break;
        };

        let mut word = String::new();
        if first == '"' {
            chars.next();
            loop {
                match chars.next()? {
                    '"' => break,
                    '\\' => word.push(chars.next()?),
                    c => word.push(c),
                }
            }
        } else {
            while let Some(c) = chars.next_if(|c| *c != ' ') {
                word.push(c);
            }
        }
        words.push(word);
    }

    (!words.is_empty()).then_some(words)
}

#[derive(Clone)]
pub(crate) struct MockDialer {
    state: Arc<Mutex<MockState>>,
    dials: Arc<AtomicUsize>,
}

impl MockDialer {
    pub fn new(state: MockState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            dials: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock()
    }

    pub fn dials(&self) -> usize {
        self.dials.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Dialer for MockDialer {
    type Stream = DuplexStream;

    async fn dial(&self) -> Result<DuplexStream, ClientError> {
        self.dials.fetch_add(1, Ordering::SeqCst);
        let (client, server) = duplex(64 * 1024);
        tokio::spawn(serve(server, self.state.clone()));
        Ok(client)
    }

    fn address(&self) -> &str {
        "mock"
    }
}

async fn serve(stream: DuplexStream, state: Arc<Mutex<MockState>>) {
    let mut framed = Framed::new(stream, LinesCodec::new());
    if framed.send("OK MPD 0.23.5").await.is_err() {
        return;
    }

    while let Some(Ok(line)) = framed.next().await {
        // Give concurrent clients a chance to sneak in between round trips
        tokio::task::yield_now().await;

        let (reply, stall) = {
            let mut state = state.lock();
            if state.hang_up_next {
                state.hang_up_next = false;
                return;
            }
            if state.silent {
                continue;
            }
            (state.handle(&line), state.stall_next.take())
        };
        if let Some(delay) = stall {
            tokio::time::sleep(delay).await;
        }

        for out in reply {
            if framed.send(out).await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_handles_quotes() {
        assert_eq!(
            tokenize(r#"find album "Part \"1\" Live""#),
            Some(vec!["find".into(), "album".into(), "Part \"1\" Live".into()])
        );
        assert_eq!(tokenize(r#"add "open"#), None);
        assert_eq!(tokenize(""), None);
    }

    #[test]
    fn interleaved_bytes_are_garbled() {
        let mut mock = MockState::default();
        mock.handle("plcurrentsongay");
        assert_eq!(mock.garbled, ["plcurrentsongay"]);
    }
}
