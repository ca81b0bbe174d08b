use crate::{Attributes, Song};

/// Snapshot of the remote player at one point in time.
///
/// Built from two separate replies (current song and status), so the two
/// halves may disagree if the server changed state in between.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    playing: bool,
    current: Option<Song>,
    position: usize,
    next_position: usize,
    elapsed: f64,
    random: bool,
    consume: bool,
}

impl State {
    /// Combines a status reply and a current-song reply.
    ///
    /// Never fails: missing or malformed fields fall back to zero/false.
    pub fn from_attributes(status: &Attributes, current_song: &Attributes) -> Self {
        let current = current_song
            .contains_key("file")
            .then(|| Song::from_attributes(current_song));

        Self {
            playing: status.get("state") == Some("play"),
            current,
            position: status.parse_or_default("song"),
            next_position: status.parse_or_default("nextsong"),
            elapsed: status.parse_or_default("elapsed"),
            random: flag(status, "random"),
            consume: flag(status, "consume"),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current(&self) -> Option<&Song> {
        self.current.as_ref()
    }

    /// Zero-based queue index of the current song
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn next_position(&self) -> usize {
        self.next_position
    }

    /// Seconds into the current song
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Fraction of the current song already played, in `[0, 1]`.
    ///
    /// 0 when nothing is current or the song length is unknown.
    pub fn progress(&self) -> f64 {
        match &self.current {
            Some(song) if song.length() > 0.0 && self.elapsed.is_finite() => {
                (self.elapsed / song.length()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    pub fn random(&self) -> bool {
        self.random
    }

    pub fn consume(&self) -> bool {
        self.consume
    }
}

fn flag(attrs: &Attributes, key: &str) -> bool {
    attrs.get(key).is_some_and(|value| value != "0")
}
