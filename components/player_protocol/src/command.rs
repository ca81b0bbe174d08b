use crate::error::ProtocolError;

/// Tags usable in library queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Any,
    Artist,
    Album,
    Title,
    File,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Any => "any",
            Tag::Artist => "artist",
            Tag::Album => "album",
            Tag::Title => "title",
            Tag::File => "file",
        }
    }
}

/// Requests sent to the remote player, one line each
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Resume or start playback at the current queue position
    Play,
    Stop,
    Next,
    Status,
    CurrentSong,
    /// Append to the end of the queue
    Add { uri: String },
    /// Insert at a queue position; the reply carries the new song id
    AddId { uri: String, position: usize },
    Move { from: usize, to: usize },
    Clear,
    PlaylistInfo,
    /// Substring, case-insensitive library query
    Search { tag: Tag, term: String },
    /// Exact library query
    Find { tag: Tag, value: String },
    /// Appends every library match of an exact query to the queue
    FindAdd { tag: Tag, value: String },
    /// Ends the session; the server sends no reply
    Close,
}

impl Command {
    /// Renders the request line without its terminating newline.
    ///
    /// Arguments holding control characters are refused: a line break would
    /// split the request in two and leave an extra reply on the session.
    pub fn to_line(&self) -> Result<String, ProtocolError> {
        let line = match self {
            Command::Play => "play".to_owned(),
            Command::Stop => "stop".to_owned(),
            Command::Next => "next".to_owned(),
            Command::Status => "status".to_owned(),
            Command::CurrentSong => "currentsong".to_owned(),
            Command::Add { uri } => format!("add {}", quote(uri)?),
            Command::AddId { uri, position } => format!("addid {} {}", quote(uri)?, position),
            Command::Move { from, to } => format!("move {} {}", from, to),
            Command::Clear => "clear".to_owned(),
            Command::PlaylistInfo => "playlistinfo".to_owned(),
            Command::Search { tag, term } => {
                format!("search {} {}", tag.as_str(), quote(term)?)
            }
            Command::Find { tag, value } => format!("find {} {}", tag.as_str(), quote(value)?),
            Command::FindAdd { tag, value } => {
                format!("findadd {} {}", tag.as_str(), quote(value)?)
            }
            Command::Close => "close".to_owned(),
        };
        Ok(line)
    }

    /// Whether the server answers this command at all
    pub fn expects_reply(&self) -> bool {
        !matches!(self, Command::Close)
    }
}

fn quote(argument: &str) -> Result<String, ProtocolError> {
    if argument.chars().any(char::is_control) {
        return Err(ProtocolError::InvalidArgument(argument.to_owned()));
    }
    let mut quoted = String::with_capacity(argument.len() + 2);
    quoted.push('"');
    for c in argument.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Ok(quoted)
}
