use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unexpected greeting: {0:?}")]
    Greeting(String),

    #[error("server rejected command: {0}")]
    Ack(Ack),

    #[error("malformed reply line: {0:?}")]
    Malformed(String),

    /// Refused before anything was sent
    #[error("argument cannot be sent to the player: {0:?}")]
    InvalidArgument(String),
}

/// Error reply: `ACK [code@index] {command} message`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub code: u32,
    /// Position of the failing command inside a command list
    pub index: u32,
    pub command: String,
    pub message: String,
}

impl Ack {
    pub(crate) fn parse(line: &str) -> Option<Self> {
        let rest = line.strip_prefix("ACK [")?;
        let (location, rest) = rest.split_once(']')?;
        let (code, index) = location.split_once('@')?;
        let rest = rest.trim_start().strip_prefix('{')?;
        let (command, message) = rest.split_once('}')?;

        Some(Self {
            code: code.parse().ok()?,
            index: index.parse().ok()?,
            command: command.to_owned(),
            message: message.trim().to_owned(),
        })
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.command.is_empty() {
            write!(f, "{} (code {})", self.message, self.code)
        } else {
            write!(f, "{}: {} (code {})", self.command, self.message, self.code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ack_line() {
        let ack = Ack::parse("ACK [50@0] {play} No such song").unwrap();
        assert_eq!(ack.code, 50);
        assert_eq!(ack.index, 0);
        assert_eq!(ack.command, "play");
        assert_eq!(ack.message, "No such song");
        assert_eq!(ack.to_string(), "play: No such song (code 50)");
    }

    #[test]
    fn empty_command_is_allowed() {
        let ack = Ack::parse("ACK [5@0] {} unknown command \"foo\"").unwrap();
        assert_eq!(ack.command, "");
        assert_eq!(ack.message, "unknown command \"foo\"");
    }

    #[test]
    fn rejects_truncated_ack() {
        assert!(Ack::parse("ACK [50@0").is_none());
        assert!(Ack::parse("ACK [x@0] {play} nope").is_none());
    }
}
