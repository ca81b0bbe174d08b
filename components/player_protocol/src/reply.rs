use crate::error::{Ack, ProtocolError};
use player_primitives::Attributes;

/// First line the server sends on a new session: `OK MPD <version>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    pub version: String,
}

impl Greeting {
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        line.strip_prefix("OK MPD ")
            .map(|version| Self {
                version: version.trim().to_owned(),
            })
            .ok_or_else(|| ProtocolError::Greeting(line.to_owned()))
    }
}

/// Accumulates the lines of one reply until its terminator
#[derive(Debug, Default)]
pub struct ReplyParser {
    attributes: Attributes,
}

impl ReplyParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one line (without newline).
    ///
    /// Returns the collected attributes once `OK` arrives, `None` while the
    /// reply is still open, and the server's error for an `ACK` line.
    pub fn feed(&mut self, line: &str) -> Result<Option<Attributes>, ProtocolError> {
        if line == "OK" {
            return Ok(Some(std::mem::take(&mut self.attributes)));
        }
        if line.starts_with("ACK ") {
            let ack = Ack::parse(line).ok_or_else(|| ProtocolError::Malformed(line.to_owned()))?;
            return Err(ProtocolError::Ack(ack));
        }

        let (key, value) = line
            .split_once(": ")
            .ok_or_else(|| ProtocolError::Malformed(line.to_owned()))?;
        self.attributes.push(key, value);
        Ok(None)
    }
}
