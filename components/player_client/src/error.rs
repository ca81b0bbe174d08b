use player_protocol::ProtocolError;
use std::time::Duration;
use thiserror::Error;
use tokio_util::codec::LinesCodecError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to connect to {address}")]
    Connection {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("connection to player lost")]
    Transport(#[source] std::io::Error),

    #[error("connection closed by player")]
    Disconnected,

    #[error("no reply from player within {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ClientError {
    pub fn connection(address: impl Into<String>, source: std::io::Error) -> Self {
        ClientError::Connection {
            address: address.into(),
            source,
        }
    }

    /// Transport-level failure: the session is unusable, the server may be fine
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            ClientError::Connection { .. }
                | ClientError::Transport(_)
                | ClientError::Disconnected
                | ClientError::Timeout(_)
        )
    }

    /// After these the byte stream can no longer be trusted to be in sync
    pub(crate) fn poisons_session(&self) -> bool {
        self.is_connection() || matches!(self, ClientError::Protocol(ProtocolError::Malformed(_)))
    }
}

impl From<LinesCodecError> for ClientError {
    fn from(err: LinesCodecError) -> Self {
        match err {
            LinesCodecError::Io(source) => ClientError::Transport(source),
            LinesCodecError::MaxLineLengthExceeded => {
                ClientError::Protocol(ProtocolError::Malformed("line too long".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use player_protocol::Ack;

    #[test]
    fn timeouts_are_connection_errors() {
        assert!(ClientError::Timeout(Duration::from_secs(1)).is_connection());
        assert!(ClientError::Disconnected.poisons_session());
    }

    #[test]
    fn ack_keeps_session() {
        let err = ClientError::from(ProtocolError::Ack(Ack {
            code: 50,
            index: 0,
            command: "play".into(),
            message: "No such song".into(),
        }));
        assert!(!err.is_connection());
        assert!(!err.poisons_session());
        assert_eq!(err.to_string(), "server rejected command: play: No such song (code 50)");
    }

    #[test]
    fn malformed_reply_poisons_session() {
        let err = ClientError::from(ProtocolError::Malformed("???".into()));
        assert!(!err.is_connection());
        assert!(err.poisons_session());
    }
}
