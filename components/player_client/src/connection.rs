use crate::error::ClientError;
use futures::{SinkExt, StreamExt};
use player_protocol::{Attributes, Command, Greeting, ReplyParser};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::timeout;
use tokio_util::codec::{Framed, LinesCodec};
use tracing::debug;

// Generous: playlistinfo lines carry full paths and tags
const MAX_LINE_LENGTH: usize = 64 * 1024;

/// One open protocol session over a byte stream
pub(crate) struct Connection<S> {
    framed: Framed<S, LinesCodec>,
    version: String,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Reads and checks the server greeting
    pub async fn handshake(stream: S, limit: Duration) -> Result<Self, ClientError> {
        let mut framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));

        let line = timeout(limit, framed.next())
            .await
            .map_err(|_| ClientError::Timeout(limit))?
            .ok_or(ClientError::Disconnected)??;
        let greeting = Greeting::parse(&line)?;
        debug!(version = %greeting.version, "session opened");

        Ok(Self {
            framed,
            version: greeting.version,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Sends one command and reads its complete reply
    pub async fn round_trip(
        &mut self,
        command: &Command,
        limit: Duration,
    ) -> Result<Attributes, ClientError> {
        timeout(limit, self.exchange(command))
            .await
            .map_err(|_| ClientError::Timeout(limit))?
    }

    /// Tells the server we are leaving; no reply is read
    pub async fn close(mut self) -> Result<(), ClientError> {
        self.framed.send(Command::Close.to_line()?).await?;
        Ok(())
    }

    async fn exchange(&mut self, command: &Command) -> Result<Attributes, ClientError> {
        let line = command.to_line()?;
        debug!(command = %line, "round trip");
        self.framed.send(line).await?;

        let mut parser = ReplyParser::new();
        loop {
            let line = self
                .framed
                .next()
                .await
                .ok_or(ClientError::Disconnected)??;
            if let Some(attributes) = parser.feed(&line)? {
                return Ok(attributes);
            }
        }
    }
}
