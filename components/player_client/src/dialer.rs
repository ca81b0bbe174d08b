use crate::error::ClientError;
use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

/// Opens byte streams to the remote player
#[async_trait]
pub trait Dialer: Send + Sync + 'static {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    async fn dial(&self) -> Result<Self::Stream, ClientError>;

    /// Human-readable endpoint, for logs
    fn address(&self) -> &str;
}

pub struct TcpDialer {
    address: String,
}

impl TcpDialer {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

#[async_trait]
impl Dialer for TcpDialer {
    type Stream = TcpStream;

    async fn dial(&self) -> Result<TcpStream, ClientError> {
        let stream = TcpStream::connect(&self.address)
            .await
            .map_err(|e| ClientError::connection(&self.address, e))?;
        stream
            .set_nodelay(true)
            .map_err(|e| ClientError::connection(&self.address, e))?;
        Ok(stream)
    }

    fn address(&self) -> &str {
        &self.address
    }
}
