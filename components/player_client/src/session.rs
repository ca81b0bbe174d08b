use crate::connection::Connection;
use crate::dialer::Dialer;
use crate::error::ClientError;
use player_protocol::{Attributes, Command};
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::timeout;
use tracing::{info, warn};

/// The single shared session to the remote player.
///
/// Operations take a [`SessionGuard`] for their whole duration, so round
/// trips of concurrent operations never interleave on the wire. A session
/// broken by a transport error is dropped and re-dialed on next use.
pub(crate) struct Session<D: Dialer> {
    dialer: D,
    timeout: Duration,
    connection: Mutex<Option<Connection<D::Stream>>>,
}

impl<D: Dialer> Session<D> {
    /// Dials eagerly so an unreachable player fails at startup
    pub async fn open(dialer: D, timeout: Duration) -> Result<Self, ClientError> {
        let connection = Self::connect(&dialer, timeout).await?;
        Ok(Self {
            dialer,
            timeout,
            connection: Mutex::new(Some(connection)),
        })
    }

    pub async fn acquire(&self) -> Result<SessionGuard<'_, D::Stream>, ClientError> {
        let mut slot = self.connection.lock().await;
        if slot.is_none() {
            info!(address = self.dialer.address(), "reconnecting to player");
            *slot = Some(Self::connect(&self.dialer, self.timeout).await?);
        }
        Ok(SessionGuard {
            slot,
            timeout: self.timeout,
            in_flight: false,
        })
    }

    pub async fn close(&self) -> Result<(), ClientError> {
        let mut slot = self.connection.lock().await;
        match slot.take() {
            Some(connection) => connection.close().await,
            None => Ok(()),
        }
    }

    async fn connect(dialer: &D, limit: Duration) -> Result<Connection<D::Stream>, ClientError> {
        let stream = timeout(limit, dialer.dial())
            .await
            .map_err(|_| ClientError::Timeout(limit))??;
        let connection = Connection::handshake(stream, limit).await?;
        info!(
            address = dialer.address(),
            version = connection.version(),
            "connected to player"
        );
        Ok(connection)
    }
}

/// Exclusive access to the session; released when dropped.
///
/// Dropping the guard while a round trip is still in flight (the operation's
/// future was cancelled) discards the connection: its unread reply would
/// otherwise be taken for the answer to the next request.
pub(crate) struct SessionGuard<'a, S> {
    slot: MutexGuard<'a, Option<Connection<S>>>,
    timeout: Duration,
    in_flight: bool,
}

impl<S> SessionGuard<'_, S>
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    pub async fn run(&mut self, command: Command) -> Result<Attributes, ClientError> {
        let connection = self.slot.as_mut().ok_or(ClientError::Disconnected)?;
        self.in_flight = true;
        let result = connection.round_trip(&command, self.timeout).await;
        self.in_flight = false;

        if let Err(err) = &result {
            if err.poisons_session() {
                warn!(error = %err, "dropping player session");
                *self.slot = None;
            }
        }
        result
    }
}

impl<S> Drop for SessionGuard<'_, S> {
    fn drop(&mut self) {
        if self.in_flight && self.slot.is_some() {
            warn!("operation cancelled mid round trip, dropping player session");
            *self.slot = None;
        }
    }
}
