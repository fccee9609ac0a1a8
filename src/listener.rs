//! Accepting listener that applies per-connection timeouts.
use std::time::Duration;

use crate::{
    connection::{HeadConfig, ServerConnection},
    transport::{AcceptTransport, Transport},
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for a [`Listener`].
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Receive timeout applied to every accepted connection.
    pub recv_timeout: Duration,
    /// Send timeout applied to every accepted connection.
    pub send_timeout: Duration,
    /// Head limits for accepted connections.
    pub head: HeadConfig,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            recv_timeout: DEFAULT_TIMEOUT,
            send_timeout: DEFAULT_TIMEOUT,
            head: HeadConfig::default(),
        }
    }
}

/// Accepts connections from an [`AcceptTransport`] and hands back
/// server connections ready to receive a head.
///
/// Every accepted stream gets the configured send/receive timeouts, so a
/// stalled peer cannot occupy the connection longer than the timeout. An
/// expired timeout surfaces from that connection as a transport error
/// while the listener keeps accepting.
#[derive(Debug)]
pub struct Listener<L: AcceptTransport> {
    transport: L,
    config: ListenerConfig,
}

impl<L: AcceptTransport> Listener<L> {
    pub fn new(transport: L) -> Self {
        Self::with_config(transport, ListenerConfig::default())
    }

    pub fn with_config(transport: L, config: ListenerConfig) -> Self {
        Self { transport, config }
    }

    /// Starts listening on the underlying transport.
    pub fn listen(&mut self) -> std::io::Result<()> {
        self.transport.listen()
    }

    /// Waits up to `timeout` for a connection to become acceptable.
    pub fn wait(&mut self, timeout: Duration) -> std::io::Result<bool> {
        self.transport.wait(timeout)
    }

    /// Accepts one connection and applies the configured timeouts to it.
    pub fn accept(&mut self) -> std::io::Result<ServerConnection<L::Stream>> {
        let mut stream = self.transport.accept()?;

        stream.set_timeouts(
            Some(self.config.recv_timeout),
            Some(self.config.send_timeout),
        )?;

        tracing::debug!("connection accepted");

        Ok(ServerConnection::new(stream, &self.config.head))
    }

    /// Stops listening.
    pub fn close(&mut self) -> std::io::Result<()> {
        tracing::debug!("listener closed");

        self.transport.close()
    }

    pub fn get_ref(&self) -> &L {
        &self.transport
    }

    pub fn get_mut(&mut self) -> &mut L {
        &mut self.transport
    }
}
