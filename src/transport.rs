//! Byte transports behind connections and listeners.
//!
//! The parsing layer never touches sockets directly; it drives these
//! traits. Adapters over [`std::net`] are provided for plain TCP.
use std::{
    io::{Read, Write},
    net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs},
    time::{Duration, Instant},
};

/// A bidirectional byte stream feeding one connection.
///
/// Implementations block at most the configured timeouts; an expired
/// timeout surfaces as [`std::io::ErrorKind::TimedOut`] or
/// [`std::io::ErrorKind::WouldBlock`]. Closing the transport must cause
/// any in-flight read or write to return promptly.
pub trait Transport {
    /// Reads available bytes. Returns `Ok(0)` on orderly close by the
    /// peer.
    fn try_read(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;

    /// Writes some bytes, returning how many were accepted.
    fn try_write(&mut self, buf: &[u8]) -> std::io::Result<usize>;

    /// Bounds how long a single read or write may block.
    fn set_timeouts(
        &mut self,
        recv: Option<Duration>,
        send: Option<Duration>,
    ) -> std::io::Result<()>;

    /// Shuts down both directions of the stream.
    fn shutdown(&mut self) -> std::io::Result<()>;
}

/// An accept-capable transport behind a [`Listener`](crate::listener::Listener).
pub trait AcceptTransport {
    type Stream: Transport;

    /// Starts listening for connections.
    fn listen(&mut self) -> std::io::Result<()>;

    /// Accepts one connection, blocking until a peer connects.
    fn accept(&mut self) -> std::io::Result<Self::Stream>;

    /// Waits up to `timeout` for a connection to become acceptable.
    fn wait(&mut self, timeout: Duration) -> std::io::Result<bool>;

    /// Stops listening.
    fn close(&mut self) -> std::io::Result<()>;
}

/// [`Transport`] adapter over a [`TcpStream`].
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self { stream }
    }

    /// Connects to a remote address.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> std::io::Result<Self> {
        Ok(Self::new(TcpStream::connect(addr)?))
    }

    pub fn get_ref(&self) -> &TcpStream {
        &self.stream
    }

    pub fn get_mut(&mut self) -> &mut TcpStream {
        &mut self.stream
    }

    pub fn into_inner(self) -> TcpStream {
        self.stream
    }
}

impl Transport for TcpTransport {
    fn try_read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.stream.read(buf)
    }

    fn try_write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stream.write(buf)
    }

    fn set_timeouts(
        &mut self,
        recv: Option<Duration>,
        send: Option<Duration>,
    ) -> std::io::Result<()> {
        self.stream.set_read_timeout(recv)?;
        self.stream.set_write_timeout(send)?;

        Ok(())
    }

    fn shutdown(&mut self) -> std::io::Result<()> {
        self.stream.shutdown(Shutdown::Both)
    }
}

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// [`AcceptTransport`] adapter over a [`TcpListener`].
///
/// The listener socket is bound by [`listen()`](AcceptTransport::listen),
/// not on construction.
#[derive(Debug)]
pub struct TcpAcceptor {
    addr: SocketAddr,
    listener: Option<TcpListener>,
    pending: Option<TcpStream>,
}

impl TcpAcceptor {
    pub fn new<A: ToSocketAddrs>(addr: A) -> std::io::Result<Self> {
        let addr = addr.to_socket_addrs()?.next().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "no socket address")
        })?;

        Ok(Self {
            addr,
            listener: None,
            pending: None,
        })
    }

    /// Returns the bound local address once listening.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener()?.local_addr()
    }

    fn listener(&self) -> std::io::Result<&TcpListener> {
        self.listener.as_ref().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotConnected, "not listening")
        })
    }
}

impl AcceptTransport for TcpAcceptor {
    type Stream = TcpTransport;

    fn listen(&mut self) -> std::io::Result<()> {
        self.listener = Some(TcpListener::bind(self.addr)?);

        Ok(())
    }

    fn accept(&mut self) -> std::io::Result<Self::Stream> {
        if let Some(stream) = self.pending.take() {
            return Ok(TcpTransport::new(stream));
        }

        let listener = self.listener()?;
        listener.set_nonblocking(false)?;

        let (stream, _peer) = listener.accept()?;

        Ok(TcpTransport::new(stream))
    }

    fn wait(&mut self, timeout: Duration) -> std::io::Result<bool> {
        if self.pending.is_some() {
            return Ok(true);
        }

        self.listener()?.set_nonblocking(true)?;

        let deadline = Instant::now() + timeout;
        let result = loop {
            match self.listener()?.accept() {
                Ok((stream, _peer)) => {
                    stream.set_nonblocking(false)?;
                    self.pending = Some(stream);
                    break Ok(true);
                }
                Err(error) if error.kind() == std::io::ErrorKind::WouldBlock => {
                    if Instant::now() >= deadline {
                        break Ok(false);
                    }

                    std::thread::sleep(WAIT_POLL_INTERVAL);
                }
                Err(error) => break Err(error),
            }
        };

        self.listener()?.set_nonblocking(false)?;

        result
    }

    fn close(&mut self) -> std::io::Result<()> {
        self.listener = None;
        self.pending = None;

        Ok(())
    }
}
