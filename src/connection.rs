//! Connection head state machine.
//!
//! One connection object carries one message exchange. Bytes pulled from
//! the transport accumulate in a rewindable buffer until the empty line
//! ending the head is recognized, so the head parses identically no
//! matter how the bytes were chunked on the wire.
use crate::{
    buffer::RewindBuffer,
    error::{GeneralError, ParseError, ParseErrorKind, ProtocolError, ProtocolErrorKind},
    fields::FieldMap,
    parse,
    status::Status,
    transport::Transport,
};

const READ_CHUNK_LENGTH: usize = 4096;

/// Default cap on the buffered size of an unterminated head.
pub const DEFAULT_MAX_HEAD_LENGTH: usize = 32768;

/// Configuration for receiving a message head.
#[derive(Debug, Clone)]
pub struct HeadConfig {
    /// Maximum buffered size of a head before the connection fails with
    /// [`ProtocolErrorKind::HeadTooBig`].
    pub max_head_len: usize,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            max_head_len: DEFAULT_MAX_HEAD_LENGTH,
        }
    }
}

/// Progress of the message exchange on a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fresh,
    HeadPending,
    HeadReceived,
    BodyPending,
    BodyReceived,
    Closed,
    Failed,
}

#[derive(Debug, Clone)]
enum StartLine {
    Request {
        method: String,
        target: String,
        version: String,
    },
    Status {
        version: String,
        code: u16,
        reason: String,
    },
}

/// Shared head-parsing engine behind both connection roles.
#[derive(Debug)]
struct MessageHead {
    buf: RewindBuffer<u8>,
    phase: Phase,
    start: Option<StartLine>,
    fields: FieldMap,
}

impl MessageHead {
    fn new(config: &HeadConfig) -> Self {
        Self {
            buf: RewindBuffer::bounded(config.max_head_len),
            phase: Phase::Fresh,
            start: None,
            fields: FieldMap::new(),
        }
    }

    fn receive_head<T: Transport>(&mut self, transport: &mut T) -> Result<(), GeneralError> {
        assert!(
            matches!(self.phase, Phase::Fresh),
            "head already received or connection no longer fresh"
        );

        self.phase = Phase::HeadPending;

        match self.receive_head_inner(transport) {
            Ok(()) => {
                self.phase = Phase::HeadReceived;
                Ok(())
            }
            Err(error) => {
                self.phase = Phase::Failed;
                Err(error)
            }
        }
    }

    fn receive_head_inner<T: Transport>(&mut self, transport: &mut T) -> Result<(), GeneralError> {
        let mut chunk = [0u8; READ_CHUNK_LENGTH];

        loop {
            if let Some(index) = parse::scan_head_end(&mut self.buf) {
                let (start, fields) = parse_head(&self.buf.data()[..index])?;

                self.buf.consume(index);
                self.start = Some(start);
                self.fields = fields;

                tracing::trace!(head_len = index, "head received");

                return Ok(());
            }

            let remaining = self.buf.remaining_capacity().unwrap_or(chunk.len());

            if remaining == 0 {
                return Err(ProtocolError::new(ProtocolErrorKind::HeadTooBig).into());
            }

            let read_end = remaining.min(chunk.len());
            let read_length = transport.try_read(&mut chunk[..read_end])?;

            if read_length == 0 {
                return Err(ProtocolError::new(ProtocolErrorKind::UnexpectedEof).into());
            }

            self.buf.extend_from_slice(&chunk[..read_length]);

            tracing::trace!(read_length, buf_len = self.buf.len(), "fill buf");
        }
    }

    fn receive_body<T: Transport>(&mut self, transport: &mut T) -> Result<Vec<u8>, GeneralError> {
        assert!(
            matches!(self.phase, Phase::HeadReceived),
            "head not received or body already received"
        );

        self.phase = Phase::BodyPending;

        match self.receive_body_inner(transport) {
            Ok(body) => {
                self.phase = Phase::BodyReceived;
                Ok(body)
            }
            Err(error) => {
                self.phase = Phase::Failed;
                Err(error)
            }
        }
    }

    fn receive_body_inner<T: Transport>(
        &mut self,
        transport: &mut T,
    ) -> Result<Vec<u8>, GeneralError> {
        if self.is_chunked() {
            return Err(ProtocolError::new(ProtocolErrorKind::UnsupportedTransferEncoding).into());
        }

        let length = match self.fields.get_u64_strict("Content-Length") {
            Some(Ok(length)) => length,
            Some(Err(error)) => {
                return Err(ProtocolError::new(ProtocolErrorKind::InvalidContentLength)
                    .with_source(error)
                    .into());
            }
            None => 0,
        };

        let mut body = Vec::with_capacity(length.min(READ_CHUNK_LENGTH as u64) as usize);

        // Bytes past the head may already be buffered.
        let buffered = (self.buf.len() as u64).min(length - body.len() as u64) as usize;
        body.extend_from_slice(&self.buf.data()[..buffered]);
        self.buf.consume(buffered);

        let mut chunk = [0u8; READ_CHUNK_LENGTH];

        while (body.len() as u64) < length {
            let remaining = (length - body.len() as u64).min(chunk.len() as u64) as usize;
            let read_length = transport.try_read(&mut chunk[..remaining])?;

            if read_length == 0 {
                return Err(ProtocolError::new(ProtocolErrorKind::UnexpectedEof).into());
            }

            body.extend_from_slice(&chunk[..read_length]);
        }

        tracing::trace!(body_len = body.len(), "body received");

        Ok(body)
    }

    fn is_chunked(&self) -> bool {
        self.fields
            .get_all("Transfer-Encoding")
            .flat_map(|value| value.split(','))
            .any(|name| name.trim().eq_ignore_ascii_case("chunked"))
    }

    fn start(&self) -> &StartLine {
        assert!(
            matches!(
                self.phase,
                Phase::HeadReceived | Phase::BodyPending | Phase::BodyReceived
            ),
            "head not received"
        );

        self.start.as_ref().unwrap()
    }

    fn fields(&self) -> &FieldMap {
        assert!(
            matches!(
                self.phase,
                Phase::HeadReceived | Phase::BodyPending | Phase::BodyReceived
            ),
            "head not received"
        );

        &self.fields
    }
}

fn parse_head(input: &[u8]) -> Result<(StartLine, FieldMap), ParseError> {
    let (remain, start_line) = parse::start_line::start_line(input)?;
    let (remain, pairs) = parse::fields::field_pairs(remain)?;

    if remain != b"\r\n".as_slice() && remain != b"\n".as_slice() {
        return Err(ParseError::new(ParseErrorKind::Syntax)
            .with_snippet(remain[..remain.len().min(16)].escape_ascii().to_string()));
    }

    let start = match start_line {
        parse::start_line::StartLineRef::Request(line) => StartLine::Request {
            method: String::from_utf8(line.method.to_vec()).unwrap(),
            target: String::from_utf8(line.target.to_vec()).unwrap(),
            version: String::from_utf8(line.version.to_vec()).unwrap(),
        },
        parse::start_line::StartLineRef::Status(line) => StartLine::Status {
            version: String::from_utf8(line.version.to_vec()).unwrap(),
            code: std::str::from_utf8(line.status_code)
                .unwrap()
                .parse()
                .unwrap(),
            reason: String::from_utf8_lossy(line.reason_phrase).into_owned(),
        },
    };

    let mut fields = FieldMap::with_capacity(pairs.len());

    for pair in pairs {
        let name = String::from_utf8(pair.name.to_vec()).unwrap();
        let value = String::from_utf8(pair.value.to_vec())?;

        fields.append(name, value);
    }

    Ok((start, fields))
}

fn send_all<T: Transport>(transport: &mut T, mut data: &[u8]) -> std::io::Result<()> {
    while !data.is_empty() {
        match transport.try_write(data)? {
            0 => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "transport accepted no bytes",
                ));
            }
            written => data = &data[written..],
        }
    }

    Ok(())
}

/// Server side of one request/response exchange.
///
/// Built by a [`Listener`](crate::listener::Listener). The request must
/// be fully received before a response may be composed; the exchange is
/// half-duplex.
#[derive(Debug)]
pub struct ServerConnection<T: Transport> {
    transport: T,
    head: MessageHead,
    start_sent: bool,
    head_ended: bool,
}

impl<T: Transport> ServerConnection<T> {
    pub(crate) fn new(transport: T, config: &HeadConfig) -> Self {
        Self {
            transport,
            head: MessageHead::new(config),
            start_sent: false,
            head_ended: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.head.phase
    }

    /// Receives bytes until the request head is complete and parses it.
    ///
    /// # Panics
    ///
    /// Panics when a head was already received on this connection.
    pub fn receive_head(&mut self) -> Result<(), GeneralError> {
        self.head.receive_head(&mut self.transport)
    }

    /// Receives the request body as declared by `Content-Length`.
    ///
    /// # Panics
    ///
    /// Panics when the head has not been received yet.
    pub fn receive_body(&mut self) -> Result<Vec<u8>, GeneralError> {
        self.head.receive_body(&mut self.transport)
    }

    /// Returns the request method.
    ///
    /// # Panics
    ///
    /// Panics when the head has not been received or is not a request.
    pub fn method(&self) -> &str {
        match self.head.start() {
            StartLine::Request { method, .. } => method,
            StartLine::Status { .. } => panic!("not a request head"),
        }
    }

    /// Returns the request target.
    ///
    /// # Panics
    ///
    /// Panics when the head has not been received or is not a request.
    pub fn target(&self) -> &str {
        match self.head.start() {
            StartLine::Request { target, .. } => target,
            StartLine::Status { .. } => panic!("not a request head"),
        }
    }

    /// Returns the protocol version of the request line.
    ///
    /// # Panics
    ///
    /// Panics when the head has not been received or is not a request.
    pub fn version(&self) -> &str {
        match self.head.start() {
            StartLine::Request { version, .. } => version,
            StartLine::Status { .. } => panic!("not a request head"),
        }
    }

    /// Returns the header fields of the received head.
    ///
    /// # Panics
    ///
    /// Panics when the head has not been received yet.
    pub fn fields(&self) -> &FieldMap {
        self.head.fields()
    }

    /// Composes and sends the status line of the response.
    ///
    /// # Panics
    ///
    /// Panics unless the request head and body have been fully received,
    /// or when a status line was already sent.
    pub fn send_start(&mut self, status: Status) -> Result<(), GeneralError> {
        assert!(
            matches!(self.head.phase, Phase::BodyReceived),
            "request not fully received"
        );
        assert!(!self.start_sent, "start line already sent");

        let line = format!("HTTP/1.1 {:03} {}\r\n", status.code, status.reason);
        send_all(&mut self.transport, line.as_bytes())?;

        self.start_sent = true;

        Ok(())
    }

    /// Sends one response header field.
    ///
    /// # Panics
    ///
    /// Panics unless called between `send_start` and `end_head`.
    pub fn send_field(&mut self, name: &str, value: &str) -> Result<(), GeneralError> {
        assert!(self.start_sent && !self.head_ended, "head not open");

        let line = format!("{}: {}\r\n", name, value);
        send_all(&mut self.transport, line.as_bytes())?;

        Ok(())
    }

    /// Sends the empty line ending the response head.
    ///
    /// # Panics
    ///
    /// Panics unless `send_start` was called, or when the head was
    /// already ended.
    pub fn end_head(&mut self) -> Result<(), GeneralError> {
        assert!(self.start_sent && !self.head_ended, "head not open");

        send_all(&mut self.transport, b"\r\n")?;
        self.head_ended = true;

        Ok(())
    }

    /// Sends response body bytes.
    ///
    /// # Panics
    ///
    /// Panics unless the response head has been ended.
    pub fn send_body(&mut self, data: &[u8]) -> Result<(), GeneralError> {
        assert!(self.head_ended, "head not ended");

        send_all(&mut self.transport, data)?;

        Ok(())
    }

    /// Closes the connection, shutting the transport down.
    pub fn close(&mut self) -> std::io::Result<()> {
        self.head.phase = Phase::Closed;
        self.transport.shutdown()
    }

    pub fn get_ref(&self) -> &T {
        &self.transport
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

/// Client side of one request/response exchange.
#[derive(Debug)]
pub struct ClientConnection<T: Transport> {
    transport: T,
    head: MessageHead,
    start_sent: bool,
    head_ended: bool,
}

impl<T: Transport> ClientConnection<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, &HeadConfig::default())
    }

    pub fn with_config(transport: T, config: &HeadConfig) -> Self {
        Self {
            transport,
            head: MessageHead::new(config),
            start_sent: false,
            head_ended: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.head.phase
    }

    /// Composes and sends the request line.
    ///
    /// # Panics
    ///
    /// Panics when a response head was already received on this
    /// connection, or when a request line was already sent.
    pub fn send_start(&mut self, method: &str, target: &str) -> Result<(), GeneralError> {
        assert!(
            matches!(self.head.phase, Phase::Fresh),
            "response already received"
        );
        assert!(!self.start_sent, "start line already sent");

        let line = format!("{} {} HTTP/1.0\r\n", method, target);
        send_all(&mut self.transport, line.as_bytes())?;

        self.start_sent = true;

        Ok(())
    }

    /// Sends one request header field.
    ///
    /// # Panics
    ///
    /// Panics unless called between `send_start` and `end_head`.
    pub fn send_field(&mut self, name: &str, value: &str) -> Result<(), GeneralError> {
        assert!(self.start_sent && !self.head_ended, "head not open");

        let line = format!("{}: {}\r\n", name, value);
        send_all(&mut self.transport, line.as_bytes())?;

        Ok(())
    }

    /// Sends the empty line ending the request head.
    ///
    /// # Panics
    ///
    /// Panics unless `send_start` was called, or when the head was
    /// already ended.
    pub fn end_head(&mut self) -> Result<(), GeneralError> {
        assert!(self.start_sent && !self.head_ended, "head not open");

        send_all(&mut self.transport, b"\r\n")?;
        self.head_ended = true;

        Ok(())
    }

    /// Sends request body bytes.
    ///
    /// # Panics
    ///
    /// Panics unless the request head has been ended.
    pub fn send_body(&mut self, data: &[u8]) -> Result<(), GeneralError> {
        assert!(self.head_ended, "head not ended");

        send_all(&mut self.transport, data)?;

        Ok(())
    }

    /// Receives bytes until the response head is complete and parses it.
    ///
    /// # Panics
    ///
    /// Panics when a head was already received on this connection.
    pub fn receive_head(&mut self) -> Result<(), GeneralError> {
        self.head.receive_head(&mut self.transport)
    }

    /// Receives the response body as declared by `Content-Length`.
    ///
    /// # Panics
    ///
    /// Panics when the head has not been received yet.
    pub fn receive_body(&mut self) -> Result<Vec<u8>, GeneralError> {
        self.head.receive_body(&mut self.transport)
    }

    /// Returns the response status code.
    ///
    /// # Panics
    ///
    /// Panics when the head has not been received or is not a response.
    pub fn status_code(&self) -> u16 {
        match self.head.start() {
            StartLine::Status { code, .. } => *code,
            StartLine::Request { .. } => panic!("not a response head"),
        }
    }

    /// Returns the response reason phrase.
    ///
    /// # Panics
    ///
    /// Panics when the head has not been received or is not a response.
    pub fn reason_phrase(&self) -> &str {
        match self.head.start() {
            StartLine::Status { reason, .. } => reason,
            StartLine::Request { .. } => panic!("not a response head"),
        }
    }

    /// Returns the protocol version of the status line.
    ///
    /// # Panics
    ///
    /// Panics when the head has not been received or is not a response.
    pub fn version(&self) -> &str {
        match self.head.start() {
            StartLine::Status { version, .. } => version,
            StartLine::Request { .. } => panic!("not a response head"),
        }
    }

    /// Returns the header fields of the received head.
    ///
    /// # Panics
    ///
    /// Panics when the head has not been received yet.
    pub fn fields(&self) -> &FieldMap {
        self.head.fields()
    }

    /// Closes the connection, shutting the transport down.
    pub fn close(&mut self) -> std::io::Result<()> {
        self.head.phase = Phase::Closed;
        self.transport.shutdown()
    }

    pub fn get_ref(&self) -> &T {
        &self.transport
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::time::Duration;

    use super::*;

    /// Transport fed from a script of read chunks.
    ///
    /// Each `try_read` returns at most one chunk. Reading past the
    /// script reports an orderly close, or a timeout when `stalls` is
    /// set.
    struct MockTransport {
        chunks: VecDeque<Vec<u8>>,
        written: Vec<u8>,
        stalls: bool,
    }

    impl MockTransport {
        fn new<I: IntoIterator<Item = Vec<u8>>>(chunks: I) -> Self {
            Self {
                chunks: chunks.into_iter().collect(),
                written: Vec::new(),
                stalls: false,
            }
        }

        fn stalled() -> Self {
            let mut transport = Self::new([]);
            transport.stalls = true;
            transport
        }
    }

    impl Transport for MockTransport {
        fn try_read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.chunks.pop_front() {
                Some(mut chunk) => {
                    let length = chunk.len().min(buf.len());
                    buf[..length].copy_from_slice(&chunk[..length]);

                    if length < chunk.len() {
                        chunk.drain(..length);
                        self.chunks.push_front(chunk);
                    }

                    Ok(length)
                }
                None if self.stalls => Err(std::io::Error::from(std::io::ErrorKind::TimedOut)),
                None => Ok(0),
            }
        }

        fn try_write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn set_timeouts(
            &mut self,
            _recv: Option<Duration>,
            _send: Option<Duration>,
        ) -> std::io::Result<()> {
            Ok(())
        }

        fn shutdown(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    const REQUEST: &[u8] = b"GET /index.html?a=1 HTTP/1.1\r\n\
        Host: example.com\r\n\
        Cookie: session=abc\r\n\
        \r\n";

    fn server(transport: MockTransport) -> ServerConnection<MockTransport> {
        ServerConnection::new(transport, &HeadConfig::default())
    }

    #[test]
    fn test_receive_request_head() {
        let mut conn = server(MockTransport::new([REQUEST.to_vec()]));

        conn.receive_head().unwrap();

        assert_eq!(conn.phase(), Phase::HeadReceived);
        assert_eq!(conn.method(), "GET");
        assert_eq!(conn.target(), "/index.html?a=1");
        assert_eq!(conn.version(), "HTTP/1.1");
        assert_eq!(conn.fields().get("Host"), Some("example.com"));
        assert_eq!(conn.fields().get("cookie"), Some("session=abc"));
    }

    #[test]
    fn test_chunked_feed_parses_identically() {
        let mut one_shot = server(MockTransport::new([REQUEST.to_vec()]));
        one_shot.receive_head().unwrap();

        for chunk_len in [1, 2, 3, 7, 10] {
            let chunks: Vec<Vec<u8>> = REQUEST.chunks(chunk_len).map(<[u8]>::to_vec).collect();
            let mut chunked = server(MockTransport::new(chunks));

            chunked.receive_head().unwrap();

            assert_eq!(chunked.method(), one_shot.method());
            assert_eq!(chunked.target(), one_shot.target());
            assert_eq!(chunked.version(), one_shot.version());
            assert_eq!(chunked.fields(), one_shot.fields());
        }
    }

    #[test]
    fn test_receive_response_head() {
        let mut conn = ClientConnection::new(MockTransport::new([
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n".to_vec(),
        ]));

        conn.receive_head().unwrap();

        assert_eq!(conn.status_code(), 404);
        assert_eq!(conn.reason_phrase(), "Not Found");
        assert_eq!(conn.version(), "HTTP/1.1");
    }

    #[test]
    fn test_malformed_start_line_fails() {
        let mut conn = server(MockTransport::new([b"ICY 200 OK\r\n\r\n".to_vec()]));

        let error = conn.receive_head().unwrap_err();

        assert!(error.is_parse());
        assert_eq!(conn.phase(), Phase::Failed);
    }

    #[test]
    fn test_header_line_without_colon_fails() {
        let mut conn = server(MockTransport::new([
            b"GET / HTTP/1.1\r\nno colon here\r\n\r\n".to_vec(),
        ]));

        let error = conn.receive_head().unwrap_err();

        assert!(error.is_parse());
        assert_eq!(conn.phase(), Phase::Failed);
    }

    #[test]
    fn test_head_too_big_fails() {
        let mut head = b"GET /".to_vec();
        head.resize(128, b'a');
        head.extend_from_slice(b" HTTP/1.1\r\n");

        let mut conn = ServerConnection::new(
            MockTransport::new([head]),
            &HeadConfig { max_head_len: 64 },
        );

        let error = conn.receive_head().unwrap_err();

        assert_eq!(
            error.as_protocol().unwrap().kind(),
            ProtocolErrorKind::HeadTooBig
        );
        assert_eq!(conn.phase(), Phase::Failed);
    }

    #[test]
    fn test_eof_before_head_end_fails() {
        let mut conn = server(MockTransport::new([b"GET / HTTP/1.1\r\n".to_vec()]));

        let error = conn.receive_head().unwrap_err();

        assert_eq!(
            error.as_protocol().unwrap().kind(),
            ProtocolErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn test_stalled_transport_times_out() {
        let mut conn = server(MockTransport::stalled());

        let error = conn.receive_head().unwrap_err();

        assert!(error.is_timeout());
        assert_eq!(conn.phase(), Phase::Failed);
    }

    #[test]
    fn test_receive_body_with_buffered_bytes() {
        let mut message = Vec::new();
        message.extend_from_slice(b"POST /submit HTTP/1.1\r\nContent-Length: 11\r\n\r\n");
        message.extend_from_slice(b"hello");

        let mut conn = server(MockTransport::new([message, b" world".to_vec()]));

        conn.receive_head().unwrap();
        let body = conn.receive_body().unwrap();

        assert_eq!(body, b"hello world");
        assert_eq!(conn.phase(), Phase::BodyReceived);
    }

    #[test]
    fn test_receive_body_without_content_length() {
        let mut conn = server(MockTransport::new([b"GET / HTTP/1.1\r\n\r\n".to_vec()]));

        conn.receive_head().unwrap();
        let body = conn.receive_body().unwrap();

        assert!(body.is_empty());
        assert_eq!(conn.phase(), Phase::BodyReceived);
    }

    #[test]
    fn test_chunked_body_rejected() {
        let mut conn = server(MockTransport::new([
            b"POST / HTTP/1.1\r\nTransfer-Encoding: gzip, chunked\r\n\r\n".to_vec(),
        ]));

        conn.receive_head().unwrap();
        let error = conn.receive_body().unwrap_err();

        assert_eq!(
            error.as_protocol().unwrap().kind(),
            ProtocolErrorKind::UnsupportedTransferEncoding
        );
    }

    #[test]
    fn test_invalid_content_length_fails() {
        let mut conn = server(MockTransport::new([
            b"POST / HTTP/1.1\r\nContent-Length: -5\r\n\r\n".to_vec(),
        ]));

        conn.receive_head().unwrap();
        let error = conn.receive_body().unwrap_err();

        assert_eq!(
            error.as_protocol().unwrap().kind(),
            ProtocolErrorKind::InvalidContentLength
        );
    }

    #[test]
    fn test_server_send_flow() {
        let mut conn = server(MockTransport::new([b"GET / HTTP/1.1\r\n\r\n".to_vec()]));

        conn.receive_head().unwrap();
        conn.receive_body().unwrap();

        conn.send_start(crate::status::NOT_FOUND).unwrap();
        conn.send_field("Content-Length", "9").unwrap();
        conn.end_head().unwrap();
        conn.send_body(b"not found").unwrap();

        assert_eq!(
            conn.get_ref().written,
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\n\r\nnot found"
        );
    }

    #[test]
    fn test_client_send_flow() {
        let mut conn = ClientConnection::new(MockTransport::new([]));

        conn.send_start("GET", "/page").unwrap();
        conn.send_field("Host", "example.com").unwrap();
        conn.end_head().unwrap();

        assert_eq!(
            conn.get_ref().written,
            b"GET /page HTTP/1.0\r\nHost: example.com\r\n\r\n"
        );
    }

    #[test]
    #[should_panic(expected = "request not fully received")]
    fn test_send_start_before_body_panics() {
        let mut conn = server(MockTransport::new([b"GET / HTTP/1.1\r\n\r\n".to_vec()]));

        conn.receive_head().unwrap();
        let _ = conn.send_start(crate::status::OK);
    }

    #[test]
    #[should_panic(expected = "start line already sent")]
    fn test_double_send_start_panics() {
        let mut conn = server(MockTransport::new([b"GET / HTTP/1.1\r\n\r\n".to_vec()]));

        conn.receive_head().unwrap();
        conn.receive_body().unwrap();
        conn.send_start(crate::status::OK).unwrap();
        let _ = conn.send_start(crate::status::OK);
    }

    #[test]
    #[should_panic(expected = "head not received")]
    fn test_accessor_before_head_panics() {
        let conn = server(MockTransport::new([]));
        let _ = conn.method();
    }

    #[test]
    #[should_panic(expected = "head already received")]
    fn test_double_receive_head_panics() {
        let mut conn = server(MockTransport::new([b"GET / HTTP/1.1\r\n\r\n".to_vec()]));

        conn.receive_head().unwrap();
        let _ = conn.receive_head();
    }
}
