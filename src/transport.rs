//! Transport layer
//!
//! The session core never touches sockets directly; it talks to a
//! [`Transport`], a bidirectional line-oriented byte stream. The one
//! real implementation is [`TcpTransport`], buffered line I/O over a
//! single `TcpStream`. Tests substitute scripted implementations.

use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::config::Config;

/// A bidirectional, line-oriented byte stream.
///
/// Lines are exchanged without their terminators: `read_line` strips the
/// trailing `\r\n` or `\n`, `write_line` appends `\r\n` as the DICT
/// protocol requires.
pub trait Transport {
    /// Read one line, blocking until a full line or end of stream.
    /// Returns `None` when the stream is closed.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Write one line followed by CRLF and flush it out.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Whether the transport considers itself connected.
    fn is_connected(&self) -> bool;

    /// Whether at least one byte is already buffered or immediately
    /// available. Must not block waiting for data that has not arrived;
    /// used to drain trailing response lines.
    fn has_buffered(&mut self) -> bool;

    /// Close the underlying stream. Safe to call more than once.
    fn close(&mut self) -> io::Result<()>;
}

/// Line-buffered transport over a single TCP connection
pub struct TcpTransport {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,

    /// Cleared once `close` succeeds (or fails; close is one-shot)
    connected: bool,
}

impl TcpTransport {
    /// Connect to the server named by the config
    ///
    /// Sets up buffered I/O and configures timeouts
    pub fn connect(config: &Config) -> io::Result<Self> {
        let stream = TcpStream::connect((config.host.as_str(), config.port))?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
            connected: true,
        })
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Transport for TcpTransport {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }

        // Strip CRLF or bare LF
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }

        tracing::trace!("<- {}", line);
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        tracing::trace!("-> {}", line);
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\r\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn has_buffered(&mut self) -> bool {
        if !self.reader.buffer().is_empty() {
            return true;
        }

        // Nothing in the BufReader; probe the socket without blocking.
        let stream = self.reader.get_ref();
        if stream.set_nonblocking(true).is_err() {
            return false;
        }
        let mut probe = [0u8; 1];
        let available = matches!(stream.peek(&mut probe), Ok(n) if n > 0);

        // A socket stuck in non-blocking mode would make every later
        // read fail with WouldBlock; treat the transport as dead.
        if let Err(e) = stream.set_nonblocking(false) {
            tracing::warn!("failed to restore blocking mode on {}: {}", self.peer_addr, e);
            self.connected = false;
            return false;
        }
        available
    }

    fn close(&mut self) -> io::Result<()> {
        if !self.connected {
            return Ok(());
        }
        self.connected = false;

        tracing::debug!("Closing connection to {}", self.peer_addr);
        self.writer.flush()?;
        self.writer.get_ref().shutdown(Shutdown::Both)?;
        Ok(())
    }
}
