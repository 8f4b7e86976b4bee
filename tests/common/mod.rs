//! Shared test helpers
//!
//! A scripted, in-memory [`Transport`] that behaves like a DICT server:
//! reply lines become readable only after the matching command has been
//! written, so request/response pacing (and drain behavior) matches a
//! real connection.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use glossa::Transport;

/// Shared log of every line the client wrote
pub type SentLog = Arc<Mutex<Vec<String>>>;

pub struct ScriptedTransport {
    /// Lines currently readable by the client
    incoming: VecDeque<String>,

    /// Pending (command, reply lines) exchanges; a written command that
    /// matches one queues its reply
    exchanges: Vec<(String, Vec<String>)>,

    sent: SentLog,
    connected: bool,
    fail_writes: bool,
}

impl ScriptedTransport {
    /// A transport whose first readable line is the server greeting
    pub fn new(greeting: &str) -> Self {
        Self {
            incoming: VecDeque::from([greeting.to_string()]),
            exchanges: Vec::new(),
            sent: Arc::new(Mutex::new(Vec::new())),
            connected: true,
            fail_writes: false,
        }
    }

    /// A transport preloaded with raw readable lines and no exchanges
    /// (for driving the reader layer directly)
    pub fn raw(lines: &[&str]) -> Self {
        Self {
            incoming: lines.iter().map(|s| s.to_string()).collect(),
            exchanges: Vec::new(),
            sent: Arc::new(Mutex::new(Vec::new())),
            connected: true,
            fail_writes: false,
        }
    }

    /// Script one exchange: when `command` is written, `reply` becomes
    /// readable. Each exchange is consumed at most once.
    pub fn expect(&mut self, command: &str, reply: &[&str]) {
        self.exchanges.push((
            command.to_string(),
            reply.iter().map(|s| s.to_string()).collect(),
        ));
    }

    /// Make every subsequent write fail with a broken pipe
    pub fn fail_writes(&mut self) {
        self.fail_writes = true;
    }

    /// Handle onto the log of written lines, usable after the transport
    /// has been moved into a session
    pub fn sent_log(&self) -> SentLog {
        Arc::clone(&self.sent)
    }
}

impl Transport for ScriptedTransport {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        // Empty queue means the server has nothing more for us: EOF.
        Ok(self.incoming.pop_front())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"));
        }

        self.sent.lock().unwrap().push(line.to_string());

        if let Some(pos) = self.exchanges.iter().position(|(cmd, _)| cmd == line) {
            let (_, reply) = self.exchanges.remove(pos);
            self.incoming.extend(reply);
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn has_buffered(&mut self) -> bool {
        !self.incoming.is_empty()
    }

    fn close(&mut self) -> io::Result<()> {
        self.connected = false;
        Ok(())
    }
}

/// Every line the client has written so far
pub fn sent_lines(log: &SentLog) -> Vec<String> {
    log.lock().unwrap().clone()
}
