//! Syslog writer for the tracing subscriber.
//!
//! Each formatted event is buffered and handed to `syslog(3)` as a single
//! message when the writer is dropped, with a priority derived from the
//! event level.

use std::ffi::{CStr, CString, c_int};
use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Identifier prepended to every message by syslogd.
const IDENT: &CStr = c"sshauth";

/// Map an event level to a syslog priority.
///
/// Regular messages go out at NOTICE and debug output at INFO.
pub fn priority_for(level: &Level) -> c_int {
    match *level {
        Level::ERROR => libc::LOG_ERR,
        Level::WARN => libc::LOG_WARNING,
        Level::INFO => libc::LOG_NOTICE,
        Level::DEBUG | Level::TRACE => libc::LOG_INFO,
    }
}

/// Opens the syslog connection and hands out one writer per event.
#[derive(Debug)]
pub struct Syslog {
    _opened: (),
}

impl Syslog {
    /// Open the connection to the local syslog daemon.
    pub fn open() -> Self {
        // SAFETY: IDENT is a 'static NUL-terminated string, as openlog
        // keeps the pointer for the lifetime of the process.
        unsafe {
            libc::openlog(IDENT.as_ptr(), libc::LOG_PID, libc::LOG_USER);
        }
        Self { _opened: () }
    }
}

impl<'a> MakeWriter<'a> for Syslog {
    type Writer = SyslogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SyslogWriter::new(libc::LOG_NOTICE)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        SyslogWriter::new(priority_for(meta.level()))
    }
}

/// Buffers one event and sends it on drop.
#[derive(Debug)]
pub struct SyslogWriter {
    priority: c_int,
    buf: Vec<u8>,
}

impl SyslogWriter {
    fn new(priority: c_int) -> Self {
        Self {
            priority,
            buf: Vec::new(),
        }
    }

    /// Take the buffered message, without trailing newlines or NUL bytes.
    fn take_message(&mut self) -> Option<CString> {
        let mut bytes = std::mem::take(&mut self.buf);
        bytes.retain(|b| *b != 0);
        while bytes.last() == Some(&b'\n') {
            bytes.pop();
        }

        if bytes.is_empty() {
            return None;
        }
        CString::new(bytes).ok()
    }
}

impl io::Write for SyslogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for SyslogWriter {
    fn drop(&mut self) {
        if let Some(message) = self.take_message() {
            // SAFETY: both strings are NUL-terminated and outlive the call;
            // the fixed "%s" format keeps the message from being interpreted.
            unsafe {
                libc::syslog(self.priority, c"%s".as_ptr(), message.as_ptr());
            }
        }
    }
}
