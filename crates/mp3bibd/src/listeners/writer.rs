//! Listener writing line-framed responses to an output stream.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use super::{DeliveryError, ResponseListener};

/// Writes each response followed by a newline, flushing after every write.
#[derive(Debug)]
pub struct WriterListener<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterListener<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> ResponseListener for WriterListener<W> {
    fn deliver(&self, response: &str) -> Result<(), DeliveryError> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        write_line(&mut *writer, response).map_err(|error| match error.kind() {
            io::ErrorKind::BrokenPipe => DeliveryError::Disconnected,
            _ => DeliveryError::Io(error),
        })
    }
}

fn write_line(writer: &mut impl Write, response: &str) -> io::Result<()> {
    writer.write_all(response.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}
