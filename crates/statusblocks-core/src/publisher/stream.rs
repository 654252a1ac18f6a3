use std::io::{self, Write};

use super::Sink;
use crate::errors::BlocksError;

/// Writes each line plus a newline to a stream, flushing every time.
pub struct StreamSink<W> {
    writer: W,
}

impl StreamSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

impl<W: Write + Send> Sink for StreamSink<W> {
    fn name(&self) -> &'static str {
        "stream"
    }

    fn write(&mut self, line: &str) -> Result<(), BlocksError> {
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }
}
