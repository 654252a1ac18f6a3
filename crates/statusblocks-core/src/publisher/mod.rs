//! Change-suppressed publishing of the composed status line.

mod stream;
#[cfg(feature = "x11")]
mod title;

pub use stream::StreamSink;
#[cfg(feature = "x11")]
pub use title::TitleSink;

use tracing::{debug, error};

use crate::errors::BlocksError;

/// Destination for published status lines.
pub trait Sink: Send {
    /// Short name for log events.
    fn name(&self) -> &'static str;

    fn write(&mut self, line: &str) -> Result<(), BlocksError>;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn write(&mut self, line: &str) -> Result<(), BlocksError> {
        (**self).write(line)
    }
}

/// Forwards a line to its sink only when it differs from the last one written.
pub struct Publisher<S> {
    sink: S,
    previous: Option<String>,
}

impl<S: Sink> Publisher<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            previous: None,
        }
    }

    /// Publish `line` if it changed. Returns whether the sink was written.
    ///
    /// The remembered line only advances after a successful write, so a
    /// failed write is retried by the next publish.
    pub fn publish(&mut self, line: String) -> bool {
        if self.previous.as_deref() == Some(line.as_str()) {
            return false;
        }

        match self.sink.write(&line) {
            Ok(()) => {
                debug!(
                    event = "core.publisher.publish_completed",
                    sink = self.sink.name(),
                    line = %line,
                );
                self.previous = Some(line);
                true
            }
            Err(e) => {
                error!(
                    event = "core.publisher.publish_failed",
                    sink = self.sink.name(),
                    error = %e,
                );
                false
            }
        }
    }

    /// The last line that reached the sink.
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use super::Sink;
    use crate::errors::BlocksError;

    /// Sink that records every written line; clones share the record.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingSink {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingSink {
        pub(crate) fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl Sink for RecordingSink {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn write(&mut self, line: &str) -> Result<(), BlocksError> {
            self.lines.lock().unwrap().push(line.to_string());
            Ok(())
        }
    }
}
