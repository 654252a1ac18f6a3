use statusblocks_core::{BlocksError, Sink, StreamSink};
use tracing::info;

/// Pick the publish sink once at startup.
///
/// `print` selects stdout. Otherwise the root-window title sink is used,
/// which requires a display connection; without x11 support stdout is the
/// only sink.
pub fn select_sink(print: bool) -> Result<Box<dyn Sink>, BlocksError> {
    if print {
        info!(event = "cli.sink.selected", sink = "stream");
        return Ok(Box::new(StreamSink::stdout()));
    }
    default_sink()
}

#[cfg(feature = "x11")]
fn default_sink() -> Result<Box<dyn Sink>, BlocksError> {
    let sink = statusblocks_core::TitleSink::open()?;
    info!(event = "cli.sink.selected", sink = "title");
    Ok(Box::new(sink))
}

#[cfg(not(feature = "x11"))]
fn default_sink() -> Result<Box<dyn Sink>, BlocksError> {
    info!(event = "cli.sink.selected", sink = "stream", reason = "built without x11");
    Ok(Box::new(StreamSink::stdout()))
}
