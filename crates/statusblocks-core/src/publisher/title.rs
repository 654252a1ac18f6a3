use std::ffi::CString;
use std::ptr;

use tracing::info;
use x11::xlib;

use super::Sink;
use crate::errors::BlocksError;

/// Sets the root window's name (`WM_NAME`) on the default X display.
///
/// Status bars such as dwm read the root window name as their text.
pub struct TitleSink {
    display: *mut xlib::Display,
    root: xlib::Window,
}

// The display connection is only ever touched by the task that owns the sink.
unsafe impl Send for TitleSink {}

impl TitleSink {
    /// Connect to the display named by `$DISPLAY`.
    pub fn open() -> Result<Self, BlocksError> {
        let display = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if display.is_null() {
            let name = std::env::var("DISPLAY").unwrap_or_else(|_| "(DISPLAY unset)".to_string());
            return Err(BlocksError::DisplayUnavailable(name));
        }

        let root = unsafe {
            let screen = xlib::XDefaultScreen(display);
            xlib::XRootWindow(display, screen)
        };

        info!(event = "core.publisher.display_opened", root = root);
        Ok(Self { display, root })
    }
}

impl Sink for TitleSink {
    fn name(&self) -> &'static str {
        "title"
    }

    fn write(&mut self, line: &str) -> Result<(), BlocksError> {
        // Xlib takes a C string; anything after an embedded NUL is unreachable anyway.
        let text = line.split('\0').next().unwrap_or_default();
        let name = CString::new(text).map_err(|e| BlocksError::SinkWrite(e.to_string()))?;
        unsafe {
            xlib::XStoreName(self.display, self.root, name.as_ptr());
            xlib::XFlush(self.display);
        }
        Ok(())
    }
}

impl Drop for TitleSink {
    fn drop(&mut self) {
        unsafe {
            xlib::XCloseDisplay(self.display);
        }
    }
}
