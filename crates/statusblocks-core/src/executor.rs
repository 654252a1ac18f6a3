//! Runs one block's command and captures its first output line.

use std::io;
use std::process::Stdio;

use statusblocks_config::BlocksConfig;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::registry::BlockDescriptor;

/// Executes block commands through a shell with bounded output capture.
#[derive(Debug, Clone)]
pub struct Executor {
    shell: String,
    capacity: usize,
}

impl Executor {
    pub fn new(shell: impl Into<String>, capacity: usize) -> Self {
        Self {
            shell: shell.into(),
            capacity,
        }
    }

    pub fn from_config(config: &BlocksConfig) -> Self {
        Self::new(config.shell.clone(), config.capacity)
    }

    /// Re-run `block.command` and overwrite `slot` with icon + first line.
    ///
    /// At most `capacity - icon.len()` bytes are read and exactly one
    /// trailing newline is stripped. If the shell cannot be spawned the slot
    /// holds only the icon. Never fails: a broken block degrades in place.
    pub async fn refresh(&self, block: &BlockDescriptor, slot: &mut String) {
        slot.clear();
        slot.push_str(&block.icon);
        truncate_to_capacity(slot, self.capacity);

        let budget = self.capacity - slot.len();
        let output = match self.first_line(&block.command, budget).await {
            Ok(output) => output,
            Err(e) => {
                warn!(
                    event = "core.executor.spawn_failed",
                    command = %block.command,
                    shell = %self.shell,
                    error = %e,
                );
                return;
            }
        };

        slot.push_str(&output);
        truncate_to_capacity(slot, self.capacity);
        if slot.ends_with('\n') {
            slot.pop();
        }

        debug!(
            event = "core.executor.refresh_completed",
            command = %block.command,
            len = slot.len(),
        );
    }

    /// Spawn `<shell> -c <command>` and read up to `budget` bytes, stopping
    /// after the first newline.
    async fn first_line(&self, command: &str, budget: usize) -> io::Result<String> {
        let mut child = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let mut buf = Vec::with_capacity(budget);
        if let Some(stdout) = child.stdout.take() {
            let mut reader = BufReader::new(stdout.take(budget as u64));
            if let Err(e) = reader.read_until(b'\n', &mut buf).await {
                debug!(
                    event = "core.executor.read_failed",
                    command = %command,
                    error = %e,
                );
            }
            // Close the pipe before reaping so a chatty child gets SIGPIPE
            // instead of blocking on a full pipe.
            drop(reader);
        }

        match child.wait().await {
            Ok(status) if !status.success() => {
                debug!(
                    event = "core.executor.command_failed",
                    command = %command,
                    status = %status,
                );
            }
            Ok(_) => {}
            Err(e) => {
                debug!(
                    event = "core.executor.wait_failed",
                    command = %command,
                    error = %e,
                );
            }
        }

        Ok(decode_output(buf))
    }
}

/// Decode captured bytes, dropping a multi-byte character cut by the limit.
fn decode_output(mut bytes: Vec<u8>) -> String {
    let tail_start = bytes.len().saturating_sub(3);
    if let Some(start) = (tail_start..bytes.len())
        .rev()
        .find(|&i| bytes[i] & 0xC0 != 0x80)
        && let Err(e) = std::str::from_utf8(&bytes[start..])
        && e.error_len().is_none()
    {
        bytes.truncate(start);
    }

    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Cut `text` to at most `capacity` bytes on a character boundary.
pub(crate) fn truncate_to_capacity(text: &mut String, capacity: usize) {
    if text.len() <= capacity {
        return;
    }
    let mut end = capacity;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}
