use serde::{Deserialize, Serialize};

use crate::defaults;

/// Top-level configuration, read from `config.toml`.
///
/// Every field has a default, so an empty file yields the built-in block set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlocksConfig {
    /// Separator inserted between consecutive block outputs. May be empty.
    /// Default: `" | "`
    #[serde(default = "defaults::default_delimiter")]
    pub delimiter: String,

    /// Shell used to interpret block commands (`<shell> -c <command>`).
    /// Default: `/bin/sh`
    #[serde(default = "defaults::default_shell")]
    pub shell: String,

    /// Maximum length in bytes of one block's output, icon included.
    /// Default: 50
    #[serde(default = "defaults::default_capacity")]
    pub capacity: usize,

    /// Ordered block list. Order here is order on the status line.
    #[serde(default = "defaults::default_blocks", rename = "block")]
    pub blocks: Vec<BlockConfig>,
}

/// One `[[block]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockConfig {
    /// Text prepended to the command output.
    #[serde(default)]
    pub icon: String,

    /// Shell command whose first output line is shown.
    pub command: String,

    /// Refresh period in seconds. `0` disables periodic refresh.
    #[serde(default)]
    pub interval: u32,

    /// Refresh signal id (`SIGRTMIN + signal`). `0` means none.
    #[serde(default)]
    pub signal: u32,
}

impl BlockConfig {
    pub fn new(
        icon: impl Into<String>,
        command: impl Into<String>,
        interval: u32,
        signal: u32,
    ) -> Self {
        Self {
            icon: icon.into(),
            command: command.into(),
            interval,
            signal,
        }
    }

    /// The configured signal id, or `None` when the block has no signal.
    pub fn signal_id(&self) -> Option<u32> {
        (self.signal != 0).then_some(self.signal)
    }
}

impl Default for BlocksConfig {
    fn default() -> Self {
        Self {
            delimiter: defaults::default_delimiter(),
            shell: defaults::default_shell(),
            capacity: defaults::default_capacity(),
            blocks: defaults::default_blocks(),
        }
    }
}
