//! Built-in fallback values, used when no config file exists.

use crate::types::BlockConfig;

pub(crate) fn default_delimiter() -> String {
    " | ".to_string()
}

pub(crate) fn default_shell() -> String {
    "/bin/sh".to_string()
}

pub(crate) fn default_capacity() -> usize {
    50
}

pub(crate) fn default_blocks() -> Vec<BlockConfig> {
    vec![
        BlockConfig::new(
            "",
            "free -h | awk '/^Mem/ { print $3\"/\"$2 }' | sed s/i//g",
            30,
            0,
        ),
        BlockConfig::new("", "~/.local/bin/battery", 15, 0),
        BlockConfig::new("", "date '+%FT%H:%M v %V'", 5, 0),
    ]
}
