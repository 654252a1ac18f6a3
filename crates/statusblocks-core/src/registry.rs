//! Immutable, ordered block list built once from configuration.

use std::collections::BTreeSet;

use statusblocks_config::{BlockConfig, BlocksConfig};

/// One configured block. Never mutated after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDescriptor {
    pub icon: String,
    pub command: String,
    /// Seconds between periodic refreshes. `0` = signal/startup only.
    pub interval: u32,
    pub signal: Option<u32>,
}

impl BlockDescriptor {
    pub fn new(icon: impl Into<String>, command: impl Into<String>, interval: u32) -> Self {
        Self {
            icon: icon.into(),
            command: command.into(),
            interval,
            signal: None,
        }
    }

    pub fn with_signal(mut self, signal: u32) -> Self {
        self.signal = (signal != 0).then_some(signal);
        self
    }

    /// Whether the periodic clock refreshes this block on `tick`.
    pub fn is_due(&self, tick: u64) -> bool {
        self.interval != 0 && tick % u64::from(self.interval) == 0
    }

    /// Whether a refresh event carrying `id` targets this block.
    pub fn matches_signal(&self, id: u32) -> bool {
        self.signal == Some(id)
    }
}

impl From<&BlockConfig> for BlockDescriptor {
    fn from(config: &BlockConfig) -> Self {
        Self {
            icon: config.icon.clone(),
            command: config.command.clone(),
            interval: config.interval,
            signal: config.signal_id(),
        }
    }
}

/// Fixed-size block list. Index `i` here is slot `i` on the status line.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    blocks: Vec<BlockDescriptor>,
}

impl Registry {
    pub fn new(blocks: Vec<BlockDescriptor>) -> Self {
        Self { blocks }
    }

    pub fn from_config(config: &BlocksConfig) -> Self {
        Self::new(config.blocks.iter().map(BlockDescriptor::from).collect())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BlockDescriptor> {
        self.blocks.iter()
    }

    /// Distinct signal ids used by at least one block.
    pub fn signal_ids(&self) -> BTreeSet<u32> {
        self.blocks.iter().filter_map(|b| b.signal).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interval_never_due() {
        let block = BlockDescriptor::new("", "true", 0);
        assert!((0..1000).all(|tick| !block.is_due(tick)));
    }

    #[test]
    fn test_due_iff_tick_divisible_by_interval() {
        for interval in 1..=12u32 {
            let block = BlockDescriptor::new("", "true", interval);
            for tick in 0..200u64 {
                assert_eq!(
                    block.is_due(tick),
                    tick % u64::from(interval) == 0,
                    "interval {} tick {}",
                    interval,
                    tick
                );
            }
        }
    }

    #[test]
    fn test_tick_zero_refreshes_every_periodic_block() {
        assert!(BlockDescriptor::new("", "true", 1).is_due(0));
        assert!(BlockDescriptor::new("", "true", 30).is_due(0));
    }

    #[test]
    fn test_signal_matching() {
        let block = BlockDescriptor::new("", "true", 0).with_signal(3);
        assert!(block.matches_signal(3));
        assert!(!block.matches_signal(4));
        assert!(!block.matches_signal(0));

        let unsignalled = BlockDescriptor::new("", "true", 0).with_signal(0);
        assert_eq!(unsignalled.signal, None);
        assert!(!unsignalled.matches_signal(0));
    }

    #[test]
    fn test_registry_from_config_keeps_order() {
        let config = BlocksConfig {
            blocks: vec![
                BlockConfig::new("M:", "echo 5", 30, 0),
                BlockConfig::new("B:", "echo 90", 15, 2),
                BlockConfig::new("V:", "echo 40", 0, 2),
            ],
            ..BlocksConfig::default()
        };
        let registry = Registry::from_config(&config);
        assert_eq!(registry.len(), 3);
        let icons: Vec<&str> = registry.iter().map(|b| b.icon.as_str()).collect();
        assert_eq!(icons, vec!["M:", "B:", "V:"]);
        assert_eq!(registry.signal_ids().into_iter().collect::<Vec<_>>(), vec![2]);
    }
}
