use std::time::Duration;

use crate::word_source::WordGenConfig;

/// How long a heuristic end-of-session completion waits for a delimiter
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Tunables for the session engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub debounce: Duration,
    pub words: WordGenConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            words: WordGenConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_max_offset(mut self, max_offset: usize) -> Self {
        self.words.max_offset = max_offset;
        self
    }

    /// Keep the bank order; sessions become reproducible
    pub fn unshuffled(mut self) -> Self {
        self.words.shuffle = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word_source::DEFAULT_MAX_OFFSET;

    #[test]
    fn test_defaults() {
        let cfg = EngineConfig::default();

        assert_eq!(cfg.debounce, Duration::from_millis(100));
        assert_eq!(cfg.words.max_offset, DEFAULT_MAX_OFFSET);
        assert!(cfg.words.shuffle);
    }

    #[test]
    fn test_builders() {
        let cfg = EngineConfig::default()
            .with_debounce(Duration::from_millis(250))
            .with_max_offset(0)
            .unshuffled();

        assert_eq!(cfg.debounce, Duration::from_millis(250));
        assert_eq!(cfg.words.max_offset, 0);
        assert!(!cfg.words.shuffle);
    }
}
