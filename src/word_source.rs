use crate::language::WordBank;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Default upper bound for the random starting offset into the shuffled bank
pub const DEFAULT_MAX_OFFSET: usize = 9;

/// Configuration for word generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordGenConfig {
    /// Largest offset (inclusive) skipped before slicing the shuffled bank
    pub max_offset: usize,
    /// When false the bank order is used as-is and no offset is applied
    pub shuffle: bool,
}

impl Default for WordGenConfig {
    fn default() -> Self {
        Self {
            max_offset: DEFAULT_MAX_OFFSET,
            shuffle: true,
        }
    }
}

/// Produces the ordered target words for a session
#[derive(Debug, Clone)]
pub struct WordSource {
    bank: WordBank,
    config: WordGenConfig,
}

impl WordSource {
    pub fn new(bank: WordBank, config: WordGenConfig) -> Self {
        Self { bank, config }
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn config(&self) -> WordGenConfig {
        self.config
    }

    /// Generate `count` words using the thread-local RNG
    pub fn generate(&self, count: usize) -> Vec<String> {
        self.generate_with_rng(count, &mut rand::thread_rng())
    }

    /// Generate up to `count` words: full-bank shuffle, skip a random small
    /// offset, then take a contiguous slice.
    ///
    /// The result always holds `min(count, bank size)` words; the offset is
    /// narrowed when the bank has no room to spare.
    pub fn generate_with_rng<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<String> {
        let take = count.min(self.bank.len());
        if take == 0 {
            return Vec::new();
        }

        let mut words = self.bank.words.clone();
        let offset = if self.config.shuffle {
            words.shuffle(rng);
            let room = self.config.max_offset.min(words.len() - take);
            rng.gen_range(0..=room)
        } else {
            0
        };

        debug!(count, take, offset, "generated session words");

        words.into_iter().skip(offset).take(take).collect()
    }
}
