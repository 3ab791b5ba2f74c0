//! Word accuracy, running accuracy and words-per-minute.

use std::time::Duration;

/// Accuracy every session starts from
pub const INITIAL_ACCURACY: f64 = 100.0;

/// Number of positions where `typed` matches `target`, compared up to the
/// length of `target`. Extra typed characters never count.
pub fn matching_positions(typed: &str, target: &str) -> usize {
    typed
        .chars()
        .zip(target.chars())
        .filter(|(t, e)| t == e)
        .count()
}

/// Accuracy of a single completed word, `round(matching / len * 100)`
pub fn word_accuracy(typed: &str, target: &str) -> f64 {
    let target_len = target.chars().count();
    if target_len == 0 {
        return INITIAL_ACCURACY;
    }

    let matching = matching_positions(typed, target);
    (matching as f64 / target_len as f64 * 100.0).round()
}

/// Fold a word's accuracy into the running value.
///
/// This is the mean of the previous running value and the new word, not the
/// mean over all words: recent words weigh more.
pub fn smooth_accuracy(running: f64, word: f64) -> f64 {
    (running + word) / 2.0
}

/// `round(words / minutes)`. A zero duration yields `f64::INFINITY`.
pub fn words_per_minute(word_count: usize, elapsed: Duration) -> f64 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    (word_count as f64 / minutes).round()
}
