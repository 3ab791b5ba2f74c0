use std::time::Instant;

use tracing::{debug, info};

use crate::scoring::{smooth_accuracy, word_accuracy, words_per_minute, INITIAL_ACCURACY};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    Finished,
}

/// One attempt at typing a generated word sequence, from reset to finish.
///
/// Transitions never mutate a session in place; each returns the successor
/// so that every step can be inspected on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub words: Vec<String>,
    pub current_word_index: usize,
    pub typed_buffer: String,
    pub started_at: Option<Instant>,
    pub running_accuracy: f64,
    pub finished: bool,
    pub wpm: f64,
}

impl Session {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            current_word_index: 0,
            typed_buffer: String::new(),
            started_at: None,
            running_accuracy: INITIAL_ACCURACY,
            finished: false,
            wpm: 0.0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.finished {
            SessionPhase::Finished
        } else if self.started_at.is_some() || self.current_word_index > 0 {
            SessionPhase::InProgress
        } else {
            SessionPhase::NotStarted
        }
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.current_word_index).map(String::as_str)
    }

    pub fn is_last_word(&self) -> bool {
        !self.words.is_empty() && self.current_word_index == self.words.len() - 1
    }

    /// Characters typed for the word in progress
    pub fn typed_len(&self) -> usize {
        self.typed_buffer.chars().count()
    }

    /// True once the buffer is at least as long as the current word
    pub fn reached_word_length(&self) -> bool {
        self.current_word()
            .is_some_and(|word| self.typed_len() >= word.chars().count())
    }

    /// Append a character; the first one anchors the session clock
    pub fn push_char(&self, c: char, at: Instant) -> Self {
        let mut next = self.clone();
        next.typed_buffer.push(c);
        if next.started_at.is_none() {
            debug!("first keystroke, session clock started");
            next.started_at = Some(at);
        }
        next
    }

    /// Drop the last typed character
    pub fn pop_char(&self) -> Self {
        let mut next = self.clone();
        next.typed_buffer.pop();
        next
    }

    /// Drop the whole word in progress
    pub fn clear_buffer(&self) -> Self {
        let mut next = self.clone();
        next.typed_buffer.clear();
        next
    }

    /// Score the current word and advance to the next one, finishing the
    /// session when the last word is done.
    pub fn complete_word(&self, at: Instant) -> Self {
        let Some(target) = self.current_word() else {
            return self.clone();
        };
        if self.finished {
            return self.clone();
        }

        let accuracy = word_accuracy(&self.typed_buffer, target);
        let mut next = self.clone();
        next.running_accuracy = smooth_accuracy(self.running_accuracy, accuracy);
        next.typed_buffer.clear();
        next.current_word_index += 1;

        debug!(
            word = target,
            typed = %self.typed_buffer,
            accuracy,
            running = next.running_accuracy,
            "word completed"
        );

        if next.current_word_index == next.words.len() {
            let started_at = *next.started_at.get_or_insert(at);
            next.wpm = words_per_minute(next.words.len(), at.saturating_duration_since(started_at));
            next.finished = true;
            info!(
                words = next.words.len(),
                wpm = next.wpm,
                accuracy = next.running_accuracy,
                "session finished"
            );
        }

        next
    }

    /// Read-only view handed to the rendering surface
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            words: &self.words,
            current_word_index: self.current_word_index,
            typed_buffer: &self.typed_buffer,
            finished: self.finished,
            wpm: self.wpm,
            running_accuracy: self.running_accuracy,
            phase: self.phase(),
        }
    }
}

/// What the rendering surface receives after each transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<'a> {
    pub words: &'a [String],
    pub current_word_index: usize,
    pub typed_buffer: &'a str,
    pub finished: bool,
    pub wpm: f64,
    pub running_accuracy: f64,
    pub phase: SessionPhase,
}
