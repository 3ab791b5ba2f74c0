use std::time::Instant;

use tracing::{debug, info, trace};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::interpreter::{interpret, Effect};
use crate::keys::Keystroke;
use crate::language::WordBank;
use crate::preferences::{load_word_count, save_word_count, PreferenceStore};
use crate::session::{Session, Snapshot};
use crate::word_source::WordSource;

/// A debounced completion waiting to fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCompletion {
    pub word_index: usize,
    pub deadline: Instant,
}

/// Owns the active session and everything that outlives a single transition:
/// the word source, the preference store and the debounce handle.
///
/// Events must be fed in arrival order; each one runs to completion before
/// the next is accepted.
#[derive(Debug)]
pub struct Engine<S: PreferenceStore> {
    config: EngineConfig,
    source: WordSource,
    store: S,
    word_count: usize,
    session: Session,
    pending: Option<PendingCompletion>,
}

impl<S: PreferenceStore> Engine<S> {
    /// Build an engine and start its first session
    pub fn new(bank: WordBank, config: EngineConfig, store: S) -> Result<Self> {
        if bank.is_empty() {
            return Err(Error::EmptyWordBank);
        }

        let source = WordSource::new(bank, config.words);
        let word_count = load_word_count(&store);
        let session = Self::fresh_session(&source, word_count);

        Ok(Self {
            config,
            source,
            store,
            word_count,
            session,
            pending: None,
        })
    }

    fn fresh_session(source: &WordSource, count: usize) -> Session {
        let session = Session::new(source.generate(count));
        info!(
            requested = count,
            words = session.words.len(),
            "new session"
        );
        session
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.session.snapshot()
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Word count read from the store when the current session was created
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn pending(&self) -> Option<PendingCompletion> {
        self.pending
    }

    /// When the host should call [`Engine::poll`] next, if anything is scheduled
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    /// Feed one key press.
    ///
    /// A completion that came due before the key arrived fires first. Any
    /// completion still pending is then cancelled: the new key press either
    /// completes the word itself (a delimiter) or changes what would be scored.
    pub fn handle_key(&mut self, stroke: Keystroke) -> Snapshot<'_> {
        self.poll(stroke.at);

        if self.session.finished {
            trace!(key = ?stroke.key, "session finished, key ignored");
            return self.session.snapshot();
        }

        if let Some(superseded) = self.pending.take() {
            debug!(word = superseded.word_index, "pending completion superseded");
        }

        let transition = interpret(&self.session, &stroke);
        self.session = transition.session;

        if let Effect::ScheduleCompletion { word_index } = transition.effect {
            let deadline = stroke.at + self.config.debounce;
            debug!(word = word_index, "completion scheduled");
            self.pending = Some(PendingCompletion {
                word_index,
                deadline,
            });
        }

        self.session.snapshot()
    }

    /// Fire the pending completion if its deadline has passed.
    /// Returns true when the session changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if now < pending.deadline {
            return false;
        }

        self.pending = None;
        if self.session.finished || self.session.current_word_index != pending.word_index {
            return false;
        }

        debug!(word = pending.word_index, "debounced completion fired");
        self.session = self.session.complete_word(pending.deadline);
        true
    }

    /// Replace the session with a fresh one, from any state. The word count
    /// preference is re-read here.
    pub fn reset(&mut self) -> Snapshot<'_> {
        self.pending = None;
        self.word_count = load_word_count(&self.store);
        self.session = Self::fresh_session(&self.source, self.word_count);
        self.session.snapshot()
    }

    /// Persist a new word count and start over with it
    pub fn set_word_count(&mut self, count: usize) -> Result<Snapshot<'_>> {
        let stored = save_word_count(&mut self.store, count)?;
        info!(word_count = stored, "word count changed");
        Ok(self.reset())
    }
}
