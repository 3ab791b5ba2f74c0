//! Maps key presses onto session transitions.

use tracing::trace;

use crate::keys::{Key, Keystroke};
use crate::session::Session;

/// Side effect requested by a transition, carried out by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Complete word `word_index` after the debounce delay unless a later
    /// key press supersedes it
    ScheduleCompletion { word_index: usize },
}

/// Successor session plus whatever the engine has to do next
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: Session,
    pub effect: Effect,
}

impl Transition {
    fn unchanged(session: &Session) -> Self {
        Self {
            session: session.clone(),
            effect: Effect::None,
        }
    }

    fn to(session: Session) -> Self {
        Self {
            session,
            effect: Effect::None,
        }
    }
}

/// Apply one key press to `session`.
///
/// Rules, in precedence order:
/// 1. a character on the last word that equals that word's final character
///    is appended and a debounced completion is scheduled
/// 2. a delimiter completes the word once the buffer has reached the word's
///    length, however much was over-typed
/// 3. backspace drops one character, or the whole buffer with ctrl/cmd held
/// 4. any other printable character is appended, even past the word's end
/// 5. a delimiter on a buffer shorter than the word is swallowed
///
/// Finished sessions ignore everything.
pub fn interpret(session: &Session, stroke: &Keystroke) -> Transition {
    if session.finished {
        return Transition::unchanged(session);
    }

    let transition = match stroke.key {
        Key::Char(c) => {
            let completes_last_word = session.is_last_word()
                && session
                    .current_word()
                    .and_then(|word| word.chars().last())
                    == Some(c);

            let next = session.push_char(c, stroke.at);
            if completes_last_word {
                Transition {
                    session: next,
                    effect: Effect::ScheduleCompletion {
                        word_index: session.current_word_index,
                    },
                }
            } else {
                Transition::to(next)
            }
        }
        Key::Space | Key::Enter => {
            if session.reached_word_length() {
                Transition::to(session.complete_word(stroke.at))
            } else {
                Transition::unchanged(session)
            }
        }
        Key::Backspace if stroke.modifiers.is_command() => Transition::to(session.clear_buffer()),
        Key::Backspace => Transition::to(session.pop_char()),
        Key::Other => Transition::unchanged(session),
    };

    trace!(key = ?stroke.key, effect = ?transition.effect, "interpreted key");

    transition
}
