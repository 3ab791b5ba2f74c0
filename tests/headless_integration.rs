use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use wordsprint::config::EngineConfig;
use wordsprint::engine::Engine;
use wordsprint::keys::Keystroke;
use wordsprint::language::WordBank;
use wordsprint::preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, WORD_COUNT_KEY,
};
use wordsprint::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use wordsprint::session::SessionPhase;

// Headless integration using the runtime + Engine without a TTY

fn engine_with<S: PreferenceStore>(words: &[&str], store: S) -> Engine<S> {
    Engine::new(
        WordBank::from_words(words.iter().copied()),
        EngineConfig::default()
            .unshuffled()
            .with_debounce(Duration::from_millis(20)),
        store,
    )
    .unwrap()
}

fn key(code: KeyCode) -> AppEvent {
    AppEvent::key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn send_text(tx: &mpsc::Sender<AppEvent>, text: &str) {
    for c in text.chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
}

/// Drive the engine the way the binary does, until the session finishes or
/// the step budget runs out
fn drive<S: PreferenceStore>(
    engine: &mut Engine<S>,
    runner: &Runner<TestEventSource, FixedTicker>,
    max_steps: u32,
) {
    for _ in 0..max_steps {
        match runner.step_until(engine.next_deadline()) {
            AppEvent::Tick => {
                engine.poll(Instant::now());
            }
            AppEvent::Resize => {}
            AppEvent::Closed => break,
            AppEvent::Key { event, at } => {
                if let Some(stroke) = Keystroke::from_key_event(event, at) {
                    engine.handle_key(stroke);
                }
            }
        }
        if engine.session().finished {
            break;
        }
    }
}

fn runner_for(rx: mpsc::Receiver<AppEvent>) -> Runner<TestEventSource, FixedTicker> {
    Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    )
}

#[test]
fn headless_typing_flow_completes_with_delimiter() {
    let store = MemoryPreferenceStore::with_value(WORD_COUNT_KEY, "2");
    let mut engine = engine_with(&["cat", "dog"], store);
    assert_eq!(engine.session().words, vec!["cat", "dog"]);

    let (tx, rx) = mpsc::channel();
    let runner = runner_for(rx);
    send_text(&tx, "cat dog ");

    drive(&mut engine, &runner, 100);

    let s = engine.session();
    assert!(s.finished);
    assert_eq!(s.phase(), SessionPhase::Finished);
    assert_eq!(s.running_accuracy, 100.0);
    assert!(s.wpm > 0.0);
}

#[test]
fn headless_last_word_completes_without_delimiter() {
    let store = MemoryPreferenceStore::with_value(WORD_COUNT_KEY, "2");
    let mut engine = engine_with(&["cat", "dog"], store);

    let (tx, rx) = mpsc::channel();
    let runner = runner_for(rx);
    send_text(&tx, "cat dog");

    // ticks keep arriving once the channel is drained, which fires the
    // debounced completion
    drive(&mut engine, &runner, 1000);

    assert!(engine.session().finished);
    assert!(engine.pending().is_none());
}

#[test]
fn headless_backspace_and_command_backspace() {
    let store = MemoryPreferenceStore::with_value(WORD_COUNT_KEY, "2");
    let mut engine = engine_with(&["cat", "dog"], store);

    let (tx, rx) = mpsc::channel();
    let runner = runner_for(rx);

    send_text(&tx, "cxz");
    tx.send(key(KeyCode::Backspace)).unwrap();
    tx.send(AppEvent::key(KeyEvent::new(
        KeyCode::Backspace,
        KeyModifiers::CONTROL,
    )))
    .unwrap();
    send_text(&tx, "cat");
    drop(tx);

    drive(&mut engine, &runner, 20);

    let s = engine.session();
    assert_eq!(s.current_word_index, 0);
    assert_eq!(s.typed_buffer, "cat");
    assert!(!s.finished);
}

#[test]
fn headless_short_input_does_not_advance() {
    let store = MemoryPreferenceStore::with_value(WORD_COUNT_KEY, "2");
    let mut engine = engine_with(&["cat", "dog"], store);

    let (tx, rx) = mpsc::channel();
    let runner = runner_for(rx);
    send_text(&tx, "ca ");
    drop(tx);

    drive(&mut engine, &runner, 20);

    assert_eq!(engine.session().current_word_index, 0);
    assert_eq!(engine.session().typed_buffer, "ca");
}

#[test]
fn headless_wrong_char_lowers_accuracy() {
    let store = MemoryPreferenceStore::with_value(WORD_COUNT_KEY, "2");
    let mut engine = engine_with(&["cat", "dog"], store);

    let (tx, rx) = mpsc::channel();
    let runner = runner_for(rx);
    // "cot" scores 67 on "cat", then "dog" scores 100
    send_text(&tx, "cot dog ");

    drive(&mut engine, &runner, 100);

    let s = engine.session();
    assert!(s.finished);
    assert_eq!(s.running_accuracy, (((100.0 + 67.0) / 2.0) + 100.0) / 2.0);
}

#[test]
fn headless_overtyped_word_keeps_full_accuracy() {
    let store = MemoryPreferenceStore::with_value(WORD_COUNT_KEY, "2");
    let mut engine = engine_with(&["cat", "dog"], store);

    let (tx, rx) = mpsc::channel();
    let runner = runner_for(rx);
    // extra characters past the word's end are not scored
    send_text(&tx, "catxyz dog ");

    drive(&mut engine, &runner, 100);

    let s = engine.session();
    assert!(s.finished);
    assert_eq!(s.running_accuracy, 100.0);
}

#[test]
fn headless_word_count_survives_restart_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("preferences.json");
    let words: Vec<String> = (0..30).map(|i| format!("w{i}")).collect();
    let bank_words: Vec<&str> = words.iter().map(String::as_str).collect();

    let mut engine = engine_with(&bank_words, FilePreferenceStore::with_path(&path));
    // nothing stored yet: default count, capped by the bank size
    assert_eq!(engine.word_count(), 50);
    assert_eq!(engine.session().words.len(), 30);

    engine.set_word_count(10).unwrap();
    assert_eq!(engine.session().words.len(), 10);
    assert!(path.exists());

    let reopened = engine_with(&bank_words, FilePreferenceStore::with_path(&path));
    assert_eq!(reopened.word_count(), 10);
    assert_eq!(reopened.session().words.len(), 10);
}

#[test]
fn headless_reset_after_finish_starts_fresh() {
    let store = MemoryPreferenceStore::with_value(WORD_COUNT_KEY, "1");
    let mut engine = engine_with(&["go"], store);

    let (tx, rx) = mpsc::channel();
    let runner = runner_for(rx);
    send_text(&tx, "go ");
    drive(&mut engine, &runner, 100);
    assert!(engine.session().finished);

    engine.reset();

    let s = engine.session();
    assert_eq!(s.phase(), SessionPhase::NotStarted);
    assert_eq!(s.current_word_index, 0);
    assert_eq!(s.running_accuracy, 100.0);
    assert!(s.started_at.is_none());
}
