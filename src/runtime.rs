use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use tracing::{trace, warn};

/// How often the event loop wakes up when nothing happens
pub const TICK_RATE_MS: u64 = 100;

/// What the event loop reacts to
#[derive(Clone, Debug)]
pub enum AppEvent {
    /// A key press, stamped when it was read from the terminal
    Key { event: KeyEvent, at: Instant },
    Resize,
    Tick,
    /// The source is gone and no more input will arrive
    Closed,
}

impl AppEvent {
    /// Key press arriving now
    pub fn key(event: KeyEvent) -> Self {
        AppEvent::Key {
            event,
            at: Instant::now(),
        }
    }
}

/// Anything the runner can wait on for the next event
pub trait EventSource: Send + 'static {
    /// Wait up to `timeout`. `Err(Timeout)` when nothing arrived in time,
    /// `Err(Disconnected)` when the source is gone for good.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Reads the terminal on a background thread. Key releases are dropped
/// here so the loop only ever sees presses and repeats.
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || read_terminal(tx));
        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

fn read_terminal(tx: Sender<AppEvent>) {
    loop {
        let ev = match event::read() {
            Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Release => continue,
            Ok(CtEvent::Key(key)) => AppEvent::key(key),
            Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
            Ok(other) => {
                trace!(event = ?other, "terminal event ignored");
                continue;
            }
            Err(e) => {
                warn!(error = %e, "terminal event reader stopped");
                return;
            }
        };

        if tx.send(ev).is_err() {
            return;
        }
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed source for driving the loop without a terminal
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }

    /// A source together with the sender that feeds it
    pub fn channel() -> (Sender<AppEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::new(rx))
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Hands the event loop one event at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Next event, `Tick` once the tick interval passes, or `Closed` when
    /// the source has shut down
    pub fn step(&self) -> AppEvent {
        self.step_until(None)
    }

    /// Like [`Runner::step`], but wakes no later than `deadline` so a
    /// debounced completion fires on time
    pub fn step_until(&self, deadline: Option<Instant>) -> AppEvent {
        match self.event_source.recv_timeout(self.wait_for(deadline)) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => AppEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => AppEvent::Closed,
        }
    }

    fn wait_for(&self, deadline: Option<Instant>) -> Duration {
        let tick = self.ticker.interval();
        match deadline {
            Some(deadline) => tick.min(deadline.saturating_duration_since(Instant::now())),
            None => tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn runner(tick: Duration) -> (Sender<AppEvent>, Runner<TestEventSource, FixedTicker>) {
        let (tx, source) = TestEventSource::channel();
        (tx, Runner::new(source, FixedTicker::new(tick)))
    }

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, runner) = runner(Duration::from_millis(1));

        assert!(matches!(runner.step(), AppEvent::Tick));
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, runner) = runner(Duration::from_millis(10));
        tx.send(AppEvent::Resize).unwrap();

        assert!(matches!(runner.step(), AppEvent::Resize));
    }

    #[test]
    fn key_events_keep_their_arrival_time() {
        let (tx, runner) = runner(Duration::from_millis(10));
        let at = Instant::now();
        let event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        tx.send(AppEvent::Key { event, at }).unwrap();

        match runner.step() {
            AppEvent::Key { event: got, at: got_at } => {
                assert_eq!(got.code, KeyCode::Char('a'));
                assert_eq!(got_at, at);
            }
            other => panic!("expected key event, got {other:?}"),
        }
    }

    #[test]
    fn disconnected_source_reports_closed() {
        let (tx, runner) = runner(Duration::from_secs(30));
        tx.send(AppEvent::Resize).unwrap();
        drop(tx);

        let started = Instant::now();
        assert!(matches!(runner.step(), AppEvent::Resize));
        assert!(matches!(runner.step(), AppEvent::Closed));
        assert!(matches!(runner.step_until(Some(started)), AppEvent::Closed));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn step_until_wakes_before_long_tick() {
        let (_tx, runner) = runner(Duration::from_secs(30));

        let started = Instant::now();
        let ev = runner.step_until(Some(started + Duration::from_millis(20)));

        assert!(matches!(ev, AppEvent::Tick));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn step_until_past_deadline_returns_immediately() {
        let (_tx, runner) = runner(Duration::from_secs(30));

        let started = Instant::now();
        let ev = runner.step_until(Some(started));

        assert!(matches!(ev, AppEvent::Tick));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn wait_is_capped_by_tick_interval() {
        let (_tx, runner) = runner(Duration::from_millis(50));
        let far = Instant::now() + Duration::from_secs(60);

        assert_eq!(runner.wait_for(None), Duration::from_millis(50));
        assert_eq!(runner.wait_for(Some(far)), Duration::from_millis(50));
    }
}
