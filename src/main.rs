use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{error, info, warn};
use wordsprint::{
    app_dirs::AppDirs,
    config::{EngineConfig, DEFAULT_DEBOUNCE_MS},
    engine::Engine,
    keys::Keystroke,
    language::WordBank,
    logging,
    preferences::{cycle_word_count, FilePreferenceStore, PreferenceStore},
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    ui::SessionView,
    word_source::DEFAULT_MAX_OFFSET,
};

/// minimal typing speed test for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a shuffled list of common words and get your words per minute and accuracy. The chosen word count is remembered between runs."
)]
pub struct Cli {
    /// number of words per session (remembered for next time)
    #[clap(short = 'w', long)]
    words: Option<usize>,

    /// milliseconds to wait for a trailing space after the last word is typed
    #[clap(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// largest random offset into the shuffled word bank
    #[clap(long, default_value_t = DEFAULT_MAX_OFFSET)]
    max_offset: usize,

    /// preferences file to use instead of the platform default
    #[clap(long)]
    preferences: Option<PathBuf>,

    /// log file to use instead of the platform default
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_max_offset(self.max_offset)
    }

    fn preference_store(&self) -> FilePreferenceStore {
        match &self.preferences {
            Some(path) => FilePreferenceStore::with_path(path),
            None => FilePreferenceStore::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App<S: PreferenceStore> {
    engine: Engine<S>,
}

impl App<FilePreferenceStore> {
    pub fn new(cli: &Cli) -> wordsprint::Result<Self> {
        let mut engine = Engine::new(
            WordBank::bundled()?,
            cli.engine_config(),
            cli.preference_store(),
        )?;
        if let Some(words) = cli.words {
            engine.set_word_count(words)?;
        }
        Ok(Self { engine })
    }
}

impl<S: PreferenceStore> App<S> {
    pub fn with_engine(engine: Engine<S>) -> Self {
        Self { engine }
    }

    fn change_word_count(&mut self, forward: bool) {
        let next = cycle_word_count(self.engine.word_count(), forward);
        if let Err(e) = self.engine.set_word_count(next) {
            error!(error = %e, "could not save word count");
        }
    }

    /// Application keys are handled here; everything else goes to the session
    fn on_key(&mut self, key: KeyEvent, now: Instant) -> Control {
        if key.kind == KeyEventKind::Release {
            return Control::Continue;
        }

        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Control::Quit
            }
            KeyCode::Tab => {
                self.engine.reset();
            }
            KeyCode::Left => self.change_word_count(false),
            KeyCode::Right => self.change_word_count(true),
            KeyCode::Enter | KeyCode::Char('r') if self.engine.session().finished => {
                self.engine.reset();
            }
            _ => {
                if let Some(stroke) = Keystroke::from_key_event(key, now) {
                    self.engine.handle_key(stroke);
                }
            }
        }

        Control::Continue
    }

    /// Returns true when the screen needs redrawing
    fn on_tick(&mut self, now: Instant) -> bool {
        self.engine.poll(now)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let log_path = cli.log_file.clone().unwrap_or_else(AppDirs::log_path);
    let _log_guard = match logging::init(&log_path) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("wordsprint: logging disabled: {e}");
            None
        }
    };

    let mut app = App::new(&cli)?;
    info!(word_count = app.engine.word_count(), "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        warn!(error = %e, "event loop ended with an error");
    }
    result
}

fn start_tui<B: Backend, S: PreferenceStore, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step_until(app.engine.next_deadline()) {
            AppEvent::Tick => {
                if app.on_tick(Instant::now()) {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            AppEvent::Closed => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "terminal input closed",
                )
                .into());
            }
            AppEvent::Key { event, at } => {
                if app.on_key(event, at) == Control::Quit {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui<S: PreferenceStore>(app: &App<S>, f: &mut Frame) {
    let view = SessionView::new(app.engine.snapshot(), app.engine.word_count());
    f.render_widget(view, f.area());
}
