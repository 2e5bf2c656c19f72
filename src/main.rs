mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    event::{DisableFocusChange, EnableFocusChange, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    env,
    error::Error,
    io::{self, stdin, Write},
    path::PathBuf,
    time::Duration,
};
use swiftype::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    language::SupportedLanguage,
    logging::{self, LOG_ENV},
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    session::RunId,
    word_generator::{WordGenConfig, WordGenerator},
    Difficulty, ResultSink, TestResult, TypingEngine,
};
use tracing::{info, warn};

/// word-by-word typing speed practice with live wpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a run of common words one at a time. The timer starts on your first keystroke, pauses while the terminal loses focus, and you get words per minute and accuracy at the end."
)]
pub struct Cli {
    /// test length: short (20 words), medium (50) or long (100)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// vocabulary to draw words from
    #[clap(short = 'l', long, value_enum)]
    language: Option<SupportedLanguage>,

    /// practice these space separated words instead of random ones
    #[clap(short = 'w', long)]
    words: Option<String>,

    /// display refresh interval in milliseconds
    #[clap(long)]
    tick_ms: Option<u64>,

    /// append logs to this file (filter with SWIFTYPE_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Command line flags win over the stored config
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(difficulty) = self.difficulty {
            cfg.difficulty = difficulty;
        }
        if let Some(language) = self.language {
            cfg.language = language;
        }
        if let Some(tick_ms) = self.tick_ms {
            cfg.tick_rate_ms = tick_ms.max(1);
        }
        cfg
    }

    fn to_word_gen_config(&self, cfg: &Config) -> WordGenConfig {
        WordGenConfig {
            language: cfg.language,
            custom_words: self
                .words
                .as_ref()
                .map(|w| w.split_whitespace().map(str::to_string).collect()),
        }
    }

    fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| env::var_os(LOG_ENV).map(|_| AppDirs::log_path()))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Screen {
    #[default]
    Typing,
    Results,
}

/// Moves between the typing and results screens; receives the finished run
#[derive(Debug, Default)]
pub struct Navigator {
    pub screen: Screen,
    pub result: Option<TestResult>,
}

impl ResultSink for Navigator {
    fn deliver(&mut self, result: TestResult) {
        info!(%result, "showing results");
        self.result = Some(result);
        self.screen = Screen::Results;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub engine: TypingEngine,
    pub nav: Navigator,
    pub focused: bool,
    /// Run that was current when the pending tick was armed
    tick_run: RunId,
}

impl App {
    pub fn new(cli: &Cli, cfg: &Config) -> swiftype::Result<Self> {
        let generator = WordGenerator::from_config(&cli.to_word_gen_config(cfg))?;
        let engine = TypingEngine::new(cfg.difficulty, generator)
            .with_grace(Duration::from_millis(cfg.grace_ms));

        Ok(Self {
            tick_run: engine.run_id(),
            engine,
            nav: Navigator::default(),
            focused: true,
        })
    }

    pub fn reset(&mut self, difficulty: Option<Difficulty>) {
        self.engine.reset(difficulty);
        self.nav.screen = Screen::Typing;
        self.nav.result = None;
    }

    /// A reset between two ticks makes the next one stale
    pub fn on_tick(&mut self) {
        self.engine.on_tick(self.tick_run);
        self.tick_run = self.engine.run_id();
    }

    pub fn on_event(&mut self, event: AppEvent) -> KeyOutcome {
        let outcome = match event {
            AppEvent::Tick => {
                self.on_tick();
                KeyOutcome::Continue
            }
            AppEvent::FocusGained => {
                self.on_focus(true);
                KeyOutcome::Continue
            }
            AppEvent::FocusLost => {
                self.on_focus(false);
                KeyOutcome::Continue
            }
            AppEvent::Resize => KeyOutcome::Continue,
            AppEvent::Closed => KeyOutcome::Quit,
            AppEvent::Key(key) => self.on_key(key),
        };
        self.engine.poll_result(&mut self.nav);
        outcome
    }

    pub fn on_focus(&mut self, focused: bool) {
        self.focused = focused;
        if focused {
            self.engine.on_focus_gained();
        } else {
            self.engine.on_focus_lost();
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind != KeyEventKind::Press {
            return KeyOutcome::Continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Char('c') if ctrl => return KeyOutcome::Quit,
            _ => {}
        }

        match self.nav.screen {
            Screen::Typing => match key.code {
                KeyCode::Char('r') if ctrl => self.reset(None),
                KeyCode::Tab => self.reset(Some(self.engine.difficulty().next())),
                KeyCode::F(n @ 1..=3) => self.reset(Some(Difficulty::ALL[usize::from(n) - 1])),
                KeyCode::Enter => self.engine.on_key_enter(),
                KeyCode::Backspace => self.engine.backspace(),
                KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                    self.engine.type_char(c)
                }
                _ => {}
            },
            Screen::Results => match key.code {
                KeyCode::Char('r') | KeyCode::Enter => self.reset(None),
                KeyCode::Char('n') | KeyCode::Tab => {
                    self.reset(Some(self.engine.difficulty().next()))
                }
                KeyCode::Char('q') => return KeyOutcome::Quit,
                _ => {}
            },
        }
        KeyOutcome::Continue
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_path() {
        logging::init(&path)?;
    }

    let store = FileConfigStore::new();
    let cfg = cli.apply(store.load());
    let mut app = App::new(&cli, &cfg)?;
    info!(difficulty = %cfg.difficulty, language = %cfg.language, "starting");

    enable_raw_mode()?;
    let outcome = run_terminal(&mut app, &cfg);
    let restored = disable_raw_mode().and_then(|_| restore_terminal(&mut io::stdout()));

    let mut saved = store.load();
    saved.difficulty = app.engine.difficulty();
    if let Err(err) = store.save(&saved) {
        warn!(%err, "could not save config");
    }

    outcome?;
    restored?;
    Ok(())
}

/// Everything after raw mode is switched on, so a failure anywhere in here
/// still reaches the restore in `main`
fn run_terminal(app: &mut App, cfg: &Config) -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(cfg.tick_rate_ms)),
    );
    start_tui(&mut terminal, app, &mut runner)
}

fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, DisableFocusChange, LeaveAlternateScreen, Show)
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        if app.on_event(runner.step()) == KeyOutcome::Quit {
            info!("quitting");
            break;
        }
    }

    Ok(())
}
