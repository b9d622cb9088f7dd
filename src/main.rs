use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use deepfocus::{
    app::{TimerApp, TypingApp},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    prompts::{Catalog, Category, Language, PromptRotator},
    reward::{FileRewardStore, RewardLedger},
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    typing::TypingSession,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    widgets::Widget,
    Terminal,
};
use rand::Rng;
use std::{
    error::Error,
    io::{self, stdin},
    time::Instant,
};
use tracing::{info, warn};

/// deep-dive focus timer and bilingual typing practice
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A focus countdown that sinks you into the deep sea and rewards every finished session with a marine creature, plus a Korean/English typing practice mode."
)]
pub struct Cli {
    /// log verbosity for the log file (error, warn, info, debug, trace, off)
    #[clap(long, global = true)]
    log_level: Option<String>,

    #[clap(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Mode {
    /// focus countdown with a reward collection (default)
    Timer {
        /// hours to preselect
        #[clap(short = 'H', long, value_parser = clap::value_parser!(u32).range(0..100))]
        hours: Option<u32>,

        /// minutes to preselect
        #[clap(short = 'M', long, value_parser = clap::value_parser!(u32).range(0..60))]
        minutes: Option<u32>,

        /// seconds to preselect
        #[clap(short = 'S', long, value_parser = clap::value_parser!(u32).range(0..60))]
        seconds: Option<u32>,

        /// interface language
        #[clap(short = 'l', long, value_enum)]
        language: Option<Language>,
    },
    /// typing practice
    Type {
        /// prompt language
        #[clap(short = 'l', long, value_enum)]
        language: Option<Language>,

        /// practice level
        #[clap(short = 'c', long, value_enum)]
        category: Option<Category>,
    },
}

impl Cli {
    fn mode(&self) -> Mode {
        self.mode.clone().unwrap_or(Mode::Timer {
            hours: None,
            minutes: None,
            seconds: None,
            language: None,
        })
    }

    /// Flags given on the command line win over the saved preferences.
    fn apply_to(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        match self.mode() {
            Mode::Timer {
                hours,
                minutes,
                seconds,
                language,
            } => {
                if let Some(h) = hours {
                    config.hours = h;
                }
                if let Some(m) = minutes {
                    config.minutes = m;
                }
                if let Some(s) = seconds {
                    config.seconds = s;
                }
                if let Some(language) = language {
                    config.timer_language = language;
                }
            }
            Mode::Type { language, category } => {
                if let Some(language) = language {
                    config.typing_language = language;
                }
                if let Some(category) = category {
                    config.typing_category = category;
                }
            }
        }
    }
}

/// What the event loop needs from either screen.
trait Screen {
    fn key(&mut self, key: KeyEvent, now: Instant);
    fn tick(&mut self, now: Instant);
    fn resize(&mut self, _width: u16, _height: u16) {}
    fn should_quit(&self) -> bool;
}

impl Screen for TimerApp<FileRewardStore> {
    fn key(&mut self, key: KeyEvent, now: Instant) {
        self.on_key(key, now);
    }

    fn tick(&mut self, now: Instant) {
        self.on_tick(now);
    }

    fn resize(&mut self, width: u16, height: u16) {
        TimerApp::resize(self, width, height);
    }

    fn should_quit(&self) -> bool {
        TimerApp::should_quit(self)
    }
}

impl<R: Rng> Screen for TypingApp<R> {
    fn key(&mut self, key: KeyEvent, now: Instant) {
        self.on_key(key, now);
    }

    fn tick(&mut self, now: Instant) {
        self.on_tick(now);
    }

    fn should_quit(&self) -> bool {
        TypingApp::should_quit(self)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();
    cli.apply_to(&mut config);

    if let Some(log_path) = AppDirs::log_path() {
        if let Err(err) = logging::init_logging(&config.log_level, &log_path) {
            eprintln!("deepfocus: continuing without logs: {err}");
        }
    }

    let mode = cli.mode();
    info!(?mode, "starting");

    // before the terminal is taken over, so failures print normally
    let catalog = match mode {
        Mode::Type { .. } => Some(Catalog::builtin()?),
        Mode::Timer { .. } => None,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    or_restore(execute!(stdout, EnterAlternateScreen), restore_terminal)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = or_restore(Terminal::new(backend), restore_terminal)?;
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    let result = match catalog {
        None => {
            let ledger = RewardLedger::load(FileRewardStore::new());
            let mut app = TimerApp::new(ledger, config.timer_language).with_duration(
                config.hours,
                config.minutes,
                config.seconds,
            );
            let result = run(&mut terminal, &runner, &mut app);
            (config.hours, config.minutes, config.seconds) = app.duration();
            result
        }
        Some(catalog) => {
            let session = TypingSession::new(
                PromptRotator::new(catalog),
                config.typing_language,
                config.typing_category,
            );
            let mut app = TypingApp::new(session);
            let result = run(&mut terminal, &runner, &mut app);
            config.typing_language = app.language();
            config.typing_category = app.category();
            result
        }
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = config_store.save(&config) {
        warn!(%err, "could not save preferences");
    }
    info!("exiting");

    result
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

/// Runs `restore` before handing back a setup error.
fn or_restore<T, E>(
    result: Result<T, E>,
    restore: impl FnOnce() -> io::Result<()>,
) -> Result<T, Box<dyn Error>>
where
    E: Into<Box<dyn Error>>,
{
    result.map_err(|err| {
        if let Err(restore_err) = restore() {
            warn!(%restore_err, "could not restore terminal");
        }
        err.into()
    })
}

fn run<B, E, T, A>(
    terminal: &mut Terminal<B>,
    runner: &Runner<E, T>,
    app: &mut A,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    E: EventSource,
    T: Ticker,
    A: Screen,
    for<'a> &'a A: Widget,
{
    let size = terminal.size()?;
    app.resize(size.width, size.height);
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            AppEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                app.key(key, Instant::now());
            }
            AppEvent::Resize => {
                let size = terminal.size()?;
                app.resize(size.width, size.height);
            }
            AppEvent::Tick => app.tick(Instant::now()),
        }

        if app.should_quit() {
            break;
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}
