use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use romatype::{
    app::{Action, App},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    question_set::QuestionSet,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    trace_init, InputMode, QuestionSetError, Settings,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// typing practice with romaji-to-hiragana input
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Typing practice in the terminal. Japanese questions are typed as romaji and checked mora by mora against their hiragana reading; latin text is checked character by character."
)]
pub struct Cli {
    /// how keystrokes are checked (defaults to the pack's own mode)
    #[clap(short = 'm', long, value_enum)]
    mode: Option<InputMode>,

    /// built-in question pack
    #[clap(short = 'k', long, conflicts_with_all = ["file", "prompt"])]
    pack: Option<String>,

    /// JSON question file
    #[clap(short = 'f', long, conflicts_with = "prompt")]
    file: Option<PathBuf>,

    /// type a single custom prompt
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// shuffle the questions
    #[clap(long, conflicts_with = "in_order")]
    shuffle: bool,

    /// keep the questions in file order
    #[clap(long)]
    in_order: bool,

    /// pass over whitespace without typing it
    #[clap(long, conflicts_with = "no_skip_whitespace")]
    skip_whitespace: bool,

    /// type whitespace again
    #[clap(long)]
    no_skip_whitespace: bool,

    /// pass over punctuation and symbols without typing them
    #[clap(long, conflicts_with = "no_skip_symbols")]
    skip_symbols: bool,

    /// type punctuation and symbols again
    #[clap(long)]
    no_skip_symbols: bool,

    /// accept either case in direct mode
    #[clap(long, conflicts_with = "match_case")]
    ignore_case: bool,

    /// require the exact case in direct mode
    #[clap(long)]
    match_case: bool,

    /// ignore the saved defaults
    #[clap(long)]
    fresh: bool,

    /// list the built-in packs and exit
    #[clap(long)]
    list_packs: bool,
}

impl Cli {
    /// Saved defaults with this invocation's flags applied on top.
    fn merge(&self, saved: Config) -> Config {
        let base = if self.fresh { Config::default() } else { saved };

        Config {
            mode: self.mode.or(base.mode),
            pack: self.pack.clone().unwrap_or(base.pack),
            shuffle: (self.shuffle || base.shuffle) && !self.in_order,
            settings: Settings::new(
                toggle(
                    self.skip_whitespace,
                    self.no_skip_whitespace,
                    base.settings.skip_whitespace,
                ),
                toggle(
                    self.skip_symbols,
                    self.no_skip_symbols,
                    base.settings.skip_symbols,
                ),
                toggle(
                    self.match_case,
                    self.ignore_case,
                    base.settings.case_sensitive,
                ),
            ),
        }
    }

    fn question_set(&self, config: &Config) -> Result<QuestionSet, QuestionSetError> {
        if let Some(prompt) = &self.prompt {
            return Ok(QuestionSet::single(prompt.clone()));
        }
        if let Some(path) = &self.file {
            return QuestionSet::from_path(path);
        }
        QuestionSet::builtin(&config.pack)
    }
}

/// A saved flag with its on/off switches applied.
fn toggle(on: bool, off: bool, saved: bool) -> bool {
    (saved || on) && !off
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list_packs {
        for name in QuestionSet::builtin_names() {
            println!("{name}");
        }
        return Ok(());
    }

    trace_init::init_tracing(&AppDirs::log_dir());

    let store = FileConfigStore::new();
    let config = cli.merge(store.load());
    let set = match cli.question_set(&config) {
        Ok(set) => set,
        Err(err) => Cli::command().error(ErrorKind::InvalidValue, err).exit(),
    };
    let mode = config.mode.unwrap_or_else(|| set.preferred_mode());

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Err(err) = store.save(&config) {
        tracing::debug!(path = %store.path().display(), %err, "could not save config");
    }

    let mut app = App::new(mode, config.settings, set, config.shuffle)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let action = match runner.step() {
            AppEvent::Tick => {
                // only a fading miss highlight changes between keystrokes
                let flashing = app.feedback().miss_flash > 0;
                app.on_tick();
                if !flashing {
                    continue;
                }
                Action::Continue
            }
            AppEvent::Resize => Action::Continue,
            AppEvent::Key(key) => app.handle_key(key),
        };

        match action {
            Action::Continue => {}
            Action::Restart => app.restart()?,
            Action::New => app.new_round()?,
            Action::Quit => break,
        }

        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}
