pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod judgment;
pub mod lives;
pub mod quiz;
pub mod runtime;
pub mod session;
pub mod starfield;
pub mod ui;
pub mod word_bank;

use crate::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    judgment::Choice,
    quiz::Quiz,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    session::{Phase, SessionConfig},
    starfield::Starfield,
    word_bank::WordBank,
};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

const TICK_RATE_MS: u64 = 100;
const TICKS_PER_SECOND: u64 = 1000 / TICK_RATE_MS;

/// terminal spelling quiz for the new ukrainian orthography
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal quiz for the 2019 Ukrainian orthography. Decide whether each word is already spelled correctly or needs fixing, before the countdown or your lives run out."
)]
pub struct Cli {
    /// word bank to play
    #[clap(short = 'r', long, value_enum)]
    rule_set: Option<SupportedRuleSet>,

    /// seconds on the session countdown
    #[clap(short = 's', long)]
    number_of_secs: Option<u32>,

    /// allowed mistakes before the session ends
    #[clap(short = 'l', long)]
    number_of_lives: Option<u32>,

    /// randomize word order within the bank
    #[clap(long)]
    shuffle: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum SupportedRuleSet {
    Ye,
    Apostrophe,
}

impl SupportedRuleSet {
    fn as_bank(&self) -> WordBank {
        WordBank::new(self.to_string().to_lowercase())
    }
}

/// CLI flags override the stored config; the merged result is what runs
/// and what gets remembered for the next launch.
fn effective_settings(cli: &Cli, stored: &Config) -> Config {
    Config {
        rule_set: cli
            .rule_set
            .map(|r| r.to_string().to_lowercase())
            .unwrap_or_else(|| stored.rule_set.clone()),
        number_of_secs: cli.number_of_secs.unwrap_or(stored.number_of_secs),
        number_of_lives: cli.number_of_lives.unwrap_or(stored.number_of_lives),
    }
}

#[derive(Debug)]
pub struct App {
    pub cli: Option<Cli>,
    pub quiz: Quiz,
    pub stars: Starfield,
    tick_in_second: u64,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        let store = FileConfigStore::new();
        let settings = effective_settings(&cli, &store.load());
        let _ = store.save(&settings);

        let mut bank = WordBank::load(&settings.rule_set)
            .unwrap_or_else(|_| SupportedRuleSet::Ye.as_bank());
        if cli.shuffle {
            bank = bank.shuffled();
        }

        let session_config = SessionConfig {
            number_of_secs: settings.number_of_secs,
            number_of_lives: settings.number_of_lives,
            ..SessionConfig::default()
        };

        let mut quiz = Quiz::new(bank, session_config);
        if let Some(path) = AppDirs::log_path() {
            quiz = quiz.with_results_log(path);
        }

        Self {
            cli: Some(cli),
            quiz,
            stars: Starfield::new(),
            tick_in_second: 0,
        }
    }

    /// Starts a fresh session and re-aligns the tick divider so the first
    /// second of the new countdown is a full one.
    pub fn start_session(&mut self) {
        self.quiz.start();
        self.tick_in_second = 0;
    }

    /// Folds a runtime tick into the animation and, every full second,
    /// into the session countdown.
    pub fn on_runtime_tick(&mut self) {
        self.stars.update();
        self.tick_in_second += 1;
        if self.tick_in_second >= TICKS_PER_SECOND {
            self.tick_in_second = 0;
            self.quiz.on_tick();
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli);
    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::from_millis(TICK_RATE_MS),
    );

    let size = terminal.size()?;
    app.stars.resize(size.width, size.height);
    terminal.draw(|f| ui::draw(&app.quiz, &app.stars, f))?;

    loop {
        match runner.step() {
            GameEvent::Tick => {
                app.on_runtime_tick();
                terminal.draw(|f| ui::draw(&app.quiz, &app.stars, f))?;
            }
            GameEvent::Resize => {
                let size = terminal.size()?;
                app.stars.resize(size.width, size.height);
                terminal.draw(|f| ui::draw(&app.quiz, &app.stars, f))?;
            }
            GameEvent::Key(key) => {
                if key.code == KeyCode::Esc
                    || (key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL))
                {
                    break;
                }

                match app.quiz.phase() {
                    Phase::Idle => {
                        if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                            app.start_session();
                        }
                    }
                    Phase::AwaitingJudgment => match key.code {
                        KeyCode::Left | KeyCode::Char('1') => {
                            let _ = app.quiz.submit(Choice::AssertCorrect);
                        }
                        KeyCode::Right | KeyCode::Char('2') => {
                            let _ = app.quiz.submit(Choice::RequestFix);
                        }
                        _ => {}
                    },
                    // Judgment keys are ignored while the explanation is up.
                    Phase::Revealing => {}
                    Phase::Finished => {
                        if key.code == KeyCode::Char('r') {
                            app.start_session();
                        }
                    }
                }
                terminal.draw(|f| ui::draw(&app.quiz, &app.stars, f))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["pravka"]);

        assert!(cli.rule_set.is_none());
        assert_eq!(cli.number_of_secs, None);
        assert_eq!(cli.number_of_lives, None);
        assert!(!cli.shuffle);
    }

    #[test]
    fn test_cli_number_of_secs() {
        let cli = Cli::parse_from(["pravka", "-s", "60"]);
        assert_eq!(cli.number_of_secs, Some(60));

        let cli = Cli::parse_from(["pravka", "--number-of-secs", "45"]);
        assert_eq!(cli.number_of_secs, Some(45));
    }

    #[test]
    fn test_cli_number_of_lives() {
        let cli = Cli::parse_from(["pravka", "-l", "3"]);
        assert_eq!(cli.number_of_lives, Some(3));
    }

    #[test]
    fn test_cli_rule_set() {
        let cli = Cli::parse_from(["pravka", "-r", "ye"]);
        assert!(matches!(cli.rule_set, Some(SupportedRuleSet::Ye)));

        let cli = Cli::parse_from(["pravka", "--rule-set", "apostrophe"]);
        assert!(matches!(cli.rule_set, Some(SupportedRuleSet::Apostrophe)));
    }

    #[test]
    fn test_supported_rule_set_as_bank() {
        let bank = SupportedRuleSet::Ye.as_bank();
        assert_eq!(bank.name, "ye");

        let bank = SupportedRuleSet::Apostrophe.as_bank();
        assert_eq!(bank.name, "apostrophe");
    }

    #[test]
    fn test_effective_settings_prefers_cli_flags() {
        let cli = Cli::parse_from(["pravka", "-s", "45", "-r", "apostrophe"]);
        let stored = Config {
            rule_set: "ye".into(),
            number_of_secs: 30,
            number_of_lives: 2,
        };

        let merged = effective_settings(&cli, &stored);

        assert_eq!(merged.rule_set, "apostrophe");
        assert_eq!(merged.number_of_secs, 45);
        assert_eq!(merged.number_of_lives, 2);
    }

    #[test]
    fn test_effective_settings_falls_back_to_stored() {
        let cli = Cli::parse_from(["pravka"]);
        let stored = Config {
            rule_set: "apostrophe".into(),
            number_of_secs: 20,
            number_of_lives: 1,
        };

        let merged = effective_settings(&cli, &stored);

        assert_eq!(merged, stored);
    }

    #[test]
    fn test_tick_rate_divides_evenly_into_seconds() {
        assert_eq!(TICKS_PER_SECOND * TICK_RATE_MS, 1000);

        const _: () = assert!(TICK_RATE_MS > 0);
        const _: () = assert!(TICK_RATE_MS <= 1000);
    }
}
