use chrono::Local;
use std::error::Error;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::clock::SessionClock;
use crate::judgment::{judge, Choice, Judgment};
use crate::lives::LivesTracker;
use crate::session::{EndReason, GameError, Phase, SessionConfig, SummaryEntry};
use crate::word_bank::{WordBank, WordItem};

/// One play-through of a word bank, from the start screen to the summary.
///
/// Owns every piece of mutable session state; the event loop only feeds it
/// player intents and time units. All countdown state is rebuilt by
/// `start()`, so restarting can never leave a stale timer running.
#[derive(Debug)]
pub struct Quiz {
    pub bank: WordBank,
    pub session_config: SessionConfig,
    phase: Phase,
    index: usize,
    clock: SessionClock,
    lives: LivesTracker,
    reveal_ticks_left: u32,
    summary: Vec<SummaryEntry>,
    last_judgment: Option<Judgment>,
    end_reason: Option<EndReason>,
    mistakes: u32,
    log_path: Option<PathBuf>,
}

impl Quiz {
    pub fn new(bank: WordBank, session_config: SessionConfig) -> Self {
        let clock = SessionClock::new(session_config.number_of_secs);
        let lives = LivesTracker::new(session_config.number_of_lives);
        Self {
            bank,
            session_config,
            phase: Phase::Idle,
            index: 0,
            clock,
            lives,
            reveal_ticks_left: 0,
            summary: Vec::new(),
            last_judgment: None,
            end_reason: None,
            mistakes: 0,
            log_path: None,
        }
    }

    /// Points the results log at `path`. Without this the quiz logs
    /// nothing; the binary wires in the state-dir location.
    pub fn with_results_log<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.log_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Begins a fresh session, whether called from the start screen, the
    /// summary screen, or mid-session. Every counter is rebuilt; nothing
    /// from a previous run survives.
    pub fn start(&mut self) {
        self.phase = Phase::AwaitingJudgment;
        self.index = 0;
        self.summary.clear();
        self.last_judgment = None;
        self.end_reason = None;
        self.reveal_ticks_left = 0;
        self.mistakes = 0;
        self.lives.reset();
        self.clock.start();

        if self.bank.is_empty() {
            self.finish(EndReason::AllWordsJudged);
        }
    }

    /// Applies the player's claim to the current word. Valid only while a
    /// judgment is awaited; anything else is an integration error.
    pub fn submit(&mut self, choice: Choice) -> Result<Judgment, GameError> {
        if self.phase != Phase::AwaitingJudgment {
            return Err(GameError::InvalidTransition { phase: self.phase });
        }

        let word = self.bank.get(self.index)?.clone();
        let judgment = judge(&word, choice);

        if !judgment.is_correct {
            self.mistakes += 1;
            self.lives.consume();
        }

        self.summary.push(SummaryEntry {
            initial: word.initial,
            final_word: judgment.final_word.clone(),
        });
        self.last_judgment = Some(judgment.clone());
        self.reveal_ticks_left = self.session_config.reveal_secs;
        self.phase = Phase::Revealing;

        if self.reveal_ticks_left == 0 {
            self.advance();
        }

        Ok(judgment)
    }

    /// Consumes one time unit. While a judgment is awaited an expiring clock
    /// ends the session on the spot; during a reveal the clock keeps
    /// counting but termination is only checked once the reveal elapses.
    pub fn on_tick(&mut self) {
        match self.phase {
            Phase::AwaitingJudgment => {
                self.clock.tick();
                if self.clock.is_expired() {
                    self.finish(EndReason::TimeExpired);
                }
            }
            Phase::Revealing => {
                self.clock.tick();
                self.reveal_ticks_left = self.reveal_ticks_left.saturating_sub(1);
                if self.reveal_ticks_left == 0 {
                    self.advance();
                }
            }
            Phase::Idle | Phase::Finished => {}
        }
    }

    /// The checkpoint after a reveal: move on, then decide whether any
    /// terminal condition fired while the explanation was on screen.
    fn advance(&mut self) {
        self.index += 1;
        self.last_judgment = None;

        if self.lives.is_exhausted() {
            self.finish(EndReason::LivesExhausted);
        } else if self.clock.is_expired() {
            self.finish(EndReason::TimeExpired);
        } else if self.index >= self.bank.len() {
            self.finish(EndReason::AllWordsJudged);
        } else {
            self.phase = Phase::AwaitingJudgment;
        }
    }

    fn finish(&mut self, reason: EndReason) {
        if self.phase == Phase::Finished {
            return;
        }
        self.clock.stop();
        self.phase = Phase::Finished;
        self.end_reason = Some(reason);
        let _ = self.save_results();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::AwaitingJudgment | Phase::Revealing)
    }

    pub fn has_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_word(&self) -> Result<&WordItem, GameError> {
        self.bank.get(self.index)
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn lives_remaining(&self) -> u32 {
        self.lives.remaining()
    }

    pub fn lives_total(&self) -> u32 {
        self.lives.total()
    }

    pub fn summary(&self) -> &[SummaryEntry] {
        &self.summary
    }

    pub fn last_judgment(&self) -> Option<&Judgment> {
        self.last_judgment.as_ref()
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn mistakes_made(&self) -> u32 {
        self.mistakes
    }

    pub fn correct_count(&self) -> u32 {
        self.summary.len() as u32 - self.mistakes
    }

    /// Appends one line for this session to the results log. Best effort;
    /// the game never fails over a log line.
    pub fn save_results(&self) -> Result<(), Box<dyn Error>> {
        if let Some(log_path) = &self.log_path {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let needs_header = !log_path.exists();

            let log_file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(log_path)?;

            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(log_file);

            if needs_header {
                writer.write_record([
                    "date",
                    "rule_set",
                    "words_judged",
                    "correct",
                    "mistakes",
                    "seconds_left",
                    "outcome",
                ])?;
            }

            writer.write_record([
                Local::now().format("%c").to_string(),
                self.bank.name.clone(),
                self.summary.len().to_string(),
                self.correct_count().to_string(),
                self.mistakes_made().to_string(),
                self.clock.remaining().to_string(),
                self.end_reason
                    .map(|r| r.as_str())
                    .unwrap_or("unknown")
                    .to_string(),
            ])?;

            writer.flush()?;
        }

        Ok(())
    }
}
