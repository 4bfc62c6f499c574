use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

use crate::session::GameError;

static WORDS_DIR: Dir = include_dir!("src/words");

/// One word under test: the form shown to the player, the form the current
/// orthography prescribes, and the explanation revealed after judging.
/// The two forms are equal when the word needs no fixing.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WordItem {
    pub initial: String,
    pub correct: String,
    pub explanation: String,
}

impl WordItem {
    pub fn needs_fixing(&self) -> bool {
        self.initial != self.correct
    }
}

/// An ordered, read-only set of words for one spelling rule, bundled with
/// the metadata the summary screen shows. `series_index`/`series_total`
/// locate this mini-game inside the larger series and are independent of
/// the number of words in the bank.
#[derive(Deserialize, Clone, Debug)]
pub struct WordBank {
    pub name: String,
    pub title: String,
    pub series_index: u32,
    pub series_total: u32,
    words: Vec<WordItem>,
}

impl WordBank {
    pub fn new(file_name: String) -> Self {
        Self::load(&file_name).expect("word bank not found or malformed")
    }

    pub fn load(name: &str) -> Result<Self, Box<dyn Error>> {
        let file = WORDS_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| format!("no embedded word bank named {name}"))?;

        let file_as_str = file
            .contents_utf8()
            .ok_or("unable to interpret word bank as a string")?;

        let bank: WordBank = from_str(file_as_str)?;

        if bank
            .words
            .iter()
            .any(|w| w.initial.is_empty() || w.correct.is_empty())
        {
            return Err(format!("bank {name} contains an empty word form").into());
        }

        Ok(bank)
    }

    /// Ad-hoc bank, mainly for tests and custom data.
    pub fn from_items(name: &str, words: Vec<WordItem>) -> Self {
        Self {
            name: name.to_string(),
            title: name.to_string(),
            series_index: 0,
            series_total: 0,
            words,
        }
    }

    pub fn get(&self, index: usize) -> Result<&WordItem, GameError> {
        self.words.get(index).ok_or(GameError::OutOfRange {
            index,
            len: self.words.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[WordItem] {
        &self.words
    }

    /// Same bank with the word order randomized.
    pub fn shuffled(mut self) -> Self {
        self.words.shuffle(&mut rand::thread_rng());
        self
    }

    /// Label for the cross-game progress display, e.g. "8 / 9".
    pub fn series_label(&self) -> String {
        format!("{} / {}", self.series_index, self.series_total)
    }

    /// Fraction of the series this mini-game sits at, clamped to [0, 1].
    pub fn series_ratio(&self) -> f64 {
        if self.series_total == 0 {
            return 0.0;
        }
        (self.series_index as f64 / self.series_total as f64).clamp(0.0, 1.0)
    }
}
