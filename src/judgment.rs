use crate::word_bank::WordItem;

/// The player's binary claim about the displayed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// "The word is already spelled correctly."
    AssertCorrect,
    /// "The word needs fixing."
    RequestFix,
}

/// Outcome of judging one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgment {
    pub is_correct: bool,
    /// The form displayed after the judgment. On a wrong judgment this is
    /// always the word's correct form, so the player sees the right answer
    /// no matter which wrong choice they made.
    pub final_word: String,
}

/// Total over its domain: every (word, choice) pair has a verdict.
pub fn judge(word: &WordItem, choice: Choice) -> Judgment {
    match choice {
        Choice::AssertCorrect => {
            if word.initial == word.correct {
                Judgment {
                    is_correct: true,
                    final_word: word.initial.clone(),
                }
            } else {
                Judgment {
                    is_correct: false,
                    final_word: word.correct.clone(),
                }
            }
        }
        Choice::RequestFix => Judgment {
            is_correct: word.initial != word.correct,
            final_word: word.correct.clone(),
        },
    }
}
