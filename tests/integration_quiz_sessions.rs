use assert_matches::assert_matches;

use pravka::judgment::Choice;
use pravka::quiz::Quiz;
use pravka::session::{EndReason, GameError, Phase, SessionConfig, SummaryEntry};
use pravka::word_bank::{WordBank, WordItem};

// End-to-end session scenarios against the public library surface,
// covering every way a session can terminate and the restart guarantees.

fn item(initial: &str, correct: &str) -> WordItem {
    WordItem {
        initial: initial.to_string(),
        correct: correct.to_string(),
        explanation: format!("пояснення для {correct}"),
    }
}

fn ye_like_bank() -> WordBank {
    WordBank::from_items(
        "test",
        vec![
            item("проект", "проєкт"),
            item("проєкт", "проєкт"),
            item("проекція", "проєкція"),
            item("проєкція", "проєкція"),
            item("об’ект", "об’єкт"),
            item("ін’єкція", "ін’єкція"),
        ],
    )
}

/// Plays the reveal out and lands on the next checkpoint.
fn pass_reveal(quiz: &mut Quiz) {
    assert_matches!(quiz.phase(), Phase::Revealing);
    quiz.on_tick();
    quiz.on_tick();
}

#[test]
fn perfect_run_judges_every_word() {
    let mut quiz = Quiz::new(ye_like_bank(), SessionConfig::default());
    quiz.start();

    let choices = [
        Choice::RequestFix,
        Choice::AssertCorrect,
        Choice::RequestFix,
        Choice::AssertCorrect,
        Choice::RequestFix,
        Choice::AssertCorrect,
    ];
    for choice in choices {
        let judgment = quiz.submit(choice).unwrap();
        assert!(judgment.is_correct);
        pass_reveal(&mut quiz);
    }

    assert!(quiz.has_finished());
    assert_eq!(quiz.end_reason(), Some(EndReason::AllWordsJudged));
    assert_eq!(quiz.summary().len(), 6);
    assert_eq!(quiz.lives_remaining(), 2);
    assert_eq!(quiz.correct_count(), 6);

    // Every summary line carries the orthographically correct final form.
    let finals: Vec<&str> = quiz
        .summary()
        .iter()
        .map(|e| e.final_word.as_str())
        .collect();
    assert_eq!(
        finals,
        ["проєкт", "проєкт", "проєкція", "проєкція", "об’єкт", "ін’єкція"]
    );
}

#[test]
fn two_mistakes_end_the_session_early() {
    let mut quiz = Quiz::new(ye_like_bank(), SessionConfig::default());
    quiz.start();

    // Word 1 needs fixing; claiming it is fine costs a life.
    quiz.submit(Choice::AssertCorrect).unwrap();
    assert_eq!(quiz.lives_remaining(), 1);
    pass_reveal(&mut quiz);
    assert_matches!(quiz.phase(), Phase::AwaitingJudgment);

    // Word 2 is fine; asking to fix it costs the second life.
    quiz.submit(Choice::RequestFix).unwrap();
    assert_eq!(quiz.lives_remaining(), 0);
    pass_reveal(&mut quiz);

    assert!(quiz.has_finished());
    assert_eq!(quiz.end_reason(), Some(EndReason::LivesExhausted));
    assert_eq!(quiz.summary().len(), 2);
    assert!(quiz.summary().len() < quiz.bank.len());

    // Both wrong judgments still recorded the corrected form.
    assert_eq!(
        quiz.summary(),
        &[
            SummaryEntry {
                initial: "проект".to_string(),
                final_word: "проєкт".to_string(),
            },
            SummaryEntry {
                initial: "проєкт".to_string(),
                final_word: "проєкт".to_string(),
            },
        ]
    );
}

#[test]
fn countdown_expiry_while_awaiting_the_first_word() {
    let mut quiz = Quiz::new(ye_like_bank(), SessionConfig::default());
    quiz.start();

    for expected in (0..30).rev() {
        quiz.on_tick();
        assert_eq!(quiz.seconds_remaining(), expected);
    }

    assert!(quiz.has_finished());
    assert_eq!(quiz.end_reason(), Some(EndReason::TimeExpired));
    assert!(quiz.summary().is_empty());
}

#[test]
fn expiry_mid_reveal_finishes_at_the_checkpoint_with_the_word_recorded() {
    let mut quiz = Quiz::new(
        ye_like_bank(),
        SessionConfig {
            number_of_secs: 1,
            ..SessionConfig::default()
        },
    );
    quiz.start();

    quiz.submit(Choice::RequestFix).unwrap();

    // First reveal tick drains the clock; the reveal still runs to its end.
    quiz.on_tick();
    assert_eq!(quiz.seconds_remaining(), 0);
    assert_matches!(quiz.phase(), Phase::Revealing);

    quiz.on_tick();
    assert!(quiz.has_finished());
    assert_eq!(quiz.end_reason(), Some(EndReason::TimeExpired));
    assert_eq!(quiz.summary().len(), 1);
}

#[test]
fn restart_mid_session_shows_no_double_ticking() {
    let mut quiz = Quiz::new(ye_like_bank(), SessionConfig::default());
    quiz.start();
    quiz.submit(Choice::RequestFix).unwrap();
    for _ in 0..7 {
        quiz.on_tick();
    }

    quiz.start();
    assert_eq!(quiz.seconds_remaining(), 30);
    assert_eq!(quiz.current_index(), 0);
    assert!(quiz.summary().is_empty());

    // A stale countdown from the first run would decrement twice per unit.
    for expected in [29, 28, 27] {
        quiz.on_tick();
        assert_eq!(quiz.seconds_remaining(), expected);
    }
}

#[test]
fn replay_after_finish_starts_from_a_clean_slate() {
    let mut quiz = Quiz::new(ye_like_bank(), SessionConfig::default());
    quiz.start();
    quiz.submit(Choice::AssertCorrect).unwrap();
    pass_reveal(&mut quiz);
    quiz.submit(Choice::RequestFix).unwrap();
    pass_reveal(&mut quiz);
    assert!(quiz.has_finished());

    quiz.start();

    assert_matches!(quiz.phase(), Phase::AwaitingJudgment);
    assert_eq!(quiz.current_word().unwrap().initial, "проект");
    assert_eq!(quiz.lives_remaining(), 2);
    assert_eq!(quiz.seconds_remaining(), 30);
    assert!(quiz.summary().is_empty());
    assert!(quiz.end_reason().is_none());
}

#[test]
fn judgments_are_rejected_outside_their_window() {
    let mut quiz = Quiz::new(ye_like_bank(), SessionConfig::default());

    assert_matches!(
        quiz.submit(Choice::AssertCorrect),
        Err(GameError::InvalidTransition { phase: Phase::Idle })
    );

    quiz.start();
    quiz.submit(Choice::RequestFix).unwrap();
    assert_matches!(
        quiz.submit(Choice::AssertCorrect),
        Err(GameError::InvalidTransition {
            phase: Phase::Revealing
        })
    );

    // The rejected intents changed nothing.
    assert_eq!(quiz.summary().len(), 1);
    assert_eq!(quiz.lives_remaining(), 2);
}

#[test]
fn embedded_banks_play_end_to_end() {
    for name in ["ye", "apostrophe"] {
        let bank = WordBank::new(name.to_string());
        let answers: Vec<Choice> = bank
            .words()
            .iter()
            .map(|w| {
                if w.needs_fixing() {
                    Choice::RequestFix
                } else {
                    Choice::AssertCorrect
                }
            })
            .collect();

        let mut quiz = Quiz::new(bank, SessionConfig::default());
        quiz.start();
        for choice in answers {
            let judgment = quiz.submit(choice).unwrap();
            assert!(judgment.is_correct);
            pass_reveal(&mut quiz);
        }

        assert!(quiz.has_finished());
        assert_eq!(quiz.end_reason(), Some(EndReason::AllWordsJudged));
        assert_eq!(quiz.mistakes_made(), 0);
    }
}
