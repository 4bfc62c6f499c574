use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::quiz::Quiz;
use crate::session::{EndReason, Phase};
use crate::starfield::Starfield;

const HORIZONTAL_MARGIN: u16 = 5;

pub fn draw(quiz: &Quiz, stars: &Starfield, f: &mut Frame) {
    render_stars(stars, f);

    match quiz.phase() {
        Phase::Idle => render_start(quiz, f),
        Phase::AwaitingJudgment | Phase::Revealing => render_word(quiz, f),
        Phase::Finished => render_summary(quiz, f),
    }
}

fn render_stars(stars: &Starfield, f: &mut Frame) {
    let area = f.area();
    let buf = f.buffer_mut();

    for star in stars.stars() {
        if star.x >= area.width || star.y >= area.height {
            continue;
        }
        let style = if stars.is_bright(star) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        };
        if let Some(cell) = buf.cell_mut((area.x + star.x, area.y + star.y)) {
            cell.set_char('·');
            cell.set_style(style);
        }
    }
}

fn render_start(quiz: &Quiz, f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Percentage(35),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new(Span::styled(
        quiz.bank.title.clone(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let subtitle = Paragraph::new(
        "Слово на екрані вже написане правильно чи його треба виправити?",
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(subtitle, chunks[3]);

    let rules = Paragraph::new(Span::styled(
        format!(
            "{} слів · {} життя · {} секунд",
            quiz.bank.len(),
            quiz.lives_total(),
            quiz.session_config.number_of_secs
        ),
        Style::default().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    f.render_widget(rules, chunks[4]);

    let hint = Paragraph::new(Span::styled(
        "Натисни Enter, щоб почати",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(hint, chunks[6]);
}

fn render_word(quiz: &Quiz, f: &mut Frame) {
    let area = f.area();

    let word = match quiz.current_word() {
        Ok(word) => word,
        Err(_) => return,
    };

    // During a reveal the judged form is on screen, not the initial one.
    let (displayed, word_style) = match quiz.last_judgment() {
        Some(judgment) if judgment.is_correct => (
            judgment.final_word.as_str(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Some(judgment) => (
            judgment.final_word.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        None => (
            word.initial.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    };

    let inner_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let explanation_lines =
        (word.explanation.width() as f64 / inner_width as f64).ceil() as u16 + 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(explanation_lines),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(area);

    render_status_row(quiz, f, chunks[0]);

    let word_widget = Paragraph::new(Span::styled(displayed.to_string(), word_style))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(word_widget, chunks[2]);

    match quiz.last_judgment() {
        None => {
            let hints = Paragraph::new(Span::styled(
                "← або 1: вже правильно        → або 2: виправити",
                Style::default()
                    .add_modifier(Modifier::DIM)
                    .add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center);
            f.render_widget(hints, chunks[4]);
        }
        Some(judgment) => {
            let verdict = if judgment.is_correct {
                Span::styled(
                    "Так!",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(
                    "Помилка",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )
            };
            f.render_widget(
                Paragraph::new(verdict).alignment(Alignment::Center),
                chunks[4],
            );

            let explanation = Paragraph::new(Span::styled(
                word.explanation.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            f.render_widget(explanation, chunks[5]);
        }
    }
}

fn render_status_row(quiz: &Quiz, f: &mut Frame, area: Rect) {
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ]
            .as_ref(),
        )
        .split(area);

    let hearts: Vec<Span> = (0..quiz.lives_total())
        .map(|i| {
            if i < quiz.lives_remaining() {
                Span::styled("❤ ", Style::default().fg(Color::Red))
            } else {
                Span::styled("♡ ", Style::default().add_modifier(Modifier::DIM))
            }
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(hearts)).alignment(Alignment::Left),
        row[0],
    );

    let position = Paragraph::new(Span::styled(
        format!("слово {} з {}", quiz.current_index() + 1, quiz.bank.len()),
        Style::default().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    f.render_widget(position, row[1]);

    let timer = Paragraph::new(Span::styled(
        format!("час: {}", quiz.seconds_remaining()),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right);
    f.render_widget(timer, row[2]);
}

fn render_summary(quiz: &Quiz, f: &mut Frame) {
    let area = f.area();

    let entry_lines = quiz.summary().len().max(1) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(entry_lines),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new(Span::styled(
        "Підсумок",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let reason = match quiz.end_reason() {
        Some(EndReason::AllWordsJudged) => "Усі слова пройдено!",
        Some(EndReason::LivesExhausted) => "Життя закінчилися",
        Some(EndReason::TimeExpired) => "Час вийшов",
        None => "",
    };
    f.render_widget(
        Paragraph::new(reason).alignment(Alignment::Center),
        chunks[1],
    );

    let stats = Paragraph::new(Span::styled(
        format!(
            "правильно: {} · помилок: {}",
            quiz.correct_count(),
            quiz.mistakes_made()
        ),
        Style::default().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    f.render_widget(stats, chunks[2]);

    let entries: Vec<Line> = quiz
        .summary()
        .iter()
        .map(|entry| {
            let changed = entry.initial != entry.final_word;
            let final_style = if changed {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            Line::from(vec![
                Span::raw(entry.initial.clone()),
                Span::raw(" → "),
                Span::styled(entry.final_word.clone(), final_style),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(entries).alignment(Alignment::Center),
        chunks[4],
    );

    let caption = Paragraph::new(Span::styled(
        "загальний поступ",
        Style::default().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    f.render_widget(caption, chunks[6]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(quiz.bank.series_ratio())
        .label(quiz.bank.series_label());
    f.render_widget(gauge, chunks[7]);

    let hint = Paragraph::new(Span::styled(
        "r: ще раз · Esc: вихід",
        Style::default()
            .add_modifier(Modifier::DIM)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(hint, chunks[9]);
}
