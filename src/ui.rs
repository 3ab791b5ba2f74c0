pub mod format;

use itertools::{EitherOrBoth, Itertools};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::preferences::WORD_COUNT_OPTIONS;
use crate::session::{SessionPhase, Snapshot};
use crate::ui::format::{format_accuracy, format_wpm};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Terminal rendering of a session snapshot
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub snapshot: Snapshot<'a>,
    /// Configured word count, highlighted in the options bar
    pub word_count: usize,
}

impl<'a> SessionView<'a> {
    pub fn new(snapshot: Snapshot<'a>, word_count: usize) -> Self {
        Self {
            snapshot,
            word_count,
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn options_bar(word_count: usize) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, count) in WORD_COUNT_OPTIONS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let label = format!(" {count} words ");
        if *count == word_count {
            spans.push(Span::styled(label, bold().add_modifier(Modifier::REVERSED)));
        } else {
            spans.push(Span::styled(label, Style::default().add_modifier(Modifier::DIM)));
        }
    }
    Line::from(spans)
}

/// Spans for the word being typed: matches in green, mismatches in red,
/// cursor underlined, over-typed characters appended in red
fn current_word_spans(word: &str, typed: &str) -> Vec<Span<'static>> {
    let correct = bold().fg(Color::Green);
    let wrong = bold().fg(Color::Red);
    let pending = bold().bg(Color::DarkGray);
    let typed_len = typed.chars().count();

    word.chars()
        .zip_longest(typed.chars())
        .enumerate()
        .map(|(idx, pair)| match pair {
            EitherOrBoth::Both(expected, got) if expected == got => {
                Span::styled(expected.to_string(), correct)
            }
            EitherOrBoth::Both(expected, _) => Span::styled(expected.to_string(), wrong),
            EitherOrBoth::Left(expected) if idx == typed_len => Span::styled(
                expected.to_string(),
                pending.add_modifier(Modifier::UNDERLINED),
            ),
            EitherOrBoth::Left(expected) => Span::styled(expected.to_string(), pending),
            EitherOrBoth::Right(extra) => Span::styled(
                extra.to_string(),
                wrong.add_modifier(Modifier::CROSSED_OUT),
            ),
        })
        .collect()
}

fn words_line<'a>(snapshot: &Snapshot<'a>) -> Line<'a> {
    let done = Style::default().add_modifier(Modifier::DIM);
    let upcoming = bold();

    let mut spans = Vec::new();
    for (idx, word) in snapshot.words.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        if idx < snapshot.current_word_index {
            spans.push(Span::styled(word.as_str(), done));
        } else if idx == snapshot.current_word_index {
            spans.extend(current_word_spans(word, snapshot.typed_buffer));
        } else {
            spans.push(Span::styled(word.as_str(), upcoming));
        }
    }
    Line::from(spans)
}

fn render_typing(view: &SessionView<'_>, area: Rect, buf: &mut Buffer) {
    let snapshot = &view.snapshot;
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_width = snapshot.words.join(" ").width();
    let prompt_lines = (prompt_width as f64 / max_chars_per_line as f64).ceil().max(1.0) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // options bar
            Constraint::Length(1), // padding
            Constraint::Length(1), // accuracy gauge
            Constraint::Min(1),    // padding
            Constraint::Length(prompt_lines + 1),
            Constraint::Length(1), // current input
            Constraint::Min(1),    // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(options_bar(view.word_count))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let accuracy = snapshot.running_accuracy.clamp(0.0, 100.0);
    Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(accuracy / 100.0)
        .label(format!("{} acc", format_accuracy(snapshot.running_accuracy)))
        .render(chunks[2], buf);

    Paragraph::new(words_line(snapshot))
        .alignment(if prompt_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[4], buf);

    Paragraph::new(Span::styled(
        format!("Current input: {}", snapshot.typed_buffer),
        Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
    ))
    .render(chunks[5], buf);

    let legend = if snapshot.phase == SessionPhase::NotStarted {
        "start typing / (←→) words / (tab) restart / (esc)ape"
    } else {
        "(tab) restart / (esc)ape"
    };
    Paragraph::new(Span::styled(
        legend,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[7], buf);
}

fn render_results(view: &SessionView<'_>, area: Rect, buf: &mut Buffer) {
    let snapshot = &view.snapshot;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // title
            Constraint::Length(1), // padding
            Constraint::Length(1), // wpm
            Constraint::Length(1), // accuracy
            Constraint::Min(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        "Test Results",
        bold().fg(Color::Magenta),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Line::from(vec![
        Span::raw("Words per minute: "),
        Span::styled(format_wpm(snapshot.wpm), bold()),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    Paragraph::new(Line::from(vec![
        Span::raw("Accuracy: "),
        Span::styled(format_accuracy(snapshot.running_accuracy), bold()),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);

    Paragraph::new(Span::styled(
        "(tab/r/enter) try again / (←→) words / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[6], buf);
}

impl Widget for SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.snapshot.finished {
            render_results(&self, area, buf);
        } else {
            render_typing(&self, area, buf);
        }
    }
}
