use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::{HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::app::TypingApp;
use crate::prompts::Category;
use crate::strings::typing_labels;
use crate::typing::CharState;

impl<R: Rng> Widget for &TypingApp<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session();
        let labels = typing_labels(session.language());

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let target = session.target();
        let newlines = target.matches('\n').count() as u16;
        let prompt_lines = ((target.width() as f64 / max_chars_per_line as f64).ceil() as u16)
            .max(1)
            + newlines;
        let fits_one_line = newlines == 0 && target.width() <= max_chars_per_line as usize;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // categories
                Constraint::Min(1),
                Constraint::Length(prompt_lines),
                Constraint::Length(1), // padding
                Constraint::Length(1), // next prompt
                Constraint::Length(1), // stats
                Constraint::Length(1), // hint
                Constraint::Min(1),
                Constraint::Length(1), // legend
            ])
            .split(area);

        // category tabs
        let mut tabs = vec![Span::styled(
            format!("[{}] ", session.language()),
            italic_style,
        )];
        for (i, category) in Category::ALL.iter().enumerate() {
            let style = if *category == session.category() {
                Style::default().patch(bold_style).fg(Color::Cyan)
            } else {
                dim_bold_style
            };
            tabs.push(Span::styled(
                format!(" F{} {} ", i + 1, labels.category(*category)),
                style,
            ));
        }
        Paragraph::new(Line::from(tabs))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        // prompt, colored by what has been typed so far
        let cursor = session.input().chars().count();
        let mut lines: Vec<Line> = vec![];
        let mut spans: Vec<Span> = vec![];
        for (idx, (expected, state)) in target.chars().zip(session.states()).enumerate() {
            let shown = match expected {
                '\n' => "↵".to_owned(),
                ' ' if *state == CharState::Incorrect => "·".to_owned(),
                c => c.to_string(),
            };
            let style = match state {
                CharState::Correct => green_bold_style,
                CharState::Incorrect => red_bold_style,
                CharState::Unset if idx == cursor => underlined_dim_bold_style,
                CharState::Unset => dim_bold_style,
            };
            spans.push(Span::styled(shown, style));
            if expected == '\n' {
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
        }
        lines.push(Line::from(spans));

        Paragraph::new(lines)
            .alignment(if fits_one_line {
                // when the prompt is small enough to fit on one line
                // centering the text gives a nice zen feeling
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false })
            .render(chunks[2], buf);

        let next_line = session.next_target().lines().next().unwrap_or_default();
        Paragraph::new(Span::styled(
            format!("{}: {}", labels.next, next_line),
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

        let metrics = self.metrics();
        Paragraph::new(Span::styled(
            format!(
                "{} {}%   {} {}   {} {}s",
                labels.accuracy,
                metrics.accuracy_pct(),
                labels.cpm,
                metrics.cpm,
                labels.seconds,
                metrics.elapsed_secs
            ),
            bold_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

        let hint = if session.is_complete() {
            Span::styled(
                labels.ready,
                Style::default().patch(bold_style).fg(Color::Yellow),
            )
        } else if self.buffer().is_empty() {
            Span::styled(labels.placeholder, italic_style)
        } else {
            Span::raw("")
        };
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .render(chunks[6], buf);

        Paragraph::new(Span::styled(labels.legend, italic_style)).render(chunks[8], buf);
    }
}
