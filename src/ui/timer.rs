use itertools::Itertools;
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Widget, Wrap},
};

use super::{centered_rect, render_bubbles, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::app::{Phase, PickerField, TimerApp};
use crate::depth::{background_rgb, depth_meters, format_hms};
use crate::reward::RewardStore;
use crate::strings::{timer_labels, TimerLabels};

const PICKER_WIDTH: u16 = 12;

impl<S: RewardStore, R: Rng> Widget for &TimerApp<S, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels = timer_labels(self.language());
        match self.phase() {
            Phase::Setting => render_setting(self, labels, area, buf),
            Phase::Diving => {
                render_dive(self, labels, area, buf);
                render_bubbles(&self.bubbles, area, buf);
            }
            Phase::Reward => {
                abyss(1.0).render(area, buf);
                render_bubbles(&self.bubbles, area, buf);
                render_reward(self, labels, area, buf);
            }
        }
    }
}

fn abyss(progress: f64) -> Block<'static> {
    let (r, g, b) = background_rgb(progress);
    Block::default().style(Style::default().bg(Color::Rgb(r, g, b)))
}

fn render_setting<S: RewardStore, R: Rng>(
    app: &TimerApp<S, R>,
    labels: &TimerLabels,
    area: Rect,
    buf: &mut Buffer,
) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Gray).add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // title
            Constraint::Length(5), // pickers
            Constraint::Length(1),
            Constraint::Length(1), // start
            Constraint::Length(1),
            Constraint::Length(1), // collection title
            Constraint::Length(2), // collection
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(labels.title, dim_style.add_modifier(Modifier::BOLD)))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let row = centered_rect(PICKER_WIDTH * 3, chunks[2].height, chunks[2]);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PICKER_WIDTH); 3])
        .split(row);
    let fields = [
        (PickerField::Hours, labels.hours),
        (PickerField::Minutes, labels.minutes),
        (PickerField::Seconds, labels.seconds),
    ];
    for ((field, unit), column) in fields.into_iter().zip(columns.iter()) {
        let picker = app.picker(field);
        let focused = app.focus() == field;
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            dim_style
        };
        let lines = vec![
            Line::from(Span::styled(format!("{:02}", picker.prev_value()), dim_style)),
            Line::from(vec![
                Span::styled(picker.formatted(), bold_style),
                Span::raw(format!(" {unit}")),
            ]),
            Line::from(Span::styled(format!("{:02}", picker.next_value()), dim_style)),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style),
            )
            .render(*column, buf);
    }

    Paragraph::new(Span::styled(
        format!("[ {} ]", labels.start),
        Style::default().patch(bold_style).fg(Color::Blue),
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);

    Paragraph::new(Span::styled(labels.collection, dim_style.add_modifier(Modifier::BOLD)))
        .render(chunks[6], buf);

    let shelf = if app.ledger().is_empty() {
        Paragraph::new(Span::styled(labels.collection_empty, dim_style))
    } else {
        Paragraph::new(app.ledger().recent_first().join(" "))
    };
    shelf.wrap(Wrap { trim: true }).render(chunks[7], buf);

    Paragraph::new(Span::styled(labels.setting_legend, italic_style)).render(chunks[9], buf);
}

fn render_dive<S: RewardStore, R: Rng>(
    app: &TimerApp<S, R>,
    labels: &TimerLabels,
    area: Rect,
    buf: &mut Buffer,
) {
    let countdown = app.countdown();
    abyss(countdown.progress()).render(area, buf);

    let white_bold = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let faded = Style::default().fg(Color::Gray);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // time
            Constraint::Length(1), // depth
            Constraint::Length(1),
            Constraint::Length(1), // dial
            Constraint::Length(1),
            Constraint::Length(1), // controls
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled(format_hms(countdown.remaining_secs()), white_bold))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    if countdown.is_running() {
        Paragraph::new(Span::styled(
            format!("{}: {}m", labels.depth, depth_meters(countdown.progress())),
            faded,
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
    }

    let dial = centered_rect(40, 1, chunks[4]);
    Gauge::default()
        .gauge_style(Style::default().fg(Color::White).bg(Color::DarkGray))
        .ratio(countdown.remaining_fraction().clamp(0.0, 1.0))
        .label("")
        .render(dial, buf);

    let toggle = if app.is_paused() {
        labels.resume
    } else {
        labels.pause
    };
    Paragraph::new(Span::styled(
        format!("(space) {toggle}   (esc) {}", labels.cancel),
        faded.add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[6], buf);
}

fn render_reward<S: RewardStore, R: Rng>(
    app: &TimerApp<S, R>,
    labels: &TimerLabels,
    area: Rect,
    buf: &mut Buffer,
) {
    let popup = centered_rect(52, 7, area);
    Clear.render(popup, buf);

    let creature = app.last_reward().unwrap_or_default();
    let lines = vec![
        Line::from(labels.reward_body),
        Line::from(""),
        Line::from(Span::styled(
            creature.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("(enter) {}", labels.confirm),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(labels.reward_title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .render(popup, buf);
}
