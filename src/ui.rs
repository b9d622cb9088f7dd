pub mod timer;
pub mod typing;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
};

use crate::bubbles::{BubbleField, BubbleMode};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

const OCEAN: [Color; 4] = [Color::Cyan, Color::LightCyan, Color::Blue, Color::LightBlue];

/// A `width` x `height` rect centered inside `area`, clipped to it.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width - width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// Draw the bubble field on top of whatever is already in `buf`
pub(crate) fn render_bubbles(field: &BubbleField, area: Rect, buf: &mut Buffer) {
    for bubble in &field.bubbles {
        if bubble.x < 0.0 || bubble.y < 0.0 {
            continue;
        }
        let x = bubble.x as u16;
        let y = bubble.y as u16;

        if x < area.width && y < area.height {
            let color = OCEAN[bubble.color_index % OCEAN.len()];
            let alpha = 1.0 - (bubble.age / bubble.max_age);

            let style = if alpha > 0.6 {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else if alpha > 0.25 {
                Style::default().fg(color)
            } else {
                Style::default().fg(color).add_modifier(Modifier::DIM)
            };

            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_symbol(&bubble.symbol.to_string());
                cell.set_style(style);
            }
        }
    }

    if field.mode == BubbleMode::Burst {
        if let Some(reward) = field.reward.as_deref() {
            let cx = area.x + area.width / 2;
            let cy = area.y + area.height / 2;
            buf.set_string(
                cx.saturating_sub(1),
                cy,
                reward,
                Style::default().add_modifier(Modifier::BOLD),
            );
        }
    }
}
