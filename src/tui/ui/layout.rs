use ratatui::layout::Constraint;
use ratatui::prelude::{Direction, Layout, Rect};

/// The area inside a one-cell border.
pub(super) fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// `n` equal-width columns.
pub(super) fn columns(area: Rect, n: u16) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..n).map(|_| Constraint::Ratio(1, u32::from(n))).collect::<Vec<_>>())
        .split(area)
        .to_vec()
}

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let band = |pct: u16| {
        [
            Constraint::Percentage((100 - pct) / 2),
            Constraint::Percentage(pct),
            Constraint::Percentage((100 - pct) / 2),
        ]
    };
    let rows = Layout::default().direction(Direction::Vertical).constraints(band(percent_y)).split(r);
    Layout::default().direction(Direction::Horizontal).constraints(band(percent_x)).split(rows[1])[1]
}
