use crate::caravan::Caravan;
use crate::cards::{Card, Suit};
use crate::game::Phase;
use crate::player::Player;
use crate::table::{CaravanName, Table};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, columns, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let (Ok(table), Ok(me), Ok(them)) =
        (app.game.table(), app.game.player(app.human), app.game.player(app.human.other()))
    else {
        let para = Paragraph::new("Game closed. Press M for a new one.")
            .block(Block::default().title("caravan-rs").borders(Borders::ALL));
        f.render_widget(para, f.area());
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Min(6),    // opponent caravans
            Constraint::Min(6),    // own caravans
            Constraint::Length(3), // hand
            Constraint::Length(3), // command line
            Constraint::Length(4), // status
        ])
        .split(f.area());

    draw_header(f, chunks[0], app, me, them);
    draw_caravan_row(f, chunks[1], table, CaravanName::owned_by(them.name()));
    draw_caravan_row(f, chunks[2], table, CaravanName::owned_by(me.name()));
    draw_hand(f, chunks[3], me);

    let cursor = if app.human_to_move() { "_" } else { "" };
    let input = Paragraph::new(format!("> {}{cursor}", app.input())).block(
        Block::default()
            .title("Command: P<hand><caravan>[pos] • D<hand> • C<caravan> • EXIT")
            .borders(Borders::ALL),
    );
    f.render_widget(input, chunks[4]);

    draw_status(f, chunks[5], app);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState, me: &Player, them: &Player) {
    let phase = match app.game.phase() {
        Ok(Phase::Opening) => "Opening",
        Ok(_) => "Main",
        Err(_) => "Closed",
    };
    let to_move = app.game.to_move().map(|p| p.to_string()).unwrap_or_default();
    let lines = vec![
        Line::from(format!("To move: {to_move}   Phase: {phase}   Moves: {}", me.moves())),
        Line::from(format!(
            "{} ({}, {}): hand {} deck {}   {} ({}): deck {}",
            them.name(),
            app.seat_label(them.name()),
            app.bot_difficulty.label(),
            them.hand_size(),
            them.deck_size(),
            me.name(),
            app.seat_label(me.name()),
            me.deck_size(),
        )),
    ];
    let header =
        Paragraph::new(lines).block(Block::default().title("caravan-rs").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_caravan_row(f: &mut Frame, area: Rect, table: &Table, names: [CaravanName; 3]) {
    for (name, col) in names.into_iter().zip(columns(area, 3)) {
        render_caravan(f, col, table.caravan(name));
    }
}

fn render_caravan(f: &mut Frame, area: Rect, caravan: &Caravan) {
    let mut title = format!("{}: {}", caravan.name(), caravan.bid());
    let mut border = Style::default();
    if caravan.is_sold() {
        title.push_str(" [SOLD]");
        border = border.fg(Color::Green);
    } else if caravan.is_bust() {
        title.push_str(" [BUST]");
        border = border.fg(Color::Red);
    }
    let block = Block::default().title(title).borders(Borders::ALL).border_style(border);

    let suit = caravan.suit().map(|s| s.glyph().to_string()).unwrap_or_else(|| "-".into());
    let mut lines = vec![Line::from(Span::styled(
        format!("{} {suit}", caravan.direction().label()),
        Style::default().add_modifier(Modifier::DIM),
    ))];
    for (i, slot) in caravan.slots().iter().enumerate() {
        let mut spans = vec![
            Span::raw(format!("{}: ", i + 1)),
            card_span(slot.numeral()),
        ];
        for face in slot.faces() {
            spans.push(Span::raw(" "));
            spans.push(card_span(*face));
        }
        lines.push(Line::from(spans));
    }
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn card_span(card: Card) -> Span<'static> {
    let text = match card.suit() {
        Some(s) => format!("{}{}", card.rank().to_char(), s.glyph()),
        None => card.to_string(),
    };
    let style = if card.is_face() {
        Style::default().fg(Color::Cyan)
    } else if matches!(card.suit(), Some(Suit::Hearts | Suit::Diamonds)) {
        Style::default().fg(Color::LightRed)
    } else {
        Style::default()
    };
    Span::styled(text, style)
}

fn draw_hand(f: &mut Frame, area: Rect, me: &Player) {
    let mut spans = Vec::with_capacity(me.hand_size() * 3);
    for (i, card) in me.hand().iter().enumerate() {
        spans.push(Span::styled(format!("{}:", i + 1), Style::default().add_modifier(Modifier::DIM)));
        spans.push(card_span(*card));
        spans.push(Span::raw("  "));
    }
    let para = Paragraph::new(Line::from(spans))
        .block(Block::default().title("Your hand").borders(Borders::ALL));
    f.render_widget(para, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner(area));

    let mut left = Vec::new();
    match app.game.winner() {
        Ok(Some(w)) if w == app.human => left.push(Line::from(Span::styled(
            "You win! Press M for a new game.",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))),
        Ok(Some(w)) => left.push(Line::from(Span::styled(
            format!("{w} wins. Press M for a new game."),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))),
        _ if app.human_to_move() => left.push(Line::from("Your move.")),
        _ => left.push(Line::from("Bot is thinking…")),
    }
    if let Some(err) = app.action_error() {
        left.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }
    let right = vec![Line::from(""), Line::from("? help • H history • M menu")];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(60, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let entries = app
        .game
        .history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset())
        .unwrap_or_default();
    let mut lines: Vec<Line> = Vec::new();
    if entries.is_empty() {
        lines.push(Line::from("No moves yet."));
    }
    for entry in entries {
        let card = entry.card.map(|c| format!(" ({c})")).unwrap_or_default();
        lines.push(Line::from(format!(
            "#{:<3} {:<6} {:<7} {}{card}",
            entry.turn,
            entry.seat.label(),
            entry.command.label(),
            entry.command,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Commands (type, then Enter):", bold)),
        Line::from("- P<hand><caravan>: play a numeral, e.g. P3A"),
        Line::from("- P<hand><caravan><pos>: play a face card on a slot, e.g. P1E2"),
        Line::from("- D<hand>: discard a card"),
        Line::from("- C<caravan>: clear one of your caravans"),
        Line::from("- EXIT: quit"),
        Line::from(""),
        Line::from(Span::styled("Rules:", bold)),
        Line::from("- First three moves: one numeral on each of your empty caravans"),
        Line::from("- A caravan sells at 21 to 26; over 26 it is bust"),
        Line::from("- Win two of the three caravan pairs, or outlast an empty hand"),
        Line::from("- J removes a card, Q flips direction and sets suit, K doubles"),
        Line::from("- Joker on an ace purges its suit, otherwise its rank"),
        Line::from(""),
        Line::from(Span::styled("Keys:", bold)),
        Line::from("- Backspace / Esc: edit / clear the command line"),
        Line::from("- H: history • M: menu • ?: close help"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}
