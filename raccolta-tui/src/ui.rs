use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use raccolta_core::{CollectionRow, Node, RowStyle, VisualTree};

use crate::app::App;

/// Height of one collection row including its border.
const ROW_HEIGHT: u16 = 4;

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, card, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new(app.info.description.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.info.name.as_str()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(header, *header_area);

    draw_card(frame, &app.tree, *content_area);
    draw_status(frame, app, *status_area);
}

fn draw_card(frame: &mut Frame<'_>, tree: &VisualTree, area: Rect) {
    let VisualTree::Card { header, nodes } = tree else {
        let waiting = Paragraph::new("Waiting for card configuration and entity states…")
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(waiting, area);
        return;
    };

    let card = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            header.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = card.inner(area);
    frame.render_widget(card, area);

    let visible: Vec<&Node> = nodes
        .iter()
        .filter(|node| !matches!(node, Node::Empty))
        .collect();
    let mut constraints: Vec<Constraint> = visible
        .iter()
        .map(|_| Constraint::Length(ROW_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (node, row_area) in visible.into_iter().zip(row_areas.iter()) {
        match node {
            Node::Collection { row, style } => draw_row(frame, row, style, *row_area),
            Node::Placeholder { text } => {
                frame.render_widget(Paragraph::new(text.as_str()), *row_area);
            }
            Node::Empty => {}
        }
    }
}

fn draw_row(frame: &mut Frame<'_>, row: &CollectionRow, style: &RowStyle, area: Rect) {
    let accent = parse_color(&style.icon_color);
    let badge = Span::styled(
        format!(" {} ", row.days_until_text),
        Style::default()
            .fg(Color::White)
            .bg(parse_color(&style.badge_background))
            .add_modifier(Modifier::BOLD),
    );

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title_top(Line::from(badge).right_aligned());
    if let Some(tint) = tint_color(&style.background) {
        block = block.style(Style::default().bg(tint));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", icon_glyph(&row.icon)),
                Style::default().fg(accent),
            ),
            Span::styled(
                row.label.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("  {}", row.subtitle()),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_status(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let nav_hint = "r reload · +/- rows · l language · q/Ctrl-C quit";

    let mut lines = Vec::new();
    if let Some(msg) = &app.error_message {
        lines.push(Line::from(Span::styled(
            msg.as_str(),
            Style::default().fg(Color::Red),
        )));
    } else {
        let refreshed = app
            .last_refresh
            .map_or_else(|| "never".to_owned(), |stamp| stamp.format("%H:%M:%S").to_string());
        lines.push(Line::from(format!(
            "language {} · rows {} · sensors {} · refreshed {refreshed}",
            app.language(),
            app.show_count(),
            app.card.sensors().len(),
        )));
    }

    if let Some(reminder) = app.reminders.first() {
        let notify_at = app.notify_at.format("%H:%M");
        lines.push(Line::from(Span::styled(
            format!("{notify_at} {}: {}", reminder.title, reminder.message),
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(nav_hint));
    }

    let status = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}

/// Parse a CSS-style colour; unknown values fall back to the default green.
fn parse_color(raw: &str) -> Color {
    raw.parse().unwrap_or(Color::Rgb(0x4C, 0xAF, 0x50))
}

/// Blend a `#rrggbbaa` colour over a black background, since terminals have no alpha.
fn tint_color(raw: &str) -> Option<Color> {
    let hex = raw.strip_prefix('#').filter(|hex| hex.len() == 8)?;
    let value = u32::from_str_radix(hex, 16).ok()?;
    let [red, green, blue, alpha] = value.to_be_bytes();
    let blend = |channel: u8| {
        let mixed = u16::from(channel) * u16::from(alpha) / u16::from(u8::MAX);
        u8::try_from(mixed).unwrap_or(u8::MAX)
    };
    Some(Color::Rgb(blend(red), blend(green), blend(blue)))
}

fn icon_glyph(icon: &str) -> &'static str {
    match icon.strip_prefix("mdi:").unwrap_or(icon) {
        "recycle" | "recycle-variant" => "♻",
        "trash-can" | "trash-can-outline" | "delete" | "delete-outline" => "🗑",
        "newspaper" | "newspaper-variant" | "package-variant" => "📰",
        "bottle-wine" | "glass-fragile" | "bottle-soda" => "🍾",
        "leaf" | "food-apple" | "compost" => "🍂",
        _ => "•",
    }
}
