//! TUI rendering for Roster using ratatui.

mod input;
mod theme;

pub use input::{InputPump, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame, styles};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Row, Table},
};

use roster_engine::App;
use roster_types::{Item, ViewPhase};

/// Main draw function: render the whole frame from the app state.
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Item list / status text
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_content(frame, app, chunks[0], &palette);
    draw_status_bar(frame, app, chunks[1], &palette, &glyphs);
}

fn content_block(palette: &Palette) -> Block<'static> {
    Block::default()
        .title(" Items ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(
            Style::default()
                .bg(palette.bg_panel)
                .fg(palette.text_primary),
        )
        .padding(Padding::horizontal(1))
}

fn draw_content(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = content_block(palette);

    match app.phase() {
        ViewPhase::Loading => {
            let spinner = spinner_frame(app.spinner_tick(), app.ui_options());
            let line = Line::from(vec![
                Span::styled(spinner, Style::default().fg(palette.accent)),
                Span::styled(
                    " Loading items...",
                    Style::default().fg(palette.text_muted),
                ),
            ]);
            frame.render_widget(Paragraph::new(line).block(block), area);
        }
        ViewPhase::Failed(message) => {
            let line = Line::from(Span::styled(
                format!("Error: {message}"),
                styles::error_text(palette),
            ));
            frame.render_widget(Paragraph::new(line).block(block), area);
        }
        ViewPhase::Loaded(items) => {
            draw_items_table(frame, items, app.scroll(), area, palette, block);
        }
    }
}

fn draw_items_table(
    frame: &mut Frame,
    items: &[Item],
    scroll: usize,
    area: Rect,
    palette: &Palette,
    block: Block<'_>,
) {
    let header = Row::new(["ID", "Type", "Title", "Created at"]).style(styles::table_header(palette));

    // Manual windowing: skip scrolled-past rows, let the widget clip the rest.
    let offset = scroll.min(items.len());
    let rows = items[offset..].iter().map(|item| {
        Row::new(vec![
            item.id.to_string(),
            item.kind.clone(),
            item.title.clone(),
            item.created_at.clone(),
        ])
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Min(24),
        Constraint::Length(24),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(block);

    frame.render_widget(table, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let hint = styles::key_hint(palette);
    let mut spans = vec![
        Span::styled(" q", Style::default().fg(palette.accent)),
        Span::styled(" quit", hint),
    ];

    match app.phase() {
        ViewPhase::Loading => {}
        ViewPhase::Loaded(items) => {
            spans.push(Span::styled(
                format!("  {}/{}", glyphs.arrow_up, glyphs.arrow_down),
                Style::default().fg(palette.accent),
            ));
            spans.push(Span::styled(" scroll", hint));
            spans.push(Span::styled(
                format!("  {} {} items", glyphs.status_ok, items.len()),
                Style::default().fg(palette.success),
            ));
        }
        ViewPhase::Failed(_) => {
            spans.push(Span::styled(
                format!("  {} request failed", glyphs.status_err),
                Style::default().fg(palette.error),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
