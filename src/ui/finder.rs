use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::{App, FilterField, Status};

const FG_DARK: Color = Color::Rgb(0x24, 0x29, 0x33);
const ACCENT: Color = Color::Rgb(0xC9, 0x6A, 0x2B); // focused border / markers
const MATCH_GREEN: Color = Color::Rgb(0x6F, 0x9A, 0x4B); // counts, info status
const ALERT_RED: Color = Color::Rgb(0xB5, 0x3A, 0x3A); // "no items found"
const MUTED: Color = Color::Rgb(0x6E, 0x6E, 0x6E); // footer, hints

const HEADER_STYLE: Style = Style::new().fg(FG_DARK).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(0xC9, 0xD6, 0xE3))
    .fg(FG_DARK)
    .add_modifier(Modifier::BOLD);

pub fn draw_finder(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Length(3), // Filter inputs
        Constraint::Min(8),    // Element table
        Constraint::Length(3), // Status + key hints
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_filters(frame, chunks[1], app);
    draw_elements(frame, chunks[2], app);
    draw_footer(frame, chunks[3], app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let models: Vec<String> = app
        .store
        .iter()
        .map(|(_, m)| format!("{} ({})", m.name, m.schema))
        .collect();

    let title = format!(
        " IFC Finder | {} | {} elements ",
        models.join(", "),
        app.total_elements()
    );

    let header = Paragraph::new(title)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_filters(frame: &mut Frame, area: Rect, app: &App) {
    let chunks =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    draw_input(
        frame,
        chunks[0],
        " Category pattern ",
        &app.category_input,
        app.focus == FilterField::Category,
    );
    draw_input(
        frame,
        chunks[1],
        " Property pattern (NAME=VALUE) ",
        &app.property_input,
        app.focus == FilterField::Property,
    );
}

fn draw_input(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    };

    let cursor = if focused { "▏" } else { "" };
    let content = Line::from(vec![
        Span::raw(value.to_string()),
        Span::styled(cursor, Style::default().fg(ACCENT)),
    ]);

    let input = Paragraph::new(content).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(input, area);
}

fn draw_elements(frame: &mut Frame, area: Rect, app: &App) {
    let rows_area_height = area.height.saturating_sub(3) as usize; // borders + header row
    let visible = app.visible_elements();

    // Keep the selection inside the viewport
    let offset = if app.selected_row >= app.scroll_offset + rows_area_height {
        app.selected_row + 1 - rows_area_height
    } else {
        app.scroll_offset
    };

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .skip(offset)
        .take(rows_area_height)
        .map(|(i, (model_id, element))| {
            let style = if i == app.selected_row {
                SELECTED_STYLE
            } else {
                Style::default()
            };

            let storey = app
                .store
                .get(*model_id)
                .map(|m| m.storey_name(element.id))
                .unwrap_or_else(|_| "-".to_string());

            Row::new(vec![
                Cell::from(format!("#{}", element.id)),
                Cell::from(element.category.clone()),
                Cell::from(element.name.clone()),
                Cell::from(storey),
            ])
            .style(style)
        })
        .collect();

    let isolated = !app.visibility.is_unfiltered();
    let title = if isolated {
        format!(" Elements ({} isolated) ", visible.len())
    } else {
        format!(" Elements ({}) ", visible.len())
    };

    let border_style = if isolated {
        Style::default().fg(MATCH_GREEN)
    } else {
        Style::default()
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(28),
            Constraint::Min(20),
            Constraint::Length(16),
        ],
    )
    .header(
        Row::new(vec!["ID", "Category", "Name", "Storey"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(table, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let status_span = match &app.status {
        Status::Idle => Span::styled(
            "Type a pattern, Enter to isolate matches",
            Style::default().fg(MUTED),
        ),
        Status::Info(msg) => Span::styled(msg.clone(), Style::default().fg(MATCH_GREEN)),
        Status::Alert(msg) => Span::styled(
            msg.clone(),
            Style::default().fg(ALERT_RED).add_modifier(Modifier::BOLD),
        ),
    };

    let hints = Span::styled(
        " | Tab Switch field | Enter Update | Ctrl+R Show all | ↑↓ Scroll | Esc Quit",
        Style::default().fg(MUTED),
    );

    let footer = Paragraph::new(Line::from(vec![status_span, hints]))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
