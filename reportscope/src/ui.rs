//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Pane};

// ========== View Colors ==========
// Consistent colors across the selector panes

/// Border color for the focused pane
const BORDER_ACTIVE: Color = Color::Rgb(0, 180, 180);
/// Border color for unfocused panes
const BORDER_IDLE: Color = Color::Rgb(60, 60, 60);
/// Border color for the location block
const BORDER_LOCATION: Color = Color::Rgb(80, 160, 80);
/// Label color for metadata attributes
const LABEL_COLOR: Color = Color::Rgb(100, 180, 180);
/// Highlight background for the selected row
const ROW_HIGHLIGHT: Color = Color::Rgb(0, 80, 80);
/// Warning color for the invalid-date flag
const WARN_COLOR: Color = Color::Rgb(220, 180, 0);
/// Error banner color
const ERROR_COLOR: Color = Color::Rgb(220, 80, 80);

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Layout: header, error banner (when present), panes, location, footer
    let banner_height = if app.load_error.is_some() { 3 } else { 0 };
    let chunks = Layout::vertical([
        Constraint::Length(2),             // Header
        Constraint::Length(banner_height), // Error banner
        Constraint::Min(5),                // Selector panes
        Constraint::Length(3),             // Derived location
        Constraint::Length(1),             // Footer
    ])
    .split(area);

    render_header(frame, app, chunks[0]);
    if app.load_error.is_some() {
        render_error_banner(frame, app, chunks[1]);
    }
    render_panes(frame, app, chunks[2]);
    render_location(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);
}

/// Render the header with app name and index URL.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(" reportscope", Style::default().fg(Color::Cyan).bold()),
        Span::raw("  "),
        Span::styled("index: ", Style::default().fg(LABEL_COLOR)),
        Span::styled(app.index_url.clone(), Style::default().fg(Color::White)),
    ]);
    let header = Paragraph::new(header).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

/// Render the persistent load-error banner. There is no retry: the index
/// is fetched once, and this banner stays up with every selector disabled.
fn render_error_banner(frame: &mut Frame, app: &App, area: Rect) {
    let message = app.load_error.as_deref().unwrap_or("unknown error");
    let banner = Paragraph::new(message)
        .style(Style::default().fg(ERROR_COLOR).bold())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" index load failed ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ERROR_COLOR)),
        );
    frame.render_widget(banner, area);
}

/// Render the three selector panes side by side.
fn render_panes(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Percentage(30),
        Constraint::Percentage(40),
    ])
    .split(area);

    render_projects_pane(frame, app, columns[0]);
    render_dates_pane(frame, app, columns[1]);
    render_reports_pane(frame, app, columns[2]);
}

fn pane_block(title: String, focused: bool, enabled: bool) -> Block<'static> {
    let border_color = if focused && enabled {
        BORDER_ACTIVE
    } else {
        BORDER_IDLE
    };
    let title_style = if enabled {
        Style::default().fg(Color::White).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
}

fn option_list(options: Vec<String>, committed: Option<&str>) -> List<'static> {
    let items: Vec<ListItem> = options
        .into_iter()
        .map(|name| {
            let style = if committed == Some(name.as_str()) {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(name, style)))
        })
        .collect();

    List::new(items)
        .highlight_style(Style::default().bg(ROW_HIGHLIGHT))
        .highlight_symbol("> ")
}

/// Render the project selector.
fn render_projects_pane(frame: &mut Frame, app: &mut App, area: Rect) {
    let options = app.projects();
    let enabled = !options.is_empty();
    let focused = app.active_pane == Pane::Projects;
    let block = pane_block(format!(" Projects ({}) ", options.len()), focused, enabled);

    if !enabled {
        let hint = if app.load_error.is_some() {
            "unavailable"
        } else {
            "no projects published"
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let committed = app.selection.as_ref().and_then(|s| s.project()).map(String::from);
    let list = option_list(options, committed.as_deref()).block(block);
    frame.render_stateful_widget(list, area, &mut app.projects_state);
}

/// Render the date selector, including the pickable range and the
/// free-form entry line.
fn render_dates_pane(frame: &mut Frame, app: &mut App, area: Rect) {
    let options = app.dates();
    let enabled = !options.is_empty();
    let focused = app.active_pane == Pane::Dates;

    // Mirror a date picker's min/max: show the pickable range in the title.
    let bounds = app
        .selection
        .as_ref()
        .and_then(|s| s.date_bounds())
        .map(|(min, max)| format!("{} .. {}", min, max));
    let title = match &bounds {
        Some(range) => format!(" Dates ({}) ", range),
        None => " Dates ".to_string(),
    };
    let block = pane_block(title, focused, enabled);

    if !enabled {
        let empty = Paragraph::new("select a project first")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    // Reserve a line at the bottom for entry/warning state.
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let committed = app.selection.as_ref().and_then(|s| s.date()).map(String::from);
    let list = option_list(options, committed.as_deref());
    frame.render_stateful_widget(list, rows[0], &mut app.dates_state);

    let status = if app.editing_date {
        Line::from(vec![
            Span::styled("date: ", Style::default().fg(LABEL_COLOR)),
            Span::styled(app.date_input.clone(), Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::White).bold()),
        ])
    } else if app.date_is_invalid() {
        Line::from(Span::styled(
            format!("no reports for {}", committed.as_deref().unwrap_or("")),
            Style::default().fg(WARN_COLOR),
        ))
    } else if focused {
        Line::from(Span::styled(
            "e to type a date",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(status), rows[1]);
}

/// Render the report selector.
fn render_reports_pane(frame: &mut Frame, app: &mut App, area: Rect) {
    let options = app.reports();
    let enabled = !options.is_empty();
    let focused = app.active_pane == Pane::Reports;
    let title = if enabled {
        format!(" Reports ({}) ", options.len())
    } else {
        " Reports ".to_string()
    };
    let block = pane_block(title, focused, enabled);

    if !enabled {
        let hint = if app.date_is_invalid() {
            "no reports for this date"
        } else {
            "select a project and date first"
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let committed = app.selection.as_ref().and_then(|s| s.report()).map(String::from);
    let list = option_list(options, committed.as_deref()).block(block);
    frame.render_stateful_widget(list, area, &mut app.reports_state);
}

/// Render the derived location block. This is the hand-off point: whatever
/// displays the report content picks the location up from here.
fn render_location(frame: &mut Frame, app: &App, area: Rect) {
    let location = app.derived_location();
    let content = if location.is_empty() {
        Line::from(Span::styled(
            "select a project, date, and report",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::styled("location: ", Style::default().fg(LABEL_COLOR)),
            Span::styled(location.to_string(), Style::default().fg(Color::White).bold()),
        ])
    };

    let block = Block::default()
        .title(" Report ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_LOCATION));
    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Render the footer with key hints.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = if app.editing_date {
        "Enter commit | Esc cancel"
    } else if app.load_error.is_some() {
        "q quit"
    } else {
        "Tab pane | j/k move | Enter select | e type date | q quit"
    };
    let footer = Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
