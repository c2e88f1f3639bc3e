use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::engine::select::ViewKind;
use crate::tui::app::{App, Mode};

/// Render the header: view tabs plus the filter box, with a separator below.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim);

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, view) in [ViewKind::Todo, ViewKind::Done].into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" \u{2502} ", dim));
        }
        spans.push(Span::styled(view.label(), tab_style(app, view)));
    }

    // live filter text, visible while typing and while a filter is applied
    if app.mode == Mode::Filter || !app.selection.filter.is_empty() {
        spans.push(Span::styled("   /", dim));
        spans.push(Span::styled(
            app.selection.filter.clone(),
            Style::default().fg(app.theme.highlight),
        ));
        if app.mode == Mode::Filter {
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight),
            ));
        }
    }

    let hint = "? help ";
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if used + hint_width < width {
        spans.push(Span::raw(" ".repeat(width - used - hint_width)));
        spans.push(Span::styled(hint, dim));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect) {
    let line = "\u{2500}".repeat(area.width as usize);
    let sep = Paragraph::new(line).style(Style::default().fg(app.theme.dim));
    frame.render_widget(sep, area);
}

fn tab_style(app: &App, view: ViewKind) -> Style {
    if app.selection.view == view {
        Style::default()
            .fg(app.theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim)
    }
}
