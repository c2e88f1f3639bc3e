use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Render the footer: the current item's file location on the left, the
/// page indicator on the right. A pending status message takes the row over.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;

    if let Some(status) = &app.status {
        let line = Line::from(Span::styled(
            format!(" {status}"),
            Style::default().fg(app.theme.error),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let dim = Style::default().fg(app.theme.dim);
    let location = app
        .current_item()
        .map(|item| format!(" {}", item.location()))
        .unwrap_or_default();
    let pages = format!("pg {}/{} ", app.page_current, app.page_total);

    let mut spans = vec![Span::styled(location.clone(), dim)];
    let used = location.chars().count();
    let pages_width = pages.chars().count();
    if used + pages_width < width {
        spans.push(Span::raw(" ".repeat(width - used - pages_width)));
        spans.push(Span::styled(pages, dim));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
