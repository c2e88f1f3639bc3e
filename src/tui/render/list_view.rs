use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::engine::page::{paginate, wrap_label};
use crate::tui::app::{App, Mode};

/// Render the page of items the cursor is on. One pointer column pair on the
/// left, then the wrapped item label with tag tokens in their session colors.
pub fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let paged = paginate(&app.pool, &app.selection, app.body_width, app.body_height);
    app.page_current = paged.current + 1;
    app.page_total = paged.pages.len();

    let Some(page) = paged.current_page() else {
        return;
    };
    if page.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "  nothing here",
            Style::default().fg(app.theme.dim),
        )));
        frame.render_widget(empty, area);
        return;
    }

    let current = app.selection.current();
    let editing = match (app.mode, &app.edit) {
        (Mode::Edit, Some(edit)) => Some(edit),
        _ => None,
    };

    let mut lines: Vec<Line> = Vec::new();
    for entry in &page.entries {
        let Some(item) = app.pool.get(entry.key) else {
            continue;
        };
        let selected = current == Some(entry.key);

        // the item under edit shows the live buffer instead of its saved text
        if let Some(edit) = editing.filter(|e| e.target == entry.key) {
            let prefix = format!("> {} ", item.status().marker());
            let before: String = edit.buffer.chars().take(edit.cursor).collect();
            frame.set_cursor_position((
                area.x + (prefix.width() + before.width()) as u16,
                area.y + lines.len() as u16,
            ));
            lines.push(Line::from(vec![
                Span::styled(prefix, Style::default().fg(app.theme.highlight)),
                Span::raw(edit.buffer.clone()),
            ]));
            continue;
        }

        for (i, row) in wrap_label(&item.display_label(), app.body_width)
            .iter()
            .enumerate()
        {
            let pointer = if selected && i == 0 { "> " } else { "  " };
            let mut spans = vec![Span::styled(
                pointer.to_string(),
                Style::default().fg(app.theme.highlight),
            )];
            push_item_spans(&mut spans, row, app);
            lines.push(Line::from(spans));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Split a rendered row into spans, coloring `#tag` tokens by tag name and
/// leaving everything else in the base text color.
fn push_item_spans<'a>(spans: &mut Vec<Span<'a>>, row: &str, app: &App) {
    let base = Style::default().fg(app.theme.text);
    for (i, token) in row.split(' ').enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ".to_string(), base));
        }
        if let Some(tag) = token.strip_prefix('#').filter(|t| !t.is_empty()) {
            let name = tag.split('=').next().unwrap_or(tag);
            spans.push(Span::styled(
                token.to_string(),
                Style::default().fg(app.theme.tag_color(name)),
            ));
        } else {
            spans.push(Span::styled(token.to_string(), base));
        }
    }
}
