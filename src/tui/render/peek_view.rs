use std::fs;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Show the current item's source file, centered on its line. The file is
/// re-read on every frame so the peek always reflects what is on disk.
pub fn render_peek(frame: &mut Frame, app: &App, area: Rect) {
    let Some(item) = app.peek.and_then(|key| app.pool.get(key)) else {
        return;
    };

    let contents = match fs::read_to_string(item.file()) {
        Ok(contents) => contents,
        Err(e) => {
            let line = Line::from(Span::styled(
                format!(" cannot read {}: {e}", item.file().display()),
                Style::default().fg(app.theme.error),
            ));
            frame.render_widget(Paragraph::new(line), area);
            return;
        }
    };

    let file_lines: Vec<&str> = contents.lines().collect();
    let height = (area.height as usize).saturating_sub(2).max(1);
    let target = item.line(); // 1-based
    let first = target.saturating_sub(height / 2).max(1);
    let number_width = file_lines.len().to_string().len();

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!(" {}", item.file().display()),
            Style::default()
                .fg(app.theme.dim)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for n in first..first + height {
        let Some(text) = file_lines.get(n - 1) else {
            break;
        };
        let style = if n == target {
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {n:>number_width$} "),
                Style::default().fg(app.theme.dim),
            ),
            Span::styled(text.to_string(), style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
