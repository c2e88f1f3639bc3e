use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Focus timer: a minutes prompt before the session, a countdown during it.
pub fn render_focus(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(app.theme.dim);
    let mut lines: Vec<Line> = vec![Line::from("")];

    if let Some(item) = app.focus.target.and_then(|key| app.pool.get(key)) {
        lines.push(Line::from(Span::styled(
            format!("  {}", item.text()),
            Style::default().fg(app.theme.text),
        )));
        lines.push(Line::from(""));
    }

    if app.focus.running {
        let mins = app.focus.remaining_secs / 60;
        let secs = app.focus.remaining_secs % 60;
        lines.push(Line::from(Span::styled(
            format!("  {mins:02}:{secs:02}"),
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  esc to end early", dim)));
    } else {
        lines.push(Line::from(vec![
            Span::styled("  minutes: ", dim),
            Span::styled(
                app.focus.input.clone(),
                Style::default().fg(app.theme.text),
            ),
            Span::styled("\u{258C}", Style::default().fg(app.theme.highlight)),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  enter to start, esc to cancel",
            dim,
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
