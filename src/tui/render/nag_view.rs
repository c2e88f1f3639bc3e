use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// The typing challenge shown before adding to an overfull todo list.
pub fn render_nag(frame: &mut Frame, app: &App, area: Rect) {
    let Some(nag) = &app.nag else {
        return;
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", nag.prompt),
            Style::default().fg(app.theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  type ", Style::default().fg(app.theme.dim)),
            Span::styled(
                nag.challenge.clone(),
                Style::default()
                    .fg(app.theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to continue", Style::default().fg(app.theme.dim)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  esc to think better of it",
            Style::default().fg(app.theme.dim),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}
