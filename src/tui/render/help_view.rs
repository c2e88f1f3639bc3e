use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

const BINDINGS: &[(&str, &str)] = &[
    ("\u{2191}\u{2193}/jk", "move cursor"),
    ("PgUp/PgDn", "move by page"),
    ("Tab", "switch todo/done"),
    ("/", "filter by tag"),
    ("Esc", "clear filter"),
    ("Enter", "peek at source file"),
    ("x", "check off"),
    ("space", "reopen"),
    ("@/a", "mark ongoing"),
    ("~/-/s", "mark obsolete"),
    ("!", "raise importance"),
    ("0", "calm importance"),
    ("z", "snooze"),
    ("e", "edit text"),
    ("n", "new item"),
    ("p", "focus timer"),
    ("q", "quit"),
];

/// Full-body key binding reference, toggled with `?`.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            " Key Bindings",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (key, desc) in BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(format!(" {key:<12}"), key_style),
            Span::styled(*desc, desc_style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " any key to close",
        Style::default().fg(app.theme.dim),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}
