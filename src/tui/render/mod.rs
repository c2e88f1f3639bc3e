pub mod focus_view;
pub mod footer;
pub mod header;
pub mod help_view;
pub mod list_view;
pub mod nag_view;
pub mod peek_view;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use super::app::{App, Mode};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Layout: header (2 rows) | body | footer (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tabs + separator
            Constraint::Min(1),    // body
            Constraint::Length(1), // footer
        ])
        .split(area);

    // Record body geometry so key handling can page by what is on screen.
    // Two columns on the left are the cursor pointer gutter.
    app.body_width = (chunks[1].width as usize).saturating_sub(2);
    app.body_height = chunks[1].height as usize;

    header::render_header(frame, app, chunks[0]);

    match app.mode {
        Mode::Help => help_view::render_help(frame, app, chunks[1]),
        Mode::Peek => peek_view::render_peek(frame, app, chunks[1]),
        Mode::Focus => focus_view::render_focus(frame, app, chunks[1]),
        Mode::Nag => nag_view::render_nag(frame, app, chunks[1]),
        Mode::Navigate | Mode::Filter | Mode::Edit => {
            list_view::render_list(frame, app, chunks[1])
        }
    }

    footer::render_footer(frame, app, chunks[2]);
}
