use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Filter mode types directly into the selection's filter text; the
/// selection is rebuilt on every keystroke for live narrowing.
pub(super) fn handle_filter(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Tab | KeyCode::Enter | KeyCode::Down => {
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            app.selection.filter.pop();
            app.selection.rebuild(&app.pool);
        }
        KeyCode::Char(c) => {
            app.selection.filter.push(c);
            app.selection.rebuild(&app.pool);
        }
        _ => {}
    }
}
