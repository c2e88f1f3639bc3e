use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Typing challenge gating item creation. Each correct keystroke consumes
/// one challenge character; finishing the string creates the item.
pub(super) fn handle_nag(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.nag = None;
            app.mode = Mode::Navigate;
        }
        KeyCode::Char(c) => {
            let Some(nag) = &mut app.nag else {
                app.mode = Mode::Navigate;
                return;
            };
            if nag.challenge.chars().next() == Some(c) {
                nag.challenge.remove(0);
            }
            if nag.challenge.is_empty() {
                app.nag = None;
                app.create_item();
            }
        }
        _ => {}
    }
}
