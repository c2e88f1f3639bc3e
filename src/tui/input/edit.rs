use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::item_ops;
use crate::tui::app::{App, Mode};

/// Single-line editor for an item's body text. Esc discards the buffer
/// without touching disk; Enter expands shorthands and persists.
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let Some(edit) = &mut app.edit else {
        app.mode = Mode::Navigate;
        return;
    };

    match key.code {
        KeyCode::Esc => {
            app.edit = None;
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            if edit.buffer.is_empty() {
                return;
            }
            let target = edit.target;
            let buffer = edit.buffer.clone();
            app.edit = None;
            app.mode = Mode::Navigate;

            if let Some(item) = app.pool.get_mut(target) {
                if let Err(e) = item_ops::set_text(item, &buffer) {
                    app.status = Some(e.to_string());
                    return;
                }
                app.selection.rebuild(&app.pool);
                app.selection.focus_key(target);
            }
        }
        KeyCode::Char(c) => {
            let at = byte_offset(&edit.buffer, edit.cursor);
            edit.buffer.insert(at, c);
            edit.cursor += 1;
        }
        KeyCode::Backspace => {
            if edit.cursor > 0 {
                edit.cursor -= 1;
                let at = byte_offset(&edit.buffer, edit.cursor);
                edit.buffer.remove(at);
            }
        }
        KeyCode::Left => edit.cursor = edit.cursor.saturating_sub(1),
        KeyCode::Right => edit.cursor = (edit.cursor + 1).min(edit.buffer.chars().count()),
        KeyCode::Home => edit.cursor = 0,
        KeyCode::End => edit.cursor = edit.buffer.chars().count(),
        _ => {}
    }
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
