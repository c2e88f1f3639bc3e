use crossterm::event::{KeyCode, KeyEvent};

use crate::engine::page::paginate;
use crate::model::item::Status;
use crate::ops::item_ops;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // cursor movement
        KeyCode::Up | KeyCode::Char('k') => app.selection.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.selection.move_cursor(1),
        KeyCode::PageUp => page_step(app, -1),
        KeyCode::PageDown => page_step(app, 1),

        // view switching
        KeyCode::Tab => {
            app.selection.toggle_view();
            app.selection.rebuild(&app.pool);
        }
        KeyCode::Char('/') => app.mode = Mode::Filter,
        KeyCode::Char('?') => app.mode = Mode::Help,
        KeyCode::Enter => app.enter_peek(),
        KeyCode::Esc => {
            if !app.selection.filter.is_empty() {
                app.selection.filter.clear();
                app.selection.rebuild(&app.pool);
            }
        }

        // status of the current item
        KeyCode::Char('x') => app.mutate_current(|i| item_ops::set_status(i, Status::Checked)),
        KeyCode::Char(' ') => app.mutate_current(|i| item_ops::set_status(i, Status::Open)),
        KeyCode::Char('@') | KeyCode::Char('a') => {
            app.mutate_current(|i| item_ops::set_status(i, Status::Ongoing))
        }
        KeyCode::Char('~') | KeyCode::Char('-') | KeyCode::Char('s') => {
            app.mutate_current(|i| item_ops::set_status(i, Status::Obsolete))
        }

        // editing the current item
        KeyCode::Char('!') => app.mutate_current(item_ops::escalate),
        KeyCode::Char('0') => app.mutate_current(item_ops::deescalate),
        KeyCode::Char('z') => {
            let backoff = app.backoff;
            app.mutate_current(|i| item_ops::snooze(i, backoff));
        }
        KeyCode::Char('e') => app.enter_edit(),
        KeyCode::Char('n') => app.try_create_item(),
        KeyCode::Char('p') => app.enter_focus(),

        _ => {}
    }
}

/// Move the cursor by one screenful, using the page the cursor is on so the
/// jump matches what is visible.
fn page_step(app: &mut App, dir: isize) {
    let paged = paginate(&app.pool, &app.selection, app.body_width, app.body_height);
    if let Some(page) = paged.current_page() {
        app.selection.move_cursor(dir * page.len() as isize);
    }
}
