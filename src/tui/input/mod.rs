mod edit;
mod filter;
mod focus;
mod nag;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use filter::*;
#[allow(unused_imports)]
use focus::*;
#[allow(unused_imports)]
use nag::*;
#[allow(unused_imports)]
use navigate::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    // a new keypress supersedes any lingering footer message
    app.status = None;

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Filter => handle_filter(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Focus => handle_focus(app, key),
        Mode::Nag => handle_nag(app, key),
        // help and peek are read-only: any key returns to navigation
        Mode::Help | Mode::Peek => {
            app.peek = None;
            app.mode = Mode::Navigate;
        }
    }
}
