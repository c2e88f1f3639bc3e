use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Focus-timer mode: type a minute count, Enter starts the countdown.
/// While the clock runs only Esc is honored, which cancels the session and
/// still credits the elapsed time.
pub(super) fn handle_focus(app: &mut App, key: KeyEvent) {
    if app.focus.running {
        if key.code == KeyCode::Esc {
            app.finish_focus("focus session canceled");
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.mode = Mode::Navigate,
        KeyCode::Enter => start_session(app),
        KeyCode::Backspace => {
            app.focus.input.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            app.focus.input.push(c);
        }
        _ => {}
    }
}

fn start_session(app: &mut App) {
    let Ok(minutes) = app.focus.input.parse::<f64>() else {
        return;
    };
    if minutes <= 0.0 {
        return;
    }
    let secs = (minutes * 60.0) as u64;
    app.focus.total_secs = secs;
    app.focus.remaining_secs = secs;
    app.focus.accrued_secs = 0;
    app.focus.running = true;
}
