use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::engine::select::{Selection, ViewKind};
use crate::io::line_io::append_item;
use crate::io::walker::{gather_files, scan_into};
use crate::model::config::Config;
use crate::model::item::{Item, ItemKey, Pool};
use crate::ops::item_ops::{self, BackoffFn, OpError, fib_backoff};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode. Exactly one handler owns the keyboard at a
/// time; Esc always falls back toward `Navigate` without persisting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Filter,
    Edit,
    Help,
    Focus,
    Nag,
    Peek,
}

/// In-progress single-line text edit of one item.
#[derive(Debug, Clone)]
pub struct EditState {
    pub target: ItemKey,
    pub buffer: String,
    /// Cursor position in characters.
    pub cursor: usize,
}

/// Focus-session countdown state.
#[derive(Debug, Clone, Default)]
pub struct FocusState {
    /// Minutes being typed before the session starts.
    pub input: String,
    pub running: bool,
    pub remaining_secs: u64,
    pub total_secs: u64,
    /// Seconds elapsed but not yet written to the item's `spent` tag.
    pub accrued_secs: u64,
    pub target: Option<ItemKey>,
}

/// Challenge screen shown before adding to an already-full plate.
#[derive(Debug, Clone)]
pub struct NagState {
    pub prompt: String,
    /// Remaining characters the user still has to type.
    pub challenge: String,
}

/// Main application state
pub struct App {
    pub config: Config,
    pub pool: Pool,
    pub selection: Selection,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub backoff: BackoffFn,
    pub rng: SmallRng,

    pub edit: Option<EditState>,
    pub focus: FocusState,
    pub nag: Option<NagState>,
    pub peek: Option<ItemKey>,

    /// One-shot message for the footer (conflicts, op errors).
    pub status: Option<String>,

    // body geometry from the last render pass, for page-aware navigation
    pub body_width: usize,
    pub body_height: usize,
    // page x of y, recorded by the list renderer for the footer
    pub page_current: usize,
    pub page_total: usize,
}

impl App {
    pub fn new(pool: Pool, config: Config, mut rng: SmallRng) -> Self {
        let theme = Theme::with_tag_colors(&pool, &mut rng);
        let mut selection = Selection::new();
        selection.rebuild(&pool);

        App {
            config,
            pool,
            selection,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            backoff: fib_backoff,
            rng,
            edit: None,
            focus: FocusState::default(),
            nag: None,
            peek: None,
            status: None,
            body_width: 0,
            body_height: 0,
            page_current: 0,
            page_total: 1,
        }
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.pool.get(self.selection.current()?)
    }

    /// Run an operation against the item under the cursor, surface any
    /// failure in the footer, and rebuild the selection keeping the cursor
    /// on the item when it is still visible. A missing selection is a no-op
    /// with a message, never a crash.
    pub fn mutate_current<F>(&mut self, op: F)
    where
        F: FnOnce(&mut Item) -> Result<(), OpError>,
    {
        let Some(key) = self.selection.current() else {
            self.status = Some("nothing selected".to_string());
            return;
        };
        let Some(item) = self.pool.get_mut(key) else {
            return;
        };
        if let Err(e) = op(item) {
            self.status = Some(e.to_string());
            return;
        }
        self.selection.rebuild(&self.pool);
        self.selection.focus_key(key);
    }

    /// Append a blank item to the write target, switch to the todo view
    /// with the cursor on it, and open the editor.
    pub fn create_item(&mut self) {
        let (file, line, raw) = match append_item(&self.config.write_to) {
            Ok(created) => created,
            Err(e) => {
                self.status = Some(e.to_string());
                return;
            }
        };
        let key = self.pool.insert(file, line, raw);

        self.selection.view = ViewKind::Todo;
        self.selection.rebuild(&self.pool);
        self.selection.focus_key(key);
        self.enter_edit();
    }

    /// New items are gated behind a typing challenge once the todo plate
    /// already holds five or more visible items; the challenge grows with
    /// the overflow.
    pub fn try_create_item(&mut self) {
        if self.selection.view == ViewKind::Todo && self.selection.len() >= 5 {
            let size = (self.selection.len() - 4) as u32;
            let len = (self.backoff)(size) as usize;
            let challenge: String = (0..len)
                .map(|_| (b'a' + self.rng.gen_range(0..26)) as char)
                .collect();
            self.nag = Some(NagState {
                prompt: "Too many items on your plate...".to_string(),
                challenge,
            });
            self.mode = Mode::Nag;
        } else {
            self.create_item();
        }
    }

    pub fn enter_edit(&mut self) {
        let Some(item) = self.current_item() else {
            return;
        };
        let buffer = item.text().to_string();
        self.edit = Some(EditState {
            target: item.key(),
            cursor: buffer.chars().count(),
            buffer,
        });
        self.mode = Mode::Edit;
    }

    pub fn enter_peek(&mut self) {
        if let Some(key) = self.selection.current() {
            self.peek = Some(key);
            self.mode = Mode::Peek;
        }
    }

    pub fn enter_focus(&mut self) {
        if !self.focus.running {
            self.focus = FocusState {
                target: self.selection.current(),
                ..FocusState::default()
            };
        }
        self.mode = Mode::Focus;
    }

    /// One second of wall clock. Only the focus countdown cares.
    pub fn on_tick(&mut self) {
        if !self.focus.running {
            return;
        }
        self.focus.remaining_secs = self.focus.remaining_secs.saturating_sub(1);
        self.focus.accrued_secs += 1;
        if self.focus.remaining_secs == 0 {
            self.finish_focus("focus session complete");
        }
    }

    /// Stop the focus session and flush the accrued time into the target
    /// item's `spent` tag in one write.
    pub fn finish_focus(&mut self, message: &str) {
        self.focus.running = false;
        let accrued = std::mem::take(&mut self.focus.accrued_secs);
        if accrued > 0
            && let Some(key) = self.focus.target
            && let Some(item) = self.pool.get_mut(key)
            && let Err(e) = item_ops::increment_time_spent(item, accrued)
        {
            self.status = Some(e.to_string());
            self.mode = Mode::Navigate;
            return;
        }
        self.status = Some(message.to_string());
        self.mode = Mode::Navigate;
    }
}

/// Scan the session's files, build the pool, and run the TUI until quit.
pub fn run(config: Config, cwd: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let files = gather_files(&config, cwd);
    let mut pool = Pool::new();
    scan_into(&mut pool, &files);

    let mut app = App::new(pool, config, SmallRng::from_entropy());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if last_tick.elapsed() >= Duration::from_secs(1) {
            last_tick = Instant::now();
            app.on_tick();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::Status;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn app_with(lines: &[&str]) -> App {
        let mut pool = Pool::new();
        for (i, line) in lines.iter().enumerate() {
            pool.insert(PathBuf::from("/nonexistent/t.md"), i + 1, line.to_string());
        }
        App::new(pool, Config::default(), SmallRng::seed_from_u64(1))
    }

    #[test]
    fn test_mutate_with_empty_selection_is_a_nop() {
        let mut app = app_with(&[]);
        app.mutate_current(|item| item_ops::set_status(item, Status::Checked));
        assert!(app.status.is_some());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_failed_op_surfaces_in_status() {
        // pool points at a file that does not exist, so persisting fails
        let mut app = app_with(&["[ ] ghost"]);
        app.mutate_current(|item| item_ops::set_status(item, Status::Checked));
        assert!(app.status.as_deref().unwrap_or("").contains("/nonexistent"));
        // the in-memory item is unchanged
        assert_eq!(app.pool.get(0).unwrap().status(), Status::Open);
    }

    #[test]
    fn test_nag_gate_at_five_visible_items() {
        let mut app = app_with(&["[ ] a", "[ ] b", "[ ] c", "[ ] d", "[ ] e"]);
        app.try_create_item();
        assert_eq!(app.mode, Mode::Nag);
        let nag = app.nag.as_ref().unwrap();
        assert_eq!(nag.challenge.len(), fib_backoff(1) as usize);
        assert!(nag.challenge.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_create_item_below_gate_appends_and_edits() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&[]);
        app.config.write_to = dir.path().to_path_buf();

        app.try_create_item();

        assert_eq!(app.mode, Mode::Edit);
        assert_eq!(app.pool.len(), 1);
        let item = app.current_item().unwrap();
        assert_eq!(item.raw(), "[ ] ");
        assert!(fs::read_to_string(item.file()).unwrap().contains("[ ] "));
    }

    #[test]
    fn test_focus_tick_counts_down_and_completes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.md");
        fs::write(&path, "[@] deep work\n").unwrap();
        let mut pool = Pool::new();
        pool.insert(path.clone(), 1, "[@] deep work".to_string());
        let mut app = App::new(pool, Config::default(), SmallRng::seed_from_u64(1));

        app.enter_focus();
        app.focus.running = true;
        app.focus.remaining_secs = 2;
        app.focus.total_secs = 2;

        app.on_tick();
        assert_eq!(app.focus.remaining_secs, 1);
        assert_eq!(app.mode, Mode::Focus);

        app.on_tick();
        assert_eq!(app.mode, Mode::Navigate);
        assert!(!app.focus.running);
        let spent = fs::read_to_string(&path).unwrap();
        assert!(spent.contains("#spent=0.03"), "{spent}");
    }
}
