use std::cmp::Reverse;

use chrono::{Local, NaiveDate};

use crate::model::item::{Item, ItemKey, Pool, Status};
use crate::model::tag::parse_tags;

/// Which side of the tab bar is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Open/ongoing items that are currently active (not snoozed).
    Todo,
    /// Checked/obsolete items; snoozing is ignored here.
    Done,
}

impl ViewKind {
    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Todo => "todo",
            ViewKind::Done => "done",
        }
    }
}

/// The filtered, sorted, currently displayable subsequence of the pool.
///
/// Owns only keys into the pool, never item handles, and is rebuilt
/// wholesale whenever the pool, view, or filter text changes.
#[derive(Debug)]
pub struct Selection {
    pub view: ViewKind,
    pub filter: String,
    keys: Vec<ItemKey>,
    cursor: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            view: ViewKind::Todo,
            filter: String::new(),
            keys: Vec::new(),
            cursor: 0,
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Re-derive the displayable key sequence from the pool. The cursor is
    /// re-clamped so it stays valid across rebuilds.
    pub fn rebuild(&mut self, pool: &Pool) {
        self.rebuild_on(pool, Local::now().date_naive());
    }

    pub fn rebuild_on(&mut self, pool: &Pool, today: NaiveDate) {
        self.keys = pool
            .iter()
            .filter(|item| match self.view {
                ViewKind::Todo => {
                    matches!(item.status(), Status::Open | Status::Ongoing)
                        && item.active_on(today)
                }
                ViewKind::Done => {
                    matches!(item.status(), Status::Checked | Status::Obsolete)
                }
            })
            .filter(|item| self.passes_filter(item))
            .map(Item::key)
            .collect();

        // importance first; an absent due date outranks any present one
        self.keys.sort_by_key(|&key| {
            let item = pool.get(key).expect("selection key in pool");
            (Reverse(item.importance()), item.due())
        });

        self.clamp_cursor();
    }

    /// Live-typed filter: an item survives iff any of its tag names has any
    /// filter-tag name as a prefix. (Prefix matching applies even to tags
    /// the user has finished typing.)
    fn passes_filter(&self, item: &Item) -> bool {
        let filter_tags = parse_tags(&self.filter);
        if filter_tags.is_empty() {
            return true;
        }
        let item_tags = item.tags();
        item_tags
            .iter()
            .any(|it| filter_tags.iter().any(|ft| it.name.starts_with(&ft.name)))
    }

    pub fn keys(&self) -> &[ItemKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The key under the cursor, or `None` when nothing is displayable.
    pub fn current(&self) -> Option<ItemKey> {
        self.keys.get(self.cursor).copied()
    }

    /// Cursor position, only meaningful while the selection is non-empty.
    pub fn cursor(&self) -> Option<usize> {
        if self.keys.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
        self.clamp_cursor();
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let cursor = self.cursor as isize + delta;
        self.cursor = cursor.max(0) as usize;
        self.clamp_cursor();
    }

    /// Put the cursor back on a specific item, e.g. after a mutation moved
    /// it within the sort order.
    pub fn focus_key(&mut self, key: ItemKey) {
        if let Some(idx) = self.keys.iter().position(|&k| k == key) {
            self.cursor = idx;
        }
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            ViewKind::Todo => ViewKind::Done,
            ViewKind::Done => ViewKind::Todo,
        };
    }

    fn clamp_cursor(&mut self) {
        if self.keys.is_empty() {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(self.keys.len() - 1);
        }
    }
}
