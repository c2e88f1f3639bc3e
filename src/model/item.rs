use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Duration, Local, NaiveDate};

use crate::model::tag::{Tag, find_tag, parse_tags};
use crate::parse::line::{scrap, trim};
use crate::parse::shorthand::parse_repeat;

/// Item checkbox state, derived from the 3-character status marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Open,
    Ongoing,
    Checked,
    Obsolete,
    Unknown,
}

impl Status {
    /// The 3-character marker written to disk.
    pub fn marker(self) -> &'static str {
        match self {
            Status::Open => "[ ]",
            Status::Ongoing => "[@]",
            Status::Checked => "[x]",
            Status::Obsolete => "[~]",
            Status::Unknown => "[?]",
        }
    }

    /// Classify a trimmed line by its first 3 characters. Anything that is
    /// not one of the four recognized markers is `Unknown`.
    pub fn from_marker(trimmed: &str) -> Status {
        match trimmed.get(..3) {
            Some("[ ]") => Status::Open,
            Some("[@]") => Status::Ongoing,
            Some("[x]") | Some("[X]") => Status::Checked,
            Some("[~]") => Status::Obsolete,
            _ => Status::Unknown,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Stable handle into the [`Pool`]. Engines pass keys around instead of
/// holding references into the pool.
pub type ItemKey = usize;

/// One recognized action line. Everything but the address is derived from
/// `raw` on demand, so display can never drift from the source of truth.
#[derive(Debug, Clone)]
pub struct Item {
    key: ItemKey,
    file: PathBuf,
    /// 1-based line number in `file`.
    line: usize,
    raw: String,
}

impl Item {
    pub fn new(key: ItemKey, file: PathBuf, line: usize, raw: String) -> Self {
        Item {
            key,
            file,
            line,
            raw,
        }
    }

    pub fn key(&self) -> ItemKey {
        self.key
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// The unmodified source line, including leading whitespace, bullet, or
    /// comment marker.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Replace the raw line after the persistence layer has written it.
    pub(crate) fn set_raw(&mut self, raw: String) {
        self.raw = raw;
    }

    pub fn location(&self) -> String {
        format!("{}:{}", self.file.display(), self.line)
    }

    fn trimmed(&self) -> &str {
        trim(&self.raw)
    }

    /// The prefix stripped by trimming; reattached verbatim on every write.
    pub fn scrap(&self) -> &str {
        scrap(&self.raw)
    }

    pub fn status(&self) -> Status {
        Status::from_marker(self.trimmed())
    }

    /// The item's body text: everything after the status marker and its
    /// trailing space. Lines too short, or with a multibyte character where
    /// the space belongs, have no body.
    pub fn text(&self) -> &str {
        self.trimmed().get(4..).unwrap_or("")
    }

    pub fn tags(&self) -> Vec<Tag> {
        parse_tags(self.text())
    }

    /// Count of leading `!` in the text; interspersed `.` are skipped, any
    /// other character ends the scan.
    pub fn importance(&self) -> u32 {
        let mut count = 0;
        for ch in self.text().chars() {
            match ch {
                '!' => count += 1,
                '.' => {}
                _ => break,
            }
        }
        count
    }

    /// Snoozed items carry an `active` tag with a future date and are hidden
    /// from the todo view until that date arrives. Items without the tag (or
    /// with an unreadable date) are active.
    pub fn active(&self) -> bool {
        self.active_on(Local::now().date_naive())
    }

    pub fn active_on(&self, today: NaiveDate) -> bool {
        match find_tag(&self.tags(), "active").and_then(Tag::date) {
            Some(date) => date <= today,
            None => true,
        }
    }

    pub fn due(&self) -> Option<NaiveDate> {
        find_tag(&self.tags(), "due").and_then(Tag::date)
    }

    /// Creation date from a `created` tag, falling back to the first
    /// ISO-date-shaped substring of the file path (e.g. `2026-08-27.tado`).
    pub fn created(&self) -> Option<NaiveDate> {
        if let Some(date) = find_tag(&self.tags(), "created").and_then(Tag::date) {
            return Some(date);
        }

        let path = self.file.to_string_lossy();
        let bytes = path.as_bytes();
        const ISO_LEN: usize = "2026-01-01".len();
        for start in 0..bytes.len().saturating_sub(ISO_LEN - 1) {
            if let Some(slice) = path.get(start..start + ISO_LEN)
                && let Ok(date) = NaiveDate::parse_from_str(slice, "%Y-%m-%d")
            {
                return Some(date);
            }
        }
        None
    }

    pub fn repeat(&self) -> Option<Duration> {
        let tags = self.tags();
        let tag = find_tag(&tags, "repeat")?;
        parse_repeat(tag.value.as_deref()?)
    }

    /// Marker plus body text, as shown in the list. Open items that are
    /// currently snoozed display a `[z]` marker instead of `[ ]`.
    pub fn display_label(&self) -> String {
        if self.status() == Status::Open && !self.active() {
            format!("[z] {}", self.text())
        } else {
            self.trimmed().to_string()
        }
    }
}

/// Owner of all items for a session. Engines address items through keys;
/// the pool hands out the only mutable access.
#[derive(Debug, Default)]
pub struct Pool {
    items: Vec<Item>,
}

impl Pool {
    pub fn new() -> Self {
        Pool::default()
    }

    pub fn insert(&mut self, file: PathBuf, line: usize, raw: String) -> ItemKey {
        let key = self.items.len();
        self.items.push(Item::new(key, file, line, raw));
        key
    }

    pub fn get(&self, key: ItemKey) -> Option<&Item> {
        self.items.get(key)
    }

    pub fn get_mut(&mut self, key: ItemKey) -> Option<&mut Item> {
        self.items.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(raw: &str) -> Item {
        Item::new(0, PathBuf::from("notes.md"), 1, raw.to_string())
    }

    #[test]
    fn test_status_from_marker() {
        assert_eq!(item("[ ] a").status(), Status::Open);
        assert_eq!(item("[@] a").status(), Status::Ongoing);
        assert_eq!(item("[x] a").status(), Status::Checked);
        assert_eq!(item("[X] a").status(), Status::Checked);
        assert_eq!(item("[~] a").status(), Status::Obsolete);
        assert_eq!(item("[!] a").status(), Status::Unknown);
        assert_eq!(item("[").status(), Status::Unknown);
    }

    #[test]
    fn test_text_strips_marker() {
        assert_eq!(item("[ ] water the plants").text(), "water the plants");
        assert_eq!(item("  - [x] done").text(), "done");
        assert_eq!(item("[ ]").text(), "");
    }

    #[test]
    fn test_multibyte_after_marker_has_no_body() {
        // the marker alone classifies, so the 4th byte can be anything,
        // including the middle of a multibyte character
        let odd = item("[x]\u{2026}ship it");
        assert_eq!(odd.status(), Status::Checked);
        assert_eq!(odd.text(), "");
        assert_eq!(odd.importance(), 0);
        assert!(odd.tags().is_empty());
    }

    #[test]
    fn test_importance() {
        assert_eq!(item("[ ] !!! x").importance(), 3);
        assert_eq!(item("[ ] ..!!! x").importance(), 3);
        assert_eq!(item("[ ] plain").importance(), 0);
        assert_eq!(item("[ ] .!.!x!").importance(), 2);
    }

    #[test]
    fn test_active_with_dates() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        assert!(item("[ ] no tag").active_on(today));
        assert!(item("[ ] past #active=2026-08-01").active_on(today));
        assert!(item("[ ] today #active=2026-08-27").active_on(today));
        assert!(!item("[ ] future #active=2026-09-27").active_on(today));
        // unreadable date means the item stays visible
        assert!(item("[ ] bad #active=whenever").active_on(today));
    }

    #[test]
    fn test_created_falls_back_to_path() {
        let i = Item::new(
            0,
            PathBuf::from("journal/2026-05-04.tado"),
            3,
            "[ ] x".to_string(),
        );
        assert_eq!(i.created(), NaiveDate::from_ymd_opt(2026, 5, 4));

        let tagged = item("[ ] x #created=2025-01-31");
        assert_eq!(tagged.created(), NaiveDate::from_ymd_opt(2025, 1, 31));

        assert_eq!(item("[ ] undated").created(), None);
    }

    #[test]
    fn test_repeat_duration() {
        assert_eq!(item("[ ] water #repeat=1w").repeat(), Some(Duration::days(7)));
        assert_eq!(item("[ ] no repeat").repeat(), None);
        assert_eq!(item("[ ] bad #repeat=soon").repeat(), None);
    }

    #[test]
    fn test_display_label_snoozed() {
        assert_eq!(
            item("[ ] nap #active=2999-01-01").display_label(),
            "[z] nap #active=2999-01-01"
        );
        assert_eq!(item("[x] done").display_label(), "[x] done");
    }

    #[test]
    fn test_pool_keys_are_stable() {
        let mut pool = Pool::new();
        let a = pool.insert(PathBuf::from("a.md"), 1, "[ ] a".into());
        let b = pool.insert(PathBuf::from("b.md"), 9, "[x] b".into());
        assert_ne!(a, b);
        assert_eq!(pool.get(a).unwrap().text(), "a");
        assert_eq!(pool.get(b).unwrap().line(), 9);
        assert!(pool.get(99).is_none());
    }
}
