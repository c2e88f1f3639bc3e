use chrono::{Duration, Local};

use crate::io::line_io::{PersistError, rewrite_line};
use crate::model::item::{Item, Status};
use crate::model::tag::{Tag, find_tag, parse_tags};
use crate::parse::shorthand::expand_shorthands;

/// Error type for item mutations
#[derive(Debug, thiserror::Error)]
pub enum OpError {
    #[error("item already has priority 0")]
    AlreadyCalm,
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Snooze backoff: maps the snooze count to a number of days. Pluggable so
/// callers can tune the growth curve; the default grows like Fibonacci.
pub type BackoffFn = fn(u32) -> u32;

/// Default backoff: 0, 1, 2, 3, 5, 8, 13, ...
pub fn fib_backoff(n: u32) -> u32 {
    match n {
        0 => 0,
        1 => 1,
        _ => {
            let (mut a, mut b) = (1u32, 2u32);
            for _ in 2..n {
                let next = a.saturating_add(b);
                a = b;
                b = next;
            }
            b
        }
    }
}

/// Write `status` + `text` back to the item's source line, keeping the
/// original scrap (whitespace/bullet/comment prefix) intact. The in-memory
/// raw line is only updated after the disk write succeeds.
fn persist(item: &mut Item, status: Status, text: &str) -> Result<(), OpError> {
    let new_raw = format!("{}{} {}", item.scrap(), status.marker(), text);
    rewrite_line(item.file(), item.line(), item.raw(), &new_raw)?;
    item.set_raw(new_raw);
    Ok(())
}

/// Replace the item's body text, expanding date shorthands first.
pub fn set_text(item: &mut Item, text: &str) -> Result<(), OpError> {
    let text = expand_shorthands(text);
    persist(item, item.status(), &text)
}

/// Change the item's status marker.
///
/// Checking off an item that carries a `repeat` tag does not mark it done:
/// it is pushed into the future instead, with `active` moved past the repeat
/// interval and `lastDone` stamped today.
pub fn set_status(item: &mut Item, status: Status) -> Result<(), OpError> {
    if status == Status::Checked
        && let Some(repeat) = item.repeat()
    {
        let today = Local::now().date_naive();
        let next = (Local::now() + repeat).date_naive();
        let text = apply_tag(item.text(), &Tag::new("active", next.format("%Y-%m-%d").to_string()));
        let text = apply_tag(&text, &Tag::new("lastDone", today.format("%Y-%m-%d").to_string()));
        return set_text(item, &text);
    }

    let text = item.text().to_string();
    persist(item, status, &text)
}

/// Bump importance by prefixing one `!` (with a space for readability when
/// the text does not already lead with one).
pub fn escalate(item: &mut Item) -> Result<(), OpError> {
    let text = item.text().to_string();
    if text.is_empty() {
        set_text(item, "!")
    } else if text.starts_with('!') {
        set_text(item, &format!("!{text}"))
    } else {
        set_text(item, &format!("! {text}"))
    }
}

/// Remove one leading `!`.
///
/// Known limitation kept from the original: text that interleaves periods
/// with exclamations (`..!!! do this`) is not deescalated.
pub fn deescalate(item: &mut Item) -> Result<(), OpError> {
    let text = item.text().to_string();
    if let Some(rest) = text.strip_prefix("!!") {
        set_text(item, &format!("!{rest}"))
    } else if let Some(rest) = text.strip_prefix("! ") {
        set_text(item, rest)
    } else {
        Err(OpError::AlreadyCalm)
    }
}

/// Defer the item: increment its `zzz` counter and move `active` out by
/// `backoff(count)` days. Both tags land in a single write, so the
/// optimistic line check covers the whole mutation.
pub fn snooze(item: &mut Item, backoff: BackoffFn) -> Result<(), OpError> {
    let tags = item.tags();
    let count = find_tag(&tags, "zzz")
        .and_then(|t| t.value.as_deref())
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(0)
        + 1;

    let until = Local::now().date_naive() + Duration::days(i64::from(backoff(count)));
    let text = apply_tag(
        item.text(),
        &Tag::new("active", until.format("%Y-%m-%d").to_string()),
    );
    let text = apply_tag(&text, &Tag::new("zzz", count.to_string()));
    set_text(item, &text)
}

/// Accumulate focus-session time into the `spent` tag (minutes, two
/// decimals).
pub fn increment_time_spent(item: &mut Item, seconds: u64) -> Result<(), OpError> {
    let tags = item.tags();
    let previous: f64 = find_tag(&tags, "spent")
        .and_then(|t| t.value.as_deref())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0.0);

    let minutes = previous + seconds as f64 / 60.0;
    let text = apply_tag(item.text(), &Tag::new("spent", format!("{minutes:.2}")));
    set_text(item, &text)
}

/// Replace the serialized form of an existing same-named tag inside `text`,
/// or append the tag at the end.
fn apply_tag(text: &str, tag: &Tag) -> String {
    let tags = parse_tags(text);
    match find_tag(&tags, &tag.name) {
        Some(existing) => text.replacen(&existing.to_string(), &tag.to_string(), 1),
        None => format!("{text} #{tag}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fixture(dir: &TempDir, content: &str) -> (PathBuf, Item) {
        let path = dir.path().join("items.md");
        fs::write(&path, content).unwrap();
        let raw = content.lines().next().unwrap().to_string();
        (path.clone(), Item::new(0, path, 1, raw))
    }

    fn today_iso() -> String {
        Local::now().date_naive().format("%Y-%m-%d").to_string()
    }

    #[test]
    fn test_set_status_rewrites_marker_and_keeps_scrap() {
        let dir = TempDir::new().unwrap();
        let (path, mut item) = fixture(&dir, "  - [ ] water plants\n");

        set_status(&mut item, Status::Checked).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "  - [x] water plants\n"
        );
        assert_eq!(item.status(), Status::Checked);
    }

    #[test]
    fn test_checking_repeating_item_resets_into_future() {
        let dir = TempDir::new().unwrap();
        let (path, mut item) = fixture(&dir, "[ ] water plants #repeat=1w\n");

        set_status(&mut item, Status::Checked).unwrap();

        let next = (Local::now() + Duration::days(7))
            .date_naive()
            .format("%Y-%m-%d");
        let expected = format!(
            "[ ] water plants #repeat=1w #active={next} #lastDone={}\n",
            today_iso()
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
        // still open, just pushed into the future
        assert_eq!(item.status(), Status::Open);
        assert!(!item.active());
    }

    #[test]
    fn test_set_text_expands_shorthands() {
        let dir = TempDir::new().unwrap();
        let (path, mut item) = fixture(&dir, "[ ] old text\n");

        set_text(&mut item, "new text d7d").unwrap();

        let due = (Local::now().date_naive() + Duration::days(7)).format("%Y-%m-%d");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("[ ] new text #due={due}\n")
        );
    }

    #[test]
    fn test_escalate_and_deescalate() {
        let dir = TempDir::new().unwrap();
        let (_, mut item) = fixture(&dir, "[ ] plain\n");

        escalate(&mut item).unwrap();
        assert_eq!(item.text(), "! plain");
        escalate(&mut item).unwrap();
        assert_eq!(item.text(), "!! plain");
        assert_eq!(item.importance(), 2);

        deescalate(&mut item).unwrap();
        assert_eq!(item.text(), "! plain");
        deescalate(&mut item).unwrap();
        assert_eq!(item.text(), "plain");
        assert!(matches!(deescalate(&mut item), Err(OpError::AlreadyCalm)));
    }

    #[test]
    fn test_snooze_increments_counter_and_defers() {
        let dir = TempDir::new().unwrap();
        let (_, mut item) = fixture(&dir, "[ ] later #zzz=2\n");

        snooze(&mut item, fib_backoff).unwrap();

        let tags = item.tags();
        assert_eq!(find_tag(&tags, "zzz").unwrap().value.as_deref(), Some("3"));
        let until = Local::now().date_naive() + Duration::days(i64::from(fib_backoff(3)));
        assert_eq!(
            find_tag(&tags, "active").unwrap().date(),
            Some(until)
        );
    }

    #[test]
    fn test_backoff_grows_monotonically() {
        assert_eq!(fib_backoff(0), 0);
        assert_eq!(fib_backoff(1), 1);
        assert_eq!(fib_backoff(2), 2);
        assert_eq!(fib_backoff(3), 3);
        assert_eq!(fib_backoff(4), 5);
        assert_eq!(fib_backoff(5), 8);
        for n in 1..20 {
            assert!(fib_backoff(n + 1) >= fib_backoff(n));
        }
    }

    #[test]
    fn test_increment_time_spent_accumulates_minutes() {
        let dir = TempDir::new().unwrap();
        let (_, mut item) = fixture(&dir, "[@] deep work\n");

        increment_time_spent(&mut item, 90).unwrap();
        assert!(item.text().ends_with("#spent=1.50"), "{}", item.text());

        increment_time_spent(&mut item, 30).unwrap();
        assert!(item.text().ends_with("#spent=2.00"), "{}", item.text());
    }

    #[test]
    fn test_stale_item_reports_conflict_and_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let (path, mut item) = fixture(&dir, "[ ] original\n");

        // someone else edits the file behind our back
        fs::write(&path, "[ ] edited elsewhere\n").unwrap();

        let err = set_status(&mut item, Status::Checked).unwrap_err();
        assert!(matches!(
            err,
            OpError::Persist(PersistError::Conflict { .. })
        ));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[ ] edited elsewhere\n"
        );
        assert_eq!(item.raw(), "[ ] original");
    }
}
