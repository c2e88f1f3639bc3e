use std::sync::OnceLock;

use chrono::{Duration, Local, Months, NaiveDate};
use regex::Regex;

/// Matches compact edit-time tokens: one lead character (repeat / estimate /
/// activate / due), digits, one unit character.
fn shorthand_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[read][0-9]+[hdwmyM]").unwrap())
}

/// Expand all date shorthands in user-entered item text into canonical tags,
/// in a single pass, before the text is persisted.
///
/// - `r1w`  -> `#repeat=1w` (duration kept verbatim)
/// - `e25m` -> `#estimate=25m` (duration kept verbatim)
/// - `a5w`  -> `#active=<ISO date 5 weeks from now>`
/// - `d7d`  -> `#due=<ISO date 7 days from now>`
pub fn expand_shorthands(text: &str) -> String {
    shorthand_re()
        .replace_all(text, |caps: &regex::Captures| {
            expand_token(caps.get(0).map_or("", |m| m.as_str()))
        })
        .into_owned()
}

fn expand_token(token: &str) -> String {
    let dur = &token[1..];

    match token.as_bytes()[0] {
        b'r' => format!("#repeat={dur}"),
        b'e' => format!("#estimate={dur}"),
        b'a' => match date_after(dur) {
            Some(d) => format!("#active={}", d.format("%Y-%m-%d")),
            None => token.to_string(),
        },
        b'd' => match date_after(dur) {
            Some(d) => format!("#due={}", d.format("%Y-%m-%d")),
            None => token.to_string(),
        },
        _ => token.to_string(),
    }
}

/// The date a shorthand duration lands on, counted from now.
///
/// Unit table: `m` minutes, `h` hours, `d` days, `w` weeks, `M` calendar
/// months, `y` calendar years. Note that `m` means *minutes* here but means
/// roughly a *month* in [`parse_repeat`]; the two tables disagree on purpose
/// so existing `#repeat=1m` tags keep their meaning.
pub fn date_after(dur: &str) -> Option<NaiveDate> {
    if dur.len() < 2 {
        return None;
    }
    let num: i64 = dur[..dur.len() - 1].parse().ok()?;
    let now = Local::now();
    let today = now.date_naive();

    match dur.as_bytes()[dur.len() - 1] {
        b'm' => Some((now + Duration::minutes(num)).date_naive()),
        b'h' => Some((now + Duration::hours(num)).date_naive()),
        b'd' => Some(today + Duration::days(num)),
        b'w' => Some(today + Duration::days(num * 7)),
        b'M' => today.checked_add_months(Months::new(u32::try_from(num).ok()?)),
        b'y' => today.checked_add_months(Months::new(u32::try_from(num).ok()? * 12)),
        _ => None,
    }
}

/// Parse a shorthand duration tag value (as stored in `#repeat=`) into a
/// concrete duration.
///
/// Unit table: `h` hours, `d` days, `w` weeks, `m` calendar months, `y`
/// calendar years. `m` is *months* here, unlike [`date_after`] where it is
/// minutes. Month and year spans are measured from today, so their length
/// depends on the calendar.
pub fn parse_repeat(dur: &str) -> Option<Duration> {
    if dur.len() < 2 {
        return None;
    }
    let num: i64 = dur[..dur.len() - 1].parse().ok()?;
    let today = Local::now().date_naive();

    match dur.as_bytes()[dur.len() - 1] {
        b'h' => Some(Duration::hours(num)),
        b'd' => Some(Duration::days(num)),
        b'w' => Some(Duration::days(num * 7)),
        b'm' => {
            let then = today.checked_add_months(Months::new(u32::try_from(num).ok()?))?;
            Some(then - today)
        }
        b'y' => {
            let then = today.checked_add_months(Months::new(u32::try_from(num).ok()? * 12))?;
            Some(then - today)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_due_shorthand() {
        let expected = Local::now().date_naive() + Duration::days(7);
        assert_eq!(
            expand_shorthands("d7d"),
            format!("#due={}", expected.format("%Y-%m-%d"))
        );
    }

    #[test]
    fn test_expand_active_shorthand() {
        let expected = Local::now().date_naive() + Duration::days(14);
        assert_eq!(
            expand_shorthands("call dentist a2w"),
            format!("call dentist #active={}", expected.format("%Y-%m-%d"))
        );
    }

    #[test]
    fn test_repeat_and_estimate_kept_verbatim() {
        assert_eq!(
            expand_shorthands("water plants r1w e25m"),
            "water plants #repeat=1w #estimate=25m"
        );
    }

    #[test]
    fn test_all_matches_rewritten_in_one_pass() {
        let out = expand_shorthands("r2d plus d1d");
        assert!(out.starts_with("#repeat=2d plus #due="));
    }

    #[test]
    fn test_non_shorthand_text_untouched() {
        assert_eq!(expand_shorthands("read a book"), "read a book");
        assert_eq!(expand_shorthands("#due=2027-01-01"), "#due=2027-01-01");
    }

    #[test]
    fn test_parse_repeat_units() {
        assert_eq!(parse_repeat("16h"), Some(Duration::hours(16)));
        assert_eq!(parse_repeat("3d"), Some(Duration::days(3)));
        assert_eq!(parse_repeat("2w"), Some(Duration::days(14)));
        assert_eq!(parse_repeat(""), None);
        assert_eq!(parse_repeat("x"), None);
        assert_eq!(parse_repeat("5q"), None);
        // `m` spans whole calendar months
        let months = parse_repeat("1m").unwrap();
        assert!(months >= Duration::days(28) && months <= Duration::days(31));
    }

    #[test]
    fn test_date_after_minutes_stay_today() {
        // 1 minute from now is (almost always) still today; the same unit
        // character means a month in parse_repeat.
        let d = date_after("1m").unwrap();
        let today = Local::now().date_naive();
        assert!(d == today || d == today + Duration::days(1));
    }
}
