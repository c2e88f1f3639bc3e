use crate::model::item::Status;

/// Left-prepare a raw source line for item parsing.
///
/// Strips leading whitespace, one markdown bullet (`- `), and everything up
/// to and including the first inline comment marker (`// `), so items inside
/// go/c/java-style comments are recognized. The result is always a suffix of
/// `raw`.
pub fn trim(raw: &str) -> &str {
    let mut trimmed = raw.trim_start_matches([' ', '\t']);

    if let Some(rest) = trimmed.strip_prefix("- ") {
        trimmed = rest;
    }

    // Only the leading occurrence begins a comment; later ones are content.
    if let Some(idx) = trimmed.find("// ") {
        trimmed = &trimmed[idx + 3..];
    }

    trimmed
}

/// The prefix that `trim` removed: whitespace, bullet, comment marker.
/// `scrap(raw) + trim(raw)` reassembles the original line exactly.
pub fn scrap(raw: &str) -> &str {
    &raw[..raw.len() - trim(raw).len()]
}

/// Whether a raw line encodes an item: after trimming it must start with one
/// of the four recognized 3-character status markers. `[?]` is an internal
/// fallback and never classifies.
pub fn is_item(raw: &str) -> bool {
    Status::from_marker(trim(raw)) != Status::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_plain() {
        assert_eq!(trim("[ ] water the plants"), "[ ] water the plants");
    }

    #[test]
    fn test_trim_whitespace_and_bullet() {
        assert_eq!(trim("  \t- [x] done thing"), "[x] done thing");
    }

    #[test]
    fn test_trim_inline_comment() {
        assert_eq!(trim("    let x = 1; // [ ] rename x"), "[ ] rename x");
        // only the first marker opens the comment
        assert_eq!(trim("// [ ] keep // this"), "[ ] keep // this");
    }

    #[test]
    fn test_scrap_roundtrip() {
        for raw in [
            "[ ] bare",
            "   [@] indented",
            "\t- [~] bulleted tab",
            "code(); // [x] commented",
            "  - [ ] both #tag",
        ] {
            assert_eq!(format!("{}{}", scrap(raw), trim(raw)), raw);
        }
    }

    #[test]
    fn test_is_item() {
        assert!(is_item("[ ] open"));
        assert!(is_item("[@] ongoing"));
        assert!(is_item("[x] checked"));
        assert!(is_item("[X] checked loud"));
        assert!(is_item("[~] obsolete"));
        assert!(is_item("  - [ ] bulleted"));
        assert!(!is_item("[?] unknown is never classified"));
        assert!(!is_item("[] too short"));
        assert!(!is_item("plain prose"));
        assert!(!is_item(""));
    }
}
