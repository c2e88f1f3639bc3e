use std::fmt;

use chrono::NaiveDate;

/// A `#name` or `#name=value` token embedded in item text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// Everything after the first `=`; values may themselves contain `=`.
    pub value: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn bare(name: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            value: None,
        }
    }

    /// Parse a tag token with its `#` already stripped.
    pub fn parse(token: &str) -> Self {
        match token.split_once('=') {
            Some((name, value)) => Tag {
                name: name.to_string(),
                value: Some(value.to_string()),
            },
            None => Tag::bare(token),
        }
    }

    /// The tag's value read as an ISO `YYYY-MM-DD` date. Malformed dates are
    /// an absent value, never a placeholder date.
    pub fn date(&self) -> Option<NaiveDate> {
        let value = self.value.as_deref()?;
        NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.as_deref() {
            Some(v) if !v.is_empty() => write!(f, "{}={}", self.name, v),
            _ => write!(f, "{}", self.name),
        }
    }
}

/// Parse every `#`-prefixed token in `text` into tags, in document order.
/// Duplicate names are kept, not merged.
pub fn parse_tags(text: &str) -> Vec<Tag> {
    text.split(' ')
        .filter(|token| token.starts_with('#') && token.len() > 1)
        .map(|token| Tag::parse(&token[1..]))
        .collect()
}

/// Look up a tag by name. When a name appears more than once, the last
/// occurrence in document order wins.
pub fn find_tag<'a>(tags: &'a [Tag], name: &str) -> Option<&'a Tag> {
    tags.iter().rfind(|t| t.name == name)
}
