//! Line grammar of `.mpdmeta` files
//!
//! One `key: value` directive per line. Blank lines and `#` comments are
//! skipped, keys match case-insensitively, values are taken verbatim after
//! whitespace stripping. There is no quoting or escaping.

const COMMENT: char = '#';
const SEPARATOR: char = ':';

/// Keys with a defined meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    TargetUri,
    Genre,
    Title,
    Duration,
    Category,
    Country,
}

impl Field {
    const ALL: [Field; 6] = [
        Self::TargetUri,
        Self::Genre,
        Self::Title,
        Self::Duration,
        Self::Category,
        Self::Country,
    ];

    /// Key as written in files (lowercase)
    pub fn key(&self) -> &'static str {
        match self {
            Self::TargetUri => "target_uri",
            Self::Genre => "genre",
            Self::Title => "title",
            Self::Duration => "duration",
            Self::Category => "category",
            Self::Country => "country",
        }
    }

    /// Match a stripped key, ignoring ASCII case
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(key))
    }
}

/// Split one line into a stripped `(key, value)` pair
///
/// Returns `None` for blank lines and comments. A line without a colon
/// yields the whole stripped line as key and an empty value.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT) {
        return None;
    }

    match trimmed.split_once(SEPARATOR) {
        Some((key, value)) => Some((key.trim(), value.trim())),
        None => Some((trimmed, "")),
    }
}

/// Permissive integer parse of a duration value
///
/// Leading whitespace and an optional sign are accepted, then the longest
/// run of decimal digits is used and anything after it ignored. Negative
/// values clamp to zero and overflow saturates. `None` when no digit is
/// present at all.
pub fn parse_duration(value: &str) -> Option<u64> {
    let s = value.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    if negative {
        return Some(0);
    }

    let parsed = digits[..end].bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    });
    Some(parsed)
}
