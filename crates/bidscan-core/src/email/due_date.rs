//! Bid due date detection in email text.
//!
//! Label patterns are tried in order; the first one that matches (in the body,
//! then the subject) decides. Its captured date is parsed against each layout
//! in order and the first that fits wins. No match, or no layout fitting,
//! leaves the date unset.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static DUE_DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    const DATE: &str = r"(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})";
    [
        r"due(?:\s+(?:date|by))?\s*:?\s*",
        r"bid(?:\s+(?:date|by))?\s*:?\s*",
        r"deadline\s*:?\s*",
    ]
    .iter()
    .map(|label| Regex::new(&format!("(?i){label}{DATE}")).unwrap())
    .collect()
});

/// A chrono format plus the number of year digits it accepts.
struct DateLayout {
    format: &'static str,
    year_digits: usize,
}

const DATE_LAYOUTS: &[DateLayout] = &[
    DateLayout { format: "%m/%d/%Y", year_digits: 4 },
    DateLayout { format: "%m-%d-%Y", year_digits: 4 },
    DateLayout { format: "%m/%d/%y", year_digits: 2 },
    DateLayout { format: "%m-%d-%y", year_digits: 2 },
];

/// Find the bid due date in an email body, falling back to its subject.
pub fn extract_due_date(body: &str, subject: &str) -> Option<NaiveDate> {
    for pattern in DUE_DATE_PATTERNS.iter() {
        let caps = pattern
            .captures(body)
            .or_else(|| pattern.captures(subject));
        if let Some(caps) = caps {
            let date = parse_date(&caps[1]);
            debug!(candidate = &caps[1], ?date, "due date candidate");
            return date;
        }
    }
    None
}

/// Parse a month-first date with a four- or two-digit year.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let year_len = s
        .rsplit(|c: char| c == '/' || c == '-')
        .next()
        .map(str::len)
        .unwrap_or_default();

    DATE_LAYOUTS
        .iter()
        .filter(|layout| layout.year_digits == year_len)
        .find_map(|layout| NaiveDate::parse_from_str(s, layout.format).ok())
}
