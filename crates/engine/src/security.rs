//! Sanitization and detection primitives used by the validators.
//!
//! `sanitize_input` is lossy on purpose: markup and script hooks are removed,
//! not escaped. `contains_malicious_code` runs on the sanitized value, so
//! anything it still finds survived sanitization.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::{Regex, RegexSet};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("hardcoded regex should be valid"));

static SCRIPT_HOOKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:javascript|vbscript)\s*:|\bon[a-z]+\s*=")
        .expect("hardcoded regex should be valid")
});

static MALICIOUS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)<\s*/?\s*(?:script|iframe|object|embed)",
        r"(?i)(?:javascript|vbscript)\s*:",
        r"(?i)\bon[a-z]+\s*=",
        r"(?i)\beval\s*\(",
        r"(?i)\bexpression\s*\(",
        r"(?i)data\s*:\s*text/html",
        r"(?i)\bunion\s+(?:all\s+)?select\b",
        r"(?i);\s*(?:drop|delete|truncate)\s+table\b",
    ])
    .expect("hardcoded regex should be valid")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hardcoded regex should be valid")
});

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Normalizes and strips markup from free text typed by the user.
pub fn sanitize_input(value: &str) -> String {
    let normalized: String = value
        .nfkc()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect();
    let without_tags = TAG.replace_all(&normalized, "");
    let without_brackets: String = without_tags
        .chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .collect();
    SCRIPT_HOOKS
        .replace_all(&without_brackets, "")
        .trim()
        .to_string()
}

pub fn contains_malicious_code(value: &str) -> bool {
    MALICIOUS.is_match(value)
}

pub fn validate_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

/// Parses a decimal number, accepting `,` as decimal separator.
pub fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

pub fn validate_numeric_value(value: &str) -> bool {
    parse_decimal(value).is_some()
}

/// Parses a date or date-time string.
///
/// Plain dates resolve to midnight. RFC 3339 timestamps keep their local
/// wall-clock time and drop the offset.
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

pub fn validate_date(value: &str) -> bool {
    parse_date_time(value).is_some()
}

/// Mints an opaque identifier such as `pag_3f2a…`.
pub fn generate_secure_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}
