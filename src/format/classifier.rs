//! Format detectors

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};
use url::Url;

/// Detected string subtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringFormat {
    /// Calendar date (YYYY-MM-DD)
    Date,
    /// RFC 3339 timestamp
    DateTime,
    /// Dotted-quad IPv4 address
    Ipv4,
    /// IPv6 address
    Ipv6,
    /// Email address
    Email,
    /// Network URL with a host
    Url,
    /// Absolute URI of any scheme
    Uri,
    /// Relative reference
    UriReference,
    /// RFC 6901 JSON pointer
    JsonPointer,
    /// Relative JSON pointer
    RelativeJsonPointer,
    /// Regular expression
    Regex,
    /// "true"/"false" carried as a string
    BooleanLiteral,
}

impl StringFormat {
    /// Detection order; the first match wins
    pub const PRIORITY: [StringFormat; 12] = [
        StringFormat::Date,
        StringFormat::DateTime,
        StringFormat::Ipv4,
        StringFormat::Ipv6,
        StringFormat::Email,
        StringFormat::Url,
        StringFormat::Uri,
        StringFormat::UriReference,
        StringFormat::JsonPointer,
        StringFormat::RelativeJsonPointer,
        StringFormat::Regex,
        StringFormat::BooleanLiteral,
    ];

    /// Value written into a schema's `format` keyword
    pub fn as_schema_format(&self) -> Option<&'static str> {
        match self {
            StringFormat::Date => Some("date"),
            StringFormat::DateTime => Some("date-time"),
            StringFormat::Ipv4 => Some("ipv4"),
            StringFormat::Ipv6 => Some("ipv6"),
            StringFormat::Email => Some("email"),
            StringFormat::Uri => Some("uri"),
            StringFormat::UriReference => Some("uri-reference"),
            StringFormat::JsonPointer => Some("json-pointer"),
            StringFormat::RelativeJsonPointer => Some("relative-json-pointer"),
            StringFormat::Regex => Some("regex"),
            // web URLs and booleans-as-strings stay plain strings
            StringFormat::Url | StringFormat::BooleanLiteral => None,
        }
    }

    fn matches(self, value: &str) -> bool {
        match self {
            StringFormat::Date => is_date(value),
            StringFormat::DateTime => is_date_time(value),
            StringFormat::Ipv4 => value.parse::<Ipv4Addr>().is_ok(),
            StringFormat::Ipv6 => value.parse::<Ipv6Addr>().is_ok(),
            StringFormat::Email => EMAIL_REGEX.is_match(value),
            StringFormat::Url => is_url(value),
            StringFormat::Uri => is_uri(value),
            StringFormat::UriReference => is_uri_reference(value),
            StringFormat::JsonPointer => JSON_POINTER_REGEX.is_match(value),
            StringFormat::RelativeJsonPointer => RELATIVE_JSON_POINTER_REGEX.is_match(value),
            StringFormat::Regex => is_regex(value),
            StringFormat::BooleanLiteral => is_boolean_literal(value),
        }
    }
}

impl std::fmt::Display for StringFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StringFormat::Date => write!(f, "date"),
            StringFormat::DateTime => write!(f, "date-time"),
            StringFormat::Ipv4 => write!(f, "ipv4"),
            StringFormat::Ipv6 => write!(f, "ipv6"),
            StringFormat::Email => write!(f, "email"),
            StringFormat::Url => write!(f, "url"),
            StringFormat::Uri => write!(f, "uri"),
            StringFormat::UriReference => write!(f, "uri-reference"),
            StringFormat::JsonPointer => write!(f, "json-pointer"),
            StringFormat::RelativeJsonPointer => write!(f, "relative-json-pointer"),
            StringFormat::Regex => write!(f, "regex"),
            StringFormat::BooleanLiteral => write!(f, "boolean"),
        }
    }
}

/// Classify a string value.
///
/// Returns the detected subtype and whether any detector matched.
pub fn classify(value: &str) -> (Option<StringFormat>, bool) {
    match StringFormat::PRIORITY
        .into_iter()
        .find(|format| format.matches(value))
    {
        Some(format) => (Some(format), true),
        None => (None, false),
    }
}

// Regex patterns for format detection
static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static JSON_POINTER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/([^~/]|~[01])*)+$").unwrap());

static RELATIVE_JSON_POINTER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0|[1-9][0-9]*)(#|(/([^~/]|~[01])*)+)$").unwrap());

static REFERENCE_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("http://reference.invalid/").unwrap());

fn is_date(s: &str) -> bool {
    DATE_REGEX.is_match(s) && chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn is_date_time(s: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(s).is_ok()
        || chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
}

fn is_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https" | "ftp" | "ws" | "wss") && url.has_host()
    })
}

fn is_uri(s: &str) -> bool {
    !s.contains(char::is_whitespace) && Url::parse(s).is_ok()
}

fn is_uri_reference(s: &str) -> bool {
    let looks_relative = s.starts_with('/')
        || s.starts_with("./")
        || s.starts_with("../")
        || s.starts_with('?')
        || s.starts_with('#');
    looks_relative && !s.contains(char::is_whitespace) && REFERENCE_BASE.join(s).is_ok()
}

fn is_regex(s: &str) -> bool {
    let has_pattern_syntax = s.starts_with('^')
        || (s.ends_with('$') && s.len() > 1)
        || s.contains('\\')
        || s.contains(".*")
        || s.contains(".+")
        || (s.contains('[') && s.contains(']'));
    has_pattern_syntax && Regex::new(s).is_ok()
}

fn is_boolean_literal(s: &str) -> bool {
    matches!(s, "true" | "false" | "True" | "False" | "TRUE" | "FALSE")
}
