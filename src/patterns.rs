//! Pattern library: recognizers for semantically meaningful tokens.
//!
//! Recognizers are tried in a fixed priority order when classifying a line
//! change: numeric, version, date, URL, email. The first recognizer whose
//! extracted matches differ between the two sides wins and no
//! lower-priority recognizer runs for that line. Structural line tests
//! (headers, list markers) live here as well but are only consulted by the
//! block segmenter and the generic classifier fallbacks, never for change
//! typing.
//!
//! New recognizers slot into [`RECOGNIZERS`] without changing call sites.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d+(?:\.\d+)?\b").expect("valid number pattern"));

static VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:v|version|rev|revision)?\s*\d+(?:\.\d+)*[a-zA-Z0-9-]*\b")
        .expect("valid version pattern")
});

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d{1,4}[-/]\d{1,2}[-/]\d{1,4}\b|\b\d{1,2}\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d{4}\b",
    )
    .expect("valid date pattern")
});

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://[-\w.]+(?:[:\d]+)?(?:/[\w/_.]*(?:\?[\w&=%.]*)?(?:#[\w.]*)?)?")
        .expect("valid url pattern")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("valid email pattern")
});

static NUMBERED_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)[.)]\s").expect("valid numbered item pattern"));

static BULLET_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*+]\s").expect("valid bullet item pattern"));

static MARKDOWN_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{1,6}\s").expect("valid header pattern"));

/// Token classes recognized by the pattern library, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Numeric,
    Version,
    Date,
    Url,
    Email,
}

/// Extracts all matched spans of one token class from a line.
pub trait Recognizer: Sync {
    fn kind(&self) -> PatternKind;
    fn extract(&self, line: &str) -> Vec<String>;
}

struct RegexRecognizer {
    kind: PatternKind,
    pattern: &'static Lazy<Regex>,
}

impl Recognizer for RegexRecognizer {
    fn kind(&self) -> PatternKind {
        self.kind
    }

    fn extract(&self, line: &str) -> Vec<String> {
        self.pattern
            .find_iter(line)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

static RECOGNIZER_LIST: [RegexRecognizer; 5] = [
    RegexRecognizer {
        kind: PatternKind::Numeric,
        pattern: &NUMBER_RE,
    },
    RegexRecognizer {
        kind: PatternKind::Version,
        pattern: &VERSION_RE,
    },
    RegexRecognizer {
        kind: PatternKind::Date,
        pattern: &DATE_RE,
    },
    RegexRecognizer {
        kind: PatternKind::Url,
        pattern: &URL_RE,
    },
    RegexRecognizer {
        kind: PatternKind::Email,
        pattern: &EMAIL_RE,
    },
];

/// Change-typing recognizers in priority order.
pub fn recognizers() -> impl Iterator<Item = &'static dyn Recognizer> {
    RECOGNIZER_LIST.iter().map(|r| r as &dyn Recognizer)
}

/// Extracts tokens of one class from a line.
pub fn extract(kind: PatternKind, line: &str) -> Vec<String> {
    RECOGNIZER_LIST
        .iter()
        .find(|r| r.kind == kind)
        .map(|r| r.extract(line))
        .unwrap_or_default()
}

pub fn is_markdown_header(line: &str) -> bool {
    MARKDOWN_HEADER_RE.is_match(line)
}

pub fn is_numbered_item(line: &str) -> bool {
    NUMBERED_ITEM_RE.is_match(line)
}

pub fn is_bullet_item(line: &str) -> bool {
    BULLET_ITEM_RE.is_match(line)
}

/// Leading list number of a numbered item, if any.
pub fn leading_number(line: &str) -> Option<u64> {
    NUMBERED_ITEM_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
