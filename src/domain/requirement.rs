//! Requirement line model
//!
//! One `RequirementLine` per physical line of a requirements file. The raw
//! text is kept alongside the parsed fragments so the line can be written back
//! byte for byte.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Classification of a requirements file line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Exact pin with `==`
    Pinned,
    /// Any other specifier, bare name, or direct reference
    OtherSpecifier,
    /// Whole-line comment
    Comment,
    /// Empty or whitespace-only line
    Blank,
    /// pip option line such as `-r base.txt` or `--index-url ...`
    Directive,
    /// Line that does not follow the requirement grammar
    Malformed,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LineKind::Pinned => "pinned",
            LineKind::OtherSpecifier => "other specifier",
            LineKind::Comment => "comment",
            LineKind::Blank => "blank",
            LineKind::Directive => "directive",
            LineKind::Malformed => "malformed",
        };
        write!(f, "{}", label)
    }
}

/// Line terminator of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    /// Last line without a terminator
    #[default]
    None,
    Lf,
    CrLf,
}

impl LineEnding {
    /// Split a raw line into its content and terminator
    pub fn split(raw: &str) -> (&str, LineEnding) {
        if let Some(content) = raw.strip_suffix("\r\n") {
            (content, LineEnding::CrLf)
        } else if let Some(content) = raw.strip_suffix('\n') {
            (content, LineEnding::Lf)
        } else {
            (raw, LineEnding::None)
        }
    }

    /// The terminator text
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::None => "",
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// A single classified line of a requirements file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementLine {
    /// Original text including the line ending
    pub raw: String,
    /// Classification
    pub kind: LineKind,
    /// Package name as written (Pinned and OtherSpecifier only)
    pub name: Option<String>,
    /// Requested extras in written order
    pub extras: Vec<String>,
    /// Pinned version token (Pinned only)
    pub version: Option<String>,
    /// Environment marker text after `;`, verbatim
    pub marker: Option<String>,
    /// Trailing comment including the whitespace before `#`
    pub comment: Option<String>,
    /// Whitespace before the first non-whitespace character
    pub leading_whitespace: String,
    /// Line terminator
    pub line_ending: LineEnding,
    /// Byte range of the version token inside `raw`
    #[serde(skip)]
    pub(crate) version_span: Option<Range<usize>>,
}

impl RequirementLine {
    /// Creates a line of the given kind with no parsed fragments
    pub(crate) fn unparsed(raw: &str, kind: LineKind) -> Self {
        let (content, line_ending) = LineEnding::split(raw);
        let leading_len = content.len() - content.trim_start().len();
        Self {
            raw: raw.to_string(),
            kind,
            name: None,
            extras: Vec::new(),
            version: None,
            marker: None,
            comment: None,
            leading_whitespace: content[..leading_len].to_string(),
            line_ending,
            version_span: None,
        }
    }

    /// Returns true if this line is an exact `==` pin
    pub fn is_pinned(&self) -> bool {
        self.kind == LineKind::Pinned
    }

    /// Package name normalized per PEP 503, used as the lookup key
    pub fn normalized_name(&self) -> Option<String> {
        self.name.as_deref().map(normalize_name)
    }

    /// Line content without the line ending
    pub fn content(&self) -> &str {
        LineEnding::split(&self.raw).0
    }
}

/// Normalize a package name: lowercase, runs of `-`, `_`, `.` become `-`
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
            }
            in_separator = true;
        } else {
            normalized.push(c.to_ascii_lowercase());
            in_separator = false;
        }
    }
    normalized
}
