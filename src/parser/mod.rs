//! Requirement line classifier and formatter
//!
//! Handles pip requirement lines:
//! - Exact pins: `Flask==1.0.0`, `requests[security]==2.25.0; python_version>="3.6"`
//! - Other specifiers: `numpy>=1.20`, `pkg~=1.4`, `pkg>=1.0,<2.0`, `pkg==1.*`, `pkg (==1.0)`
//! - Bare names and direct references: `pkg`, `pkg @ https://...`
//! - Comments, blank lines and pip options (`-r base.txt`, `--index-url ...`)
//!
//! Classification never fails: anything outside the grammar is `Malformed`
//! and is written back untouched.

use crate::domain::{LineEnding, LineKind, RequirementLine};
use regex::Regex;
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?").unwrap());
static EXTRA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$").unwrap());
static SPECIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<op>===|==|~=|!=|<=|>=|<|>)\s*(?P<version>[A-Za-z0-9][A-Za-z0-9.*+!_-]*)$")
        .unwrap()
});
// pip only treats `#` as a comment when whitespace precedes it
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+#").unwrap());
// per-requirement options (`--hash=...`) or a trailing line continuation
static OPTIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\s+--?[A-Za-z]|\s*\\\s*$)").unwrap());

/// Classify one raw line (including its line ending)
pub fn classify(raw: &str) -> RequirementLine {
    let (content, _) = LineEnding::split(raw);
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return RequirementLine::unparsed(raw, LineKind::Blank);
    }
    if trimmed.starts_with('#') {
        return RequirementLine::unparsed(raw, LineKind::Comment);
    }
    if trimmed.starts_with('-') {
        return RequirementLine::unparsed(raw, LineKind::Directive);
    }

    parse_requirement(raw, content)
        .unwrap_or_else(|| RequirementLine::unparsed(raw, LineKind::Malformed))
}

/// Write a line back, replacing the pinned version when `new_version` is given
///
/// Lines that are not pinned are always returned unchanged.
pub fn reserialize(line: &RequirementLine, new_version: Option<&str>) -> String {
    match (line.kind, &line.version_span, new_version) {
        (LineKind::Pinned, Some(span), Some(version)) => {
            let mut out = String::with_capacity(line.raw.len() + version.len());
            out.push_str(&line.raw[..span.start]);
            out.push_str(version);
            out.push_str(&line.raw[span.end..]);
            out
        }
        _ => line.raw.clone(),
    }
}

/// Split file content into raw lines, keeping each line's terminator
pub fn split_lines(content: &str) -> Vec<&str> {
    content.split_inclusive('\n').collect()
}

/// Classify every line of a file's content
pub fn classify_all(content: &str) -> Vec<RequirementLine> {
    split_lines(content).into_iter().map(classify).collect()
}

fn parse_requirement(raw: &str, content: &str) -> Option<RequirementLine> {
    let mut line = RequirementLine::unparsed(raw, LineKind::OtherSpecifier);

    let body_end = COMMENT_RE.find(content).map_or(content.len(), |m| m.start());
    if body_end < content.len() {
        line.comment = Some(content[body_end..].to_string());
    }
    let body = &content[..body_end];

    let (body, has_options) = match OPTIONS_RE.find(body) {
        Some(m) => (&body[..m.start()], true),
        None => (body, false),
    };

    let requirement_end = body.find(';').unwrap_or(body.len());
    if requirement_end < body.len() {
        let marker = &body[requirement_end + 1..];
        if marker.trim().is_empty() {
            return None;
        }
        line.marker = Some(marker.to_string());
    }
    let requirement = &body[..requirement_end];

    let name_start = line.leading_whitespace.len();
    // options may start inside the indentation (`    \`), leaving nothing to name
    let name = NAME_RE.find(requirement.get(name_start..)?)?;
    line.name = Some(name.as_str().to_string());
    let mut pos = name_start + name.end();

    let after_name = &requirement[pos..];
    let after_name_trimmed = after_name.trim_start();
    if let Some(inner) = after_name_trimmed.strip_prefix('[') {
        let close = inner.find(']')?;
        line.extras = parse_extras(&inner[..close])?;
        pos += after_name.len() - after_name_trimmed.len() + close + 2;
    }

    let specs = &requirement[pos..];
    let specs_trimmed = specs.trim();

    if specs_trimmed.is_empty() {
        return Some(line);
    }
    if let Some(url) = specs_trimmed.strip_prefix('@') {
        return if url.trim().is_empty() { None } else { Some(line) };
    }

    let mut offset = pos + (specs.len() - specs.trim_start().len());
    let inner = match specs_trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
    {
        Some(inner) => {
            offset += 1;
            inner
        }
        None => specs_trimmed,
    };

    let clauses: Vec<&str> = inner.split(',').collect();
    for clause in &clauses {
        if !SPECIFIER_RE.is_match(clause.trim()) {
            return None;
        }
    }

    if clauses.len() == 1 && !has_options {
        let clause = clauses[0];
        let clause_lead = clause.len() - clause.trim_start().len();
        let caps = SPECIFIER_RE.captures(clause.trim())?;
        let version = caps.name("version")?;
        if &caps["op"] == "==" && !version.as_str().contains('*') {
            let start = offset + clause_lead + version.start();
            line.kind = LineKind::Pinned;
            line.version = Some(version.as_str().to_string());
            line.version_span = Some(start..start + version.len());
        }
    }

    Some(line)
}

fn parse_extras(list: &str) -> Option<Vec<String>> {
    if list.trim().is_empty() {
        return Some(Vec::new());
    }
    list.split(',')
        .map(|extra| {
            let extra = extra.trim();
            EXTRA_RE.is_match(extra).then(|| extra.to_string())
        })
        .collect()
}
