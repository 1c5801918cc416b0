//! # Line Editor
//!
//! Rewrites individual assignment lines and leaves every other byte alone.
//! On a rewritten line only the value changes.
//!
//! A line assigns key `K` when, after leading spaces and tabs, it is not a
//! comment, starts with exactly `K`, and the next non-blank character is
//! `=`. `persistent_peers` therefore never matches
//! `experimental_max_gossip_connections_to_persistent_peers`, nor
//! `persistent_peers_max_dial_period`.
//!
//! The current section is the last `[name]` header seen; `""` is the part
//! of the file before the first header.

use crate::domain::value::{TomlEdit, TomlValue};

/// An edit that found its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEdit {
    pub section: String,
    pub key: String,
    /// Raw value text that was replaced (without any trailing comment).
    pub previous: String,
    pub value: TomlValue,
}

impl AppliedEdit {
    /// Whether the rendered value differs from what was on the line.
    pub fn changed(&self) -> bool {
        self.previous != self.value.render()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub content: String,
    pub applied: Vec<AppliedEdit>,
    /// Edits whose key had no assignment in the target section.
    pub missing: Vec<TomlEdit>,
}

impl PatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn applied(&self, key: &str) -> Option<&AppliedEdit> {
        self.applied.iter().find(|a| a.key == key)
    }
}

/// Apply `edits` to `content`. Each edit rewrites the first matching
/// assignment in its section.
pub fn apply_edits(content: &str, edits: &[TomlEdit]) -> PatchOutcome {
    let mut done = vec![false; edits.len()];
    let mut applied = Vec::new();
    let mut out = String::with_capacity(content.len() + 64);
    let mut section = String::new();

    for raw in content.split_inclusive('\n') {
        let (body, eol) = split_eol(raw);

        if let Some(name) = section_header(body) {
            section = name.to_string();
            out.push_str(raw);
            continue;
        }

        let hit = edits
            .iter()
            .enumerate()
            .find(|(i, e)| !done[*i] && e.section == section && assignment_value(body, &e.key).is_some());

        match hit {
            Some((i, edit)) => {
                done[i] = true;
                let (line, previous) = rewrite(body, &edit.key, &edit.value);
                out.push_str(&line);
                out.push_str(eol);
                applied.push(AppliedEdit {
                    section: edit.section.clone(),
                    key: edit.key.clone(),
                    previous,
                    value: edit.value.clone(),
                });
            }
            None => out.push_str(raw),
        }
    }

    let missing = edits
        .iter()
        .zip(&done)
        .filter(|(_, d)| !**d)
        .map(|(e, _)| e.clone())
        .collect();

    PatchOutcome {
        content: out,
        applied,
        missing,
    }
}

/// Whether `line` is the assignment for `key`.
pub fn is_assignment(line: &str, key: &str) -> bool {
    assignment_value(line, key).is_some()
}

/// Section name if `line` is a table header. Trailing comments are allowed.
pub fn section_header(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if !trimmed.starts_with('[') {
        return None;
    }
    let without_comment = match trimmed.find('#') {
        Some(pos) => trimmed[..pos].trim_end(),
        None => trimmed,
    };
    let inner = without_comment
        .strip_prefix("[[")
        .and_then(|s| s.strip_suffix("]]"))
        .or_else(|| {
            without_comment
                .strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
        })?;
    Some(inner.trim())
}

// ============================================================================
// Line internals
// ============================================================================

fn split_eol(raw: &str) -> (&str, &str) {
    if let Some(body) = raw.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = raw.strip_suffix('\n') {
        (body, "\n")
    } else {
        (raw, "")
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Text after `=` when `line` assigns `key`.
fn assignment_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    if key.is_empty() {
        return None;
    }
    let trimmed = line.trim_start_matches(is_blank);
    if trimmed.starts_with('#') {
        return None;
    }
    let rest = trimmed.strip_prefix(key)?;
    rest.trim_start_matches(is_blank).strip_prefix('=')
}

/// Byte offset of a trailing `#` comment in a value, outside any string.
fn comment_start(value: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in value.char_indices() {
        match quote {
            Some('"') if escaped => escaped = false,
            Some('"') if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '#' => return Some(i),
            None => {}
        }
    }
    None
}

/// Rebuild the assignment with a new value. Returns the new line and the
/// previous raw value.
///
/// Everything up to the value (indent, key, spacing around `=`) and any
/// trailing comment are kept as written. An empty value gets one space
/// after `=`.
fn rewrite(line: &str, key: &str, value: &TomlValue) -> (String, String) {
    let after_eq = assignment_value(line, key).unwrap_or("");
    let head = &line[..line.len() - after_eq.len()];
    let (value_part, comment) = match comment_start(after_eq) {
        Some(pos) => {
            let value_part = &after_eq[..pos];
            let kept = value_part.len() - value_part.trim_end_matches(is_blank).len();
            (value_part, &after_eq[pos - kept..])
        }
        None => (after_eq, ""),
    };

    let gap = if value_part.trim().is_empty() {
        " "
    } else {
        &after_eq[..after_eq.len() - after_eq.trim_start_matches(is_blank).len()]
    };
    let line = format!("{head}{gap}{}{comment}", value.render());
    (line, value_part.trim().to_string())
}
