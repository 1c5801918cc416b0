//! Values written by the line editor.

use std::fmt;

/// A value rendered into an assignment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TomlValue {
    /// Basic string, written quoted.
    Str(String),
    Bool(bool),
    Int(u64),
    /// Written verbatim.
    Raw(String),
}

impl TomlValue {
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    /// TOML source text for this value.
    pub fn render(&self) -> String {
        match self {
            Self::Str(s) => {
                let mut out = String::with_capacity(s.len() + 2);
                out.push('"');
                for c in s.chars() {
                    match c {
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        '\t' => out.push_str("\\t"),
                        '\r' => out.push_str("\\r"),
                        c => out.push(c),
                    }
                }
                out.push('"');
                out
            }
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for TomlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// One assignment to rewrite. Section `""` is the top of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TomlEdit {
    pub section: String,
    pub key: String,
    pub value: TomlValue,
}

impl TomlEdit {
    pub fn new(section: impl Into<String>, key: impl Into<String>, value: TomlValue) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
            value,
        }
    }

    pub fn top_level(key: impl Into<String>, value: TomlValue) -> Self {
        Self::new("", key, value)
    }
}
