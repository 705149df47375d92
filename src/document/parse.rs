//! Reader for rendered documents.
//!
//! Only the structure written by `render` is accepted. Parameter values are
//! kept as raw text since the simulator, not this crate, owns their meaning.

use crate::error::{ConfigError, Result};
use crate::registry::{Edge, GlobalSettings};

/// A device section as read back from a document
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSection {
    pub name: String,
    /// `(key, raw value)` pairs in document order
    pub params: Vec<(String, String)>,
}

impl ParsedSection {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Contents of a rendered document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedDocument {
    pub settings: GlobalSettings,
    pub edges: Vec<Edge>,
    /// `(name, typename)` pairs from the `[devices]` table, in order
    pub devices: Vec<(String, String)>,
    pub sections: Vec<ParsedSection>,
}

impl ParsedDocument {
    pub fn section(&self, name: &str) -> Option<&ParsedSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn typename_of(&self, name: &str) -> Option<&str> {
        self.devices.iter().find(|(n, _)| n == name).map(|(_, t)| t.as_str())
    }
}

enum State {
    Globals,
    Edges,
    EdgeBody(Vec<String>),
    Devices,
    Section,
}

fn error(line: usize, message: impl Into<String>) -> ConfigError {
    ConfigError::Parse {
        line,
        message: message.into(),
    }
}

fn split_assignment(line: &str, lineno: usize) -> Result<(&str, &str)> {
    let (key, value) = line
        .split_once(" = ")
        .ok_or_else(|| error(lineno, format!("expected 'key = value', found '{}'", line)))?;
    Ok((key.trim(), value.trim()))
}

fn unquote(value: &str, lineno: usize) -> Result<String> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .map(str::to_string)
        .ok_or_else(|| error(lineno, format!("expected quoted string, found '{}'", value)))
}

fn parse_u64(value: &str, lineno: usize) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|_| error(lineno, format!("expected integer, found '{}'", value)))
}

/// Parse a rendered document
pub fn parse_document(text: &str) -> Result<ParsedDocument> {
    let mut doc = ParsedDocument::default();
    let mut state = State::Globals;
    let mut saw_edges = false;

    for (i, raw) in text.lines().enumerate() {
        let lineno = i + 1;
        let line = raw.trim();

        state = match state {
            State::EdgeBody(mut names) => {
                if line == "]," || line == "]" {
                    if names.len() != 2 {
                        return Err(error(lineno, format!("edge must name 2 devices, found {}", names.len())));
                    }
                    let dst = names.pop().unwrap_or_default();
                    let src = names.pop().unwrap_or_default();
                    doc.edges.push(Edge::new(src, dst));
                    State::Edges
                } else {
                    names.push(unquote(line.trim_end_matches(','), lineno)?);
                    State::EdgeBody(names)
                }
            }
            State::Edges => match line {
                "[" => State::EdgeBody(Vec::new()),
                "]" => State::Globals,
                _ => return Err(error(lineno, format!("unexpected line in edges: '{}'", line))),
            },
            _ if line.is_empty() => state,
            _ if line == "[devices]" => State::Devices,
            _ if line.starts_with('[') && line.ends_with(']') => {
                doc.sections.push(ParsedSection {
                    name: line[1..line.len() - 1].to_string(),
                    params: Vec::new(),
                });
                State::Section
            }
            State::Globals => {
                if line == "edges = [" {
                    saw_edges = true;
                    State::Edges
                } else {
                    let (key, value) = split_assignment(line, lineno)?;
                    match key {
                        "max_clock" => doc.settings.max_clock = parse_u64(value, lineno)?,
                        "clock_granu" => doc.settings.clock_granu = parse_u64(value, lineno)?,
                        "log_level" => doc.settings.log_level = unquote(value, lineno)?,
                        "log_name" => doc.settings.log_name = unquote(value, lineno)?,
                        other => return Err(error(lineno, format!("unknown global setting '{}'", other))),
                    }
                    State::Globals
                }
            }
            State::Devices => {
                let (name, typename) = split_assignment(line, lineno)?;
                doc.devices.push((name.to_string(), unquote(typename, lineno)?));
                State::Devices
            }
            State::Section => {
                let (key, value) = split_assignment(line, lineno)?;
                if let Some(section) = doc.sections.last_mut() {
                    section.params.push((key.to_string(), value.to_string()));
                }
                State::Section
            }
        };
    }

    match state {
        State::Edges | State::EdgeBody(_) => Err(error(text.lines().count(), "unterminated edges array")),
        _ if !saw_edges => Err(error(text.lines().count(), "document has no edges array")),
        _ => Ok(doc),
    }
}
