//! Front-matter splitting and parsing.
//!
//! Two header formats are recognized at the very start of a document:
//!
//! ```text
//! ---                      +++
//! title: Start             title = "Start"
//! tags: [intro]            tags = ["intro"]
//! ---                      +++
//! body...                  body...
//! ```
//!
//! Both are normalized into a JSON object so resolvers see a single value
//! model (strings, string lists, free-form nested values).

use super::error::SourceError;
use serde_json::{Map, Value};

/// Declared fields of a document.
pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    Yaml,
    Toml,
}

impl FrontmatterFormat {
    const fn delimiter(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split a document into its raw header and its body.
///
/// Returns `None` for the header when the document has none.
pub fn split_frontmatter<'a>(
    path: &str,
    text: &'a str,
) -> Result<(Option<(FrontmatterFormat, &'a str)>, &'a str), SourceError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let format = [FrontmatterFormat::Yaml, FrontmatterFormat::Toml]
        .into_iter()
        .find(|f| first_line(text) == f.delimiter());
    let Some(format) = format else {
        return Ok((None, text));
    };

    let rest = &text[next_line_start(text)..];

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == format.delimiter() {
            let header = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((Some((format, header)), body));
        }
        offset += line.len();
    }

    Err(SourceError::UnterminatedFrontmatter { path: path.to_owned() })
}

/// Parse the header of `text` into declared fields, returning them with the body.
pub fn parse_frontmatter<'a>(path: &str, text: &'a str) -> Result<(Fields, &'a str), SourceError> {
    let (header, body) = split_frontmatter(path, text)?;
    let fields = match header {
        None => Fields::new(),
        Some((FrontmatterFormat::Yaml, raw)) => parse_yaml(path, raw)?,
        Some((FrontmatterFormat::Toml, raw)) => parse_toml(path, raw)?,
    };
    Ok((fields, body))
}

fn parse_yaml(path: &str, raw: &str) -> Result<Fields, SourceError> {
    if raw.trim().is_empty() {
        return Ok(Fields::new());
    }
    let value: Value = serde_yaml::from_str(raw).map_err(|err| malformed(path, err))?;
    match value {
        Value::Null => Ok(Fields::new()),
        Value::Object(map) => Ok(map),
        _ => Err(malformed(path, "header is not a mapping")),
    }
}

fn parse_toml(path: &str, raw: &str) -> Result<Fields, SourceError> {
    let table: toml::Table = toml::from_str(raw).map_err(|err| malformed(path, err))?;
    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect())
}

/// TOML datetimes become their RFC 3339 string, like unquoted YAML dates.
pub fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

fn malformed(path: &str, message: impl ToString) -> SourceError {
    SourceError::MalformedFrontmatter {
        path: path.to_owned(),
        message: message.to_string(),
    }
}

fn first_line(text: &str) -> &str {
    text[..first_line_len(text)].trim_end_matches('\r')
}

fn first_line_len(text: &str) -> usize {
    text.find('\n').unwrap_or(text.len())
}

fn next_line_start(text: &str) -> usize {
    text.find('\n').map_or(text.len(), |i| i + 1)
}
