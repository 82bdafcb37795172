//! Strict decoder for the `POST /api/new` body.
//!
//! The body must hold exactly one JSON object with the string fields
//! `ShortKey` and `Resource`:
//!
//! ```json
//! { "ShortKey": "/docs", "Resource": "https://example.com/docs" }
//! ```
//!
//! Decoding runs in two passes over the body. The first pass only checks
//! that the leading JSON value is well formed, so syntax and truncation
//! errors anywhere in that value win over type errors. The second pass
//! decodes the value into a [`Redirection`], remembering which object key
//! was being read so a type error can name its field. Content after the
//! first value is checked last.
//!
//! Strings are decoded leniently: invalid UTF-8 bytes and lone surrogate
//! escapes become U+FFFD instead of failing the request.

use crate::domain::entities::Redirection;
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::error::Category;
use std::fmt;

const SHORT_KEY: &str = "ShortKey";
const RESOURCE: &str = "Resource";
const FIELDS: &[&str] = &[SHORT_KEY, RESOURCE];

/// Why a creation body was rejected.
///
/// Every variant except [`DecodeError::Unexpected`] is the client's fault;
/// the `Display` text is what the client sees.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Request body contains badly-formed JSON (at position {position})")]
    Syntax { position: usize },

    #[error("Request body contains badly-formed JSON")]
    UnexpectedEof,

    #[error(
        "Request body contains an invalid value for the {} field (at position {position})",
        quote(.field)
    )]
    InvalidValue { field: String, position: usize },

    #[error("Request body contains unknown field {}", quote(.field))]
    UnknownField { field: String },

    #[error("Request body must not be empty")]
    Empty,

    #[error("Request body must only contain a single JSON object")]
    TrailingData,

    #[error("unexpected JSON decode error: {0}")]
    Unexpected(#[source] serde_json::Error),
}

impl DecodeError {
    /// Whether the error is caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Unexpected(_))
    }
}

/// Decodes a creation request body into a [`Redirection`].
///
/// Missing fields and `null` values leave the field empty. Keys match the
/// field names exactly or, failing that, ignoring ASCII case. A top-level
/// `null` yields an empty redirection.
///
/// # Errors
///
/// Returns the first applicable [`DecodeError`], checked in this order:
/// empty body, syntax or truncation of the first value, wrong value type or
/// unknown field, then trailing content.
pub fn decode_new_redirection(body: &[u8]) -> Result<Redirection, DecodeError> {
    if body.iter().all(|b| is_json_whitespace(*b)) {
        return Err(DecodeError::Empty);
    }

    let mut scanner = serde_json::Deserializer::from_slice(body);
    if let Err(err) = IgnoredAny::deserialize(&mut scanner) {
        return Err(match err.classify() {
            Category::Syntax => DecodeError::Syntax {
                position: byte_offset(body, err.line(), err.column()),
            },
            Category::Eof => DecodeError::UnexpectedEof,
            Category::Data | Category::Io => DecodeError::Unexpected(err),
        });
    }
    let single_value = scanner.end().is_ok();

    let mut current_key = None;
    let mut decoder = serde_json::Deserializer::from_slice(body);
    let seed = RedirectionSeed {
        current_key: &mut current_key,
    };
    let redirection = seed
        .deserialize(&mut decoder)
        .map_err(|err| classify_value_error(body, err, current_key.take()))?;

    if !single_value {
        return Err(DecodeError::TrailingData);
    }

    Ok(redirection)
}

fn classify_value_error(body: &[u8], err: serde_json::Error, key: Option<String>) -> DecodeError {
    // The first pass already rejected malformed JSON, so a syntax error here
    // is a number literal out of range for its target.
    if !matches!(err.classify(), Category::Data | Category::Syntax) {
        return DecodeError::Unexpected(err);
    }

    match key {
        Some(key) => match Field::from_key(&key) {
            Some(field) => DecodeError::InvalidValue {
                field: field.name().to_owned(),
                position: byte_offset(body, err.line(), err.column()),
            },
            None => DecodeError::UnknownField { field: key },
        },
        None => DecodeError::InvalidValue {
            field: String::new(),
            position: byte_offset(body, err.line(), err.column()),
        },
    }
}

/// Double-quotes `s` for error messages: printable characters stay as
/// they are, control bytes become `\xNN`, other invisible characters become
/// `\uNNNN` or `\UNNNNNNNN`.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0B}' => out.push_str("\\v"),
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if is_printable(c) => out.push(c),
            c if (c as u32) <= 0xFFFF => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push_str(&format!("\\U{:08x}", c as u32)),
        }
    }
    out.push('"');
    out
}

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !(c.is_control()
        || c.is_whitespace()
        || matches!(
            c,
            '\u{AD}'
                | '\u{200B}'..='\u{200F}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2060}'..='\u{2064}'
                | '\u{FEFF}'
                | '\u{E0001}'..='\u{E007F}'
        ))
}

/// Converts unescaped string bytes to UTF-8, replacing every invalid byte
/// with U+FFFD. A surrogate left over from a lone `\uD800`-style escape
/// arrives as a three-byte sequence and becomes a single U+FFFD.
fn lossy_utf8(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;

    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                break;
            }
            Err(err) => {
                let (valid, invalid) = rest.split_at(err.valid_up_to());
                out.push_str(&String::from_utf8_lossy(valid));
                out.push(char::REPLACEMENT_CHARACTER);

                let skip = match invalid {
                    [0xED, 0xA0..=0xBF, 0x80..=0xBF, ..] => 3,
                    _ => 1,
                };
                rest = &invalid[skip..];
            }
        }
    }

    out
}

fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Converts serde_json's 1-based line and byte column into the number of
/// bytes consumed when the error was raised.
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = body
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    (line_start + column).min(body.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ShortKey,
    Resource,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            SHORT_KEY => Some(Self::ShortKey),
            RESOURCE => Some(Self::Resource),
            _ if key.eq_ignore_ascii_case(SHORT_KEY) => Some(Self::ShortKey),
            _ if key.eq_ignore_ascii_case(RESOURCE) => Some(Self::Resource),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::ShortKey => SHORT_KEY,
            Self::Resource => RESOURCE,
        }
    }
}

/// A JSON string read as raw bytes, so encoding problems never fail the
/// decode.
struct LossyString(String);

impl<'de> Deserialize<'de> for LossyString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_bytes(LossyStringVisitor)
    }
}

struct LossyStringVisitor;

impl Visitor<'_> for LossyStringVisitor {
    type Value = LossyString;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(LossyString(v.to_owned()))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(LossyString(lossy_utf8(v)))
    }
}

struct RedirectionSeed<'a> {
    current_key: &'a mut Option<String>,
}

impl<'de> DeserializeSeed<'de> for RedirectionSeed<'_> {
    type Value = Redirection;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RedirectionVisitor {
            current_key: self.current_key,
        })
    }
}

struct RedirectionVisitor<'a> {
    current_key: &'a mut Option<String>,
}

impl<'de> Visitor<'de> for RedirectionVisitor<'_> {
    type Value = Redirection;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object with ShortKey and Resource")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Redirection::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut redirection = Redirection::default();

        while let Some(LossyString(key)) = map.next_key()? {
            let Some(field) = Field::from_key(&key) else {
                let err = de::Error::unknown_field(&key, FIELDS);
                *self.current_key = Some(key);
                return Err(err);
            };
            *self.current_key = Some(key);

            if let Some(LossyString(value)) = map.next_value()? {
                match field {
                    Field::ShortKey => redirection.short_key = value,
                    Field::Resource => redirection.resource = value,
                }
            }
        }

        *self.current_key = None;
        Ok(redirection)
    }
}
