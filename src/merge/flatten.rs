//! Flattening of nested JSON-like data into dot-notation tables.
//!
//! The flattener is a best-effort recursive-descent scanner working directly on
//! byte positions of the raw text. It produces two tables:
//!
//! - a [`FlatTable`] mapping every dotted path (`metadata.version`) to its
//!   scalar value as a string, and
//! - an [`ArrayTable`] mapping every array of objects to its item records.
//!
//! All values are strings. Numbers, booleans and `null` are stored as their
//! literal text (`42`, `true`, `null`); templates only ever need text.
//!
//! # Error policy
//!
//! The only hard failure is input that does not begin with `{`. Broken nesting
//! inside the document (an unterminated string, an unbalanced `{` or `[`) ends
//! extraction at that point: whatever was parsed before it is kept, nothing is
//! extracted for the broken branch.
//!
//! # Limitations
//!
//! - Escape sequences are kept verbatim: `\"` stays `\"` and `\u00e9` stays six characters.
//! - Array elements that are not objects only survive in the array's raw text.
//! - Item records are one level deep; nested values inside an item are kept as
//!   their raw text.

use indexmap::IndexMap;
use tracing::trace;

use crate::core::Json2DocError;

/// Dot-notation key to scalar value. Insertion order is discovery order.
pub type FlatTable = IndexMap<String, String>;

/// One element of an array of objects: field name to scalar value.
pub type ItemRecord = IndexMap<String, String>;

/// Array key to its ordered item records.
pub type ArrayTable = IndexMap<String, Vec<ItemRecord>>;

/// Flatten raw data text into a [`FlatTable`] and an [`ArrayTable`].
///
/// Later occurrences of the same key overwrite earlier ones while keeping the
/// position of the first occurrence.
///
/// # Errors
///
/// Returns [`Json2DocError::MalformedInput`] if the trimmed input does not
/// start with an object-opening brace.
///
/// # Examples
///
/// ```rust
/// use json2doc::merge::flatten;
///
/// let (values, arrays) = flatten(r#"{"metadata": {"version": "1.0.0"},
///     "items": [{"id": 1}, {"id": 2}]}"#).unwrap();
/// assert_eq!(values["metadata.version"], "1.0.0");
/// assert_eq!(arrays["items"].len(), 2);
/// assert_eq!(arrays["items"][1]["id"], "2");
/// ```
pub fn flatten(raw: &str) -> Result<(FlatTable, ArrayTable), Json2DocError> {
    let text = raw.trim();
    match text.chars().next() {
        Some('{') => {}
        Some(other) => {
            return Err(Json2DocError::MalformedInput {
                reason: format!("expected '{{' at start of data, found '{other}'"),
            });
        }
        None => {
            return Err(Json2DocError::MalformedInput {
                reason: "data is empty".to_string(),
            });
        }
    }

    let mut flattener = Flattener::default();
    flattener.object(text, "");
    Ok((flattener.values, flattener.arrays))
}

#[derive(Default)]
struct Flattener {
    values: FlatTable,
    arrays: ArrayTable,
}

impl Flattener {
    /// Walk an object and everything nested in it.
    ///
    /// Nested objects go on an explicit work stack, so nesting depth is bounded
    /// by memory rather than by the call stack.
    fn object(&mut self, text: &str, prefix: &str) {
        let mut stack = vec![(Members::new(text), prefix.to_string())];

        while let Some((members, prefix)) = stack.last_mut() {
            let Some((key, value)) = members.next() else {
                stack.pop();
                continue;
            };
            let full_key = if prefix.is_empty() {
                key.to_string()
            } else {
                format!("{prefix}.{key}")
            };

            match value {
                RawValue::Object(inner) => stack.push((Members::new(inner), full_key)),
                RawValue::Array(inner) => {
                    // The raw text stays addressable as a scalar as well.
                    self.values.insert(full_key.clone(), inner.to_string());
                    self.arrays.insert(full_key, array_items(inner));
                }
                RawValue::String(s) | RawValue::Bare(s) => {
                    trace!(key = %full_key, "flattened value");
                    self.values.insert(full_key, s.to_string());
                }
            }
        }
    }
}

/// Parse the immediate fields of every object element of an array.
fn array_items(text: &str) -> Vec<ItemRecord> {
    let bytes = text.as_bytes();
    let mut items = Vec::new();
    let mut pos = 1; // skip '['

    while pos < bytes.len() {
        pos = skip_separators(bytes, pos);
        let Some(&b) = bytes.get(pos) else {
            break;
        };

        let end = match b {
            b']' => break,
            b'{' => {
                let Some(end) = find_closing(bytes, pos, b'{', b'}') else {
                    break;
                };
                let record = Members::new(slice(text, pos, end + 1))
                    .map(|(field, value)| (field.to_string(), value.as_str().to_string()))
                    .collect();
                items.push(record);
                end
            }
            b'[' => match find_closing(bytes, pos, b'[', b']') {
                Some(end) => end,
                None => break,
            },
            b'"' => match find_string_end(bytes, pos + 1) {
                Some(end) => end,
                None => break,
            },
            _ => {
                let mut end = pos;
                while end + 1 < bytes.len() && !matches!(bytes[end + 1], b',' | b']') {
                    end += 1;
                }
                end
            }
        };
        pos = end + 1;
    }

    items
}

/// A member value as found in the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawValue<'a> {
    /// Contents between the quotes, escapes untouched
    String(&'a str),
    /// Balanced `{...}` including the braces
    Object(&'a str),
    /// Balanced `[...]` including the brackets
    Array(&'a str),
    /// Trimmed unquoted token: number, boolean, null or anything else
    Bare(&'a str),
}

impl<'a> RawValue<'a> {
    fn as_str(self) -> &'a str {
        match self {
            Self::String(s) | Self::Object(s) | Self::Array(s) | Self::Bare(s) => s,
        }
    }
}

/// Iterator over the `"key": value` members of one object.
///
/// `text` must start with `{`. Iteration stops at the closing brace, at the end
/// of input, or at the first construct that cannot be delimited.
struct Members<'a> {
    text: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Members<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 1,
            done: false,
        }
    }

    fn value(&mut self) -> Option<RawValue<'a>> {
        let bytes = self.text.as_bytes();
        let start = self.pos;

        match bytes.get(start)? {
            b'"' => {
                let end = find_string_end(bytes, start + 1)?;
                self.pos = end + 1;
                Some(RawValue::String(slice(self.text, start + 1, end)))
            }
            b'{' => {
                let end = find_closing(bytes, start, b'{', b'}')?;
                self.pos = end + 1;
                Some(RawValue::Object(slice(self.text, start, end + 1)))
            }
            b'[' => {
                let end = find_closing(bytes, start, b'[', b']')?;
                self.pos = end + 1;
                Some(RawValue::Array(slice(self.text, start, end + 1)))
            }
            _ => {
                let mut end = start;
                while end < bytes.len() && !matches!(bytes[end], b',' | b'}' | b']') {
                    end += 1;
                }
                self.pos = end;
                Some(RawValue::Bare(slice(self.text, start, end).trim()))
            }
        }
    }
}

impl<'a> Iterator for Members<'a> {
    type Item = (&'a str, RawValue<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let bytes = self.text.as_bytes();

        loop {
            self.pos = skip_whitespace(bytes, self.pos);
            match bytes.get(self.pos) {
                None | Some(b'}') => {
                    self.done = true;
                    return None;
                }
                Some(b'"') => break,
                // Stray character where a key should be
                Some(_) => self.pos += 1,
            }
        }

        let Some(key_end) = find_string_end(bytes, self.pos + 1) else {
            self.done = true;
            return None;
        };
        let key = slice(self.text, self.pos + 1, key_end);

        self.pos = key_end + 1;
        while self.pos < bytes.len() && bytes[self.pos] != b':' {
            self.pos += 1;
        }
        self.pos = skip_whitespace(bytes, self.pos + 1);

        let Some(value) = self.value() else {
            self.done = true;
            return None;
        };
        self.pos = skip_separators(bytes, self.pos);

        Some((key, value))
    }
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

fn skip_separators(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && (bytes[pos] == b',' || bytes[pos].is_ascii_whitespace()) {
        pos += 1;
    }
    pos
}

/// Position of the next `"` at or after `from` that is not preceded by an
/// escaping backslash.
fn find_string_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut escaped = false;
    for (offset, &b) in bytes.get(from..)?.iter().enumerate() {
        match b {
            _ if escaped => escaped = false,
            b'\\' => escaped = true,
            b'"' => return Some(from + offset),
            _ => {}
        }
    }
    None
}

/// Position of the delimiter closing the one at `start`, counting depth and
/// ignoring delimiters inside quoted strings.
fn find_closing(bytes: &[u8], start: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes.get(start..)?.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        if b == b'"' {
            in_string = true;
        } else if b == open {
            depth += 1;
        } else if b == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(start + offset);
            }
        }
    }
    None
}

/// Sub-slice by byte positions; every position used here sits on an ASCII
/// delimiter, so the range is always a char boundary.
fn slice(text: &str, start: usize, end: usize) -> &str {
    text.get(start..end).unwrap_or_default()
}
