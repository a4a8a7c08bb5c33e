//! Text TLV records: two-digit tag, two-digit decimal length, value
//!
//! Lengths count characters (Unicode scalar values) of the value.

use crate::error::{PayloadError, Result};
use std::fmt;

/// Largest value a two-digit length field can describe
pub const MAX_VALUE_LEN: usize = 99;

/// Two ASCII decimal digits identifying a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag([u8; 2]);

impl Tag {
    pub(crate) const fn from_digits(digits: [u8; 2]) -> Self {
        assert!(digits[0].is_ascii_digit() && digits[1].is_ascii_digit());
        Self(digits)
    }

    /// Parse a tag from text, requiring exactly two decimal digits
    pub fn parse(text: &str) -> Result<Self> {
        match text.as_bytes() {
            [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => Ok(Self([*a, *b])),
            _ => Err(PayloadError::InvalidTag(text.to_string())),
        }
    }

    /// Tag as text
    pub fn as_str(&self) -> &str {
        // Both bytes are ASCII digits
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvRecord {
    /// Record tag
    pub tag: Tag,
    /// Record value
    pub value: String,
}

impl TlvRecord {
    /// Create a record
    pub fn new(tag: Tag, value: impl Into<String>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }

    /// Length of the value in characters
    pub fn value_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Encode back to `tag + LL + value`
    pub fn encode(&self) -> Result<String> {
        tlv_field(self.tag, &self.value)
    }

    /// Parse the value as a sequence of nested records
    pub fn nested(&self) -> Result<Vec<TlvRecord>> {
        TlvReader::new(&self.value).collect()
    }
}

/// Append `tag + LL + value` to `out`
///
/// Fails without touching `out` when the value exceeds [`MAX_VALUE_LEN`].
pub fn write_field(out: &mut String, tag: Tag, value: &str) -> Result<()> {
    let len = value.chars().count();
    if len > MAX_VALUE_LEN {
        return Err(PayloadError::ValueTooLong {
            tag: tag.to_string(),
            len,
        });
    }
    out.push_str(tag.as_str());
    out.push_str(&format!("{len:02}"));
    out.push_str(value);
    Ok(())
}

/// Build a single `tag + LL + value` field
pub fn tlv_field(tag: Tag, value: &str) -> Result<String> {
    let mut out = String::with_capacity(4 + value.len());
    write_field(&mut out, tag, value)?;
    Ok(out)
}

/// Split after `n` characters, `None` if the text is shorter
fn split_chars(text: &str, n: usize) -> Option<(&str, &str)> {
    if n == 0 {
        return Some(("", text));
    }
    match text.char_indices().nth(n) {
        Some((idx, _)) => Some(text.split_at(idx)),
        None if text.chars().count() == n => Some((text, "")),
        None => None,
    }
}

/// Iterator over the records of a TLV string
///
/// Stops after the first error.
pub struct TlvReader<'a> {
    rest: &'a str,
    offset: usize,
}

impl<'a> TlvReader<'a> {
    /// Start reading at the beginning of `text`
    pub fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            offset: 0,
        }
    }

    /// Character offset of the next record
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn read_record(&mut self) -> Result<TlvRecord> {
        let start = self.offset;
        let (header, body) = split_chars(self.rest, 4).ok_or(PayloadError::Truncated(start))?;
        let (tag_text, len_text) = split_chars(header, 2).ok_or(PayloadError::Truncated(start))?;

        let tag = Tag::parse(tag_text)?;
        if !len_text.bytes().all(|b| b.is_ascii_digit()) || len_text.len() != 2 {
            return Err(PayloadError::InvalidLength {
                field: len_text.to_string(),
                offset: start,
            });
        }
        let len: usize = len_text
            .parse()
            .map_err(|_| PayloadError::InvalidLength {
                field: len_text.to_string(),
                offset: start,
            })?;

        let (value, rest) = split_chars(body, len).ok_or(PayloadError::Truncated(start))?;
        self.rest = rest;
        self.offset += 4 + len;
        Ok(TlvRecord::new(tag, value))
    }
}

impl Iterator for TlvReader<'_> {
    type Item = Result<TlvRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let record = self.read_record();
        if record.is_err() {
            self.rest = "";
        }
        Some(record)
    }
}
