//! Line codec: one grammar for decoding lines into records and back.
//!
//! A line is either a comment starting with `//`, or an entry of the form
//!
//! ```text
//! [.]login:password[ (display name)][ {email}][ [old password]]
//! ```
//!
//! Lines that match neither shape decode to nothing.

use crate::error::{LalError, Result};
use crate::models::{Entry, Record};
use regex::Regex;
use std::sync::OnceLock;

/// Prefix that turns a line into a comment.
pub const COMMENT_MARKER: &str = "//";

/// Leading character that flags an entry as invalid.
pub const INVALID_MARKER: char = '.';

const LOGIN_CLASS: &str = r"[A-Za-z0-9_@.\-]";
// Includes the delimiters of the optional groups.
const FIELD_CLASS: &str = r"[A-Za-z0-9_@!#$%^&*/(){}\[\]<>,.?|\-]";

fn entry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let pattern = format!(
            concat!(
                r"^(?P<login>{login}+):(?P<password>{field}+)",
                r"(?: \((?P<display_name>{field}+)\))?",
                r"(?: \{{(?P<email>{field}+)\}})?",
                r"(?: \[(?P<old_password>{field}+)\])?$",
            ),
            login = LOGIN_CLASS,
            field = FIELD_CLASS,
        );
        Regex::new(&pattern).expect("entry pattern is valid")
    })
}

/// Split off a leading invalidity marker.
///
/// Returns whether the marker was present and the remaining text, trimmed.
pub fn strip_invalid_marker(line: &str) -> (bool, &str) {
    match line.strip_prefix(INVALID_MARKER) {
        Some(rest) => (true, rest.trim()),
        None => (false, line),
    }
}

/// Decode one line.
///
/// Returns `Ok(None)` for lines that are neither a comment nor a well-formed
/// entry. Only an empty input is an error.
pub fn decode(line: &str) -> Result<Option<Record>> {
    if line.is_empty() {
        return Err(LalError::EmptyLine);
    }
    Ok(decode_trimmed(line.trim()))
}

fn decode_trimmed(line: &str) -> Option<Record> {
    if line.starts_with(COMMENT_MARKER) {
        return Some(Record::Comment(line.to_string()));
    }

    let (invalid, body) = strip_invalid_marker(line);
    let captures = entry_pattern().captures(body)?;
    let group = |name: &str| captures.name(name).map(|m| m.as_str().to_string());

    Some(Record::Entry(Entry {
        login: group("login")?,
        password: group("password")?,
        display_name: group("display_name"),
        email: group("email"),
        old_password: group("old_password"),
        invalid,
    }))
}

/// Encode one record as a line, without a line terminator.
pub fn encode(record: &Record) -> Result<String> {
    match record {
        Record::Comment(text) if !text.is_empty() => Ok(text.clone()),
        Record::Comment(_) => Err(LalError::MissingCredentials),
        Record::Entry(entry) => encode_entry(entry),
    }
}

fn encode_entry(entry: &Entry) -> Result<String> {
    if !entry.has_credentials() {
        return Err(LalError::MissingCredentials);
    }

    let mut line = String::new();
    if entry.invalid {
        line.push(INVALID_MARKER);
    }
    line.push_str(&entry.login);
    line.push(':');
    line.push_str(&entry.password);

    // An empty optional field is written as an absent group.
    if let Some(display_name) = entry.display_name().filter(|s| !s.is_empty()) {
        line.push_str(&format!(" ({display_name})"));
    }
    if let Some(email) = entry.email().filter(|s| !s.is_empty()) {
        line.push_str(&format!(" {{{email}}}"));
    }
    if let Some(old_password) = entry.old_password().filter(|s| !s.is_empty()) {
        line.push_str(&format!(" [{old_password}]"));
    }

    Ok(line)
}

/// Decode a sequence of lines, keeping record order.
///
/// Blank and malformed lines are skipped.
pub fn decode_document<I, S>(lines: I) -> Vec<Record>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        match decode_trimmed(line) {
            Some(record) => records.push(record),
            None => tracing::debug!(line = index + 1, "Skipping malformed line"),
        }
    }
    records
}

/// Encode records into a document, one line each, every line terminated by
/// `\n`. An empty slice gives an empty string.
pub fn encode_document(records: &[Record]) -> Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&encode(record)?);
        out.push('\n');
    }
    Ok(out)
}
