//! Subcommand implementations.
//!
//! Each command renders its output into a `String` so it can be checked
//! without a terminal; `main` prints it.

use anyhow::{Context, Result};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use lal_core::{codec, Document, Entry};
use std::fmt::Write as _;
use std::path::Path;

const MASK: &str = "********";

/// Line counts gathered while decoding a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub entries: usize,
    pub invalid: usize,
    pub comments: usize,
    pub skipped: usize,
}

impl Summary {
    /// Summarize the result of decoding `text`.
    pub fn of(text: &str, document: &Document) -> Self {
        let non_blank = text.lines().filter(|line| !line.trim().is_empty()).count();
        Self {
            entries: document.entries().count(),
            invalid: document.entries().filter(|e| e.is_invalid()).count(),
            comments: document.comments().count(),
            skipped: non_blank.saturating_sub(document.len()),
        }
    }
}

/// A scored search hit.
#[derive(Debug, Clone)]
pub struct SearchResult<'a> {
    pub entry: &'a Entry,
    pub score: i64,
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Decode a file and report counts. Returns `false` if `strict` and any
/// line was skipped.
pub fn check(path: &Path, strict: bool) -> Result<(String, bool)> {
    let text = read_text(path)?;
    let document = Document::parse(&text);
    let summary = Summary::of(&text, &document);

    let mut out = String::new();
    writeln!(out, "{}", path.display())?;
    writeln!(out, "  entries:  {} ({} invalid)", summary.entries, summary.invalid)?;
    writeln!(out, "  comments: {}", summary.comments)?;
    writeln!(out, "  skipped:  {}", summary.skipped)?;

    if summary.skipped > 0 {
        tracing::warn!("{} line(s) in {} did not parse", summary.skipped, path.display());
    }
    Ok((out, !(strict && summary.skipped > 0)))
}

/// Rewrite a file in canonical form.
///
/// With `check_only`, the file is left alone and the result is `false` when
/// it would change. Lines that do not parse would be lost by a rewrite, so
/// the file is only rewritten with them when `force` is set.
pub fn fmt(path: &Path, check_only: bool, force: bool) -> Result<(String, bool)> {
    let text = read_text(path)?;
    let document = Document::parse(&text);
    let summary = Summary::of(&text, &document);
    let formatted = document
        .to_lal_string()
        .with_context(|| format!("Failed to encode {}", path.display()))?;

    if formatted == text {
        return Ok((format!("{} is already formatted\n", path.display()), true));
    }
    if summary.skipped > 0 && !force {
        tracing::warn!("{} line(s) in {} did not parse", summary.skipped, path.display());
        let out = format!(
            "{}: {} line(s) did not parse and would be dropped; not reformatting (use --force)\n",
            path.display(),
            summary.skipped
        );
        return Ok((out, false));
    }
    if check_only {
        return Ok((format!("{} would be reformatted\n", path.display()), false));
    }

    std::fs::write(path, &formatted)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Reformatted {}", path.display());
    Ok((format!("{} reformatted\n", path.display()), true))
}

/// Render one entry as a tab-separated row.
pub fn format_entry(entry: &Entry, mask_passwords: bool) -> String {
    let password = if mask_passwords { MASK } else { entry.password() };
    let mut row = String::new();
    if entry.is_invalid() {
        row.push(codec::INVALID_MARKER);
    }
    row.push_str(&format!(
        "{}\t{}\t{}\t{}",
        entry.login(),
        password,
        entry.display_name().unwrap_or("-"),
        entry.email().unwrap_or("-"),
    ));
    row
}

/// List all entries of a file.
pub fn list(path: &Path, mask_passwords: bool) -> Result<String> {
    let document = Document::open(path)?;
    let mut out = String::new();
    for entry in document.entries() {
        out.push_str(&format_entry(entry, mask_passwords));
        out.push('\n');
    }
    Ok(out)
}

/// Fuzzy-match `query` against login, display name and email.
///
/// Results are sorted by descending score and truncated to `limit`.
pub fn search_entries<'a>(document: &'a Document, query: &str, limit: usize) -> Vec<SearchResult<'a>> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<_> = document
        .entries()
        .filter_map(|entry| {
            let search_text = format!(
                "{} {} {}",
                entry.login(),
                entry.display_name().unwrap_or_default(),
                entry.email().unwrap_or_default()
            );
            matcher
                .fuzzy_match(&search_text, query)
                .map(|score| SearchResult { entry, score })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Search a file and render the hits.
pub fn search(path: &Path, query: &str, limit: usize, mask_passwords: bool) -> Result<String> {
    let document = Document::open(path)?;
    let results = search_entries(&document, query, limit);
    tracing::debug!("{} result(s) for {:?}", results.len(), query);

    let mut out = String::new();
    for result in results {
        out.push_str(&format_entry(result.entry, mask_passwords));
        out.push('\n');
    }
    Ok(out)
}
