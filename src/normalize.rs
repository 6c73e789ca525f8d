//! Entry normalization.
//!
//! Maps each [`RawRecord`] to one [`BibEntry`]. Every function here is pure;
//! the only shared state is the read-only lookup tables in [`crate::tables`].

use crate::bibtex::{BibtexField, RawRecord};
use crate::tables::{EntryCategory, canonical_author, category_for};
use crate::utils::{collapse_whitespace, flatten_newlines, strip_brace_groups};
use crate::{BibEntry, ConversionError, Result};
use itertools::Itertools;
use tracing::debug;

/// Prefix turning a bare DOI into a resolvable link.
pub const DOI_RESOLVER: &str = "https://doi.org/";

/// Separator between authors in a BibTeX `author` field.
const AUTHOR_SEPARATOR: &str = " and ";

/// Splits an `author` field into display names.
///
/// Each `Last, First Middle` author becomes `First Middle Last`, and the
/// composed name is then replaced by its canonical spelling if it has one.
/// Malformed names are kept on a best-effort basis, and every `and`-separated
/// segment yields exactly one name, so an empty field gives one empty name.
///
/// # Examples
///
/// ```
/// use bib2yaml::normalize::normalize_authors;
///
/// assert_eq!(
///     normalize_authors("Lange, S. and Backofen, Rolf"),
///     vec!["Sita J. Saunders", "Rolf Backofen"]
/// );
/// ```
pub fn normalize_authors(raw_authors: &str) -> Vec<String> {
    let authors = collapse_whitespace(&flatten_newlines(raw_authors));
    authors.split(AUTHOR_SEPARATOR).map(format_author).collect()
}

/// Turns one `Last, First` author into `First Last` and applies the alias table.
fn format_author(author: &str) -> String {
    let mut parts = author.split(',').map(str::trim);
    let family = parts.next().unwrap_or_default();
    let given = parts.join(" ");
    let full_name = format!("{} {}", given, family).trim().to_string();

    match canonical_author(&full_name) {
        Some(canonical) => canonical.to_string(),
        None => full_name,
    }
}

/// Removes one layer of brace protection, collapses whitespace and trims.
///
/// Callers flatten newlines first; brace groups spanning a line break are
/// otherwise left alone.
pub fn normalize_title(raw_title: &str) -> String {
    let title = strip_brace_groups(raw_title);
    collapse_whitespace(&title).trim().to_string()
}

/// Maps a raw entry type tag to its display category.
pub fn classify_type(raw_entry_type: &str) -> EntryCategory {
    category_for(raw_entry_type).unwrap_or_default()
}

/// Picks the entry's link, preferring a non-empty DOI over the URL.
///
/// Anything not already starting with `http` or `www` is treated as a bare
/// DOI and prefixed with [`DOI_RESOLVER`].
pub fn normalize_link(doi: Option<&str>, url: Option<&str>) -> String {
    let link = doi
        .filter(|doi| !doi.is_empty())
        .or(url)
        .unwrap_or_default();

    if link.starts_with("http") || link.starts_with("www") {
        link.to_string()
    } else {
        format!("{}{}", DOI_RESOLVER, link)
    }
}

/// Picks the venue, falling back to a normalized `booktitle` when the entry
/// has no journal.
pub fn normalize_journal(journal: Option<&str>, booktitle: Option<&str>) -> String {
    match journal.filter(|journal| !journal.is_empty()) {
        Some(journal) => journal.to_string(),
        None => normalize_title(&flatten_newlines(booktitle.unwrap_or_default())),
    }
}

/// Parses the publication year.
fn parse_year(record: &RawRecord) -> Result<i32> {
    let raw_year = record.field(&BibtexField::Year);
    raw_year
        .and_then(|year| year.trim().parse::<i32>().ok())
        .ok_or_else(|| ConversionError::InvalidYear {
            id: record.id().to_string(),
            value: raw_year.map(str::to_string),
        })
}

/// Builds the output entry for one record.
///
/// # Errors
///
/// Returns `ConversionError::InvalidYear` if the `year` field is missing or
/// not an integer.
pub fn build_entry(record: &RawRecord) -> Result<BibEntry> {
    let year = parse_year(record)?;

    let entry = BibEntry {
        id: record.id().to_string(),
        title: normalize_title(&flatten_newlines(
            record.field(&BibtexField::Title).unwrap_or_default(),
        )),
        authors: normalize_authors(record.field(&BibtexField::Author).unwrap_or_default()),
        journal: normalize_journal(
            record.field(&BibtexField::Journal),
            record.field(&BibtexField::BookTitle),
        ),
        year,
        entry_type: classify_type(record.entry_type()),
        doi: normalize_link(
            record.field(&BibtexField::Doi),
            record.field(&BibtexField::Url),
        ),
        pdf: record
            .field(&BibtexField::Pdf)
            .unwrap_or_default()
            .to_string(),
        abstract_text: flatten_newlines(record.field(&BibtexField::Abstract).unwrap_or_default())
            .trim()
            .to_string(),
    };

    debug!(id = %entry.id, line = record.line(), "normalized entry");
    Ok(entry)
}
