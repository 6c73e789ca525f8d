//! Convert BibTeX bibliographies into normalized YAML publication listings.
//!
//! `bib2yaml` reads a `.bib` file, normalizes every entry into a fixed set of
//! display fields and writes them as YAML, e.g. for a website's publication
//! page.
//!
//! # Key Features
//!
//! - **BibTeX reading**: `@string` macros, `#` concatenation, braced and
//!   quoted values, `@comment`/`@preamble` blocks
//! - **Author names**: `Last, First` turned into `First Last`, with known
//!   misspellings mapped to one canonical name
//! - **Titles**: brace protection removed and whitespace collapsed
//! - **Entry types**: raw tags grouped into display categories
//! - **Links**: bare DOIs turned into `https://doi.org/` links
//!
//! # Basic Usage
//!
//! ```rust
//! use bib2yaml::{BibtexParser, RecordParser, convert, write_yaml};
//!
//! let input = r#"@article{saunders2019,
//!   author  = {Lange, S. and Backofen, Rolf},
//!   title   = {An {RNA} Study},
//!   journal = {Nature},
//!   year    = {2019},
//!   doi     = {10.1000/xyz},
//! }"#;
//!
//! let records = BibtexParser::new().parse(input).unwrap();
//! let entries = convert(&records).unwrap();
//! assert_eq!(entries[0].authors, vec!["Sita J. Saunders", "Rolf Backofen"]);
//! assert_eq!(entries[0].doi, "https://doi.org/10.1000/xyz");
//!
//! let mut yaml = Vec::new();
//! write_yaml(&entries, &mut yaml).unwrap();
//! assert!(String::from_utf8(yaml).unwrap().starts_with("- id: saunders2019\n"));
//! ```
//!
//! # Error Handling
//!
//! All operations return the crate's [`Result`] type wrapping
//! [`ConversionError`]. Any error aborts the whole conversion:
//!
//! ```rust
//! use bib2yaml::{ConversionError, RawRecord, convert};
//!
//! let records = vec![RawRecord::new("undated", "article")];
//! match convert(&records) {
//!     Err(ConversionError::InvalidYear { id, .. }) => assert_eq!(id, "undated"),
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

pub mod bibtex;
mod error;
pub mod normalize;
mod regex;
pub mod tables;
mod utils;
pub mod yaml;

// Reexports
pub use bibtex::{BibtexField, BibtexParser, RawRecord};
pub use error::{ConversionError, ParseError};
pub use normalize::build_entry;
pub use tables::EntryCategory;
pub use yaml::{write_yaml, write_yaml_file};

/// A specialized Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;

/// A normalized bibliography entry, ready to be written out.
///
/// Fields serialize in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibEntry {
    /// Cite key
    pub id: String,
    pub title: String,
    /// Display names in citation order
    pub authors: Vec<String>,
    /// Journal, or the proceedings/collection title
    pub journal: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub entry_type: EntryCategory,
    /// Resolvable link to the work
    pub doi: String,
    pub pdf: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

/// Trait for implementing citation file readers.
pub trait RecordParser {
    /// Parse a string containing zero or more citation records.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError` if the input is malformed
    fn parse(&self, input: &str) -> Result<Vec<RawRecord>>;
}

/// Normalizes every record, keeping input order.
///
/// Stops at the first record that fails; no partial result is returned.
pub fn convert(records: &[RawRecord]) -> Result<Vec<BibEntry>> {
    records.iter().map(build_entry).collect()
}

/// Converts the BibTeX file at `input` into the YAML file at `output`.
///
/// Every entry is converted before the output file is touched, so a failing
/// record leaves no new output behind. Returns the number of entries written.
pub fn convert_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize> {
    convert_file_with(&BibtexParser::new(), input, output)
}

/// Like [`convert_file`], reading the input with a custom parser.
pub fn convert_file_with<P: RecordParser>(
    parser: &P,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<usize> {
    let input = input.as_ref();
    info!(path = %input.display(), "reading bibliography");

    let text = fs::read_to_string(input)?;
    let records = parser.parse(&text)?;
    let entries = convert(&records)?;
    write_yaml_file(&entries, output)?;

    Ok(entries.len())
}
