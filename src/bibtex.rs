//! BibTeX format parser implementation.
//!
//! Provides the citation-file reader that feeds the normalizer. Field values
//! are returned exactly as written, so brace protection and line breaks are
//! still present for [`crate::normalize`] to deal with.
//!
//! # Example
//!
//! ```
//! use bib2yaml::{BibtexParser, RecordParser};
//!
//! let input = r#"@article{saunders2019,
//!   author = {Lange, S. and Backofen, Rolf},
//!   title  = {An {RNA} Study},
//!   year   = 2019,
//! }"#;
//!
//! let records = BibtexParser::new().parse(input).unwrap();
//! assert_eq!(records[0].id(), "saunders2019");
//! assert_eq!(records[0].get("title"), Some("An {RNA} Study"));
//! ```

mod parse;
mod structure;
mod tags;

pub use structure::RawRecord;
pub use tags::BibtexField;

use crate::{RecordParser, Result};
use parse::bibtex_parse;

/// Parser for BibTeX files.
///
/// By default only the standard BibTeX entry types are returned; entries such
/// as `@online` or `@software` are skipped.
#[derive(Debug, Clone, Default)]
pub struct BibtexParser {
    keep_nonstandard: bool,
}

impl BibtexParser {
    /// Creates a new BibTeX parser instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use bib2yaml::BibtexParser;
    /// let parser = BibtexParser::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also return entries whose type is not a standard BibTeX type.
    #[must_use]
    pub fn with_nonstandard_types(mut self, keep: bool) -> Self {
        self.keep_nonstandard = keep;
        self
    }
}

impl RecordParser for BibtexParser {
    /// Parses a string containing zero or more BibTeX entries.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::Parse` if an entry is structurally malformed
    fn parse(&self, input: &str) -> Result<Vec<RawRecord>> {
        Ok(bibtex_parse(input, self.keep_nonstandard)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConversionError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_records() {
        let input = r#"
@article{first,
  author = {Saunders, Sita J.},
  year = {2018},
}
@software{tool, title = {A Tool}}
@phdthesis{second, year = 2012}
"#;
        let records = BibtexParser::new().parse(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("author"), Some("Saunders, Sita J."));
        assert_eq!(records[1].entry_type(), "phdthesis");
    }

    #[test]
    fn test_parse_keeping_nonstandard_types() {
        let parser = BibtexParser::new().with_nonstandard_types(true);
        let records = parser.parse("@software{tool, title = {A Tool}}").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].entry_type(), "software");
    }

    #[test]
    fn test_parse_error_is_conversion_error() {
        let result = BibtexParser::new().parse("@article{broken title = {x}}");
        match result {
            Err(ConversionError::Parse(error)) => assert_eq!(error.line, 1),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }
}
