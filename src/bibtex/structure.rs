//! BibTeX record data structures.
//!
//! A [`RawRecord`] is the hand-off point between the parser and the
//! normalizer: the cite key, the lower-cased entry type and the field values
//! exactly as written in the file (inner braces and line breaks included).

use crate::bibtex::tags::BibtexField;
use std::collections::HashMap;

/// A single citation record as read from a BibTeX file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Cite key (`ID`).
    pub(crate) id: String,
    /// Entry type tag (`ENTRYTYPE`), lower-cased by the parser.
    pub(crate) entry_type: String,
    /// Field values keyed by field name.
    pub(crate) fields: HashMap<BibtexField, String>,
    /// Line in the source file where the record starts; 0 when built by hand.
    pub(crate) line: usize,
}

impl RawRecord {
    /// Create an empty record.
    ///
    /// # Examples
    ///
    /// ```
    /// use bib2yaml::RawRecord;
    ///
    /// let record = RawRecord::new("smith2020", "article")
    ///     .with_field("year", "2020");
    /// assert_eq!(record.get("YEAR"), Some("2020"));
    /// ```
    pub fn new(id: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entry_type: entry_type.into(),
            fields: HashMap::new(),
            line: 0,
        }
    }

    /// Builder-style variant of [`RawRecord::insert`].
    #[must_use]
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, returning the value it replaced.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        self.fields.insert(BibtexField::from_name(name), value.into())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn entry_type(&self) -> &str {
        &self.entry_type
    }

    /// Line where the record starts in its source file.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get a field value by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.field(&BibtexField::from_name(name))
    }

    /// Get a field value by tag.
    pub fn field(&self, field: &BibtexField) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
