//! BibTeX field names and entry types.
//!
//! Only the fields the converter reads get their own variant; every other
//! field is carried as [`BibtexField::Unknown`] with its lower-cased name.
//! See: <https://www.bibtex.com/format/>

/// BibTeX field names.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub enum BibtexField {
    /// author - Authors joined by `and`, each `Last, First`
    Author,
    /// title - Title of the work
    Title,
    /// journal - Journal name
    Journal,
    /// booktitle - Title of the proceedings or collection
    BookTitle,
    /// year - Publication year
    Year,
    /// doi - Digital Object Identifier
    Doi,
    /// url - Web link
    Url,
    /// pdf - Link to a PDF copy
    Pdf,
    /// abstract - Abstract text
    Abstract,
    /// Any other field
    Unknown(String),
}

impl BibtexField {
    /// Convert a field name to a BibtexField (case-insensitive).
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        match name.as_str() {
            "author" => BibtexField::Author,
            "title" => BibtexField::Title,
            "journal" => BibtexField::Journal,
            "booktitle" => BibtexField::BookTitle,
            "year" => BibtexField::Year,
            "doi" => BibtexField::Doi,
            "url" => BibtexField::Url,
            "pdf" => BibtexField::Pdf,
            "abstract" => BibtexField::Abstract,
            _ => BibtexField::Unknown(name),
        }
    }
}

/// Entry types defined by standard BibTeX styles.
const STANDARD_ENTRY_TYPES: &[&str] = &[
    "article",
    "book",
    "booklet",
    "conference",
    "inbook",
    "incollection",
    "inproceedings",
    "manual",
    "mastersthesis",
    "misc",
    "phdthesis",
    "proceedings",
    "techreport",
    "unpublished",
];

/// Check whether a lower-cased entry type is one of the standard BibTeX types.
pub(crate) fn is_standard_entry_type(entry_type: &str) -> bool {
    STANDARD_ENTRY_TYPES.contains(&entry_type)
}

/// Predefined macros available without an `@string` definition.
pub(crate) const MONTH_MACROS: &[(&str, &str)] = &[
    ("jan", "January"),
    ("feb", "February"),
    ("mar", "March"),
    ("apr", "April"),
    ("may", "May"),
    ("jun", "June"),
    ("jul", "July"),
    ("aug", "August"),
    ("sep", "September"),
    ("oct", "October"),
    ("nov", "November"),
    ("dec", "December"),
];
