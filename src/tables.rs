//! Static lookup tables used during normalization.
//!
//! Both tables are built once on first use and never mutated.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Canonical spellings for authors whose names appear inconsistently across
/// entries. Keys are fully composed `"<given> <family>"` names.
const AUTHOR_ALIASES: &[(&str, &str)] = &[
    ("S. Lange", "Sita J. Saunders"),
    ("S. J. Lange", "Sita J. Saunders"),
    ("S. J. Saunders", "Sita J. Saunders"),
    ("Sita J. Lange", "Sita J. Saunders"),
    ("R. Backofen", "Rolf Backofen"),
    ("Martin Mann", "Martin Raden"),
    ("M. Mann", "Martin Raden"),
    ("Bjorn Gruning", "Björn Grüning"),
    ("Bjorn Grüning", "Björn Grüning"),
    ("Björn Gruning", "Björn Grüning"),
    ("Bjoern Gruening", "Björn Grüning"),
    ("Björn A. Grüning", "Björn Grüning"),
    ("Björn A Grüning", "Björn Grüning"),
    ("Björn Andreas Grüning", "Björn Grüning"),
    ("Berenice Batut", "Bérénice Batut"),
    ("Tran Van Dinh", "Van Dinh Tran"),
    ("Dinh Van Tran", "Van Dinh Tran"),
    ("Dinh V Tran", "Van Dinh Tran"),
    ("Omer Alkhnbashi", "Omer S. Alkhnbashi"),
    ("Omer S Alkhnbashi", "Omer S. Alkhnbashi"),
];

/// Entry type tags and the display category they belong to.
///
/// Matching is case-sensitive. The parser lower-cases entry types, so the
/// `PhDThesis` key only matches records built by hand.
const ENTRY_TYPES: &[(&str, EntryCategory)] = &[
    ("article", EntryCategory::Article),
    ("inproceedings", EntryCategory::Conference),
    ("proceedings", EntryCategory::Conference),
    ("conference", EntryCategory::Conference),
    ("incollection", EntryCategory::Book),
    ("inbook", EntryCategory::Book),
    ("book", EntryCategory::Book),
    ("booklet", EntryCategory::Book),
    ("PhDThesis", EntryCategory::PhdThesis),
    ("mastersthesis", EntryCategory::MastersThesis),
];

static ALIAS_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| AUTHOR_ALIASES.iter().copied().collect());

static TYPE_TABLE: Lazy<HashMap<&'static str, EntryCategory>> =
    Lazy::new(|| ENTRY_TYPES.iter().copied().collect());

/// Display category of a bibliography entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryCategory {
    Article,
    Conference,
    Book,
    #[serde(rename = "PhD Thesis")]
    PhdThesis,
    #[serde(rename = "Master's Thesis")]
    MastersThesis,
    #[default]
    Other,
}

impl EntryCategory {
    /// The label written to the output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "Article",
            Self::Conference => "Conference",
            Self::Book => "Book",
            Self::PhdThesis => "PhD Thesis",
            Self::MastersThesis => "Master's Thesis",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up the canonical spelling of a composed author name.
pub fn canonical_author(name: &str) -> Option<&'static str> {
    ALIAS_TABLE.get(name).copied()
}

/// Looks up the category for a raw entry type tag.
pub fn category_for(entry_type: &str) -> Option<EntryCategory> {
    TYPE_TABLE.get(entry_type).copied()
}
