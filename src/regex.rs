//! Re-exports from either `regex` or `regex_lite`, depending on features.
//!
//! `lite` wins when both are enabled. Its `\s` class is ASCII-only, so Unicode
//! spaces such as U+00A0 are not collapsed in that build.

#[cfg(feature = "lite")]
pub(crate) use regex_lite::Regex;
#[cfg(all(feature = "regex", not(feature = "lite")))]
pub(crate) use regex::Regex;

#[cfg(not(any(feature = "regex", feature = "lite")))]
compile_error!("bib2yaml requires the \"regex\" or \"lite\" feature to be enabled");
