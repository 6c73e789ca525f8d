//! YAML output.
//!
//! Each entry is written as its own one-element YAML sequence followed by a
//! blank line, so the file reads as a list of blocks in input order:
//!
//! ```yaml
//! - id: saunders2019
//!   title: An RNA Study
//!   authors:
//!   - Sita J. Saunders
//!   journal: Proc. GCB
//!   year: 2019
//!   type: Conference
//!   doi: https://doi.org/10.1000/xyz
//!   pdf: ''
//!   abstract: ''
//!
//! ```

use crate::{BibEntry, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes entries to `writer`, one blank-line separated block per entry.
pub fn write_yaml<W: Write>(entries: &[BibEntry], mut writer: W) -> Result<()> {
    for entry in entries {
        let block = serde_yaml::to_string(std::slice::from_ref(entry))?;
        writer.write_all(block.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes entries to the file at `path`, replacing any existing content.
///
/// Missing parent directories are created before the file is opened.
pub fn write_yaml_file(entries: &[BibEntry], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!(directory = %parent.display(), "creating output directory");
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    write_yaml(entries, BufWriter::new(file))?;
    info!(path = %path.display(), entries = entries.len(), "wrote YAML bibliography");
    Ok(())
}
