//! Output file naming derived from the user's query.
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("static regex"));

/// Drop everything that is neither a word character nor whitespace, then turn
/// spaces into underscores.
pub fn sanitize_file_stem(query: &str) -> Result<String> {
    let stem = NON_WORD.replace_all(query, "").replace(' ', "_");
    if stem.trim_matches('_').trim().is_empty() {
        return Err(Error::InvalidFileName {
            query: query.to_string(),
        });
    }
    Ok(stem)
}

/// `(json, csv)` paths for a stem inside `dir`.
pub fn export_paths(dir: &Path, stem: &str) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("{stem}.json")),
        dir.join(format!("{stem}.csv")),
    )
}
