//! Exporters for canonical records: a pretty-printed JSON document and a
//! single-row CSV table. Rendering is pure; the `write_*` helpers add the
//! file I/O and map failures to `Error::Export`.
pub mod csv;
pub mod json;

use std::path::Path;

use crate::error::{Error, Result};

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents.as_bytes()).map_err(|source| Error::Export {
        path: path.to_path_buf(),
        source,
    })
}
