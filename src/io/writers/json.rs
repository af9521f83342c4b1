use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::types::CanonicalRecord;

/// Two-space indented JSON, keys in `CanonicalRecord` field order, non-ASCII
/// text written as-is.
pub fn render_json(record: &CanonicalRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

pub fn write_json(record: &CanonicalRecord, path: &Path) -> Result<()> {
    let json_string = render_json(record)?;
    super::write_file(path, &json_string)?;
    info!("JSON saved: {:?}", path);
    Ok(())
}
