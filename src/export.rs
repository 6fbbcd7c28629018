//! Persistence of merged canonical output.
//!
//! The persisted layout is a JSON array of flat records, every record
//! carrying all 36 standard field names with `null` for unknowns. This is
//! the compatibility surface the surrounding system reads.

use crate::error::{ReconcileError, Result};
use crate::schema::CanonicalRecord;
use log::info;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub fn records_to_json(records: &[CanonicalRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn write_merged_records(path: impl AsRef<Path>, records: &[CanonicalRecord]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, records_to_json(records)?)?;
    info!("wrote {} merged records to {}", records.len(), path.display());
    Ok(())
}

pub fn read_merged_records(path: impl AsRef<Path>) -> Result<Vec<CanonicalRecord>> {
    let text = fs::read_to_string(path.as_ref())?;
    let value: Value = serde_json::from_str(&text)?;
    if !value.is_array() {
        return Err(ReconcileError::UnexpectedLayout(format!(
            "{} does not hold a JSON array of records",
            path.as_ref().display()
        )));
    }
    Ok(serde_json::from_value(value)?)
}
