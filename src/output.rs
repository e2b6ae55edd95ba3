//! Output formatting and persistence for derived tables.
//!
//! Tables are recomputed fully on each run, so the writer replaces the
//! target file rather than appending.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

/// Writes a derived table to a CSV file, headers included.
pub fn write_table<S: Serialize>(path: &str, rows: &[S]) -> Result<()> {
    debug!(path, rows = rows.len(), "Writing table");

    let mut writer = WriterBuilder::new().from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Logs a derived table as pretty-printed JSON for ad-hoc inspection.
pub fn print_json<S: Serialize>(rows: &[S]) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}
