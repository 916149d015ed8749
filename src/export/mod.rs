//! Result export: sink abstraction plus JSON and CSV writers
//!
//! Sinks receive settled races one at a time and the final league tables at
//! the end of the season. Exporters serialize results unchanged; nothing is
//! recomputed at export time.

use crate::error::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

pub mod csv;
pub mod json;
pub mod sink;

// Re-export commonly used types
pub use csv::CsvExporter;
pub use json::JsonExporter;
pub use sink::ResultSink;

/// Create the per-race output directory, removing stale artifacts left over
/// from a previous run.
pub(crate) fn prepare_races_dir(output_dir: &Path) -> Result<()> {
    let races_dir = output_dir.join("races");
    if races_dir.exists() {
        fs::remove_dir_all(&races_dir)
            .with_context(|| format!("Failed to clear {}", races_dir.display()))?;
    }
    fs::create_dir_all(&races_dir)
        .with_context(|| format!("Failed to create output directory {}", races_dir.display()))?;
    Ok(())
}
