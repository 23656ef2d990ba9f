use std::path::Path;

use tracing::info;

use crate::constants::dataset::DELIMITER;
use crate::types::{Result, ResultExt, ResultRecord};

/// Write `uid;type;request` rows in the given order, creating parent directories
pub fn write_results(path: &Path, records: &[ResultRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_path(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_path(path)
        .with_path(path)?;

    if records.is_empty() {
        writer.write_record(["uid", "type", "request"])?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!("Wrote {} results to {}", records.len(), path.display());
    Ok(())
}
