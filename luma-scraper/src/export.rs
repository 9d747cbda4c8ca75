use std::fs::File;
use std::path::Path;

use tracing::info;

use luma_core::common::error::{Result, ScraperError};
use luma_core::domain::Event;

pub fn write_json(events: &[Event], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, events)?;
    info!(count = events.len(), path = %path.display(), "exported events to JSON");
    Ok(())
}

pub fn write_csv(events: &[Event], path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).map_err(|e| ScraperError::Export(e.to_string()))?;
    for event in events {
        writer
            .serialize(event)
            .map_err(|e| ScraperError::Export(e.to_string()))?;
    }
    writer.flush()?;
    info!(count = events.len(), path = %path.display(), "exported events to CSV");
    Ok(())
}
