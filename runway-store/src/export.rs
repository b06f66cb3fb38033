use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use runway_core::TicketSummary;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write ticket summary to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    fn io(path: &Path, source: io::Error) -> Self {
        ExportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Creates or truncates `path` and writes the labeled summary lines.
pub fn write_summary(path: &Path, summary: &TicketSummary) -> Result<(), ExportError> {
    let mut file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    file.write_all(summary.render().as_bytes())
        .map_err(|e| ExportError::io(path, e))?;

    info!(path = %path.display(), ticket = %summary.ticket_number, "Ticket summary saved");
    Ok(())
}

/// Appends the summary followed by a blank separator line.
pub fn append_summary(path: &Path, summary: &TicketSummary) -> Result<(), ExportError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ExportError::io(path, e))?;

    let mut block = summary.render();
    block.push('\n');
    file.write_all(block.as_bytes())
        .map_err(|e| ExportError::io(path, e))?;

    info!(path = %path.display(), ticket = %summary.ticket_number, "Ticket summary appended");
    Ok(())
}
