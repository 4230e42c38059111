use std::path::PathBuf;

use error_stack::ResultExt;
use thiserror::Error;
use tracing::instrument;

use crate::transform::Output;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to serialize records")]
    Serialize,
    #[error("Failed to write output file")]
    Write,
}

/// Writes the exported records as pretty-printed JSON, replacing whatever the
/// file held before.
#[derive(Debug, Clone)]
pub struct JsonWriter {
    path: PathBuf,
}

impl JsonWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[instrument(skip(output), fields(records = output.len()))]
    pub async fn write(&self, output: &Output) -> error_stack::Result<(), OutputError> {
        let json = serde_json::to_string_pretty(output).change_context(OutputError::Serialize)?;

        tokio::fs::write(&self.path, json)
            .await
            .change_context(OutputError::Write)
            .attach_printable_lazy(|| format!("Could not write {}", self.path.display()))?;

        tracing::info!("Wrote {} records to {}", output.len(), self.path.display());
        Ok(())
    }
}
