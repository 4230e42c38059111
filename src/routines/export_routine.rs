use error_stack::ResultExt;
use tracing::instrument;

use crate::{
    config::app_config::AppConfig,
    output::JsonWriter,
    sheets::{spreadsheet_manager::SpreadsheetManager, spreadsheet_read::SpreadsheetRead},
    transform::{transform, Output, TransformOptions},
};

use super::routine::{Routine, RoutineError};

/// Fetches the school sheet, reshapes it and writes the JSON document.
pub struct ExportRoutine<R> {
    reader: R,
    range: Box<str>,
    options: TransformOptions,
    writer: JsonWriter,
}

impl<R: SpreadsheetRead + Send + Sync> ExportRoutine<R> {
    pub fn new(
        reader: R,
        range: impl Into<Box<str>>,
        options: TransformOptions,
        writer: JsonWriter,
    ) -> Self {
        Self {
            reader,
            range: range.into(),
            options,
            writer,
        }
    }

    /// Runs fetch, transform and write, returning what was written.
    #[instrument(skip(self), fields(range = %self.range))]
    pub async fn export(&self) -> error_stack::Result<Output, RoutineError> {
        tracing::info!("Fetching range {}", self.range);
        let grid = self
            .reader
            .read_grid(&self.range)
            .await
            .change_context(RoutineError::Fetch)?;

        let output = if grid.is_empty() {
            tracing::warn!("No data found.");
            Output::empty(self.options.shape)
        } else {
            tracing::debug!("Fetched {} rows", grid.len());
            let output = transform(&grid, &self.options);
            tracing::info!("Transformed {} records", output.len());
            output
        };

        self.writer
            .write(&output)
            .await
            .change_context(RoutineError::Write)?;

        Ok(output)
    }
}

#[async_trait::async_trait]
impl<R: SpreadsheetRead + Send + Sync> Routine for ExportRoutine<R> {
    fn name(&self) -> &str {
        "ExportRoutine"
    }

    async fn run(&self) -> error_stack::Result<(), RoutineError> {
        self.export().await.map(|_| ())
    }
}

/// Authenticates, then builds and runs the export routine described by
/// `config`.
#[instrument(skip(config))]
pub async fn run_export(config: AppConfig) -> error_stack::Result<(), RoutineError> {
    let options = config
        .transform
        .to_options()
        .change_context(RoutineError::InvalidConfiguration)?;

    let range = config.sheets.range.clone();
    let spreadsheet_manager = SpreadsheetManager::new(config.sheets)
        .await
        .change_context(RoutineError::Connection)?;

    let routine = ExportRoutine::new(
        spreadsheet_manager,
        range,
        options,
        JsonWriter::new(config.output.path),
    );

    routine.run().await?;
    tracing::info!("✅ {}: OK", routine.name());
    Ok(())
}
