use tracing::instrument;

use super::{
    grid::{Grid, IntoGrid},
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
};

pub trait SpreadsheetRead {
    /// Reads `range` as a grid of strings. A range holding no values yields
    /// an empty grid.
    fn read_grid(
        &self,
        range: &str,
    ) -> impl std::future::Future<Output = error_stack::Result<Grid, SpreadsheetManagerError>> + Send;
}

impl SpreadsheetRead for SpreadsheetManager {
    #[instrument]
    async fn read_grid(&self, range: &str) -> error_stack::Result<Grid, SpreadsheetManagerError> {
        let value_range = self.read_range(range).await?;

        Ok(value_range.values.unwrap_or_default().into_grid())
    }
}
