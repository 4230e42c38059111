use std::fmt::Debug;

use error_stack::ResultExt;
use google_sheets4::{api::ValueRange, Sheets};
use thiserror::Error;
use tracing::instrument;

use crate::config::sheets_config::SpreadsheetConfig;

use super::{
    auth::{self},
    http_client::{self, HttpsConnector},
};

pub const READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    pub(super) hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Error, Debug)]
pub enum SpreadsheetManagerError {
    #[error("Failed to authenticate against Google Sheets")]
    Authentication,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(config: SpreadsheetConfig) -> error_stack::Result<Self, SpreadsheetManagerError> {
        let client = http_client::http_client();
        let auth = auth::auth(&config.auth, client.clone()).await?;
        let hub = Sheets::new(client, auth);

        Ok(SpreadsheetManager { config, hub })
    }

    #[instrument]
    pub async fn read_range(
        &self,
        range: &str,
    ) -> error_stack::Result<ValueRange, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range)
            .add_scope(READONLY_SCOPE)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("Failed to fetch values for range {}", range))?;

        let value_range = response.1;
        Ok(value_range)
    }
}
