use error_stack::ResultExt;
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use tracing::instrument;

use crate::config::sheets_config::AuthConfig;

use super::{
    http_client::{HttpClient, HttpsConnector},
    spreadsheet_manager::SpreadsheetManagerError,
};

#[instrument(skip(client))]
pub async fn auth(
    config: &AuthConfig,
    client: HttpClient,
) -> error_stack::Result<Authenticator<HttpsConnector>, SpreadsheetManagerError> {
    match config {
        AuthConfig::Installed {
            credentials_path,
            token_path,
        } => {
            let secret = oauth2::read_application_secret(credentials_path)
                .await
                .change_context(SpreadsheetManagerError::Authentication)
                .attach_printable_lazy(|| {
                    format!(
                        "Could not read OAuth client credentials at '{}'",
                        credentials_path.display()
                    )
                })?;

            oauth2::InstalledFlowAuthenticator::with_client(
                secret,
                oauth2::InstalledFlowReturnMethod::HTTPRedirect,
                client,
            )
            .persist_tokens_to_disk(token_path)
            .build()
            .await
            .change_context(SpreadsheetManagerError::Authentication)
            .attach_printable_lazy(|| {
                format!("Could not use token cache at '{}'", token_path.display())
            })
        }
        AuthConfig::ServiceAccount { priv_key } => {
            let secret = oauth2::read_service_account_key(priv_key)
                .await
                .change_context(SpreadsheetManagerError::Authentication)
                .attach_printable_lazy(|| {
                    format!(
                        "Could not read service account private key at '{}'",
                        priv_key.display()
                    )
                })?;

            oauth2::ServiceAccountAuthenticator::with_client(secret, client)
                .build()
                .await
                .change_context(SpreadsheetManagerError::Authentication)
        }
    }
}
