use error_stack::ResultExt;
use google_sheets4::oauth2::{self, authenticator::Authenticator};

use super::{
    http_client::{SheetsClient, SheetsConnector},
    spreadsheet_manager::SpreadsheetManagerError,
};
use crate::adapters::config::sheets_config::SpreadsheetConfig;

/// Builds a service account authenticator from the key file named in the config.
pub async fn auth(
    config: &SpreadsheetConfig,
    client: SheetsClient,
) -> error_stack::Result<Authenticator<SheetsConnector>, SpreadsheetManagerError> {
    let priv_key_path: &str = config.priv_key.as_ref();
    let secret: oauth2::ServiceAccountKey = oauth2::read_service_account_key(priv_key_path)
        .await
        .change_context(SpreadsheetManagerError::CredentialsUnavailable)
        .attach_printable_lazy(|| {
            format!(
                "could not read service account private key at '{}'",
                priv_key_path
            )
        })?;

    oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .change_context(SpreadsheetManagerError::CredentialsUnavailable)
        .attach_printable("could not create an authenticator")
}
