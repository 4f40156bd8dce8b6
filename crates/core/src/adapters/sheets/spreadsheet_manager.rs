use error_stack::ResultExt;
use google_sheets4::{
    api::{Scope, ValueRange},
    Sheets,
};
use std::fmt::Debug;
use thiserror::Error;
use tracing::instrument;

use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::domain::sheets::a1_notation::A1Notation;

use super::{
    auth::{self},
    http_client::{self, SheetsConnector},
};

pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    pub(super) hub: Sheets<SheetsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Error, Debug)]
pub enum SpreadsheetManagerError {
    #[error("Failed to load service account credentials")]
    CredentialsUnavailable,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write range")]
    FailedToWriteRange,
}

impl SpreadsheetManager {
    /// Authenticates once with the configured service account. Fails when the key file is
    /// missing or unusable.
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(
        config: SpreadsheetConfig,
    ) -> error_stack::Result<Self, SpreadsheetManagerError> {
        let client = http_client::http_client();
        let auth = auth::auth(&config, client.clone()).await?;
        let hub: Sheets<SheetsConnector> = Sheets::new(client, auth);

        Ok(SpreadsheetManager { config, hub })
    }

    #[instrument(skip(value_range))]
    pub(super) async fn write_range(
        &self,
        range_str: &A1Notation,
        value_range: ValueRange,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        self.hub
            .spreadsheets()
            .values_update(value_range, &self.config.spreadsheet_id, range_str.as_ref())
            .value_input_option(&self.config.value_input_option)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToWriteRange)
            .attach_printable_lazy(|| format!("Failed to write to range {} ", range_str))
    }
}
