use std::sync::Arc;

use error_stack::ResultExt;
use tracing::instrument;

use crate::domain::sheets::a1_notation::A1Notation;
use crate::ports::lead_store::{LeadStore, LeadStoreError};

use super::{
    spreadsheet_manager::SpreadsheetManager, spreadsheet_read::SpreadsheetRead,
    spreadsheet_write::SpreadsheetWrite,
};

/// Lead storage on a Google Sheets spreadsheet.
#[derive(Debug)]
pub struct SheetsLeadStore {
    pub spreadsheet_manager: Arc<SpreadsheetManager>,
}

impl SheetsLeadStore {
    pub fn new(spreadsheet_manager: Arc<SpreadsheetManager>) -> Self {
        Self {
            spreadsheet_manager,
        }
    }
}

#[async_trait::async_trait]
impl LeadStore for SheetsLeadStore {
    #[instrument(skip(self))]
    async fn read_rows(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<Vec<String>>, LeadStoreError> {
        self.spreadsheet_manager
            .read_range(range)
            .await
            .change_context(LeadStoreError::ReadRowsError)
    }

    #[instrument(skip(self))]
    async fn write_row(
        &self,
        range: &A1Notation,
        row: Vec<String>,
    ) -> error_stack::Result<(), LeadStoreError> {
        self.spreadsheet_manager
            .write_row(range, &row)
            .await
            .change_context(LeadStoreError::WriteRowError)
    }
}
