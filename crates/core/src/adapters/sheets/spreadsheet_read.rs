use error_stack::ResultExt;
use google_sheets4::api::Scope;
use tracing::instrument;

use crate::domain::sheets::a1_notation::A1Notation;

use super::{
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
    string_rows::IntoStringRows,
};

pub trait SpreadsheetRead {
    /// Rows of `range`. The API drops trailing empty cells and rows, and an empty range
    /// yields no rows at all.
    fn read_range(
        &self,
        range: &A1Notation,
    ) -> impl std::future::Future<
        Output = error_stack::Result<Vec<Vec<String>>, SpreadsheetManagerError>,
    > + Send;
}

impl SpreadsheetRead for SpreadsheetManager {
    #[instrument]
    async fn read_range(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range.as_ref())
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("Failed to fetch values for range {}", range))?;

        let value_range = response.1;
        let rows = value_range
            .values
            .map(IntoStringRows::into_string_rows)
            .unwrap_or_default();

        tracing::debug!(rows = rows.len(), "Fetched range");
        Ok(rows)
    }
}
