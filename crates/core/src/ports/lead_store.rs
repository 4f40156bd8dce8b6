use thiserror::Error;

use crate::domain::sheets::a1_notation::A1Notation;

#[derive(Error, Debug)]
pub enum LeadStoreError {
    #[error("Failed to read rows from the lead store")]
    ReadRowsError,
    #[error("Failed to write row to the lead store")]
    WriteRowError,
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

/// Range-addressed row storage backing the leads.
#[async_trait::async_trait]
pub trait LeadStore: Send + Sync {
    /// Reads every row inside `range`. Each row holds the cells from the first column of the
    /// range onwards; trailing empty cells and trailing empty rows may be omitted.
    async fn read_rows(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<Vec<String>>, LeadStoreError>;

    /// Writes `row` into the single-row `range`, starting at its first column.
    async fn write_row(
        &self,
        range: &A1Notation,
        row: Vec<String>,
    ) -> error_stack::Result<(), LeadStoreError>;
}
