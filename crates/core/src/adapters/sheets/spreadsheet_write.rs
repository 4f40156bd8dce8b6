use google_sheets4::api::ValueRange;
use tracing::instrument;

use crate::domain::sheets::a1_notation::A1Notation;

use super::{
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
    value_range_factory::ValueRangeFactory,
};

pub trait SpreadsheetWrite {
    fn write_row(
        &self,
        range: &A1Notation,
        values: &[String],
    ) -> impl std::future::Future<Output = error_stack::Result<(), SpreadsheetManagerError>> + Send;
}

impl SpreadsheetWrite for SpreadsheetManager {
    #[instrument]
    async fn write_row(
        &self,
        range: &A1Notation,
        values: &[String],
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        let value_range = ValueRange::from_single_row(values);
        self.write_range(range, value_range).await
    }
}
