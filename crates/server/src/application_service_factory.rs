use leads_core::{
    adapters::{
        clock::SystemClock,
        config::app_config::AppConfig,
        sheets::{
            sheets_lead_store::SheetsLeadStore,
            spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
        },
    },
    domain::lead::layout::SheetLayout,
    ports::lead_store::LeadStore,
    LeadService,
};

use std::sync::Arc;

pub struct ApplicationServiceFactory;

impl ApplicationServiceFactory {
    /// Authenticates against Google Sheets and wires the lead service on top of it.
    pub async fn create(
        config: &AppConfig,
    ) -> error_stack::Result<Arc<LeadService>, SpreadsheetManagerError> {
        let spreadsheet_manager = Arc::new(SpreadsheetManager::new(config.sheets.clone()).await?);

        let lead_store: Arc<dyn LeadStore> =
            Arc::new(SheetsLeadStore::new(Arc::clone(&spreadsheet_manager)));

        Ok(Arc::new(LeadService::new(
            lead_store,
            Arc::new(SystemClock),
            SheetLayout::new(&*config.sheets.sheet_name),
        )))
    }
}
