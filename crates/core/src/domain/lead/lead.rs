use serde::{Deserialize, Serialize};

use super::layout::LeadColumn;

/// One spreadsheet row, as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Zero-based position among data rows. Not stored in the sheet.
    pub index: usize,
    pub name: String,
    pub phone: String,
    pub next_call_date: String,
    pub status: String,
    pub last_called: String,
    pub remarks: String,
    pub follow_ups: u32,
    pub follow_up_dates: String,
    pub call_time: String,
}

impl Lead {
    /// Cell text for `column`, as written back to the sheet.
    pub fn cell(&self, column: LeadColumn) -> String {
        match column {
            LeadColumn::Name => self.name.clone(),
            LeadColumn::Phone => self.phone.clone(),
            LeadColumn::NextCallDate => self.next_call_date.clone(),
            LeadColumn::Status => self.status.clone(),
            LeadColumn::LastCalled => self.last_called.clone(),
            LeadColumn::Remarks => self.remarks.clone(),
            LeadColumn::FollowUps => self.follow_ups.to_string(),
            LeadColumn::FollowUpDates => self.follow_up_dates.clone(),
            LeadColumn::CallTime => self.call_time.clone(),
        }
    }
}
