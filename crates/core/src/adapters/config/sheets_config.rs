#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetConfig {
    /// Path to the service account key (JSON) used to authenticate against Google Sheets.
    pub priv_key: Box<str>,
    pub spreadsheet_id: Box<str>,
    /// Tab holding the leads.
    pub sheet_name: Box<str>,
    /// `RAW` keeps labels such as `12 Jan` as plain text instead of parsing them as dates.
    pub value_input_option: Box<str>,
}
