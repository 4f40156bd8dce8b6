//! Display labels stored in the sheet for dates and times.

use chrono::NaiveDateTime;

/// Short day label, e.g. `12 Jan`.
pub fn date_label(now: &NaiveDateTime) -> String {
    now.format("%-d %b").to_string()
}

/// Short time label, e.g. `14:05`.
pub fn time_label(now: &NaiveDateTime) -> String {
    now.format("%H:%M").to_string()
}
