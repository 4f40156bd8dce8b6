use chrono::NaiveDateTime;

use super::{
    labels::{date_label, time_label},
    Lead,
};

pub const CALLED_STATUS: &str = "Called";

const DATE_SEPARATOR: &str = ",";

/// Date labels of a follow-up list, in order, ignoring blank entries.
pub fn parse_dates(follow_up_dates: &str) -> Vec<&str> {
    follow_up_dates
        .split(DATE_SEPARATOR)
        .map(str::trim)
        .filter(|date| !date.is_empty())
        .collect()
}

/// Adds `date` to the list unless it is already there. Returns the new list and its length.
pub fn record_follow_up(follow_up_dates: &str, date: &str) -> (String, u32) {
    let mut dates = parse_dates(follow_up_dates);
    if !dates.contains(&date) {
        dates.push(date);
    }
    let count = dates.len() as u32;
    (dates.join(DATE_SEPARATOR), count)
}

/// Applies a call made at `now` to the lead.
pub fn register_call(lead: &Lead, now: &NaiveDateTime) -> Lead {
    let today = date_label(now);
    let (follow_up_dates, follow_ups) = record_follow_up(&lead.follow_up_dates, &today);

    Lead {
        status: CALLED_STATUS.to_string(),
        last_called: today,
        follow_ups,
        follow_up_dates,
        call_time: time_label(now),
        ..lead.clone()
    }
}
