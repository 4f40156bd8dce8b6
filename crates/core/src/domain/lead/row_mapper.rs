use strum::IntoEnumIterator;
use tracing::warn;

use super::{
    follow_ups::parse_dates,
    layout::{ColumnLayout, ColumnSpan, LeadColumn},
    Lead,
};

/// Builds the lead stored in `row`. Missing cells read as empty, a missing
/// follow-up count as zero.
pub fn to_lead(row: &[String], index: usize, layout: ColumnLayout) -> Lead {
    let cell = |field: LeadColumn| -> String {
        layout
            .column(field)
            .and_then(|column| row.get(column.offset()))
            .cloned()
            .unwrap_or_default()
    };

    let follow_up_dates = cell(LeadColumn::FollowUpDates);
    let follow_ups = parse_follow_ups(&cell(LeadColumn::FollowUps), &follow_up_dates, index);

    Lead {
        index,
        name: cell(LeadColumn::Name),
        phone: cell(LeadColumn::Phone),
        next_call_date: cell(LeadColumn::NextCallDate),
        status: cell(LeadColumn::Status),
        last_called: cell(LeadColumn::LastCalled),
        remarks: cell(LeadColumn::Remarks),
        follow_ups,
        follow_up_dates,
        call_time: cell(LeadColumn::CallTime),
    }
}

fn parse_follow_ups(raw: &str, follow_up_dates: &str, index: usize) -> u32 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    raw.parse().unwrap_or_else(|_| {
        let derived = parse_dates(follow_up_dates).len() as u32;
        warn!(
            index,
            raw, derived, "Follow-up count is not a number, counting follow-up dates instead"
        );
        derived
    })
}

/// Cells of `span`, in canonical column order, ready to be written back.
pub fn to_row(lead: &Lead, span: ColumnSpan) -> Vec<String> {
    span.columns().map(|column| lead.cell(column)).collect()
}

/// Rewrites a row from any layout into the canonical nine-column one.
pub fn to_canonical_row(row: &[String], layout: ColumnLayout) -> Vec<String> {
    let lead = to_lead(row, 0, layout);
    LeadColumn::iter().map(|column| lead.cell(column)).collect()
}
