use std::sync::Arc;

use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::{info, instrument};

use crate::domain::lead::{
    follow_ups,
    labels::date_label,
    layout::{ColumnLayout, ColumnSpan, SheetLayout},
    remarks::merge_remark,
    row_mapper::{to_canonical_row, to_lead, to_row},
    Lead,
};
use crate::domain::sheets::a1_notation::A1Notation;
use crate::ports::{clock::Clock, lead_store::LeadStore};

#[derive(Error, Debug)]
pub enum LeadServiceError {
    #[error("Failed to read leads")]
    ReadLeadsError,
    #[error("Lead {0} not found")]
    LeadNotFound(usize),
    #[error("Failed to write lead {0}")]
    WriteLeadError(usize),
    #[error("Failed to migrate legacy rows")]
    MigrationError,
}

/// Lead operations on top of a [`LeadStore`]. Holds no lead state: every call reads the
/// store, and every update re-reads the row it wrote.
pub struct LeadService {
    store: Arc<dyn LeadStore>,
    clock: Arc<dyn Clock>,
    layout: SheetLayout,
}

impl std::fmt::Debug for LeadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadService")
            .field("store", &"<LeadStore>")
            .field("layout", &self.layout)
            .finish()
    }
}

impl LeadService {
    pub fn new(store: Arc<dyn LeadStore>, clock: Arc<dyn Clock>, layout: SheetLayout) -> Self {
        Self {
            store,
            clock,
            layout,
        }
    }

    /// Every lead, in sheet order.
    #[instrument(skip(self))]
    pub async fn list_leads(&self) -> error_stack::Result<Vec<Lead>, LeadServiceError> {
        let rows = self
            .store
            .read_rows(&self.layout.data_range())
            .await
            .change_context(LeadServiceError::ReadLeadsError)?;

        Ok(rows
            .iter()
            .enumerate()
            .map(|(index, row)| to_lead(row, index, ColumnLayout::Canonical))
            .collect())
    }

    /// Leads whose next call date is exactly `date`. A missing or empty date matches all.
    #[instrument(skip(self))]
    pub async fn filter_leads(
        &self,
        date: Option<&str>,
    ) -> error_stack::Result<Vec<Lead>, LeadServiceError> {
        let leads = self.list_leads().await?;
        Ok(match date.filter(|date| !date.is_empty()) {
            Some(date) => leads
                .into_iter()
                .filter(|lead| lead.next_call_date == date)
                .collect(),
            None => leads,
        })
    }

    /// The lead at `index`. A blank row among the data rows reads as an empty lead; an index
    /// past the last data row is [`LeadServiceError::LeadNotFound`].
    #[instrument(skip(self))]
    pub async fn get_lead(&self, index: usize) -> error_stack::Result<Lead, LeadServiceError> {
        let range = self.range_of(index, ColumnSpan::FULL_ROW)?;
        let rows = self
            .store
            .read_rows(&range)
            .await
            .change_context(LeadServiceError::ReadLeadsError)?;

        if let Some(row) = rows.first() {
            return Ok(to_lead(row, index, ColumnLayout::Canonical));
        }

        let data_rows = self
            .store
            .read_rows(&self.layout.data_range())
            .await
            .change_context(LeadServiceError::ReadLeadsError)?
            .len();
        if index < data_rows {
            return Ok(Lead {
                index,
                ..Default::default()
            });
        }

        Err(report!(LeadServiceError::LeadNotFound(index)))
            .attach_printable_lazy(|| format!("No data in {range}, the sheet has {data_rows} leads"))
    }

    /// Marks the lead as called now and records today's follow-up.
    #[instrument(skip(self))]
    pub async fn register_call(&self, index: usize) -> error_stack::Result<Lead, LeadServiceError> {
        let lead = self.get_lead(index).await?;
        let updated = follow_ups::register_call(&lead, &self.clock.now());
        self.write_span(&updated, ColumnSpan::CALL_REGISTRATION).await?;
        info!(
            index,
            follow_ups = updated.follow_ups,
            "Registered call for {}",
            updated.name
        );
        self.get_lead(index).await
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        index: usize,
        status: &str,
    ) -> error_stack::Result<Lead, LeadServiceError> {
        let lead = self.get_lead(index).await?;
        let updated = Lead {
            status: status.to_string(),
            ..lead
        };
        self.write_span(&updated, ColumnSpan::STATUS).await?;
        self.get_lead(index).await
    }

    #[instrument(skip(self))]
    pub async fn update_next_call_date(
        &self,
        index: usize,
        next_call_date: &str,
    ) -> error_stack::Result<Lead, LeadServiceError> {
        let lead = self.get_lead(index).await?;
        let updated = Lead {
            next_call_date: next_call_date.to_string(),
            ..lead
        };
        self.write_span(&updated, ColumnSpan::NEXT_CALL_DATE).await?;
        self.get_lead(index).await
    }

    /// Adds `remark` under today's date in the lead's remarks.
    #[instrument(skip(self))]
    pub async fn add_remark(
        &self,
        index: usize,
        remark: &str,
    ) -> error_stack::Result<Lead, LeadServiceError> {
        let lead = self.get_lead(index).await?;
        let today = date_label(&self.clock.now());
        let updated = Lead {
            remarks: merge_remark(&lead.remarks, &today, remark),
            ..lead
        };
        self.write_span(&updated, ColumnSpan::REMARKS).await?;
        self.get_lead(index).await
    }

    /// Copies rows kept in the eight-column layout (no remarks column) into the leads tab
    /// using the nine-column layout. The first row of `source` becomes lead 0; blank rows
    /// are skipped but keep their position. Returns how many rows were written.
    #[instrument(skip(self))]
    pub async fn migrate_legacy_rows(
        &self,
        source: &A1Notation,
    ) -> error_stack::Result<usize, LeadServiceError> {
        let rows = self
            .store
            .read_rows(source)
            .await
            .change_context(LeadServiceError::MigrationError)?;

        let mut migrated = 0;
        for (index, row) in rows.iter().enumerate() {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let target = self
                .layout
                .row_range(index, ColumnSpan::FULL_ROW)
                .ok_or_else(|| report!(LeadServiceError::MigrationError))
                .attach_printable_lazy(|| format!("Row {index} of {source} has no target row"))?;
            self.store
                .write_row(&target, to_canonical_row(row, ColumnLayout::Legacy))
                .await
                .change_context(LeadServiceError::MigrationError)
                .attach_printable_lazy(|| format!("Failed to write {target}"))?;
            migrated += 1;
        }

        info!(migrated, "Migrated legacy rows from {source}");
        Ok(migrated)
    }

    async fn write_span(
        &self,
        lead: &Lead,
        span: ColumnSpan,
    ) -> error_stack::Result<(), LeadServiceError> {
        let range = self.range_of(lead.index, span)?;
        self.store
            .write_row(&range, to_row(lead, span))
            .await
            .change_context(LeadServiceError::WriteLeadError(lead.index))
            .attach_printable_lazy(|| format!("Failed to write {range}"))
    }

    fn range_of(
        &self,
        index: usize,
        span: ColumnSpan,
    ) -> error_stack::Result<A1Notation, LeadServiceError> {
        self.layout
            .row_range(index, span)
            .ok_or_else(|| report!(LeadServiceError::LeadNotFound(index)))
            .attach_printable("Index is past the last sheet row")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{clock::FixedClock, memory_store::InMemoryLeadStore};
    use chrono::{NaiveDate, NaiveDateTime};

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn header() -> Vec<String> {
        row(&[
            "Name",
            "Phone",
            "Next Call Date",
            "Status",
            "Last Called",
            "Remarks",
            "Follow-Ups",
            "Follow-Up Dates",
            "Call Time",
        ])
    }

    fn seeded_store() -> Arc<InMemoryLeadStore> {
        Arc::new(InMemoryLeadStore::with_sheet(
            "leads",
            vec![
                header(),
                row(&["Asha", "9990000001", "12 Jan", "Pending", "", "", "0", "", ""]),
                row(&["Ravi", "9990000002", "13 Jan", "Pending"]),
                row(&["Meera", "9990000003", "12 Jan", "Interested", "10 Jan", "", "1", "10 Jan", "11:00"]),
            ],
        ))
    }

    fn service_at(store: Arc<InMemoryLeadStore>, now: NaiveDateTime) -> LeadService {
        LeadService::new(store, Arc::new(FixedClock(now)), SheetLayout::new("leads"))
    }

    #[tokio::test]
    async fn test_list_leads_skips_header() {
        let service = service_at(seeded_store(), at(12, 14, 5));
        let leads = service.list_leads().await.unwrap();
        assert_eq!(leads.len(), 3);
        assert_eq!(leads[0].name, "Asha");
        assert_eq!(leads[2].index, 2);
        assert_eq!(leads[2].follow_ups, 1);
    }

    #[tokio::test]
    async fn test_list_leads_on_empty_sheet() {
        let store = Arc::new(InMemoryLeadStore::with_sheet("leads", vec![header()]));
        let service = service_at(store, at(12, 14, 5));
        assert!(service.list_leads().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filter_leads_exact_match() {
        let service = service_at(seeded_store(), at(12, 14, 5));
        let leads = service.filter_leads(Some("12 Jan")).await.unwrap();
        let names: Vec<_> = leads.iter().map(|lead| lead.name.as_str()).collect();
        assert_eq!(names, vec!["Asha", "Meera"]);
        assert_eq!(leads[1].index, 2, "indices stay those of the full sheet");

        assert!(service.filter_leads(Some("12 jan")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filter_leads_without_date_returns_all() {
        let service = service_at(seeded_store(), at(12, 14, 5));
        assert_eq!(service.filter_leads(None).await.unwrap().len(), 3);
        assert_eq!(service.filter_leads(Some("")).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_register_call_writes_and_rereads() {
        let store = seeded_store();
        let service = service_at(store.clone(), at(12, 14, 5));

        let lead = service.register_call(0).await.unwrap();
        assert_eq!(lead.status, "Called");
        assert_eq!(lead.last_called, "12 Jan");
        assert_eq!(lead.follow_ups, 1);
        assert_eq!(lead.follow_up_dates, "12 Jan");
        assert_eq!(lead.call_time, "14:05");

        assert_eq!(
            store.sheet("leads").await[1],
            row(&["Asha", "9990000001", "12 Jan", "Called", "12 Jan", "", "1", "12 Jan", "14:05"])
        );
    }

    #[tokio::test]
    async fn test_register_call_twice_same_day() {
        let store = seeded_store();
        let service = service_at(store.clone(), at(12, 14, 5));
        service.register_call(2).await.unwrap();
        let lead = service.register_call(2).await.unwrap();
        assert_eq!(lead.follow_up_dates, "10 Jan,12 Jan");
        assert_eq!(lead.follow_ups, 2);

        let next_day = service_at(store, at(13, 9, 0));
        let lead = next_day.register_call(2).await.unwrap();
        assert_eq!(lead.follow_up_dates, "10 Jan,12 Jan,13 Jan");
        assert_eq!(lead.follow_ups, 3);
    }

    #[tokio::test]
    async fn test_register_call_keeps_remarks() {
        let store = seeded_store();
        let service = service_at(store, at(12, 14, 5));
        service.add_remark(1, "no answer").await.unwrap();
        let lead = service.register_call(1).await.unwrap();
        assert_eq!(lead.remarks, "12 Jan - no answer");
        assert_eq!(lead.next_call_date, "13 Jan");
    }

    #[tokio::test]
    async fn test_add_remark_same_day_and_next_day() {
        let store = seeded_store();
        let service = service_at(store.clone(), at(12, 14, 5));

        let lead = service.add_remark(0, "no answer").await.unwrap();
        assert_eq!(lead.remarks, "12 Jan - no answer");
        let lead = service.add_remark(0, "call back").await.unwrap();
        assert_eq!(lead.remarks, "12 Jan - no answer/call back");

        let lead = service_at(store, at(13, 10, 0))
            .add_remark(0, "interested")
            .await
            .unwrap();
        assert_eq!(lead.remarks, "12 Jan - no answer/call back | 13 Jan - interested");
    }

    #[tokio::test]
    async fn test_update_status_touches_only_status() {
        let store = seeded_store();
        let service = service_at(store.clone(), at(12, 14, 5));
        let lead = service.update_status(2, "Not Interested").await.unwrap();
        assert_eq!(lead.status, "Not Interested");
        assert_eq!(
            store.sheet("leads").await[3],
            row(&["Meera", "9990000003", "12 Jan", "Not Interested", "10 Jan", "", "1", "10 Jan", "11:00"])
        );
    }

    #[tokio::test]
    async fn test_update_next_call_date() {
        let service = service_at(seeded_store(), at(12, 14, 5));
        let lead = service.update_next_call_date(1, "20 Jan").await.unwrap();
        assert_eq!(lead.next_call_date, "20 Jan");
        assert_eq!(lead.status, "Pending");
        assert_eq!(service.filter_leads(Some("20 Jan")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_index_is_not_found() {
        let store = seeded_store();
        let service = service_at(store.clone(), at(12, 14, 5));
        let report = service.register_call(42).await.unwrap_err();
        assert!(matches!(
            report.current_context(),
            LeadServiceError::LeadNotFound(42)
        ));
        assert_eq!(store.sheet("leads").await.len(), 4, "nothing was written");
    }

    #[tokio::test]
    async fn test_index_beyond_sheet_rows_never_wraps_onto_a_lead() {
        let store = seeded_store();
        let service = service_at(store.clone(), at(12, 14, 5));
        let before = store.sheet("leads").await;

        for index in [u32::MAX as usize, u32::MAX as usize + 1, usize::MAX] {
            let report = service.update_status(index, "Hijacked").await.unwrap_err();
            assert!(matches!(
                report.current_context(),
                LeadServiceError::LeadNotFound(found) if *found == index
            ));
        }
        assert!(service.register_call(u32::MAX as usize + 2).await.is_err());
        assert_eq!(store.sheet("leads").await, before);
    }

    #[tokio::test]
    async fn test_blank_row_between_leads_can_be_updated() {
        let store = Arc::new(InMemoryLeadStore::with_sheet(
            "leads",
            vec![
                header(),
                row(&["Asha", "9990000001", "12 Jan", "Pending"]),
                vec![],
                row(&["Ravi", "9990000002", "13 Jan", "Pending"]),
            ],
        ));
        let service = service_at(store.clone(), at(12, 14, 5));

        let leads = service.list_leads().await.unwrap();
        assert_eq!(leads[1], Lead { index: 1, ..Default::default() });
        assert_eq!(service.get_lead(1).await.unwrap(), leads[1]);

        let lead = service.update_status(1, "Interested").await.unwrap();
        assert_eq!(lead.index, 1);
        assert_eq!(lead.status, "Interested");
        let lead = service.register_call(1).await.unwrap();
        assert_eq!(lead.follow_up_dates, "12 Jan");
        assert_eq!(
            store.sheet("leads").await[2],
            row(&["", "", "", "Called", "12 Jan", "", "1", "12 Jan", "14:05"])
        );

        let report = service.update_status(3, "Interested").await.unwrap_err();
        assert!(matches!(
            report.current_context(),
            LeadServiceError::LeadNotFound(3)
        ));
    }

    #[tokio::test]
    async fn test_empty_remark_then_same_day_remark_share_one_tag() {
        let service = service_at(seeded_store(), at(12, 14, 5));
        let lead = service.add_remark(0, "").await.unwrap();
        assert_eq!(lead.remarks, "12 Jan -");
        let lead = service.add_remark(0, "call back").await.unwrap();
        assert_eq!(lead.remarks, "12 Jan - call back");
    }

    #[tokio::test]
    async fn test_migrate_legacy_rows() {
        let store = Arc::new(InMemoryLeadStore::with_sheet(
            "leads_v1",
            vec![
                row(&["Name", "Phone", "Next Call Date", "Status", "Last Called", "Follow-Ups", "Follow-Up Dates", "Call Time"]),
                row(&["Asha", "9990000001", "12 Jan", "Called", "11 Jan", "1", "11 Jan", "10:15"]),
                vec![],
                row(&["Ravi", "9990000002", "13 Jan", "Pending"]),
            ],
        ));
        let service = service_at(store.clone(), at(12, 14, 5));

        let migrated = service
            .migrate_legacy_rows(&"'leads_v1'!A2:H".into())
            .await
            .unwrap();
        assert_eq!(migrated, 2);

        let leads = service.list_leads().await.unwrap();
        assert_eq!(leads.len(), 3);
        assert_eq!(leads[0].follow_up_dates, "11 Jan");
        assert_eq!(leads[0].call_time, "10:15");
        assert_eq!(leads[0].remarks, "");
        assert_eq!(leads[1].name, "");
        assert_eq!(leads[2].name, "Ravi");
        assert_eq!(leads[2].follow_ups, 0);
    }
}
