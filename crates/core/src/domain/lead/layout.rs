use serde::Deserialize;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::domain::sheets::{
    a1_notation::{A1Notation, ToA1Notation},
    cell_range::CellRange,
    column::Column,
    row::Row,
};

/// Row 1 holds the headers, leads start right below.
pub const FIRST_DATA_ROW: Row = Row::from_row(2);

/// The fields of a lead, in canonical column order (A..I).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum LeadColumn {
    Name,
    Phone,
    NextCallDate,
    Status,
    LastCalled,
    Remarks,
    FollowUps,
    FollowUpDates,
    CallTime,
}

impl LeadColumn {
    /// Position of the field in the canonical nine-column layout.
    pub fn canonical(self) -> Column {
        Column::at_offset(self as u32)
    }
}

/// Physical arrangement of lead fields inside a sheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnLayout {
    /// Nine columns, A..I, with a dedicated remarks column at F.
    #[default]
    Canonical,
    /// Eight columns, A..H, without remarks. Only read, for migration.
    Legacy,
}

impl ColumnLayout {
    pub fn column(self, field: LeadColumn) -> Option<Column> {
        let offset = field as u32;
        match self {
            ColumnLayout::Canonical => Some(field.canonical()),
            ColumnLayout::Legacy => match field {
                LeadColumn::Remarks => None,
                field if field > LeadColumn::Remarks => Some(Column::at_offset(offset - 1)),
                _ => Some(Column::at_offset(offset)),
            },
        }
    }

    pub fn width(self) -> usize {
        LeadColumn::iter()
            .filter(|field| self.column(*field).is_some())
            .count()
    }

    pub fn last_column(self) -> Column {
        Column::at_offset(self.width() as u32 - 1)
    }
}

/// An inclusive run of canonical columns written in one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub first: LeadColumn,
    pub last: LeadColumn,
}

impl ColumnSpan {
    /// Status through call time (D..I), touched by call registration.
    pub const CALL_REGISTRATION: ColumnSpan =
        ColumnSpan::new(LeadColumn::Status, LeadColumn::CallTime);
    pub const STATUS: ColumnSpan = ColumnSpan::single(LeadColumn::Status);
    pub const NEXT_CALL_DATE: ColumnSpan = ColumnSpan::single(LeadColumn::NextCallDate);
    pub const REMARKS: ColumnSpan = ColumnSpan::single(LeadColumn::Remarks);
    pub const FULL_ROW: ColumnSpan = ColumnSpan::new(LeadColumn::Name, LeadColumn::CallTime);

    pub const fn new(first: LeadColumn, last: LeadColumn) -> Self {
        ColumnSpan { first, last }
    }

    pub const fn single(column: LeadColumn) -> Self {
        ColumnSpan {
            first: column,
            last: column,
        }
    }

    pub fn columns(self) -> impl Iterator<Item = LeadColumn> {
        LeadColumn::iter().filter(move |column| self.contains(*column))
    }

    pub fn contains(&self, column: LeadColumn) -> bool {
        (self.first..=self.last).contains(&column)
    }
}

/// Where the leads live inside the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub sheet_name: String,
}

impl SheetLayout {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        SheetLayout {
            sheet_name: sheet_name.into(),
        }
    }

    /// Sheet row holding the lead at `index`, or `None` past the last addressable row.
    pub fn sheet_row(index: usize) -> Option<Row> {
        u32::try_from(index)
            .ok()
            .and_then(|index| FIRST_DATA_ROW.index().checked_add(index))
            .map(Row::from_index)
    }

    /// Every data row, e.g. `'leads'!A2:I`.
    pub fn data_range(&self) -> A1Notation {
        CellRange::open_ended(
            &self.sheet_name,
            FIRST_DATA_ROW,
            LeadColumn::Name.canonical(),
            ColumnLayout::Canonical.last_column(),
        )
        .to_a1_notation(None)
    }

    /// The cells of `span` on the lead's row, e.g. `'leads'!D5:I5`.
    pub fn row_range(&self, index: usize, span: ColumnSpan) -> Option<A1Notation> {
        let row = Self::sheet_row(index)?;
        Some(
            CellRange::row_span(
                &self.sheet_name,
                row,
                span.first.canonical(),
                span.last.canonical(),
            )
            .to_a1_notation(None),
        )
    }
}
