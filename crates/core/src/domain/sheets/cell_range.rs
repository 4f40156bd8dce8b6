use error_stack::{report, ResultExt};

use super::{
    a1_notation::{
        generic_a1_notation_split, quote_sheet_title, A1Notation, A1NotationParseError,
        FromA1Notation, ToA1Notation,
    },
    column::{parse_col, Column},
    row::Row,
};

/// A cell reference. The row is absent for whole-column references such as the `I` in `A2:I`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub col: Column,
    pub row: Option<Row>,
}

impl CellPosition {
    pub fn new(col: Column, row: Row) -> Self {
        CellPosition { col, row: Some(row) }
    }

    pub fn column_only(col: Column) -> Self {
        CellPosition { col, row: None }
    }
}

impl ToA1Notation for CellPosition {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        let local = match self.row {
            Some(row) => format!("{}{}", self.col, row),
            None => self.col.to_string(),
        };
        match sheet_name {
            Some(sheet_name) => A1Notation(format!("{}!{}", quote_sheet_title(sheet_name), local)),
            None => A1Notation(local),
        }
    }
}

impl FromA1Notation for CellPosition {
    type Err = A1NotationParseError;

    fn from_a1_notation(a1_notation: &A1Notation) -> error_stack::Result<Self, Self::Err> {
        let parts = generic_a1_notation_split(a1_notation);
        let cell = parts.start.as_str();
        let split_at = cell
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(cell.len());
        let (letters, digits) = cell.split_at(split_at);

        let col = parse_col(letters)
            .change_context(A1NotationParseError::ColumnParseError)
            .attach_printable_lazy(|| format!("Invalid column in cell {cell:?}"))?;
        let row = match digits {
            "" => None,
            digits => Some(
                digits
                    .parse::<Row>()
                    .change_context(A1NotationParseError::RowParseError)
                    .attach_printable_lazy(|| format!("Invalid row in cell {cell:?}"))?,
            ),
        };

        Ok(CellPosition { col, row })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellPosition,
    pub end: CellPosition,
    pub sheet_title: Option<String>,
}

impl CellRange {
    /// Cells `first..=last` of a single row.
    pub fn row_span(sheet_title: &str, row: Row, first: Column, last: Column) -> Self {
        CellRange {
            start: CellPosition::new(first, row),
            end: CellPosition::new(last, row),
            sheet_title: Some(sheet_title.to_owned()),
        }
    }

    /// Columns `first..=last` from `first_row` down to the last row holding data.
    pub fn open_ended(sheet_title: &str, first_row: Row, first: Column, last: Column) -> Self {
        CellRange {
            start: CellPosition::new(first, first_row),
            end: CellPosition::column_only(last),
            sheet_title: Some(sheet_title.to_owned()),
        }
    }

    pub fn start_row(&self) -> Row {
        self.start.row.unwrap_or(Row::from_index(0))
    }

    /// Last row of the range, or `None` when the range runs to the end of the sheet.
    pub fn end_row(&self) -> Option<Row> {
        self.end.row
    }

    pub fn row_count(&self) -> Option<u32> {
        self.end_row()
            .map(|end| end.index().saturating_sub(self.start_row().index()) + 1)
    }

    pub fn column_count(&self) -> u32 {
        self.end.col.number().saturating_sub(self.start.col.number()) + 1
    }
}

impl ToA1Notation for CellRange {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        let start = self.start.to_a1_notation(None);
        let end = self.end.to_a1_notation(None);

        match sheet_name.or(self.sheet_title.as_deref()) {
            Some(sheet_name) => A1Notation(format!(
                "{}!{}:{}",
                quote_sheet_title(sheet_name),
                start,
                end
            )),
            None => A1Notation(format!("{}:{}", start, end)),
        }
    }
}

impl FromA1Notation for CellRange {
    type Err = A1NotationParseError;

    fn from_a1_notation(a1_notation: &A1Notation) -> error_stack::Result<Self, Self::Err> {
        let parts = generic_a1_notation_split(a1_notation);

        let range = CellRange {
            start: CellPosition::from_a1_notation(&A1Notation(parts.start))?,
            end: CellPosition::from_a1_notation(&A1Notation(parts.end))?,
            sheet_title: parts.sheet_title,
        };

        if range.end.col < range.start.col {
            return Err(report!(A1NotationParseError::ColumnParseError))
                .attach_printable_lazy(|| format!("Range {a1_notation} ends before it starts"));
        }

        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_span_to_a1_notation() {
        let range = CellRange::row_span(
            "leads",
            Row::from_row(5),
            Column::at_offset(3),
            Column::at_offset(8),
        );
        assert_eq!(range.to_a1_notation(None).as_ref(), "'leads'!D5:I5");
        assert_eq!(range.row_count(), Some(1));
        assert_eq!(range.column_count(), 6);
    }

    #[test]
    fn test_open_ended_to_a1_notation() {
        let range = CellRange::open_ended(
            "leads",
            Row::from_row(2),
            Column::at_offset(0),
            Column::at_offset(8),
        );
        assert_eq!(range.to_a1_notation(None).as_ref(), "'leads'!A2:I");
        assert_eq!(range.row_count(), None);
    }

    #[test]
    fn test_parse_open_ended_range() {
        let range = CellRange::from_a1_notation(&"leads!A2:I".into()).unwrap();
        assert_eq!(range.sheet_title.as_deref(), Some("leads"));
        assert_eq!(range.start, CellPosition::new(Column::at_offset(0), Row::from_row(2)));
        assert_eq!(range.end, CellPosition::column_only(Column::at_offset(8)));
    }

    #[test]
    fn test_parse_whole_columns_defaults_to_first_row() {
        let range = CellRange::from_a1_notation(&"'leads_v1'!A:H".into()).unwrap();
        assert_eq!(range.start_row(), Row::from_row(1));
        assert_eq!(range.column_count(), 8);
    }

    #[test]
    fn test_parse_round_trip() {
        let a1: A1Notation = "'leads'!F7:F7".into();
        let range = CellRange::from_a1_notation(&a1).unwrap();
        assert_eq!(range.to_a1_notation(None), a1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(CellRange::from_a1_notation(&"leads!1A:B".into()).is_err());
        assert!(CellRange::from_a1_notation(&"leads!C2:A".into()).is_err());
        assert!(CellRange::from_a1_notation(&"'leads_v1'!AAAAAAAAAAAAAA2:B".into()).is_err());
    }
}
