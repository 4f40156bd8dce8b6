use std::collections::HashMap;

use error_stack::{report, ResultExt};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::domain::sheets::{
    a1_notation::{A1Notation, FromA1Notation},
    cell_range::CellRange,
};
use crate::ports::lead_store::{LeadStore, LeadStoreError};

/// Lead storage held in memory, one grid of cells per sheet title.
///
/// Reads behave like the Sheets API: rows start at the first column of the range, trailing
/// empty cells and rows are dropped, and an empty range returns no rows.
#[derive(Debug, Default)]
pub struct InMemoryLeadStore {
    sheets: RwLock<HashMap<String, Vec<Vec<String>>>>,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose `sheet_title` starts with `rows`, the first of them being sheet row 1.
    pub fn with_sheet(sheet_title: &str, rows: Vec<Vec<String>>) -> Self {
        let mut sheets = HashMap::new();
        sheets.insert(sheet_title.to_string(), rows);
        Self {
            sheets: RwLock::new(sheets),
        }
    }

    /// Every stored row of `sheet_title`, header included.
    pub async fn sheet(&self, sheet_title: &str) -> Vec<Vec<String>> {
        self.sheets
            .read()
            .await
            .get(sheet_title)
            .cloned()
            .unwrap_or_default()
    }

    fn parse_range(range: &A1Notation) -> error_stack::Result<(String, CellRange), LeadStoreError> {
        let cell_range = CellRange::from_a1_notation(range)
            .change_context_lazy(|| LeadStoreError::InvalidRange(range.to_string()))?;
        let sheet_title = cell_range
            .sheet_title
            .clone()
            .ok_or_else(|| report!(LeadStoreError::InvalidRange(range.to_string())))
            .attach_printable("Range has no sheet title")?;
        Ok((sheet_title, cell_range))
    }
}

fn trim_trailing_empty<T>(items: &mut Vec<T>, is_empty: impl Fn(&T) -> bool) {
    while items.last().is_some_and(&is_empty) {
        items.pop();
    }
}

#[async_trait::async_trait]
impl LeadStore for InMemoryLeadStore {
    #[instrument(skip(self))]
    async fn read_rows(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<Vec<String>>, LeadStoreError> {
        let (sheet_title, cell_range) = Self::parse_range(range)?;
        let sheets = self.sheets.read().await;
        let Some(grid) = sheets.get(&sheet_title) else {
            return Err(report!(LeadStoreError::ReadRowsError))
                .attach_printable_lazy(|| format!("Sheet '{sheet_title}' does not exist"));
        };

        let first_row = cell_range.start_row().index() as usize;
        let row_count = cell_range
            .row_count()
            .map(|count| count as usize)
            .unwrap_or(usize::MAX);
        let first_col = cell_range.start.col.offset();
        let last_col = cell_range.end.col.offset();

        let mut rows: Vec<Vec<String>> = grid
            .iter()
            .skip(first_row)
            .take(row_count)
            .map(|row| {
                let mut cells: Vec<String> = (first_col..=last_col)
                    .map(|col| row.get(col).cloned().unwrap_or_default())
                    .collect();
                trim_trailing_empty(&mut cells, |cell| cell.is_empty());
                cells
            })
            .collect();
        trim_trailing_empty(&mut rows, |row| row.is_empty());

        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn write_row(
        &self,
        range: &A1Notation,
        row: Vec<String>,
    ) -> error_stack::Result<(), LeadStoreError> {
        let (sheet_title, cell_range) = Self::parse_range(range)?;
        if cell_range.row_count() != Some(1) || row.len() > cell_range.column_count() as usize {
            return Err(report!(LeadStoreError::WriteRowError)).attach_printable_lazy(|| {
                format!("{} cells do not fit a single row of {range}", row.len())
            });
        }

        let mut sheets = self.sheets.write().await;
        let grid = sheets.entry(sheet_title).or_default();
        let row_index = cell_range.start_row().index() as usize;
        if grid.len() <= row_index {
            grid.resize_with(row_index + 1, Vec::new);
        }

        let target = &mut grid[row_index];
        let first_col = cell_range.start.col.offset();
        if target.len() < first_col + row.len() {
            target.resize(first_col + row.len(), String::new());
        }
        for (offset, value) in row.into_iter().enumerate() {
            target[first_col + offset] = value;
        }

        Ok(())
    }
}
