use std::{fmt::Formatter, num::ParseIntError, str::FromStr};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row {
    index: u32,
}

impl Row {
    pub const fn from_index(index: u32) -> Self {
        Row { index }
    }

    pub const fn from_row(row: u32) -> Self {
        Row {
            index: row.saturating_sub(1), // Convert to zero-based index
        }
    }

    pub fn from_row_str(row: &str) -> Result<Self, ParseIntError> {
        let row = row.parse::<u32>()?;
        Ok(Row::from_row(row))
    }

    /// Returns the row number as a 1-based index, the way spreadsheets label rows.
    /// # Examples
    /// ```
    /// use leads_core::domain::sheets::row::Row;
    /// let row = Row::from_index(0);
    /// assert_eq!(row.number(), 1);
    /// let row = Row::from_index(4);
    /// assert_eq!(row.number(), 5);
    /// ```
    pub fn number(&self) -> u32 {
        self.index.saturating_add(1)
    }

    /// Returns the row index as a zero-based index.
    /// # Examples
    /// ```
    /// use leads_core::domain::sheets::row::Row;
    /// let first_data_row = Row::from_row(2);
    /// let lead_row = first_data_row + Row::from_index(3);
    /// assert_eq!(lead_row.index(), 4);
    /// assert_eq!(lead_row.number(), 5);
    /// ```
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl std::ops::Add for Row {
    type Output = Row;

    fn add(self, rhs: Row) -> Self::Output {
        Row::from_index(self.index.saturating_add(rhs.index))
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row(index: {}, row: {})", self.index(), self.number())
    }
}

impl FromStr for Row {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Row::from_row_str(s)
    }
}
