use std::fmt::Formatter;
use thiserror::Error;

/// A range address in A1 notation, e.g. `'leads'!D5:I5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct A1Notation(pub String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for A1Notation {
    fn from(s: String) -> Self {
        A1Notation(s)
    }
}

impl From<&str> for A1Notation {
    fn from(s: &str) -> Self {
        A1Notation(s.to_owned())
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum A1NotationParseError {
    #[error("Error parsing column")]
    ColumnParseError,
    #[error("Error parsing row")]
    RowParseError,
}

pub trait FromA1Notation: Sized {
    type Err;

    fn from_a1_notation(a1_notation: &A1Notation) -> error_stack::Result<Self, Self::Err>;
}

/// Quotes a sheet title for use in A1 notation. Embedded quotes are doubled.
pub fn quote_sheet_title(sheet_title: &str) -> String {
    format!("'{}'", sheet_title.replace('\'', "''"))
}

fn unquote_sheet_title(sheet_title: &str) -> String {
    match sheet_title
        .strip_prefix('\'')
        .and_then(|title| title.strip_suffix('\''))
    {
        Some(inner) => inner.replace("''", "'"),
        None => sheet_title.to_owned(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1NotationParts {
    pub start: String,
    pub end: String,
    pub sheet_title: Option<String>,
}

/// Splits `'Sheet'!A2:I` into its sheet title and its start/end cell references.
/// A single-cell reference yields the same start and end.
pub fn generic_a1_notation_split(a1_notation: &A1Notation) -> A1NotationParts {
    let (sheet_title, local_a1_notation) = match a1_notation.0.rfind('!') {
        Some(index) => {
            let (sheet_title, local_a1_notation) = a1_notation.0.split_at(index);
            (
                Some(unquote_sheet_title(sheet_title)),
                local_a1_notation.trim_start_matches('!').to_owned(),
            )
        }
        None => (None, a1_notation.0.clone()),
    };

    let (start, end) = match local_a1_notation.find(':') {
        Some(index) => {
            let (start, end) = local_a1_notation.split_at(index);
            (start.to_owned(), end.trim_start_matches(':').to_owned())
        }
        None => (local_a1_notation.clone(), local_a1_notation),
    };

    A1NotationParts {
        sheet_title,
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_quoted_sheet() {
        let parts = generic_a1_notation_split(&"'leads'!D5:I5".into());
        assert_eq!(
            parts,
            A1NotationParts {
                start: "D5".to_string(),
                end: "I5".to_string(),
                sheet_title: Some("leads".to_string()),
            }
        );
    }

    #[test]
    fn test_split_with_bare_sheet_and_open_end() {
        let parts = generic_a1_notation_split(&"leads!A2:I".into());
        assert_eq!(parts.sheet_title.as_deref(), Some("leads"));
        assert_eq!(parts.start, "A2");
        assert_eq!(parts.end, "I");
    }

    #[test]
    fn test_split_single_cell_without_sheet() {
        let parts = generic_a1_notation_split(&"F3".into());
        assert_eq!(parts.sheet_title, None);
        assert_eq!(parts.start, "F3");
        assert_eq!(parts.end, "F3");
    }

    #[test]
    fn test_quote_round_trip_with_embedded_quote() {
        let quoted = quote_sheet_title("Jo's leads");
        assert_eq!(quoted, "'Jo''s leads'");
        let parts = generic_a1_notation_split(&format!("{}!A1", quoted).into());
        assert_eq!(parts.sheet_title.as_deref(), Some("Jo's leads"));
    }
}
