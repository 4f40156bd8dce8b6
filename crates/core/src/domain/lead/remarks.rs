//! Dated remark log kept in a single cell.
//!
//! The cell reads like `10 Jan - no answer | 12 Jan - busy/call back`: entries are
//! separated by `|`, each dated entry starts with a date label followed by ` - `, and
//! several remarks made on the same day share one entry joined by `/`. Undated segments
//! (hand-written notes) belong to the dated entry before them, if any.
//!
//! Merging only rewrites the segment it appends to; every other segment, separators and
//! spacing included, is kept byte for byte.

use std::sync::LazyLock;

use regex::Regex;

const ENTRY_SEPARATOR: &str = "|";
const NEW_ENTRY_SEPARATOR: &str = " | ";
const SAME_DAY_SEPARATOR: &str = "/";
/// Stands in for `|` inside a new remark, which would otherwise start a new entry.
const ESCAPED_ENTRY_SEPARATOR: &str = "¦";

static DATED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?P<date>\d{1,2} [A-Za-z]{3,9}) -(?:\s+(?P<text>.*))?$")
        .expect("dated entry pattern is valid")
});

/// One `|`-separated piece of a remarks cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment<'a> {
    raw: &'a str,
    date: Option<&'a str>,
    has_text: bool,
}

impl<'a> Segment<'a> {
    fn parse(raw: &'a str) -> Self {
        match DATED_ENTRY.captures(raw.trim()) {
            Some(captures) => Segment {
                raw,
                date: captures.name("date").map(|date| date.as_str()),
                has_text: captures
                    .name("text")
                    .is_some_and(|text| !text.as_str().trim().is_empty()),
            },
            None => Segment {
                raw,
                date: None,
                has_text: !raw.trim().is_empty(),
            },
        }
    }

    /// The segment with `remark` appended, keeping its surrounding whitespace.
    fn append(&self, date: &str, remark: &str) -> String {
        let content = self.raw.trim();
        let start = self.raw.len() - self.raw.trim_start().len();
        let leading = &self.raw[..start];
        let trailing = &self.raw[start + content.len()..];

        let content = match (self.date, self.has_text) {
            (Some(_), false) => dated_entry(date, remark),
            _ => format!("{content}{SAME_DAY_SEPARATOR}{remark}"),
        };
        format!("{leading}{content}{trailing}")
    }
}

fn dated_entry(date: &str, remark: &str) -> String {
    format!("{date} - {remark}").trim_end().to_string()
}

/// Merges `remark`, made on `date`, into an existing remarks cell.
///
/// The remark extends the latest entry tagged `date`, after any notes that follow it, or
/// becomes a new entry at the end of the cell.
pub fn merge_remark(existing: &str, date: &str, remark: &str) -> String {
    let remark = remark.replace(ENTRY_SEPARATOR, ESCAPED_ENTRY_SEPARATOR);
    let segments: Vec<Segment> = existing.split(ENTRY_SEPARATOR).map(Segment::parse).collect();

    let Some(tagged) = segments
        .iter()
        .rposition(|segment| segment.date == Some(date))
    else {
        let existing = existing.trim_end();
        if existing.is_empty() {
            return dated_entry(date, &remark);
        }
        return format!("{existing}{NEW_ENTRY_SEPARATOR}{}", dated_entry(date, &remark));
    };

    let target = (tagged + 1..segments.len())
        .take_while(|&position| segments[position].date.is_none())
        .filter(|&position| segments[position].has_text)
        .last()
        .unwrap_or(tagged);

    let mut merged: Vec<String> = segments.iter().map(|segment| segment.raw.to_string()).collect();
    merged[target] = segments[target].append(date, &remark);
    merged.join(ENTRY_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_remark_on_empty_cell() {
        assert_eq!(merge_remark("", "12 Jan", "no answer"), "12 Jan - no answer");
    }

    #[test]
    fn test_same_day_remark_joins_with_slash() {
        let first = merge_remark("", "12 Jan", "no answer");
        assert_eq!(
            merge_remark(&first, "12 Jan", "call back"),
            "12 Jan - no answer/call back"
        );
    }

    #[test]
    fn test_new_day_appends_segment() {
        assert_eq!(
            merge_remark("12 Jan - no answer/call back", "13 Jan", "interested"),
            "12 Jan - no answer/call back | 13 Jan - interested"
        );
    }

    #[test]
    fn test_same_day_edit_leaves_other_segments_alone() {
        let existing = "10 Jan - left voicemail | 12 Jan - busy | 13 Jan - wants brochure";
        assert_eq!(
            merge_remark(existing, "10 Jan", "emailed"),
            "10 Jan - left voicemail/emailed | 12 Jan - busy | 13 Jan - wants brochure"
        );
    }

    #[test]
    fn test_untagged_text_is_preserved() {
        assert_eq!(
            merge_remark("VIP client", "12 Jan", "no answer"),
            "VIP client | 12 Jan - no answer"
        );
    }

    #[test]
    fn test_existing_separators_are_kept_verbatim() {
        assert_eq!(
            merge_remark("10 Jan - a|VIP", "12 Jan", "x"),
            "10 Jan - a|VIP | 12 Jan - x"
        );
        assert_eq!(
            merge_remark("10 Jan -   a|VIP  ", "10 Jan", "x"),
            "10 Jan -   a|VIP/x  "
        );
    }

    #[test]
    fn test_same_day_remark_goes_after_notes_of_that_day() {
        assert_eq!(
            merge_remark("12 Jan - yes | no", "12 Jan", "later"),
            "12 Jan - yes | no/later"
        );
        assert_eq!(
            merge_remark("12 Jan - yes | no | 13 Jan - busy", "12 Jan", "later"),
            "12 Jan - yes | no/later | 13 Jan - busy"
        );
    }

    #[test]
    fn test_pipe_inside_a_remark_does_not_split_it() {
        let first = merge_remark("", "12 Jan", "yes | no");
        assert_eq!(first, "12 Jan - yes ¦ no");
        assert_eq!(
            merge_remark(&first, "12 Jan", "later"),
            "12 Jan - yes ¦ no/later"
        );
    }

    #[test]
    fn test_empty_remark_keeps_its_tag() {
        let first = merge_remark("", "12 Jan", "");
        assert_eq!(first, "12 Jan -");
        assert_eq!(merge_remark(&first, "12 Jan", "call back"), "12 Jan - call back");
        assert_eq!(
            merge_remark("10 Jan - busy | 12 Jan - ", "12 Jan", "call back"),
            "10 Jan - busy | 12 Jan - call back "
        );
    }

    #[test]
    fn test_day_prefix_does_not_match_other_day() {
        // "2 Jan" must not be mistaken for the tail of "12 Jan".
        assert_eq!(
            merge_remark("12 Jan - busy", "2 Jan", "late"),
            "12 Jan - busy | 2 Jan - late"
        );
    }

    #[test]
    fn test_segment_parse() {
        let dated = Segment::parse(" 12 Jan - a - b ");
        assert_eq!(dated.date, Some("12 Jan"));
        assert!(dated.has_text);

        let bare_tag = Segment::parse("12 Jan -");
        assert_eq!(bare_tag.date, Some("12 Jan"));
        assert!(!bare_tag.has_text);

        let note = Segment::parse("  note ");
        assert_eq!(note.date, None);
        assert!(note.has_text);
    }
}
