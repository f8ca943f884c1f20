//! Search over a generated report

use crate::report::OutputRow;

/// Rows where any column contains `query`, ignoring case
///
/// A blank query matches nothing.
pub fn search_rows<'a>(rows: &'a [OutputRow], query: &str) -> Vec<&'a OutputRow> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    rows.iter()
        .filter(|row| {
            row.to_record()
                .iter()
                .any(|value| value.to_lowercase().contains(&query))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupRecord;

    fn rows() -> Vec<OutputRow> {
        vec![
            OutputRow::new(LookupRecord::new("C1", "CarrierOne", "100", "200"), "MPM4DM01"),
            OutputRow::new(LookupRecord::new("C2", "Parcel Express", "101", "201"), "MPM4DM02"),
            OutputRow::new(LookupRecord::fallback(), "MPM4DM03"),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let rows = rows();
        let hits = search_rows(&rows, "carrierone");

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "C1");
    }

    #[test]
    fn test_search_matches_any_column() {
        let rows = rows();

        assert_eq!(search_rows(&rows, "dm0").len(), 3);
        assert_eq!(search_rows(&rows, "201")[0].code, "C2");
        assert_eq!(search_rows(&rows, "n/a")[0].tag, "MPM4DM03");
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let rows = rows();

        assert!(search_rows(&rows, "").is_empty());
        assert!(search_rows(&rows, "   ").is_empty());
    }
}
