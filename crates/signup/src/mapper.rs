use crate::config::ColumnMapping;
use crate::error::SignupError;
use crate::model::{Cell, ContactRecord, RawRow};

/// Turn a sheet (header row + data rows) into contact records.
///
/// Each column is stored under `mapping[header]`, or under the header
/// label itself when the mapping has no entry for it. A table with no
/// data rows yields no records. Cells missing from short rows are empty.
pub fn map_rows(table: &[RawRow], mapping: &ColumnMapping) -> Vec<ContactRecord> {
    let Some((header, rows)) = table.split_first() else {
        return Vec::new();
    };

    let fields: Vec<String> = header
        .iter()
        .map(|label| mapping.canonical_name(&label.to_string()).to_string())
        .collect();

    rows.iter()
        .map(|row| {
            let mut record = ContactRecord::default();
            for (col, field) in fields.iter().enumerate() {
                let cell = row.get(col).cloned().unwrap_or(Cell::Empty);
                record.set(field, cell);
            }
            record
        })
        .collect()
}

/// The record shown on 1-based sheet row `row` (row 1 is the header).
pub fn record_at_row(records: &[ContactRecord], row: usize) -> Result<&ContactRecord, SignupError> {
    row.checked_sub(2)
        .and_then(|idx| records.get(idx))
        .ok_or(SignupError::RowOutOfRange {
            row,
            available: records.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|c| Cell::text(*c)).collect()
    }

    fn mapping() -> ColumnMapping {
        ColumnMapping::from_pairs([
            ("first-name", "first_name"),
            ("email", "email"),
            ("id:class-day", "class_day"),
        ])
    }

    #[test]
    fn header_only_table_is_empty() {
        assert!(map_rows(&[], &mapping()).is_empty());
        assert!(map_rows(&[row(&["first-name", "email"])], &mapping()).is_empty());
    }

    #[test]
    fn maps_known_and_passes_through_unknown() {
        let table = vec![
            row(&["first-name", "email", "Shoe size"]),
            row(&["Ann", "ann@x.com", "9"]),
        ];
        let records = map_rows(&table, &mapping());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first_name, "Ann");
        assert_eq!(records[0].email, "ann@x.com");
        assert_eq!(records[0].extra.get("Shoe size"), Some(&Cell::text("9")));
    }

    #[test]
    fn short_rows_get_empty_cells() {
        let table = vec![row(&["first-name", "email"]), row(&["Ann"])];
        let records = map_rows(&table, &mapping());
        assert_eq!(records[0].email, "");
    }

    #[test]
    fn duplicate_source_labels_last_write_wins() {
        let mapping = ColumnMapping::from_pairs([("promotion-type", "promotion"), ("id:promotion-type", "promotion")]);
        let table = vec![
            row(&["promotion-type", "id:promotion-type"]),
            row(&["1 Month Unlimited", "One Month"]),
        ];
        let records = map_rows(&table, &mapping);
        assert_eq!(records[0].promotion, "One Month");
    }

    #[test]
    fn mapping_twice_is_identical() {
        let table = vec![row(&["first-name", "email"]), row(&["Ann", "ann@x.com"])];
        assert_eq!(map_rows(&table, &mapping()), map_rows(&table, &mapping()));
    }

    #[test]
    fn record_at_row_skips_header() {
        let table = vec![
            row(&["first-name"]),
            row(&["Ann"]),
            row(&["Bob"]),
        ];
        let records = map_rows(&table, &mapping());
        assert_eq!(record_at_row(&records, 2).unwrap().first_name, "Ann");
        assert_eq!(record_at_row(&records, 3).unwrap().first_name, "Bob");
        assert!(matches!(
            record_at_row(&records, 1),
            Err(SignupError::RowOutOfRange { row: 1, available: 2 })
        ));
        assert!(record_at_row(&records, 4).is_err());
        assert!(record_at_row(&records, 0).is_err());
    }
}
