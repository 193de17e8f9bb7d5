//! `clerk import-creator` / `clerk import-report`: replace a sheet with
//! rows pulled from Zoho.

use sheetclerk_io::TabularStore;
use sheetclerk_signup::RawRow;

use crate::CliError;

/// Overwrite `sheet` with `rows`. An empty result leaves the sheet as it
/// was. Returns the number of data rows written (header excluded).
pub fn replace_sheet(sheet: &mut impl TabularStore, rows: Vec<RawRow>) -> Result<usize, CliError> {
    if rows.is_empty() {
        log::warn!("nothing to import, sheet left unchanged");
        return Ok(0);
    }
    let data_rows = rows.len() - 1;
    sheet.overwrite(rows).map_err(CliError::store)?;
    Ok(data_rows)
}

/// Sheet name for a Creator view: its last path segment.
pub fn sheet_for_view(view: &str) -> &str {
    view.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetclerk_io::MemoryTable;
    use sheetclerk_signup::Cell;

    #[test]
    fn overwrite_replaces_everything() {
        let mut sheet = MemoryTable::new(vec![vec![Cell::text("old")]; 5]);
        let rows = vec![vec![Cell::text("h")], vec![Cell::text("a")]];
        assert_eq!(replace_sheet(&mut sheet, rows.clone()).unwrap(), 1);
        assert_eq!(sheet.rows(), rows.as_slice());
    }

    #[test]
    fn empty_import_keeps_sheet() {
        let mut sheet = MemoryTable::new(vec![vec![Cell::text("old")]]);
        assert_eq!(replace_sheet(&mut sheet, Vec::new()).unwrap(), 0);
        assert_eq!(sheet.rows().len(), 1);
    }

    #[test]
    fn view_sheet_name() {
        assert_eq!(sheet_for_view("event-staff/view/Event_Staffing_Report"), "Event_Staffing_Report");
        assert_eq!(sheet_for_view("Report/"), "Report");
        assert_eq!(sheet_for_view("plain"), "plain");
    }
}
