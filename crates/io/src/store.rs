use sheetclerk_signup::{Cell, RawRow};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sheet '{sheet}' not found ({path})")]
    Missing { sheet: String, path: String },
    #[error("cannot read {path}: {message}")]
    Read { path: String, message: String },
    #[error("cannot write {path}: {message}")]
    Write { path: String, message: String },
}

/// A sheet the workflows read from and write to.
///
/// Row positions are 0-based; row 0 is the header row when the sheet has one.
pub trait TabularStore {
    /// Every row, top to bottom. Rows may have different lengths.
    fn read(&self) -> Result<Vec<RawRow>, StoreError>;

    /// Insert `cells` as a new row at `position`, shifting that row and
    /// everything below it down by one.
    fn insert_row(&mut self, position: usize, cells: RawRow) -> Result<(), StoreError>;

    /// Replace the whole sheet.
    fn overwrite(&mut self, rows: Vec<RawRow>) -> Result<(), StoreError>;
}

/// Row-insert semantics shared by the backends. Positions past the end are
/// reached by padding with empty rows.
pub(crate) fn insert_at(rows: &mut Vec<RawRow>, position: usize, cells: RawRow) {
    while rows.len() < position {
        rows.push(vec![Cell::Empty]);
    }
    rows.insert(position, cells);
}
