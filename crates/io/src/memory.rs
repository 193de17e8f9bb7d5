use sheetclerk_signup::RawRow;

use crate::store::{insert_at, StoreError, TabularStore};

/// A sheet held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTable {
    rows: Vec<RawRow>,
}

impl MemoryTable {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }
}

impl TabularStore for MemoryTable {
    fn read(&self) -> Result<Vec<RawRow>, StoreError> {
        Ok(self.rows.clone())
    }

    fn insert_row(&mut self, position: usize, cells: RawRow) -> Result<(), StoreError> {
        insert_at(&mut self.rows, position, cells);
        Ok(())
    }

    fn overwrite(&mut self, rows: Vec<RawRow>) -> Result<(), StoreError> {
        self.rows = rows;
        Ok(())
    }
}
