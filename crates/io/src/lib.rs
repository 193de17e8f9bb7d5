// Sheet storage: the TabularStore seam plus its CSV and in-memory backends

pub mod csv;
pub mod memory;
pub mod store;

pub use self::csv::{CsvSheet, Workbook};
pub use memory::MemoryTable;
pub use store::{StoreError, TabularStore};
