//! Zoho API adapters.

pub mod books;
mod common;
pub mod creator;
pub mod reports;

pub use books::BooksClient;
pub use creator::CreatorClient;
pub use reports::ReportsClient;
