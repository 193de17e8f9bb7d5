//! `sheetclerk-signup`: sign-up processing engine.
//!
//! Pure engine crate: receives sheet rows already read from a store,
//! returns contact records, intro-class rows and export payloads.
//! No CLI, HTTP or file IO dependencies.

pub mod config;
pub mod dates;
pub mod enrich;
pub mod error;
pub mod format;
pub mod mapper;
pub mod model;
pub mod payload;
pub mod price;
pub mod select;

pub use config::{ColumnMapping, SignupSettings};
pub use dates::{add_months, format_mdy, DatePolicy};
pub use enrich::enrich;
pub use error::SignupError;
pub use format::{format_row, IntroRow, PaymentColumn, INTRO_COLUMNS};
pub use mapper::{map_rows, record_at_row};
pub use model::{Cell, ContactRecord, EnrichedContact, Months, RawRow};
pub use payload::ContactPayload;
pub use price::PriceTable;
pub use select::{existing_emails, select_new};
