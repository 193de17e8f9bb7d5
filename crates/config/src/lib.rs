// Configuration loading

pub mod properties;

pub use properties::{ConfigError, Lookup, Properties, ValueSource};
