use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignupError {
    /// TOML parse / deserialization error.
    #[error("settings parse error: {0}")]
    SettingsParse(String),
    /// Settings validation error (no class weekdays, column out of range, ...).
    #[error("settings validation error: {0}")]
    SettingsValidation(String),
    /// A sheet row that does not hold a sign-up record (header row, or past the data).
    #[error("row {row} is not a sign-up record (the sheet has {available} data row(s))")]
    RowOutOfRange { row: usize, available: usize },
}
