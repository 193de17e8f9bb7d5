//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                                   |
//! |---------|------------------|-----------------------------------------------|
//! | 0       | Universal        | Success                                       |
//! | 2       | Universal        | Usage error, or a command run in the wrong place |
//! | 3       | Universal        | Workbook / file IO                            |
//! | 4       | Universal        | Invalid settings or properties file           |
//! | 50-59   | fetch            | Zoho Books / Creator / Reports                |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-4)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, or a row that does not hold what the
/// command needs (header row, non-blank copy target).
pub const EXIT_USAGE: u8 = 2;

/// A workbook sheet could not be read or written.
pub const EXIT_IO: u8 = 3;

/// Settings or properties file exists but does not parse / validate.
pub const EXIT_CONFIG: u8 = 4;

// =============================================================================
// Fetch / adapter (50-59): Zoho APIs
// =============================================================================

/// Required property missing (neither env var nor properties file).
pub const EXIT_FETCH_NOT_AUTH: u8 = 50;

/// Auth rejected by upstream (401/403), or an empty reply that means the
/// token / owner is wrong.
pub const EXIT_FETCH_AUTH: u8 = 51;

/// Request rejected by upstream (400, or a Books error code).
pub const EXIT_FETCH_VALIDATION: u8 = 52;

/// Upstream error (other 4xx, 5xx), network failure, or unparseable reply.
pub const EXIT_FETCH_UPSTREAM: u8 = 54;
