//! `clerk export-contact`: build the Zoho Books contact for one sign-up row.

use sheetclerk_io::TabularStore;
use sheetclerk_signup::{enrich, map_rows, record_at_row, ContactPayload, SignupError, SignupSettings};

use crate::exit_codes;
use crate::CliError;

/// Payload for the record on 1-based `row` of the sign-up sheet.
pub fn contact_payload(
    signup: &impl TabularStore,
    settings: &SignupSettings,
    row: usize,
) -> Result<ContactPayload, CliError> {
    let contacts = map_rows(&signup.read().map_err(CliError::store)?, &settings.columns);
    let record = record_at_row(&contacts, row).map_err(|e| {
        let hint = match &e {
            SignupError::RowOutOfRange { available: 0, .. } => {
                format!("'{}' has no sign-ups yet", settings.signup_sheet)
            }
            SignupError::RowOutOfRange { available, .. } => {
                format!("pick a row of '{}' between 2 and {}", settings.signup_sheet, available + 1)
            }
            _ => String::new(),
        };
        CliError {
            code: exit_codes::EXIT_USAGE,
            message: e.to_string(),
            hint: Some(hint).filter(|h| !h.is_empty()),
        }
    })?;

    let enriched = enrich(record, &settings.date_policy());
    log::info!("exporting {} ({})", record.full_name(), enriched.notes);
    Ok(ContactPayload::from_contact(&enriched, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetclerk_io::MemoryTable;
    use sheetclerk_signup::Cell;

    fn signup() -> MemoryTable {
        let row = |cells: &[&str]| cells.iter().map(|c| Cell::text(*c)).collect::<Vec<_>>();
        MemoryTable::new(vec![
            row(&["first-name", "last-name", "email", "id:class-day", "id:promotion-type"]),
            row(&["Ann", "Lee", "a@x.com", "2099-01-06", "One Month"]),
        ])
    }

    #[test]
    fn builds_payload_for_data_row() {
        let payload = contact_payload(&signup(), &SignupSettings::default(), 2).unwrap();
        assert_eq!(payload.contact_name, "Ann Lee");
        assert_eq!(payload.notes, "One Month starts 1/6/2099 expires 2/5/2099");
    }

    #[test]
    fn header_row_is_wrong_context() {
        let err = contact_payload(&signup(), &SignupSettings::default(), 1).unwrap_err();
        assert_eq!(err.code, exit_codes::EXIT_USAGE);
        assert!(err.hint.unwrap().contains("between 2 and 2"));
    }

    #[test]
    fn empty_sheet_has_no_rows() {
        let err = contact_payload(&MemoryTable::default(), &SignupSettings::default(), 2).unwrap_err();
        assert!(err.hint.unwrap().contains("no sign-ups yet"));
    }
}
