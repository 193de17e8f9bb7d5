//! `clerk copy-new`: copy sign-ups not yet in the intro sheet.

use chrono::NaiveDate;

use sheetclerk_io::TabularStore;
use sheetclerk_signup::{
    enrich, existing_emails, format_row, map_rows, select_new, PriceTable, SignupSettings,
};

use crate::CliError;

/// Copy every new visitor into `intro`, starting at 1-based `target_row`.
///
/// The target row must be blank. Each record is inserted at the target,
/// the next one below it, pushing the blank row and everything after it
/// down. Returns the number of rows written.
pub fn copy_new_visitors(
    signup: &impl TabularStore,
    prices: &impl TabularStore,
    intro: &mut impl TabularStore,
    settings: &SignupSettings,
    target_row: usize,
    today: NaiveDate,
) -> Result<usize, CliError> {
    if target_row == 0 {
        return Err(CliError::args("rows are numbered from 1"));
    }
    let target = target_row - 1;

    let intro_rows = intro.read().map_err(CliError::store)?;
    let target_is_blank = intro_rows
        .get(target)
        .map_or(true, |row| row.iter().all(|cell| cell.is_blank()));
    if !target_is_blank {
        return Err(CliError {
            code: crate::exit_codes::EXIT_USAGE,
            message: format!("row {} of '{}' is not blank", target_row, settings.intro_sheet),
            hint: Some("pick a blank row to place new records".to_string()),
        });
    }

    let existing = existing_emails(&intro_rows, settings.intro_email_column);
    let contacts = map_rows(&signup.read().map_err(CliError::store)?, &settings.columns);
    let selected = select_new(&existing, &contacts, today);
    log::info!(
        "{} sign-up(s), {} already recorded, {} to copy",
        contacts.len(),
        existing.len(),
        selected.len(),
    );
    if selected.is_empty() {
        return Ok(0);
    }

    let price_table = PriceTable::new(prices.read().map_err(CliError::store)?);
    let policy = settings.date_policy();

    for (offset, contact) in selected.iter().enumerate() {
        let row = format_row(&enrich(contact, &policy), &price_table);
        log::debug!(
            "row {}: {} ({:?})",
            target_row + offset,
            contact.email,
            row.payment_column,
        );
        intro
            .insert_row(target + offset, row.into_cells())
            .map_err(CliError::store)?;
    }

    Ok(selected.len())
}

pub fn outcome_message(copied: usize) -> String {
    if copied > 0 {
        format!("{} new visitor(s) copied.", copied)
    } else {
        "There are no new visitors to copy.".to_string()
    }
}
