//! `clerk how-to-use`

use sheetclerk_signup::SignupSettings;

pub fn how_to_use(settings: &SignupSettings) -> String {
    format!(
        "\
Copy New Visitors
  Pick a blank row of '{intro}' where new records should start and run:

    clerk copy-new --row <N>

  A sign-up is new when its class day is today or later and its e-mail
  is not already in '{intro}'. Records are copied in class-day order, each
  below the previous one.

  Formatting and moving records around is still up to you. Values can be
  edited after they are copied as long as the e-mail address stays, since
  it identifies the record.

Export Contact to Zoho Books
  Find the sign-up's row number in '{signup}' and run:

    clerk export-contact --row <N>

  Add --dry-run to print the contact without sending it.
",
        intro = settings.intro_sheet,
        signup = settings.signup_sheet,
    )
}
