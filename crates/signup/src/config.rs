use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::dates::DatePolicy;
use crate::error::SignupError;
use crate::format::INTRO_COLUMNS;

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Raw sheet header label -> canonical field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping(BTreeMap<String, String>);

impl ColumnMapping {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(label, field)| (label.to_string(), field.to_string()))
                .collect(),
        )
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.0.get(label).map(String::as_str)
    }

    /// The mapped name, or `label` itself when unmapped.
    pub fn canonical_name<'a>(&'a self, label: &'a str) -> &'a str {
        self.get(label).unwrap_or(label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The sign-up form export's columns.
fn default_columns() -> ColumnMapping {
    ColumnMapping::from_pairs([
        ("Submitted", "submitted"),
        ("first-name", "first_name"),
        ("last-name", "last_name"),
        ("address", "address"),
        ("phone", "phone"),
        ("email", "email"),
        ("occupation", "occupation"),
        ("age", "age"),
        ("referer", "referer"),
        ("emergency-contact-name", "emergency_name"),
        ("emergency-contact-info", "emergency_phone"),
        ("interest", "interest"),
        ("emergency-contact-relation", "designation"),
        ("expectations", "expectations"),
        ("emergency-contact-method", "contact_method"),
        ("emergency-contact-method2", "contact_method2"),
        ("experience", "experience"),
        ("promotion-type", "promotion"),
        ("class-day", "not_used"),
        ("legal-waiver-agreement", "waiver"),
        ("sign-up-verification", "verification"),
        ("id:promotion-type", "promotion"),
        ("id:class-day", "class_day"),
        ("groupon-code", "groupon"),
        ("payment-option", "payment"),
        ("Login", "login"),
        ("Submitted From", "ip"),
    ])
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupSettings {
    /// Sheet the sign-up form writes to.
    pub signup_sheet: String,
    /// Tracking sheet new visitors are copied into.
    pub intro_sheet: String,
    /// Sheet holding the price table.
    pub prices_sheet: String,
    pub company_name: String,
    /// Days before an invoice is due.
    pub payment_terms: u32,
    pub class_weekdays: Vec<Weekday>,
    /// 0-based column of the intro sheet holding e-mails.
    pub intro_email_column: usize,
    pub columns: ColumnMapping,
}

impl Default for SignupSettings {
    fn default() -> Self {
        Self {
            signup_sheet: "NYB Sign Up Information".into(),
            intro_sheet: "Intro Class".into(),
            prices_sheet: "Prices".into(),
            company_name: "New York Budokai".into(),
            payment_terms: 30,
            class_weekdays: vec![Weekday::Tue, Weekday::Thu],
            intro_email_column: crate::format::EMAIL,
            columns: default_columns(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl SignupSettings {
    pub fn from_toml(input: &str) -> Result<Self, SignupError> {
        let settings: SignupSettings =
            toml::from_str(input).map_err(|e| SignupError::SettingsParse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String, SignupError> {
        toml::to_string_pretty(self).map_err(|e| SignupError::SettingsParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), SignupError> {
        if self.class_weekdays.is_empty() {
            return Err(SignupError::SettingsValidation(
                "class_weekdays must name at least one weekday".into(),
            ));
        }

        if self.intro_email_column >= INTRO_COLUMNS {
            return Err(SignupError::SettingsValidation(format!(
                "intro_email_column must be below {}, got {}",
                INTRO_COLUMNS, self.intro_email_column
            )));
        }

        for (name, sheet) in [
            ("signup_sheet", &self.signup_sheet),
            ("intro_sheet", &self.intro_sheet),
            ("prices_sheet", &self.prices_sheet),
        ] {
            if sheet.trim().is_empty() {
                return Err(SignupError::SettingsValidation(format!(
                    "{name} must not be empty"
                )));
            }
        }

        Ok(())
    }

    pub fn date_policy(&self) -> DatePolicy {
        DatePolicy::new(self.class_weekdays.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
