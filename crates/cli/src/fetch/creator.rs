//! Zoho Creator: pull a view into a sheet.
//!
//! The view (`<app>/view/<report>`) is posted as a form to `/api/json/<view>`.
//! The reply is an object whose first key holds the record array:
//!
//! ```json
//! {"Event_Staffing": [{"Name": "Ann", "Shift": "AM"}, ...]}
//! ```
//!
//! Headers come from the first record's keys in document order, plus an
//! `Updated` column stamped with the import time.

use sheetclerk_config::Properties;
use sheetclerk_signup::{Cell, RawRow};

use super::common::{self, FetchClient};
use crate::exit_codes;
use crate::CliError;

pub const CREATOR_API_BASE: &str = "https://creator.zoho.com";

pub const DEFAULT_VIEW: &str = "event-staff/view/Event_Staffing_Report";

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const OWNER_NAME_KEY: &str = "owner_name";

/// Header appended after the record fields
pub const UPDATED_HEADER: &str = "Updated";

pub struct CreatorClient {
    client: FetchClient,
    access_token: String,
    owner_name: String,
    base_url: String,
}

impl CreatorClient {
    pub fn from_properties(properties: &Properties, base_url: Option<&str>) -> Result<Self, CliError> {
        let access_token = common::require_property(properties, ACCESS_TOKEN_KEY, "Zoho Creator")?;
        let owner_name = common::require_property(properties, OWNER_NAME_KEY, "Zoho Creator")?;
        Self::with_base_url(
            access_token,
            owner_name,
            base_url.unwrap_or(CREATOR_API_BASE).to_string(),
        )
    }

    pub fn with_base_url(access_token: String, owner_name: String, base_url: String) -> Result<Self, CliError> {
        Ok(Self {
            client: FetchClient::new("Zoho Creator", extract_creator_error)?,
            access_token,
            owner_name,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch `view` and shape it as sheet rows (header first).
    /// An empty record array yields no rows at all.
    pub fn fetch_view(&self, view: &str, updated: &str) -> Result<Vec<RawRow>, CliError> {
        let url = format!("{}/api/json/{}", self.base_url, view.trim_start_matches('/'));
        log::info!("fetching Zoho Creator view {}", view);

        let resp = self.client.send(|http| {
            http.post(&url)
                .header("Accept", "text/plain")
                .form(&[
                    ("SingleLine", "SingleLineValue"),
                    ("authtoken", self.access_token.as_str()),
                    ("scope", "creatorapi"),
                    ("zc_ownername", self.owner_name.as_str()),
                    ("raw", "true"),
                ])
        })?;

        if resp.text.trim().is_empty() {
            return Err(CliError {
                code: exit_codes::EXIT_FETCH_AUTH,
                message: "Zoho Creator returned no data".to_string(),
                hint: Some(format!(
                    "check the {} and {} properties",
                    ACCESS_TOKEN_KEY, OWNER_NAME_KEY,
                )),
            });
        }
        self.client.check_status(&resp)?;

        let body = self.client.parse_json(&resp.text)?;
        rows_from_view(&body, updated)
    }
}

/// Creator error pages are HTML or plain text; surface them as they are.
fn extract_creator_error(text: &str, status: u16) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status)
    } else {
        common::excerpt(trimmed).to_string()
    }
}

fn rows_from_view(body: &serde_json::Value, updated: &str) -> Result<Vec<RawRow>, CliError> {
    let unexpected = || CliError {
        code: exit_codes::EXIT_FETCH_UPSTREAM,
        message: format!(
            "unexpected data format returned by Zoho Creator: {}",
            common::excerpt(&body.to_string()),
        ),
        hint: None,
    };

    let (table_name, table) = body
        .as_object()
        .and_then(|obj| obj.iter().next())
        .ok_or_else(unexpected)?;
    let records = table.as_array().ok_or_else(unexpected)?;

    let Some(first) = records.first() else {
        log::warn!("Zoho Creator table '{}' has no records", table_name);
        return Ok(Vec::new());
    };
    let first = first.as_object().ok_or_else(unexpected)?;

    let mut header: RawRow = first.keys().map(|k| Cell::text(k.as_str())).collect();
    header.push(Cell::text(UPDATED_HEADER));

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(header);
    for record in records {
        let fields = record.as_object().ok_or_else(unexpected)?;
        let mut row: RawRow = fields.values().map(Cell::from_json).collect();
        row.push(Cell::text(updated));
        rows.push(row);
    }
    log::info!("{} record(s) from Zoho Creator table '{}'", records.len(), table_name);
    Ok(rows)
}

// ── Tests ───────────────────────────────────────────────────────────
