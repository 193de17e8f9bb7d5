//! Zoho Books: create a contact from a sign-up row.
//!
//! `POST /api/v3/contacts?authtoken=..&organization_id=..&JSONString=..`
//! Books answers `{"code": 0, "message": "The contact has been added."}`
//! on success and a non-zero `code` with a `message` otherwise.

use sheetclerk_config::Properties;
use sheetclerk_signup::ContactPayload;

use super::common::{self, FetchClient};
use crate::exit_codes;
use crate::CliError;

pub const BOOKS_API_BASE: &str = "https://books.zoho.com";

pub const TOKEN_KEY: &str = "zoho_token";
pub const ORGANIZATION_KEY: &str = "zoho_organization_id";

pub struct BooksClient {
    client: FetchClient,
    token: String,
    organization_id: String,
    base_url: String,
}

impl BooksClient {
    pub fn from_properties(properties: &Properties, base_url: Option<&str>) -> Result<Self, CliError> {
        let token = common::require_property(properties, TOKEN_KEY, "Zoho Books")?;
        let organization_id = common::require_property(properties, ORGANIZATION_KEY, "Zoho Books")?;
        Self::with_base_url(
            token,
            organization_id,
            base_url.unwrap_or(BOOKS_API_BASE).to_string(),
        )
    }

    pub fn with_base_url(token: String, organization_id: String, base_url: String) -> Result<Self, CliError> {
        Ok(Self {
            client: FetchClient::new("Zoho Books", common::extract_message)?,
            token,
            organization_id,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create the contact; returns the message Books answered with.
    pub fn create_contact(&self, payload: &ContactPayload) -> Result<String, CliError> {
        let json = payload.to_json().map_err(|e| CliError {
            code: exit_codes::EXIT_FETCH_VALIDATION,
            message: format!("cannot encode contact: {}", e),
            hint: None,
        })?;
        let url = format!("{}/api/v3/contacts", self.base_url);
        log::info!("creating Zoho Books contact '{}'", payload.contact_name);

        let body = self.client.request_json(|http| {
            http.post(&url).query(&[
                ("authtoken", self.token.as_str()),
                ("organization_id", self.organization_id.as_str()),
                ("JSONString", json.as_str()),
            ])
        })?;

        let message = body["message"].as_str().unwrap_or("").to_string();
        match body["code"].as_i64() {
            Some(0) => Ok(message),
            None => {
                let raw = body.to_string();
                Err(CliError {
                    code: exit_codes::EXIT_FETCH_UPSTREAM,
                    message: format!(
                        "{} reply has no result code: {}",
                        self.client.source_name(),
                        common::excerpt(&raw),
                    ),
                    hint: None,
                })
            }
            Some(code) => Err(CliError {
                code: exit_codes::EXIT_FETCH_VALIDATION,
                message: format!(
                    "{} rejected the contact (code {}): {}",
                    self.client.source_name(),
                    code,
                    message,
                ),
                hint: None,
            }),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
