//! Shared infrastructure for the Zoho adapters.
//!
//! Each adapter (books, creator, reports) reuses:
//! - `FetchClient`: HTTP client with status classification
//! - `require_property`: env > keychain > properties file > error
//!
//! Requests are sent once. A failed call is reported, never retried.

use std::time::Duration;

use sheetclerk_config::properties::env_var_name;
use sheetclerk_config::{ConfigError, Properties};

use crate::exit_codes;
use crate::CliError;

// ── Constants ───────────────────────────────────────────────────────

pub(super) const USER_AGENT: &str = concat!("clerk/", env!("CARGO_PKG_VERSION"));
pub(super) const TIMEOUT_SECS: u64 = 30;

/// Longest slice of a response body quoted in an error message
const BODY_EXCERPT: usize = 200;

// ── FetchClient ─────────────────────────────────────────────────────

/// A completed HTTP exchange: status plus the body as text (BOM removed).
#[derive(Debug)]
pub(super) struct RawResponse {
    pub status: u16,
    pub text: String,
}

/// Shared HTTP client that maps HTTP status codes to the standard exit codes.
///
/// Adapters own their credentials, base URL, and auth method. They pass a
/// request-building closure which receives the underlying
/// `reqwest::blocking::Client` and returns a fully configured
/// `RequestBuilder` (URL, auth, query params, form).
pub(super) struct FetchClient {
    http: reqwest::blocking::Client,
    source_name: String,
    error_extractor: fn(&str, u16) -> String,
}

impl FetchClient {
    pub(super) fn new(
        source_name: &str,
        error_extractor: fn(&str, u16) -> String,
    ) -> Result<Self, CliError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CliError {
                code: exit_codes::EXIT_FETCH_UPSTREAM,
                message: format!("failed to build HTTP client: {}", e),
                hint: None,
            })?;

        Ok(Self {
            http,
            source_name: source_name.to_string(),
            error_extractor,
        })
    }

    pub(super) fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Send the request and read the body, whatever the status.
    /// Only network / timeout failures are errors here.
    pub(super) fn send(
        &self,
        build_request: impl FnOnce(&reqwest::blocking::Client) -> reqwest::blocking::RequestBuilder,
    ) -> Result<RawResponse, CliError> {
        let resp = build_request(&self.http).send().map_err(|e| CliError {
            code: exit_codes::EXIT_FETCH_UPSTREAM,
            message: format!("{} request failed: {}", self.source_name, e),
            hint: None,
        })?;

        let status = resp.status().as_u16();
        let text = resp.text().map_err(|e| CliError {
            code: exit_codes::EXIT_FETCH_UPSTREAM,
            message: format!("failed to read {} response body: {}", self.source_name, e),
            hint: None,
        })?;
        log::debug!("{} replied HTTP {} ({} bytes)", self.source_name, status, text.len());

        Ok(RawResponse {
            status,
            text: text.trim_start_matches('\u{feff}').to_string(),
        })
    }

    /// Map a non-2xx status to its exit code, quoting what the
    /// adapter's error extractor finds in the body.
    pub(super) fn check_status(&self, resp: &RawResponse) -> Result<(), CliError> {
        let status = resp.status;
        if (200..300).contains(&status) {
            return Ok(());
        }

        let msg = (self.error_extractor)(&resp.text, status);
        let (code, what) = match status {
            401 | 403 => (exit_codes::EXIT_FETCH_AUTH, "auth failed"),
            400 => (exit_codes::EXIT_FETCH_VALIDATION, "request rejected"),
            _ => (exit_codes::EXIT_FETCH_UPSTREAM, "error"),
        };
        Err(CliError {
            code,
            message: format!("{} {} ({}): {}", self.source_name, what, status, msg),
            hint: None,
        })
    }

    /// Send, require a 2xx status, and parse the body as JSON.
    pub(super) fn request_json(
        &self,
        build_request: impl FnOnce(&reqwest::blocking::Client) -> reqwest::blocking::RequestBuilder,
    ) -> Result<serde_json::Value, CliError> {
        let resp = self.send(build_request)?;
        self.check_status(&resp)?;
        self.parse_json(&resp.text)
    }

    pub(super) fn parse_json(&self, text: &str) -> Result<serde_json::Value, CliError> {
        serde_json::from_str(text).map_err(|e| CliError {
            code: exit_codes::EXIT_FETCH_UPSTREAM,
            message: format!(
                "failed to parse {} JSON response: {} (body: {})",
                self.source_name,
                e,
                excerpt(text),
            ),
            hint: None,
        })
    }
}

/// First few hundred characters of a body, cut on a char boundary.
pub(super) fn excerpt(text: &str) -> &str {
    match text.char_indices().nth(BODY_EXCERPT) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Error extractor for APIs that answer errors with `{"message": ...}`,
/// falling back to the raw body.
pub(super) fn extract_message(text: &str, status: u16) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|body| body["message"].as_str().map(str::to_string));
    match from_json {
        Some(msg) => msg,
        None if text.trim().is_empty() => format!("HTTP {}", status),
        None => excerpt(text.trim()).to_string(),
    }
}

// ── Properties ──────────────────────────────────────────────────────

/// Look up a required property, mapping a miss to exit 50 with a hint
/// naming both places it can be set.
pub(super) fn require_property(
    properties: &Properties,
    key: &str,
    source_name: &str,
) -> Result<String, CliError> {
    properties.require(key).map_err(|e| match e {
        ConfigError::Missing { key } => {
            let file = properties
                .path()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(Properties::default_path);
            CliError {
                code: exit_codes::EXIT_FETCH_NOT_AUTH,
                message: format!("missing {} property '{}'", source_name, key),
                hint: Some(format!(
                    "set {} or add `{} = \"...\"` to {}",
                    env_var_name(&key),
                    key,
                    file.display(),
                )),
            }
        }
        other => CliError::config(other.to_string()),
    })
}

// ── Tests ───────────────────────────────────────────────────────────
