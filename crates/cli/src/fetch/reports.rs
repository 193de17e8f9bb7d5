//! Zoho Reports: export a report table into a sheet.
//!
//! `GET /api/<owner_login>?DBID=..&OBJID=..&ZOHO_ACTION=EXPORT&ZOHO_OUTPUT_FORMAT=JSON`
//! answers `{"response": {"result": {"column_order": [...], "rows": [[...]]}}}`.
//! The export escapes characters JSON does not allow escaped (`\'`), so a
//! body that fails to parse is parsed again with every backslash removed.

use sheetclerk_config::Properties;
use sheetclerk_signup::{Cell, RawRow};

use super::common::{self, FetchClient};
use crate::exit_codes;
use crate::CliError;

pub const REPORTS_API_BASE: &str = "https://reportsapi.zoho.com";

pub const AUTHTOKEN_KEY: &str = "reports_authtoken";
pub const OWNER_LOGIN_KEY: &str = "owner_login";
pub const DATABASE_ID_KEY: &str = "database_id";
pub const OBJECT_ID_KEY: &str = "object_id";

pub struct ReportsClient {
    client: FetchClient,
    authtoken: String,
    owner_login: String,
    database_id: String,
    object_id: String,
    base_url: String,
}

impl ReportsClient {
    pub fn from_properties(properties: &Properties, base_url: Option<&str>) -> Result<Self, CliError> {
        let get = |key| common::require_property(properties, key, "Zoho Reports");
        let authtoken = get(AUTHTOKEN_KEY)?;
        let owner_login = get(OWNER_LOGIN_KEY)?;
        let database_id = get(DATABASE_ID_KEY)?;
        let object_id = get(OBJECT_ID_KEY)?;

        Ok(Self {
            client: FetchClient::new("Zoho Reports", common::extract_message)?,
            authtoken,
            owner_login,
            database_id,
            object_id,
            base_url: base_url
                .unwrap_or(REPORTS_API_BASE)
                .trim_end_matches('/')
                .to_string(),
        })
    }

    /// Fetch the report as sheet rows: `column_order`, then every row.
    pub fn fetch_report(&self) -> Result<Vec<RawRow>, CliError> {
        let url = format!("{}/api/{}", self.base_url, self.owner_login);
        log::info!(
            "exporting Zoho Reports object {} from database {}",
            self.object_id, self.database_id,
        );

        let resp = self.client.send(|http| {
            http.get(&url).query(&[
                ("DBID", self.database_id.as_str()),
                ("OBJID", self.object_id.as_str()),
                ("ZOHO_ACTION", "EXPORT"),
                ("ZOHO_OUTPUT_FORMAT", "JSON"),
                ("ZOHO_API_VERSION", "1.0"),
                ("authtoken", self.authtoken.as_str()),
            ])
        })?;
        self.client.check_status(&resp)?;

        let body = match serde_json::from_str::<serde_json::Value>(&resp.text) {
            Ok(body) => body,
            Err(e) => {
                log::debug!("report body is not valid JSON ({}), retrying without backslashes", e);
                self.client.parse_json(&resp.text.replace('\\', ""))?
            }
        };
        rows_from_report(&body)
    }
}

fn rows_from_report(body: &serde_json::Value) -> Result<Vec<RawRow>, CliError> {
    let result = &body["response"]["result"];
    let (Some(columns), Some(rows)) = (result["column_order"].as_array(), result["rows"].as_array()) else {
        return Err(CliError {
            code: exit_codes::EXIT_FETCH_UPSTREAM,
            message: format!(
                "Zoho Reports response has no response.result.column_order / rows: {}",
                common::excerpt(&body.to_string()),
            ),
            hint: None,
        });
    };

    let mut out = Vec::with_capacity(rows.len() + 1);
    out.push(columns.iter().map(Cell::from_json).collect());
    for row in rows {
        match row.as_array() {
            Some(values) => out.push(values.iter().map(Cell::from_json).collect()),
            None => out.push(vec![Cell::from_json(row)]),
        }
    }
    log::info!("{} row(s) from Zoho Reports", rows.len());
    Ok(out)
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn props() -> Properties {
        Properties::from_pairs([
            (AUTHTOKEN_KEY, "rtok"),
            (OWNER_LOGIN_KEY, "owner@example.com"),
            (DATABASE_ID_KEY, "111"),
            (OBJECT_ID_KEY, "222"),
        ])
    }

    #[test]
    fn test_report_rows_with_query_params() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/owner@example.com")
                .query_param("DBID", "111")
                .query_param("OBJID", "222")
                .query_param("ZOHO_ACTION", "EXPORT")
                .query_param("ZOHO_OUTPUT_FORMAT", "JSON")
                .query_param("ZOHO_API_VERSION", "1.0")
                .query_param("authtoken", "rtok");
            then.status(200).json_body(serde_json::json!({
                "response": {"result": {
                    "column_order": ["Deal", "Stage", "Amount"],
                    "rows": [["Acme", "Won", 1200], ["Beta", "Open", null]]
                }}
            }));
        });

        let client = ReportsClient::from_properties(&props(), Some(&server.base_url())).unwrap();
        let rows = client.fetch_report().unwrap();
        mock.assert();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][2], Cell::text("Amount"));
        assert_eq!(rows[1][2], Cell::Number(1200.0));
        assert!(rows[2][2].is_blank());
    }

    #[test]
    fn test_invalid_escapes_are_stripped() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/owner@example.com");
            then.status(200).body(
                r#"{"response":{"result":{"column_order":["Name"],"rows":[["O\'Brien"]]}}}"#,
            );
        });

        let client = ReportsClient::from_properties(&props(), Some(&server.base_url())).unwrap();
        let rows = client.fetch_report().unwrap();
        assert_eq!(rows[1][0], Cell::text("O'Brien"));
    }

    #[test]
    fn test_missing_result_is_upstream_error() {
        let err = rows_from_report(&serde_json::json!({"response": {"error": "x"}})).unwrap_err();
        assert_eq!(err.code, exit_codes::EXIT_FETCH_UPSTREAM);
    }

    #[test]
    fn test_missing_object_id_exit_50() {
        std::env::remove_var("SHEETCLERK_OBJECT_ID");
        let props = Properties::from_pairs([
            (AUTHTOKEN_KEY, "rtok"),
            (OWNER_LOGIN_KEY, "owner@example.com"),
            (DATABASE_ID_KEY, "111"),
        ]);
        let err = ReportsClient::from_properties(&props, None).err().unwrap();
        assert_eq!(err.code, exit_codes::EXIT_FETCH_NOT_AUTH);
        assert!(err.message.contains("object_id"), "message: {}", err.message);
    }
}
