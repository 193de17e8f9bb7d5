// Script properties: credentials and identifiers for the hosted APIs
//
// Values are looked up in order:
// 1. Environment variable (SHEETCLERK_ZOHO_TOKEN, etc.)
// 2. System keychain (with the `keychain` feature)
// 3. properties.toml
//
// Workflow settings never hold credentials; they live here.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Service name for keychain storage
#[cfg(feature = "keychain")]
const KEYCHAIN_SERVICE: &str = "sheetclerk";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid properties file {path}: {message}")]
    Parse { path: String, message: String },
    #[error("missing property '{key}'")]
    Missing { key: String },
}

/// Where a property value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Environment,
    Keychain,
    File,
}

impl ValueSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueSource::Environment => "environment",
            ValueSource::Keychain => "keychain",
            ValueSource::File => "properties file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub value: String,
    pub source: ValueSource,
}

/// Flat key/value property store.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    values: BTreeMap<String, String>,
    path: Option<PathBuf>,
}

/// Environment variable overriding `key`: upper-cased, non-alphanumerics as `_`.
pub fn env_var_name(key: &str) -> String {
    let normalized: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("SHEETCLERK_{normalized}")
}

impl Properties {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sheetclerk")
            .join("properties.toml")
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist. A missing default file yields an empty
    /// store, so everything can still come from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !explicit && !path.exists() {
            log::debug!("no properties file at {}", path.display());
            return Ok(Self { values: BTreeMap::new(), path: None });
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut props = Self::from_toml(&contents).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;
        log::debug!("loaded {} properties from {}", props.values.len(), path.display());
        props.path = Some(path);
        Ok(props)
    }

    /// Parse a flat TOML table. Strings, integers, floats and booleans are
    /// accepted and kept as their text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| {
            ConfigError::Parse { path: "<inline>".to_string(), message: e.message().to_string() }
        })?;

        let mut values = BTreeMap::new();
        for (key, value) in table {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    return Err(ConfigError::Parse {
                        path: "<inline>".to_string(),
                        message: format!("'{key}' must be a plain value, found {}", other.type_str()),
                    })
                }
            };
            values.insert(key, text);
        }
        Ok(Self { values, path: None })
    }

    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            path: None,
        }
    }

    /// File the store was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<Lookup> {
        if let Ok(value) = env::var(env_var_name(key)) {
            if !value.is_empty() {
                return Some(Lookup { value, source: ValueSource::Environment });
            }
        }

        #[cfg(feature = "keychain")]
        {
            if let Ok(entry) = keyring::Entry::new(KEYCHAIN_SERVICE, key) {
                if let Ok(value) = entry.get_password() {
                    return Some(Lookup { value, source: ValueSource::Keychain });
                }
            }
        }

        self.values
            .get(key)
            .filter(|v| !v.is_empty())
            .map(|v| Lookup { value: v.clone(), source: ValueSource::File })
    }

    /// Like [`get`](Self::get), but a missing or empty value is an error.
    pub fn require(&self, key: &str) -> Result<String, ConfigError> {
        match self.get(key) {
            Some(lookup) => {
                log::debug!("property '{key}' from {}", lookup.source.as_str());
                Ok(lookup.value)
            }
            None => Err(ConfigError::Missing { key: key.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_env_var_name() {
        assert_eq!(env_var_name("zoho_token"), "SHEETCLERK_ZOHO_TOKEN");
        assert_eq!(env_var_name("owner-login"), "SHEETCLERK_OWNER_LOGIN");
        assert_eq!(env_var_name("databaseId"), "SHEETCLERK_DATABASEID");
    }

    #[test]
    fn test_from_toml_stringifies_scalars() {
        let props = Properties::from_toml(
            "zoho_token = \"abc\"\ndatabase_id = 1234567\nflag = true\n",
        )
        .unwrap();
        assert_eq!(props.require("zoho_token").unwrap(), "abc");
        assert_eq!(props.require("database_id").unwrap(), "1234567");
        assert_eq!(props.require("flag").unwrap(), "true");
    }

    #[test]
    fn test_nested_table_rejected() {
        let err = Properties::from_toml("[zoho]\ntoken = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_and_empty_are_errors() {
        let props = Properties::from_pairs([("owner_name", "")]);
        let err = props.require("owner_name").unwrap_err();
        assert_eq!(err.to_string(), "missing property 'owner_name'");
        assert!(props.require("props_test_absent_key").is_err());
    }

    #[test]
    fn test_env_override_wins() {
        env::set_var("SHEETCLERK_PROPS_TEST_OVERRIDE", "from-env");
        let props = Properties::from_pairs([("props_test_override", "from-file")]);

        let lookup = props.get("props_test_override").unwrap();
        assert_eq!(lookup.value, "from-env");
        assert_eq!(lookup.source, ValueSource::Environment);

        env::remove_var("SHEETCLERK_PROPS_TEST_OVERRIDE");
        let lookup = props.get("props_test_override").unwrap();
        assert_eq!(lookup.value, "from-file");
        assert_eq!(lookup.source, ValueSource::File);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("properties.toml");
        fs::write(&path, "owner_login = \"dojo@example.com\"\n").unwrap();

        let props = Properties::load(Some(&path)).unwrap();
        assert_eq!(props.path(), Some(path.as_path()));
        assert_eq!(props.require("owner_login").unwrap(), "dojo@example.com");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempdir().unwrap();
        let err = Properties::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_parse_error_names_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "this is = = not toml").unwrap();
        let err = Properties::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
