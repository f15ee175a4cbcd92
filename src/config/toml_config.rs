use crate::config::{AirtableConfig, RelayConfig, DEFAULT_API_URL, ENV_ACCESS_TOKEN};
use crate::domain::model::FieldAliases;
use crate::utils::error::{RelayError, Result};
use serde::Deserialize;
use std::path::Path;

/// File form of [`RelayConfig`], used for replaying records by hand.
///
/// ```toml
/// [airtable]
/// base_id = "appXXXXXXXXXXXXXX"
/// table_id = "tblXXXXXXXXXXXXXX"
/// # access_token falls back to $PERSONAL_ACCESS_TOKEN
///
/// [fields]
/// artist_name = "fldXXXXXXXXXXXXXX"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    pub airtable: AirtableSection,
    #[serde(default)]
    pub fields: FieldAliases,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirtableSection {
    pub api_url: Option<String>,
    pub base_id: String,
    pub table_id: String,
    pub access_token: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RelayError::ConfigError {
                message: format!(
                    "Failed to read config file {}: {}",
                    path.as_ref().display(),
                    e
                ),
            }
        })?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RelayError::ConfigError {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }

    /// Resolves the access token from the file or, failing that, from `lookup`.
    pub fn into_relay_config<F>(self, lookup: F) -> Result<RelayConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = self
            .airtable
            .access_token
            .filter(|token| !token.is_empty())
            .or_else(|| lookup(ENV_ACCESS_TOKEN).filter(|token| !token.is_empty()))
            .ok_or_else(|| RelayError::MissingConfigError {
                field: "airtable.access_token".to_string(),
            })?;

        Ok(RelayConfig {
            airtable: AirtableConfig {
                api_url: self
                    .airtable
                    .api_url
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                base_id: self.airtable.base_id,
                table_id: self.airtable.table_id,
                access_token,
            },
            fields: self.fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_field_aliases_keep_defaults() {
        let config = TomlConfig::from_str(
            r#"
[airtable]
base_id = "appBase"
table_id = "tblTable"
access_token = "pat123"

[fields]
contact = "fldContact"
"#,
        )
        .unwrap()
        .into_relay_config(|_| None)
        .unwrap();

        assert_eq!(config.fields.contact, "fldContact");
        assert_eq!(config.fields.artist_name, "ArtistName");
        assert_eq!(config.airtable.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_token_falls_back_to_env() {
        let config = TomlConfig::from_str(
            r#"
[airtable]
base_id = "appBase"
table_id = "tblTable"
"#,
        )
        .unwrap()
        .into_relay_config(|name| (name == ENV_ACCESS_TOKEN).then(|| "pat-env".to_string()))
        .unwrap();

        assert_eq!(config.airtable.access_token, "pat-env");
    }

    #[test]
    fn test_missing_token() {
        let result = TomlConfig::from_str(
            r#"
[airtable]
base_id = "appBase"
table_id = "tblTable"
"#,
        )
        .unwrap()
        .into_relay_config(|_| None);

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(TomlConfig::from_str("[airtable\nbase_id = 1").is_err());
    }
}
