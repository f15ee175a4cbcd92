#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

use crate::domain::model::FieldAliases;
use crate::utils::error::{RelayError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path_segment, validate_url, Validate,
};
use std::fmt;

pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

pub const ENV_API_URL: &str = "AIRTABLE_API_URL";
pub const ENV_BASE_ID: &str = "FAN_TEST_DATABASE";
pub const ENV_TABLE_ID: &str = "TEST_DATA_TABLE";
pub const ENV_ACCESS_TOKEN: &str = "PERSONAL_ACCESS_TOKEN";

#[derive(Clone, PartialEq)]
pub struct AirtableConfig {
    pub api_url: String,
    pub base_id: String,
    pub table_id: String,
    pub access_token: String,
}

impl AirtableConfig {
    pub fn table_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.api_url.trim_end_matches('/'),
            self.base_id,
            self.table_id
        )
    }
}

impl fmt::Debug for AirtableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AirtableConfig")
            .field("api_url", &self.api_url)
            .field("base_id", &self.base_id)
            .field("table_id", &self.table_id)
            .field("access_token", &"***")
            .finish()
    }
}

/// Everything an invocation needs, built once at process start.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub airtable: AirtableConfig,
    pub fields: FieldAliases,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| RelayError::MissingConfigError {
                    field: name.to_string(),
                })
        };

        let airtable = AirtableConfig {
            api_url: lookup(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            base_id: required(ENV_BASE_ID)?,
            table_id: required(ENV_TABLE_ID)?,
            access_token: required(ENV_ACCESS_TOKEN)?,
        };

        Ok(Self {
            airtable,
            fields: aliases_from_lookup(&lookup),
        })
    }
}

fn aliases_from_lookup<F>(lookup: &F) -> FieldAliases
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = FieldAliases::default();
    let alias = |name: &str, default: String| {
        lookup(name).filter(|v| !v.is_empty()).unwrap_or(default)
    };

    FieldAliases {
        artist_name: alias("NAME_FIELD", defaults.artist_name),
        location: alias("LOCATION_FIELD", defaults.location),
        artist_email: alias("ARTIST_EMAIL_FIELD", defaults.artist_email),
        contact: alias("CONTACT_FIELD", defaults.contact),
        theme: alias("THEME_FIELD", defaults.theme),
        medium: alias("MEDIUM_FIELD", defaults.medium),
        error: alias("ERROR_FIELD", defaults.error),
    }
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.airtable.api_url)?;
        validate_path_segment("base_id", &self.airtable.base_id)?;
        validate_path_segment("table_id", &self.airtable.table_id)?;
        validate_non_empty_string("access_token", &self.airtable.access_token)?;

        let aliases = [
            ("fields.artist_name", &self.fields.artist_name),
            ("fields.location", &self.fields.location),
            ("fields.artist_email", &self.fields.artist_email),
            ("fields.contact", &self.fields.contact),
            ("fields.theme", &self.fields.theme),
            ("fields.medium", &self.fields.medium),
            ("fields.error", &self.fields.error),
        ];
        for (field, alias) in aliases {
            validate_non_empty_string(field, alias)?;
        }

        tracing::info!("✅ Relay configuration validation passed");
        Ok(())
    }
}
