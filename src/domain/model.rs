use crate::domain::sentinel;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A record as uploaded to the bucket by the scraper.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub row_id: String,
    #[serde(default)]
    pub error_data: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_artist_email")]
    pub artist_email: Option<String>,
    #[serde(default)]
    pub data: Option<RawData>,
}

impl RawRecord {
    /// The error text when this record is an error report.
    pub fn error_message(&self) -> Option<String> {
        match self.error_data.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            other if is_truthy(other) => Some(other.to_string()),
            _ => None,
        }
    }
}

fn deserialize_artist_email<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let email = Option::<String>::deserialize(deserializer)?;
    Ok(email.filter(|e| !e.is_empty() && e != sentinel::NO_ARTIST_EMAIL))
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawData {
    #[serde(rename = "Name", default)]
    pub name: Option<FieldValue>,
    #[serde(rename = "Location", default)]
    pub location: Option<FieldValue>,
    #[serde(rename = "Theme", default)]
    pub theme: Option<FieldValue>,
    #[serde(rename = "Medium", default)]
    pub medium: Option<FieldValue>,
    #[serde(rename = "Contact", default)]
    pub contact: Option<Contact>,
}

/// Cell value for the free-form attributes. Anything that is neither a string
/// nor a list of strings is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Other(Value),
}

impl FieldValue {
    pub fn empty_text() -> Self {
        FieldValue::Text(String::new())
    }

    pub fn empty_list() -> Self {
        FieldValue::List(Vec::new())
    }

    /// Blank values fall back to the attribute default. An empty list is not
    /// blank.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(_) => false,
            FieldValue::Other(v) => !is_truthy(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Contact {
    Text(String),
    Channels(Map<String, Value>),
    Unrecognized(Value),
}

impl Contact {
    /// The `Email` entry of a structured contact.
    pub fn email_field(&self) -> Option<&str> {
        match self {
            Contact::Channels(channels) => channels
                .get(sentinel::CONTACT_EMAIL_KEY)
                .and_then(Value::as_str)
                .filter(|email| !email.is_empty()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataRecord {
    pub row_id: String,
    pub artist_email: Option<String>,
    pub data: Option<RawData>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedRecord {
    ErrorReport { row_id: String, message: String },
    DataRecord(DataRecord),
}

impl ClassifiedRecord {
    pub fn row_id(&self) -> &str {
        match self {
            ClassifiedRecord::ErrorReport { row_id, .. } => row_id,
            ClassifiedRecord::DataRecord(record) => &record.row_id,
        }
    }
}

/// Result of flattening a contact. An empty `lines` means no usable channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedContact {
    pub lines: Vec<String>,
    pub derived_email: Option<String>,
}

impl NormalizedContact {
    pub fn contact_lines(&self) -> Vec<String> {
        if self.lines.is_empty() {
            vec![sentinel::CONTACT_NOT_PROVIDED.to_string()]
        } else {
            self.lines.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPayload {
    pub artist_name: FieldValue,
    pub location: FieldValue,
    pub artist_email: Option<String>,
    pub contact: NormalizedContact,
    pub theme: FieldValue,
    pub medium: FieldValue,
}

impl NormalizedPayload {
    /// Airtable `fields` object, keyed by the configured field names.
    pub fn to_fields(&self, aliases: &FieldAliases) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert(aliases.artist_name.clone(), to_value(&self.artist_name));
        fields.insert(aliases.location.clone(), to_value(&self.location));
        fields.insert(
            aliases.artist_email.clone(),
            Value::String(
                self.artist_email
                    .clone()
                    .unwrap_or_else(|| sentinel::EMAIL_NOT_PROVIDED.to_string()),
            ),
        );
        fields.insert(
            aliases.contact.clone(),
            Value::Array(
                self.contact
                    .contact_lines()
                    .into_iter()
                    .map(Value::String)
                    .collect(),
            ),
        );
        fields.insert(aliases.theme.clone(), to_value(&self.theme));
        fields.insert(aliases.medium.clone(), to_value(&self.medium));
        fields
    }
}

fn to_value(field: &FieldValue) -> Value {
    match field {
        FieldValue::Text(s) => Value::String(s.clone()),
        FieldValue::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        FieldValue::Other(v) => v.clone(),
    }
}

/// Remote column names for each output attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldAliases {
    pub artist_name: String,
    pub location: String,
    pub artist_email: String,
    pub contact: String,
    pub theme: String,
    pub medium: String,
    pub error: String,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            artist_name: "ArtistName".to_string(),
            location: "Location".to_string(),
            artist_email: "ArtistEmail".to_string(),
            contact: "Contact".to_string(),
            theme: "Theme".to_string(),
            medium: "Medium".to_string(),
            error: "Error".to_string(),
        }
    }
}

/// Body of an Airtable update-record call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordPatch {
    pub fields: Map<String, Value>,
    #[serde(skip_serializing_if = "is_false")]
    pub typecast: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

pub const SUCCESS_MESSAGE: &str = "Success";
pub const FAILURE_MESSAGE: &str = "Error storing data in Airtable";

/// Invocation result in the shape the function URL / caller expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub status_code: u16,
    pub body: String,
}

impl RelayResponse {
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: serde_json::json!({ "message": SUCCESS_MESSAGE }).to_string(),
        }
    }

    pub fn failure(details: Option<String>) -> Self {
        let body = match details {
            Some(details) => serde_json::json!({
                "message": FAILURE_MESSAGE,
                "details": details,
            }),
            None => serde_json::json!({ "message": FAILURE_MESSAGE }),
        };
        Self {
            status_code: 500,
            body: body.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// JavaScript-style truthiness, which the scraper's output was written against.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
