use crate::domain::model::{
    ClassifiedRecord, Contact, DataRecord, FieldValue, NormalizedContact, NormalizedPayload,
    RawRecord,
};
use crate::domain::sentinel;
use crate::utils::error::{RelayError, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub fn looks_like_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Splits records into error reports and data records. Only `errorData` decides.
pub fn classify(record: RawRecord) -> ClassifiedRecord {
    match record.error_message() {
        Some(message) => ClassifiedRecord::ErrorReport {
            row_id: record.row_id,
            message,
        },
        None => ClassifiedRecord::DataRecord(DataRecord {
            row_id: record.row_id,
            artist_email: record.artist_email,
            data: record.data,
        }),
    }
}

pub fn normalize_contact(contact: Option<&Contact>) -> NormalizedContact {
    match contact {
        Some(Contact::Text(text)) if looks_like_email(text) => NormalizedContact {
            lines: Vec::new(),
            derived_email: Some(text.clone()),
        },
        Some(Contact::Text(text)) => NormalizedContact {
            lines: vec![text.clone()],
            derived_email: None,
        },
        Some(Contact::Channels(channels)) => {
            let lines = channels
                .iter()
                .filter(|(key, value)| {
                    key.as_str() != sentinel::CONTACT_EMAIL_KEY && !value.is_null()
                })
                .map(|(key, value)| (key, channel_text(value)))
                .filter(|(_, value)| !value.contains(sentinel::CONTACT_NOT_PROVIDED))
                .map(|(key, value)| format!("{}: {}", key, value))
                .collect();
            NormalizedContact {
                lines,
                derived_email: None,
            }
        }
        Some(Contact::Unrecognized(value)) => {
            tracing::warn!("Ignoring contact of unexpected shape: {}", value);
            NormalizedContact::default()
        }
        None => NormalizedContact::default(),
    }
}

fn channel_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `artist_email` wins over anything found in the contact. `None` means no
/// email could be resolved.
pub fn resolve_email(
    derived_email: Option<&str>,
    contact_email_field: Option<&str>,
    artist_email: Option<&str>,
) -> Option<String> {
    artist_email
        .or(derived_email)
        .or(contact_email_field)
        .map(str::to_string)
}

pub fn build_data_payload(record: &DataRecord) -> Result<NormalizedPayload> {
    let data = record
        .data
        .as_ref()
        .ok_or_else(|| RelayError::ProcessingError {
            message: format!("record {} has neither errorData nor data", record.row_id),
        })?;

    let contact = normalize_contact(data.contact.as_ref());
    let artist_email = resolve_email(
        contact.derived_email.as_deref(),
        data.contact.as_ref().and_then(Contact::email_field),
        record.artist_email.as_deref(),
    );

    Ok(NormalizedPayload {
        artist_name: or_default(data.name.as_ref(), FieldValue::empty_text),
        location: or_default(data.location.as_ref(), FieldValue::empty_text),
        artist_email,
        contact,
        theme: or_default(data.theme.as_ref(), FieldValue::empty_list),
        medium: or_default(data.medium.as_ref(), FieldValue::empty_list),
    })
}

fn or_default(field: Option<&FieldValue>, default: fn() -> FieldValue) -> FieldValue {
    match field {
        Some(value) if !value.is_blank() => value.clone(),
        _ => default(),
    }
}
