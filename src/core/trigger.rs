//! Turns the object-created notification into the bucket/key pair to read.

use crate::utils::error::{RelayError, Result};
#[cfg(feature = "lambda")]
use aws_lambda_events::event::s3::S3Event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

/// S3 notification keys are form-encoded: `+` is a space, the rest is
/// percent-encoded UTF-8.
pub fn decode_object_key(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|key| key.into_owned())
        .map_err(|e| RelayError::TriggerError {
            message: format!("object key {} does not decode to UTF-8: {}", raw, e),
        })
}

#[cfg(feature = "lambda")]
impl ObjectRef {
    /// Only the first record is relayed; one invocation reads one object.
    #[tracing::instrument(skip(event), fields(record_count = event.records.len()))]
    pub fn from_s3_event(event: &S3Event) -> Result<Self> {
        let record = event.records.first().ok_or_else(|| RelayError::TriggerError {
            message: "event carries no records".to_string(),
        })?;

        if event.records.len() > 1 {
            tracing::warn!(
                "Event carries {} records, only the first is relayed",
                event.records.len()
            );
        }

        let bucket = record
            .s3
            .bucket
            .name
            .clone()
            .ok_or_else(|| RelayError::TriggerError {
                message: "record has no bucket name".to_string(),
            })?;
        let raw_key = record
            .s3
            .object
            .key
            .as_deref()
            .ok_or_else(|| RelayError::TriggerError {
                message: "record has no object key".to_string(),
            })?;

        Ok(Self {
            bucket,
            key: decode_object_key(raw_key)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plus_as_space() {
        assert_eq!(
            decode_object_key("submissions/Jo+Smith.json").unwrap(),
            "submissions/Jo Smith.json"
        );
    }

    #[test]
    fn test_decode_percent_sequences() {
        assert_eq!(
            decode_object_key("submissions/Jos%C3%A9%2B1.json").unwrap(),
            "submissions/José+1.json"
        );
    }

    #[test]
    fn test_decode_invalid_utf8() {
        assert!(decode_object_key("bad%FF.json").is_err());
    }

    #[cfg(feature = "lambda")]
    #[test]
    fn test_from_s3_event() {
        let event: S3Event = serde_json::from_value(serde_json::json!({
            "Records": [{
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-west-2",
                "eventTime": "2024-05-01T12:00:00.000Z",
                "eventName": "ObjectCreated:Put",
                "userIdentity": {"principalId": "EXAMPLE"},
                "requestParameters": {"sourceIPAddress": "127.0.0.1"},
                "responseElements": {
                    "x-amz-request-id": "EXAMPLE123456789",
                    "x-amz-id-2": "EXAMPLE123/abcdefghijklmno"
                },
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "configurationId": "testConfigRule",
                    "bucket": {
                        "name": "artist-submissions",
                        "ownerIdentity": {"principalId": "EXAMPLE"},
                        "arn": "arn:aws:s3:::artist-submissions"
                    },
                    "object": {
                        "key": "scraped/Jo+Smith%281%29.json",
                        "size": 1024,
                        "eTag": "0123456789abcdef0123456789abcdef",
                        "sequencer": "0A1B2C3D4E5F678901"
                    }
                }
            }]
        }))
        .unwrap();

        let object = ObjectRef::from_s3_event(&event).unwrap();
        assert_eq!(object.bucket, "artist-submissions");
        assert_eq!(object.key, "scraped/Jo Smith(1).json");
    }

    #[cfg(feature = "lambda")]
    #[test]
    fn test_from_empty_s3_event() {
        let event: S3Event = serde_json::from_value(serde_json::json!({"Records": []})).unwrap();
        assert!(ObjectRef::from_s3_event(&event).is_err());
    }
}
