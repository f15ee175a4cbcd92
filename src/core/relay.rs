use crate::core::normalizer::{build_data_payload, classify};
use crate::core::trigger::ObjectRef;
use crate::domain::model::{
    ClassifiedRecord, FieldAliases, RawRecord, RecordPatch, RelayResponse,
};
use crate::domain::ports::{ObjectStorage, RecordWriter};
use crate::utils::error::Result;
use serde_json::{Map, Value};

/// Read, transform, write. One object in, at most one remote update out.
pub struct RelayEngine<S: ObjectStorage, W: RecordWriter> {
    storage: S,
    writer: W,
    aliases: FieldAliases,
}

impl<S: ObjectStorage, W: RecordWriter> RelayEngine<S, W> {
    pub fn new(storage: S, writer: W, aliases: FieldAliases) -> Self {
        Self {
            storage,
            writer,
            aliases,
        }
    }

    /// Runs one relay and folds any failure into the 500 response.
    #[tracing::instrument(skip_all, fields(bucket = %object.bucket, key = %object.key))]
    pub async fn relay(&self, object: &ObjectRef) -> RelayResponse {
        match self.try_relay(object).await {
            Ok(_) => RelayResponse::success(),
            Err(e) => {
                tracing::error!(
                    "❌ Relay failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                RelayResponse::failure(e.is_remote_write_failure().then(|| e.to_string()))
            }
        }
    }

    pub async fn try_relay(&self, object: &ObjectRef) -> Result<Value> {
        // 讀取
        tracing::debug!("Fetching object from storage");
        let bytes = self.storage.get_object(&object.bucket, &object.key).await?;
        tracing::debug!("Fetched {} bytes", bytes.len());

        // 轉換
        let record = parse_record(bytes)?;
        let (row_id, patch) = self.prepare(classify(record))?;

        // 寫入
        tracing::info!("Updating record {}", row_id);
        let response = self.writer.patch_record(&row_id, &patch).await?;
        tracing::info!("Record updated: {}", response);

        Ok(response)
    }

    /// Builds the update for a classified record. Error reports touch only the
    /// error column and skip typecasting.
    pub fn prepare(&self, record: ClassifiedRecord) -> Result<(String, RecordPatch)> {
        match record {
            ClassifiedRecord::ErrorReport { row_id, message } => {
                tracing::warn!("Record {} is an error report: {}", row_id, message);
                let mut fields = Map::new();
                fields.insert(self.aliases.error.clone(), Value::String(message));
                Ok((
                    row_id,
                    RecordPatch {
                        fields,
                        typecast: false,
                    },
                ))
            }
            ClassifiedRecord::DataRecord(data) => {
                let payload = build_data_payload(&data)?;
                tracing::debug!("Normalized payload: {:?}", payload);
                Ok((
                    data.row_id,
                    RecordPatch {
                        fields: payload.to_fields(&self.aliases),
                        typecast: true,
                    },
                ))
            }
        }
    }
}

/// Decodes the stored object. Anything but UTF-8 JSON is malformed input.
pub fn parse_record(bytes: Vec<u8>) -> Result<RawRecord> {
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{ErrorCategory, RelayError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        objects: HashMap<(String, String), Vec<u8>>,
    }

    impl MockStorage {
        fn with_object(bucket: &str, key: &str, body: &str) -> Self {
            let mut objects = HashMap::new();
            objects.insert((bucket.to_string(), key.to_string()), body.as_bytes().to_vec());
            Self { objects }
        }
    }

    impl ObjectStorage for MockStorage {
        async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
            self.objects
                .get(&(bucket.to_string(), key.to_string()))
                .cloned()
                .ok_or_else(|| RelayError::StorageError {
                    message: format!("no such key: {}/{}", bucket, key),
                })
        }
    }

    #[derive(Clone, Default)]
    struct MockWriter {
        patches: Arc<Mutex<Vec<(String, RecordPatch)>>>,
        reject: bool,
    }

    #[async_trait]
    impl RecordWriter for MockWriter {
        async fn patch_record(&self, row_id: &str, patch: &RecordPatch) -> Result<Value> {
            self.patches
                .lock()
                .await
                .push((row_id.to_string(), patch.clone()));
            if self.reject {
                return Err(RelayError::RemoteRejected {
                    status: 404,
                    body: "{\"error\":\"NOT_FOUND\"}".to_string(),
                });
            }
            Ok(json!({"id": row_id}))
        }
    }

    fn object() -> ObjectRef {
        ObjectRef {
            bucket: "bucket".to_string(),
            key: "record.json".to_string(),
        }
    }

    #[tokio::test]
    async fn test_data_record_is_patched_with_typecast() {
        let storage = MockStorage::with_object(
            "bucket",
            "record.json",
            r#"{"rowId":"r1","data":{"Name":"Jo","Contact":"jo@x.com"}}"#,
        );
        let writer = MockWriter::default();
        let engine = RelayEngine::new(storage, writer.clone(), FieldAliases::default());

        let response = engine.relay(&object()).await;

        assert!(response.is_success());
        let patches = writer.patches.lock().await;
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].0, "r1");
        assert!(patches[0].1.typecast);
        assert_eq!(patches[0].1.fields["ArtistEmail"], json!("jo@x.com"));
    }

    #[tokio::test]
    async fn test_error_report_writes_only_error_field() {
        let storage = MockStorage::with_object(
            "bucket",
            "record.json",
            r#"{"rowId":"r3","errorData":"bad format","data":{"Name":"Jo"}}"#,
        );
        let writer = MockWriter::default();
        let engine = RelayEngine::new(storage, writer.clone(), FieldAliases::default());

        assert!(engine.relay(&object()).await.is_success());

        let patches = writer.patches.lock().await;
        assert_eq!(patches[0].0, "r3");
        assert!(!patches[0].1.typecast);
        assert_eq!(
            Value::Object(patches[0].1.fields.clone()),
            json!({"Error": "bad format"})
        );
    }

    #[tokio::test]
    async fn test_malformed_object_is_not_written() {
        let storage = MockStorage::with_object("bucket", "record.json", "{\"rowId\": ");
        let writer = MockWriter::default();
        let engine = RelayEngine::new(storage, writer.clone(), FieldAliases::default());

        let response = engine.relay(&object()).await;

        assert_eq!(response.status_code, 500);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body, json!({"message": "Error storing data in Airtable"}));
        assert!(writer.patches.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_remote_rejection_carries_details() {
        let storage = MockStorage::with_object(
            "bucket",
            "record.json",
            r#"{"rowId":"missing","data":{}}"#,
        );
        let writer = MockWriter {
            reject: true,
            ..MockWriter::default()
        };
        let engine = RelayEngine::new(storage, writer, FieldAliases::default());

        let response = engine.relay(&object()).await;

        assert_eq!(response.status_code, 500);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert!(body["details"].as_str().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_missing_object_is_storage_error() {
        let engine = RelayEngine::new(
            MockStorage::default(),
            MockWriter::default(),
            FieldAliases::default(),
        );
        let err = engine.try_relay(&object()).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Storage);
    }

    #[test]
    fn test_parse_record_rejects_invalid_utf8() {
        let err = parse_record(vec![0xff, 0xfe]).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MalformedInput);
    }
}
