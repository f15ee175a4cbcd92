use crate::domain::model::RecordPatch;
use crate::domain::ports::RecordWriter;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Prints the update that would be sent instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct DryRunWriter;

#[async_trait]
impl RecordWriter for DryRunWriter {
    async fn patch_record(&self, row_id: &str, patch: &RecordPatch) -> Result<Value> {
        let body = serde_json::to_string_pretty(patch)?;
        tracing::info!("🧪 Dry run, not sending update for record {}", row_id);
        println!("PATCH {}\n{}", row_id, body);
        Ok(json!({ "id": row_id, "dryRun": true }))
    }
}
