use crate::domain::model::RecordPatch;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ObjectStorage: Send + Sync {
    fn get_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

#[async_trait]
pub trait RecordWriter: Send + Sync {
    /// Updates the remote record `row_id` and returns the service's response body.
    async fn patch_record(&self, row_id: &str, patch: &RecordPatch) -> Result<serde_json::Value>;
}
