use crate::config::RelayConfig;
use crate::core::ObjectStorage;
use crate::utils::error::{RelayError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use aws_sdk_s3::Client as S3Client;

pub const DEFAULT_S3_REGION: &str = "us-west-2";

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub relay: RelayConfig,
    pub s3_region: String,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            relay: RelayConfig::from_env()?,
            s3_region: std::env::var("S3_REGION").unwrap_or_else(|_| DEFAULT_S3_REGION.to_string()),
        })
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        self.relay.validate()?;
        validate_aws_region("s3_region", &self.s3_region)
    }
}

fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(RelayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
}

impl S3Storage {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

impl ObjectStorage for S3Storage {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| RelayError::StorageError {
                message: format!("Failed to read s3://{}/{}: {}", bucket, key, e.into_service_error()),
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| RelayError::StorageError {
                message: format!("Failed to collect S3 data: {}", e),
            })?;

        Ok(data.into_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_aws_region() {
        assert!(validate_aws_region("s3_region", "us-west-2").is_ok());
        assert!(validate_aws_region("s3_region", "US_WEST").is_err());
        assert!(validate_aws_region("s3_region", "").is_err());
    }
}
