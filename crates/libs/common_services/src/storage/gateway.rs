use crate::storage::StorageError;
use app_state::{SecretSettings, StorageSettings};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use std::time::Duration;

/// All object storage access goes through this gateway; nothing else in the
/// repository touches the SDK. Works against any S3-compatible store via the
/// configured endpoint.
#[derive(Clone)]
pub struct StorageGateway {
    client: Client,
    bucket: String,
    download_url_ttl: Duration,
}

impl StorageGateway {
    #[must_use]
    pub fn from_settings(storage: &StorageSettings, secrets: &SecretSettings) -> Self {
        let credentials = Credentials::new(
            secrets.storage_access_key_id.clone(),
            secrets.storage_secret_access_key.clone(),
            None,
            None,
            "settings",
        );
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(storage.region.clone()))
            .endpoint_url(&storage.endpoint_url)
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(config),
            bucket: storage.bucket.clone(),
            download_url_ttl: Duration::from_secs(storage.download_url_ttl_seconds),
        }
    }

    pub async fn put_object(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Put {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(())
    }

    /// Streams one object's body; the caller drains the stream.
    pub async fn get_object(&self, key: &str) -> Result<ByteStream, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Get {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(output.body)
    }

    /// Existence check; a missing key is `Ok(false)`, not an error.
    pub async fn head_object(&self, key: &str) -> Result<bool, StorageError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(sdk_err) => {
                let service_err = sdk_err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(StorageError::Head {
                        key: key.to_string(),
                        message: DisplayErrorContext(&service_err).to_string(),
                    })
                }
            }
        }
    }

    pub async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(())
    }

    /// Generates a time-limited, credential-less download URL for one object.
    /// The TTL defaults to the configured value (60 seconds unless overridden).
    pub async fn generate_download_url(
        &self,
        key: &str,
        ttl: Option<Duration>,
    ) -> Result<String, StorageError> {
        let expires_in = ttl.unwrap_or(self.download_url_ttl);
        let presigning = PresigningConfig::expires_in(expires_in).map_err(|e| {
            StorageError::Presign {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Presign {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(presigned.uri().to_string())
    }
}
