//! Storage service implementation using Apache OpenDAL.

use opendal::{Operator, services};
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;
use crate::payslip::Month;

/// Storage service for payslip documents.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Validate an upload against config constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the document size or MIME type is invalid.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }

        if !self.config.is_mime_type_allowed(content_type) {
            return Err(StorageError::invalid_mime_type(content_type));
        }

        Ok(())
    }

    /// Generate the storage key for a payslip document.
    ///
    /// Format: `{employee_id}/{year}/{month}/{payslip_id}.pdf`
    #[must_use]
    pub fn payslip_key(employee_id: Uuid, month: Month, year: i32, payslip_id: Uuid) -> String {
        format!("{employee_id}/{year}/{}/{payslip_id}.pdf", month.as_str())
    }

    /// Store a document under a key.
    ///
    /// Validation (size, MIME type) must have happened before this call;
    /// the write itself is content-agnostic.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn store(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        self.operator
            .write(key, bytes)
            .await
            .map(|_| ())
            .map_err(StorageError::from)
    }

    /// Fetch a stored document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the key does not exist.
    pub async fn fetch(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let buffer = self.operator.read(key).await.map_err(StorageError::from)?;
        Ok(buffer.to_vec())
    }

    /// Delete a stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator.delete(key).await.map_err(StorageError::from)
    }

    /// Check whether a key exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        self.operator.stat(key).await.is_ok()
    }

    /// Get the storage provider name.
    #[must_use]
    pub const fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &StorageConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payslip_key_format() {
        let employee_id =
            Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").expect("valid uuid");
        let payslip_id =
            Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").expect("valid uuid");

        let key = StorageService::payslip_key(employee_id, Month::March, 2024, payslip_id);

        let parts: Vec<&str> = key.split('/').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], employee_id.to_string());
        assert_eq!(parts[1], "2024");
        assert_eq!(parts[2], "March");
        assert_eq!(parts[3], format!("{payslip_id}.pdf"));
    }

    #[test]
    fn test_validate_upload_size() {
        let config =
            StorageConfig::new(StorageProvider::local_fs("./test")).with_max_file_size(1024);
        let service = StorageService::from_config(config).expect("should create service");

        assert!(service.validate_upload("application/pdf", 512).is_ok());

        let err = service
            .validate_upload("application/pdf", 2048)
            .unwrap_err();
        assert!(matches!(err, StorageError::FileTooLarge { .. }));
    }

    #[test]
    fn test_validate_upload_exactly_at_limit() {
        let config = StorageConfig::new(StorageProvider::local_fs("./test"));
        let service = StorageService::from_config(config).expect("should create service");

        assert!(
            service
                .validate_upload("application/pdf", StorageConfig::DEFAULT_MAX_FILE_SIZE)
                .is_ok()
        );
        assert!(
            service
                .validate_upload("application/pdf", StorageConfig::DEFAULT_MAX_FILE_SIZE + 1)
                .is_err()
        );
    }

    #[test]
    fn test_validate_upload_pdf_only() {
        let config = StorageConfig::new(StorageProvider::local_fs("./test"));
        let service = StorageService::from_config(config).expect("should create service");

        assert!(service.validate_upload("application/pdf", 1024).is_ok());

        let err = service.validate_upload("image/png", 1024).unwrap_err();
        assert!(matches!(err, StorageError::InvalidMimeType { .. }));
    }
}
