use async_trait::async_trait;

use crate::{
    domain::models::file::{
        DeleteConfirmation, DownloadGrant, FileListItem, FileMetadata, StoredFile, UploadPayload,
        Visibility,
    },
    services::StorageError,
};

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn upload(
        &self,
        payload: UploadPayload,
        visibility: Visibility,
    ) -> Result<StoredFile, StorageError>;

    /// `expires_in` is forwarded verbatim; `None` lets the service apply its
    /// own default (900 seconds).
    async fn get_download_url(
        &self,
        file_id: &str,
        expires_in: Option<u64>,
    ) -> Result<DownloadGrant, StorageError>;

    async fn list(&self) -> Result<Vec<FileListItem>, StorageError>;

    async fn delete(&self, file_id: &str) -> Result<DeleteConfirmation, StorageError>;

    async fn get_metadata(&self, file_id: &str) -> Result<FileMetadata, StorageError>;

    /// Only `FileNotFound` maps to `false`; every other failure propagates.
    async fn exists(&self, file_id: &str) -> Result<bool, StorageError> {
        match self.get_metadata(file_id).await {
            Ok(_) => Ok(true),
            Err(StorageError::FileNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
