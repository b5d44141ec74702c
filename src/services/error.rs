use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Failed to get download URL: {0}")]
    DownloadUrlFailed(String),

    #[error("Failed to list files: {0}")]
    ListFailed(String),

    #[error("Failed to delete file: {0}")]
    DeleteFailed(String),

    #[error("Failed to get file metadata: {0}")]
    MetadataFailed(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response from storage service: {0}")]
    InvalidResponse(String),

    #[error("Invalid upload payload: {0}")]
    InvalidPayload(String),
}

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response from email service: {0}")]
    InvalidResponse(String),
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::FileNotFound(_) => ApplicationError::NotFound,
            StorageError::InvalidPayload(msg) => ApplicationError::BadRequest(msg),
            StorageError::UploadFailed(msg)
            | StorageError::DownloadUrlFailed(msg)
            | StorageError::ListFailed(msg)
            | StorageError::DeleteFailed(msg)
            | StorageError::MetadataFailed(msg) => ApplicationError::Upstream(msg),
            StorageError::NetworkError(_) | StorageError::InvalidResponse(_) => {
                ApplicationError::InternalError(format!("Storage error: {}", error))
            }
        }
    }
}

impl From<EmailError> for ApplicationError {
    fn from(error: EmailError) -> Self {
        match error {
            EmailError::SendFailed(msg) => ApplicationError::Upstream(msg),
            EmailError::NetworkError(_) | EmailError::InvalidResponse(_) => {
                ApplicationError::InternalError(format!("Email error: {}", error))
            }
        }
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            StorageError::NetworkError("Request timeout".to_string())
        } else if error.is_connect() {
            StorageError::NetworkError(format!("Connection failed: {}", error))
        } else if error.is_decode() {
            StorageError::InvalidResponse(error.to_string())
        } else {
            StorageError::NetworkError(error.to_string())
        }
    }
}

impl From<reqwest::Error> for EmailError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            EmailError::NetworkError("Request timeout".to_string())
        } else if error.is_connect() {
            EmailError::NetworkError(format!("Connection failed: {}", error))
        } else if error.is_decode() {
            EmailError::InvalidResponse(error.to_string())
        } else {
            EmailError::NetworkError(error.to_string())
        }
    }
}
