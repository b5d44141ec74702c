use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::{
    adapters::dto::file_dto::{DownloadUrlQuery, ExistsResponse},
    application::{error::ApplicationError, services::StorageService},
    domain::models::file::{
        DeleteConfirmation, DownloadGrant, FileListItem, FileMetadata, StoredFile, UploadPayload,
        Visibility,
    },
};

const FALLBACK_FILENAME: &str = "upload";
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

pub struct FileController;

impl FileController {
    /// POST /api/v1/files
    /// Multipart: `file` (required), `type` = public | private (default private)
    pub async fn upload_file(
        State(storage): State<Arc<dyn StorageService>>,
        mut multipart: Multipart,
    ) -> Result<(StatusCode, Json<StoredFile>), ApplicationError> {
        let mut payload: Option<UploadPayload> = None;
        let mut visibility = Visibility::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            warn!("Invalid multipart data: {}", e);
            ApplicationError::BadRequest("Invalid request format".to_string())
        })? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "file" => {
                    let filename = field
                        .file_name()
                        .filter(|n| !n.is_empty())
                        .unwrap_or(FALLBACK_FILENAME)
                        .to_string();
                    let mimetype = field
                        .content_type()
                        .unwrap_or(FALLBACK_MIME_TYPE)
                        .to_string();
                    let data = field.bytes().await.map_err(|e| {
                        warn!("Cannot read file bytes: {}", e);
                        ApplicationError::BadRequest("Invalid file data".to_string())
                    })?;

                    payload = Some(UploadPayload::bytes(data.to_vec(), filename, mimetype));
                }
                "type" => {
                    let raw = field.text().await.map_err(|e| {
                        warn!("Invalid type field: {}", e);
                        ApplicationError::BadRequest("Invalid request data".to_string())
                    })?;
                    visibility = raw
                        .trim()
                        .parse::<Visibility>()
                        .map_err(ApplicationError::BadRequest)?;
                }
                _ => {}
            }
        }

        let payload = payload.ok_or_else(|| {
            warn!("Missing required 'file' field in upload");
            ApplicationError::BadRequest("Missing required field 'file'".to_string())
        })?;

        let stored = storage.upload(payload, visibility).await?;
        info!(file_id = %stored.id, %visibility, "File uploaded through gateway");

        Ok((StatusCode::CREATED, Json(stored)))
    }

    /// GET /api/v1/files
    pub async fn list_files(
        State(storage): State<Arc<dyn StorageService>>,
    ) -> Result<Json<Vec<FileListItem>>, ApplicationError> {
        Ok(Json(storage.list().await?))
    }

    /// GET /api/v1/files/{file_id}/url?expires=seconds
    pub async fn get_download_url(
        State(storage): State<Arc<dyn StorageService>>,
        Path(file_id): Path<String>,
        Query(query): Query<DownloadUrlQuery>,
    ) -> Result<Json<DownloadGrant>, ApplicationError> {
        Ok(Json(storage.get_download_url(&file_id, query.expires).await?))
    }

    /// GET /api/v1/files/{file_id}/metadata
    pub async fn get_file_metadata(
        State(storage): State<Arc<dyn StorageService>>,
        Path(file_id): Path<String>,
    ) -> Result<Json<FileMetadata>, ApplicationError> {
        Ok(Json(storage.get_metadata(&file_id).await?))
    }

    /// GET /api/v1/files/{file_id}/exists
    pub async fn file_exists(
        State(storage): State<Arc<dyn StorageService>>,
        Path(file_id): Path<String>,
    ) -> Result<Json<ExistsResponse>, ApplicationError> {
        let exists = storage.exists(&file_id).await?;
        Ok(Json(ExistsResponse { file_id, exists }))
    }

    /// DELETE /api/v1/files/{file_id}
    pub async fn delete_file(
        State(storage): State<Arc<dyn StorageService>>,
        Path(file_id): Path<String>,
    ) -> Result<Json<DeleteConfirmation>, ApplicationError> {
        let confirmation = storage.delete(&file_id).await?;
        info!(%file_id, success = confirmation.success, "File delete requested");
        Ok(Json(confirmation))
    }
}
