use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, multipart, Client, Method, RequestBuilder, StatusCode};
use tracing::{debug, info, warn};

use crate::{
    application::services::StorageService,
    domain::{
        config::terminal::TerminalConfig,
        models::file::{
            DeleteConfirmation, DownloadGrant, FileData, FileListItem, FileMetadata, StoredFile,
            UploadPayload, Visibility,
        },
    },
    services::{
        error::StorageError,
        http::{error_message, API_KEY_HEADER, APP_ID_HEADER},
    },
};

/// Storage client for the Terminal file service. Stateless apart from the
/// pooled HTTP client; every call is one round trip.
pub struct TerminalStorageService {
    client: Client,
    endpoint: String,
    api_key: String,
    app_id: String,
}

impl TerminalStorageService {
    pub fn new(client: Client, config: &TerminalConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            app_id: config.app_id.clone(),
        }
    }

    fn files_url(&self) -> String {
        format!("{}/files", self.endpoint)
    }

    fn file_url(&self, file_id: &str) -> String {
        format!("{}/files/{}", self.endpoint, urlencoding::encode(file_id))
    }

    fn authorized(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(APP_ID_HEADER, &self.app_id)
    }

    fn json_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.authorized(method, url)
            .header(CONTENT_TYPE, "application/json")
    }
}

async fn resolve_payload(payload: UploadPayload) -> Result<FileData, StorageError> {
    match payload {
        UploadPayload::Bytes {
            data,
            filename,
            mimetype,
        } => Ok(FileData::new(data, filename, mimetype)),
        UploadPayload::NativeHandle { path } => {
            let content = tokio::fs::read(&path).await.map_err(|e| {
                StorageError::InvalidPayload(format!("cannot read {}: {}", path.display(), e))
            })?;

            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    StorageError::InvalidPayload(format!(
                        "{} has no usable file name",
                        path.display()
                    ))
                })?;

            let mime_type = mime_guess::from_path(&path)
                .first_or_octet_stream()
                .to_string();

            Ok(FileData::new(content, filename, mime_type))
        }
    }
}

#[async_trait]
impl StorageService for TerminalStorageService {
    async fn upload(
        &self,
        payload: UploadPayload,
        visibility: Visibility,
    ) -> Result<StoredFile, StorageError> {
        let file_data = resolve_payload(payload).await?;

        info!(
            filename = %file_data.filename,
            size = file_data.size(),
            visibility = %visibility,
            "Uploading file"
        );

        let file_part = multipart::Part::bytes(file_data.content)
            .file_name(file_data.filename)
            .mime_str(&file_data.mime_type)
            .map_err(|e| StorageError::InvalidPayload(e.to_string()))?;

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("type", visibility.as_str());

        let response = self
            .authorized(Method::POST, &self.files_url())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = error_message(response).await;
            warn!(%status, "Upload rejected: {}", message);
            return Err(StorageError::UploadFailed(message));
        }

        let stored: StoredFile = response.json().await?;
        if stored.id.is_empty() {
            return Err(StorageError::InvalidResponse(
                "upload response carried an empty id".to_string(),
            ));
        }

        info!(file_id = %stored.id, "Upload complete");
        Ok(stored)
    }

    async fn get_download_url(
        &self,
        file_id: &str,
        expires_in: Option<u64>,
    ) -> Result<DownloadGrant, StorageError> {
        let mut request = self.json_request(Method::GET, &self.file_url(file_id));
        if let Some(expires) = expires_in {
            request = request.query(&[("expires", expires)]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let message = error_message(response).await;
            warn!(file_id, "Download URL request failed: {}", message);
            return Err(StorageError::DownloadUrlFailed(message));
        }

        debug!(file_id, ?expires_in, "Issued download URL");
        Ok(response.json().await?)
    }

    async fn list(&self) -> Result<Vec<FileListItem>, StorageError> {
        let response = self
            .json_request(Method::GET, &self.files_url())
            .send()
            .await?;

        if !response.status().is_success() {
            let message = error_message(response).await;
            warn!("Listing files failed: {}", message);
            return Err(StorageError::ListFailed(message));
        }

        let files: Vec<FileListItem> = response.json().await?;
        debug!(count = files.len(), "Listed files");
        Ok(files)
    }

    async fn delete(&self, file_id: &str) -> Result<DeleteConfirmation, StorageError> {
        let response = self
            .json_request(Method::DELETE, &self.file_url(file_id))
            .send()
            .await?;

        if !response.status().is_success() {
            let message = error_message(response).await;
            warn!(file_id, "Delete failed: {}", message);
            return Err(StorageError::DeleteFailed(message));
        }

        info!(file_id, "Deleted file");
        Ok(response.json().await?)
    }

    async fn get_metadata(&self, file_id: &str) -> Result<FileMetadata, StorageError> {
        let url = format!("{}/metadata", self.file_url(file_id));

        let response = self.json_request(Method::GET, &url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorageError::FileNotFound(file_id.to_string()));
        }

        if !response.status().is_success() {
            let message = error_message(response).await;
            warn!(file_id, "Metadata lookup failed: {}", message);
            return Err(StorageError::MetadataFailed(message));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_string_contains, header, method, path, query_param},
        Mock, MockServer, Request, ResponseTemplate,
    };

    use super::*;

    fn service_for(server: &MockServer) -> TerminalStorageService {
        let config = TerminalConfig::new(server.uri(), "test-key", "test-app", "demo");
        TerminalStorageService::new(Client::new(), &config)
    }

    fn json_response(status: u16, body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json")
    }

    #[tokio::test]
    async fn upload_sends_credentials_file_and_visibility() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/files"))
            .and(header("X-API-KEY", "test-key"))
            .and(header("X-APP-ID", "test-app"))
            .and(body_string_contains("name=\"file\"; filename=\"a.txt\""))
            .and(body_string_contains("text/plain"))
            .and(body_string_contains("name=\"type\""))
            .and(body_string_contains("public"))
            .respond_with(json_response(200, json!({"id": "f1"})))
            .expect(1)
            .mount(&server)
            .await;

        let stored = service_for(&server)
            .upload(
                UploadPayload::bytes(b"hi".to_vec(), "a.txt", "text/plain"),
                Visibility::Public,
            )
            .await
            .unwrap();

        assert_eq!(stored.id, "f1");
    }

    #[tokio::test]
    async fn upload_defaults_to_private_visibility() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/files"))
            .and(body_string_contains("private"))
            .respond_with(json_response(200, json!({"id": "f2", "url": null})))
            .expect(1)
            .mount(&server)
            .await;

        let stored = service_for(&server)
            .upload(
                UploadPayload::bytes(b"x".to_vec(), "x.bin", "application/octet-stream"),
                Visibility::default(),
            )
            .await
            .unwrap();

        assert_eq!(stored.id, "f2");
        assert!(stored.extra.contains_key("url"));
    }

    #[tokio::test]
    async fn upload_reads_native_handle_from_disk() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/files"))
            .and(body_string_contains("filename=\"native-upload.txt\""))
            .and(body_string_contains("text/plain"))
            .and(body_string_contains("from disk"))
            .respond_with(json_response(200, json!({"id": "f3"})))
            .expect(1)
            .mount(&server)
            .await;

        let file_path = std::env::temp_dir()
            .join(format!("terminal-gateway-{}", std::process::id()))
            .join("native-upload.txt");
        tokio::fs::create_dir_all(file_path.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(&file_path, b"from disk").await.unwrap();

        let stored = service_for(&server)
            .upload(UploadPayload::native(&file_path), Visibility::Private)
            .await
            .unwrap();

        assert_eq!(stored.id, "f3");
        let _ = tokio::fs::remove_file(&file_path).await;
    }

    #[tokio::test]
    async fn upload_of_missing_native_handle_never_reaches_the_service() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(json_response(200, json!({"id": "unused"})))
            .expect(0)
            .mount(&server)
            .await;

        let err = service_for(&server)
            .upload(
                UploadPayload::native("/definitely/not/here.txt"),
                Visibility::Private,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn upload_failure_uses_json_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/files"))
            .respond_with(json_response(413, json!({"error": "quota exceeded"})))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .upload(
                UploadPayload::bytes(b"hi".to_vec(), "a.txt", "text/plain"),
                Visibility::Private,
            )
            .await
            .unwrap_err();

        match err {
            StorageError::UploadFailed(message) => assert_eq!(message, "quota exceeded"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn upload_failure_with_plain_body_uses_status_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/files"))
            .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .upload(
                UploadPayload::bytes(b"hi".to_vec(), "a.txt", "text/plain"),
                Visibility::Private,
            )
            .await
            .unwrap_err();

        match err {
            StorageError::UploadFailed(message) => assert_eq!(message, "Service Unavailable"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn upload_response_without_id_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/files"))
            .respond_with(json_response(200, json!({"ok": true})))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .upload(
                UploadPayload::bytes(b"hi".to_vec(), "a.txt", "text/plain"),
                Visibility::Private,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn upload_response_with_empty_id_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/files"))
            .respond_with(json_response(200, json!({"id": ""})))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .upload(
                UploadPayload::bytes(b"hi".to_vec(), "a.txt", "text/plain"),
                Visibility::Private,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn download_url_without_expiry_sends_no_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/f1"))
            .and(header("X-API-KEY", "test-key"))
            .and(header("X-APP-ID", "test-app"))
            .and(header("Content-Type", "application/json"))
            .and(|req: &Request| req.url.query().is_none())
            .respond_with(json_response(200, json!({"url": "https://cdn.test/f1?sig=1"})))
            .expect(1)
            .mount(&server)
            .await;

        let grant = service_for(&server)
            .get_download_url("f1", None)
            .await
            .unwrap();

        assert_eq!(grant.url, "https://cdn.test/f1?sig=1");
    }

    #[tokio::test]
    async fn download_url_forwards_explicit_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/f1"))
            .and(query_param("expires", "60"))
            .respond_with(json_response(200, json!({"url": "https://cdn.test/f1?sig=2"})))
            .expect(1)
            .mount(&server)
            .await;

        let grant = service_for(&server)
            .get_download_url("f1", Some(60))
            .await
            .unwrap();

        assert_eq!(grant.url, "https://cdn.test/f1?sig=2");
    }

    #[tokio::test]
    async fn download_url_forwards_zero_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/f1"))
            .and(query_param("expires", "0"))
            .respond_with(json_response(200, json!({"url": "https://cdn.test/f1?sig=0"})))
            .expect(1)
            .mount(&server)
            .await;

        let grant = service_for(&server)
            .get_download_url("f1", Some(0))
            .await
            .unwrap();

        assert_eq!(grant.url, "https://cdn.test/f1?sig=0");
    }

    #[tokio::test]
    async fn file_ids_are_percent_encoded_into_the_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(|req: &Request| req.url.path() == "/files/dir%2Fa%20b.txt")
            .respond_with(json_response(200, json!({"url": "https://cdn.test/x"})))
            .expect(1)
            .mount(&server)
            .await;

        service_for(&server)
            .get_download_url("dir/a b.txt", None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn download_url_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/f1"))
            .respond_with(json_response(403, json!({"error": "forbidden app"})))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .get_download_url("f1", None)
            .await
            .unwrap_err();

        match err {
            StorageError::DownloadUrlFailed(message) => assert_eq!(message, "forbidden app"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_returns_entries_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files"))
            .respond_with(json_response(
                200,
                json!([
                    {"id": "b", "size": 10, "lastModified": "2024-05-01T10:00:00Z"},
                    {"id": "a"}
                ]),
            ))
            .mount(&server)
            .await;

        let files = service_for(&server).list().await.unwrap();

        let ids: Vec<&str> = files.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(files[0].size, Some(10));
        assert!(files[0].last_modified.is_some());
        assert_eq!(files[1].size, None);
    }

    #[tokio::test]
    async fn list_tolerates_non_rfc3339_timestamps() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files"))
            .respond_with(json_response(
                200,
                json!([
                    {"id": "f1", "size": 2, "lastModified": 1714557600000u64},
                    {"id": "f2", "lastModified": "last tuesday"},
                    {"id": "f3"}
                ]),
            ))
            .mount(&server)
            .await;

        let files = service_for(&server).list().await.unwrap();

        assert_eq!(files.len(), 3);
        assert_eq!(files[0].size, Some(2));
        assert!(files[0].last_modified.is_some());
        assert_eq!(files[1].last_modified, None);
    }

    #[tokio::test]
    async fn metadata_with_http_date_still_resolves() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/f1/metadata"))
            .respond_with(json_response(
                200,
                json!({
                    "contentType": "text/plain",
                    "size": 2,
                    "lastModified": "Wed, 01 May 2024 10:00:00 GMT"
                }),
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/files/f2/metadata"))
            .respond_with(json_response(200, json!({"lastModified": "not a date"})))
            .mount(&server)
            .await;

        let service = service_for(&server);

        let metadata = service.get_metadata("f1").await.unwrap();
        assert_eq!(metadata.content_type.as_deref(), Some("text/plain"));
        assert!(metadata.last_modified.is_some());
        assert!(service.exists("f1").await.unwrap());

        let metadata = service.get_metadata("f2").await.unwrap();
        assert_eq!(metadata.last_modified, None);
        assert!(service.exists("f2").await.unwrap());
    }

    #[tokio::test]
    async fn list_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = service_for(&server).list().await.unwrap_err();

        match err {
            StorageError::ListFailed(message) => assert_eq!(message, "Internal Server Error"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn delete_returns_confirmation() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/files/f1"))
            .and(header("X-API-KEY", "test-key"))
            .respond_with(json_response(200, json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let confirmation = service_for(&server).delete("f1").await.unwrap();
        assert!(confirmation.success);
    }

    #[tokio::test]
    async fn delete_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/files/f1"))
            .respond_with(json_response(409, json!({"error": "locked"})))
            .mount(&server)
            .await;

        let err = service_for(&server).delete("f1").await.unwrap_err();
        assert!(matches!(err, StorageError::DeleteFailed(ref m) if m == "locked"));
    }

    #[tokio::test]
    async fn metadata_is_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/f1/metadata"))
            .respond_with(json_response(
                200,
                json!({"contentType": "text/plain", "size": 2}),
            ))
            .mount(&server)
            .await;

        let metadata = service_for(&server).get_metadata("f1").await.unwrap();
        assert_eq!(metadata.content_type.as_deref(), Some("text/plain"));
        assert_eq!(metadata.size, Some(2));
        assert_eq!(metadata.last_modified, None);
    }

    #[tokio::test]
    async fn missing_file_is_distinguished_from_service_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/gone/metadata"))
            .respond_with(json_response(404, json!({"error": "no such key"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/files/broken/metadata"))
            .respond_with(json_response(500, json!({"error": "db down"})))
            .mount(&server)
            .await;

        let service = service_for(&server);

        let err = service.get_metadata("gone").await.unwrap_err();
        assert!(matches!(err, StorageError::FileNotFound(ref id) if id == "gone"));
        assert!(!service.exists("gone").await.unwrap());

        let err = service.get_metadata("broken").await.unwrap_err();
        assert!(matches!(err, StorageError::MetadataFailed(ref m) if m == "db down"));
        assert!(matches!(
            service.exists("broken").await,
            Err(StorageError::MetadataFailed(_))
        ));
    }

    #[tokio::test]
    async fn exists_is_true_when_metadata_resolves() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/f1/metadata"))
            .respond_with(json_response(200, json!({})))
            .mount(&server)
            .await;

        assert!(service_for(&server).exists("f1").await.unwrap());
    }

    #[tokio::test]
    async fn connection_failures_surface_as_network_errors() {
        let config = TerminalConfig::new("http://127.0.0.1:1", "k", "a", "demo");
        let service = TerminalStorageService::new(Client::new(), &config);

        let err = service.list().await.unwrap_err();
        assert!(matches!(err, StorageError::NetworkError(_)));

        let err = service.exists("f1").await.unwrap_err();
        assert!(matches!(err, StorageError::NetworkError(_)));
    }

    #[tokio::test]
    async fn upload_list_delete_lifecycle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/files"))
            .respond_with(json_response(200, json!({"id": "f1"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/files"))
            .respond_with(json_response(200, json!([{"id": "f1", "size": 2}])))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/files/f1"))
            .respond_with(json_response(200, json!({"success": true})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/files/f1/metadata"))
            .respond_with(json_response(404, json!({"error": "not found"})))
            .mount(&server)
            .await;

        let service = service_for(&server);

        let stored = service
            .upload(
                UploadPayload::bytes(b"hi".to_vec(), "a.txt", "text/plain"),
                Visibility::Public,
            )
            .await
            .unwrap();
        assert_eq!(stored.id, "f1");

        let files = service.list().await.unwrap();
        assert!(files.iter().any(|f| f.id == stored.id));

        let confirmation = service.delete(&stored.id).await.unwrap();
        assert!(confirmation.success);

        let err = service.get_metadata(&stored.id).await.unwrap_err();
        assert!(matches!(err, StorageError::FileNotFound(_)));
    }
}
