use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DownloadUrlQuery {
    pub expires: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    #[serde(rename = "fileId")]
    pub file_id: String,
    pub exists: bool,
}
