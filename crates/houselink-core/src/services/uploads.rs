use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::api::ApiClient;
use crate::models::UploadedImage;

const UPLOAD_PATH: &str = "/upload/image";

/// MIME type from the file extension; the backend accepts common image formats only
fn image_mime(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct UploadService {
    api: ApiClient,
}

impl UploadService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn upload_bytes(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedImage> {
        let mime = image_mime(file_name)
            .with_context(|| format!("Unsupported image type: {}", file_name))?;
        let size = bytes.len();
        let uploaded: UploadedImage = self
            .api
            .post_file(UPLOAD_PATH, file_name, mime, bytes)
            .await
            .with_context(|| format!("Failed to upload {}", file_name))?;
        info!(file_name, size, url = %uploaded.url, "Image uploaded");
        Ok(uploaded)
    }

    pub async fn upload_file(&self, path: &Path) -> Result<UploadedImage> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Invalid file name: {}", path.display()))?
            .to_string();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.upload_bytes(&file_name, bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime("house.JPG"), Some("image/jpeg"));
        assert_eq!(image_mime("plan.webp"), Some("image/webp"));
        assert_eq!(image_mime("notes.txt"), None);
        assert_eq!(image_mime("noextension"), None);
    }
}
