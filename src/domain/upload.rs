use bytes::Bytes;
use std::path::Path;

/// Content types the classification service accepts.
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// An image about to be submitted for classification. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadCandidate {
    file_name: String,
    content_type: String,
    data: Bytes,
}

impl UploadCandidate {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Reads an image from disk, inferring the content type from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self::new(file_name, content_type_for(path), data))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Zero-byte uploads count as no file at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn has_allowed_type(&self) -> bool {
        let declared = self.content_type.to_ascii_lowercase();
        ALLOWED_CONTENT_TYPES.contains(&declared.as_str())
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => FALLBACK_CONTENT_TYPE,
    }
}
