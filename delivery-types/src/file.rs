//! Asset file metadata.

use serde::{Deserialize, Serialize};

/// The `file` field of an asset: where the binary lives and what it is.
///
/// `fileName` and `contentType` are required, which is what lets the dynamic
/// decoder tell file metadata apart from an arbitrary object that happens to
/// carry a `url`. `url` is absent while an upload is still being processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub file_name: String,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<FileDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDetails {
    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageInfo>,
}

/// Pixel dimensions, present for image assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl FileMetadata {
    /// Size in bytes, if reported.
    #[must_use]
    pub fn size(&self) -> Option<u64> {
        self.details.as_ref().and_then(|d| d.size)
    }

    /// Image dimensions, if this file is an image.
    #[must_use]
    pub fn image_info(&self) -> Option<ImageInfo> {
        self.details.as_ref().and_then(|d| d.image)
    }

    /// The file URL with an explicit scheme; the API serves protocol-relative
    /// URLs (`//images.example.net/...`). `None` until the file is processed.
    #[must_use]
    pub fn absolute_url(&self) -> Option<String> {
        let url = self.url.as_deref()?;
        if url.starts_with("//") {
            Some(format!("https:{url}"))
        } else {
            Some(url.to_string())
        }
    }
}
