use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "avif", "bmp", "ico"];

/// Returned to the client once the object store has accepted the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedImage {
    pub url: String,
    pub key: String,
    pub content_type: String,
    pub size: usize,
}

/// A fully buffered upload that passed the declared-type check.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub declared_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Checks size and sniffed content; returns the content type to store.
    pub fn validate(&self) -> Result<String, AppError> {
        if self.bytes.is_empty() {
            return Err(AppError::InvalidInput("Uploaded file is empty".into()));
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "Image exceeds the {} MB limit",
                MAX_IMAGE_BYTES / (1024 * 1024)
            )));
        }
        if !is_image_mime(&self.declared_type) {
            return Err(AppError::UnsupportedMediaType("Only image files are allowed".into()));
        }

        // infer has no SVG matcher; text formats are trusted on the declared type
        if self.declared_type == "image/svg+xml" {
            return Ok(self.declared_type.clone());
        }

        match infer::get(&self.bytes) {
            Some(kind) if kind.matcher_type() == infer::MatcherType::Image => Ok(kind.mime_type().to_string()),
            _ => Err(AppError::UnsupportedMediaType("File content is not a recognised image".into())),
        }
    }

    /// Extension for the object key, from the file name when it is a known
    /// image extension, otherwise from the content type.
    pub fn extension(&self, content_type: &str) -> String {
        let from_name = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()));

        from_name.unwrap_or_else(|| extension_for_mime(content_type).to_string())
    }
}

pub fn is_image_mime(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().starts_with("image/")
}

fn extension_for_mime(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/avif" => "avif",
        "image/bmp" => "bmp",
        "image/vnd.microsoft.icon" | "image/x-icon" => "ico",
        _ => "bin",
    }
}
