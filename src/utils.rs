//! Shared helpers for the OratorAI client
//!
//! File validation for the presentation upload slots lives here: both
//! checks run before any network I/O so a bad pick fails fast.

use std::path::Path;

use crate::error::{OratorError, Result};

pub const KB: u64 = 1024;
pub const MB: u64 = 1024 * KB;
pub const GB: u64 = 1024 * MB;

/// Upload cap per file, for both slots.
pub const MAX_UPLOAD_SIZE: u64 = 500 * MB;

/// Allowed slide types: PDF and PowerPoint documents.
const SLIDE_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
];

/// Allowed media types: common video containers.
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("avi", "video/x-msvideo"),
    ("mkv", "video/x-matroska"),
];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Resolve the content type for a slide upload, rejecting anything outside
/// the allow-list.
pub fn slide_content_type(path: &Path) -> Result<&'static str> {
    let ext = extension_of(path);
    SLIDE_TYPES
        .iter()
        .find(|(allowed, _)| *allowed == ext)
        .map(|(_, content_type)| *content_type)
        .ok_or_else(|| {
            OratorError::unsupported_file_type(format!(
                "Unsupported slide file type '{}'. Allowed: PDF and PowerPoint files",
                if ext.is_empty() { "(none)".to_string() } else { ext }
            ))
        })
}

/// Resolve the content type for a media upload, rejecting anything outside
/// the allow-list.
pub fn media_content_type(path: &Path) -> Result<&'static str> {
    let ext = extension_of(path);
    MEDIA_TYPES
        .iter()
        .find(|(allowed, _)| *allowed == ext)
        .map(|(_, content_type)| *content_type)
        .ok_or_else(|| {
            OratorError::unsupported_file_type(format!(
                "Unsupported media file type '{}'. Allowed: video files",
                if ext.is_empty() { "(none)".to_string() } else { ext }
            ))
        })
}

/// Check that the file exists and fits under the upload cap, returning its
/// size.
pub async fn validate_upload_size(path: &Path) -> Result<u64> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|_| OratorError::file_not_found(path.display().to_string()))?;

    if !metadata.is_file() {
        return Err(OratorError::invalid_input(format!(
            "Not a file: {}",
            path.display()
        )));
    }

    let size = metadata.len();
    check_upload_size(size)?;
    Ok(size)
}

/// Enforce the upload cap on an already-known size.
pub fn check_upload_size(size: u64) -> Result<()> {
    if size > MAX_UPLOAD_SIZE {
        return Err(OratorError::file_too_large(format!(
            "File exceeds the 500MB upload limit: {}",
            format_bytes(size)
        )));
    }
    Ok(())
}

/// Format bytes to human readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
