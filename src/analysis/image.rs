//! Resolving image handles to readable bytes.
//!
//! # Responsibilities
//! - Check the extension against the allowed set
//! - Enforce the size cap before reading
//! - Reject missing, unreadable or empty images

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::analysis::request::{file_name_of, ImageHandle};
use crate::config::InputConfig;

/// An image ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    /// MIME type derived from the file extension.
    pub fn content_type(&self) -> &'static str {
        match extension_of(&self.file_name).as_deref() {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            Some("bmp") => "image/bmp",
            Some("tif") | Some("tiff") => "image/tiff",
            _ => "application/octet-stream",
        }
    }
}

/// Reasons an image handle does not resolve to readable image data.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("image not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read image {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image {0} is empty")]
    Empty(String),

    #[error("image {name} has an unsupported extension (allowed: {allowed})")]
    UnsupportedExtension { name: String, allowed: String },

    #[error("image {name} is {size} bytes, limit is {limit}")]
    TooLarge { name: String, size: u64, limit: u64 },
}

impl ImageHandle {
    /// Turn the handle into bytes, applying the input rules.
    pub async fn resolve(self, rules: &InputConfig) -> Result<ImageData, InputError> {
        match self {
            ImageHandle::Path(path) => resolve_path(path, rules).await,
            ImageHandle::Upload { file_name, bytes } => {
                check_extension(&file_name, rules)?;
                check_size(&file_name, bytes.len() as u64, rules)?;
                if bytes.is_empty() {
                    return Err(InputError::Empty(file_name));
                }
                Ok(ImageData { file_name, bytes })
            }
        }
    }
}

async fn resolve_path(path: PathBuf, rules: &InputConfig) -> Result<ImageData, InputError> {
    let file_name = file_name_of(&path);
    check_extension(&file_name, rules)?;

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(InputError::NotFound(path));
        }
        Err(source) => return Err(InputError::Io { path, source }),
    };
    if !metadata.is_file() {
        return Err(InputError::NotFound(path));
    }
    check_size(&file_name, metadata.len(), rules)?;

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(source) => return Err(InputError::Io { path, source }),
    };
    if bytes.is_empty() {
        return Err(InputError::Empty(file_name));
    }

    Ok(ImageData { file_name, bytes })
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

fn check_extension(name: &str, rules: &InputConfig) -> Result<(), InputError> {
    let allowed = extension_of(name).is_some_and(|ext| {
        rules
            .allowed_extensions
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(&ext))
    });
    if allowed {
        Ok(())
    } else {
        Err(InputError::UnsupportedExtension {
            name: name.to_string(),
            allowed: rules.allowed_extensions.join(", "),
        })
    }
}

fn check_size(name: &str, size: u64, rules: &InputConfig) -> Result<(), InputError> {
    if size > rules.max_image_bytes {
        return Err(InputError::TooLarge {
            name: name.to_string(),
            size,
            limit: rules.max_image_bytes,
        });
    }
    Ok(())
}
