//! Analysis request types.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// GPS coordinates attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Where the image bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageHandle {
    /// An image on the local filesystem.
    Path(PathBuf),
    /// An image already held in memory, e.g. an HTTP upload.
    Upload { file_name: String, bytes: Vec<u8> },
}

impl ImageHandle {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        ImageHandle::Path(path.into())
    }

    pub fn upload(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        ImageHandle::Upload {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Name used to identify the image: the file name of a path, or the
    /// upload's declared name.
    pub fn identifier(&self) -> String {
        match self {
            ImageHandle::Path(path) => file_name_of(path),
            ImageHandle::Upload { file_name, .. } => file_name.clone(),
        }
    }
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A single analysis request. Created per call and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub image: ImageHandle,
    pub tree_type_hint: Option<String>,
    pub location_hint: Option<GeoPoint>,
}

impl AnalysisRequest {
    pub fn new(image: ImageHandle) -> Self {
        Self {
            image,
            tree_type_hint: None,
            location_hint: None,
        }
    }

    pub fn with_tree_type(mut self, tree_type: impl Into<String>) -> Self {
        self.tree_type_hint = Some(tree_type.into());
        self
    }

    pub fn with_location(mut self, lat: f64, lon: f64) -> Self {
        self.location_hint = Some(GeoPoint { lat, lon });
        self
    }
}
