//! Image ingestion - turns uploaded files into immutable image records

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::IngestError;
use crate::response::base64;

/// Where the bytes of a raw file come from
#[derive(Debug, Clone)]
pub enum FileSource {
    /// A file on the local filesystem
    Path(PathBuf),
    /// Content already received, e.g. from a multipart upload
    Memory(Vec<u8>),
}

/// A raw file as handed over by the client, before any reading
#[derive(Debug, Clone)]
pub struct RawFile {
    pub name: String,
    pub media_type: String,
    pub source: FileSource,
}

impl RawFile {
    /// Wrap content that is already in memory
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            source: FileSource::Memory(data),
        }
    }

    /// Reference a file on disk; the declared media type comes from its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            name,
            media_type: media_type_for_extension(path).unwrap_or_default().to_string(),
            source: FileSource::Path(path.to_path_buf()),
        }
    }
}

fn media_type_for_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Normalized in-memory image, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    payload: Vec<u8>,
    media_type: String,
    display_name: String,
    preview: String,
}

impl ImageRecord {
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Data URI that renders the image directly
    pub fn preview(&self) -> &str {
        &self.preview
    }
}

/// Read a raw file completely and build its image record.
///
/// The declared media type is kept as is. Only when it is empty is the type
/// sniffed from the content.
pub async fn ingest(file: RawFile) -> Result<ImageRecord, IngestError> {
    let RawFile {
        name,
        media_type,
        source,
    } = file;

    let payload = match source {
        FileSource::Memory(data) => data,
        FileSource::Path(path) => fs::read(&path).await.map_err(|e| {
            warn!(path = ?path, error = %e, "Failed to read image file");
            IngestError::ReadFailed(format!("{}: {}", path.display(), e))
        })?,
    };

    if payload.is_empty() {
        warn!(name = %name, "Uploaded file is empty");
        return Err(IngestError::ReadFailed(format!("{} is empty", name)));
    }

    let media_type = if media_type.is_empty() {
        base64::detect_media_type(&payload)
            .unwrap_or(base64::FALLBACK_MEDIA_TYPE)
            .to_string()
    } else {
        media_type
    };

    let preview = base64::create_data_url(&payload, &media_type);

    debug!(name = %name, media_type = %media_type, size = payload.len(), "Ingested image");

    Ok(ImageRecord {
        payload,
        media_type,
        display_name: name,
        preview,
    })
}
