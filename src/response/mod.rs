//! Response handling module - data URIs and result downloads

pub mod base64;

use crate::error::Result;

/// A generated image decoded from its data URI, ready to be saved by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadableImage {
    pub media_type: String,
    pub file_name: String,
    pub data: Vec<u8>,
}

impl DownloadableImage {
    /// Decode a rendered result into bytes saved under `file_name`
    pub fn from_data_url(data_url: &str, file_name: &str) -> Result<Self> {
        let (media_type, data) = base64::parse_data_url(data_url)?;

        Ok(Self {
            media_type,
            file_name: file_name.to_string(),
            data,
        })
    }

    /// Value for the `Content-Disposition` header
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}
