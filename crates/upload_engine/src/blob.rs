use std::path::PathBuf;

use sha2::{Digest, Sha256};
use upload_logging::upload_info;

use crate::persist::{AtomicFileWriter, PersistError};

/// Locally addressable copy of a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRef {
    pub path: PathBuf,
    /// `file://` URL pointing at `path`.
    pub url: String,
}

/// Keeps response bodies as files so an image viewer can load them by URL.
pub struct BlobStore {
    writer: AtomicFileWriter,
}

impl BlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir.into()),
        }
    }

    pub fn publish(
        &self,
        source_name: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<BlobRef, PersistError> {
        let filename = blob_filename(source_name, bytes, content_type);
        let path = self.writer.write(&filename, bytes)?;
        let absolute = std::path::absolute(&path)?;
        let url = url::Url::from_file_path(&absolute)
            .map_err(|()| PersistError::NotAddressable(absolute.clone()))?;
        upload_info!("Published {} bytes as {}", bytes.len(), url);
        Ok(BlobRef {
            path,
            url: url.to_string(),
        })
    }
}

/// Deterministic name: `{stem}--{short_hash(bytes)}.{ext}`, extension taken
/// from the content type.
pub fn blob_filename(source_name: &str, bytes: &[u8], content_type: Option<&str>) -> String {
    let stem = sanitize_stem(source_name);
    let hash = short_hash(bytes);
    let ext = extension_for(content_type);
    format!("{stem}--{hash}.{ext}")
}

fn sanitize_stem(source_name: &str) -> String {
    let file_name = source_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(source_name);
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    let mut cleaned = String::with_capacity(stem.len());
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            cleaned.push(c);
        } else if !cleaned.ends_with('_') {
            cleaned.push('_');
        }
    }
    let mut cleaned = cleaned.trim_matches('_').to_string();
    cleaned.truncate(64);
    if cleaned.is_empty() {
        "blob".to_string()
    } else {
        cleaned
    }
}

fn extension_for(content_type: Option<&str>) -> &'static str {
    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());
    match mime.as_deref() {
        Some("image/png") => "png",
        Some("image/jpeg") | Some("image/jpg") => "jpg",
        Some("image/gif") => "gif",
        Some("image/webp") => "webp",
        Some("image/svg+xml") => "svg",
        Some("image/bmp") => "bmp",
        _ => "bin",
    }
}

fn short_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
