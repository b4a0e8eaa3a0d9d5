//! Payload encoder.
//!
//! Converts a raw selected file into an [`EncodedImage`]: a base64 transport
//! payload plus a locally displayable preview, both derived from a single
//! read so the two can never diverge if the file changes on disk afterwards.

use crate::error::{FitroomError, Result};
use crate::image::EncodedImage;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use std::path::{Path, PathBuf};

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// An opaque handle to file content plus its declared media type.
///
/// When no media type is declared, one is guessed from the file extension;
/// files with no recognizable extension fall back to
/// `application/octet-stream` and are left for the collaborator to judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    path: PathBuf,
    declared_media_type: Option<String>,
}

impl ImageFile {
    /// Creates a handle with the media type guessed from the extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            declared_media_type: None,
        }
    }

    /// Creates a handle with an explicitly declared media type, as reported
    /// by the file-selection boundary.
    pub fn with_media_type(path: impl Into<PathBuf>, media_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            declared_media_type: Some(media_type.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn media_type(&self) -> String {
        match &self.declared_media_type {
            Some(declared) if !declared.is_empty() => declared.clone(),
            _ => mime_guess::from_path(&self.path)
                .first()
                .map(|m| m.essence_str().to_string())
                .unwrap_or_else(|| FALLBACK_MEDIA_TYPE.to_string()),
        }
    }
}

/// Reads the file once and produces its transport payload and preview.
///
/// Single-shot and non-retrying: a read failure or an extraction failure
/// yields an [`FitroomError::Encoding`] and no partial result. Safe to invoke
/// concurrently for unrelated files.
///
/// # Errors
///
/// Returns [`FitroomError::Encoding`] when the file cannot be read or the
/// payload cannot be isolated from the preview carrier.
pub async fn encode(file: &ImageFile) -> Result<EncodedImage> {
    let bytes = tokio::fs::read(file.path()).await.map_err(|e| {
        FitroomError::encoding(format!(
            "failed to read '{}': {} (kind: {:?})",
            file.path().display(),
            e,
            e.kind()
        ))
    })?;

    encode_bytes(&bytes, file.media_type())
}

/// The pure transformation on in-memory bytes.
///
/// Builds the preview data URI first, then extracts the transport payload
/// from the carrier, so both views come from the same bytes.
pub fn encode_bytes(bytes: &[u8], media_type: impl Into<String>) -> Result<EncodedImage> {
    let media_type = media_type.into();
    if media_type.is_empty() {
        return Err(FitroomError::encoding("media type must not be empty"));
    }
    if !media_type.starts_with("image/") {
        tracing::warn!(%media_type, "encoding a non-image media type; the collaborator may reject it");
    }

    let preview_reference = format!("data:{};base64,{}", media_type, BASE64_STANDARD.encode(bytes));

    // The carrier includes the "data:<type>;base64," prefix; the transport
    // payload is everything after the comma.
    let encoded_data = preview_reference
        .split_once(',')
        .map(|(_, payload)| payload.to_string())
        .ok_or_else(|| FitroomError::encoding("failed to extract payload from data URI"))?;

    if encoded_data.is_empty() {
        return Err(FitroomError::encoding("encoded payload is empty"));
    }

    Ok(EncodedImage {
        encoded_data,
        media_type,
        preview_reference,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_encode_bytes_round_trip() {
        let bytes = b"\x89PNG\r\n\x1a\nfake-image-bytes";
        let encoded = encode_bytes(bytes, "image/png").unwrap();

        assert_eq!(encoded.media_type, "image/png");
        assert!(!encoded.encoded_data.is_empty());

        // The preview embeds exactly the payload bytes.
        let payload = BASE64_STANDARD.decode(&encoded.encoded_data).unwrap();
        assert_eq!(payload, bytes);

        let (prefix, preview_payload) = encoded.preview_reference.split_once(',').unwrap();
        assert_eq!(prefix, "data:image/png;base64");
        assert_eq!(BASE64_STANDARD.decode(preview_payload).unwrap(), bytes);
    }

    #[test]
    fn test_encode_bytes_rejects_empty_payload() {
        let err = encode_bytes(b"", "image/png").unwrap_err();
        assert!(err.is_encoding());
    }

    #[test]
    fn test_encode_bytes_rejects_empty_media_type() {
        let err = encode_bytes(b"data", "").unwrap_err();
        assert!(err.is_encoding());
    }

    #[test]
    fn test_encode_bytes_passes_through_non_image_types() {
        let encoded = encode_bytes(b"%PDF-1.4", "application/pdf").unwrap();
        assert_eq!(encoded.media_type, "application/pdf");
    }

    #[tokio::test]
    async fn test_encode_reads_file_and_guesses_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"jpeg-bytes").unwrap();

        let encoded = encode(&ImageFile::new(&path)).await.unwrap();
        assert_eq!(encoded.media_type, "image/jpeg");
        assert_eq!(
            BASE64_STANDARD.decode(&encoded.encoded_data).unwrap(),
            b"jpeg-bytes"
        );
    }

    #[tokio::test]
    async fn test_encode_prefers_declared_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, b"actually-webp").unwrap();

        let encoded = encode(&ImageFile::with_media_type(&path, "image/webp"))
            .await
            .unwrap();
        assert_eq!(encoded.media_type, "image/webp");
    }

    #[tokio::test]
    async fn test_encode_missing_file_is_encoding_error() {
        let err = encode(&ImageFile::new("/nonexistent/missing.png"))
            .await
            .unwrap_err();
        assert!(err.is_encoding());
    }
}
