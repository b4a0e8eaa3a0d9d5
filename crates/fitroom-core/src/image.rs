//! Shared image data model.
//!
//! These are the value types exchanged between the encoder, the session
//! orchestrator, and the synthesis collaborator.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two named holding positions for a user-supplied image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// The photo of a person.
    Person,
    /// The photo of a clothing item.
    Clothing,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Person => write!(f, "person"),
            Slot::Clothing => write!(f, "clothing"),
        }
    }
}

/// The canonical representation of one user-supplied image.
///
/// Created once per successful file read and immutable afterwards. A later
/// selection for the same slot supersedes (never mutates) the held value.
///
/// The payload and the preview are derived from a single read of the source,
/// so the preview is guaranteed to show exactly the bytes that will be sent
/// to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    /// Base64 (standard alphabet) encoding of the file bytes. Never empty.
    pub encoded_data: String,
    /// MIME type reported for the source file (e.g. `image/png`). Non-empty.
    /// Non-image types are passed through; the collaborator may reject them.
    pub media_type: String,
    /// Self-contained `data:` URI embedding the same bytes, sufficient for a
    /// UI to render the image without re-reading the original file.
    pub preview_reference: String,
}

/// The decoded output image returned by a successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Raw image bytes as decoded from the collaborator response.
    pub bytes: Vec<u8>,
    /// MIME type of the generated image.
    pub media_type: String,
}

impl GeneratedImage {
    /// Renders the image as a self-contained `data:` URI for display
    /// surfaces that cannot consume raw bytes.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type,
            BASE64_STANDARD.encode(&self.bytes)
        )
    }
}
