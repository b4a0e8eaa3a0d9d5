//! Synthesis collaborator boundary.

use crate::error::Result;
use crate::image::{EncodedImage, GeneratedImage};
use async_trait::async_trait;

/// The external generative image-synthesis service, treated as an opaque
/// asynchronous function.
///
/// Implementations own their transport, authentication, and rate-limit
/// concerns; the orchestrator only sees a single awaitable outcome. Failures
/// surface as [`crate::FitroomError::Synthesis`] carrying diagnostic detail;
/// the orchestrator decides what, if anything, the user sees.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Produces a composite image from a person photo and a clothing photo.
    async fn synthesize(
        &self,
        person: &EncodedImage,
        clothing: &EncodedImage,
    ) -> Result<GeneratedImage>;
}
