//! fitroom-core: domain layer of the virtual try-on client.
//!
//! Two components compose linearly: the payload [`encoder`] turns a selected
//! file into an [`EncodedImage`] (transport payload + preview from a single
//! read), and the [`session`] orchestrator holds the two image slots,
//! enforces generation readiness, and drives the external [`Synthesizer`]
//! collaborator through the `Idle / ReadyToGenerate / Generating / Succeeded
//! / Failed` lifecycle.

pub mod encoder;
pub mod error;
pub mod image;
pub mod session;
pub mod synthesis;

// Re-export common error type
pub use error::{FitroomError, Result};
pub use image::{EncodedImage, GeneratedImage, Slot};
pub use session::{GenerationOrchestrator, GenerationSession, Phase};
pub use synthesis::Synthesizer;
