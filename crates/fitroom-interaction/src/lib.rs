//! fitroom-interaction: collaborator clients for the try-on pipeline.
//!
//! Implements the `fitroom_core::Synthesizer` boundary against the real
//! generative image-synthesis service.

mod gemini_stylist;

pub use gemini_stylist::GeminiStylist;
