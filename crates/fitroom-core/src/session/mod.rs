//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Session snapshot and lifecycle phase (`GenerationSession`, `Phase`)
//! - `orchestrator`: Session lifecycle management (`GenerationOrchestrator`)

mod model;
mod orchestrator;


pub use model::{GenerationSession, Phase};
pub use orchestrator::{
    ENCODING_ERROR_MESSAGE, GenerationOrchestrator, MISSING_INPUTS_MESSAGE,
    SYNTHESIS_ERROR_MESSAGE,
};
