//! Session domain model.
//!
//! This module contains the `GenerationSession` snapshot that represents
//! one user's try-on session, the sole observable surface exposed to any
//! presentation layer.

use crate::image::{EncodedImage, GeneratedImage, Slot};
use serde::{Deserialize, Serialize};

/// The lifecycle phase of a try-on session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// At least one slot is still empty; generation cannot be requested.
    Idle,
    /// Both slots are populated; a generation request may be issued.
    ReadyToGenerate,
    /// A synthesis request is in flight. At most one at a time.
    Generating,
    /// The collaborator produced a composite image; `result` is populated.
    Succeeded,
    /// The last generation attempt failed; `error_message` is populated.
    /// Both slots are populated, except for the missing-inputs failure where
    /// `generate()` was requested with an empty slot.
    Failed,
}

/// Snapshot of a try-on session.
///
/// Owned exclusively by the orchestrator and mutated only through its four
/// operations; presentation layers read clones of this value and render
/// accordingly, performing no business logic of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSession {
    /// The encoded person photo, if one has been selected.
    pub person_image: Option<EncodedImage>,
    /// The encoded clothing photo, if one has been selected.
    pub clothing_image: Option<EncodedImage>,
    /// Current lifecycle phase.
    pub phase: Phase,
    /// The decoded output image. Present only in `Succeeded`.
    pub result: Option<GeneratedImage>,
    /// Human-readable failure cause. Present only in `Failed`.
    pub error_message: Option<String>,
    /// A per-slot encoding failure, surfaced without disturbing either slot
    /// or the phase. Cleared by the next successful slot update and by reset.
    pub upload_error: Option<String>,
}

impl GenerationSession {
    /// The initial empty session.
    pub fn new() -> Self {
        Self {
            person_image: None,
            clothing_image: None,
            phase: Phase::Idle,
            result: None,
            error_message: None,
            upload_error: None,
        }
    }

    /// Returns the image currently held by a slot.
    pub fn slot(&self, slot: Slot) -> Option<&EncodedImage> {
        match slot {
            Slot::Person => self.person_image.as_ref(),
            Slot::Clothing => self.clothing_image.as_ref(),
        }
    }

    pub(crate) fn set_slot(&mut self, slot: Slot, image: EncodedImage) {
        match slot {
            Slot::Person => self.person_image = Some(image),
            Slot::Clothing => self.clothing_image = Some(image),
        }
    }

    /// True when both the person and the clothing slot hold an image.
    pub fn both_slots_populated(&self) -> bool {
        self.person_image.is_some() && self.clothing_image.is_some()
    }
}

impl Default for GenerationSession {
    fn default() -> Self {
        Self::new()
    }
}
