//! Generation orchestrator.
//!
//! Owns the [`GenerationSession`] state machine: stores the two most recently
//! encoded images, gates when a synthesis request may be issued, invokes the
//! collaborator exactly once per user-initiated generation, and guards
//! against stale asynchronous completions with token comparison.

use super::model::{GenerationSession, Phase};
use crate::encoder::{self, ImageFile};
use crate::error::Result;
use crate::image::{EncodedImage, Slot};
use crate::synthesis::Synthesizer;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Stable user-facing message for a per-slot encoding failure.
pub const ENCODING_ERROR_MESSAGE: &str = "Error processing file. Please try another image.";

/// Stable user-facing message when generation is requested with a slot empty.
pub const MISSING_INPUTS_MESSAGE: &str = "Please upload both a person and a clothing item.";

/// Stable user-facing message for a collaborator failure. The underlying
/// cause is logged, never displayed.
pub const SYNTHESIS_ERROR_MESSAGE: &str = "Failed to generate the try-on image. The AI model \
     may not be able to process these images. Please try again with different photos.";

/// Per-slot sequence counters implementing atomic replace-if-newer.
///
/// `initiated` is stamped when a selection is accepted, `applied` when its
/// encode completes and wins. A completion applies only if its stamp is
/// newer than `applied`, so a later-initiated selection wins regardless of
/// completion order.
#[derive(Debug, Default)]
struct SlotSequence {
    initiated: u64,
    applied: u64,
}

#[derive(Default)]
struct OrchestratorState {
    session: GenerationSession,
    /// Identifies the current generation attempt; bumped on every `generate`
    /// start and on `reset`, so a late-arriving collaborator outcome whose
    /// token no longer matches is discarded.
    generation_token: u64,
    person_seq: SlotSequence,
    clothing_seq: SlotSequence,
}

impl OrchestratorState {
    fn slot_seq_mut(&mut self, slot: Slot) -> &mut SlotSequence {
        match slot {
            Slot::Person => &mut self.person_seq,
            Slot::Clothing => &mut self.clothing_seq,
        }
    }

    /// Re-derives the pre-generation phase from slot occupancy. Phases owned
    /// by the generate path (`Generating`, `Succeeded`, `Failed`) are left
    /// alone; leaving them requires `reset()`.
    fn recompute_readiness(&mut self) {
        if matches!(self.session.phase, Phase::Idle | Phase::ReadyToGenerate) {
            self.session.phase = if self.session.both_slots_populated() {
                Phase::ReadyToGenerate
            } else {
                Phase::Idle
            };
        }
    }
}

struct Inner {
    state: RwLock<OrchestratorState>,
    synthesizer: Arc<dyn Synthesizer>,
}

/// Manages one try-on session.
///
/// Cheap to clone; all clones share the same session state. All mutation
/// goes through the four operations below, each of which performs a single
/// state transition per suspension point, so no further locking is needed
/// by callers.
#[derive(Clone)]
pub struct GenerationOrchestrator {
    inner: Arc<Inner>,
}

impl GenerationOrchestrator {
    /// Creates an orchestrator with an empty session bound to the given
    /// synthesis collaborator.
    pub fn new(synthesizer: Arc<dyn Synthesizer>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(OrchestratorState::default()),
                synthesizer,
            }),
        }
    }

    /// Returns a snapshot of the current session.
    pub async fn session(&self) -> GenerationSession {
        self.inner.state.read().await.session.clone()
    }

    /// Encodes a selected file and stores it in the given slot.
    ///
    /// Last-write-wins per slot: the completion is applied only if no
    /// later-initiated selection for the same slot has already been applied.
    /// An encoding failure surfaces `upload_error` with a stable message and
    /// leaves both slots' contents untouched.
    pub async fn set_image(&self, slot: Slot, file: ImageFile) {
        let seq = self.begin_slot_update(slot).await;
        let outcome = encoder::encode(&file).await;
        self.apply_slot_update(slot, seq, outcome).await;
    }

    /// Stamps a new selection for a slot and returns its sequence number.
    pub(crate) async fn begin_slot_update(&self, slot: Slot) -> u64 {
        let mut state = self.inner.state.write().await;
        let slot_seq = state.slot_seq_mut(slot);
        slot_seq.initiated += 1;
        slot_seq.initiated
    }

    /// Applies an encode outcome to a slot if its stamp is still current.
    pub(crate) async fn apply_slot_update(&self, slot: Slot, seq: u64, outcome: Result<EncodedImage>) {
        let mut state = self.inner.state.write().await;
        if seq <= state.slot_seq_mut(slot).applied {
            tracing::debug!(%slot, seq, "discarding superseded slot update");
            return;
        }
        match outcome {
            Ok(image) => {
                state.slot_seq_mut(slot).applied = seq;
                state.session.set_slot(slot, image);
                state.session.upload_error = None;
                state.recompute_readiness();
                tracing::debug!(%slot, phase = ?state.session.phase, "slot updated");
            }
            Err(err) => {
                tracing::warn!(%slot, error = %err, "failed to encode selected file");
                // Stamp the failure too, so an older pending encode cannot
                // replace the slot after the user has seen this error.
                state.slot_seq_mut(slot).applied = seq;
                state.session.upload_error = Some(ENCODING_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Non-blocking form of [`set_image`](Self::set_image): spawns the encode
    /// on the runtime so both slots can be filled concurrently.
    pub fn select_image(&self, slot: Slot, file: ImageFile) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.set_image(slot, file).await })
    }

    /// Runs one generation attempt against the collaborator.
    ///
    /// A no-op while a request is already in flight (single-flight). With a
    /// slot empty, fails locally with the missing-inputs message and makes
    /// no collaborator call. Otherwise invokes the collaborator exactly once
    /// with the current payloads; the outcome is applied only if the session
    /// has not been reset in the meantime.
    pub async fn generate(&self) {
        let (person, clothing, token) = {
            let mut state = self.inner.state.write().await;
            if state.session.phase == Phase::Generating {
                tracing::debug!("generation already in flight; ignoring request");
                return;
            }
            let (Some(person), Some(clothing)) = (
                state.session.person_image.clone(),
                state.session.clothing_image.clone(),
            ) else {
                tracing::warn!("generation requested before both slots were populated");
                state.session.phase = Phase::Failed;
                state.session.error_message = Some(MISSING_INPUTS_MESSAGE.to_string());
                state.session.result = None;
                return;
            };

            state.generation_token += 1;
            state.session.phase = Phase::Generating;
            state.session.result = None;
            state.session.error_message = None;
            state.session.upload_error = None;
            (person, clothing, state.generation_token)
        };

        tracing::debug!(token, "invoking synthesis collaborator");
        let outcome = self.inner.synthesizer.synthesize(&person, &clothing).await;

        let mut state = self.inner.state.write().await;
        if state.generation_token != token {
            tracing::debug!(token, "discarding stale synthesis outcome");
            return;
        }

        match outcome {
            Ok(image) => {
                tracing::debug!(token, media_type = %image.media_type, "synthesis succeeded");
                state.session.phase = Phase::Succeeded;
                state.session.result = Some(image);
                state.session.error_message = None;
            }
            Err(err) => {
                tracing::error!(token, error = %err, "synthesis collaborator failed");
                state.session.phase = Phase::Failed;
                state.session.error_message = Some(SYNTHESIS_ERROR_MESSAGE.to_string());
                state.session.result = None;
            }
        }
    }

    /// Returns the session to its initial empty state.
    ///
    /// Legal from any phase, idempotent, and does not cancel an in-flight
    /// collaborator call; the token bump makes any late completion stale so
    /// it cannot mutate the reset session.
    pub async fn reset(&self) {
        let mut state = self.inner.state.write().await;
        state.session = GenerationSession::new();
        state.generation_token += 1;
        // In-flight encodes become stale as well.
        state.person_seq.applied = state.person_seq.initiated;
        state.clothing_seq.applied = state.clothing_seq.initiated;
        tracing::debug!("session reset");
    }
}
