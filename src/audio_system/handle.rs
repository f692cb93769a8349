/// Playback handle
///
/// A clonable view of one playback slot. The slot owns the loaded voice and
/// its lifecycle state; whoever ends the playback first (natural completion,
/// the caller, or a newer clip) frees the voice and every later attempt is a
/// no-op.

use std::sync::Arc;

use parking_lot::Mutex;

use super::device::{FinishCallback, Voice};
use crate::catalog::AudioRef;
use crate::error::AudioError;
use crate::state::{PlaybackState, PlaybackStateMachine};

struct Slot {
    clip: AudioRef,
    machine: PlaybackStateMachine,
    voice: Option<Box<dyn Voice>>,
}

/// Handle to a clip started by an `AudioController`
#[derive(Clone)]
pub struct PlaybackHandle {
    id: u64,
    slot: Arc<Mutex<Slot>>,
}

impl PlaybackHandle {
    pub(crate) fn new(id: u64, clip: AudioRef) -> Self {
        Self {
            id,
            slot: Arc::new(Mutex::new(Slot {
                clip,
                machine: PlaybackStateMachine::new(),
                voice: None,
            })),
        }
    }

    /// Sequence number assigned by the controller
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn clip(&self) -> AudioRef {
        self.slot.lock().clip.clone()
    }

    pub fn state(&self) -> PlaybackState {
        self.slot.lock().machine.state()
    }

    pub fn is_playing(&self) -> bool {
        self.state().is_playing()
    }

    /// Attach a loaded voice (Created → Loaded)
    pub(crate) fn attach(&self, voice: Box<dyn Voice>) -> Result<(), AudioError> {
        let mut slot = self.slot.lock();
        slot.machine
            .mark_loaded()
            .map_err(|e| AudioError::PlaybackFailed(Box::new(e)))?;
        slot.voice = Some(voice);
        Ok(())
    }

    /// Start the attached voice (Loaded → Playing)
    pub(crate) fn start(&self) -> Result<(), AudioError> {
        // Start outside the lock: the completion observer locks the slot too
        let mut voice = self
            .slot
            .lock()
            .voice
            .take()
            .ok_or_else(|| AudioError::PlaybackFailed("no voice attached".into()))?;

        let weak = Arc::downgrade(&self.slot);
        let id = self.id;
        let on_finished: FinishCallback = Box::new(move || {
            if let Some(slot) = weak.upgrade() {
                finish_slot(id, &slot);
            }
        });

        if let Err(e) = voice.start(on_finished) {
            self.slot.lock().machine.release();
            voice.stop();
            return Err(e);
        }

        let mut slot = self.slot.lock();
        if slot.machine.state().is_terminal() {
            // Ended while starting; the voice is no longer wanted
            drop(slot);
            voice.stop();
            return Ok(());
        }
        slot.machine
            .mark_playing()
            .map_err(|e| AudioError::PlaybackFailed(Box::new(e)))?;
        slot.voice = Some(voice);
        Ok(())
    }

    /// Stop the clip and free its resource.
    ///
    /// Safe to call any number of times; returns false when the playback had
    /// already finished or been released.
    pub fn release(&self) -> bool {
        let mut slot = self.slot.lock();
        if !slot.machine.release() {
            return false;
        }
        let voice = slot.voice.take();
        let clip = slot.clip.clone();
        drop(slot);

        if let Some(mut voice) = voice {
            voice.stop();
        }
        tracing::debug!("Released playback #{} ({})", self.id, clip);
        true
    }
}

fn finish_slot(id: u64, slot: &Mutex<Slot>) {
    let mut guard = slot.lock();
    if !guard.machine.finish() {
        return;
    }
    let voice = guard.voice.take();
    let clip = guard.clip.clone();
    drop(guard);

    drop(voice);
    tracing::debug!("Playback #{} finished ({})", id, clip);
}

impl std::fmt::Debug for PlaybackHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("PlaybackHandle")
            .field("id", &self.id)
            .field("clip", &slot.clip)
            .field("state", &slot.machine.state())
            .finish()
    }
}
