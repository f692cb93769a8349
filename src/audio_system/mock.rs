/// In-memory playback backend
///
/// Records what the controller asks of a device so screens and games can be
/// driven without audio hardware. Completion is fired by hand with
/// [`MockBackend::finish`].

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use super::device::{FinishCallback, PlaybackBackend, Voice};
use crate::catalog::AudioRef;
use crate::error::AudioError;

type LoadHook = Arc<dyn Fn(&AudioRef) + Send + Sync>;

struct VoiceRecord {
    clip: AudioRef,
    started: bool,
    stopped: bool,
    finished: bool,
    dropped: bool,
    on_finished: Option<FinishCallback>,
}

#[derive(Default)]
struct MockState {
    missing: HashSet<AudioRef>,
    corrupt: HashSet<AudioRef>,
    voices: Vec<VoiceRecord>,
    on_load: Option<LoadHook>,
}

/// Backend that plays nothing but remembers everything
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make loading this clip fail as if the file were absent
    pub fn mark_missing(&self, clip: &AudioRef) {
        self.state.lock().missing.insert(clip.clone());
    }

    /// Make loading this clip fail as if the file were undecodable
    pub fn mark_corrupt(&self, clip: &AudioRef) {
        self.state.lock().corrupt.insert(clip.clone());
    }

    /// Run `hook` in the middle of every load, before the voice exists
    pub fn on_load(&self, hook: impl Fn(&AudioRef) + Send + Sync + 'static) {
        self.state.lock().on_load = Some(Arc::new(hook));
    }

    /// Number of load attempts
    pub fn load_count(&self) -> usize {
        self.state.lock().voices.len()
    }

    /// Clips currently audible
    pub fn audible(&self) -> Vec<AudioRef> {
        self.state
            .lock()
            .voices
            .iter()
            .filter(|v| v.started && !v.stopped && !v.finished && !v.dropped)
            .map(|v| v.clip.clone())
            .collect()
    }

    /// Voices not yet freed
    pub fn live_voices(&self) -> usize {
        self.state.lock().voices.iter().filter(|v| !v.dropped).count()
    }

    /// Whether every voice ever created for `clip` has been freed
    pub fn is_freed(&self, clip: &AudioRef) -> bool {
        self.state
            .lock()
            .voices
            .iter()
            .filter(|v| &v.clip == clip)
            .all(|v| v.dropped)
    }

    /// Whether any voice for `clip` was ever made audible
    pub fn was_started(&self, clip: &AudioRef) -> bool {
        self.state
            .lock()
            .voices
            .iter()
            .any(|v| &v.clip == clip && v.started)
    }

    /// Report natural completion of the most recent audible voice for `clip`
    pub fn finish(&self, clip: &AudioRef) -> bool {
        let callback = {
            let mut state = self.state.lock();
            let record = state
                .voices
                .iter_mut()
                .rev()
                .find(|v| &v.clip == clip && v.started && !v.finished && !v.dropped);
            match record {
                Some(record) => {
                    record.finished = true;
                    record.on_finished.take()
                }
                None => None,
            }
        };

        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl PlaybackBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn preload(&self, clips: &[AudioRef]) -> usize {
        let state = self.state.lock();
        clips
            .iter()
            .filter(|clip| !state.missing.contains(*clip) && !state.corrupt.contains(*clip))
            .count()
    }

    fn load(&self, clip: &AudioRef) -> Result<Box<dyn Voice>, AudioError> {
        let hook = self.state.lock().on_load.clone();
        if let Some(hook) = hook {
            hook(clip);
        }

        let mut state = self.state.lock();
        if state.missing.contains(clip) {
            return Err(AudioError::NotFound {
                path: clip.to_string(),
            });
        }
        if state.corrupt.contains(clip) {
            return Err(AudioError::DecodeFailed {
                path: clip.to_string(),
                source: "unrecognized format".into(),
            });
        }

        state.voices.push(VoiceRecord {
            clip: clip.clone(),
            started: false,
            stopped: false,
            finished: false,
            dropped: false,
            on_finished: None,
        });
        Ok(Box::new(MockVoice {
            index: state.voices.len() - 1,
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockVoice {
    index: usize,
    state: Arc<Mutex<MockState>>,
}

impl Voice for MockVoice {
    fn start(&mut self, on_finished: FinishCallback) -> Result<(), AudioError> {
        if let Some(record) = self.state.lock().voices.get_mut(self.index) {
            record.started = true;
            record.on_finished = Some(on_finished);
        }
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(record) = self.state.lock().voices.get_mut(self.index) {
            record.stopped = true;
        }
    }
}

impl Drop for MockVoice {
    fn drop(&mut self) {
        // Drop the observer outside the lock
        let callback = self
            .state
            .lock()
            .voices
            .get_mut(self.index)
            .and_then(|record| {
                record.dropped = true;
                record.on_finished.take()
            });
        drop(callback);
    }
}
