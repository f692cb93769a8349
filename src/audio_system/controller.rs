/// Audio controller
///
/// Serializes playback on one device: at most one clip is active per
/// controller, a new `play` supersedes the previous clip, and dropping the
/// controller releases whatever it still owns.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::device::AudioDevice;
use super::handle::PlaybackHandle;
use crate::catalog::AudioRef;

/// Single-clip player owned by one screen
pub struct AudioController {
    device: AudioDevice,

    /// Clip started by the latest successful `play`
    current: Mutex<Option<PlaybackHandle>>,

    /// Bumped by every `play`; a load that finishes under an older value lost the race
    generation: AtomicU64,
}

impl AudioController {
    pub fn new(device: AudioDevice) -> Self {
        Self {
            device,
            current: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn device(&self) -> &AudioDevice {
        &self.device
    }

    /// Play a clip, replacing whatever this controller was playing.
    ///
    /// Returns `None` when the clip could not be loaded or started, when the
    /// device is muted, or when a newer `play` overtook this one while it was
    /// loading. Failures are logged and never escalate.
    pub fn play(&self, clip: &AudioRef) -> Option<PlaybackHandle> {
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let previous = self.current.lock().take();
        if let Some(previous) = previous {
            previous.release();
        }

        if self.device.is_muted() {
            tracing::debug!("Audio muted, skipping {}", clip);
            return None;
        }

        let handle = PlaybackHandle::new(id, clip.clone());
        let voice = match self.device.backend().load(clip) {
            Ok(voice) => voice,
            Err(e) => {
                tracing::warn!("Failed to load audio: {}", e);
                return None;
            }
        };
        if let Err(e) = handle.attach(voice) {
            tracing::warn!("Failed to prepare {}: {}", clip, e);
            handle.release();
            return None;
        }

        let mut current = self.current.lock();
        if self.generation.load(Ordering::SeqCst) != id {
            drop(current);
            handle.release();
            tracing::debug!("Playback #{} superseded while loading ({})", id, clip);
            return None;
        }

        if let Err(e) = handle.start() {
            drop(current);
            handle.release();
            tracing::warn!("Failed to start {}: {}", clip, e);
            return None;
        }

        *current = Some(handle.clone());
        tracing::info!("▶ Playing {} (#{})", clip, id);
        Some(handle)
    }

    /// Play the clip if there is one. Items without audio are a no-op.
    pub fn play_optional(&self, clip: Option<&AudioRef>) -> Option<PlaybackHandle> {
        clip.and_then(|clip| self.play(clip))
    }

    /// Release the active clip. Returns true if something was still playing.
    pub fn stop(&self) -> bool {
        let current = self.current.lock().take();
        current.map(|handle| handle.release()).unwrap_or(false)
    }

    /// Active clip, if it has not finished or been released
    pub fn current(&self) -> Option<PlaybackHandle> {
        self.current
            .lock()
            .as_ref()
            .filter(|handle| !handle.state().is_terminal())
            .cloned()
    }

    pub fn is_playing(&self) -> bool {
        self.current().map(|h| h.is_playing()).unwrap_or(false)
    }
}

impl Drop for AudioController {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for AudioController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioController")
            .field("device", &self.device)
            .field("current", &self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio_system::MockBackend;
    use crate::state::PlaybackState;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    fn controller() -> (AudioController, MockBackend) {
        let mock = MockBackend::new();
        let device = AudioDevice::from_backend(Arc::new(mock.clone()));
        (AudioController::new(device), mock)
    }

    #[test]
    fn test_play_starts_clip() {
        let (controller, mock) = controller();
        let clip = AudioRef::new("sounds/animals/Dog.mp3");

        let handle = controller.play(&clip).unwrap();
        assert_eq!(handle.state(), PlaybackState::Playing);
        assert!(controller.is_playing());
        assert_eq!(mock.audible(), vec![clip]);
    }

    #[test]
    fn test_new_play_supersedes_previous() {
        let (controller, mock) = controller();
        let a = AudioRef::new("sounds/animals/Dog.mp3");
        let b = AudioRef::new("sounds/animals/Cat.mp3");

        let first = controller.play(&a).unwrap();
        let second = controller.play(&b).unwrap();

        assert_eq!(first.state(), PlaybackState::Released);
        assert_eq!(second.state(), PlaybackState::Playing);
        assert_eq!(mock.audible(), vec![b]);
        assert!(mock.is_freed(&a));
        assert_eq!(mock.live_voices(), 1);
    }

    #[test]
    fn test_missing_clip_leaves_nothing_behind() {
        let (controller, mock) = controller();
        let missing = AudioRef::new("sounds/animals/Unicorn.mp3");
        let valid = AudioRef::new("sounds/animals/Horse.mp3");
        mock.mark_missing(&missing);

        assert!(controller.play(&missing).is_none());
        assert!(controller.current().is_none());
        assert_eq!(mock.live_voices(), 0);

        assert!(controller.play(&valid).is_some());
        assert_eq!(mock.audible(), vec![valid]);
    }

    #[test]
    fn test_corrupt_clip_returns_none() {
        let (controller, mock) = controller();
        let corrupt = AudioRef::new("sounds/colors/Pink.mp3");
        mock.mark_corrupt(&corrupt);

        assert!(controller.play(&corrupt).is_none());
        assert!(!controller.is_playing());
    }

    #[test]
    fn test_completion_releases_without_caller() {
        let (controller, mock) = controller();
        let clip = AudioRef::new("sounds/fruits/Banana.mp3");

        let handle = controller.play(&clip).unwrap();
        assert!(mock.finish(&clip));

        assert_eq!(handle.state(), PlaybackState::Finished);
        assert!(mock.is_freed(&clip));
        assert!(controller.current().is_none());

        // Late release and stop are both harmless
        assert!(!handle.release());
        assert!(!controller.stop());
    }

    #[test]
    fn test_stop_and_drop_release() {
        let (controller, mock) = controller();
        let a = AudioRef::new("sounds/toys/Ball.mp3");
        let b = AudioRef::new("sounds/toys/Kite.mp3");

        controller.play(&a).unwrap();
        assert!(controller.stop());
        assert!(mock.audible().is_empty());

        controller.play(&b).unwrap();
        drop(controller);
        assert!(mock.audible().is_empty());
        assert_eq!(mock.live_voices(), 0);
    }

    #[test]
    fn test_play_optional_without_clip() {
        let (controller, mock) = controller();
        assert!(controller.play_optional(None).is_none());
        assert_eq!(mock.load_count(), 0);
    }

    #[test]
    fn test_superseded_load_never_starts() {
        let mock = MockBackend::new();
        let device = AudioDevice::from_backend(Arc::new(mock.clone()));
        let controller = Arc::new(AudioController::new(device));
        let a = AudioRef::new("sounds/weather/Rain.mp3");
        let b = AudioRef::new("sounds/weather/Snow.mp3");

        // A newer play lands while A is still loading
        let weak = Arc::downgrade(&controller);
        let fired = Arc::new(AtomicBool::new(false));
        let (hook_a, hook_b) = (a.clone(), b.clone());
        mock.on_load(move |clip| {
            if clip == &hook_a && !fired.swap(true, Ordering::SeqCst) {
                if let Some(controller) = weak.upgrade() {
                    assert!(controller.play(&hook_b).is_some());
                }
            }
        });

        assert!(controller.play(&a).is_none());
        assert_eq!(mock.audible(), vec![b.clone()]);
        assert!(!mock.was_started(&a));
        assert!(mock.is_freed(&a));
        assert_eq!(controller.current().map(|h| h.clip()), Some(b));
    }

    #[test]
    fn test_muted_device_plays_nothing() {
        let controller = AudioController::new(AudioDevice::muted());
        assert!(controller.play(&AudioRef::new("sounds/fruits/Apple.mp3")).is_none());
        assert!(!controller.is_playing());
    }
}
