/// Playback device abstraction
///
/// The controller only ever talks to a `PlaybackBackend`: load a clip into a
/// `Voice`, start it with a completion observer, stop it. Dropping a voice
/// frees its resource.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use super::mode::AudioMode;
use super::player::RodioBackend;
use crate::catalog::AudioRef;
use crate::error::AudioError;

/// Completion observer invoked once when a clip plays to its end
pub type FinishCallback = Box<dyn FnOnce() + Send + 'static>;

/// One loaded clip on a playback device
pub trait Voice: Send {
    /// Begin playback and register the completion observer
    fn start(&mut self, on_finished: FinishCallback) -> Result<(), AudioError>;

    /// Silence the clip immediately
    fn stop(&mut self);
}

/// A device that can turn clip references into voices
pub trait PlaybackBackend: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Load and decode a clip without making it audible
    fn load(&self, clip: &AudioRef) -> Result<Box<dyn Voice>, AudioError>;

    /// Warm up clips ahead of the first tap. Returns how many are ready.
    fn preload(&self, _clips: &[AudioRef]) -> usize {
        0
    }

    /// Whether this backend swallows all playback
    fn is_muted(&self) -> bool {
        false
    }
}

/// Shared handle to the process-wide playback device
#[derive(Clone)]
pub struct AudioDevice {
    backend: Arc<dyn PlaybackBackend>,
}

impl AudioDevice {
    pub fn from_backend(backend: Arc<dyn PlaybackBackend>) -> Self {
        Self { backend }
    }

    /// Device that plays nothing, used when no output is available
    pub fn muted() -> Self {
        Self::from_backend(Arc::new(NullBackend))
    }

    /// Open the default system output
    pub fn open_default(assets_root: &Path, mode: AudioMode) -> Result<Self, AudioError> {
        let backend = RodioBackend::open(assets_root, mode)?;
        Ok(Self::from_backend(Arc::new(backend)))
    }

    pub fn is_muted(&self) -> bool {
        self.backend.is_muted()
    }

    pub fn name(&self) -> &str {
        self.backend.name()
    }

    pub fn preload(&self, clips: &[AudioRef]) -> usize {
        self.backend.preload(clips)
    }

    pub(crate) fn backend(&self) -> &dyn PlaybackBackend {
        self.backend.as_ref()
    }
}

impl std::fmt::Debug for AudioDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioDevice")
            .field("backend", &self.backend.name())
            .finish()
    }
}

static DEVICE: OnceLock<AudioDevice> = OnceLock::new();

/// Configure the playback subsystem once per process.
///
/// The first call opens the default output; later calls return the same
/// device and ignore their arguments. When no output can be opened the
/// failure is logged once and a muted device is returned, so the app keeps
/// working without sound.
pub fn configure(assets_root: &Path, mode: AudioMode) -> AudioDevice {
    DEVICE
        .get_or_init(|| match AudioDevice::open_default(assets_root, mode) {
            Ok(device) => {
                tracing::info!("✓ Audio configured on {}", device.name());
                device
            }
            Err(e) => {
                tracing::warn!("Audio unavailable, continuing muted: {}", e);
                AudioDevice::muted()
            }
        })
        .clone()
}

/// Backend for muted mode
#[derive(Debug, Default)]
pub struct NullBackend;

impl PlaybackBackend for NullBackend {
    fn name(&self) -> &str {
        "muted"
    }

    fn load(&self, _clip: &AudioRef) -> Result<Box<dyn Voice>, AudioError> {
        Err(AudioError::DeviceUnavailable("audio is muted".to_string()))
    }

    fn is_muted(&self) -> bool {
        true
    }
}
