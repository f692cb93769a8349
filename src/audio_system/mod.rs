/// Audio system module
///
/// Plays pronunciation clips with strict resource hygiene:
/// - One process-wide playback device, configured once
/// - One active clip per controller; a new clip replaces the old one
/// - Clips free themselves on natural completion
///
/// ## Architecture
///
/// ```text
/// configure() ──> AudioDevice (Arc<dyn PlaybackBackend>)
///                   ├── RodioBackend   system output
///                   ├── NullBackend    muted
///                   └── MockBackend    headless
///
/// AudioController (one per screen)
///   └── PlaybackHandle  Created → Loaded → Playing → Finished | Released
///         └── Voice     decoded clip with AudioMode effects
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// use audio_system::{configure, AudioController, AudioMode};
///
/// let device = configure(Path::new("assets"), AudioMode::default());
/// let controller = AudioController::new(device);
///
/// // Returns None when the clip is missing; the app carries on silently
/// let handle = controller.play(&AudioRef::new("sounds/fruits/Apple.mp3"));
///
/// // Leaving the screen drops the controller and releases the clip
/// drop(controller);
/// ```
pub mod controller;
pub mod device;
pub mod handle;
pub mod mock;
pub mod mode;
pub mod player;

// Re-export commonly used types
pub use controller::AudioController;
pub use device::{configure, AudioDevice, FinishCallback, NullBackend, PlaybackBackend, Voice};
pub use handle::PlaybackHandle;
pub use mock::MockBackend;
pub use mode::AudioMode;
pub use player::RodioBackend;
