/// State management module
///
/// Lifecycle state machines shared by the audio and game layers.

pub mod playback_state;

// Re-export commonly used types
pub use playback_state::{PlaybackState, PlaybackStateMachine, TransitionError};
