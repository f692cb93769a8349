/// Process-wide playback mode
///
/// Effects applied to every clip the device plays: volume, optional fade in
/// and an optional hard cap on clip length.

use std::time::Duration;

use rodio::Source;

/// Playback settings applied when the device is configured
#[derive(Debug, Clone, PartialEq)]
pub struct AudioMode {
    /// Volume multiplier (0.0-1.0)
    pub volume: f32,

    /// Fade in duration in milliseconds
    pub fade_in_ms: Option<u64>,

    /// Maximum playback duration in milliseconds
    pub limit_ms: Option<u64>,
}

impl Default for AudioMode {
    fn default() -> Self {
        Self {
            volume: 1.0,
            fade_in_ms: None,
            limit_ms: Some(10_000), // pronunciation clips are short
        }
    }
}

impl AudioMode {
    /// Create a mode with no effects at full volume
    pub fn none() -> Self {
        Self {
            volume: 1.0,
            fade_in_ms: None,
            limit_ms: None,
        }
    }

    /// Set fade in duration
    pub fn with_fade_in(mut self, ms: u64) -> Self {
        self.fade_in_ms = Some(ms);
        self
    }

    /// Set volume
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Set time limit
    pub fn with_limit(mut self, ms: u64) -> Self {
        self.limit_ms = Some(ms);
        self
    }

    /// Wrap a decoded clip with the configured effects
    pub(crate) fn apply<S>(&self, source: S) -> Box<dyn Source<Item = i16> + Send>
    where
        S: Source<Item = i16> + Send + 'static,
    {
        // Each transformation returns a different type, so we use dynamic dispatch
        let mut boxed: Box<dyn Source<Item = i16> + Send> = Box::new(source);

        if let Some(limit_ms) = self.limit_ms {
            boxed = Box::new(boxed.take_duration(Duration::from_millis(limit_ms)));
        }

        if let Some(fade_in_ms) = self.fade_in_ms {
            boxed = Box::new(boxed.fade_in(Duration::from_millis(fade_in_ms)));
        }

        boxed
    }
}
