/// Playback lifecycle state machine
///
/// Represents the lifecycle of one sound clip with clear state transitions:
/// `Created → Loaded → Playing → {Finished | Released}`.

/// State of a single playback
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlaybackState {
    /// Handle exists, nothing decoded yet
    Created,

    /// Clip decoded and ready to start
    Loaded,

    /// Clip is audible
    Playing,

    /// Clip reached its end and freed itself
    Finished,

    /// Caller or a newer clip released it early
    Released,
}

impl PlaybackState {
    /// Check if the clip is audible
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }

    /// Check if the resource has been freed
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlaybackState::Finished | PlaybackState::Released)
    }

    /// Get a human-readable description of the state
    pub fn description(&self) -> &'static str {
        match self {
            PlaybackState::Created => "Created",
            PlaybackState::Loaded => "Loaded",
            PlaybackState::Playing => "Playing",
            PlaybackState::Finished => "Finished",
            PlaybackState::Released => "Released",
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState::Created
    }
}

/// State transition results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The step was attempted out of order
    OutOfOrder {
        from: PlaybackState,
        to: PlaybackState,
    },

    /// The playback has already ended
    AlreadyEnded(PlaybackState),
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionError::OutOfOrder { from, to } => write!(
                f,
                "Cannot move playback from {} to {}",
                from.description(),
                to.description()
            ),
            TransitionError::AlreadyEnded(state) => {
                write!(f, "Playback already ended ({})", state.description())
            }
        }
    }
}

impl std::error::Error for TransitionError {}

/// State machine for playback transitions
#[derive(Debug, Default)]
pub struct PlaybackStateMachine {
    state: PlaybackState,
}

impl PlaybackStateMachine {
    /// Create a new state machine in the Created state
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Created,
        }
    }

    /// Get the current state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Transition from Created to Loaded
    pub fn mark_loaded(&mut self) -> Result<(), TransitionError> {
        self.advance(PlaybackState::Created, PlaybackState::Loaded)
    }

    /// Transition from Loaded to Playing
    pub fn mark_playing(&mut self) -> Result<(), TransitionError> {
        self.advance(PlaybackState::Loaded, PlaybackState::Playing)
    }

    /// Natural end of the clip. Returns false when already terminal.
    pub fn finish(&mut self) -> bool {
        self.end(PlaybackState::Finished)
    }

    /// Early release. Returns false when already terminal.
    pub fn release(&mut self) -> bool {
        self.end(PlaybackState::Released)
    }

    fn advance(&mut self, from: PlaybackState, to: PlaybackState) -> Result<(), TransitionError> {
        if self.state.is_terminal() {
            return Err(TransitionError::AlreadyEnded(self.state));
        }
        if self.state != from {
            return Err(TransitionError::OutOfOrder {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }

    fn end(&mut self, terminal: PlaybackState) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = terminal;
        true
    }
}
