use thiserror::Error;

/// Library-level errors using thiserror for structured error handling.
///
/// None of these are fatal to the learning flow: audio failures degrade to
/// silence and invalid game input is ignored before it ever becomes an error.

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio resource not found: {path}")]
    NotFound { path: String },

    #[error("Failed to load audio resource: {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to decode audio resource: {path}")]
    DecodeFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Audio output device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Audio playback failed")]
    PlaybackFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to load catalog from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog")]
    Parse(#[source] serde_json::Error),

    #[error("Duplicate topic: {0}")]
    DuplicateTopic(String),

    #[error("Duplicate item id {id} in topic {topic}")]
    DuplicateId { topic: String, id: u32 },

    #[error("Topic has no items: {0}")]
    EmptyTopic(String),

    #[error("Match game needs at least one pair")]
    EmptyMatchSet,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cannot start a match game without pairs")]
    EmptyCatalog,

    #[error("Duplicate match pair id: {0}")]
    DuplicatePair(u32),
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
