use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an item within one catalog list
pub type ItemId = u32;

/// Picture shown on a card
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRef {
    /// Image fetched from a URI
    Remote(String),

    /// Image shipped with the app, relative to the assets root
    Bundled(String),
}

impl ImageRef {
    /// Whether the image ships with the app
    pub fn is_local(&self) -> bool {
        matches!(self, ImageRef::Bundled(_))
    }

    pub fn locator(&self) -> &str {
        match self {
            ImageRef::Remote(uri) => uri,
            ImageRef::Bundled(key) => key,
        }
    }
}

/// Key of a bundled sound clip, relative to the assets root
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioRef(String);

impl AudioRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AudioRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AudioRef {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// One flashcard of a topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub id: ItemId,

    /// English word
    pub name: String,

    /// Hebrew word
    pub localized_name: String,

    pub image: ImageRef,

    /// Pronunciation clip; items without one play nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioRef>,
}

impl VocabularyItem {
    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}

/// A vocabulary topic rendered as one flashcard grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// Stable key, also the last segment of the route
    pub key: String,
    pub name: String,
    pub localized_name: String,

    /// Route token, e.g. "/fruits"
    pub route: String,

    pub thumbnail: ImageRef,
    pub items: Vec<VocabularyItem>,
}

impl Topic {
    pub fn item(&self, id: ItemId) -> Option<&VocabularyItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Bilingual title, e.g. "Fruits - פירות"
    pub fn title(&self) -> String {
        format!("{} - {}", self.name, self.localized_name)
    }
}

/// A word/picture pair for the matching game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub id: ItemId,
    pub word: String,
    pub localized_word: String,
    pub image: ImageRef,
}

/// A phrase on the "Say It!" practice screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PronunciationWord {
    pub id: ItemId,
    pub name: String,
    pub localized_name: String,
    pub image: ImageRef,

    /// Card background, e.g. "#4CAF50"
    pub color: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioRef>,
}
