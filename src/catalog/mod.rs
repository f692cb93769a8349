/// Learning content: vocabulary topics, match pairs and practice words
///
/// Content is data, not code: every topic is rendered by the same flashcard
/// screen, so adding a topic means adding JSON, never a new screen.

pub mod store;
pub mod types;

pub use store::{AssetIssue, Catalog};
pub use types::{AudioRef, ImageRef, ItemId, MatchPair, PronunciationWord, Topic, VocabularyItem};
