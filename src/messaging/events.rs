/// Match game events
///
/// Published by `MatchGame` for whatever renders it. Events are past tense
/// and carry only catalog ids; the renderer looks the pairs up itself.
use crate::catalog::ItemId;

/// Something that happened in a match game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A word card became the pending word
    WordSelected { id: ItemId },

    /// A picture card became the pending picture
    ImageSelected { id: ItemId },

    /// The pending word and picture were the same pair
    Matched { id: ItemId, score: usize },

    /// The pending word and picture did not belong together
    Mismatched { word: ItemId, image: ItemId },

    /// The evaluated selections were cleared after the feedback delay
    SelectionCleared,

    /// Every pair is matched; fired once per game
    Completed { score: usize },

    /// A fresh game was shuffled
    Reset,
}

impl GameEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            GameEvent::WordSelected { id } => format!("Word {} selected", id),
            GameEvent::ImageSelected { id } => format!("Picture {} selected", id),
            GameEvent::Matched { id, score } => format!("Pair {} matched (score {})", id, score),
            GameEvent::Mismatched { word, image } => {
                format!("Word {} does not match picture {}", word, image)
            }
            GameEvent::SelectionCleared => "Selection cleared".to_string(),
            GameEvent::Completed { score } => format!("All {} pairs matched", score),
            GameEvent::Reset => "New game".to_string(),
        }
    }

    /// Whether this event ends a pair attempt
    pub fn is_outcome(&self) -> bool {
        matches!(self, GameEvent::Matched { .. } | GameEvent::Mismatched { .. })
    }
}
