/// Match game screen
///
/// Wraps a `MatchGame` with the score line and the congratulation dialog,
/// which appears a moment after the last pair is matched.
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;

use super::{Navigator, Route};
use crate::catalog::{ItemId, MatchPair};
use crate::error::GameError;
use crate::game::{MatchGame, Selection};

pub const DEFAULT_CELEBRATION_DELAY: Duration = Duration::from_millis(1000);

/// Congratulation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Celebration {
    pub title: &'static str,
    pub message: &'static str,
    pub action: &'static str,
}

impl Celebration {
    pub const fn new() -> Self {
        Self {
            title: "Congratulations! - כל הכבוד!",
            message: "You matched all the words! - התאמת את כל המילים!",
            action: "Play Again - שחק שוב",
        }
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct MatchScreen<R = StdRng> {
    game: MatchGame<R>,
    celebration_delay: Duration,
    /// When the last pair was matched
    completed_at: Option<Instant>,
}

impl MatchScreen<StdRng> {
    pub const TITLE: &'static str = "Match Words - התאם מילים";
    pub const RESET_LABEL: &'static str = "Reset Game - התחל מחדש";

    pub fn open(pairs: Vec<MatchPair>) -> Result<Self, GameError> {
        Ok(Self::from_game(MatchGame::new(pairs)?))
    }
}

impl<R: Rng> MatchScreen<R> {
    pub fn from_game(game: MatchGame<R>) -> Self {
        Self {
            game,
            celebration_delay: DEFAULT_CELEBRATION_DELAY,
            completed_at: None,
        }
    }

    pub fn with_celebration_delay(mut self, delay: Duration) -> Self {
        self.celebration_delay = delay;
        self
    }

    pub fn game(&self) -> &MatchGame<R> {
        &self.game
    }

    /// e.g. "Score: 2/4"
    pub fn score_label(&self) -> String {
        format!("Score: {}/{}", self.game.score(), self.game.total())
    }

    pub fn select_word(&mut self, id: ItemId) -> Selection {
        self.select_word_at(id, Instant::now())
    }

    pub fn select_image(&mut self, id: ItemId) -> Selection {
        self.select_image_at(id, Instant::now())
    }

    pub fn select_word_at(&mut self, id: ItemId, now: Instant) -> Selection {
        let selection = self.game.select_word_at(id, now);
        self.note_completion(selection, now);
        selection
    }

    pub fn select_image_at(&mut self, id: ItemId, now: Instant) -> Selection {
        let selection = self.game.select_image_at(id, now);
        self.note_completion(selection, now);
        selection
    }

    fn note_completion(&mut self, selection: Selection, now: Instant) {
        if let Selection::Matched { completed: true, .. } = selection {
            self.completed_at = Some(now);
        }
    }

    /// Advance scheduled clears
    pub fn tick(&mut self, now: Instant) -> bool {
        self.game.tick(now)
    }

    /// The congratulation dialog, once its delay has passed
    pub fn celebration(&self, now: Instant) -> Option<Celebration> {
        let completed_at = self.completed_at?;
        (now >= completed_at + self.celebration_delay).then(Celebration::new)
    }

    /// Dialog button and reset button
    pub fn play_again(&mut self) {
        self.completed_at = None;
        self.game.reset();
    }

    pub fn back(&self, nav: &dyn Navigator) {
        nav.navigate(&Route::Home);
    }
}
