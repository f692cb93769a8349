/// Word-to-picture matching game
///
/// Shuffles the words and the pictures independently and lets the player
/// pick one of each. A picked pair stays visible for a short feedback delay
/// and is then cleared by `tick`; the game is complete once every pair has
/// been matched.

use std::collections::{BTreeSet, HashSet};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::shuffle::shuffled_ids;
use crate::catalog::{ItemId, MatchPair};
use crate::error::GameError;
use crate::messaging::{EventBus, GameEvent};

/// Default time an evaluated pair stays on screen
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(500);

/// Overall progress of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    InProgress,
    /// Every pair matched; only left through reset
    Complete,
}

/// Progress of the current pair attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairPhase {
    /// Nothing selected
    Idle,
    /// One side selected
    AwaitingPair,
    /// Both sides selected, result still visible
    Evaluating,
}

/// Result of a pair evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    Mismatched,
}

/// An evaluated pair waiting to be cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub word: ItemId,
    pub image: ItemId,
    pub outcome: Outcome,

    /// When the pending selections get cleared
    pub clear_at: Instant,
}

/// What a tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Unknown or already matched card, or a pair is still being shown
    Ignored,

    /// Stored; waiting for the other side
    Pending,

    /// Word and picture belong together
    Matched { id: ItemId, completed: bool },

    Mismatched { word: ItemId, image: ItemId },
}

/// Renderable state of a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGameState {
    /// Word column, top to bottom
    pub word_order: Vec<ItemId>,

    /// Picture column, top to bottom
    pub image_order: Vec<ItemId>,

    pub pending_word: Option<ItemId>,
    pub pending_image: Option<ItemId>,

    /// Ids of solved pairs
    pub matched: BTreeSet<ItemId>,

    /// Always equal to `matched.len()`
    pub score: usize,
}

/// Matching game over a fixed set of pairs
#[derive(Debug)]
pub struct MatchGame<R = StdRng> {
    pairs: Vec<MatchPair>,
    state: MatchGameState,
    evaluation: Option<Evaluation>,
    /// Set once the completion event has fired for this game
    completion_reported: bool,
    feedback_delay: Duration,
    rng: R,
    events: Option<EventBus>,
}

impl MatchGame<StdRng> {
    /// Start a game with an entropy-seeded shuffle
    pub fn new(pairs: Vec<MatchPair>) -> Result<Self, GameError> {
        Self::with_rng(pairs, StdRng::from_entropy())
    }
}

impl<R: Rng> MatchGame<R> {
    /// Start a game that shuffles with `rng`
    pub fn with_rng(pairs: Vec<MatchPair>, rng: R) -> Result<Self, GameError> {
        if pairs.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for pair in &pairs {
            if !seen.insert(pair.id) {
                return Err(GameError::DuplicatePair(pair.id));
            }
        }

        let mut game = Self {
            pairs,
            state: MatchGameState {
                word_order: Vec::new(),
                image_order: Vec::new(),
                pending_word: None,
                pending_image: None,
                matched: BTreeSet::new(),
                score: 0,
            },
            evaluation: None,
            completion_reported: false,
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
            rng,
            events: None,
        };
        game.shuffle();
        Ok(game)
    }

    /// Set how long an evaluated pair stays visible
    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    /// Publish game events on `bus`
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Reshuffle both columns and forget all progress
    pub fn new_game(&mut self) -> &MatchGameState {
        if self.evaluation.is_some() {
            tracing::debug!("Cancelled scheduled selection clear");
        }
        self.shuffle();
        self.publish(GameEvent::Reset);
        tracing::debug!("New match game with {} pairs", self.pairs.len());
        &self.state
    }

    /// Same as `new_game`; also cancels a pending clear
    pub fn reset(&mut self) -> &MatchGameState {
        self.new_game()
    }

    fn shuffle(&mut self) {
        self.state.word_order = shuffled_ids(&self.pairs, &mut self.rng);
        self.state.image_order = shuffled_ids(&self.pairs, &mut self.rng);
        self.state.pending_word = None;
        self.state.pending_image = None;
        self.state.matched.clear();
        self.state.score = 0;
        self.evaluation = None;
        self.completion_reported = false;
    }

    pub fn select_word(&mut self, id: ItemId) -> Selection {
        self.select_word_at(id, Instant::now())
    }

    pub fn select_image(&mut self, id: ItemId) -> Selection {
        self.select_image_at(id, Instant::now())
    }

    /// Tap a word card at time `now`
    pub fn select_word_at(&mut self, id: ItemId, now: Instant) -> Selection {
        if !self.accepts(id, now) {
            return Selection::Ignored;
        }
        if self.state.pending_word == Some(id) {
            return Selection::Pending;
        }

        self.state.pending_word = Some(id);
        self.publish(GameEvent::WordSelected { id });

        match self.state.pending_image {
            Some(image) => self.evaluate(id, image, now),
            None => Selection::Pending,
        }
    }

    /// Tap a picture card at time `now`
    pub fn select_image_at(&mut self, id: ItemId, now: Instant) -> Selection {
        if !self.accepts(id, now) {
            return Selection::Ignored;
        }
        if self.state.pending_image == Some(id) {
            return Selection::Pending;
        }

        self.state.pending_image = Some(id);
        self.publish(GameEvent::ImageSelected { id });

        match self.state.pending_word {
            Some(word) => self.evaluate(word, id, now),
            None => Selection::Pending,
        }
    }

    fn accepts(&mut self, id: ItemId, now: Instant) -> bool {
        self.tick(now);
        self.evaluation.is_none() && self.pair(id).is_some() && !self.state.matched.contains(&id)
    }

    fn evaluate(&mut self, word: ItemId, image: ItemId, now: Instant) -> Selection {
        let outcome = if word == image {
            Outcome::Matched
        } else {
            Outcome::Mismatched
        };
        self.evaluation = Some(Evaluation {
            word,
            image,
            outcome,
            clear_at: now + self.feedback_delay,
        });

        if outcome == Outcome::Mismatched {
            tracing::debug!("No match: word {} / picture {}", word, image);
            self.publish(GameEvent::Mismatched { word, image });
            return Selection::Mismatched { word, image };
        }

        self.state.matched.insert(word);
        self.state.score = self.state.matched.len();
        tracing::debug!("Matched pair {} ({}/{})", word, self.state.score, self.pairs.len());
        self.publish(GameEvent::Matched {
            id: word,
            score: self.state.score,
        });

        let completed = self.state.matched.len() == self.pairs.len() && !self.completion_reported;
        if completed {
            self.completion_reported = true;
            tracing::info!("✓ All {} pairs matched", self.state.score);
            self.publish(GameEvent::Completed {
                score: self.state.score,
            });
        }

        Selection::Matched { id: word, completed }
    }

    /// Run the scheduled clear if it is due. Returns true if it ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.evaluation {
            Some(evaluation) if now >= evaluation.clear_at => {
                self.evaluation = None;
                self.state.pending_word = None;
                self.state.pending_image = None;
                self.publish(GameEvent::SelectionCleared);
                true
            }
            _ => false,
        }
    }

    fn publish(&self, event: GameEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }

    pub fn state(&self) -> &MatchGameState {
        &self.state
    }

    /// The pair currently on display after a tap, if any
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    pub fn phase(&self) -> GamePhase {
        if self.state.matched.len() == self.pairs.len() {
            GamePhase::Complete
        } else {
            GamePhase::InProgress
        }
    }

    pub fn pair_phase(&self) -> PairPhase {
        if self.evaluation.is_some() {
            PairPhase::Evaluating
        } else if self.state.pending_word.is_some() || self.state.pending_image.is_some() {
            PairPhase::AwaitingPair
        } else {
            PairPhase::Idle
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == GamePhase::Complete
    }

    pub fn pair(&self, id: ItemId) -> Option<&MatchPair> {
        self.pairs.iter().find(|pair| pair.id == id)
    }

    /// Pairs in catalog order
    pub fn pairs(&self) -> &[MatchPair] {
        &self.pairs
    }

    /// Word column in presentation order
    pub fn words(&self) -> impl Iterator<Item = &MatchPair> + '_ {
        self.state.word_order.iter().filter_map(|id| self.pair(*id))
    }

    /// Picture column in presentation order
    pub fn images(&self) -> impl Iterator<Item = &MatchPair> + '_ {
        self.state.image_order.iter().filter_map(|id| self.pair(*id))
    }

    pub fn is_matched(&self, id: ItemId) -> bool {
        self.state.matched.contains(&id)
    }

    pub fn score(&self) -> usize {
        self.state.score
    }

    pub fn total(&self) -> usize {
        self.pairs.len()
    }

    pub fn feedback_delay(&self) -> Duration {
        self.feedback_delay
    }
}
