/// Match game module
///
/// ```text
/// new_game ──> InProgress ──(last pair matched)──> Complete ──reset──┐
///                  ▲                                                 │
///                  └─────────────────────────────────────────────────┘
///
/// per pair:  Idle ──tap──> AwaitingPair ──tap──> Evaluating ──tick──> Idle
/// ```
pub mod match_game;
pub mod shuffle;

pub use match_game::{
    Evaluation, GamePhase, MatchGame, MatchGameState, Outcome, PairPhase, Selection,
    DEFAULT_FEEDBACK_DELAY,
};
pub use shuffle::{is_permutation_of, shuffled_ids};
