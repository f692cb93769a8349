//! Learn English
//!
//! Core of a children's English/Hebrew vocabulary app: a catalog of topics
//! rendered as flashcard grids that speak each word, a word-to-picture
//! matching game and a "Say It!" practice screen.
//!
//! - [`audio_system`] plays one clip at a time per screen and frees every clip
//!   it starts, on completion or when the screen goes away
//! - [`game`] holds the matching game state machine
//! - [`screens`] are headless screen models driven by taps and a [`screens::Navigator`]

pub mod audio_system;
pub mod catalog;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod messaging;
pub mod screens;
pub mod slug;
pub mod state;
