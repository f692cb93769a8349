/// Screens
///
/// Headless screen models: each holds what a view needs to render and
/// reacts to taps. Leaving a screen goes through a `Navigator`; dropping a
/// screen releases any clip it started.
///
/// ```text
/// "/" HomeMenu ──> "/vocabulary" VocabularyMenu ──> "/<topic>" FlashcardScreen
///     │
///     ├──> "/match" MatchScreen
///     └──> "/speak" PronunciationScreen
/// ```
use std::fmt;

use parking_lot::Mutex;

pub mod flashcards;
pub mod match_screen;
pub mod menu;
pub mod pronunciation;

pub use flashcards::FlashcardScreen;
pub use match_screen::{Celebration, MatchScreen};
pub use menu::{HomeMenu, MenuEntry, VocabularyMenu};
pub use pronunciation::PronunciationScreen;

/// Navigation target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Vocabulary,
    /// A vocabulary topic by key
    Topic(String),
    Match,
    Speak,
}

impl Route {
    /// Route token, e.g. "/fruits"
    pub fn token(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Vocabulary => "/vocabulary".to_string(),
            Route::Topic(key) => format!("/{}", key),
            Route::Match => "/match".to_string(),
            Route::Speak => "/speak".to_string(),
        }
    }

    /// Parse a route token. Any other single segment is a topic.
    pub fn parse(token: &str) -> Option<Self> {
        let segment = token.trim().strip_prefix('/')?;
        match segment {
            "" => Some(Route::Home),
            "vocabulary" => Some(Route::Vocabulary),
            "match" => Some(Route::Match),
            "speak" => Some(Route::Speak),
            key if !key.contains('/') => Some(Route::Topic(key.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// The one capability screens need from the app shell
pub trait Navigator {
    fn navigate(&self, route: &Route);
}

/// Navigator that just remembers where it was sent
#[derive(Debug, Default)]
pub struct RouteHistory {
    routes: Mutex<Vec<Route>>,
}

impl RouteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent route, or Home before any navigation
    pub fn current(&self) -> Route {
        self.routes.lock().last().cloned().unwrap_or(Route::Home)
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }
}

impl Navigator for RouteHistory {
    fn navigate(&self, route: &Route) {
        tracing::debug!("Navigate to {}", route);
        self.routes.lock().push(route.clone());
    }
}
