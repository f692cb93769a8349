/// Home and vocabulary menus
use super::{Navigator, Route};
use crate::catalog::{Catalog, Topic};

/// A tappable menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub title: &'static str,
    pub route: Route,
}

/// Landing screen
#[derive(Debug, Default, Clone, Copy)]
pub struct HomeMenu;

impl HomeMenu {
    pub const TITLE: &'static str = "Learn English!";
    pub const SUBTITLE: &'static str = "בואו נלמד אנגלית";
    pub const FOOTER: &'static str = "Learning is fun! - ללמוד זה כיף!";

    pub fn entries(&self) -> Vec<MenuEntry> {
        vec![
            MenuEntry {
                title: "Vocabulary - אוצר מילים",
                route: Route::Vocabulary,
            },
            MenuEntry {
                title: "Match Words - התאם מילים",
                route: Route::Match,
            },
            MenuEntry {
                title: "Say It! - אמור את זה",
                route: Route::Speak,
            },
        ]
    }

    /// Follow entry `index`. Returns false for an index past the end.
    pub fn open(&self, index: usize, nav: &dyn Navigator) -> bool {
        match self.entries().get(index) {
            Some(entry) => {
                nav.navigate(&entry.route);
                true
            }
            None => false,
        }
    }
}

/// Topic picker
#[derive(Debug, Clone, Copy)]
pub struct VocabularyMenu<'a> {
    catalog: &'a Catalog,
}

impl<'a> VocabularyMenu<'a> {
    pub const TITLE: &'static str = "Vocabulary - אוצר מילים";

    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Topic tiles in catalog order
    pub fn tiles(&self) -> &'a [Topic] {
        &self.catalog.topics
    }

    /// Open the topic with `key`. Unknown keys are ignored.
    pub fn open(&self, key: &str, nav: &dyn Navigator) -> bool {
        let Some(topic) = self.catalog.topic(key) else {
            tracing::debug!("No topic named {}", key);
            return false;
        };
        let route = Route::parse(&topic.route).unwrap_or_else(|| Route::Topic(topic.key.clone()));
        nav.navigate(&route);
        true
    }

    pub fn back(&self, nav: &dyn Navigator) {
        nav.navigate(&Route::Home);
    }
}
