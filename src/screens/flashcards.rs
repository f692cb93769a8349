/// Flashcard grid
///
/// One screen for every vocabulary topic. Tapping a card opens the detail
/// panel and plays the card's clip; the sound button replays it.
use super::{Navigator, Route};
use crate::audio_system::{AudioController, AudioDevice, PlaybackHandle};
use crate::catalog::{ItemId, Topic, VocabularyItem};

#[derive(Debug)]
pub struct FlashcardScreen {
    topic: Topic,
    /// Card shown in the detail panel
    selected: Option<ItemId>,
    audio: AudioController,
}

impl FlashcardScreen {
    pub fn open(topic: Topic, device: AudioDevice) -> Self {
        tracing::debug!("Opened topic {} ({} cards)", topic.key, topic.items.len());
        Self {
            topic,
            selected: None,
            audio: AudioController::new(device),
        }
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn title(&self) -> String {
        self.topic.title()
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.topic.items
    }

    pub fn selected(&self) -> Option<&VocabularyItem> {
        self.selected.and_then(|id| self.topic.item(id))
    }

    /// Tap a card. Unknown ids are ignored; cards without a clip are shown silently.
    pub fn select(&mut self, id: ItemId) -> Option<&VocabularyItem> {
        let item = self.topic.item(id)?;
        self.audio.play_optional(item.audio.as_ref());
        self.selected = Some(id);
        self.topic.item(id)
    }

    /// Sound button on the detail panel
    pub fn replay(&self) -> Option<PlaybackHandle> {
        let item = self.selected()?;
        self.audio.play_optional(item.audio.as_ref())
    }

    pub fn audio(&self) -> &AudioController {
        &self.audio
    }

    /// Back arrow: silence the screen and return to the topic list
    pub fn back(&mut self, nav: &dyn Navigator) {
        self.audio.stop();
        nav.navigate(&Route::Vocabulary);
    }
}
