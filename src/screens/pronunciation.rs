/// "Say It!" practice screen
use super::{Navigator, Route};
use crate::audio_system::{AudioController, AudioDevice, PlaybackHandle};
use crate::catalog::{ItemId, PronunciationWord};

#[derive(Debug)]
pub struct PronunciationScreen {
    words: Vec<PronunciationWord>,
    selected: Option<ItemId>,
    /// Listen button pressed for the selected word
    practicing: bool,
    audio: AudioController,
}

impl PronunciationScreen {
    pub const TITLE: &'static str = "Say It! - אמור את זה";
    pub const INSTRUCTIONS: &'static str =
        "Tap a word to practice saying it! - הקש על מילה כדי לתרגל אמירתה!";

    pub fn open(words: Vec<PronunciationWord>, device: AudioDevice) -> Self {
        Self {
            words,
            selected: None,
            practicing: false,
            audio: AudioController::new(device),
        }
    }

    pub fn words(&self) -> &[PronunciationWord] {
        &self.words
    }

    pub fn selected(&self) -> Option<&PronunciationWord> {
        let id = self.selected?;
        self.words.iter().find(|word| word.id == id)
    }

    pub fn is_practicing(&self) -> bool {
        self.practicing
    }

    /// Tap a word card. Picking another word ends the current practice.
    pub fn select(&mut self, id: ItemId) -> Option<&PronunciationWord> {
        if !self.words.iter().any(|word| word.id == id) {
            return None;
        }
        if self.selected != Some(id) {
            self.audio.stop();
        }
        self.selected = Some(id);
        self.practicing = false;
        self.selected()
    }

    /// Listen button. Plays the word's clip when it has one.
    pub fn practice(&mut self) -> Option<PlaybackHandle> {
        let clip = self.selected()?.audio.clone();
        self.practicing = true;
        self.audio.play_optional(clip.as_ref())
    }

    /// Label of the listen button
    pub fn listen_label(&self) -> &'static str {
        if self.practicing {
            "Listening... - מקשיב..."
        } else {
            "Listen - הקשב"
        }
    }

    pub fn audio(&self) -> &AudioController {
        &self.audio
    }

    pub fn back(&mut self, nav: &dyn Navigator) {
        self.audio.stop();
        nav.navigate(&Route::Home);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio_system::MockBackend;
    use crate::catalog::{AudioRef, ImageRef};
    use crate::screens::RouteHistory;
    use std::sync::Arc;

    fn word(id: ItemId, name: &str, audio: Option<&str>) -> PronunciationWord {
        PronunciationWord {
            id,
            name: name.to_string(),
            localized_name: format!("{} (he)", name),
            image: ImageRef::Remote(format!("https://example.org/{}.png", name)),
            color: "#4CAF50".to_string(),
            audio: audio.map(AudioRef::new),
        }
    }

    fn screen() -> (PronunciationScreen, MockBackend) {
        let mock = MockBackend::new();
        let device = AudioDevice::from_backend(Arc::new(mock.clone()));
        let words = vec![
            word(1, "Hello", Some("sounds/pronunciation/Hello.mp3")),
            word(2, "Water", None),
        ];
        (PronunciationScreen::open(words, device), mock)
    }

    #[test]
    fn test_select_resets_practice() {
        let (mut screen, _mock) = screen();
        screen.select(1);
        screen.practice();
        assert!(screen.is_practicing());
        assert_eq!(screen.listen_label(), "Listening... - מקשיב...");

        screen.select(2);
        assert!(!screen.is_practicing());
        assert_eq!(screen.listen_label(), "Listen - הקשב");
    }

    #[test]
    fn test_practice_plays_clip() {
        let (mut screen, mock) = screen();
        assert!(screen.practice().is_none(), "nothing selected yet");

        screen.select(1);
        assert!(screen.practice().is_some());
        assert_eq!(mock.audible(), vec![AudioRef::new("sounds/pronunciation/Hello.mp3")]);
    }

    #[test]
    fn test_practice_without_clip() {
        let (mut screen, mock) = screen();
        screen.select(2);
        assert!(screen.practice().is_none());
        assert!(screen.is_practicing());
        assert_eq!(mock.load_count(), 0);
    }

    #[test]
    fn test_switching_word_silences_previous() {
        let (mut screen, mock) = screen();
        screen.select(1);
        screen.practice();
        screen.select(2);
        assert!(mock.audible().is_empty());
    }

    #[test]
    fn test_back_goes_home() {
        let (mut screen, _mock) = screen();
        let history = RouteHistory::new();
        assert!(screen.select(7).is_none());
        screen.back(&history);
        assert_eq!(history.current(), Route::Home);
    }
}
