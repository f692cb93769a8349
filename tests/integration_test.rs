// Integration tests for Learn English
// These drive the screens, the audio controller and the match game through
// the public library API with a headless playback backend.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use learn_eng::audio_system::{AudioController, AudioDevice, MockBackend};
use learn_eng::catalog::{AssetIssue, AudioRef, Catalog};
use learn_eng::game::{GamePhase, MatchGame, Selection};
use learn_eng::messaging::{EventBus, GameEvent};
use learn_eng::screens::{
    FlashcardScreen, HomeMenu, MatchScreen, Navigator, PronunciationScreen, Route, RouteHistory,
    VocabularyMenu,
};
use learn_eng::state::PlaybackState;

fn mock_device() -> (AudioDevice, MockBackend) {
    let mock = MockBackend::new();
    (AudioDevice::from_backend(Arc::new(mock.clone())), mock)
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("learn-eng-it-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_embedded_catalog_content() {
    let catalog = Catalog::embedded().unwrap();

    let keys: Vec<&str> = catalog.topics.iter().map(|t| t.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "animals",
            "fruits",
            "vegetables",
            "colors",
            "family",
            "body",
            "clothing",
            "numbers",
            "weather",
            "emotions",
            "transportation",
            "toys"
        ]
    );
    assert_eq!(catalog.match_pairs.len(), 4);
    assert_eq!(catalog.pronunciation.len(), 6);
    assert!(catalog.topic_by_route("/body").is_some());
}

#[test]
fn test_every_topic_uses_the_same_screen() {
    let catalog = Catalog::embedded().unwrap();
    let (device, mock) = mock_device();

    for topic in &catalog.topics {
        let first = topic.items[0].clone();
        let mut screen = FlashcardScreen::open(topic.clone(), device.clone());
        assert_eq!(screen.items().len(), topic.items.len());

        let shown = screen.select(first.id).map(|item| item.name.clone());
        assert_eq!(shown, Some(first.name.clone()));
        if let Some(clip) = &first.audio {
            assert_eq!(mock.audible(), vec![clip.clone()]);
        }
    }

    // Every screen was dropped at the end of its iteration
    assert!(mock.audible().is_empty());
    assert_eq!(mock.live_voices(), 0);
}

#[test]
fn test_navigation_flow() {
    let catalog = Catalog::embedded().unwrap();
    let (device, mock) = mock_device();
    let nav = RouteHistory::new();

    assert!(HomeMenu.open(0, &nav));
    assert_eq!(nav.current(), Route::Vocabulary);

    let menu = VocabularyMenu::new(&catalog);
    assert!(menu.open("animals", &nav));
    let topic = match nav.current() {
        Route::Topic(key) => catalog.topic(&key).cloned().unwrap(),
        other => panic!("unexpected route {}", other),
    };

    let mut screen = FlashcardScreen::open(topic, device);
    let item_id = screen.items()[2].id;
    screen.select(item_id);
    assert_eq!(mock.audible().len(), 1);

    screen.back(&nav);
    assert!(mock.audible().is_empty());
    assert_eq!(nav.current(), Route::Vocabulary);

    menu.back(&nav);
    assert_eq!(
        nav.routes().iter().map(Route::token).collect::<Vec<_>>(),
        vec!["/vocabulary", "/animals", "/vocabulary", "/"]
    );
}

#[test]
fn test_leaving_screen_releases_playing_clip() {
    let catalog = Catalog::embedded().unwrap();
    let (device, mock) = mock_device();
    let topic = catalog.topic("weather").cloned().unwrap();
    let clip = topic.items[0].audio.clone().unwrap();

    let mut screen = FlashcardScreen::open(topic, device);
    let first = screen.items()[0].id;
    screen.select(first);
    let handle = screen.audio().current().unwrap();
    assert_eq!(handle.state(), PlaybackState::Playing);

    drop(screen);

    assert_eq!(handle.state(), PlaybackState::Released);
    assert!(mock.is_freed(&clip));
}

#[test]
fn test_missing_clip_then_valid_clip() {
    let (device, mock) = mock_device();
    let controller = AudioController::new(device);
    let missing = AudioRef::new("sounds/animals/Dragon.mp3");
    let valid = AudioRef::new("sounds/animals/Lion.mp3");
    mock.mark_missing(&missing);

    assert!(controller.play(&missing).is_none());
    assert!(controller.current().is_none());

    let handle = controller.play(&valid).unwrap();
    assert!(handle.is_playing());
    assert_eq!(mock.audible(), vec![valid]);
}

#[test]
fn test_second_clip_replaces_first() {
    let (device, mock) = mock_device();
    let controller = AudioController::new(device);
    let a = AudioRef::new("sounds/numbers/One.mp3");
    let b = AudioRef::new("sounds/numbers/Two.mp3");

    let first = controller.play(&a).unwrap();
    let second = controller.play(&b).unwrap();

    assert_eq!(mock.audible(), vec![b.clone()]);
    assert!(mock.is_freed(&a));
    assert!(!first.release(), "already released by the second play");

    // Natural completion frees the second clip with nobody calling release
    assert!(mock.finish(&b));
    assert_eq!(second.state(), PlaybackState::Finished);
    assert_eq!(mock.live_voices(), 0);
}

#[test]
fn test_full_match_game() {
    let catalog = Catalog::embedded().unwrap();
    let bus = EventBus::new();
    let (rx, _id) = bus.subscribe();
    let game = MatchGame::with_rng(catalog.match_pairs.clone(), StdRng::seed_from_u64(2024))
        .unwrap()
        .with_events(bus);
    let mut screen = MatchScreen::from_game(game);

    let mut now = Instant::now();
    let ids: Vec<u32> = screen.game().state().word_order.clone();

    // One wrong guess first
    screen.select_word_at(ids[0], now);
    assert_eq!(
        screen.select_image_at(ids[1], now),
        Selection::Mismatched {
            word: ids[0],
            image: ids[1]
        }
    );
    now += Duration::from_millis(600);
    assert!(screen.tick(now));

    for id in &ids {
        screen.select_image_at(*id, now);
        screen.select_word_at(*id, now);
        now += Duration::from_millis(600);
    }

    assert_eq!(screen.game().phase(), GamePhase::Complete);
    assert_eq!(screen.score_label(), "Score: 4/4");
    assert!(screen.celebration(now).is_none());
    assert!(screen.celebration(now + Duration::from_secs(1)).is_some());

    let events: Vec<GameEvent> = rx.try_iter().collect();
    let matched = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Matched { .. }))
        .count();
    let completed: Vec<&GameEvent> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Completed { .. }))
        .collect();
    assert_eq!(matched, 4);
    assert_eq!(completed, vec![&GameEvent::Completed { score: 4 }]);
    assert!(events.contains(&GameEvent::Mismatched {
        word: ids[0],
        image: ids[1]
    }));

    screen.play_again();
    assert_eq!(screen.game().phase(), GamePhase::InProgress);
    assert_eq!(screen.game().score(), 0);
}

#[test]
fn test_pronunciation_practice_with_conventional_audio() {
    let root = temp_dir("speak");
    let clip_dir = root.join("sounds").join("pronunciation");
    fs::create_dir_all(&clip_dir).unwrap();
    fs::write(clip_dir.join("Hello.mp3"), b"fake").unwrap();
    fs::write(clip_dir.join("Thank_You.mp3"), b"fake").unwrap();

    let mut catalog = Catalog::embedded().unwrap();
    assert_eq!(catalog.attach_conventional_audio(&root), 2);

    let (device, mock) = mock_device();
    let mut screen = PronunciationScreen::open(catalog.pronunciation.clone(), device);

    screen.select(2);
    assert!(screen.practice().is_some());
    assert_eq!(
        mock.audible(),
        vec![AudioRef::new("sounds/pronunciation/Thank_You.mp3")]
    );

    // "Water" has no clip: practice mode without sound
    screen.select(6);
    assert!(screen.practice().is_none());
    assert!(screen.is_practicing());
    assert!(mock.audible().is_empty());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_audit_reports_missing_sounds() {
    let root = temp_dir("audit");
    let catalog = Catalog::embedded().unwrap();

    let issues = catalog.audit(&root);
    let apple = AudioRef::new("sounds/fruits/Apple.mp3");
    assert!(issues.iter().any(|issue| matches!(
        issue,
        AssetIssue::MissingAudio { audio, .. } if audio == &apple
    )));
    assert!(issues
        .iter()
        .any(|issue| matches!(issue, AssetIssue::NoAudio { word, .. } if word == "Hello")));

    let _ = fs::remove_dir_all(&root);
}

struct Recorder(std::sync::Mutex<Vec<String>>);

impl Navigator for Recorder {
    fn navigate(&self, route: &Route) {
        self.0.lock().unwrap().push(route.token());
    }
}

#[test]
fn test_custom_navigator() {
    let recorder = Recorder(std::sync::Mutex::new(Vec::new()));
    let screen = MatchScreen::open(Catalog::embedded().unwrap().match_pairs).unwrap();
    screen.back(&recorder);
    HomeMenu.open(1, &recorder);

    assert_eq!(*recorder.0.lock().unwrap(), vec!["/", "/match"]);
}
