use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::{bail, Context};

use learn_eng::audio_system::{self, AudioDevice};
use learn_eng::catalog::{AudioRef, Catalog, ItemId};
use learn_eng::config::Config;
use learn_eng::error::AppResult;
use learn_eng::game::{MatchGame, Selection};
use learn_eng::logging;
use learn_eng::screens::{
    FlashcardScreen, HomeMenu, MatchScreen, PronunciationScreen, RouteHistory, VocabularyMenu,
};

fn main() {
    let app_dir = Config::app_dir().unwrap_or_else(|_| PathBuf::from("."));
    let _guard = logging::initialize_tracing(&app_dir);
    logging::log_runtime_environment();

    println!("===========================================");
    println!("  {} - {}", HomeMenu::TITLE, HomeMenu::SUBTITLE);
    println!("===========================================\n");

    if let Err(e) = run() {
        tracing::error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> AppResult<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("topics");

    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return Ok(());
    }

    let config = Config::load().context("Failed to load configuration")?;
    println!("✓ Configuration loaded ({})", Config::config_path_display());

    let catalog = load_catalog(&config)?;

    match command {
        "topics" => list_topics(&catalog),
        "topic" => {
            let key = args.get(1).context("Usage: learn-eng topic <key>")?;
            run_topic(&config, &catalog, key)
        }
        "match" => run_match(&config, &catalog),
        "speak" => run_speak(&config, &catalog),
        "audit" => run_audit(&config, &catalog),
        other => {
            print_usage();
            bail!("Unknown command: {}", other)
        }
    }
}

fn print_usage() {
    println!("Usage: learn-eng [COMMAND]\n");
    println!("Commands:");
    println!("  topics        List vocabulary topics (default)");
    println!("  topic <key>   Open a topic's flashcards");
    println!("  match         Play the word matching game");
    println!("  speak         Practice saying words");
    println!("  audit         Check bundled sound and image files");
}

fn load_catalog(config: &Config) -> AppResult<Catalog> {
    let mut catalog = match config.catalog_file() {
        Some(path) => Catalog::load(&path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => Catalog::embedded().context("Embedded catalog is invalid")?,
    };

    if config.attach_conventional_audio {
        catalog.attach_conventional_audio(&config.assets_root());
    }

    println!(
        "✓ Catalog loaded: {} topics, {} match pairs\n",
        catalog.topics.len(),
        catalog.match_pairs.len()
    );
    Ok(catalog)
}

fn open_audio(config: &Config) -> AudioDevice {
    let device = audio_system::configure(&config.assets_root(), config.audio_mode());
    if device.is_muted() {
        println!("✗ No audio output, continuing without sound\n");
    }
    device
}

fn list_topics(catalog: &Catalog) -> AppResult<()> {
    println!("{}", VocabularyMenu::TITLE);
    for topic in VocabularyMenu::new(catalog).tiles() {
        println!("  {:<16} {} ({} words)", topic.key, topic.title(), topic.items.len());
    }
    println!("\nOpen one with: learn-eng topic <key>");
    Ok(())
}

fn run_topic(config: &Config, catalog: &Catalog, key: &str) -> AppResult<()> {
    let topic = catalog
        .topic(key)
        .cloned()
        .with_context(|| format!("No topic named '{}'", key))?;

    let device = open_audio(config);
    let clips: Vec<AudioRef> = topic.items.iter().filter_map(|i| i.audio.clone()).collect();
    let ready = device.preload(&clips);
    tracing::debug!("Preloaded {}/{} clips for {}", ready, clips.len(), topic.key);

    let mut screen = FlashcardScreen::open(topic, device);
    let nav = RouteHistory::new();

    println!("{}", screen.title());
    for item in screen.items() {
        let sound = if item.has_audio() { "♪" } else { " " };
        println!("  [{:>2}] {} {} - {}", item.id, sound, item.name, item.localized_name);
    }
    println!("\nType a number to open a card, 'r' to hear it again, 'b' to go back.");

    for line in prompt_lines() {
        match line.as_str() {
            "b" | "q" => {
                screen.back(&nav);
                break;
            }
            "r" => {
                if screen.replay().is_none() {
                    println!("  (no sound)");
                }
            }
            input => match input.parse::<ItemId>().ok().and_then(|id| screen.select(id)) {
                Some(item) => {
                    let sound = if item.has_audio() { "" } else { " (no sound)" };
                    println!("  {} - {}{}", item.name, item.localized_name, sound);
                }
                None => println!("  Unknown card: {}", input),
            },
        }
    }

    tracing::debug!("Left topic, now at {}", nav.current());
    Ok(())
}

fn run_match(config: &Config, catalog: &Catalog) -> AppResult<()> {
    let game = MatchGame::new(catalog.match_pairs.clone())
        .context("Cannot start the match game")?
        .with_feedback_delay(config.feedback_delay());
    let mut screen = MatchScreen::from_game(game).with_celebration_delay(config.celebration_delay());
    let nav = RouteHistory::new();

    println!("{}", MatchScreen::TITLE);
    print_board(&screen);
    println!("Type 'w <id>' to pick a word, 'i <id>' to pick a picture, 'reset', or 'b'.");

    for line in prompt_lines() {
        let mut parts = line.split_whitespace();
        let now = Instant::now();
        let selection = match (parts.next(), parts.next().and_then(|id| id.parse::<ItemId>().ok())) {
            (Some("w"), Some(id)) => screen.select_word_at(id, now),
            (Some("i"), Some(id)) => screen.select_image_at(id, now),
            (Some("reset"), _) => {
                screen.play_again();
                print_board(&screen);
                continue;
            }
            (Some("b" | "q"), _) => {
                screen.back(&nav);
                break;
            }
            _ => {
                println!("  ?");
                continue;
            }
        };

        match selection {
            Selection::Ignored => println!("  (ignored)"),
            Selection::Pending => {}
            Selection::Matched { id, completed } => {
                let word = screen.game().pair(id).map(|p| p.word.as_str()).unwrap_or("?");
                println!("  ✓ {} - {}", word, screen.score_label());
                if completed {
                    thread::sleep(config.celebration_delay());
                    if let Some(dialog) = screen.celebration(Instant::now()) {
                        println!("\n  {}\n  {}\n  [{}]", dialog.title, dialog.message, dialog.action);
                        screen.play_again();
                        print_board(&screen);
                    }
                }
            }
            Selection::Mismatched { .. } => {
                println!("  ✗ Try again");
                thread::sleep(config.feedback_delay());
                screen.tick(Instant::now());
            }
        }
    }
    Ok(())
}

fn print_board(screen: &MatchScreen) {
    let game = screen.game();
    println!("\n  {}", screen.score_label());
    println!("  Words:");
    for pair in game.words() {
        let done = if game.is_matched(pair.id) { "✓" } else { " " };
        println!("    {} [{}] {} - {}", done, pair.id, pair.word, pair.localized_word);
    }
    println!("  Pictures:");
    for pair in game.images() {
        let done = if game.is_matched(pair.id) { "✓" } else { " " };
        println!("    {} [{}] {}", done, pair.id, pair.image.locator());
    }
    println!();
}

fn run_speak(config: &Config, catalog: &Catalog) -> AppResult<()> {
    let device = open_audio(config);
    let mut screen = PronunciationScreen::open(catalog.pronunciation.clone(), device);
    let nav = RouteHistory::new();

    println!("{}", PronunciationScreen::TITLE);
    println!("{}\n", PronunciationScreen::INSTRUCTIONS);
    for word in screen.words() {
        println!("  [{:>2}] {} - {}", word.id, word.name, word.localized_name);
    }
    println!("\nType a number to pick a word, 'l' to listen, 'b' to go back.");

    for line in prompt_lines() {
        match line.as_str() {
            "b" | "q" => {
                screen.back(&nav);
                break;
            }
            "l" => {
                if screen.selected().is_none() {
                    println!("  Pick a word first");
                    continue;
                }
                screen.practice();
                println!("  {}", screen.listen_label());
            }
            input => match input.parse::<ItemId>().ok().and_then(|id| screen.select(id)) {
                Some(word) => println!("  {} - {}", word.name, word.localized_name),
                None => println!("  Unknown word: {}", input),
            },
        }
    }
    Ok(())
}

fn run_audit(config: &Config, catalog: &Catalog) -> AppResult<()> {
    let root = config.assets_root();
    let issues = catalog.audit(&root);

    println!("Assets root: {}", root.display());
    if issues.is_empty() {
        println!("✓ All assets present");
        return Ok(());
    }
    for issue in &issues {
        println!("  {}", issue);
    }
    println!("\n✗ {} asset issues", issues.len());
    Ok(())
}

/// Trimmed, non-empty lines from stdin, each after a "> " prompt
fn prompt_lines() -> impl Iterator<Item = String> {
    let stdin = io::stdin();
    std::iter::from_fn(move || loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return None;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {
                let line = line.trim();
                if !line.is_empty() {
                    return Some(line.to_string());
                }
            }
        }
    })
}
