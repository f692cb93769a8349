/// Catalog loading, validation and asset auditing
///
/// The content ships embedded in the binary and can be replaced by a JSON
/// file with the same shape.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use super::types::{AudioRef, ImageRef, MatchPair, PronunciationWord, Topic};
use crate::error::CatalogError;
use crate::slug;

const EMBEDDED_CATALOG: &str = include_str!("../../config/catalog.json");

/// Directory name for pronunciation clips under `sounds/`
const PRONUNCIATION_DIR: &str = "Pronunciation";

/// All learning content of the app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub topics: Vec<Topic>,
    pub match_pairs: Vec<MatchPair>,
    #[serde(default)]
    pub pronunciation: Vec<PronunciationWord>,
}

/// Problem found while auditing bundled assets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetIssue {
    /// A referenced clip is not on disk
    MissingAudio { topic: String, word: String, audio: AudioRef },

    /// A bundled image is not on disk
    MissingImage { topic: String, word: String, path: String },

    /// The item has no clip at all; `expected` is where one would be picked up
    NoAudio { topic: String, word: String, expected: String },
}

impl fmt::Display for AssetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetIssue::MissingAudio { topic, word, audio } => {
                write!(f, "[{}] {}: missing sound file {}", topic, word, audio)
            }
            AssetIssue::MissingImage { topic, word, path } => {
                write!(f, "[{}] {}: missing image file {}", topic, word, path)
            }
            AssetIssue::NoAudio { topic, word, expected } => {
                write!(f, "[{}] {}: no sound (expected at {})", topic, word, expected)
            }
        }
    }
}

impl Catalog {
    /// Load the catalog shipped with the app
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::LoadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse, normalize and validate catalog JSON
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let mut catalog: Catalog = serde_json::from_str(json).map_err(CatalogError::Parse)?;
        catalog.normalize();
        catalog.validate()?;
        tracing::debug!(
            "Catalog ready: {} topics, {} match pairs, {} practice words",
            catalog.topics.len(),
            catalog.match_pairs.len(),
            catalog.pronunciation.len()
        );
        Ok(catalog)
    }

    fn normalize(&mut self) {
        for topic in &mut self.topics {
            topic.name = slug::normalize_display(&topic.name);
            topic.localized_name = slug::normalize_display(&topic.localized_name);
            for item in &mut topic.items {
                item.name = slug::normalize_display(&item.name);
                item.localized_name = slug::normalize_display(&item.localized_name);
            }
        }
        for pair in &mut self.match_pairs {
            pair.word = slug::normalize_display(&pair.word);
            pair.localized_word = slug::normalize_display(&pair.localized_word);
        }
        for word in &mut self.pronunciation {
            word.name = slug::normalize_display(&word.name);
            word.localized_name = slug::normalize_display(&word.localized_name);
        }
    }

    /// Check id uniqueness and non-empty lists
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut keys = HashSet::new();
        let mut routes = HashSet::new();
        for topic in &self.topics {
            if !keys.insert(topic.key.as_str()) {
                return Err(CatalogError::DuplicateTopic(topic.key.clone()));
            }
            if !routes.insert(topic.route.as_str()) {
                return Err(CatalogError::DuplicateTopic(topic.route.clone()));
            }
            if topic.items.is_empty() {
                return Err(CatalogError::EmptyTopic(topic.key.clone()));
            }

            let mut ids = HashSet::new();
            for item in &topic.items {
                if !ids.insert(item.id) {
                    return Err(CatalogError::DuplicateId {
                        topic: topic.key.clone(),
                        id: item.id,
                    });
                }
            }
        }

        if self.match_pairs.is_empty() {
            return Err(CatalogError::EmptyMatchSet);
        }
        let mut ids = HashSet::new();
        for pair in &self.match_pairs {
            if !ids.insert(pair.id) {
                return Err(CatalogError::DuplicateId {
                    topic: "match".to_string(),
                    id: pair.id,
                });
            }
        }

        let mut ids = HashSet::new();
        for word in &self.pronunciation {
            if !ids.insert(word.id) {
                return Err(CatalogError::DuplicateId {
                    topic: "speak".to_string(),
                    id: word.id,
                });
            }
        }

        Ok(())
    }

    pub fn topic(&self, key: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.key == key)
    }

    pub fn topic_by_route(&self, route: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.route == route)
    }

    /// Fill absent sound references from files that follow the naming
    /// convention. Returns how many items gained a clip.
    pub fn attach_conventional_audio(&mut self, assets_root: &Path) -> usize {
        let mut attached = 0;

        for topic in &mut self.topics {
            for item in topic.items.iter_mut().filter(|item| item.audio.is_none()) {
                let key = slug::conventional_audio_key(&topic.name, &item.name);
                if assets_root.join(&key).is_file() {
                    tracing::debug!("Attached {} to {}/{}", key, topic.key, item.name);
                    item.audio = Some(AudioRef::new(key));
                    attached += 1;
                }
            }
        }

        for word in self.pronunciation.iter_mut().filter(|w| w.audio.is_none()) {
            let key = slug::conventional_audio_key(PRONUNCIATION_DIR, &word.name);
            if assets_root.join(&key).is_file() {
                word.audio = Some(AudioRef::new(key));
                attached += 1;
            }
        }

        if attached > 0 {
            tracing::info!("Attached {} sound files by naming convention", attached);
        }
        attached
    }

    /// List bundled assets that are referenced but absent, and items that
    /// have no sound at all.
    pub fn audit(&self, assets_root: &Path) -> Vec<AssetIssue> {
        let mut issues = Vec::new();

        for topic in &self.topics {
            for item in &topic.items {
                match &item.audio {
                    Some(audio) if !assets_root.join(audio.as_str()).is_file() => {
                        issues.push(AssetIssue::MissingAudio {
                            topic: topic.key.clone(),
                            word: item.name.clone(),
                            audio: audio.clone(),
                        });
                    }
                    Some(_) => {}
                    None => issues.push(AssetIssue::NoAudio {
                        topic: topic.key.clone(),
                        word: item.name.clone(),
                        expected: slug::conventional_audio_key(&topic.name, &item.name),
                    }),
                }

                if let ImageRef::Bundled(path) = &item.image {
                    if !assets_root.join(path).is_file() {
                        issues.push(AssetIssue::MissingImage {
                            topic: topic.key.clone(),
                            word: item.name.clone(),
                            path: path.clone(),
                        });
                    }
                }
            }
        }

        for word in &self.pronunciation {
            match &word.audio {
                Some(audio) if !assets_root.join(audio.as_str()).is_file() => {
                    issues.push(AssetIssue::MissingAudio {
                        topic: "speak".to_string(),
                        word: word.name.clone(),
                        audio: audio.clone(),
                    });
                }
                Some(_) => {}
                None => issues.push(AssetIssue::NoAudio {
                    topic: "speak".to_string(),
                    word: word.name.clone(),
                    expected: slug::conventional_audio_key(PRONUNCIATION_DIR, &word.name),
                }),
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const SMALL: &str = r#"{
        "topics": [{
            "key": "fruits",
            "name": "Fruits",
            "localized_name": "פירות",
            "route": "/fruits",
            "thumbnail": {"remote": "https://example.com/fruits.png"},
            "items": [
                {"id": 1, "name": "Apple", "localized_name": "תפוח",
                 "image": {"remote": "https://example.com/apple.png"},
                 "audio": "sounds/fruits/Apple.mp3"},
                {"id": 2, "name": "Banana", "localized_name": "בננה",
                 "image": {"bundled": "images/fruits/banana.jpg"}}
            ]
        }],
        "match_pairs": [
            {"id": 1, "word": "Apple", "localized_word": "תפוח",
             "image": {"remote": "https://example.com/apple.png"}}
        ]
    }"#;

    fn temp_assets(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "learn-eng-assets-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("sounds/fruits")).unwrap();
        dir
    }

    #[test]
    fn test_embedded_catalog_is_valid() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.topics.len(), 12);
        assert_eq!(catalog.match_pairs.len(), 4);
        assert_eq!(catalog.pronunciation.len(), 6);

        let fruits = catalog.topic("fruits").unwrap();
        assert_eq!(fruits.route, "/fruits");
        assert_eq!(fruits.item(1).unwrap().name, "Apple");
        assert!(catalog.topic_by_route("/body").is_some());
    }

    #[test]
    fn test_duplicate_item_id_rejected() {
        let json = SMALL.replace(r#""id": 2, "name": "Banana""#, r#""id": 1, "name": "Banana""#);
        match Catalog::from_json(&json) {
            Err(CatalogError::DuplicateId { topic, id }) => {
                assert_eq!(topic, "fruits");
                assert_eq!(id, 1);
            }
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_match_set_rejected() {
        let json = r#"{"topics": [], "match_pairs": []}"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::EmptyMatchSet)
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_attach_conventional_audio() {
        let assets = temp_assets("attach");
        fs::write(assets.join("sounds/fruits/Banana.mp3"), b"fake").unwrap();

        let mut catalog = Catalog::from_json(SMALL).unwrap();
        let attached = catalog.attach_conventional_audio(&assets);
        let _ = fs::remove_dir_all(&assets);

        assert_eq!(attached, 1);
        let banana = catalog.topic("fruits").unwrap().item(2).unwrap();
        assert_eq!(banana.audio, Some(AudioRef::new("sounds/fruits/Banana.mp3")));
    }

    #[test]
    fn test_audit_reports_missing_assets() {
        let assets = temp_assets("audit");
        let catalog = Catalog::from_json(SMALL).unwrap();
        let issues = catalog.audit(&assets);
        let _ = fs::remove_dir_all(&assets);

        assert_eq!(
            issues,
            vec![
                AssetIssue::MissingAudio {
                    topic: "fruits".to_string(),
                    word: "Apple".to_string(),
                    audio: AudioRef::new("sounds/fruits/Apple.mp3"),
                },
                AssetIssue::NoAudio {
                    topic: "fruits".to_string(),
                    word: "Banana".to_string(),
                    expected: "sounds/fruits/Banana.mp3".to_string(),
                },
                AssetIssue::MissingImage {
                    topic: "fruits".to_string(),
                    word: "Banana".to_string(),
                    path: "images/fruits/banana.jpg".to_string(),
                },
            ]
        );
    }
}
