use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Convert a word into the file stem used for its sound clip
/// - Strips diacritics via Unicode NFD decomposition
/// - Replaces every non-alphanumeric character with an underscore
/// - Does not collapse runs, so "T-Shirt" and "T Shirt" both map to "T_Shirt"
///   while "Ice  Cream" keeps both underscores
pub fn asset_stem(word: &str) -> String {
    let mut result = String::with_capacity(word.len());

    for ch in word.trim().nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            result.push(ch);
        } else if !ch.is_control() {
            result.push('_');
        }
    }

    result
}

/// Directory name for a topic's clips: lowercase, spaces become underscores
pub fn topic_dir(topic_name: &str) -> String {
    topic_name.trim().to_lowercase().replace(' ', "_")
}

/// Conventional asset key for a word's clip, relative to the assets root
pub fn conventional_audio_key(topic_name: &str, word: &str) -> String {
    format!("sounds/{}/{}.mp3", topic_dir(topic_name), asset_stem(word))
}

/// Canonical composition for display strings (Hebrew punctuation included)
pub fn normalize_display(input: &str) -> String {
    input.trim().nfc().collect()
}
