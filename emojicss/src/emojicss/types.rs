use std::collections::HashMap;

use serde::Serialize;

/// One fully-qualified line of `emoji-test.txt`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmojiRecord {
    pub emoji_char: String,
    pub description: String,
    /// Hex code points in sequence order, never empty.
    pub code: Vec<String>,
    /// Emoji version the sequence was introduced in, without the `E` prefix.
    #[serde(skip)]
    pub version: String,
}

impl EmojiRecord {
    pub fn last_code(&self) -> &str {
        self.code.last().map(String::as_str).unwrap_or_default()
    }

    /// Code points joined with `-`, as they appear in image filenames.
    pub fn joined_code(&self) -> String {
        self.code.join("-")
    }
}

/// Emoji character to its 1.0-era name, from the legacy `emoji-data.txt`.
#[derive(Clone, Debug, Default)]
pub struct LegacyNameTable {
    names: HashMap<String, String>,
}

impl LegacyNameTable {
    pub fn insert(&mut self, emoji_char: String, name: String) {
        self.names.insert(emoji_char, name);
    }

    pub fn get(&self, emoji_char: &str) -> Option<&str> {
        self.names.get(emoji_char).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A record for which no candidate image URL could be found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InvalidEmoji {
    #[serde(flatten)]
    pub record: EmojiRecord,
    pub attempted_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_description: Option<String>,
}

pub fn css_rule(emoji_char: &str, url: &str) -> String {
    format!(r#"img.emoji[aria-label="{emoji_char}"] {{ content: url("{url}"); }}"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_rule_matches_expected_shape() {
        assert_eq!(
            css_rule("😀", "https://cdn/apple/391/grinning-face_1f600.png"),
            r#"img.emoji[aria-label="😀"] { content: url("https://cdn/apple/391/grinning-face_1f600.png"); }"#
        );
    }

    #[test]
    fn invalid_emoji_serializes_flat_and_omits_missing_legacy_name() {
        let entry = InvalidEmoji {
            record: EmojiRecord {
                emoji_char: "🫨".into(),
                description: "shaking face".into(),
                code: vec!["1FAE8".into()],
                version: "15.0".into(),
            },
            attempted_urls: vec!["a".into(), "b".into()],
            legacy_description: None,
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["emoji_char"], "🫨");
        assert_eq!(value["code"][0], "1FAE8");
        assert_eq!(value["attempted_urls"].as_array().unwrap().len(), 2);
        assert!(value.get("legacy_description").is_none());
        assert!(value.get("version").is_none());
        assert!(value.get("record").is_none());
    }
}
