use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::emojicss::config::OutputConfig;
use crate::emojicss::replace::Replacement;

/// Write the rules one per line, replacing any previous file.
pub fn write_css(path: &Path, rules: &[String]) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, rules.join("\n"))
        .with_context(|| format!("writing css to {}", path.display()))?;
    info!("CSS file generated: {} ({} rules)", path.display(), rules.len());
    Ok(())
}

/// Pretty-print `value` as JSON with four-space indentation.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut ser)
        .with_context(|| format!("serializing {}", path.display()))?;

    ensure_parent(path)?;
    fs::write(path, buf).with_context(|| format!("writing json to {}", path.display()))
}

/// `<stem>.css`, plus `<stem>_invalid.json` when at least one emoji failed.
pub fn write_replacement(output: &OutputConfig, replacement: &Replacement) -> Result<()> {
    write_css(Path::new(&output.css_path()), &replacement.rules)?;

    if !replacement.invalid.is_empty() {
        let report = output.invalid_report_path();
        write_json(Path::new(&report), &replacement.invalid)?;
        info!(
            "{} emoji without an image, see {}",
            replacement.invalid.len(),
            report
        );
    }

    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output dir {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::emojicss::types::{EmojiRecord, InvalidEmoji, css_rule};

    #[test]
    fn writes_css_and_invalid_report() {
        let dir = TempDir::new().unwrap();
        let stem = dir.path().join("nested/emoji-replace");
        let output = OutputConfig {
            stem: stem.to_string_lossy().into_owned(),
        };

        let replacement = Replacement {
            rules: vec![
                css_rule("😀", "https://cdn/grinning-face_1f600.png"),
                css_rule("😃", "https://cdn/grinning-face-with-big-eyes_1f603.png"),
            ],
            invalid: vec![InvalidEmoji {
                record: EmojiRecord {
                    emoji_char: "🫨".into(),
                    description: "shaking face".into(),
                    code: vec!["1FAE8".into()],
                    version: "15.0".into(),
                },
                attempted_urls: vec![
                    "https://cdn/shaking-face_1fae8.png".into(),
                    "https://cdn/shaking-face_1fae8_1fae8.png".into(),
                    "https://cdn/shaking-face_1fae8.png".into(),
                ],
                legacy_description: None,
            }],
        };

        write_replacement(&output, &replacement).unwrap();

        let css = fs::read_to_string(output.css_path()).unwrap();
        assert_eq!(css.lines().count(), 2);
        assert!(!css.ends_with('\n'));
        assert!(!css.contains("🫨"));

        let report = fs::read_to_string(output.invalid_report_path()).unwrap();
        assert!(report.contains("\n    {"));
        let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["emoji_char"], "🫨");
        assert_eq!(entries[0]["attempted_urls"].as_array().unwrap().len(), 3);
        assert!(entries[0].get("legacy_description").is_none());
    }

    #[test]
    fn no_report_without_failures() {
        let dir = TempDir::new().unwrap();
        let output = OutputConfig {
            stem: dir.path().join("emoji-replace").to_string_lossy().into_owned(),
        };

        let replacement = Replacement {
            rules: vec![css_rule("😀", "https://cdn/grinning-face_1f600.png")],
            invalid: vec![],
        };
        write_replacement(&output, &replacement).unwrap();

        assert!(Path::new(&output.css_path()).exists());
        assert!(!Path::new(&output.invalid_report_path()).exists());
    }
}
