//! Parsers for the Unicode emoji reference files.

use log::warn;

use crate::emojicss::types::{EmojiRecord, LegacyNameTable};

const FULLY_QUALIFIED: &str = "fully-qualified";

fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.starts_with('#') && !line.trim().is_empty())
}

/// Parse the Emoji 1.0 `emoji-data.txt` into a table of legacy names.
///
/// The name is read from the trailing comment, e.g. `# V1.1 (⌚) watch`.
/// Later lines win when the same emoji appears twice.
pub fn parse_legacy_names(text: &str) -> LegacyNameTable {
    let mut table = LegacyNameTable::default();

    for (line_no, line) in data_lines(text) {
        let Some((emoji_char, name)) = line
            .split_once('(')
            .and_then(|(_, rest)| rest.split_once(')'))
        else {
            warn!("skipping legacy line {line_no}: no parenthesised emoji");
            continue;
        };

        table.insert(emoji_char.trim().to_string(), name.trim().to_string());
    }

    table
}

/// Parse `emoji-test.txt`, keeping only fully-qualified sequences in file order.
pub fn parse_emoji_test(text: &str) -> Vec<EmojiRecord> {
    let mut records = Vec::new();

    for (line_no, line) in data_lines(text) {
        let Some((code_part, rest)) = line.split_once(';') else {
            warn!("skipping emoji-test line {line_no}: missing ';'");
            continue;
        };
        let Some((status, comment)) = rest.split_once('#') else {
            warn!("skipping emoji-test line {line_no}: missing '#'");
            continue;
        };

        if status.trim() != FULLY_QUALIFIED {
            continue;
        }

        let mut pieces = comment.trim().splitn(3, ' ');
        let (Some(emoji_char), Some(version), Some(description)) =
            (pieces.next(), pieces.next(), pieces.next())
        else {
            warn!("skipping emoji-test line {line_no}: incomplete comment {comment:?}");
            continue;
        };

        let code: Vec<String> = code_part
            .trim()
            .split(' ')
            .filter(|cp| !cp.is_empty())
            .map(str::to_string)
            .collect();
        if code.is_empty() {
            warn!("skipping emoji-test line {line_no}: no code points");
            continue;
        }

        records.push(EmojiRecord {
            emoji_char: emoji_char.to_string(),
            description: description.trim().to_string(),
            code,
            version: version.strip_prefix('E').unwrap_or(version).to_string(),
        });
    }

    records
}
