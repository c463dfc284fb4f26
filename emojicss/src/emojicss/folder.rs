//! CSS rules from a folder of already downloaded emoji images.

use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use crate::emojicss::config::{CdnConfig, FolderConfig};
use crate::emojicss::output;
use crate::emojicss::types::css_rule;

// Trailing `_<hex>[-<hex>...]` segment right before the extension, e.g.
// `waving-hand_medium-light-skin-tone_1f44b-1f3fc.webp`.
static SUFFIX_CODES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_((?:[0-9a-fA-F]{2,5}-?)+(?:_(?:[0-9a-fA-F]{2,5}-?)*)*)[0-9a-fA-F_-]*\.")
        .expect("suffix code point regex")
});

// Whole stem is code points, e.g. `1f44b-1f3fc.webp`. Only trusted when the
// decoded sequence is a known emoji, since words like `face` are valid hex.
static BARE_CODES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:[0-9a-fA-F]{2,5}-?)+(?:_(?:[0-9a-fA-F]{2,5}-?)*)*)\.[^.]*$")
        .expect("bare code point regex")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderEmoji {
    pub filename: String,
    pub code: Vec<String>,
    pub emoji_char: String,
    pub url: String,
}

/// Hex code point tokens encoded in `filename`, in order.
pub fn code_points_from_filename(filename: &str) -> Option<Vec<String>> {
    if let Some(caps) = SUFFIX_CODES.captures(filename) {
        return split_code_points(caps.get(1)?.as_str());
    }

    let code = split_code_points(BARE_CODES.captures(filename)?.get(1)?.as_str())?;
    emoji_from_code_points(&code)
        .filter(|emoji| is_known_emoji(emoji))
        .map(|_| code)
}

fn split_code_points(segment: &str) -> Option<Vec<String>> {
    let code: Vec<String> = segment
        .trim_start_matches('_')
        .split(['_', '-'])
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    (!code.is_empty()).then_some(code)
}

fn is_known_emoji(emoji: &str) -> bool {
    emojis::get(emoji).is_some() || emojis::get(&emoji.replace('\u{fe0f}', "")).is_some()
}

/// Concatenate the scalar values; `None` when a token is not a valid code point.
pub fn emoji_from_code_points(code: &[String]) -> Option<String> {
    code.iter()
        .map(|cp| u32::from_str_radix(cp, 16).ok().and_then(char::from_u32))
        .collect()
}

pub fn image_url(cdn: &CdnConfig, filename: &str) -> String {
    let name = match filename.strip_suffix(".webp") {
        Some(stem) => format!("{stem}.png"),
        None => filename.to_string(),
    };
    format!("{}/{}", cdn.base_url(), name)
}

pub fn describe_file(cdn: &CdnConfig, filename: &str) -> Option<FolderEmoji> {
    let Some(code) = code_points_from_filename(filename) else {
        warn!("skipping {filename}: no code points in name");
        return None;
    };
    let Some(emoji_char) = emoji_from_code_points(&code) else {
        warn!("skipping {filename}: {code:?} is not a valid code point sequence");
        return None;
    };

    Some(FolderEmoji {
        filename: filename.to_string(),
        url: image_url(cdn, filename),
        code,
        emoji_char,
    })
}

/// File names directly inside `dir`, sorted so repeated runs agree.
fn list_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        bail!("emoji folder {} does not exist", dir.display());
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("reading {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// One rule per image file in `folder.path`, written to `folder.output`.
pub fn generate_css(folder: &FolderConfig, cdn: &CdnConfig) -> Result<Vec<String>> {
    let files = list_files(Path::new(&folder.path))?;
    info!("found {} files in {}", files.len(), folder.path);

    let rules: Vec<String> = files
        .iter()
        .filter_map(|name| describe_file(cdn, name))
        .map(|emoji| css_rule(&emoji.emoji_char, &emoji.url))
        .collect();

    output::write_css(Path::new(&folder.output), &rules)?;
    Ok(rules)
}
