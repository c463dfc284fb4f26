use anyhow::{Result, bail};
use log::{info, warn};

use crate::emojicss::config::GeneratorConfig;
use crate::emojicss::fetch::{TextSource, UrlProbe};
use crate::emojicss::output;
use crate::emojicss::types::{EmojiRecord, InvalidEmoji, LegacyNameTable, css_rule};
use crate::emojicss::unicode::{parse_emoji_test, parse_legacy_names};
use crate::emojicss::urls::{UrlCandidates, normalize_legacy_name};

/// Result of resolving every record to an image URL.
#[derive(Debug, Default)]
pub struct Replacement {
    pub rules: Vec<String>,
    pub invalid: Vec<InvalidEmoji>,
}

enum Resolution {
    Found(String),
    Missing {
        attempted_urls: Vec<String>,
        legacy_description: Option<String>,
    },
}

/// Fetch the reference files, resolve image URLs and write `<stem>.css`
/// (plus `<stem>_invalid.json` when anything failed).
pub async fn create_emoji_replace_css_file<C: TextSource + UrlProbe>(
    config: &GeneratorConfig,
    client: &C,
) -> Result<Replacement> {
    let test_text = client.text(&config.unicode.emoji_test_url).await?;
    let records = parse_emoji_test(&test_text);
    if records.is_empty() {
        bail!(
            "no fully-qualified emoji found in {}",
            config.unicode.emoji_test_url
        );
    }
    info!("parsed {} fully-qualified emoji", records.len());

    // Legacy names only feed the validation fallback chain.
    let legacy = if config.unicode.validate_urls {
        let legacy_text = client.text(&config.unicode.legacy_data_url).await?;
        let table = parse_legacy_names(&legacy_text);
        info!("parsed {} legacy emoji names", table.len());
        table
    } else {
        LegacyNameTable::default()
    };

    let replacement = build_replacement(
        &records,
        &legacy,
        &config.cdn.base_url(),
        config.unicode.validate_urls,
        client,
    )
    .await;

    output::write_replacement(&config.output, &replacement)?;
    Ok(replacement)
}

/// Resolve each record in order. Without validation every primary URL is accepted.
pub async fn build_replacement<P: UrlProbe>(
    records: &[EmojiRecord],
    legacy: &LegacyNameTable,
    base_url: &str,
    validate: bool,
    probe: &P,
) -> Replacement {
    let mut replacement = Replacement::default();
    let total = records.len();

    for (index, record) in records.iter().enumerate() {
        let urls = UrlCandidates::new(base_url, record);

        if !validate {
            replacement
                .rules
                .push(css_rule(&record.emoji_char, &urls.primary()));
            continue;
        }

        info!(
            "{} - {:04}/{total} - Fetching Emoji: {}",
            progress_percent(index, total),
            index,
            record.emoji_char
        );

        match resolve(&urls, record, legacy, probe).await {
            Resolution::Found(url) => replacement.rules.push(css_rule(&record.emoji_char, &url)),
            Resolution::Missing {
                attempted_urls,
                legacy_description,
            } => {
                warn!(
                    "FAILED to find URL for emoji: {} - {} / {}",
                    record.emoji_char,
                    urls.description(),
                    legacy_description.as_deref().unwrap_or_default()
                );
                for url in &attempted_urls {
                    warn!("  attempted {url}");
                }

                replacement.invalid.push(InvalidEmoji {
                    record: record.clone(),
                    attempted_urls,
                    legacy_description,
                });
            }
        }
    }

    replacement
}

/// Primary URL, then the legacy name if one exists, otherwise the doubled
/// last code point followed by the dashed description.
async fn resolve<P: UrlProbe>(
    urls: &UrlCandidates<'_>,
    record: &EmojiRecord,
    legacy: &LegacyNameTable,
    probe: &P,
) -> Resolution {
    let mut attempted_urls = Vec::with_capacity(3);
    let mut legacy_description = None;

    let primary = urls.primary();
    attempted_urls.push(primary.clone());
    if probe.is_reachable(&primary).await {
        return Resolution::Found(primary);
    }

    let fallbacks = match legacy.get(&record.emoji_char) {
        Some(name) => {
            let name = normalize_legacy_name(name);
            let url = urls.legacy(&name);
            legacy_description = Some(name);
            vec![url]
        }
        None => vec![urls.doubled_last_code(), urls.dashed()],
    };

    for url in fallbacks {
        attempted_urls.push(url.clone());
        if probe.is_reachable(&url).await {
            return Resolution::Found(url);
        }
    }

    Resolution::Missing {
        attempted_urls,
        legacy_description,
    }
}

/// `05.00%` style: two decimals, zero-padded to six characters.
fn progress_percent(index: usize, total: usize) -> String {
    let percent = if total == 0 {
        0.0
    } else {
        index as f64 / total as f64 * 100.0
    };
    format!("{:0>6}", format!("{percent:.2}%"))
}
