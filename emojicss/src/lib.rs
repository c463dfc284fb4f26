pub mod emojicss;

use anyhow::Result;
use log::info;

use crate::emojicss::{GeneratorConfig, HttpClient};

/// Build the stylesheet from the Unicode reference files.
pub async fn run_unicode(config: &GeneratorConfig) -> Result<()> {
    let client = HttpClient::new(config.unicode.request_timeout())?;
    let replacement = emojicss::create_emoji_replace_css_file(config, &client).await?;

    info!(
        "{} rules written to {}, {} emoji without an image",
        replacement.rules.len(),
        config.output.css_path(),
        replacement.invalid.len()
    );
    Ok(())
}

/// Build the stylesheet from a folder of downloaded images.
pub fn run_folder(config: &GeneratorConfig) -> Result<()> {
    let rules = emojicss::generate_css(&config.folder, &config.cdn)?;
    info!("{} rules written to {}", rules.len(), config.folder.output);
    Ok(())
}
