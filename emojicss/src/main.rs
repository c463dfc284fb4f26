use std::path::PathBuf;

use clap::{Parser, Subcommand};
use emojicss::emojicss::GeneratorConfig;
use env_logger::Env;
use log::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// YAML configuration file [default: config.yml next to the crate manifest]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emoji image vendor, e.g. `apple` or `google`
    #[arg(long, global = true)]
    vendor: Option<String>,

    #[command(subcommand)]
    action: Actions,
}

#[derive(Subcommand)]
enum Actions {
    /// Build from the Unicode emoji-test list, probing the CDN for each image
    Unicode {
        /// Output file stem (`<stem>.css`, `<stem>_invalid.json`)
        #[arg(long)]
        output: Option<String>,

        /// Accept every primary URL without probing it
        #[arg(long)]
        skip_validation: bool,
    },
    /// Build from the file names in a folder of downloaded images
    Folder {
        /// Folder to scan
        #[arg(long)]
        path: Option<String>,

        /// CSS file to write
        #[arg(long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(GeneratorConfig::default_path);
    let mut config = GeneratorConfig::load(&config_path)?;
    if let Some(vendor) = cli.vendor {
        config.cdn.vendor = vendor;
    }
    info!("using {} images from {}", config.cdn.vendor, config.cdn.host);

    match cli.action {
        Actions::Unicode {
            output,
            skip_validation,
        } => {
            if let Some(stem) = output {
                config.output.stem = stem;
            }
            if skip_validation {
                config.unicode.validate_urls = false;
            }
            emojicss::run_unicode(&config).await
        }
        Actions::Folder { path, output } => {
            if let Some(path) = path {
                config.folder.path = path;
            }
            if let Some(output) = output {
                config.folder.output = output;
            }
            emojicss::run_folder(&config)
        }
    }
}
