pub mod config;
pub mod fetch;
pub mod folder;
pub mod output;
pub mod replace;
pub mod types;
pub mod unicode;
pub mod urls;

pub use config::GeneratorConfig;
pub use fetch::{HttpClient, UrlProbe};
pub use folder::generate_css;
pub use replace::{Replacement, build_replacement, create_emoji_replace_css_file};
pub use types::{EmojiRecord, InvalidEmoji, LegacyNameTable};
