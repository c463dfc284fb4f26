use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, anyhow};
use confik::{Configuration, EnvSource};
use serde::{Deserialize, Serialize};

use self::yaml::YamlFileSource;

#[derive(Debug, Clone, Serialize, Deserialize, Configuration)]
pub struct CdnConfig {
    pub host: String,
    pub vendor: String,
    pub release: String,
}

impl CdnConfig {
    /// `{host}/{vendor}/{release}`, the directory every image URL lives under.
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.host.trim_end_matches('/'),
            self.vendor,
            self.release
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Configuration)]
pub struct UnicodeConfig {
    pub emoji_test_url: String,
    pub legacy_data_url: String,
    pub validate_urls: bool,
    /// Zero disables the timeout.
    pub request_timeout_secs: u64,
}

impl UnicodeConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Configuration)]
pub struct OutputConfig {
    /// File stem for the unicode pipeline: `<stem>.css` and `<stem>_invalid.json`.
    pub stem: String,
}

impl OutputConfig {
    pub fn css_path(&self) -> String {
        format!("{}.css", self.stem)
    }

    pub fn invalid_report_path(&self) -> String {
        format!("{}_invalid.json", self.stem)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Configuration)]
pub struct FolderConfig {
    pub path: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Configuration)]
pub struct GeneratorConfig {
    pub cdn: CdnConfig,
    pub unicode: UnicodeConfig,
    pub output: OutputConfig,
    pub folder: FolderConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cdn: CdnConfig {
                host: "https://em-content.zobj.net/source".into(),
                vendor: "apple".into(),
                release: "391".into(),
            },
            unicode: UnicodeConfig {
                emoji_test_url: "https://www.unicode.org/Public/emoji/latest/emoji-test.txt"
                    .into(),
                legacy_data_url: "https://www.unicode.org/Public/emoji/1.0/emoji-data.txt".into(),
                validate_urls: true,
                request_timeout_secs: 30,
            },
            output: OutputConfig {
                stem: "emoji-replace".into(),
            },
            folder: FolderConfig {
                path: "emojis-download".into(),
                output: "emoji-replacement.css".into(),
            },
        }
    }
}

impl GeneratorConfig {
    /// `config.yml` shipped next to the crate manifest.
    pub fn default_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("config.yml")
    }

    /// Load configuration from `path` (if present) and environment variables.
    ///
    /// Without a config file the compiled-in defaults are used unless the
    /// environment supplies every value. A config file that exists but cannot
    /// be built is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let mut builder = GeneratorConfig::builder();
        let has_file = path.exists();

        if has_file {
            builder.override_with(YamlFileSource::new(path));
        } else {
            log::debug!("no config file at {}", path.display());
        }

        builder.override_with(EnvSource::new());

        match builder.try_build() {
            Ok(cfg) => Ok(cfg),
            Err(err) if has_file => Err(anyhow!("loading {}: {err}", path.display())),
            Err(err) => {
                log::warn!("No usable env overrides: {err}. Using defaults.");
                Ok(GeneratorConfig::default())
            }
        }
    }
}

mod yaml {
    use std::error::Error;
    use std::path::PathBuf;

    use confik::Source;
    use serde::de::DeserializeOwned;

    #[derive(Debug)]
    pub struct YamlFileSource {
        path: PathBuf,
    }

    impl YamlFileSource {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }
    }

    impl<T> Source<T> for YamlFileSource
    where
        T: DeserializeOwned + confik::ConfigurationBuilder,
    {
        fn allows_secrets(&self) -> bool {
            false
        }

        fn provide(&self) -> Result<T, Box<dyn Error + Sync + Send>> {
            let contents = std::fs::read_to_string(&self.path)?;
            let parsed = serde_yaml::from_str(&contents)?;
            Ok(parsed)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn base_url_joins_host_vendor_and_release() {
        let mut cfg = GeneratorConfig::default();
        assert_eq!(
            cfg.cdn.base_url(),
            "https://em-content.zobj.net/source/apple/391"
        );

        cfg.cdn.host = "https://cdn.example/source/".into();
        cfg.cdn.vendor = "google".into();
        assert_eq!(cfg.cdn.base_url(), "https://cdn.example/source/google/391");
    }

    #[test]
    fn output_paths_derive_from_stem() {
        let out = OutputConfig {
            stem: "emoji-replace".into(),
        };
        assert_eq!(out.css_path(), "emoji-replace.css");
        assert_eq!(out.invalid_report_path(), "emoji-replace_invalid.json");
    }

    #[test]
    fn zero_timeout_disables_it() {
        let mut cfg = GeneratorConfig::default().unicode;
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(30)));
        cfg.request_timeout_secs = 0;
        assert_eq!(cfg.request_timeout(), None);
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(
            &path,
            r#"
cdn:
  host: https://em-content.zobj.net/source
  vendor: google
  release: "391"
unicode:
  emoji_test_url: https://www.unicode.org/Public/emoji/latest/emoji-test.txt
  legacy_data_url: https://www.unicode.org/Public/emoji/1.0/emoji-data.txt
  validate_urls: false
  request_timeout_secs: 5
output:
  stem: out/emoji
folder:
  path: emojis-download
  output: emoji-replacement.css
"#,
        )
        .unwrap();

        let cfg = GeneratorConfig::load(&path).unwrap();
        assert_eq!(cfg.cdn.vendor, "google");
        assert!(!cfg.unicode.validate_urls);
        assert_eq!(cfg.unicode.request_timeout_secs, 5);
        assert_eq!(cfg.output.stem, "out/emoji");
    }

    #[test]
    fn partial_or_broken_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");

        fs::write(&path, "cdn:\n  vendor: google\n").unwrap();
        assert!(GeneratorConfig::load(&path).is_err());

        fs::write(&path, "cdn: [oops").unwrap();
        let err = GeneratorConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("config.yml"));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = GeneratorConfig::load(&dir.path().join("absent.yml")).unwrap();
        assert_eq!(cfg.cdn.vendor, "apple");
        assert_eq!(cfg.output.stem, "emoji-replace");
    }

    #[test]
    fn shipped_config_is_found_and_loads() {
        let path = GeneratorConfig::default_path();
        assert!(path.exists(), "{} missing", path.display());
        let cfg = GeneratorConfig::load(&path).unwrap();
        assert_eq!(cfg.cdn.release, "391");
    }
}
