// crates/flagtable-core/src/config.rs

//! Pipeline configuration.
//!
//! Every field has a default matching the public flagcdn endpoints, so an
//! empty JSON object (`{}`) is a complete config file.

use crate::error::{FlagTableError, Result};
use crate::loader::{DirectorySource, FailurePolicy, FlagLoadPolicy, FlagSource};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_LOCALE: &str = "pl";
pub const DEFAULT_DIRECTORY_BASE: &str = "https://flagcdn.com";
pub const DEFAULT_IMAGE_BASE: &str = "https://flagcdn.com/w80";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Language of the directory, the article host and the column headers.
    pub locale: String,
    pub directory_base: String,
    pub image_base: String,
    /// Article host; `<locale>.wikipedia.org` when unset.
    pub wiki_host: Option<String>,

    pub directory_timeout_ms: u64,
    pub flag_timeout_ms: u64,
    pub connect_timeout_ms: u64,

    pub fetch_flags: bool,
    pub workers: usize,
    pub on_flag_failure: FailurePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            directory_base: DEFAULT_DIRECTORY_BASE.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            wiki_host: None,
            directory_timeout_ms: 10_000,
            flag_timeout_ms: 2_000,
            connect_timeout_ms: 20_000,
            fetch_flags: true,
            workers: 1,
            on_flag_failure: FailurePolicy::SkipItem,
        }
    }
}

impl PipelineConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| FlagTableError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        let locale_ok = !self.locale.is_empty()
            && self.locale.chars().all(|c| c.is_ascii_alphabetic() || c == '-');
        if !locale_ok {
            return Err(FlagTableError::InvalidConfig(format!(
                "locale '{}' must be a language tag such as 'pl' or 'en'",
                self.locale
            )));
        }
        for (field, url) in [
            ("directory_base", &self.directory_base),
            ("image_base", &self.image_base),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(FlagTableError::InvalidConfig(format!(
                    "{field} must be an absolute http(s) URL, got '{url}'"
                )));
            }
        }
        if self.directory_timeout_ms == 0 || self.flag_timeout_ms == 0 || self.connect_timeout_ms == 0 {
            return Err(FlagTableError::InvalidConfig("timeouts must be non-zero".into()));
        }
        if self.workers == 0 {
            return Err(FlagTableError::InvalidConfig("workers must be at least 1".into()));
        }
        Ok(())
    }

    pub fn directory_timeout(&self) -> Duration {
        Duration::from_millis(self.directory_timeout_ms)
    }

    pub fn flag_timeout(&self) -> Duration {
        Duration::from_millis(self.flag_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn directory_source(&self) -> DirectorySource {
        DirectorySource::for_locale(&self.directory_base, &self.locale)
            .with_timeout(self.directory_timeout())
    }

    pub fn flag_source(&self) -> FlagSource {
        FlagSource::new(&self.image_base).with_timeout(self.flag_timeout())
    }

    pub fn flag_policy(&self) -> FlagLoadPolicy {
        FlagLoadPolicy {
            on_failure: self.on_flag_failure,
            workers: 1,
        }
        .with_workers(self.workers)
    }

    /// `https://<host>/wiki/`, ready for a slug to be appended.
    pub fn article_base(&self) -> String {
        match &self.wiki_host {
            Some(host) => format!("https://{host}/wiki/"),
            None => format!("https://{}.wikipedia.org/wiki/", self.locale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_public_endpoints() {
        let cfg = PipelineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.directory_source().url, "https://flagcdn.com/pl/codes.json");
        assert_eq!(cfg.directory_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.flag_source().url_for("pl"), "https://flagcdn.com/w80/pl.png");
        assert_eq!(cfg.flag_timeout(), Duration::from_secs(2));
        assert_eq!(cfg.connect_timeout(), Duration::from_secs(20));
        assert_eq!(cfg.article_base(), "https://pl.wikipedia.org/wiki/");
        assert_eq!(cfg.flag_policy(), FlagLoadPolicy::best_effort());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: PipelineConfig =
            serde_json::from_str(r#"{"locale":"en","workers":4,"on_flag_failure":"abort_batch"}"#).unwrap();
        assert_eq!(cfg.locale, "en");
        assert_eq!(cfg.image_base, DEFAULT_IMAGE_BASE);
        assert_eq!(cfg.article_base(), "https://en.wikipedia.org/wiki/");
        assert_eq!(cfg.flag_policy(), FlagLoadPolicy::strict().with_workers(4));
    }

    #[test]
    fn explicit_wiki_host_wins() {
        let cfg = PipelineConfig {
            wiki_host: Some("wiki.example.org".into()),
            ..PipelineConfig::default()
        };
        assert_eq!(cfg.article_base(), "https://wiki.example.org/wiki/");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad_locale = PipelineConfig { locale: "../etc".into(), ..PipelineConfig::default() };
        assert!(matches!(bad_locale.validate(), Err(FlagTableError::InvalidConfig(_))));

        let bad_url = PipelineConfig { image_base: "flagcdn.com/w80".into(), ..PipelineConfig::default() };
        assert!(bad_url.validate().is_err());

        let no_workers = PipelineConfig { workers: 0, ..PipelineConfig::default() };
        assert!(no_workers.validate().is_err());

        let zero_timeout = PipelineConfig { flag_timeout_ms: 0, ..PipelineConfig::default() };
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!("flagtable-config-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(br#"{"fetch_flags": false, "flag_timeout_ms": 500}"#).unwrap();
        drop(file);

        let cfg = PipelineConfig::from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert!(!cfg.fetch_flags);
        assert_eq!(cfg.flag_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn malformed_file_names_the_path() {
        let path = std::env::temp_dir().join(format!("flagtable-bad-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();

        let err = PipelineConfig::from_path(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(matches!(err, FlagTableError::ConfigParse { path: ref p, .. } if p == &path));
    }
}
