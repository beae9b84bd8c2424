use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::moderation::wordlist::{read_term_file, WordListFilter, DEFAULT_FLAGGED_TERMS};

/// How a configured term file combines with the built-in list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermListMode {
    /// Built-in terms first, then the file's terms (default).
    Extend,
    /// The file's terms only.
    Replace,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL including the `/api` prefix.
    pub api_url: String,
    /// Where the logged-in user is remembered between runs.
    pub session_path: PathBuf,
    /// Optional flagged-term policy file (one term per line).
    pub flagged_terms_path: Option<PathBuf>,
    pub flagged_terms_mode: TermListMode,
    /// How long the moderation warning stays on screen.
    pub warning_delay: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Every value has a default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let flagged_terms_mode = match lookup("CARECORNER_FLAGGED_TERMS_MODE").as_deref() {
            Some("replace") => TermListMode::Replace,
            Some("extend") | None => TermListMode::Extend,
            Some(other) => anyhow::bail!(
                "CARECORNER_FLAGGED_TERMS_MODE must be \"extend\" or \"replace\", got {other:?}"
            ),
        };

        let warning_delay = match lookup("CARECORNER_WARNING_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().with_context(|| {
                format!("CARECORNER_WARNING_SECS must be a whole number of seconds, got {raw:?}")
            })?),
            None => Duration::from_secs(5),
        };

        Ok(Self {
            api_url: lookup("CARECORNER_API_URL")
                .unwrap_or_else(|| crate::api::client::DEFAULT_API_URL.to_string()),
            session_path: lookup("CARECORNER_SESSION_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(crate::session::default_session_path),
            flagged_terms_path: lookup("CARECORNER_FLAGGED_TERMS")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            flagged_terms_mode,
            warning_delay,
        })
    }

    /// Build the moderation filter this configuration asks for.
    pub fn build_filter(&self) -> Result<WordListFilter> {
        let Some(path) = &self.flagged_terms_path else {
            return WordListFilter::builtin();
        };

        match self.flagged_terms_mode {
            TermListMode::Replace => {
                let filter = WordListFilter::from_file(path)?;
                if filter.is_empty() {
                    anyhow::bail!(
                        "Flagged-term list {} has no terms; replace mode would disable moderation",
                        path.display()
                    );
                }
                Ok(filter)
            }
            TermListMode::Extend => {
                let extra = read_term_file(path)?;
                let filter = WordListFilter::extended(extra)?;
                tracing::info!(
                    path = %path.display(),
                    added = filter.len().saturating_sub(DEFAULT_FLAGGED_TERMS.len()),
                    "Extended flagged-term list"
                );
                Ok(filter)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.flagged_terms_mode, TermListMode::Extend);
        assert!(config.flagged_terms_path.is_none());
        assert_eq!(config.warning_delay, Duration::from_secs(5));
        assert!(config.session_path.ends_with("carecorner/session.json"));
    }

    #[test]
    fn test_rejects_bad_mode_and_delay() {
        assert!(Config::from_lookup(lookup_from(&[("CARECORNER_FLAGGED_TERMS_MODE", "merge")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("CARECORNER_WARNING_SECS", "soon")])).is_err());
    }

    #[test]
    fn test_build_filter_extend_and_replace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.txt");
        std::fs::write(&path, "# house rules\njerk\n").unwrap();
        let path_str = path.to_str().unwrap();

        let extended = Config::from_lookup(lookup_from(&[("CARECORNER_FLAGGED_TERMS", path_str)]))
            .unwrap()
            .build_filter()
            .unwrap();
        assert_eq!(extended.len(), DEFAULT_FLAGGED_TERMS.len() + 1);

        let replaced = Config::from_lookup(lookup_from(&[
            ("CARECORNER_FLAGGED_TERMS", path_str),
            ("CARECORNER_FLAGGED_TERMS_MODE", "replace"),
        ]))
        .unwrap()
        .build_filter()
        .unwrap();
        assert_eq!(replaced.terms().collect::<Vec<_>>(), vec!["jerk"]);
    }

    #[test]
    fn test_replace_with_empty_list_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.txt");
        std::fs::write(&path, "# nothing yet

").unwrap();
        let path_str = path.to_str().unwrap();

        let replace = Config::from_lookup(lookup_from(&[
            ("CARECORNER_FLAGGED_TERMS", path_str),
            ("CARECORNER_FLAGGED_TERMS_MODE", "replace"),
        ]))
        .unwrap();
        assert!(replace.build_filter().is_err());

        let extend = Config::from_lookup(lookup_from(&[("CARECORNER_FLAGGED_TERMS", path_str)]))
            .unwrap()
            .build_filter()
            .unwrap();
        assert_eq!(extend.len(), DEFAULT_FLAGGED_TERMS.len());
    }
}
