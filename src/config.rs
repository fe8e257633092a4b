use crate::controller::{FailureFeedback, PopupMode};
use crate::images::ImageSource;
use std::{env, fmt::Display, path::PathBuf, str::FromStr};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub vote_log_path: PathBuf,
    pub public_dir: PathBuf,
    pub image_source: ImageSource,
    pub popup_mode: PopupMode,
    pub failure_feedback: FailureFeedback,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            vote_log_path: PathBuf::from("votes.log"),
            public_dir: PathBuf::from("public"),
            image_source: ImageSource::Remote,
            popup_mode: PopupMode::Always,
            failure_feedback: FailureFeedback::Popup,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            vote_log_path: lookup("VOTE_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.vote_log_path),
            public_dir: lookup("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            image_source: parse_or(&lookup, "IMAGE_SOURCE", defaults.image_source),
            popup_mode: parse_or(&lookup, "POPUP_MODE", defaults.popup_mode),
            failure_feedback: parse_or(&lookup, "VOTE_FAILURE_FEEDBACK", defaults.failure_feedback),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|err| {
            warn!("invalid {key} value '{raw}': {err}, using default {default}");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::ImageCatalog;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn unset_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.vote_log_path, PathBuf::from("votes.log"));
        assert_eq!(config.image_source, ImageSource::Remote);
        assert_eq!(config.popup_mode, PopupMode::Always);
        assert_eq!(config.failure_feedback, FailureFeedback::Popup);
    }

    #[test]
    fn default_catalog_needs_no_local_assets() {
        let catalog = ImageCatalog::new(config_from(&[]).image_source);
        for _ in 0..50 {
            assert!(catalog.pick_random().starts_with("https://"));
        }
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from(&[
            ("PORT", "8081"),
            ("VOTE_LOG_PATH", "/tmp/votes.jsonl"),
            ("IMAGE_SOURCE", "local"),
            ("POPUP_MODE", "bad-only"),
            ("VOTE_FAILURE_FEEDBACK", "silent"),
        ]);
        assert_eq!(config.port, 8081);
        assert_eq!(config.vote_log_path, PathBuf::from("/tmp/votes.jsonl"));
        assert_eq!(config.image_source, ImageSource::Local);
        assert_eq!(config.popup_mode, PopupMode::BadOnly);
        assert_eq!(config.failure_feedback, FailureFeedback::Silent);
    }

    #[test]
    fn invalid_port_falls_back() {
        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
