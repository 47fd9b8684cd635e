//! Startup configuration: notification defaults and list display options.
//!
//! Sources, lowest precedence first: the TOML file (optional), nested
//! `GLOBAL_NOTIFICATIONS__SECTION__KEY` variables, then the flat `NOTIFY_*`
//! overrides.
//!
//! ```toml
//! [notifications]
//! default_duration = "5s"
//! default_position = "top"
//!
//! [display]
//! reverse = true
//! ok_text = "Confirm"
//! ```

use std::path::Path;

use crate::Result;
use crate::error::Error;
use crate::store::Defaults;
use crate::ui::ListOptions;

mod defaults;
mod env;
mod raw;
mod serde;

use self::serde::HumantimeDuration;

const ENV_PREFIX: &str = "GLOBAL_NOTIFICATIONS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub defaults: Defaults,
    pub list: ListOptions,
}

impl Config {
    /// Load configuration from a file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed,
    /// when an environment override is malformed, or when a value fails
    /// validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path.as_ref()).map_err(Error::from)?;
        raw.apply_env_overrides(&env::ProcessEnv)
            .map_err(Error::from)?;
        raw.validate_and_build()
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use super::raw::{RawConfig, load};
    use crate::error::{ConfigError, Error};
    use crate::types::Position;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "global-notifications-{}-{name}.toml",
            std::process::id()
        ));
        if let Err(err) = std::fs::write(&path, contents) {
            panic!("cannot write {}: {err}", path.display());
        }
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let raw = match load(&PathBuf::from("/nonexistent/global-notifications.toml")) {
            Ok(raw) => raw,
            Err(err) => panic!("missing file must be tolerated: {err}"),
        };
        let config = match raw.validate_and_build() {
            Ok(config) => config,
            Err(err) => panic!("defaults must validate: {err}"),
        };
        assert_eq!(config, Config::default());
    }

    #[test]
    fn file_values_are_applied() {
        let path = write_temp(
            "file-values",
            r#"
[notifications]
default_duration = "3s"
default_position = "Top"

[display]
reverse = true
class = "toast"
"#,
        );
        let loaded = load(&path);
        let _ = std::fs::remove_file(&path);
        let config = match loaded.map_err(Error::from).and_then(RawConfig::validate_and_build) {
            Ok(config) => config,
            Err(err) => panic!("config should load: {err}"),
        };

        assert_eq!(config.defaults.duration, Some(Duration::from_secs(3)));
        assert_eq!(config.defaults.position, Some(Position::Top));
        assert!(config.list.reverse);
        assert_eq!(config.list.class, "toast");
        assert_eq!(config.list.ok_text, "OK");
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let path = write_temp("malformed", "[notifications\ndefault_duration = ");
        let loaded = load(&path);
        let _ = std::fs::remove_file(&path);
        match loaded {
            Err(ConfigError::Load { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected load error, got {other:?}"),
        }
    }

    #[test]
    fn flat_overrides_win() {
        let mut raw = RawConfig::default();
        let env: HashMap<&'static str, String> = [
            ("NOTIFY_DEFAULT_DURATION", "10s".to_string()),
            ("NOTIFY_DEFAULT_POSITION", "bottom".to_string()),
            ("NOTIFY_CANCEL_TEXT", "Dismiss".to_string()),
        ]
        .into_iter()
        .collect();
        if let Err(err) = raw.apply_env_overrides(&env) {
            panic!("overrides should apply: {err}");
        }
        let config = match raw.validate_and_build() {
            Ok(config) => config,
            Err(err) => panic!("config should validate: {err}"),
        };
        assert_eq!(config.defaults.duration, Some(Duration::from_secs(10)));
        assert_eq!(config.defaults.position, Some(Position::Bottom));
        assert_eq!(config.list.cancel_text, "Dismiss");
    }

    #[test]
    fn rejects_unknown_position() {
        let mut raw = RawConfig::default();
        raw.notifications.default_position = Some("middle".to_string());
        let err = raw.validate_and_build().err();
        assert_eq!(
            err.as_ref().and_then(Error::field),
            Some("notifications.default_position")
        );
    }

    #[test]
    fn rejects_zero_duration_and_blank_labels() {
        let mut raw = RawConfig::default();
        raw.notifications.default_duration = Some(Duration::ZERO);
        assert!(matches!(
            raw.validate_and_build(),
            Err(Error::Config(ConfigError::InvalidField {
                field: "notifications.default_duration",
                ..
            }))
        ));

        let mut raw = RawConfig::default();
        raw.display.ok_text = "  ".to_string();
        assert_eq!(
            raw.validate_and_build().err().as_ref().and_then(Error::field),
            Some("display.ok_text")
        );
    }
}
