use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;
use crate::store::Defaults;
use crate::types::Position;
use crate::ui::ListOptions;

use super::defaults::{
    default_cancel_text, default_class, default_ok_text, default_wrapper_class,
};
use super::env::{EnvSource, env_duration, env_parse, env_string};
use super::{Config, ENV_PREFIX, HumantimeDuration};

pub(super) fn load(path: &Path) -> std::result::Result<RawConfig, ConfigError> {
    let mut builder = ::config::Config::builder();
    builder = builder.add_source(
        ::config::File::from(path)
            .format(::config::FileFormat::Toml)
            .required(false),
    );
    builder = builder.add_source(
        ::config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    builder
        .build()
        .and_then(::config::Config::try_deserialize)
        .map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) notifications: RawNotifications,
    #[serde(default)]
    pub(super) display: RawDisplay,
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub(super) struct RawNotifications {
    #[serde(default)]
    #[serde_as(as = "Option<HumantimeDuration>")]
    pub(super) default_duration: Option<Duration>,
    #[serde(default)]
    pub(super) default_position: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawDisplay {
    #[serde(default)]
    pub(super) reverse: bool,
    #[serde(default = "default_wrapper_class")]
    pub(super) wrapper_class: String,
    #[serde(default = "default_class")]
    pub(super) class: String,
    #[serde(default = "default_ok_text")]
    pub(super) ok_text: String,
    #[serde(default = "default_cancel_text")]
    pub(super) cancel_text: String,
}

impl Default for RawDisplay {
    fn default() -> Self {
        Self {
            reverse: false,
            wrapper_class: default_wrapper_class(),
            class: default_class(),
            ok_text: default_ok_text(),
            cancel_text: default_cancel_text(),
        }
    }
}

impl RawConfig {
    pub(super) fn apply_env_overrides(
        &mut self,
        env: &impl EnvSource,
    ) -> std::result::Result<(), ConfigError> {
        if let Some(duration) = env_duration(env, "NOTIFY_DEFAULT_DURATION")? {
            self.notifications.default_duration = Some(duration);
        }
        if let Some(position) = env_string(env, "NOTIFY_DEFAULT_POSITION")? {
            self.notifications.default_position = Some(position);
        }
        if let Some(reverse) = env_parse::<bool>(env, "NOTIFY_REVERSE")? {
            self.display.reverse = reverse;
        }
        if let Some(ok_text) = env_string(env, "NOTIFY_OK_TEXT")? {
            self.display.ok_text = ok_text;
        }
        if let Some(cancel_text) = env_string(env, "NOTIFY_CANCEL_TEXT")? {
            self.display.cancel_text = cancel_text;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        if self.notifications.default_duration.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::InvalidField {
                field: "notifications.default_duration",
                message: "duration must be greater than zero".to_string(),
            }
            .into());
        }

        let position = self
            .notifications
            .default_position
            .as_deref()
            .map(str::parse::<Position>)
            .transpose()
            .map_err(|message| ConfigError::InvalidField {
                field: "notifications.default_position",
                message,
            })?;

        let RawDisplay {
            reverse,
            wrapper_class,
            class,
            ok_text,
            cancel_text,
        } = self.display;

        for (field, value) in [
            ("display.wrapper_class", &wrapper_class),
            ("display.class", &class),
            ("display.ok_text", &ok_text),
            ("display.cancel_text", &cancel_text),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidField {
                    field,
                    message: "value cannot be empty".to_string(),
                }
                .into());
            }
        }

        Ok(Config {
            defaults: Defaults {
                duration: self.notifications.default_duration,
                position,
            },
            list: ListOptions {
                reverse,
                wrapper_class,
                class,
                ok_text,
                cancel_text,
            },
        })
    }
}
