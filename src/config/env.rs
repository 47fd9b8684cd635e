use std::collections::HashMap;
use std::time::Duration;

use humantime::parse_duration;

use crate::error::ConfigError;

/// Where flat overrides such as `NOTIFY_REVERSE` are read from.
pub(super) trait EnvSource {
    fn var(&self, key: &'static str) -> Result<Option<String>, ConfigError>;
}

pub(super) struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &'static str) -> Result<Option<String>, ConfigError> {
        match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(err) => Err(ConfigError::InvalidField {
                field: key,
                message: err.to_string(),
            }),
        }
    }
}

impl EnvSource for HashMap<&'static str, String> {
    fn var(&self, key: &'static str) -> Result<Option<String>, ConfigError> {
        Ok(self.get(key).cloned())
    }
}

/// Trimmed value, with blank treated as unset.
pub(super) fn env_string(
    src: &impl EnvSource,
    key: &'static str,
) -> Result<Option<String>, ConfigError> {
    Ok(src
        .var(key)?
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

pub(super) fn env_parse<T>(src: &impl EnvSource, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_string(src, key)?
        .map(|value| {
            value.parse::<T>().map_err(|err| ConfigError::InvalidField {
                field: key,
                message: err.to_string(),
            })
        })
        .transpose()
}

pub(super) fn env_duration(
    src: &impl EnvSource,
    key: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    env_string(src, key)?
        .map(|value| {
            parse_duration(&value).map_err(|err| ConfigError::InvalidField {
                field: key,
                message: err.to_string(),
            })
        })
        .transpose()
}
