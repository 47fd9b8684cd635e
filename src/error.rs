use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

/// Startup configuration failures. The store itself has no error path.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file is malformed, or a `GLOBAL_NOTIFICATIONS__*` variable does
    /// not fit the expected shape.
    #[error("failed to load configuration from {path}")]
    Load {
        path: PathBuf,
        #[source]
        source: ::config::ConfigError,
    },
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}

impl Error {
    /// Name of the offending configuration field, when there is one.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Config(ConfigError::InvalidField { field, .. }) => Some(*field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Error};
    use std::error::Error as StdError;
    use std::path::PathBuf;

    #[test]
    fn load_errors_keep_their_source() {
        let err = Error::from(ConfigError::Load {
            path: PathBuf::from("notifications.toml"),
            source: ::config::ConfigError::Message("bad value".to_string()),
        });
        assert_eq!(
            err.to_string(),
            "failed to load configuration from notifications.toml"
        );
        assert!(err.field().is_none());
        let cause = err.source().map(ToString::to_string);
        assert_eq!(cause.as_deref(), Some("bad value"));
    }

    #[test]
    fn field_is_reported_for_invalid_values() {
        let err = Error::from(ConfigError::InvalidField {
            field: "display.class",
            message: "value cannot be empty".to_string(),
        });
        assert_eq!(err.field(), Some("display.class"));
    }
}
