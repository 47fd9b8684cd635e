use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

use crate::Result;
use crate::error::Error;

const FALLBACK_FILTER: &str = "warn,global_notifications=info";

/// Install the global tracing subscriber.
///
/// The filter is the first valid candidate among `explicit_filter`,
/// `RUST_LOG` and a built-in fallback.
///
/// # Errors
///
/// Returns an error if no candidate filter parses, if JSON output is requested
/// without the `json-logs` feature, or if a global subscriber is already set.
pub fn init_tracing(explicit_filter: Option<&str>, use_json: bool) -> Result<()> {
    let env = std::env::var("RUST_LOG").ok();
    let filter = select_filter(explicit_filter, env.as_deref())?;

    #[cfg(feature = "json-logs")]
    if use_json {
        let subscriber = Registry::default().with(filter).with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .json()
                .flatten_event(true),
        );
        return tracing::subscriber::set_global_default(subscriber)
            .map_err(|err| Error::Telemetry(err.to_string()));
    }

    #[cfg(not(feature = "json-logs"))]
    if use_json {
        return Err(Error::Telemetry(
            "binary was built without the `json-logs` feature".to_string(),
        ));
    }

    let subscriber = Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true));
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| Error::Telemetry(err.to_string()))
}

fn select_filter(explicit: Option<&str>, env: Option<&str>) -> Result<EnvFilter> {
    explicit
        .into_iter()
        .chain(env)
        .chain(std::iter::once(FALLBACK_FILTER))
        .find_map(|candidate| EnvFilter::try_new(candidate).ok())
        .ok_or_else(|| Error::Telemetry("invalid log filter".to_string()))
}

#[cfg(test)]
mod tests {
    use super::select_filter;

    #[test]
    fn explicit_filter_wins_over_env() {
        let filter = match select_filter(Some("global_notifications=trace"), Some("error")) {
            Ok(filter) => filter,
            Err(err) => panic!("filter should parse: {err}"),
        };
        assert!(filter.to_string().contains("global_notifications=trace"));
    }

    #[test]
    fn invalid_candidates_fall_through() {
        let filter = match select_filter(Some("global_notifications=loud"), None) {
            Ok(filter) => filter,
            Err(err) => panic!("fallback should parse: {err}"),
        };
        assert!(filter.to_string().contains("global_notifications=info"));
    }
}
