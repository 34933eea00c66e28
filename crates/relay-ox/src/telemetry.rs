use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `settings.filter`. An invalid filter falls
/// back to `info` with a warning on stderr, since no subscriber exists yet.
pub fn init(settings: &LogSettings) {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match settings.filter.parse::<EnvFilter>() {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!(
                    "WARN: RELAY_LOG='{}' is not a valid tracing filter ({e}); falling back to 'info'",
                    settings.filter
                );
                EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = if settings.json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
}
