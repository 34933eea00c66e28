//! Process startup: `.env` loading, configuration check and client wiring.

use std::sync::Arc;

use azure_ox::AzureOpenAI;
use telegram_ox::Telegram;
use tracing::info;

use crate::config::{Config, ConfigError};
use crate::dispatcher::Dispatcher;
use crate::relay::CompletionRelay;

/// Load `.env` from the working directory into the process environment.
///
/// A missing file is fine. A file that exists but cannot be read or parsed
/// yields a warning for the caller to print, since logging is not set up yet.
pub fn load_dotenv() -> Option<String> {
    dotenv_warning(dotenvy::dotenv())
}

fn dotenv_warning<T>(result: Result<T, dotenvy::Error>) -> Option<String> {
    match result {
        Err(e) if !e.not_found() => Some(format!("ignoring unreadable .env file: {e}")),
        _ => None,
    }
}

/// Validate the configuration and build the dispatcher.
///
/// When a required variable is missing, nothing is constructed and every
/// missing name is reported.
pub fn startup<F>(lookup: F) -> Result<Dispatcher, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = Config::from_lookup(lookup)?;
    Ok(dispatcher_for(&config))
}

/// Wire the Azure and Telegram clients described by `config`.
pub fn dispatcher_for(config: &Config) -> Dispatcher {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        deployment = %config.azure.deployment,
        api_version = %config.azure.api_version,
        "relay-ox starting"
    );

    let azure = AzureOpenAI::new(
        &config.azure.endpoint,
        &config.azure.api_key,
        &config.azure.deployment,
        &config.azure.api_version,
    );
    let relay = CompletionRelay::new(
        Arc::new(azure),
        config.azure.deployment.as_str(),
        config.generation.clone(),
    );
    let bot = Telegram::new(&config.bot_token).with_base_url(&config.telegram_api_url);

    Dispatcher::new(bot, relay).with_poll_timeout(config.poll_timeout_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REQUIRED_VARS;
    use crate::error::DispatchError;
    use std::collections::HashMap;
    use tokio_util::sync::CancellationToken;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lookup_in(vars: HashMap<&'static str, String>) -> impl Fn(&str) -> Option<String> {
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_reports_every_required_variable() {
        let err = startup(|_| None).err().unwrap();

        assert_eq!(
            err,
            ConfigError::Missing {
                names: REQUIRED_VARS.to_vec()
            }
        );
        for name in REQUIRED_VARS {
            assert!(err.to_string().contains(name));
        }
    }

    #[test]
    fn blank_values_block_startup() {
        let vars = HashMap::from([
            ("BOT_TOKEN", "123456:TEST-TOKEN".to_string()),
            ("AZURE_OPENAI_API_KEY", "   ".to_string()),
            ("AZURE_OPENAI_ENDPOINT", "https://example.openai.azure.com".to_string()),
        ]);

        let err = startup(lookup_in(vars)).err().unwrap();

        assert_eq!(
            err,
            ConfigError::Missing {
                names: vec![
                    "AZURE_OPENAI_API_KEY",
                    "AZURE_OPENAI_DEPLOYMENT_NAME",
                    "AZURE_OPENAI_API_VERSION"
                ]
            }
        );
    }

    #[tokio::test]
    async fn complete_environment_wires_the_configured_bot() {
        let telegram = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123456:TEST-TOKEN/getMe"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 401,
                "description": "Unauthorized"
            })))
            .expect(1)
            .mount(&telegram)
            .await;
        let vars = HashMap::from([
            ("BOT_TOKEN", "123456:TEST-TOKEN".to_string()),
            ("AZURE_OPENAI_API_KEY", "test-key".to_string()),
            ("AZURE_OPENAI_ENDPOINT", "https://example.openai.azure.com".to_string()),
            ("AZURE_OPENAI_DEPLOYMENT_NAME", "gpt-4o".to_string()),
            ("AZURE_OPENAI_API_VERSION", "2024-06-01".to_string()),
            ("TELEGRAM_API_URL", telegram.uri()),
        ]);

        let dispatcher = startup(lookup_in(vars)).unwrap();
        let result = dispatcher.run(CancellationToken::new()).await;

        assert!(matches!(result, Err(DispatchError::Identity(_))));
    }

    #[test]
    fn missing_env_file_is_silent() {
        let result = dotenvy::from_path("/nonexistent/relay-ox/.env");
        assert_eq!(dotenv_warning(result), None);
    }

    #[test]
    fn malformed_env_file_is_reported() {
        let result = dotenvy::from_read("RELAY_TEST_BROKEN='unterminated\n".as_bytes());

        let warning = dotenv_warning(result).unwrap();
        assert!(warning.contains(".env"));
    }
}
