//! Process configuration, loaded once from the environment at startup.

use std::fmt;
use std::str::FromStr;

use azure_ox::client::{API_KEY_ENV, API_VERSION_ENV, DEPLOYMENT_ENV, ENDPOINT_ENV};
use telegram_ox::client::TOKEN_ENV;
use thiserror::Error;
use tracing::warn;

/// Variables that must be set, non-empty, before the bot may start.
pub const REQUIRED_VARS: [&str; 5] = [
    TOKEN_ENV,
    API_KEY_ENV,
    ENDPOINT_ENV,
    DEPLOYMENT_ENV,
    API_VERSION_ENV,
];

pub const SYSTEM_PROMPT_ENV: &str = "RELAY_SYSTEM_PROMPT";
pub const MAX_TOKENS_ENV: &str = "RELAY_MAX_TOKENS";
pub const TEMPERATURE_ENV: &str = "RELAY_TEMPERATURE";
pub const TOP_P_ENV: &str = "RELAY_TOP_P";
pub const TELEGRAM_API_URL_ENV: &str = "TELEGRAM_API_URL";
pub const POLL_TIMEOUT_ENV: &str = "RELAY_POLL_TIMEOUT_SECS";
pub const LOG_ENV: &str = "RELAY_LOG";
pub const LOG_JSON_ENV: &str = "RELAY_LOG_JSON";

/// Instruction sent ahead of every user message.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "Eres un asistente de IA muy útil y amable especializado en proporcionar información concisa y precisa sobre los servicios de Microsoft Azure. Responde siempre en español. Si no conoces la respuesta, indícalo claramente. No inventes información.";

const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_POLL_TIMEOUT_SECS: u32 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .names.join(", "))]
    Missing { names: Vec<&'static str> },
}

/// Fixed generation parameters applied to every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            max_tokens: 1000,
            temperature: 0.7,
            top_p: 0.95,
        }
    }
}

/// Credentials and addressing of the Azure OpenAI deployment.
#[derive(Clone)]
pub struct AzureSettings {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

impl fmt::Debug for AzureSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Runtime configuration for the relay bot.
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub azure: AzureSettings,
    pub generation: GenerationSettings,
    /// Bot API server (default: `https://api.telegram.org`).
    pub telegram_api_url: String,
    /// Server-side long-poll timeout for `getUpdates`.
    pub poll_timeout_secs: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("azure", &self.azure)
            .field("generation", &self.generation)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}

impl Config {
    /// Build [`Config`] from an arbitrary variable source.
    ///
    /// Every missing required variable is reported at once. Values are
    /// trimmed; a blank value counts as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut missing = Vec::new();
        let mut require = |name: &'static str| {
            let value = get(name);
            if value.is_none() {
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let bot_token = require(TOKEN_ENV);
        let api_key = require(API_KEY_ENV);
        let endpoint = require(ENDPOINT_ENV);
        let deployment = require(DEPLOYMENT_ENV);
        let api_version = require(API_VERSION_ENV);

        if !missing.is_empty() {
            return Err(ConfigError::Missing { names: missing });
        }

        let defaults = GenerationSettings::default();
        let generation = GenerationSettings {
            system_prompt: get(SYSTEM_PROMPT_ENV).unwrap_or(defaults.system_prompt),
            max_tokens: parse_or(&get, MAX_TOKENS_ENV, defaults.max_tokens, |v| v > 0),
            temperature: parse_or(&get, TEMPERATURE_ENV, defaults.temperature, |v| {
                (0.0..=2.0).contains(&v)
            }),
            top_p: parse_or(&get, TOP_P_ENV, defaults.top_p, |v| v > 0.0 && v <= 1.0),
        };

        Ok(Self {
            bot_token,
            azure: AzureSettings {
                endpoint,
                api_key,
                deployment,
                api_version,
            },
            generation,
            telegram_api_url: get(TELEGRAM_API_URL_ENV)
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            poll_timeout_secs: parse_or(&get, POLL_TIMEOUT_ENV, DEFAULT_POLL_TIMEOUT_SECS, |_| {
                true
            }),
        })
    }
}

/// Logging options; read before [`Config`] so configuration problems get logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// `tracing` filter string, e.g. `"info"` or `"relay_ox=debug,info"`.
    pub filter: String,
    /// Emit log records as newline-delimited JSON.
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            filter: lookup(LOG_ENV)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| Self::default().filter),
            json: lookup(LOG_JSON_ENV)
                .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true")),
        }
    }
}

fn parse_or<T, G>(get: &G, name: &str, default: T, valid: impl Fn(T) -> bool) -> T
where
    T: FromStr + fmt::Display + Copy,
    G: Fn(&str) -> Option<String>,
{
    let Some(raw) = get(name) else {
        return default;
    };
    match raw.parse::<T>() {
        Ok(value) if valid(value) => value,
        _ => {
            warn!(variable = name, value = %raw, default = %default, "ignoring invalid setting");
            default
        }
    }
}
