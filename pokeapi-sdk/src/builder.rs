// ABOUTME: Builder pattern implementation for PokeClient configuration
// ABOUTME: Validates the base URL and wires timeout, user agent, and retry policy

use crate::constants::{timeouts, urls};
use crate::error::PokeError;
use crate::retry::RetryConfig;
use crate::PokeClient;
use std::time::Duration;
use typed_builder::TypedBuilder;
use url::Url;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<PokeClient, PokeError>))]
pub struct PokeClientConfig {
    #[builder(default = urls::POKEAPI_BASE.to_string(), setter(into))]
    pub base_url: String,

    #[builder(default = timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    #[builder(default)]
    pub retry: RetryConfig,

    #[builder(default = urls::USER_AGENT.to_string(), setter(into))]
    pub user_agent: String,
}

impl From<PokeClientConfig> for Result<PokeClient, PokeError> {
    fn from(config: PokeClientConfig) -> Self {
        PokeClient::from_config(config)
    }
}

impl PokeClient {
    pub fn builder() -> PokeClientConfigBuilder<((), (), (), ())> {
        PokeClientConfig::builder()
    }
}

/// Parse and normalize an API host URL; the result never ends with `/`.
pub fn normalize_base_url(raw: &str) -> Result<String, PokeError> {
    let parsed = Url::parse(raw.trim())
        .map_err(|e| PokeError::Configuration(format!("Invalid API URL '{}': {}", raw, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(PokeError::Configuration(format!(
            "Unsupported API URL scheme '{}'",
            parsed.scheme()
        )));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
