use std::sync::Arc;

use marketmind_agent::{
    ChatCompletionsClient, CompletionError, LookupError, NewsApiClient, NewsProvider, SalesRuntime,
    YahooFinanceClient,
};
use marketmind_core::config::{AppConfig, ConfigError};
use thiserror::Error;
use tracing::info;

use crate::health::HealthState;

pub struct Application {
    pub config: AppConfig,
    pub runtime: SalesRuntime,
    pub health: HealthState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("completion client setup failed: {0}")]
    Completion(#[source] CompletionError),
    #[error("market data client setup failed: {0}")]
    Lookup(#[source] LookupError),
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let llm = ChatCompletionsClient::from_config(&config.llm).map_err(BootstrapError::Completion)?;
    info!(
        event_name = "system.bootstrap.completion_client_ready",
        correlation_id = "bootstrap",
        provider = config.llm.provider.as_str(),
        model = %llm.model(),
        endpoint = %llm.endpoint(),
        "completion client initialized"
    );

    let financials =
        YahooFinanceClient::from_config(&config.market).map_err(BootstrapError::Lookup)?;
    let news = NewsApiClient::from_config(&config.news).map_err(BootstrapError::Lookup)?;
    info!(
        event_name = "system.bootstrap.news_mode",
        correlation_id = "bootstrap",
        news_mode = if config.news_enabled() { "live" } else { "placeholder" },
        "news lookups initialized"
    );

    let health = HealthState::new(&config, news.is_live());
    let runtime = SalesRuntime::new(Arc::new(llm), Arc::new(financials), Arc::new(news));

    Ok(Application { config, runtime, health })
}
