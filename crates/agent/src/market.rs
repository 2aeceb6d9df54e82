//! Financial and news lookups feeding the company-intel battlecard.
//!
//! Both collaborators are best effort: the providers return `LookupError`, and
//! [`financial_snapshot`] / [`recent_headlines`] absorb every failure into the
//! neutral defaults from `marketmind_core::market`.

use std::time::Duration;

use async_trait::async_trait;
use marketmind_core::config::{MarketConfig, NewsConfig};
use marketmind_core::market::{
    placeholder_headlines, resolve_ticker, FinancialHealth, FinancialQuote, Headline, MAX_HEADLINES,
};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("marketmind/", env!("CARGO_PKG_VERSION"));
const QUOTE_MODULES: &str = "price,summaryProfile,defaultKeyStatistics";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup source is not configured")]
    NotConfigured,
    #[error("could not build lookup client: {0}")]
    Setup(String),
    #[error("lookup request failed: {0}")]
    Transport(String),
    #[error("lookup source returned {0}")]
    Status(u16),
    #[error("lookup response could not be decoded: {0}")]
    InvalidBody(String),
}

#[async_trait]
pub trait FinancialDataProvider: Send + Sync {
    async fn lookup(&self, ticker: &str) -> Result<FinancialQuote, LookupError>;
}

#[async_trait]
pub trait NewsProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Headline>, LookupError>;

    /// False when the provider can only ever answer with placeholders.
    fn is_live(&self) -> bool {
        true
    }
}

/// Financial snapshot for a company name. Never fails.
pub async fn financial_snapshot(
    provider: &dyn FinancialDataProvider,
    company_name: &str,
    correlation_id: &str,
) -> FinancialHealth {
    let ticker = resolve_ticker(company_name);
    match provider.lookup(&ticker).await {
        Ok(quote) => FinancialHealth::from_quote(&quote),
        Err(error) => {
            warn!(
                event_name = "system.market.lookup_degraded",
                correlation_id,
                ticker = %ticker,
                error = %error,
                "financial lookup failed; using neutral snapshot"
            );
            FinancialHealth::unavailable()
        }
    }
}

/// Up to three recent headlines for a company name. Never fails; any error or
/// an empty result yields the placeholder headlines.
pub async fn recent_headlines(
    provider: &dyn NewsProvider,
    company_name: &str,
    correlation_id: &str,
) -> Vec<Headline> {
    match provider.search(company_name).await {
        Ok(headlines) if !headlines.is_empty() => {
            headlines.into_iter().take(MAX_HEADLINES).collect()
        }
        Ok(_) => {
            debug!(
                event_name = "system.news.empty_result",
                correlation_id,
                "news search returned nothing; using placeholder headlines"
            );
            placeholder_headlines(company_name)
        }
        Err(LookupError::NotConfigured) => {
            debug!(
                event_name = "system.news.placeholder_mode",
                correlation_id,
                "news lookups not configured; using placeholder headlines"
            );
            placeholder_headlines(company_name)
        }
        Err(error) => {
            warn!(
                event_name = "system.news.lookup_degraded",
                correlation_id,
                error = %error,
                "news lookup failed; using placeholder headlines"
            );
            placeholder_headlines(company_name)
        }
    }
}

fn build_http(timeout_secs: u64) -> Result<Client, LookupError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|error| LookupError::Setup(error.to_string()))
}

async fn fetch_json(request: reqwest::RequestBuilder) -> Result<Value, LookupError> {
    let response = request.send().await.map_err(|error| LookupError::Transport(error.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(LookupError::Status(status.as_u16()));
    }
    response.json::<Value>().await.map_err(|error| LookupError::InvalidBody(error.to_string()))
}

/// Yahoo Finance quote-summary reader.
pub struct YahooFinanceClient {
    http: Client,
    base_url: String,
}

impl YahooFinanceClient {
    pub fn from_config(config: &MarketConfig) -> Result<Self, LookupError> {
        Ok(Self {
            http: build_http(config.timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn quote_url(&self, ticker: &str) -> String {
        format!("{}/v10/finance/quoteSummary/{ticker}", self.base_url)
    }
}

#[async_trait]
impl FinancialDataProvider for YahooFinanceClient {
    async fn lookup(&self, ticker: &str) -> Result<FinancialQuote, LookupError> {
        let body = fetch_json(
            self.http.get(self.quote_url(ticker)).query(&[("modules", QUOTE_MODULES)]),
        )
        .await?;
        parse_quote_summary(&body)
    }
}

fn parse_quote_summary(body: &Value) -> Result<FinancialQuote, LookupError> {
    let result = body
        .pointer("/quoteSummary/result/0")
        .filter(|result| result.is_object())
        .ok_or_else(|| LookupError::InvalidBody("quote summary has no result".to_string()))?;

    // Yahoo wraps numbers as {"raw": 1.0, "fmt": "1.00"}; older payloads use bare numbers.
    let figure = |pointer: &str| {
        result.pointer(pointer).and_then(|value| match value {
            Value::Object(wrapped) => wrapped.get("raw").and_then(Value::as_f64),
            other => other.as_f64(),
        })
    };

    Ok(FinancialQuote {
        price: figure("/price/regularMarketPrice"),
        market_cap: figure("/price/marketCap"),
        change_52w: figure("/defaultKeyStatistics/52WeekChange"),
        sector: result.pointer("/summaryProfile/sector").and_then(Value::as_str).map(str::to_string),
    })
}

/// NewsAPI `everything` search.
pub struct NewsApiClient {
    http: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

#[derive(Debug, Deserialize)]
struct ArticlesPage {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

impl NewsApiClient {
    pub fn from_config(config: &NewsConfig) -> Result<Self, LookupError> {
        Ok(Self {
            http: build_http(config.timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.expose_secret().trim().is_empty()),
        })
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn search(&self, query: &str) -> Result<Vec<Headline>, LookupError> {
        let api_key = self.api_key.as_ref().ok_or(LookupError::NotConfigured)?;
        let page_size = MAX_HEADLINES.to_string();

        let body = fetch_json(
            self.http
                .get(format!("{}/everything", self.base_url))
                .header("X-Api-Key", api_key.expose_secret())
                .query(&[
                    ("q", query),
                    ("sortBy", "publishedAt"),
                    ("pageSize", page_size.as_str()),
                ]),
        )
        .await?;

        parse_articles(body)
    }

    fn is_live(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_articles(body: Value) -> Result<Vec<Headline>, LookupError> {
    let page: ArticlesPage =
        serde_json::from_value(body).map_err(|error| LookupError::InvalidBody(error.to_string()))?;

    Ok(page
        .articles
        .into_iter()
        .filter_map(|article| {
            let title = article.title.filter(|title| !title.trim().is_empty())?;
            let source = article.source.and_then(|source| source.name).unwrap_or_default();
            Some(Headline::new(title, source))
        })
        .take(MAX_HEADLINES)
        .collect())
}
