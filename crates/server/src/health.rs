use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use marketmind_core::config::{AppConfig, LlmProvider};
use serde::Serialize;

#[derive(Clone, Debug)]
pub struct HealthState {
    llm_provider: LlmProvider,
    llm_model: String,
    llm_key_configured: bool,
    news_live: bool,
}

impl HealthState {
    pub fn new(config: &AppConfig, news_live: bool) -> Self {
        Self {
            llm_provider: config.llm.provider,
            llm_model: config.llm.model.clone(),
            llm_key_configured: config.llm.api_key.is_some(),
            news_live,
        }
    }

    pub fn news_mode(&self) -> &'static str {
        if self.news_live {
            "live"
        } else {
            "placeholder"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub completion: HealthCheck,
    pub news: HealthCheck,
    pub checked_at: String,
}

pub fn router(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let completion = completion_check(&state);
    let ready = completion.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "marketmind-server runtime initialized".to_string(),
        },
        completion,
        // Placeholder headlines are a supported mode, not an outage.
        news: HealthCheck {
            status: "ready",
            detail: format!("news lookups in {} mode", state.news_mode()),
        },
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn completion_check(state: &HealthState) -> HealthCheck {
    let provider = state.llm_provider.as_str();
    let needs_key = !matches!(state.llm_provider, LlmProvider::Ollama);

    if needs_key && !state.llm_key_configured {
        return HealthCheck {
            status: "degraded",
            detail: format!("{provider} api key is not configured"),
        };
    }

    HealthCheck { status: "ready", detail: format!("{provider} model {}", state.llm_model) }
}
