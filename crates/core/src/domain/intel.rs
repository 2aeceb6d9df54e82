use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::domain::{require, title_case, TransportPolicy};
use crate::errors::DomainError;
use crate::market::{FinancialHealth, Headline};
use crate::reconcile::Schema;

pub const MAX_NEWS: usize = 3;
pub const MAX_TALKING_POINTS: usize = 3;
pub const MIN_PRODUCT_CONTEXT_CHARS: usize = 3;
pub const FIT_SCORE_MIN: i64 = 1;
pub const FIT_SCORE_MAX: i64 = 10;
pub const FIT_SCORE_DEFAULT: i64 = 5;
pub const MAX_TOKENS: u32 = 1000;
pub const TRANSPORT_POLICY: TransportPolicy = TransportPolicy::Degrade;

pub const DEFAULT_APPROACH: &str = "scaling_growth";
pub const DEFAULT_SENTIMENT: &str = "neutral";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyIntelRequest {
    pub company_name: String,
    pub product_context: Option<String>,
}

impl CompanyIntelRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("company_name", &self.company_name)
    }

    pub fn company_name(&self) -> &str {
        self.company_name.trim()
    }

    /// The product context, only when it is long enough to analyse.
    pub fn product_context(&self) -> Option<&str> {
        self.product_context
            .as_deref()
            .map(str::trim)
            .filter(|context| context.chars().count() >= MIN_PRODUCT_CONTEXT_CHARS)
    }
}

/// Everything gathered before the model is asked for the battlecard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntelContext {
    pub company_name: String,
    pub financial_health: FinancialHealth,
    pub headlines: Vec<Headline>,
    pub product_context: Option<String>,
}

impl IntelContext {
    pub fn new(
        request: &CompanyIntelRequest,
        financial_health: FinancialHealth,
        headlines: Vec<Headline>,
    ) -> Self {
        Self {
            company_name: request.company_name().to_string(),
            financial_health,
            headlines,
            product_context: request.product_context().map(str::to_string),
        }
    }

    fn source_for(&self, headline: &str) -> Option<String> {
        self.headlines
            .iter()
            .find(|candidate| candidate.headline == headline)
            .map(|candidate| candidate.source.clone())
    }

    fn neutral_news(&self) -> Vec<NewsItem> {
        self.headlines
            .iter()
            .take(MAX_NEWS)
            .map(|headline| NewsItem {
                headline: headline.headline.clone(),
                sentiment: DEFAULT_SENTIMENT.to_string(),
                source: Some(headline.source.clone()),
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSentiment {
    pub headline: String,
    pub sentiment: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFit {
    pub score: u32,
    pub rationale: String,
    pub talking_points: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelDraft {
    pub news_sentiments: Vec<NewsSentiment>,
    pub approach: String,
    pub reasoning: String,
    pub pitch_points: Vec<String>,
    pub cold_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_fit: Option<ProductFit>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub sentiment: String,
    pub source: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub approach: String,
    pub pitch_points: Vec<String>,
    pub reasoning: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyIntelResponse {
    pub company_name: String,
    pub financial_health: FinancialHealth,
    pub news: Vec<NewsItem>,
    pub strategy: Strategy,
    pub cold_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_fit: Option<ProductFit>,
}

impl CompanyIntelResponse {
    pub fn assemble(context: &IntelContext, draft: IntelDraft) -> Self {
        let mut news = draft
            .news_sentiments
            .into_iter()
            .map(|item| NewsItem {
                source: context.source_for(&item.headline),
                headline: item.headline,
                sentiment: item.sentiment,
            })
            .collect::<Vec<_>>();
        if news.is_empty() {
            news = context.neutral_news();
        }

        Self {
            company_name: title_case(&context.company_name),
            financial_health: context.financial_health.clone(),
            news,
            strategy: Strategy {
                approach: draft.approach,
                pitch_points: draft.pitch_points,
                reasoning: draft.reasoning,
            },
            cold_email: draft.cold_email,
            product_fit: draft.product_fit.filter(|_| context.product_context.is_some()),
        }
    }
}

pub fn schema(with_product_fit: bool) -> &'static Schema {
    static BASE: OnceLock<Schema> = OnceLock::new();
    static WITH_PRODUCT_FIT: OnceLock<Schema> = OnceLock::new();

    if with_product_fit {
        WITH_PRODUCT_FIT.get_or_init(|| {
            base_schema().object(
                "product_fit",
                Schema::new()
                    .integer("score", FIT_SCORE_MIN, FIT_SCORE_MAX, FIT_SCORE_DEFAULT)
                    .text("rationale")
                    .text_list("talking_points", Some(MAX_TALKING_POINTS)),
            )
        })
    } else {
        BASE.get_or_init(base_schema)
    }
}

fn base_schema() -> Schema {
    Schema::new()
        .object_list(
            "news_sentiments",
            Some(MAX_NEWS),
            Schema::new().text("headline").text_or("sentiment", DEFAULT_SENTIMENT),
        )
        .text_or("approach", DEFAULT_APPROACH)
        .text("reasoning")
        .text_list("pitch_points", None)
        .text("cold_email")
}

pub fn fallback(context: &IntelContext) -> CompanyIntelResponse {
    let company = &context.company_name;

    CompanyIntelResponse {
        company_name: title_case(company),
        financial_health: context.financial_health.clone(),
        news: context.neutral_news(),
        strategy: Strategy {
            approach: DEFAULT_APPROACH.to_string(),
            pitch_points: vec![
                "Accelerate digital transformation".to_string(),
                "Unlock new revenue streams".to_string(),
                "Outpace competitors".to_string(),
            ],
            reasoning: format!(
                "Based on {company}'s market position, a growth-focused approach is recommended."
            ),
        },
        cold_email: format!(
            "I noticed {company} is making strategic moves. Our solution has helped similar \
             companies achieve 40% faster time-to-value. Worth a quick chat?"
        ),
        product_fit: context.product_context.as_deref().map(|product| ProductFit {
            score: FIT_SCORE_DEFAULT as u32,
            rationale: format!(
                "Fit between {product} and {company} could not be assessed automatically; \
                 validate priorities in a discovery call."
            ),
            talking_points: vec![
                format!("Map {product} to {company}'s current initiatives"),
                "Quantify time-to-value with a short pilot".to_string(),
                "Identify the economic buyer early".to_string(),
            ],
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::{
        fallback, schema, CompanyIntelRequest, CompanyIntelResponse, IntelContext, IntelDraft,
    };
    use crate::market::{placeholder_headlines, FinancialHealth, Headline};
    use crate::reconcile::{coerce_to_schema, reconcile};

    fn context(product_context: Option<&str>) -> IntelContext {
        let request = CompanyIntelRequest {
            company_name: "  acme robotics ".to_string(),
            product_context: product_context.map(str::to_string),
        };
        IntelContext::new(
            &request,
            FinancialHealth::unavailable(),
            vec![
                Headline::new("Acme opens new plant", "Reuters"),
                Headline::new("Acme misses estimates", "Bloomberg"),
            ],
        )
    }

    fn base_payload() -> Value {
        json!({
            "news_sentiments": [
                { "headline": "Acme opens new plant", "sentiment": "positive" },
                { "headline": "Rumour mill", "sentiment": "negative" }
            ],
            "approach": "cost_optimization",
            "reasoning": "Margins under pressure",
            "pitch_points": ["a", "b", "c", "d"],
            "cold_email": "Hello Acme"
        })
    }

    #[test]
    fn product_context_must_have_three_characters_after_trim() {
        let request = |context: &str| CompanyIntelRequest {
            company_name: "Acme".to_string(),
            product_context: Some(context.to_string()),
        };

        assert_eq!(request("  ab  ").product_context(), None);
        assert_eq!(request("").product_context(), None);
        assert_eq!(request(" CRM ").product_context(), Some("CRM"));
        assert_eq!(CompanyIntelRequest::default().product_context(), None);
    }

    #[test]
    fn exact_payload_reconciles_to_itself() {
        assert_eq!(coerce_to_schema(&base_payload(), schema(false)), Ok(base_payload()));

        let mut with_fit = base_payload();
        with_fit["product_fit"] =
            json!({ "score": 7, "rationale": "Good match", "talking_points": ["x"] });
        assert_eq!(coerce_to_schema(&with_fit, schema(true)), Ok(with_fit));
    }

    #[test]
    fn sources_are_recovered_by_exact_headline_match() {
        let draft: IntelDraft =
            reconcile(&base_payload().to_string(), schema(false)).expect("reconcile should succeed");
        let response = CompanyIntelResponse::assemble(&context(None), draft);

        assert_eq!(response.company_name, "Acme Robotics");
        assert_eq!(response.news[0].source.as_deref(), Some("Reuters"));
        assert_eq!(response.news[1].source, None);
        assert_eq!(response.strategy.approach, "cost_optimization");
        assert_eq!(response.strategy.pitch_points.len(), 4);
        assert_eq!(response.product_fit, None);
    }

    #[test]
    fn news_is_bounded_and_empty_news_falls_back_to_headlines() {
        let many = json!({
            "news_sentiments": (0..6).map(|index| json!({ "headline": format!("h{index}") })).collect::<Vec<_>>()
        });
        let draft: IntelDraft =
            reconcile(&many.to_string(), schema(false)).expect("reconcile should succeed");
        let response = CompanyIntelResponse::assemble(&context(None), draft);
        assert_eq!(response.news.len(), 3);
        assert_eq!(response.news[2].headline, "h2");
        assert_eq!(response.news[0].sentiment, "neutral");
        assert_eq!(response.strategy.approach, "scaling_growth");

        let empty: IntelDraft = reconcile("{}", schema(false)).expect("reconcile should succeed");
        let response = CompanyIntelResponse::assemble(&context(None), empty);
        assert_eq!(response.news.len(), 2);
        assert!(response.news.iter().all(|item| item.sentiment == "neutral"));
        assert_eq!(response.news[1].source.as_deref(), Some("Bloomberg"));
    }

    #[test]
    fn product_fit_score_is_clamped_and_only_present_with_context() {
        let mut payload = base_payload();
        payload["product_fit"] = json!({ "score": 42, "talking_points": ["a", "b", "c", "d"] });

        let draft: IntelDraft =
            reconcile(&payload.to_string(), schema(true)).expect("reconcile should succeed");
        let response = CompanyIntelResponse::assemble(&context(Some("fleet telematics")), draft);
        let fit = response.product_fit.expect("product fit expected with context");
        assert_eq!(fit.score, 10);
        assert_eq!(fit.talking_points.len(), 3);

        let low: IntelDraft =
            reconcile("{\"product_fit\": {\"score\": -2}}", schema(true)).expect("reconcile");
        assert_eq!(low.product_fit.map(|fit| fit.score), Some(1));

        let ignored: IntelDraft =
            reconcile(&payload.to_string(), schema(false)).expect("reconcile should succeed");
        assert_eq!(ignored.product_fit, None);
    }

    #[test]
    fn product_fit_is_absent_from_serialised_response_without_context() {
        let response = fallback(&context(Some("  ")));
        let serialised = serde_json::to_value(&response).expect("serialise");

        assert!(serialised.get("product_fit").is_none());
        assert_eq!(serialised["news"][0]["sentiment"], "neutral");
    }

    #[test]
    fn fallback_uses_lookups_and_templated_strategy() {
        let mut ctx = context(Some("fleet telematics"));
        ctx.headlines = placeholder_headlines(&ctx.company_name);

        let response = fallback(&ctx);

        assert_eq!(response.company_name, "Acme Robotics");
        assert_eq!(response.news.len(), 3);
        assert_eq!(response.news[2].source.as_deref(), Some("Reuters"));
        assert_eq!(response.strategy.approach, "scaling_growth");
        assert_eq!(response.strategy.pitch_points.len(), 3);
        assert!(response.cold_email.starts_with("I noticed acme robotics is making strategic moves."));
        assert_eq!(response.product_fit.map(|fit| fit.score), Some(5));
    }
}
