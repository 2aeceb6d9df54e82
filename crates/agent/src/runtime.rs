use std::sync::Arc;

use marketmind_core::domain::intel::IntelContext;
use marketmind_core::domain::{campaign, intel, lead, pitch, TransportPolicy};
use marketmind_core::errors::ApplicationError;
use marketmind_core::reconcile::{reconcile, Schema};
use marketmind_core::{
    CampaignRequest, CampaignResponse, CompanyIntelRequest, CompanyIntelResponse, LeadRequest,
    LeadResponse, PitchRequest, PitchResponse,
};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::llm::LlmClient;
use crate::market::{financial_snapshot, recent_headlines, FinancialDataProvider, NewsProvider};
use crate::prompts;

/// The four sales use cases. Each one validates, renders a prompt, asks the
/// completion provider, and reconciles the answer against its schema,
/// substituting the deterministic fallback when the answer is unusable.
#[derive(Clone)]
pub struct SalesRuntime {
    llm: Arc<dyn LlmClient>,
    financials: Arc<dyn FinancialDataProvider>,
    news: Arc<dyn NewsProvider>,
}

struct Generation<'a> {
    use_case: &'static str,
    prompt: String,
    max_tokens: u32,
    schema: &'a Schema,
    policy: TransportPolicy,
}

impl SalesRuntime {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        financials: Arc<dyn FinancialDataProvider>,
        news: Arc<dyn NewsProvider>,
    ) -> Self {
        Self { llm, financials, news }
    }

    pub fn news_is_live(&self) -> bool {
        self.news.is_live()
    }

    pub async fn generate_campaign(
        &self,
        request: &CampaignRequest,
        correlation_id: &str,
    ) -> Result<CampaignResponse, ApplicationError> {
        request.validate()?;

        let draft = self
            .generate(
                Generation {
                    use_case: "campaign",
                    prompt: prompts::campaign(request),
                    max_tokens: campaign::MAX_TOKENS,
                    schema: campaign::schema(),
                    policy: campaign::TRANSPORT_POLICY,
                },
                correlation_id,
            )
            .await?;

        Ok(match draft {
            Some(draft) => CampaignResponse::assemble(request, draft),
            None => campaign::fallback(request),
        })
    }

    pub async fn generate_pitch(
        &self,
        request: &PitchRequest,
        correlation_id: &str,
    ) -> Result<PitchResponse, ApplicationError> {
        request.validate()?;

        let draft = self
            .generate(
                Generation {
                    use_case: "pitch",
                    prompt: prompts::pitch(request),
                    max_tokens: pitch::MAX_TOKENS,
                    schema: pitch::schema(),
                    policy: pitch::TRANSPORT_POLICY,
                },
                correlation_id,
            )
            .await?;

        Ok(match draft {
            Some(draft) => PitchResponse::assemble(request, draft),
            None => pitch::fallback(request),
        })
    }

    pub async fn score_lead(
        &self,
        request: &LeadRequest,
        correlation_id: &str,
    ) -> Result<LeadResponse, ApplicationError> {
        request.validate()?;

        let draft = self
            .generate(
                Generation {
                    use_case: "lead_score",
                    prompt: prompts::lead_score(request),
                    max_tokens: lead::MAX_TOKENS,
                    schema: lead::schema(),
                    policy: lead::TRANSPORT_POLICY,
                },
                correlation_id,
            )
            .await?;

        Ok(match draft {
            Some(draft) => LeadResponse::assemble(request, draft),
            None => lead::fallback(request),
        })
    }

    pub async fn company_intel(
        &self,
        request: &CompanyIntelRequest,
        correlation_id: &str,
    ) -> Result<CompanyIntelResponse, ApplicationError> {
        request.validate()?;

        let company_name = request.company_name();
        let (financial_health, headlines) = tokio::join!(
            financial_snapshot(self.financials.as_ref(), company_name, correlation_id),
            recent_headlines(self.news.as_ref(), company_name, correlation_id),
        );
        let context = IntelContext::new(request, financial_health, headlines);

        let draft = self
            .generate(
                Generation {
                    use_case: "company_intel",
                    prompt: prompts::company_intel(&context),
                    max_tokens: intel::MAX_TOKENS,
                    schema: intel::schema(context.product_context.is_some()),
                    policy: intel::TRANSPORT_POLICY,
                },
                correlation_id,
            )
            .await?;

        Ok(match draft {
            Some(draft) => CompanyIntelResponse::assemble(&context, draft),
            None => intel::fallback(&context),
        })
    }

    /// `Ok(None)` asks the caller for its fallback.
    async fn generate<T: DeserializeOwned>(
        &self,
        generation: Generation<'_>,
        correlation_id: &str,
    ) -> Result<Option<T>, ApplicationError> {
        let Generation { use_case, prompt, max_tokens, schema, policy } = generation;

        let raw = match self.llm.complete(&prompt, max_tokens).await {
            Ok(raw) => raw,
            Err(completion_error) => {
                error!(
                    event_name = "system.completion.failed",
                    correlation_id,
                    use_case,
                    error = %completion_error,
                    policy = ?policy,
                    "completion provider call failed"
                );
                return match policy {
                    TransportPolicy::Surface => {
                        Err(ApplicationError::Completion(completion_error.to_string()))
                    }
                    TransportPolicy::Degrade => Ok(None),
                };
            }
        };

        match reconcile::<T>(&raw, schema) {
            Ok(draft) => {
                info!(
                    event_name = "system.generation.completed",
                    correlation_id,
                    use_case,
                    "generated response reconciled"
                );
                Ok(Some(draft))
            }
            Err(reconcile_error) => {
                warn!(
                    event_name = "system.generation.fallback",
                    correlation_id,
                    use_case,
                    reason = reconcile_error.kind(),
                    error = %reconcile_error,
                    "model output unusable; serving fallback"
                );
                Ok(None)
            }
        }
    }
}
