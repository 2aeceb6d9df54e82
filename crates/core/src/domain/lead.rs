use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::domain::{require, TransportPolicy};
use crate::errors::DomainError;
use crate::reconcile::Schema;

pub const SCORE_MIN: i64 = 0;
pub const SCORE_MAX: i64 = 100;
pub const SCORE_DEFAULT: i64 = 50;
pub const SUB_SCORE_MIN: i64 = 0;
pub const SUB_SCORE_MAX: i64 = 20;
pub const SUB_SCORE_DEFAULT: i64 = 10;
pub const MAX_TOKENS: u32 = 2000;
pub const TRANSPORT_POLICY: TransportPolicy = TransportPolicy::Surface;

const DISCOVERY_CALL_ACTION: &str =
    "Schedule a discovery call to further qualify this lead and understand their specific requirements.";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadRequest {
    pub lead_name: String,
    pub company: String,
    pub budget: String,
    pub timeline: String,
    pub urgency: String,
    pub decision_authority: String,
    pub need_fit: String,
}

impl LeadRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("lead_name", &self.lead_name)
    }
}

/// BANT+F sub-scores, each in `SUB_SCORE_MIN..=SUB_SCORE_MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub budget: u32,
    pub authority: u32,
    pub need: u32,
    pub timeline: u32,
    pub fit: u32,
}

impl Default for ScoreBreakdown {
    fn default() -> Self {
        let base = SUB_SCORE_DEFAULT as u32;
        Self { budget: base, authority: base, need: base, timeline: base, fit: base }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionProbability {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConversionProbability {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=39 => Self::Low,
            40..=59 => Self::Medium,
            60..=79 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadScoreDraft {
    pub score: u32,
    pub score_breakdown: ScoreBreakdown,
    pub reasoning: String,
    pub conversion_probability: String,
    pub recommended_action: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadResponse {
    pub lead_name: String,
    pub company: String,
    pub score: u32,
    pub score_breakdown: ScoreBreakdown,
    pub reasoning: String,
    pub conversion_probability: String,
    pub recommended_action: String,
}

impl LeadResponse {
    pub fn assemble(request: &LeadRequest, draft: LeadScoreDraft) -> Self {
        Self {
            lead_name: request.lead_name.clone(),
            company: request.company.clone(),
            score: draft.score,
            score_breakdown: draft.score_breakdown,
            reasoning: draft.reasoning,
            conversion_probability: draft.conversion_probability,
            recommended_action: draft.recommended_action,
        }
    }
}

pub fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        let sub_score = |schema: Schema, name: &'static str| {
            schema.integer(name, SUB_SCORE_MIN, SUB_SCORE_MAX, SUB_SCORE_DEFAULT)
        };
        let breakdown = ["budget", "authority", "need", "timeline", "fit"]
            .into_iter()
            .fold(Schema::new(), sub_score);

        Schema::new()
            .integer("score", SCORE_MIN, SCORE_MAX, SCORE_DEFAULT)
            .object("score_breakdown", breakdown)
            .text("reasoning")
            .text_or("conversion_probability", "Medium")
            .text("recommended_action")
    })
}

/// Keyword heuristic used when the model output cannot be reconciled.
///
/// The total is accumulated independently of the sub-scores it raises, so the
/// breakdown does not necessarily sum to the total.
pub fn heuristic_score(request: &LeadRequest) -> (u32, ScoreBreakdown) {
    let urgency = request.urgency.to_lowercase();
    let timeline = request.timeline.to_lowercase();
    let authority = request.decision_authority.to_lowercase();
    let need_fit = request.need_fit.to_lowercase();

    let mut score = SCORE_DEFAULT as u32;
    let mut breakdown = ScoreBreakdown::default();

    if urgency.contains("high") || timeline.contains("immediate") {
        score += 15;
        breakdown.timeline = 17;
    }
    if authority.contains("decision maker") || authority.contains("final") {
        score += 15;
        breakdown.authority = 18;
    }
    if need_fit.contains("strong") || need_fit.contains("high") {
        score += 10;
        breakdown.need = 16;
        breakdown.fit = 16;
    }
    if request.budget.contains('$') && request.budget.chars().any(char::is_numeric) {
        score += 10;
        breakdown.budget = 15;
    }

    (score.min(SCORE_MAX as u32), breakdown)
}

pub fn fallback(request: &LeadRequest) -> LeadResponse {
    let (score, score_breakdown) = heuristic_score(request);
    let probability = ConversionProbability::from_score(score);

    LeadResponse {
        lead_name: request.lead_name.clone(),
        company: request.company.clone(),
        score,
        score_breakdown,
        reasoning: format!(
            "Based on the provided information, {} from {} shows {} conversion potential. \
             Budget: {}, Timeline: {}, Urgency: {}.",
            request.lead_name,
            request.company,
            probability.as_str().to_lowercase(),
            request.budget,
            request.timeline,
            request.urgency,
        ),
        conversion_probability: probability.as_str().to_string(),
        recommended_action: DISCOVERY_CALL_ACTION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        fallback, heuristic_score, schema, ConversionProbability, LeadRequest, LeadResponse,
        LeadScoreDraft, ScoreBreakdown,
    };
    use crate::reconcile::{coerce_to_schema, reconcile};

    fn hot_lead() -> LeadRequest {
        LeadRequest {
            lead_name: "Dana Reyes".to_string(),
            company: "Globex".to_string(),
            budget: "$75".to_string(),
            timeline: "immediate".to_string(),
            urgency: "high".to_string(),
            decision_authority: "final decision maker".to_string(),
            need_fit: "strong fit".to_string(),
        }
    }

    #[test]
    fn hot_lead_heuristic_reaches_very_high() {
        let response = fallback(&hot_lead());

        assert_eq!(response.score, 100);
        assert_eq!(response.conversion_probability, "Very High");
        assert_eq!(
            response.score_breakdown,
            ScoreBreakdown { budget: 15, authority: 18, need: 16, timeline: 17, fit: 16 }
        );
        assert!(response.reasoning.contains("shows very high conversion potential"));
        assert!(response.reasoning.ends_with("Budget: $75, Timeline: immediate, Urgency: high."));
    }

    #[test]
    fn cold_lead_keeps_base_score_and_sub_scores() {
        let request = LeadRequest {
            lead_name: "Sam".to_string(),
            company: "Initech".to_string(),
            budget: "unknown".to_string(),
            timeline: "next year".to_string(),
            urgency: "low".to_string(),
            decision_authority: "influencer".to_string(),
            need_fit: "unclear".to_string(),
        };

        let (score, breakdown) = heuristic_score(&request);

        assert_eq!(score, 50);
        assert_eq!(breakdown, ScoreBreakdown::default());
        assert_eq!(fallback(&request).conversion_probability, "Medium");
    }

    #[test]
    fn budget_needs_both_currency_sign_and_digit() {
        let mut request = hot_lead();
        request.budget = "$ TBD".to_string();
        assert_eq!(heuristic_score(&request).1.budget, 10);

        request.budget = "50000".to_string();
        assert_eq!(heuristic_score(&request).1.budget, 10);

        request.budget = "about $50k".to_string();
        assert_eq!(heuristic_score(&request).1.budget, 15);

        request.budget = "$٥٠٠".to_string();
        assert_eq!(heuristic_score(&request).1.budget, 15);
    }

    #[test]
    fn keyword_matching_is_case_insensitive() {
        let request = LeadRequest {
            lead_name: "Lee".to_string(),
            urgency: "HIGH".to_string(),
            decision_authority: "Final Say".to_string(),
            ..LeadRequest::default()
        };

        let (score, breakdown) = heuristic_score(&request);

        assert_eq!(score, 80);
        assert_eq!(breakdown.timeline, 17);
        assert_eq!(breakdown.authority, 18);
        assert_eq!(ConversionProbability::from_score(score), ConversionProbability::VeryHigh);
    }

    #[test]
    fn probability_bands_follow_thresholds() {
        assert_eq!(ConversionProbability::from_score(39).as_str(), "Low");
        assert_eq!(ConversionProbability::from_score(40).as_str(), "Medium");
        assert_eq!(ConversionProbability::from_score(59).as_str(), "Medium");
        assert_eq!(ConversionProbability::from_score(60).as_str(), "High");
        assert_eq!(ConversionProbability::from_score(79).as_str(), "High");
        assert_eq!(ConversionProbability::from_score(80).as_str(), "Very High");
    }

    #[test]
    fn fenced_score_is_extracted_before_coercion() {
        let draft: LeadScoreDraft =
            reconcile("```json\n{\"score\": 42}\n```", schema()).expect("reconcile should succeed");

        assert_eq!(draft.score, 42);
        assert_eq!(draft.score_breakdown, ScoreBreakdown::default());
        assert_eq!(draft.conversion_probability, "Medium");
    }

    #[test]
    fn scores_are_clamped_into_range() {
        let raw = json!({
            "score": 180,
            "score_breakdown": { "budget": -3, "authority": 25, "need": 12, "timeline": 20, "fit": 0 }
        });

        let draft: LeadScoreDraft =
            reconcile(&raw.to_string(), schema()).expect("reconcile should succeed");

        assert_eq!(draft.score, 100);
        assert_eq!(
            draft.score_breakdown,
            ScoreBreakdown { budget: 0, authority: 20, need: 12, timeline: 20, fit: 0 }
        );

        let low: LeadScoreDraft =
            reconcile("{\"score\": -10}", schema()).expect("reconcile should succeed");
        assert_eq!(low.score, 0);
    }

    #[test]
    fn exact_payload_reconciles_to_itself() {
        let payload = json!({
            "score": 85,
            "score_breakdown": { "budget": 18, "authority": 16, "need": 19, "timeline": 17, "fit": 15 },
            "reasoning": "Strong budget and clear need.",
            "conversion_probability": "High",
            "recommended_action": "Send proposal"
        });

        assert_eq!(coerce_to_schema(&payload, schema()), Ok(payload.clone()));

        let draft: LeadScoreDraft =
            reconcile(&payload.to_string(), schema()).expect("reconcile should succeed");
        let response = LeadResponse::assemble(&hot_lead(), draft);
        assert_eq!(response.score, 85);
        assert_eq!(response.lead_name, "Dana Reyes");
        assert_eq!(response.company, "Globex");
    }
}
