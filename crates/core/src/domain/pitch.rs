use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::domain::{require, TransportPolicy};
use crate::errors::DomainError;
use crate::reconcile::Schema;

pub const MAX_DIFFERENTIATORS: usize = 3;
pub const MAX_TOKENS: u32 = 2000;
pub const TRANSPORT_POLICY: TransportPolicy = TransportPolicy::Surface;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchRequest {
    pub product_name: String,
    pub product_description: String,
    pub prospect_role: String,
    pub prospect_company: String,
    /// Startup, SMB, Mid-Market or Enterprise.
    pub company_size: String,
}

impl PitchRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("product_name", &self.product_name)
    }

    pub fn prospect_info(&self) -> String {
        format!("{} at {} ({})", self.prospect_role, self.prospect_company, self.company_size)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchDraft {
    pub elevator_pitch: String,
    pub value_proposition: String,
    pub differentiators: Vec<String>,
    pub strategic_cta: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchResponse {
    pub product_name: String,
    pub prospect_info: String,
    pub elevator_pitch: String,
    pub value_proposition: String,
    pub differentiators: Vec<String>,
    pub strategic_cta: String,
}

impl PitchResponse {
    pub fn assemble(request: &PitchRequest, draft: PitchDraft) -> Self {
        Self {
            product_name: request.product_name.clone(),
            prospect_info: request.prospect_info(),
            elevator_pitch: draft.elevator_pitch,
            value_proposition: draft.value_proposition,
            differentiators: draft.differentiators,
            strategic_cta: draft.strategic_cta,
        }
    }
}

pub fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new()
            .text("elevator_pitch")
            .text("value_proposition")
            .text_list("differentiators", Some(MAX_DIFFERENTIATORS))
            .text("strategic_cta")
    })
}

pub fn fallback(request: &PitchRequest) -> PitchResponse {
    let PitchRequest { product_name, prospect_company, company_size, .. } = request;

    PitchResponse {
        product_name: product_name.clone(),
        prospect_info: request.prospect_info(),
        elevator_pitch: format!(
            "Hi, I work with {company_size} companies like {prospect_company} who struggle with efficiency. \
             {product_name} helps teams like yours reduce manual work by 40% while improving output quality. \
             Would you be open to a quick 15-minute call to explore if this could work for you?"
        ),
        value_proposition: format!(
            "{product_name} delivers enterprise-grade capabilities with the simplicity your team needs. \
             We help organizations achieve measurable ROI within 90 days."
        ),
        differentiators: vec![
            format!("Purpose-built for {company_size} companies with scalable architecture"),
            "24/7 dedicated support with average 15-minute response time".to_string(),
            "Seamless integration with your existing tech stack in under 2 hours".to_string(),
        ],
        strategic_cta: format!(
            "I'd love to show you a personalized demo tailored to {prospect_company}'s specific needs. \
             Do you have 20 minutes this week?"
        ),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{fallback, schema, PitchDraft, PitchRequest, PitchResponse};
    use crate::reconcile::{coerce_to_schema, reconcile};

    fn request() -> PitchRequest {
        PitchRequest {
            product_name: "LedgerLite".to_string(),
            product_description: "Bookkeeping automation".to_string(),
            prospect_role: "CFO".to_string(),
            prospect_company: "Northwind".to_string(),
            company_size: "Mid-Market".to_string(),
        }
    }

    #[test]
    fn exact_payload_reconciles_to_itself() {
        let payload = json!({
            "elevator_pitch": "Short pitch",
            "value_proposition": "Value",
            "differentiators": ["one", "two"],
            "strategic_cta": "Book a call"
        });

        assert_eq!(coerce_to_schema(&payload, schema()), Ok(payload));
    }

    #[test]
    fn differentiators_are_truncated_to_three() {
        let raw = r#"```json
{"elevator_pitch": "p", "differentiators": ["a", "b", "c", "d"], "strategic_cta": 12}
```"#;

        let draft: PitchDraft = reconcile(raw, schema()).expect("reconcile should succeed");
        let response = PitchResponse::assemble(&request(), draft);

        assert_eq!(response.differentiators, vec!["a", "b", "c"]);
        assert_eq!(response.strategic_cta, "");
        assert_eq!(response.value_proposition, "");
        assert_eq!(response.prospect_info, "CFO at Northwind (Mid-Market)");
    }

    #[test]
    fn fallback_mentions_prospect_and_product() {
        let response = fallback(&request());

        assert!(response.elevator_pitch.starts_with("Hi, I work with Mid-Market companies like Northwind"));
        assert!(response.elevator_pitch.contains("LedgerLite helps teams like yours"));
        assert_eq!(response.differentiators.len(), 3);
        assert_eq!(
            response.differentiators[0],
            "Purpose-built for Mid-Market companies with scalable architecture"
        );
        assert!(response.strategic_cta.contains("Northwind's specific needs"));
    }
}
