use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::domain::{require, TransportPolicy};
use crate::errors::DomainError;
use crate::reconcile::Schema;

pub const MAX_CONTENT_IDEAS: usize = 5;
pub const MAX_AD_COPIES: usize = 3;
pub const MAX_TOKENS: u32 = 2000;
pub const TRANSPORT_POLICY: TransportPolicy = TransportPolicy::Surface;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignRequest {
    pub product_name: String,
    pub product_description: String,
    pub target_audience: String,
    /// LinkedIn, Twitter, Facebook, Instagram, ...
    pub platform: String,
}

impl CampaignRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("product_name", &self.product_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentIdea {
    pub title: String,
    pub description: String,
    /// post, video, carousel, story or article.
    pub content_type: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCopy {
    pub headline: String,
    pub body: String,
    /// pain_point, benefit or urgency.
    pub variation_focus: String,
}

/// The model-authored part of a campaign.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub campaign_objectives: Vec<String>,
    pub content_ideas: Vec<ContentIdea>,
    pub ad_copies: Vec<AdCopy>,
    pub cta_suggestions: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignResponse {
    pub product_name: String,
    pub platform: String,
    pub campaign_objectives: Vec<String>,
    pub content_ideas: Vec<ContentIdea>,
    pub ad_copies: Vec<AdCopy>,
    pub cta_suggestions: Vec<String>,
}

impl CampaignResponse {
    pub fn assemble(request: &CampaignRequest, draft: CampaignDraft) -> Self {
        Self {
            product_name: request.product_name.clone(),
            platform: request.platform.clone(),
            campaign_objectives: draft.campaign_objectives,
            content_ideas: draft.content_ideas,
            ad_copies: draft.ad_copies,
            cta_suggestions: draft.cta_suggestions,
        }
    }
}

pub fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new()
            .text_list("campaign_objectives", None)
            .object_list(
                "content_ideas",
                Some(MAX_CONTENT_IDEAS),
                Schema::new().text("title").text("description").text("content_type"),
            )
            .object_list(
                "ad_copies",
                Some(MAX_AD_COPIES),
                Schema::new().text("headline").text("body").text("variation_focus"),
            )
            .text_list("cta_suggestions", None)
    })
}

pub fn fallback(request: &CampaignRequest) -> CampaignResponse {
    let product = &request.product_name;
    let idea = |title: &str, description: String, content_type: &str| ContentIdea {
        title: title.to_string(),
        description,
        content_type: content_type.to_string(),
    };
    let ad = |headline: &str, body: String, variation_focus: &str| AdCopy {
        headline: headline.to_string(),
        body,
        variation_focus: variation_focus.to_string(),
    };

    CampaignResponse {
        product_name: product.clone(),
        platform: request.platform.clone(),
        campaign_objectives: vec![
            format!("Increase brand awareness for {product} on {}", request.platform),
            format!("Drive qualified leads from {}", request.target_audience),
            "Boost engagement and conversions by 25%".to_string(),
        ],
        content_ideas: vec![
            idea("Product Introduction", format!("Introduce {product} to your audience"), "post"),
            idea("Customer Success Story", "Showcase real results from users".to_string(), "video"),
            idea("Behind the Scenes", "Show the team and process".to_string(), "story"),
            idea(
                "Tips & Tricks",
                "Educational content related to your product".to_string(),
                "carousel",
            ),
            idea("Industry Insights", "Thought leadership article".to_string(), "article"),
        ],
        ad_copies: vec![
            ad(
                "Struggling with productivity?",
                format!("{product} helps teams work smarter. Join 10,000+ satisfied users."),
                "pain_point",
            ),
            ad(
                "Transform your workflow today",
                format!("See why leaders choose {product}. Start free."),
                "benefit",
            ),
            ad(
                "Limited time: 30% off",
                format!("Don't miss out on {product}. Offer ends soon."),
                "urgency",
            ),
        ],
        cta_suggestions: ["Start Free Trial", "Book a Demo", "Learn More", "Get Started Today"]
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}
