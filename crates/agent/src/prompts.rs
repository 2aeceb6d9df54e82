//! Prompt templates. Each renderer is a pure function of its request so the
//! exact text sent to the model is reproducible in tests.

use marketmind_core::domain::campaign::CampaignRequest;
use marketmind_core::domain::intel::IntelContext;
use marketmind_core::domain::lead::LeadRequest;
use marketmind_core::domain::pitch::PitchRequest;

const JSON_ONLY: &str = "IMPORTANT: Respond ONLY with valid JSON. No explanations outside the JSON.";

pub fn campaign(request: &CampaignRequest) -> String {
    let CampaignRequest { product_name, product_description, target_audience, platform } = request;

    format!(
        r#"You are a senior marketing strategist with 15+ years experience in digital marketing.
Create a comprehensive marketing campaign for the following:

PRODUCT: {product_name}
DESCRIPTION: {product_description}
TARGET AUDIENCE: {target_audience}
PLATFORM: {platform}

Generate a complete marketing strategy with:
1. 3 clear campaign objectives aligned with {platform}
2. 5 targeted content ideas (mix of posts, videos, carousels, stories, articles as appropriate)
3. 3 variations of compelling ad copy (focus on: pain_point, benefit, urgency)
4. 4 specific call-to-action suggestions tailored to {platform}'s audience behavior

RESPOND IN THIS EXACT JSON FORMAT:
{{
    "campaign_objectives": ["objective1", "objective2", "objective3"],
    "content_ideas": [
        {{"title": "Content Title", "description": "What this content covers", "content_type": "post/video/carousel/story/article"}}
    ],
    "ad_copies": [
        {{"headline": "Attention-grabbing headline", "body": "The ad body text", "variation_focus": "pain_point/benefit/urgency"}}
    ],
    "cta_suggestions": ["CTA 1", "CTA 2", "CTA 3", "CTA 4"]
}}

{JSON_ONLY}"#
    )
}

pub fn pitch(request: &PitchRequest) -> String {
    let PitchRequest {
        product_name,
        product_description,
        prospect_role,
        prospect_company,
        company_size,
    } = request;

    format!(
        r#"You are a world-class B2B sales expert who has closed deals with Fortune 500 companies.
Create a personalized, compelling sales pitch for the following scenario:

PRODUCT: {product_name}
DESCRIPTION: {product_description}
PROSPECT ROLE: {prospect_role}
PROSPECT COMPANY: {prospect_company}
COMPANY SIZE: {company_size}

Generate:
1. A concise 30-second elevator pitch (max 75 words) - conversational, not salesy
2. A clear value proposition (2-3 sentences)
3. 3 key differentiators that address {company_size} company pain points
4. A strategic call-to-action to move the prospect to the next sales stage

RESPOND IN THIS EXACT JSON FORMAT:
{{
    "elevator_pitch": "Your 30-second pitch here...",
    "value_proposition": "Clear value statement...",
    "differentiators": [
        "Differentiator 1 addressing specific pain point",
        "Differentiator 2 with competitive advantage",
        "Differentiator 3 with unique benefit"
    ],
    "strategic_cta": "Next step action..."
}}

{JSON_ONLY}"#
    )
}

pub fn lead_score(request: &LeadRequest) -> String {
    let LeadRequest {
        lead_name,
        company,
        budget,
        timeline,
        urgency,
        decision_authority,
        need_fit,
    } = request;

    format!(
        r#"You are a senior sales operations analyst specializing in lead qualification and scoring.
Analyze this lead and provide a comprehensive qualification assessment:

LEAD INFORMATION:
- Name: {lead_name}
- Company: {company}
- Budget: {budget}
- Timeline: {timeline}
- Urgency: {urgency}
- Decision Authority: {decision_authority}
- Need/Fit: {need_fit}

Score this lead using BANT+F methodology (Budget, Authority, Need, Timeline + Fit).
Provide:
1. An overall score from 0-100
2. Individual scores for each dimension (0-20 each)
3. Detailed reasoning for the score
4. Conversion probability (Low/Medium/High/Very High)
5. Recommended next action

RESPOND IN THIS EXACT JSON FORMAT:
{{
    "score": 85,
    "score_breakdown": {{
        "budget": 18,
        "authority": 16,
        "need": 19,
        "timeline": 17,
        "fit": 15
    }},
    "reasoning": "Detailed analysis of why this lead received this score...",
    "conversion_probability": "High",
    "recommended_action": "Specific action to take with this lead..."
}}

IMPORTANT: Respond ONLY with valid JSON. Base scores on the actual input values provided."#
    )
}

pub fn company_intel(context: &IntelContext) -> String {
    let company = &context.company_name;
    let health = &context.financial_health;
    let headlines = context
        .headlines
        .iter()
        .map(|headline| format!("- {}", headline.headline))
        .collect::<Vec<_>>()
        .join("\n");

    let (product_section, product_task, product_field) = match context.product_context.as_deref() {
        Some(product) => (
            format!("\nOUR PRODUCT: {product}\n"),
            "\n6. Product fit: score 1-10 for how well our product fits this company, a one-sentence rationale, and up to 3 talking points",
            r#",
    "product_fit": {"score": 7, "rationale": "Why it fits...", "talking_points": ["Point 1", "Point 2", "Point 3"]}"#,
        ),
        None => (String::new(), "", ""),
    };

    format!(
        r#"You are a Senior Sales Director analyzing this company for a sales approach.

COMPANY: {company}
FINANCIAL DATA: Stock: {stock}, Market Cap: {cap}, 52W Change: {change}, Sector: {sector}
{product_section}
RECENT NEWS:
{headlines}

Generate:
1. Sentiment for each headline (positive/negative/neutral)
2. Strategic approach: "cost_optimization" if challenges detected, "scaling_growth" if growth signals
3. Brief reasoning for approach
4. 3 tactical pitch points
5. Short personalized cold email opener (2-3 sentences){product_task}

RESPOND IN EXACT JSON:
{{
    "news_sentiments": [{{"headline": "...", "sentiment": "positive/negative/neutral"}}],
    "approach": "cost_optimization" or "scaling_growth",
    "reasoning": "Brief explanation...",
    "pitch_points": ["Point 1", "Point 2", "Point 3"],
    "cold_email": "Email opener..."{product_field}
}}"#,
        stock = health.stock_price,
        cap = health.market_cap,
        change = health.change_52w,
        sector = health.sector,
    )
}
