//! Market snapshot shaping for the company-intel battlecard: ticker
//! resolution, financial formatting and the neutral defaults used whenever a
//! lookup degrades.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

pub const NOT_AVAILABLE: &str = "N/A";
pub const DEFAULT_SECTOR: &str = "Technology";
pub const UNKNOWN_HEALTH: &str = "Unknown";
pub const MAX_HEADLINES: usize = 3;

const TICKER_ALIASES: &[(&str, &str)] = &[
    ("tesla", "TSLA"),
    ("apple", "AAPL"),
    ("google", "GOOGL"),
    ("alphabet", "GOOGL"),
    ("microsoft", "MSFT"),
    ("amazon", "AMZN"),
    ("meta", "META"),
    ("facebook", "META"),
    ("nvidia", "NVDA"),
    ("netflix", "NFLX"),
    ("tcs", "TCS.NS"),
    ("infosys", "INFY.NS"),
    ("wipro", "WIPRO.NS"),
    ("reliance", "RELIANCE.NS"),
];

fn ticker_aliases() -> &'static HashMap<&'static str, &'static str> {
    static ALIASES: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    ALIASES.get_or_init(|| TICKER_ALIASES.iter().copied().collect())
}

/// Maps a company name to a ticker symbol; unknown names fall back to the
/// first four characters of the upper-cased name.
pub fn resolve_ticker(company_name: &str) -> String {
    let trimmed = company_name.trim();
    match ticker_aliases().get(trimmed.to_lowercase().as_str()) {
        Some(ticker) => (*ticker).to_string(),
        None => trimmed.to_uppercase().chars().take(4).collect(),
    }
}

/// Raw figures as returned by a financial-data provider. Every figure is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialQuote {
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    /// Fractional change over 52 weeks, `0.25` meaning +25%.
    pub change_52w: Option<f64>,
    pub sector: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialHealth {
    pub stock_price: String,
    pub market_cap: String,
    pub change_52w: String,
    pub sector: String,
    pub health_score: String,
}

impl FinancialHealth {
    pub fn from_quote(quote: &FinancialQuote) -> Self {
        let change = quote.change_52w.filter(|value| *value != 0.0 && value.is_finite());

        Self {
            stock_price: quote
                .price
                .filter(|value| value.is_finite())
                .map(|price| format!("${}", price_text(price)))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            market_cap: format_market_cap(quote.market_cap),
            change_52w: change
                .map(|value| format!("{:+.1}%", value * 100.0))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            sector: quote
                .sector
                .as_deref()
                .map(str::trim)
                .filter(|sector| !sector.is_empty())
                .unwrap_or(DEFAULT_SECTOR)
                .to_string(),
            health_score: health_band(change).to_string(),
        }
    }

    /// Neutral snapshot for a failed lookup.
    pub fn unavailable() -> Self {
        Self {
            stock_price: NOT_AVAILABLE.to_string(),
            market_cap: NOT_AVAILABLE.to_string(),
            change_52w: NOT_AVAILABLE.to_string(),
            sector: DEFAULT_SECTOR.to_string(),
            health_score: UNKNOWN_HEALTH.to_string(),
        }
    }
}

fn format_market_cap(market_cap: Option<f64>) -> String {
    match market_cap.filter(|value| *value > 0.0 && value.is_finite()) {
        Some(value) if value >= 1e12 => format!("${:.2}T", value / 1e12),
        Some(value) if value >= 1e9 => format!("${:.2}B", value / 1e9),
        Some(value) => format!("${:.2}M", value / 1e6),
        None => NOT_AVAILABLE.to_string(),
    }
}

// Quoted as-is: shortest round-trip digits, whole prices keep one decimal (`250.0`).
fn price_text(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{price:.1}")
    } else {
        price.to_string()
    }
}

/// A missing or flat 52-week change lands in the lowest band; `Unknown` is
/// reserved for a lookup that failed outright.
fn health_band(change_52w: Option<f64>) -> &'static str {
    match change_52w {
        Some(change) if change > 0.2 => "Strong",
        Some(change) if change > 0.0 => "Stable",
        Some(change) if change > -0.2 => "Moderate",
        _ => "At Risk",
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub headline: String,
    pub source: String,
}

impl Headline {
    pub fn new(headline: impl Into<String>, source: impl Into<String>) -> Self {
        Self { headline: headline.into(), source: source.into() }
    }
}

pub fn placeholder_headlines(company_name: &str) -> Vec<Headline> {
    vec![
        Headline::new(format!("Latest updates on {company_name}"), "Market News"),
        Headline::new(format!("{company_name} industry trends"), "Business Wire"),
        Headline::new(format!("Analyst insights on {company_name}"), "Reuters"),
    ]
}

#[cfg(test)]
mod tests {
    use super::{
        placeholder_headlines, resolve_ticker, FinancialHealth, FinancialQuote, NOT_AVAILABLE,
    };

    #[test]
    fn known_companies_resolve_through_alias_table() {
        assert_eq!(resolve_ticker("Tesla"), "TSLA");
        assert_eq!(resolve_ticker("  ALPHABET "), "GOOGL");
        assert_eq!(resolve_ticker("infosys"), "INFY.NS");
    }

    #[test]
    fn unknown_companies_use_first_four_upper_cased_characters() {
        assert_eq!(resolve_ticker("Snowflake"), "SNOW");
        assert_eq!(resolve_ticker("ibm"), "IBM");
    }

    #[test]
    fn quote_is_formatted_into_health_snapshot() {
        let health = FinancialHealth::from_quote(&FinancialQuote {
            price: Some(245.3),
            market_cap: Some(2.5e12),
            change_52w: Some(0.314),
            sector: Some("Consumer Cyclical".to_string()),
        });

        assert_eq!(
            health,
            FinancialHealth {
                stock_price: "$245.3".to_string(),
                market_cap: "$2.50T".to_string(),
                change_52w: "+31.4%".to_string(),
                sector: "Consumer Cyclical".to_string(),
                health_score: "Strong".to_string(),
            }
        );
    }

    #[test]
    fn market_cap_units_and_health_bands() {
        let snapshot = |market_cap, change| {
            FinancialHealth::from_quote(&FinancialQuote {
                price: None,
                market_cap: Some(market_cap),
                change_52w: Some(change),
                sector: None,
            })
        };

        let billions = snapshot(8.4e9, 0.05);
        assert_eq!(billions.market_cap, "$8.40B");
        assert_eq!(billions.health_score, "Stable");
        assert_eq!(billions.sector, "Technology");
        assert_eq!(billions.stock_price, NOT_AVAILABLE);

        let millions = snapshot(950e6, -0.1);
        assert_eq!(millions.market_cap, "$950.00M");
        assert_eq!(millions.change_52w, "-10.0%");
        assert_eq!(millions.health_score, "Moderate");

        assert_eq!(snapshot(1e9, -0.35).health_score, "At Risk");
        assert_eq!(snapshot(0.0, 0.0).market_cap, NOT_AVAILABLE);
        assert_eq!(snapshot(0.0, 0.0).change_52w, NOT_AVAILABLE);
        assert_eq!(snapshot(0.0, 0.0).health_score, "At Risk");
    }

    #[test]
    fn missing_change_is_at_risk_and_prices_keep_their_digits() {
        let health = FinancialHealth::from_quote(&FinancialQuote {
            price: Some(182.5),
            market_cap: Some(2.9e12),
            change_52w: None,
            sector: None,
        });

        assert_eq!(health.stock_price, "$182.5");
        assert_eq!(health.market_cap, "$2.90T");
        assert_eq!(health.change_52w, NOT_AVAILABLE);
        assert_eq!(health.health_score, "At Risk");

        let whole = FinancialHealth::from_quote(&FinancialQuote {
            price: Some(250.0),
            ..FinancialQuote::default()
        });
        assert_eq!(whole.stock_price, "$250.0");
    }

    #[test]
    fn only_a_failed_lookup_is_unknown() {
        assert_eq!(FinancialHealth::unavailable().health_score, "Unknown");
        assert_eq!(FinancialHealth::from_quote(&FinancialQuote::default()).health_score, "At Risk");
    }

    #[test]
    fn placeholders_are_attributed_to_generic_sources() {
        let headlines = placeholder_headlines("Acme");

        assert_eq!(headlines.len(), 3);
        assert_eq!(headlines[0].headline, "Latest updates on Acme");
        assert_eq!(headlines[1].source, "Business Wire");
        assert_eq!(headlines[2].headline, "Analyst insights on Acme");
    }
}
