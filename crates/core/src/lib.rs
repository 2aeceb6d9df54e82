pub mod config;
pub mod domain;
pub mod errors;
pub mod market;
pub mod reconcile;

pub use domain::campaign::{CampaignRequest, CampaignResponse};
pub use domain::intel::{CompanyIntelRequest, CompanyIntelResponse};
pub use domain::lead::{LeadRequest, LeadResponse};
pub use domain::pitch::{PitchRequest, PitchResponse};
pub use domain::TransportPolicy;
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use market::{FinancialHealth, FinancialQuote, Headline};
pub use reconcile::{reconcile, ReconcileError, Schema};
