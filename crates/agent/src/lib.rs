//! Sales runtime - completion provider, market lookups and the four use cases
//!
//! This crate owns every outbound call the service makes:
//! - `llm`: the `LlmClient` seam and an OpenAI-compatible chat-completions client
//! - `market`: financial-data and news providers with never-fail wrappers
//! - `prompts`: prompt templates rendered from request fields
//! - `runtime`: `SalesRuntime`, which validates, prompts, reconciles and falls back
//!
//! # Safety Principle
//!
//! The model's output is never trusted for shape. Everything it returns passes
//! through the reconciler in `marketmind-core`, and anything unusable is replaced
//! by a deterministic fallback.

pub mod llm;
pub mod market;
pub mod prompts;
pub mod runtime;

pub use llm::{ChatCompletionsClient, CompletionError, LlmClient};
pub use market::{FinancialDataProvider, LookupError, NewsApiClient, NewsProvider, YahooFinanceClient};
pub use runtime::SalesRuntime;
