// Maintenance requests: AI analysis of issue descriptions and owner-scoped persistence.
// All model calls go through llm_client — no direct API calls here.

pub mod analyzer;
pub mod extractor;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod store;
pub mod validation;
