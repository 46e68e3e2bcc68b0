// Library module for testable functions

pub mod config;
pub mod error;
pub mod insights;

pub use config::DerivationDefaults;
pub use error::{InsightError, Result};
pub use insights::derive::{derive_insights, similar_properties, PropertyInsights};
