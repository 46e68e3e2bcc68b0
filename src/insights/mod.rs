//! Property insights - pure derivations over fetched listing and report snapshots

pub mod derive;
pub mod finance;
pub mod format;
pub mod pricing;
pub mod scoring;
pub mod similarity;
pub mod types;

pub use types::*;
