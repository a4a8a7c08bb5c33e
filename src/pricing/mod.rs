//! Tier catalog and pricing snapshots
//!
//! Turns the questionnaire's tier selection into the amount charged by the
//! payment QR.

/// Tier catalog loaded from JSON
pub mod catalog;
/// Priced tier selection
pub mod snapshot;

pub use catalog::{Addon, Catalog, PricingTier, group_thousands, parse_peso_amount};
pub use snapshot::{PricingSnapshot, Total};
