//! Read-only catalog data: membership tiers and health conditions.

pub mod health_condition;
pub mod tier;

pub use health_condition::HealthCondition;
pub use tier::{BillingPeriod, Tier, TierError};
