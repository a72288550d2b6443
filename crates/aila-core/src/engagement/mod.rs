//! Engagement trigger engine: counters, prompt scheduling, referral codes.

pub mod referral;
mod store;

pub use store::{ActionKind, EngagementState, EngagementStore, PromptType};
