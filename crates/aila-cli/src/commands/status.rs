use aila_core::{Database, PromptType};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::session;

/// Combined engagement snapshot for scripting and diagnostics.
#[derive(Serialize)]
pub struct StatusReport<'a> {
    pub actions_count: u64,
    pub exports_count: u64,
    pub persons_count: u64,
    pub pending_prompt_type: Option<PromptType>,
    pub is_prompt_visible: bool,
    pub welcome_offer_seen: bool,
    pub welcome_offer_valid: bool,
    pub referral_code: Option<&'a str>,
    pub last_prompt_at: Option<DateTime<Utc>>,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let (store, init_event) = session::load_store(&db);
    if let Some(e) = &init_event {
        session::print_event(e);
    }

    let now = Utc::now();
    let report = StatusReport {
        actions_count: store.actions_count(),
        exports_count: store.exports_count(),
        persons_count: store.persons_count(),
        pending_prompt_type: store.pending_prompt(),
        is_prompt_visible: store.is_prompt_visible(),
        welcome_offer_seen: store.welcome_offer_seen(),
        welcome_offer_valid: store.is_welcome_offer_valid(now),
        referral_code: store.referral_code(),
        last_prompt_at: store.last_prompt_at(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    session::save_store(&db, &store)
}
