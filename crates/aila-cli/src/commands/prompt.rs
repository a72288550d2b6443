use aila_core::{Database, PromptType};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde::Serialize;

use super::session;

#[derive(Subcommand)]
pub enum PromptAction {
    /// Print the pending prompt as JSON (the UI-layer contract)
    Status,
    /// Dismiss the pending prompt
    Dismiss,
    /// Queue the time-limited campaign prompt (cooldown applies)
    TimeLimited,
}

/// What the UI layer consumes to decide whether to render an overlay.
#[derive(Serialize)]
pub struct PromptStatus {
    pub pending_prompt_type: Option<PromptType>,
    pub is_prompt_visible: bool,
    pub welcome_offer_valid: bool,
    pub welcome_offer_expiry: Option<DateTime<Utc>>,
}

pub fn run(action: PromptAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let (mut store, init_event) = session::load_store(&db);
    if let Some(e) = &init_event {
        session::print_event(e);
    }

    match action {
        PromptAction::Status => {
            let now = Utc::now();
            let status = PromptStatus {
                pending_prompt_type: store.pending_prompt(),
                is_prompt_visible: store.is_prompt_visible(),
                welcome_offer_valid: store.is_welcome_offer_valid(now),
                welcome_offer_expiry: store.welcome_offer_expiry(),
            };
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        PromptAction::Dismiss => {
            if let Some(e) = store.dismiss_prompt(Utc::now()) {
                session::print_event(&e);
            }
        }
        PromptAction::TimeLimited => {
            if let Some(e) = store.request_prompt(PromptType::TimeLimited, Utc::now()) {
                session::print_event(&e);
            }
        }
    }

    session::save_store(&db, &store)
}
