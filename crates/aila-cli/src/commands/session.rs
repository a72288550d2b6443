//! Session continuity between CLI invocations.
//!
//! The UI shells keep one `EngagementStore` alive per process; the CLI is
//! a process per command, so the full state snapshot (including the
//! volatile pending prompt) is saved under a kv key and restored on the
//! next invocation. The six durable `aila_*` keys stay the authoritative
//! persisted mirror either way.

use aila_core::{Config, Database, EngagementState, EngagementStore, Event};
use chrono::Utc;

const STATE_KEY: &str = "engagement_state";

/// Restore the engagement store from the last snapshot, or initialize it
/// from the durable keys (which may start the welcome offer).
pub fn load_store(db: &Database) -> (EngagementStore<&Database>, Option<Event>) {
    let config = Config::load().engagement;

    if let Ok(Some(json)) = db.kv_get(STATE_KEY) {
        if let Ok(state) = serde_json::from_str::<EngagementState>(&json) {
            return (EngagementStore::restore(db, config, state), None);
        }
    }

    // The CLI always runs on behalf of the signed-in local user.
    EngagementStore::initialize(db, config, true, Utc::now())
}

/// Persist the state snapshot for the next invocation.
pub fn save_store(db: &Database, store: &EngagementStore<&Database>) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(store.state())?;
    db.kv_set(STATE_KEY, &json)?;
    Ok(())
}

/// Print an event as one JSON line.
pub fn print_event(event: &Event) {
    match serde_json::to_string(event) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("could not serialize event: {e}"),
    }
}
