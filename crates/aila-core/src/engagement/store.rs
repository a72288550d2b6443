//! Engagement trigger store.
//!
//! Tracks a user's interaction counters and decides when to ask the UI
//! layer to surface one of the monetization prompt variants. Counters and
//! cooldown timestamps mirror to local key-value storage; every persist is
//! best-effort (a storage failure is logged and the in-memory value kept).
//!
//! ## Prompt lifecycle
//!
//! ```text
//! idle -> pending(type) -> idle   (on dismiss_prompt)
//! ```
//!
//! At most one prompt is pending at a time; a request while one is pending
//! overwrites the pending type (last-write-wins). Requests other than
//! `Welcome` and `Export` are silently dropped while the cooldown window
//! since the last shown prompt is open.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::referral;
use crate::events::Event;
use crate::storage::{EngagementConfig, KvStore};

/// Persisted key-value entries, one per field.
mod keys {
    pub const ACTIONS_COUNT: &str = "aila_actions_count";
    pub const EXPORTS_COUNT: &str = "aila_exports_count";
    pub const WELCOME_SEEN: &str = "aila_welcome_seen";
    pub const WELCOME_EXPIRY: &str = "aila_welcome_expiry";
    pub const LAST_PROMPT: &str = "aila_last_prompt";
    pub const REFERRAL_CODE: &str = "aila_referral_code";
}

/// A tracked user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    AddPerson,
    Export,
    ViewTree,
}

/// Monetization prompt variants the UI can be asked to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptType {
    /// New-user time-limited offer, shown once on first launch.
    Welcome,
    /// Shown after a data export.
    Export,
    /// Shown when the tree reaches notable sizes.
    TreeSize,
    /// Campaign variant; never auto-triggered, reachable via the host only.
    TimeLimited,
}

impl PromptType {
    /// Welcome and export prompts ignore the 24h cooldown. The export
    /// exemption looks inconsistent next to tree-size but is intentional;
    /// do not "fix" it without product confirmation.
    fn bypasses_cooldown(self) -> bool {
        matches!(self, PromptType::Welcome | PromptType::Export)
    }
}

/// Complete engagement state, both the persisted mirror and the volatile
/// per-session part (`pending_prompt`, `persons_count`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementState {
    /// Total tracked user actions.
    pub actions_count: u64,
    /// Subset of actions that were data exports.
    pub exports_count: u64,
    /// Current size of the user's tree (external snapshot, not persisted).
    pub persons_count: u64,
    /// Currently pending prompt, if any.
    pub pending_prompt: Option<PromptType>,
    /// Whether the new-user offer has been dismissed.
    pub welcome_offer_seen: bool,
    /// Deadline of the new-user offer. Set once, never extended.
    pub welcome_offer_expiry: Option<DateTime<Utc>>,
    /// When a prompt was last shown (cooldown anchor).
    pub last_prompt_at: Option<DateTime<Utc>>,
    /// Referral code; stable once generated.
    pub referral_code: Option<String>,
}

/// Engagement trigger store.
///
/// Owns the in-memory state and a key-value store it mirrors into. All
/// time-sensitive operations take an explicit `now` so the embedding
/// runtime (and tests) control the clock.
pub struct EngagementStore<S: KvStore> {
    kv: S,
    config: EngagementConfig,
    state: EngagementState,
}

impl<S: KvStore> EngagementStore<S> {
    /// Load persisted state and run the first-launch welcome-offer check.
    ///
    /// When no welcome-seen flag has ever been persisted and a user is
    /// present, the welcome offer starts: expiry is set to
    /// `now + welcome_offer_hours`, persisted, and a welcome prompt becomes
    /// pending. A previously persisted expiry is never extended.
    pub fn initialize(
        kv: S,
        config: EngagementConfig,
        user_present: bool,
        now: DateTime<Utc>,
    ) -> (Self, Option<Event>) {
        let welcome_seen_raw = read_key(&kv, keys::WELCOME_SEEN);

        let state = EngagementState {
            actions_count: read_counter(&kv, keys::ACTIONS_COUNT),
            exports_count: read_counter(&kv, keys::EXPORTS_COUNT),
            persons_count: 0,
            pending_prompt: None,
            welcome_offer_seen: welcome_seen_raw.as_deref() == Some("true"),
            welcome_offer_expiry: read_timestamp(&kv, keys::WELCOME_EXPIRY),
            last_prompt_at: read_timestamp(&kv, keys::LAST_PROMPT),
            referral_code: read_key(&kv, keys::REFERRAL_CODE),
        };

        let mut store = Self { kv, config, state };

        // Launch with a signed-in user before the offer was ever dismissed:
        // the welcome prompt becomes pending. The expiry is written exactly
        // once; relaunching does not extend it.
        if welcome_seen_raw.is_none() && user_present {
            let expires_at = match store.state.welcome_offer_expiry {
                Some(existing) => existing,
                None => {
                    let expires_at = now + Duration::hours(store.config.welcome_offer_hours);
                    store.state.welcome_offer_expiry = Some(expires_at);
                    store.persist(keys::WELCOME_EXPIRY, &expires_at.to_rfc3339());
                    expires_at
                }
            };
            store.state.welcome_offer_seen = false;
            store.state.pending_prompt = Some(PromptType::Welcome);
            return (
                store,
                Some(Event::WelcomeOfferStarted { expires_at, at: now }),
            );
        }

        (store, None)
    }

    /// Restore a previously snapshotted state (host session continuity).
    pub fn restore(kv: S, config: EngagementConfig, state: EngagementState) -> Self {
        Self { kv, config, state }
    }

    /// Record a user action and evaluate the prompt triggers.
    ///
    /// Exports always request an export prompt, bypassing the cooldown.
    /// Adding a person requests a tree-size prompt (cooldown applies) when
    /// the current tree size sits on a trigger multiple at or past the
    /// threshold.
    pub fn track_action(&mut self, kind: ActionKind, now: DateTime<Utc>) -> Option<Event> {
        self.state.actions_count += 1;
        self.persist(keys::ACTIONS_COUNT, &self.state.actions_count.to_string());

        match kind {
            ActionKind::Export => {
                self.state.exports_count += 1;
                self.persist(keys::EXPORTS_COUNT, &self.state.exports_count.to_string());
                self.request_prompt(PromptType::Export, now)
            }
            ActionKind::AddPerson => {
                let n = self.state.persons_count;
                if n > 0 && n % self.config.tree_size_interval == 0 && n >= self.config.tree_size_min
                {
                    self.request_prompt(PromptType::TreeSize, now)
                } else {
                    None
                }
            }
            ActionKind::ViewTree => None,
        }
    }

    /// Update the tree-size snapshot (in-memory only, not persisted).
    ///
    /// Edge-triggered: exactly reaching the threshold requests a tree-size
    /// prompt; any other value, including larger multiples, does not.
    pub fn set_persons_count(&mut self, count: u64, now: DateTime<Utc>) -> Option<Event> {
        self.state.persons_count = count;
        if count == self.config.tree_size_min {
            self.request_prompt(PromptType::TreeSize, now)
        } else {
            None
        }
    }

    /// Request a prompt, honoring the cooldown window.
    ///
    /// A request inside the cooldown is dropped silently and leaves
    /// `last_prompt_at` untouched. A successful request overwrites any
    /// already-pending prompt and persists `last_prompt_at = now`.
    pub fn request_prompt(&mut self, prompt_type: PromptType, now: DateTime<Utc>) -> Option<Event> {
        if !prompt_type.bypasses_cooldown() {
            if let Some(last) = self.state.last_prompt_at {
                if now - last < Duration::hours(self.config.prompt_cooldown_hours) {
                    return None;
                }
            }
        }

        self.state.pending_prompt = Some(prompt_type);
        self.state.last_prompt_at = Some(now);
        self.persist(keys::LAST_PROMPT, &now.to_rfc3339());
        Some(Event::PromptRequested { prompt_type, at: now })
    }

    /// Clear the pending prompt. Dismissing the welcome offer marks it as
    /// seen so it never restarts. No-op when nothing is pending.
    pub fn dismiss_prompt(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let prompt_type = self.state.pending_prompt.take()?;
        if prompt_type == PromptType::Welcome && !self.state.welcome_offer_seen {
            self.state.welcome_offer_seen = true;
            self.persist(keys::WELCOME_SEEN, "true");
        }
        Some(Event::PromptDismissed { prompt_type, at: now })
    }

    /// Return the referral code, generating and persisting one on first
    /// call. Codes are local-only; no global uniqueness (collisions are a
    /// server-side concern, out of scope here).
    pub fn generate_referral_code(&mut self, now: DateTime<Utc>) -> (String, Option<Event>) {
        if let Some(code) = &self.state.referral_code {
            return (code.clone(), None);
        }
        let code = referral::generate_code();
        self.state.referral_code = Some(code.clone());
        self.persist(keys::REFERRAL_CODE, &code);
        let event = Event::ReferralCodeGenerated {
            code: code.clone(),
            at: now,
        };
        (code, Some(event))
    }

    /// Whether the welcome offer is still running.
    pub fn is_welcome_offer_valid(&self, now: DateTime<Utc>) -> bool {
        self.state
            .welcome_offer_expiry
            .map(|expiry| now < expiry)
            .unwrap_or(false)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn actions_count(&self) -> u64 {
        self.state.actions_count
    }

    pub fn exports_count(&self) -> u64 {
        self.state.exports_count
    }

    pub fn persons_count(&self) -> u64 {
        self.state.persons_count
    }

    pub fn pending_prompt(&self) -> Option<PromptType> {
        self.state.pending_prompt
    }

    pub fn is_prompt_visible(&self) -> bool {
        self.state.pending_prompt.is_some()
    }

    pub fn welcome_offer_seen(&self) -> bool {
        self.state.welcome_offer_seen
    }

    pub fn welcome_offer_expiry(&self) -> Option<DateTime<Utc>> {
        self.state.welcome_offer_expiry
    }

    pub fn last_prompt_at(&self) -> Option<DateTime<Utc>> {
        self.state.last_prompt_at
    }

    pub fn referral_code(&self) -> Option<&str> {
        self.state.referral_code.as_deref()
    }

    /// Full state snapshot (for host-side session continuity).
    pub fn state(&self) -> &EngagementState {
        &self.state
    }

    /// Best-effort write: a storage failure is logged, the in-memory value
    /// stays authoritative for the session, and nothing is retried.
    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.kv.set(key, value) {
            log::warn!("best-effort persist of {key} failed: {e}");
        }
    }
}

/// Best-effort read: a storage failure is logged and treated as absent.
fn read_key<S: KvStore>(kv: &S, key: &str) -> Option<String> {
    match kv.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("best-effort read of {key} failed: {e}");
            None
        }
    }
}

fn read_counter<S: KvStore>(kv: &S, key: &str) -> u64 {
    read_key(kv, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn read_timestamp<S: KvStore>(kv: &S, key: &str) -> Option<DateTime<Utc>> {
    read_key(kv, key)
        .and_then(|v| DateTime::parse_from_rfc3339(&v).ok())
        .map(|t| t.with_timezone(&Utc))
}

#[cfg(test)]
use crate::error::StorageError;

/// In-memory key-value store for tests.
#[cfg(test)]
pub(crate) struct MemoryKv(std::cell::RefCell<std::collections::HashMap<String, String>>);

#[cfg(test)]
impl MemoryKv {
    pub fn new() -> Self {
        Self(std::cell::RefCell::new(std::collections::HashMap::new()))
    }
}

#[cfg(test)]
impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.0.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Key-value store whose every access fails (tests the best-effort path).
#[cfg(test)]
struct FailingKv;

#[cfg(test)]
impl KvStore for FailingKv {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::AccessFailed("disk on fire".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::AccessFailed("disk on fire".into()))
    }
}
