use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engagement::PromptType;

/// Every state change in the system produces an Event.
/// The UI layer polls for events; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A monetization prompt became pending (last-write-wins over any
    /// previously pending prompt).
    PromptRequested {
        prompt_type: PromptType,
        at: DateTime<Utc>,
    },
    PromptDismissed {
        prompt_type: PromptType,
        at: DateTime<Utc>,
    },
    /// First launch with a signed-in user: the 24h welcome offer started.
    WelcomeOfferStarted {
        expires_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    ReferralCodeGenerated {
        code: String,
        at: DateTime<Utc>,
    },
    /// An interstitial was displayed; the navigation counter was reset.
    AdShown {
        page: String,
        at: DateTime<Utc>,
    },
    /// Loading an ad asset failed; a retry is scheduled.
    AdLoadFailed {
        reason: String,
        retry_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    /// A loaded ad could not be displayed; the handle was discarded.
    AdShowFailed {
        reason: String,
        at: DateTime<Utc>,
    },
    /// An ad asset finished preloading and is held for the next slot.
    AdPreloaded {
        at: DateTime<Utc>,
    },
}
