//! # AILA Core Library
//!
//! Client-side engagement and monetization core for the AILA family-tree
//! app. It implements a CLI-first philosophy: every operation is available
//! through a standalone CLI binary, with the mobile/web shells being thin
//! UI layers over the same core library.
//!
//! ## Architecture
//!
//! - **Engagement store**: counters and cooldown timestamps deciding when
//!   the UI should surface a monetization prompt, mirrored to local
//!   key-value storage
//! - **Interstitial gate**: time-window plus navigation-count throttle for
//!   full-screen ads on native mobile targets, holding one preloaded ad
//! - **Storage**: SQLite-backed string key-value store and TOML-based
//!   configuration
//! - **Premium**: backend subscription-status lookup that switches the ad
//!   gate off for paying users
//!
//! Both engines run on a single-threaded, event-driven UI runtime; all
//! time-sensitive operations take an explicit `now` so the host (and the
//! tests) own the clock.
//!
//! ## Key Components
//!
//! - [`EngagementStore`]: prompt trigger state machine
//! - [`InterstitialGate`]: ad display throttle
//! - [`Database`]: persisted key-value mirror
//! - [`Config`]: application configuration management

pub mod ads;
pub mod engagement;
pub mod error;
pub mod events;
pub mod platform;
pub mod premium;
pub mod storage;

pub use ads::{AdGateStats, InterstitialGate, InterstitialProvider, StubProvider};
pub use engagement::{ActionKind, EngagementState, EngagementStore, PromptType};
pub use error::{AdError, ApiError, ConfigError, CoreError, StorageError};
pub use events::Event;
pub use platform::Platform;
pub use premium::{fetch_premium_status, PremiumStatus, SubscriptionStatus};
pub use storage::{AdGateConfig, Config, Database, EngagementConfig, KvStore};
