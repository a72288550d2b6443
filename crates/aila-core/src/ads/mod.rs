//! Interstitial ad gating for native mobile targets.

mod gate;
mod provider;

pub use gate::{AdGateStats, InterstitialGate};
pub use provider::{AdHandle, InterstitialProvider, StubProvider};
