//! Seam to the native interstitial SDK.
//!
//! The real SDK binding lives in the mobile shell; this crate only sees the
//! load/show surface. SDK callbacks (`loaded`, `error`, `closed`) are
//! modeled as synchronous trait calls on the cooperative UI runtime, with
//! retry scheduling done against the wall clock by the gate.

use crate::error::AdError;

/// Opaque reference to a loaded ad asset. At most one is held at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdHandle(pub(crate) u64);

/// Every interstitial network binding implements this trait.
pub trait InterstitialProvider {
    /// Request a new ad asset from the network.
    fn load(&mut self) -> Result<AdHandle, AdError>;

    /// Display a previously loaded ad full-screen. The handle is consumed
    /// by the caller regardless of the outcome.
    fn show(&mut self, handle: &AdHandle) -> Result<(), AdError>;
}

/// In-process provider used by the CLI simulator and tests. The web build
/// of the original product ships the same kind of stub; the real network
/// binding only exists in the native shells.
#[derive(Debug, Default)]
pub struct StubProvider {
    next_id: u64,
    /// Number of load requests served.
    pub loads: u32,
    /// Number of show requests served.
    pub shows: u32,
    fail_load: bool,
    fail_show: bool,
    fail_next_show: bool,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose every load fails (no fill).
    pub fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    /// A provider that loads fine but cannot display.
    pub fn failing_show() -> Self {
        Self {
            fail_show: true,
            ..Self::default()
        }
    }

    /// A provider whose next show fails, then recovers (transient SDK
    /// display error).
    pub fn failing_show_once() -> Self {
        Self {
            fail_next_show: true,
            ..Self::default()
        }
    }
}

impl InterstitialProvider for StubProvider {
    fn load(&mut self) -> Result<AdHandle, AdError> {
        self.loads += 1;
        if self.fail_load {
            return Err(AdError::NoFill);
        }
        self.next_id += 1;
        Ok(AdHandle(self.next_id))
    }

    fn show(&mut self, _handle: &AdHandle) -> Result<(), AdError> {
        self.shows += 1;
        if self.fail_show || std::mem::take(&mut self.fail_next_show) {
            return Err(AdError::ShowFailed("stub refused".into()));
        }
        Ok(())
    }
}
