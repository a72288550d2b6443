//! Interstitial ad gate.
//!
//! Throttles full-screen ads for non-paying users on native mobile
//! targets: an ad may show only after enough navigation events have
//! accumulated and a minimum interval has passed since the previous
//! display. One preloaded ad asset is held at a time; a failed load or a
//! completed display schedules the next preload after a fixed delay (no
//! backoff).
//!
//! None of this state persists across restarts.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::provider::{AdHandle, InterstitialProvider};
use crate::events::Event;
use crate::platform::Platform;
use crate::storage::AdGateConfig;

/// Gate statistics snapshot (diagnostics surface).
#[derive(Debug, Clone, Serialize)]
pub struct AdGateStats {
    pub navigation_event_count: u32,
    pub last_ad_shown_at: Option<DateTime<Utc>>,
    pub has_preloaded_ad: bool,
    pub config: AdGateConfig,
}

/// Decides when a full-screen interstitial may be shown and manages the
/// single preloaded ad handle.
pub struct InterstitialGate<P: InterstitialProvider> {
    provider: P,
    config: AdGateConfig,
    platform: Platform,
    premium: bool,
    last_shown_at: Option<DateTime<Utc>>,
    /// Reset to 0 only on a successful display, never on a denied attempt.
    nav_event_count: u32,
    preloaded: Option<AdHandle>,
    /// When the next preload attempt is due, after a failure or a display.
    retry_at: Option<DateTime<Utc>>,
}

impl<P: InterstitialProvider> InterstitialGate<P> {
    pub fn new(provider: P, config: AdGateConfig, platform: Platform) -> Self {
        Self {
            provider,
            config,
            platform,
            premium: false,
            last_shown_at: None,
            nav_event_count: 0,
            preloaded: None,
            retry_at: None,
        }
    }

    /// Mark the user as paying; premium users never see interstitials.
    pub fn set_premium(&mut self, premium: bool) {
        self.premium = premium;
    }

    fn enabled(&self) -> bool {
        self.platform.supports_interstitials() && !self.premium
    }

    /// Whether the throttle would allow a display right now: the minimum
    /// interval since the last ad has elapsed (or none was ever shown) and
    /// enough navigation events have accumulated.
    pub fn can_show(&self, now: DateTime<Utc>) -> bool {
        let interval_ok = match self.last_shown_at {
            None => true,
            Some(last) => now - last >= Duration::seconds(self.config.min_interval_secs),
        };
        interval_ok && self.nav_event_count >= self.config.page_changes_before_ad
    }

    /// Record a navigation event and, when the throttle allows, attempt to
    /// display an interstitial. No-op on web and for premium users.
    pub fn on_navigation_event(&mut self, page: &str, now: DateTime<Utc>) -> Vec<Event> {
        let mut events = Vec::new();
        if !self.enabled() {
            return events;
        }

        self.nav_event_count += 1;
        log::debug!("page change: {page} (count: {})", self.nav_event_count);

        // Run any preload that came due since the last callback.
        if let Some(event) = self.run_due_preload(now) {
            events.push(event);
        }

        if self.can_show(now) {
            events.push(self.attempt_show(page, now));
        }
        events
    }

    /// Request an ad asset if none is held and no retry is still pending.
    /// On failure the next attempt is scheduled after the fixed delay.
    pub fn preload(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if !self.enabled() || self.preloaded.is_some() {
            return None;
        }
        if let Some(due) = self.retry_at {
            if now < due {
                return None;
            }
        }
        self.retry_at = None;

        match self.provider.load() {
            Ok(handle) => {
                self.preloaded = Some(handle);
                Some(Event::AdPreloaded { at: now })
            }
            Err(e) => {
                let retry_at = now + Duration::seconds(self.config.preload_retry_secs);
                self.retry_at = Some(retry_at);
                log::warn!("ad preload failed, retrying at {retry_at}: {e}");
                Some(Event::AdLoadFailed {
                    reason: e.to_string(),
                    retry_at,
                    at: now,
                })
            }
        }
    }

    /// Drop throttle counters (log-out / account-switch flow).
    pub fn reset(&mut self) {
        self.last_shown_at = None;
        self.nav_event_count = 0;
    }

    pub fn stats(&self) -> AdGateStats {
        AdGateStats {
            navigation_event_count: self.nav_event_count,
            last_ad_shown_at: self.last_shown_at,
            has_preloaded_ad: self.preloaded.is_some(),
            config: self.config.clone(),
        }
    }

    fn run_due_preload(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.retry_at {
            Some(due) if now >= due => self.preload(now),
            _ => None,
        }
    }

    /// Show the preloaded ad, loading synchronously when none is held.
    /// Only a successful display resets the navigation counter and stamps
    /// `last_shown_at`; failures leave both untouched so the next
    /// navigation event may try again.
    fn attempt_show(&mut self, page: &str, now: DateTime<Utc>) -> Event {
        let handle = match self.preloaded.take() {
            Some(handle) => Ok(handle),
            None => self.provider.load(),
        };

        let retry_at = now + Duration::seconds(self.config.preload_retry_secs);
        match handle {
            Ok(handle) => match self.provider.show(&handle) {
                Ok(()) => {
                    self.last_shown_at = Some(now);
                    self.nav_event_count = 0;
                    self.retry_at = Some(retry_at);
                    Event::AdShown {
                        page: page.to_string(),
                        at: now,
                    }
                }
                Err(e) => {
                    self.retry_at = Some(retry_at);
                    log::warn!("interstitial display failed: {e}");
                    Event::AdShowFailed {
                        reason: e.to_string(),
                        at: now,
                    }
                }
            },
            Err(e) => {
                self.retry_at = Some(retry_at);
                Event::AdLoadFailed {
                    reason: e.to_string(),
                    retry_at,
                    at: now,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ads::provider::StubProvider;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn gate(provider: StubProvider, platform: Platform) -> InterstitialGate<StubProvider> {
        InterstitialGate::new(provider, AdGateConfig::default(), platform)
    }

    #[test]
    fn test_can_show_needs_both_conditions() {
        let mut g = gate(StubProvider::new(), Platform::Android);
        // No ad ever shown but not enough navigation events.
        assert!(!g.can_show(t0()));
        g.nav_event_count = 3;
        assert!(g.can_show(t0()));

        // Enough events but too soon after the last display.
        g.last_shown_at = Some(t0());
        assert!(!g.can_show(t0() + Duration::seconds(59)));
        assert!(g.can_show(t0() + Duration::seconds(60)));
    }

    #[test]
    fn test_third_navigation_event_shows_ad() {
        let mut g = gate(StubProvider::new(), Platform::Android);
        assert!(g.on_navigation_event("tree", t0()).is_empty());
        assert!(g.on_navigation_event("members", t0()).is_empty());
        let events = g.on_navigation_event("chat", t0());
        assert!(matches!(events.as_slice(), [Event::AdShown { .. }]));
        assert_eq!(g.stats().navigation_event_count, 0);
        assert_eq!(g.stats().last_ad_shown_at, Some(t0()));
    }

    #[test]
    fn test_interval_throttles_second_ad() {
        let mut g = gate(StubProvider::new(), Platform::Android);
        for page in ["a", "b", "c"] {
            g.on_navigation_event(page, t0());
        }
        // Three more events inside the 60s window: counter grows, no ad.
        let soon = t0() + Duration::seconds(30);
        for page in ["d", "e", "f"] {
            let events = g.on_navigation_event(page, soon);
            assert!(!events.iter().any(|e| matches!(e, Event::AdShown { .. })));
        }
        assert_eq!(g.stats().navigation_event_count, 3);

        // Past the window the accumulated count is enough.
        let later = t0() + Duration::seconds(61);
        let events = g.on_navigation_event("g", later);
        assert!(events.iter().any(|e| matches!(e, Event::AdShown { .. })));
    }

    #[test]
    fn test_web_platform_is_noop() {
        let mut g = gate(StubProvider::new(), Platform::Web);
        for page in ["a", "b", "c", "d", "e"] {
            assert!(g.on_navigation_event(page, t0()).is_empty());
        }
        assert!(g.preload(t0()).is_none());
        assert_eq!(g.provider.loads, 0);
        assert_eq!(g.stats().navigation_event_count, 0);
    }

    #[test]
    fn test_premium_users_never_see_ads() {
        let mut g = gate(StubProvider::new(), Platform::Android);
        g.set_premium(true);
        for page in ["a", "b", "c", "d"] {
            assert!(g.on_navigation_event(page, t0()).is_empty());
        }
        assert_eq!(g.provider.shows, 0);
    }

    #[test]
    fn test_preload_holds_single_handle() {
        let mut g = gate(StubProvider::new(), Platform::Android);
        assert!(matches!(g.preload(t0()), Some(Event::AdPreloaded { .. })));
        // Second preload while a handle is held: no-op.
        assert!(g.preload(t0()).is_none());
        assert_eq!(g.provider.loads, 1);

        // The held ad is used for the display; a new preload is scheduled.
        for page in ["a", "b", "c"] {
            g.on_navigation_event(page, t0());
        }
        assert_eq!(g.provider.loads, 1);
        assert!(!g.stats().has_preloaded_ad);
    }

    #[test]
    fn test_failed_load_schedules_fixed_retry() {
        let mut g = gate(StubProvider::failing_load(), Platform::Android);
        let event = g.preload(t0()).unwrap();
        match event {
            Event::AdLoadFailed { retry_at, .. } => {
                assert_eq!(retry_at, t0() + Duration::seconds(5));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        // Before the retry point nothing happens.
        assert!(g.preload(t0() + Duration::seconds(3)).is_none());
        assert_eq!(g.provider.loads, 1);
        // At the retry point it tries again (and fails again, rescheduling).
        assert!(g.preload(t0() + Duration::seconds(5)).is_some());
        assert_eq!(g.provider.loads, 2);
    }

    #[test]
    fn test_failed_show_keeps_navigation_count() {
        let mut g = gate(StubProvider::failing_show(), Platform::Android);
        for page in ["a", "b"] {
            g.on_navigation_event(page, t0());
        }
        let events = g.on_navigation_event("c", t0());
        assert!(events.iter().any(|e| matches!(e, Event::AdShowFailed { .. })));
        // Counter survives the failure; last_shown_at stays unset.
        assert_eq!(g.stats().navigation_event_count, 3);
        assert!(g.stats().last_ad_shown_at.is_none());
    }

    #[test]
    fn test_show_retries_on_next_navigation_after_transient_failure() {
        let mut g = gate(StubProvider::failing_show_once(), Platform::Android);
        for page in ["a", "b"] {
            g.on_navigation_event(page, t0());
        }
        let events = g.on_navigation_event("c", t0());
        assert!(events.iter().any(|e| matches!(e, Event::AdShowFailed { .. })));
        assert_eq!(g.stats().navigation_event_count, 3);

        // The counter and interval conditions still hold, so the very next
        // navigation event loads synchronously and displays.
        let events = g.on_navigation_event("d", t0() + Duration::seconds(1));
        assert!(events.iter().any(|e| matches!(e, Event::AdShown { .. })));
        assert_eq!(g.stats().navigation_event_count, 0);
        assert_eq!(g.provider.shows, 2);
    }

    #[test]
    fn test_reset_clears_counters() {
        let mut g = gate(StubProvider::new(), Platform::Android);
        for page in ["a", "b", "c"] {
            g.on_navigation_event(page, t0());
        }
        g.on_navigation_event("d", t0());
        g.reset();
        let stats = g.stats();
        assert_eq!(stats.navigation_event_count, 0);
        assert!(stats.last_ad_shown_at.is_none());
    }
}
