//! Double-tap gate for touch input.
//!
//! Touch has no hover, so the first tap on a region only previews it and a
//! second tap inside the window commits to navigation. State is a side table
//! keyed by region slug; an entry holds the instant its window closes.

use ahash::AHashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_TOUCH_WINDOW: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// First tap (or first after expiry): highlight only.
    Preview,
    /// Second tap inside the window.
    Navigate,
}

#[derive(Debug, Clone)]
pub struct TapDebounce {
    window: Duration,
    touched: AHashMap<String, Instant>,
}

impl Default for TapDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_TOUCH_WINDOW)
    }
}

impl TapDebounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            touched: AHashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Register a tap on `slug` at `now`.
    pub fn tap(&mut self, slug: &str, now: Instant) -> TapOutcome {
        match self.touched.get(slug) {
            Some(&expires) if now < expires => {
                self.touched.remove(slug);
                TapOutcome::Navigate
            }
            _ => {
                self.touched.insert(slug.to_owned(), now + self.window);
                TapOutcome::Preview
            }
        }
    }

    pub fn is_touched(&self, slug: &str, now: Instant) -> bool {
        self.touched.get(slug).is_some_and(|&expires| now < expires)
    }

    pub fn clear(&mut self) {
        self.touched.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_expires_after_window() {
        let mut gate = TapDebounce::default();
        let t0 = Instant::now();
        assert_eq!(gate.tap("cork", t0), TapOutcome::Preview);
        assert!(gate.is_touched("cork", t0 + Duration::from_millis(799)));
        assert!(!gate.is_touched("cork", t0 + Duration::from_millis(800)));
    }

    #[test]
    fn slugs_are_independent() {
        let mut gate = TapDebounce::default();
        let t0 = Instant::now();
        gate.tap("cork", t0);
        let t1 = t0 + Duration::from_millis(100);
        assert_eq!(gate.tap("kerry", t1), TapOutcome::Preview);
        assert_eq!(gate.tap("cork", t1), TapOutcome::Navigate);
        assert!(!gate.is_touched("cork", t1));
    }
}
