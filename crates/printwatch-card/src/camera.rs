//! Camera refresh throttling
//!
//! Store-driven throttling, not a free-running timer: the decision runs
//! on every host-store notification, and without notifications the feed
//! simply does not refresh. The clock is injected so the throttle is
//! testable without real elapsed time.

use printwatch_core::{EntityId, StateStore};
use printwatch_config::CardConfig;
use serde::Serialize;
use std::rc::Rc;

/// Millisecond clock seam.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// Wall-clock implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Freshly cache-busted image sources for the presentation layer.
///
/// Each URL is `None` when the corresponding entity or its
/// `entity_picture` attribute is absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraUrls {
    /// Live camera feed URL.
    pub camera: Option<String>,
    /// Model preview image URL.
    pub preview: Option<String>,
}

/// Throttled, online-gated camera refresh scheduler.
pub struct CameraController {
    clock: Rc<dyn Clock>,
    refresh_interval_ms: u64,
    last_update_ms: i64,
    has_error: bool,
}

impl CameraController {
    /// Create a controller with the given throttle interval.
    pub fn new(clock: Rc<dyn Clock>, refresh_interval_ms: u64) -> Self {
        Self {
            clock,
            refresh_interval_ms,
            last_update_ms: 0,
            has_error: false,
        }
    }

    /// Replace the throttle interval (on config change).
    pub fn set_refresh_interval(&mut self, refresh_interval_ms: u64) {
        self.refresh_interval_ms = refresh_interval_ms;
    }

    /// Current throttle interval in milliseconds.
    pub fn refresh_interval_ms(&self) -> u64 {
        self.refresh_interval_ms
    }

    /// Whether the last image load failed. While set, the presentation
    /// layer substitutes an offline placeholder.
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// Record an image load failure.
    pub fn note_image_error(&mut self) {
        if !self.has_error {
            tracing::debug!("Camera image failed to load");
        }
        self.has_error = true;
    }

    /// Record a successful image load, clearing the error latch.
    pub fn note_image_loaded(&mut self) {
        self.has_error = false;
    }

    /// Whether the printer is online: the configured online-indicator
    /// entity's state is the literal `on`.
    pub fn is_online(store: &dyn StateStore, config: &CardConfig) -> bool {
        config
            .online
            .as_ref()
            .and_then(|id| store.entity(id))
            .map(|state| state.state == "on")
            .unwrap_or(false)
    }

    /// Whether a refresh is due: the printer is online and more than
    /// the throttle interval has elapsed since the last refresh.
    pub fn should_refresh(&self, store: &dyn StateStore, config: &CardConfig) -> bool {
        if !Self::is_online(store, config) {
            return false;
        }
        self.clock.now_ms() - self.last_update_ms > self.refresh_interval_ms as i64
    }

    /// Evaluate the throttle. On a positive decision, stamps the update
    /// time and returns cache-busted URLs for the camera feed and the
    /// model preview.
    pub fn refresh(&mut self, store: &dyn StateStore, config: &CardConfig) -> Option<CameraUrls> {
        if !self.should_refresh(store, config) {
            return None;
        }

        let now = self.clock.now_ms();
        self.last_update_ms = now;
        tracing::debug!(timestamp = now, "Refreshing camera image sources");

        Some(CameraUrls {
            camera: cache_busted(store, config.camera.entity.as_ref(), now),
            preview: cache_busted(store, config.model.preview.as_ref(), now),
        })
    }
}

/// Re-point an image source at a fresh URL by appending a changing
/// query token to the entity's attribute-carried picture URL.
fn cache_busted(store: &dyn StateStore, id: Option<&EntityId>, timestamp: i64) -> Option<String> {
    let state = id.and_then(|id| store.entity(id))?;
    let url = state.attr_str("entity_picture").filter(|u| !u.is_empty())?;
    Some(format!("{url}&t={timestamp}"))
}
