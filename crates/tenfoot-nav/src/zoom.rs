//! Continuous zoom: a held key becomes a stream of accelerating tick commands.

use crate::camera::CameraCommand;
use std::time::{Duration, Instant};

/// Which way a zoom hold moves the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Toward the globe.
    In,
    /// Away from the globe.
    Out,
}

/// Tuning for the zoom ramp.
///
/// `base_speed` is the per-tick zoom magnitude at the start of a hold;
/// acceleration scales it linearly over the first second of the hold up to
/// `max_acceleration` times the base. `tick_interval` is the cadence the
/// owning controller asks its pulse feed for; it is advisory, since speed is
/// computed from elapsed time rather than tick count and therefore survives
/// missed or late ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomConfig {
    /// Per-tick zoom magnitude at zero acceleration.
    pub base_speed: f64,
    /// Ceiling multiplier on `base_speed`.
    pub max_acceleration: f64,
    /// Target pulse cadence while a hold is active.
    pub tick_interval: Duration,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.02,
            max_acceleration: 4.0,
            tick_interval: Duration::from_millis(16),
        }
    }
}

impl ZoomConfig {
    fn sanitized(mut self) -> Self {
        if !self.base_speed.is_finite() || self.base_speed < 0.0 {
            self.base_speed = 0.0;
        }
        if !self.max_acceleration.is_finite() || self.max_acceleration < 1.0 {
            self.max_acceleration = 1.0;
        }
        if self.tick_interval < Duration::from_millis(1) {
            self.tick_interval = Duration::from_millis(1);
        }
        self
    }
}

/// Turns a zoom hold into accelerating [`CameraCommand::ZoomTick`]s.
///
/// The animator never reads the clock itself: [`start`](ZoomAnimator::start)
/// and [`tick`](ZoomAnimator::tick) take the current instant from the caller,
/// so tests drive the ramp with synthetic time. It also never schedules
/// anything; the owning controller declares a pulse feed while
/// [`is_active`](ZoomAnimator::is_active) and stops declaring it on release,
/// which is what cancels the ticks.
///
/// Invariant: an inactive animator emits nothing. A pulse that was already in
/// flight when the hold ended hits the inactivity check in `tick` and is
/// swallowed, so no command can trail a release.
pub struct ZoomAnimator {
    config: ZoomConfig,
    direction: Option<ZoomDirection>,
    started_at: Option<Instant>,
}

impl ZoomAnimator {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config: config.sanitized(),
            direction: None,
            started_at: None,
        }
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Whether a hold is in progress.
    pub fn is_active(&self) -> bool {
        self.direction.is_some()
    }

    /// The held direction, if any.
    pub fn direction(&self) -> Option<ZoomDirection> {
        self.direction
    }

    /// Begin a hold in `direction`, with the ramp starting at `now`.
    ///
    /// Returns `false` without touching state when any hold is already
    /// active: the opposite direction is ignored until release, and a key
    /// repeat of the held direction must not restart the ramp.
    pub fn start(&mut self, direction: ZoomDirection, now: Instant) -> bool {
        if self.direction.is_some() {
            return false;
        }
        self.direction = Some(direction);
        self.started_at = Some(now);
        true
    }

    /// End the hold. The next `start` begins a fresh ramp.
    pub fn stop(&mut self) {
        self.direction = None;
        self.started_at = None;
    }

    /// Produce the command for a pulse arriving at `now`.
    ///
    /// Returns `None` when no hold is active, which is what guards against a
    /// pulse delivered after `stop`.
    pub fn tick(&mut self, now: Instant) -> Option<CameraCommand> {
        let direction = self.direction?;
        let started_at = self.started_at?;
        let elapsed = now.saturating_duration_since(started_at).as_secs_f64();
        let accel = (1.0 + elapsed * (self.config.max_acceleration - 1.0))
            .min(self.config.max_acceleration);
        Some(CameraCommand::ZoomTick {
            direction,
            speed: self.config.base_speed * accel,
        })
    }
}

impl Default for ZoomAnimator {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}
