//! Camera-context key interpretation: mode toggling, rotation, zoom holds.
//!
//! When no menu is open the directional pad drives the globe camera. The
//! select key toggles between two readings of the same four keys:
//!
//! * `Navigate` -- each key-down edge emits one rotate command. Key repeat
//!   from the input source shows up as more down edges, so a held key keeps
//!   rotating without this module synthesizing anything.
//! * `Zoom` -- up and down become hold-to-zoom in and out; left and right
//!   mean nothing.
//!
//! The toggle fires on a full select press (down then up, counted once).
//! Arming on the down edge and firing on the up edge makes auto-repeat
//! harmless and lets a gate reset between the two edges swallow the press.

use crate::zoom::{ZoomAnimator, ZoomConfig, ZoomDirection};
use std::time::Instant;
use tenfoot_core::{KeyEdge, KeyInput, RemoteKey};

/// Which reading of the directional pad is live in camera context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// Directional keys rotate the camera.
    #[default]
    Navigate,
    /// Up and down zoom the camera.
    Zoom,
}

impl ControlMode {
    fn toggled(self) -> Self {
        match self {
            ControlMode::Navigate => ControlMode::Zoom,
            ControlMode::Zoom => ControlMode::Navigate,
        }
    }
}

/// Compass direction for a one-shot rotate command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    North,
    South,
    East,
    West,
}

/// A command for the host's camera rig.
///
/// Commands are best-effort hints: a host with no camera wired up drops them
/// and nothing retries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Nudge the camera one step in a compass direction.
    Rotate(RotateDirection),
    /// One frame of a zoom hold at the ramp's current speed.
    ZoomTick {
        direction: ZoomDirection,
        speed: f64,
    },
}

/// Something the camera context wants the host to know about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraEvent {
    /// Emit a command to the camera rig.
    Command(CameraCommand),
    /// The select toggle switched modes.
    ModeChanged(ControlMode),
}

/// Interprets camera-context key edges and pulse ticks.
///
/// Owned by [`RemoteControl`](crate::remote::RemoteControl), which routes
/// keys here only when the gate resolves to camera context. The back key
/// never reaches this type; the owner handles it before dispatch.
pub struct CameraController {
    mode: ControlMode,
    zoom: ZoomAnimator,
    select_armed: bool,
}

impl CameraController {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            mode: ControlMode::default(),
            zoom: ZoomAnimator::new(config),
            select_armed: false,
        }
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// The zoom hold state, for feed declarations and assertions.
    pub fn zoom(&self) -> &ZoomAnimator {
        &self.zoom
    }

    /// Interpret one key edge arriving at `now`.
    pub fn handle_key(&mut self, input: KeyInput, now: Instant) -> Option<CameraEvent> {
        match (input.key, input.edge) {
            (RemoteKey::Select, KeyEdge::Down) => {
                self.select_armed = true;
                None
            }
            (RemoteKey::Select, KeyEdge::Up) => {
                if !self.select_armed {
                    return None;
                }
                self.select_armed = false;
                // A toggle during a hold ends the hold first.
                self.zoom.stop();
                self.mode = self.mode.toggled();
                log::debug!("camera control mode switched to {:?}", self.mode);
                Some(CameraEvent::ModeChanged(self.mode))
            }
            (RemoteKey::Back, _) => None,
            (key, KeyEdge::Down) => match self.mode {
                ControlMode::Navigate => {
                    rotate_for(key).map(|d| CameraEvent::Command(CameraCommand::Rotate(d)))
                }
                ControlMode::Zoom => {
                    if let Some(direction) = zoom_for(key) {
                        // Ignored while any hold is active, so the opposite
                        // key and key repeat cannot restart the ramp.
                        self.zoom.start(direction, now);
                    }
                    None
                }
            },
            (key, KeyEdge::Up) => {
                if self.mode == ControlMode::Zoom {
                    let released = zoom_for(key);
                    if released.is_some() && released == self.zoom.direction() {
                        self.zoom.stop();
                    }
                }
                None
            }
        }
    }

    /// Interpret one pulse arriving at `now`.
    ///
    /// Returns `None` when no hold is active, including for a pulse that was
    /// in flight when the hold ended.
    pub fn handle_pulse(&mut self, now: Instant) -> Option<CameraCommand> {
        self.zoom.tick(now)
    }

    /// Force everything back to rest: hold stopped, select disarmed, mode
    /// `Navigate`. Returns whether the mode actually changed.
    ///
    /// Called when the gate closes mid-interaction. Disarming select is what
    /// discards a key-down whose matching key-up arrives after the gate
    /// closed.
    pub fn reset(&mut self) -> bool {
        self.zoom.stop();
        self.select_armed = false;
        let was_zoom = self.mode == ControlMode::Zoom;
        self.mode = ControlMode::Navigate;
        if was_zoom {
            log::debug!("camera control mode forced back to Navigate");
        }
        was_zoom
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

fn rotate_for(key: RemoteKey) -> Option<RotateDirection> {
    match key {
        RemoteKey::Up => Some(RotateDirection::North),
        RemoteKey::Down => Some(RotateDirection::South),
        RemoteKey::Left => Some(RotateDirection::West),
        RemoteKey::Right => Some(RotateDirection::East),
        RemoteKey::Select | RemoteKey::Back => None,
    }
}

fn zoom_for(key: RemoteKey) -> Option<ZoomDirection> {
    match key {
        RemoteKey::Up => Some(ZoomDirection::In),
        RemoteKey::Down => Some(ZoomDirection::Out),
        _ => None,
    }
}
