//! Gating of remote input on externally-owned state signals.

/// The three read-only signals that decide whether, and how, remote input is
/// interpreted. Each is supplied and owned by an external collaborator; this
/// crate only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateSignals {
    /// A remote-control (living-room) device profile is active.
    pub remote_profile: bool,
    /// A menu currently covers the scene.
    pub menu_open: bool,
    /// The camera is free for direct control, neither auto-following the
    /// tracked object nor auto-rotating.
    pub manual_camera: bool,
}

impl GateSignals {
    /// Whether camera-context interpretation is enabled:
    /// `remote_profile AND NOT menu_open AND manual_camera`.
    pub fn camera_enabled(&self) -> bool {
        self.remote_profile && !self.menu_open && self.manual_camera
    }
}

/// Which interpretation of the remote keys is live, if any.
///
/// Exactly one context reads a given key edge. Making the arbitration a
/// single routing decision here, instead of an implicit property of which
/// component happens to be listening, is what keeps the menu and the camera
/// from both acting on one press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Input is not processed at all.
    Inert,
    /// Keys drive menu focus navigation.
    Menu,
    /// Keys drive the camera.
    Camera,
}

/// What changed when new signals were applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateChange {
    /// Camera context just transitioned enabled -> disabled. The owner must
    /// cancel any zoom hold, reset the mode machine, and discard pending key
    /// edges, synchronously.
    pub camera_lost: bool,
}

/// Holds the latest signals and routes key edges to one context.
#[derive(Debug, Default)]
pub struct InputGate {
    signals: GateSignals,
}

impl InputGate {
    pub fn new(signals: GateSignals) -> Self {
        Self { signals }
    }

    pub fn signals(&self) -> GateSignals {
        self.signals
    }

    pub fn camera_enabled(&self) -> bool {
        self.signals.camera_enabled()
    }

    /// Resolve the live context for incoming keys.
    ///
    /// Off-profile input is inert. An open menu claims the keys regardless of
    /// camera state; otherwise they go to the camera only when it is under
    /// manual control.
    pub fn route(&self) -> Route {
        if !self.signals.remote_profile {
            Route::Inert
        } else if self.signals.menu_open {
            Route::Menu
        } else if self.signals.manual_camera {
            Route::Camera
        } else {
            Route::Inert
        }
    }

    /// Replace the signals, reporting transitions the owner must act on.
    pub fn apply(&mut self, signals: GateSignals) -> GateChange {
        let was_enabled = self.signals.camera_enabled();
        let old_route = self.route();
        self.signals = signals;
        let new_route = self.route();
        if old_route != new_route {
            log::debug!("input route changed: {old_route:?} -> {new_route:?}");
        }
        GateChange {
            camera_lost: was_enabled && !self.signals.camera_enabled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(remote_profile: bool, menu_open: bool, manual_camera: bool) -> GateSignals {
        GateSignals {
            remote_profile,
            menu_open,
            manual_camera,
        }
    }

    #[test]
    fn camera_enabled_truth_table() {
        assert!(signals(true, false, true).camera_enabled());
        assert!(!signals(false, false, true).camera_enabled());
        assert!(!signals(true, true, true).camera_enabled());
        assert!(!signals(true, false, false).camera_enabled());
        assert!(!signals(false, true, false).camera_enabled());
    }

    #[test]
    fn routing_prefers_menu_over_camera() {
        assert_eq!(InputGate::new(signals(true, true, true)).route(), Route::Menu);
        assert_eq!(
            InputGate::new(signals(true, false, true)).route(),
            Route::Camera
        );
    }

    #[test]
    fn off_profile_input_is_inert() {
        assert_eq!(
            InputGate::new(signals(false, true, true)).route(),
            Route::Inert
        );
        assert_eq!(
            InputGate::new(signals(false, false, false)).route(),
            Route::Inert
        );
    }

    #[test]
    fn auto_follow_without_a_menu_is_inert() {
        assert_eq!(
            InputGate::new(signals(true, false, false)).route(),
            Route::Inert
        );
    }

    #[test]
    fn apply_detects_losing_the_camera() {
        let mut gate = InputGate::new(signals(true, false, true));
        let change = gate.apply(signals(true, true, true));
        assert!(change.camera_lost);

        // Already disabled; nothing further to lose.
        let change = gate.apply(signals(false, false, false));
        assert!(!change.camera_lost);
    }

    #[test]
    fn apply_does_not_report_gaining_the_camera() {
        let mut gate = InputGate::new(signals(true, true, true));
        let change = gate.apply(signals(true, false, true));
        assert!(!change.camera_lost);
        assert!(gate.camera_enabled());
    }

    #[test]
    fn unchanged_signals_report_nothing() {
        let mut gate = InputGate::new(signals(true, false, true));
        let change = gate.apply(signals(true, false, true));
        assert!(!change.camera_lost);
    }
}
