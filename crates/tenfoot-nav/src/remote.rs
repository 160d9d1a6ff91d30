//! The complete remote-control interpreter: gate, focus navigation, and
//! camera control wired into one message-driven controller.
//!
//! `RemoteControl` receives key edges, gate-signal changes, and zoom pulses,
//! and answers with outbound events (focus changes, activations, camera
//! commands, mode changes) that the host applies to its UI and camera rig.
//! Exactly one interpretation of a given key is live at a time: the gate
//! resolves each edge to menu context, camera context, or nothing.
//!
//! While a zoom hold is active the controller declares a [`Pulse`] feed; the
//! driver starts it on hold start and cancels it on release, so tick
//! lifetime is never managed by hand.

use crate::camera::{CameraCommand, CameraController, CameraEvent, ControlMode};
use crate::focus::{FocusNavigator, FocusRestore, FocusTarget};
use crate::gate::{GateSignals, InputGate, Route};
use crate::zoom::{ZoomConfig, ZoomDirection};
use std::time::Instant;
use tenfoot_core::sources::Pulse;
use tenfoot_core::{subscribe, Command, Controller, KeyEdge, KeyInput, RemoteKey, Subscription};

/// Messages for the remote-control interpreter.
///
/// The first three variants are inbound; the rest are outbound events
/// emitted for the host. Outbound variants delivered back through a shared
/// message queue are ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A key edge from the input feed.
    Key(KeyInput),
    /// The externally-owned gate signals changed.
    Signals(GateSignals),
    /// A pulse from the zoom feed, carrying its arrival time.
    ZoomPulse(Instant),
    /// Focus moved to the target at the given index.
    FocusChanged(usize),
    /// The target at the given index was activated.
    Activated(usize),
    /// The back key fired; the host decides what to dismiss.
    Back,
    /// A command for the camera rig.
    Camera(CameraCommand),
    /// The camera mode toggled, or was forced back to `Navigate`.
    ModeChanged(ControlMode),
}

/// Interprets the remote-control vocabulary for one host surface.
///
/// Construct with the focus targets for the menu context, hand the gate
/// signals over whenever a collaborator changes them, and feed it key edges.
/// See the crate docs for the full wiring picture.
pub struct RemoteControl<T: FocusTarget> {
    gate: InputGate,
    focus: FocusNavigator<T>,
    camera: CameraController,
    pulse_id: &'static str,
}

impl<T: FocusTarget> RemoteControl<T> {
    /// Create an interpreter with all gate signals off (inert until told
    /// otherwise). `pulse_id` names the zoom pulse feed.
    pub fn new(pulse_id: &'static str, focus: FocusNavigator<T>) -> Self {
        Self {
            gate: InputGate::default(),
            focus,
            camera: CameraController::default(),
            pulse_id,
        }
    }

    /// Set the initial gate signals.
    pub fn with_signals(mut self, signals: GateSignals) -> Self {
        self.gate = InputGate::new(signals);
        self
    }

    /// Tune the zoom ramp.
    pub fn with_zoom_config(mut self, config: ZoomConfig) -> Self {
        self.camera = CameraController::new(config);
        self
    }

    pub fn gate(&self) -> &InputGate {
        &self.gate
    }

    pub fn mode(&self) -> ControlMode {
        self.camera.mode()
    }

    /// Whether a zoom hold is in progress.
    pub fn zoom_active(&self) -> bool {
        self.camera.zoom().is_active()
    }

    /// The direction of the zoom hold in progress, if any.
    pub fn zoom_direction(&self) -> Option<ZoomDirection> {
        self.camera.zoom().direction()
    }

    /// The menu-context focus state, for rendering.
    pub fn navigator(&self) -> &FocusNavigator<T> {
        &self.focus
    }

    /// Replace the focus targets after the host rebuilds its control set.
    ///
    /// Returns where focus landed. No `FocusChanged` is emitted; the caller
    /// asked for the position and gets it directly.
    pub fn set_targets(&mut self, targets: Vec<T>, restore: FocusRestore) -> usize {
        self.focus.set_targets(targets, restore)
    }

    /// Tear down any interaction in progress: zoom stopped, mode back to
    /// `Navigate`, pending select press discarded.
    ///
    /// For host-driven teardown (unmounting a surface). Gate-driven resets
    /// happen internally when a [`Message::Signals`] update closes the gate.
    pub fn reset(&mut self) {
        self.camera.reset();
    }

    fn handle_key(&mut self, input: KeyInput) -> Command<Message> {
        match self.gate.route() {
            Route::Inert => Command::none(),
            Route::Menu => self.menu_key(input),
            Route::Camera => self.camera_key(input, Instant::now()),
        }
    }

    fn menu_key(&mut self, input: KeyInput) -> Command<Message> {
        // Menus act on press edges; releases carry no menu meaning.
        if input.edge != KeyEdge::Down {
            return Command::none();
        }
        match input.key {
            RemoteKey::Up => focus_moved(self.focus.move_up()),
            RemoteKey::Down => focus_moved(self.focus.move_down()),
            RemoteKey::Left => focus_moved(self.focus.move_left()),
            RemoteKey::Right => focus_moved(self.focus.move_right()),
            RemoteKey::Select => match self.focus.activate_current() {
                Some(index) => Command::message(Message::Activated(index)),
                None => Command::none(),
            },
            RemoteKey::Back => Command::message(Message::Back),
        }
    }

    fn camera_key(&mut self, input: KeyInput, now: Instant) -> Command<Message> {
        if input.key == RemoteKey::Back {
            if input.edge != KeyEdge::Down {
                return Command::none();
            }
            // Leaving camera control tears the interaction down first, so
            // the host never sees Back with a hold still running.
            let mode_changed = self.camera.reset();
            let mut cmds = Vec::new();
            if mode_changed {
                cmds.push(Command::message(Message::ModeChanged(ControlMode::Navigate)));
            }
            cmds.push(Command::message(Message::Back));
            return Command::batch(cmds);
        }
        match self.camera.handle_key(input, now) {
            Some(CameraEvent::Command(cmd)) => Command::message(Message::Camera(cmd)),
            Some(CameraEvent::ModeChanged(mode)) => Command::message(Message::ModeChanged(mode)),
            None => Command::none(),
        }
    }

    fn apply_signals(&mut self, signals: GateSignals) -> Command<Message> {
        let change = self.gate.apply(signals);
        if change.camera_lost {
            log::debug!("camera input disabled; resetting interaction state");
            if self.camera.reset() {
                return Command::message(Message::ModeChanged(ControlMode::Navigate));
            }
        }
        Command::none()
    }
}

impl<T: FocusTarget> Controller for RemoteControl<T> {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Key(input) => self.handle_key(input),
            Message::Signals(signals) => self.apply_signals(signals),
            Message::ZoomPulse(now) => match self.camera.handle_pulse(now) {
                Some(cmd) => Command::message(Message::Camera(cmd)),
                None => Command::none(),
            },
            // Outbound events echoed back through a shared queue are for the
            // host, not for us.
            Message::FocusChanged(_)
            | Message::Activated(_)
            | Message::Back
            | Message::Camera(_)
            | Message::ModeChanged(_) => Command::none(),
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if self.camera.zoom().is_active() {
            vec![subscribe(Pulse::new(
                self.camera.zoom().config().tick_interval,
                self.pulse_id,
            ))
            .map(Message::ZoomPulse)]
        } else {
            vec![]
        }
    }
}

fn focus_moved(result: Option<usize>) -> Command<Message> {
    match result {
        Some(index) => Command::message(Message::FocusChanged(index)),
        None => Command::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tenfoot_core::testing::TestDriver;

    fn camera_signals() -> GateSignals {
        GateSignals {
            remote_profile: true,
            menu_open: false,
            manual_camera: true,
        }
    }

    fn menu_signals() -> GateSignals {
        GateSignals {
            remote_profile: true,
            menu_open: true,
            manual_camera: false,
        }
    }

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("control-{i}")).collect()
    }

    fn remote_with(signals: GateSignals) -> TestDriver<RemoteControl<String>> {
        let nav = FocusNavigator::new(labels(3));
        TestDriver::new(RemoteControl::new("zoom-pulse", nav).with_signals(signals))
    }

    fn key(driver: &mut TestDriver<RemoteControl<String>>, input: KeyInput) {
        driver.send(Message::Key(input));
    }

    fn full_press(driver: &mut TestDriver<RemoteControl<String>>, k: RemoteKey) {
        key(driver, KeyInput::down(k));
        key(driver, KeyInput::up(k));
    }

    fn zoom_ticks(driver: &TestDriver<RemoteControl<String>>) -> Vec<f64> {
        driver
            .emitted()
            .iter()
            .filter_map(|m| match m {
                Message::Camera(CameraCommand::ZoomTick { speed, .. }) => Some(*speed),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn menu_down_edges_move_focus() {
        let mut driver = remote_with(menu_signals());
        key(&mut driver, KeyInput::down(RemoteKey::Down));
        assert_eq!(driver.emitted(), [Message::FocusChanged(1)]);
        assert_eq!(driver.controller().navigator().current_index(), 1);

        // Releases carry no menu meaning.
        key(&mut driver, KeyInput::up(RemoteKey::Down));
        assert_eq!(driver.emitted().len(), 1);
    }

    #[test]
    fn menu_movement_at_a_wall_emits_nothing() {
        let nav = FocusNavigator::new(labels(3)).with_policy(crate::focus::WrapPolicy::Clamp);
        let mut driver =
            TestDriver::new(RemoteControl::new("zoom-pulse", nav).with_signals(menu_signals()));
        key(&mut driver, KeyInput::down(RemoteKey::Up));
        assert!(driver.emitted().is_empty());
    }

    #[test]
    fn menu_select_activates_the_focused_target() {
        let mut driver = remote_with(menu_signals());
        key(&mut driver, KeyInput::down(RemoteKey::Down));
        key(&mut driver, KeyInput::down(RemoteKey::Select));
        assert_eq!(
            driver.emitted(),
            [Message::FocusChanged(1), Message::Activated(1)]
        );
    }

    #[test]
    fn menu_select_is_swallowed_by_dead_targets() {
        struct Entry {
            live: bool,
        }
        impl FocusTarget for Entry {
            fn is_live(&self) -> bool {
                self.live
            }
        }

        let nav = FocusNavigator::new(vec![Entry { live: false }, Entry { live: true }]);
        let mut driver =
            TestDriver::new(RemoteControl::new("zoom-pulse", nav).with_signals(menu_signals()));
        driver.send(Message::Key(KeyInput::down(RemoteKey::Select)));
        assert!(driver.emitted().is_empty());
    }

    #[test]
    fn menu_back_is_forwarded_to_the_host() {
        let mut driver = remote_with(menu_signals());
        key(&mut driver, KeyInput::down(RemoteKey::Back));
        assert_eq!(driver.emitted(), [Message::Back]);
    }

    #[test]
    fn empty_menu_swallows_navigation_and_select() {
        let nav = FocusNavigator::new(Vec::<String>::new());
        let mut driver =
            TestDriver::new(RemoteControl::new("zoom-pulse", nav).with_signals(menu_signals()));
        key(&mut driver, KeyInput::down(RemoteKey::Down));
        key(&mut driver, KeyInput::down(RemoteKey::Select));
        assert!(driver.emitted().is_empty());
    }

    #[test]
    fn off_profile_input_is_inert() {
        let mut driver = remote_with(GateSignals::default());
        key(&mut driver, KeyInput::down(RemoteKey::Down));
        key(&mut driver, KeyInput::down(RemoteKey::Select));
        key(&mut driver, KeyInput::down(RemoteKey::Back));
        assert!(driver.emitted().is_empty());
        assert_eq!(driver.controller().navigator().current_index(), 0);
    }

    #[test]
    fn camera_down_edges_rotate() {
        let mut driver = remote_with(camera_signals());
        key(&mut driver, KeyInput::down(RemoteKey::Up));
        key(&mut driver, KeyInput::up(RemoteKey::Up));
        key(&mut driver, KeyInput::down(RemoteKey::Right));
        assert_eq!(
            driver.emitted(),
            [
                Message::Camera(CameraCommand::Rotate(crate::camera::RotateDirection::North)),
                Message::Camera(CameraCommand::Rotate(crate::camera::RotateDirection::East)),
            ]
        );
    }

    #[test]
    fn two_select_presses_land_back_in_navigate_with_no_ticks() {
        let mut driver = remote_with(camera_signals());
        full_press(&mut driver, RemoteKey::Select);
        full_press(&mut driver, RemoteKey::Select);

        assert_eq!(
            driver.emitted(),
            [
                Message::ModeChanged(ControlMode::Zoom),
                Message::ModeChanged(ControlMode::Navigate),
            ]
        );
        assert_eq!(driver.controller().mode(), ControlMode::Navigate);
        assert!(zoom_ticks(&driver).is_empty());
    }

    #[test]
    fn zoom_hold_declares_the_pulse_feed() {
        let mut driver = remote_with(camera_signals());
        assert!(driver.controller().subscriptions().is_empty());

        full_press(&mut driver, RemoteKey::Select);
        key(&mut driver, KeyInput::down(RemoteKey::Up));
        assert_eq!(driver.controller().subscriptions().len(), 1);
        assert!(driver.controller().zoom_active());

        key(&mut driver, KeyInput::up(RemoteKey::Up));
        assert!(driver.controller().subscriptions().is_empty());
    }

    #[test]
    fn held_zoom_accelerates_monotonically_up_to_the_ceiling() {
        let t0 = Instant::now();
        let mut driver = remote_with(camera_signals());
        full_press(&mut driver, RemoteKey::Select);
        key(&mut driver, KeyInput::down(RemoteKey::Up));

        // Two simulated seconds of pulses at 100 ms cadence.
        for i in 0..=20u64 {
            driver.send(Message::ZoomPulse(t0 + Duration::from_millis(i * 100)));
        }

        let speeds = zoom_ticks(&driver);
        assert_eq!(speeds.len(), 21);
        let ceiling = 0.02 * 4.0;
        for pair in speeds.windows(2) {
            assert!(pair[1] >= pair[0], "speed regressed: {pair:?}");
        }
        assert!(speeds.iter().all(|s| *s <= ceiling + 1e-12));
        assert!(speeds[0] < speeds[20]);
    }

    #[test]
    fn ticks_carry_the_held_direction() {
        let t0 = Instant::now();
        let mut driver = remote_with(camera_signals());
        full_press(&mut driver, RemoteKey::Select);
        key(&mut driver, KeyInput::down(RemoteKey::Down));
        driver.send(Message::ZoomPulse(t0));

        match driver.emitted().last() {
            Some(Message::Camera(CameraCommand::ZoomTick { direction, .. })) => {
                assert_eq!(*direction, ZoomDirection::Out);
            }
            other => panic!("expected a zoom tick, got {other:?}"),
        }
    }

    #[test]
    fn pulse_without_a_hold_is_swallowed() {
        let mut driver = remote_with(camera_signals());
        driver.send(Message::ZoomPulse(Instant::now()));
        assert!(driver.emitted().is_empty());
    }

    #[test]
    fn gate_loss_mid_hold_resets_and_goes_silent() {
        let mut driver = remote_with(camera_signals());
        full_press(&mut driver, RemoteKey::Select);
        key(&mut driver, KeyInput::down(RemoteKey::Up));
        driver.send(Message::ZoomPulse(Instant::now()));
        assert_eq!(zoom_ticks(&driver).len(), 1);
        driver.take_emitted();

        // A menu opens over the scene.
        driver.send(Message::Signals(menu_signals()));
        assert_eq!(
            driver.emitted(),
            [Message::ModeChanged(ControlMode::Navigate)]
        );
        assert_eq!(driver.controller().mode(), ControlMode::Navigate);
        assert!(driver.controller().subscriptions().is_empty());

        // A pulse that was already in flight when the gate closed.
        driver.send(Message::ZoomPulse(Instant::now()));
        assert!(zoom_ticks(&driver).is_empty());
    }

    #[test]
    fn gate_loss_discards_a_half_finished_select_press() {
        let mut driver = remote_with(camera_signals());
        key(&mut driver, KeyInput::down(RemoteKey::Select));
        driver.send(Message::Signals(GateSignals {
            manual_camera: false,
            ..camera_signals()
        }));
        driver.take_emitted();

        // The release lands after the gate closed, then the gate reopens:
        // no half-press may survive either transition.
        key(&mut driver, KeyInput::up(RemoteKey::Select));
        driver.send(Message::Signals(camera_signals()));
        key(&mut driver, KeyInput::up(RemoteKey::Select));
        assert!(driver.emitted().is_empty());
        assert_eq!(driver.controller().mode(), ControlMode::Navigate);
    }

    #[test]
    fn gate_loss_in_navigate_mode_stays_quiet() {
        let mut driver = remote_with(camera_signals());
        driver.send(Message::Signals(GateSignals::default()));
        assert!(driver.emitted().is_empty());
    }

    #[test]
    fn camera_back_tears_down_before_forwarding() {
        let mut driver = remote_with(camera_signals());
        full_press(&mut driver, RemoteKey::Select);
        key(&mut driver, KeyInput::down(RemoteKey::Up));
        driver.take_emitted();

        key(&mut driver, KeyInput::down(RemoteKey::Back));
        assert_eq!(
            driver.emitted(),
            [
                Message::ModeChanged(ControlMode::Navigate),
                Message::Back,
            ]
        );
        assert!(!driver.controller().zoom_active());
        assert!(driver.controller().subscriptions().is_empty());
    }

    #[test]
    fn camera_back_in_navigate_mode_just_forwards() {
        let mut driver = remote_with(camera_signals());
        key(&mut driver, KeyInput::down(RemoteKey::Back));
        key(&mut driver, KeyInput::up(RemoteKey::Back));
        assert_eq!(driver.emitted(), [Message::Back]);
    }

    #[test]
    fn reopened_menu_restores_a_remembered_index() {
        let mut driver = remote_with(menu_signals());
        key(&mut driver, KeyInput::down(RemoteKey::Down));
        key(&mut driver, KeyInput::down(RemoteKey::Down));
        let remembered = driver.controller().navigator().current_index();
        assert_eq!(remembered, 2);

        // Menu closes; its controls unmount.
        driver.send(Message::Signals(camera_signals()));
        driver
            .controller_mut()
            .set_targets(Vec::new(), FocusRestore::Reset);

        // Menu reopens with a rebuilt control list.
        driver.send(Message::Signals(menu_signals()));
        let landed = driver
            .controller_mut()
            .set_targets(labels(3), FocusRestore::Remember(remembered));
        assert_eq!(landed, 2);
        assert_eq!(driver.controller().navigator().current_index(), 2);
    }

    #[test]
    fn outbound_messages_echoed_back_are_ignored() {
        let mut driver = remote_with(camera_signals());
        driver.send(Message::FocusChanged(1));
        driver.send(Message::Activated(1));
        driver.send(Message::Back);
        driver.send(Message::ModeChanged(ControlMode::Zoom));
        driver.send(Message::Camera(CameraCommand::Rotate(
            crate::camera::RotateDirection::North,
        )));

        assert!(driver.emitted().is_empty());
        assert_eq!(driver.controller().mode(), ControlMode::Navigate);
        assert_eq!(driver.controller().navigator().current_index(), 0);
    }
}
