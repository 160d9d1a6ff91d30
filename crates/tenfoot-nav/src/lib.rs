//! Remote-control navigation for ten-foot interfaces.
//!
//! This crate turns the six-key remote vocabulary (d-pad, select, back)
//! into focus movement, mode switches, and camera commands. The pieces:
//!
//! - [`gate::InputGate`] decides whether remote input is live at all, and
//!   which context (menu or camera) owns it.
//! - [`focus::FocusNavigator`] moves a focus cursor over a list or grid of
//!   targets, wrapping or clamping at the edges.
//! - [`camera::CameraController`] reads directional keys as rotation or as
//!   zoom holds, switching on full select presses.
//! - [`zoom::ZoomAnimator`] ramps zoom speed up over the life of a hold.
//! - [`remote::RemoteControl`] wires all of the above into a single
//!   [`tenfoot_core::Controller`] a host embeds.
//!
//! Each piece works standalone; `RemoteControl` is the assembled version.

pub mod camera;
pub mod focus;
pub mod gate;
pub mod remote;
pub mod zoom;

pub use camera::{CameraCommand, CameraController, CameraEvent, ControlMode, RotateDirection};
pub use focus::{FocusNavigator, FocusRestore, FocusTarget, WrapPolicy};
pub use gate::{GateChange, GateSignals, InputGate, Route};
pub use remote::{Message, RemoteControl};
pub use zoom::{ZoomAnimator, ZoomConfig, ZoomDirection};
