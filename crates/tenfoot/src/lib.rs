//! **tenfoot** -- remote-control input handling for ten-foot interfaces.
//!
//! This is the umbrella crate that re-exports everything you need from a
//! single dependency:
//!
//! ```toml
//! [dependencies]
//! tenfoot = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`tenfoot_core`] are available at the crate root
//!   ([`Controller`], [`Command`], [`Subscription`], [`Driver`],
//!   [`KeyInput`], [`RemoteInputGuard`], etc.).
//! * The [`nav`] module re-exports everything from [`tenfoot_nav`] (the
//!   input gate, focus navigator, camera controller, and the assembled
//!   [`nav::RemoteControl`]).
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! A host wraps [`nav::RemoteControl`] in its own controller, feeds it key
//! edges from the terminal, and applies the events it emits:
//!
//! ```ignore
//! use tenfoot::nav::{self, FocusNavigator, GateSignals, RemoteControl};
//! use tenfoot::{key_events, Command, Controller, Driver, KeyInput, Subscription};
//!
//! struct App {
//!     remote: RemoteControl<&'static str>,
//! }
//!
//! enum Msg {
//!     Remote(nav::Message),
//! }
//!
//! impl Controller for App {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             // Back with nothing left to dismiss ends the app.
//!             Msg::Remote(nav::Message::Back) => Command::quit(),
//!             Msg::Remote(msg) => self.remote.update(msg).map(Msg::Remote),
//!         }
//!     }
//!
//!     fn subscriptions(&self) -> Vec<Subscription<Msg>> {
//!         let mut subs = vec![key_events(|key| {
//!             KeyInput::from_key_event(&key).map(|input| Msg::Remote(nav::Message::Key(input)))
//!         })];
//!         subs.extend(
//!             self.remote
//!                 .subscriptions()
//!                 .into_iter()
//!                 .map(|sub| sub.map(Msg::Remote)),
//!         );
//!         subs
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let focus = FocusNavigator::new(vec!["orbit", "layers", "speed"]);
//!     let remote = RemoteControl::new("zoom", focus).with_signals(GateSignals {
//!         remote_profile: true,
//!         menu_open: true,
//!         manual_camera: false,
//!     });
//!     Driver::new(App { remote })
//!         .run(|app| {
//!             // redraw from app state
//!         })
//!         .await;
//! }
//! ```

pub use tenfoot_core::*;
pub mod nav {
    pub use tenfoot_nav::*;
}

// Re-export dependencies for use in examples and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
