//! Core runtime for **tenfoot**, a remote-control input library for
//! ten-foot interfaces.
//!
//! `tenfoot-core` provides the message-driven machinery that the navigation
//! components in `tenfoot-nav` plug into. The design follows the [Elm
//! Architecture]: a [`Controller`] is a pure **update** cycle over its own
//! state, with side effects pushed to the edges through [`Command`]s and
//! [`Subscription`]s. There is no rendering here; hosts observe controller
//! state and draw (or move a real camera) however they like.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Controller`] | Input-interpretation state machine (update / subscriptions) |
//! | [`Command`] | Describes what an update wants to happen next |
//! | [`Subscription`] | Long-lived input feed (key events, interval pulses) |
//! | [`KeyInput`] | A remote key plus its press/release edge |
//! | [`Driver`] | Owns a controller and drives the event loop |
//! | [`RemoteInputGuard`] | RAII terminal setup for edge-reporting key input |
//! | [`TestDriver`](testing::TestDriver) | Headless harness for unit-testing a [`Controller`] |
//!
//! # Architecture
//!
//! 1. **feed** -- External events (key edges, timer pulses, injected
//!    messages) arrive via [`Subscription`]s and the [`DriverHandle`].
//! 2. **update** -- [`Controller::update`] receives each message, mutates
//!    state, and returns a [`Command`] describing emitted events.
//! 3. **reconcile** -- The driver re-reads
//!    [`Controller::subscriptions`](Controller::subscriptions) and starts or
//!    cancels feeds so that what runs always matches what the state wants.
//! 4. **observe** -- The host's observer closure sees the updated controller
//!    and applies it to the outside world.
//! 5. **repeat** -- Steps 1-4 repeat until the controller quits.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod controller;
pub mod driver;
pub mod input;
pub mod key;
pub mod sources;
pub mod subscription;
pub mod testing;

pub use command::Command;
pub use controller::Controller;
pub use driver::{Driver, DriverHandle};
pub use input::{InputError, RemoteInputGuard};
pub use key::{KeyEdge, KeyInput, RemoteKey};
pub use sources::{key_events, Pulse};
pub use subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
