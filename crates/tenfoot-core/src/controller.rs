use crate::command::Command;
use crate::subscription::Subscription;

/// An input-interpretation state machine driven by messages.
///
/// A `Controller` owns some state, receives messages (key edges, gate signal
/// changes, timer pulses), and answers each one with a [`Command`] describing
/// what should happen next. It never performs I/O itself; emitted messages
/// flow back through the [`Driver`](crate::driver::Driver), where the host
/// observes them and applies them to the outside world (a camera rig, a menu,
/// a scene graph).
///
/// # Composition pattern
///
/// Controllers nest the same way messages do: wrap the child's message type in
/// a variant of the parent message and lift commands with [`Command::map`]:
///
/// ```rust,ignore
/// use tenfoot_core::{Command, Controller, Subscription};
///
/// struct App { remote: RemoteControl<String> }
///
/// enum Msg { Remote(remote::Message), Quit }
///
/// impl Controller for App {
///     type Message = Msg;
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Remote(m) => self.remote.update(m).map(Msg::Remote),
///             Msg::Quit => Command::quit(),
///         }
///     }
///
///     fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///         self.remote
///             .subscriptions()
///             .into_iter()
///             .map(|s| s.map(Msg::Remote))
///             .collect()
///     }
/// }
/// ```
pub trait Controller: Send + 'static {
    /// The controller's message type.
    ///
    /// Parent controllers typically wrap this in one of their own message
    /// variants so that events can be routed to the correct child.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for effects.
    ///
    /// The returned command uses the controller's own `Message` type; a parent
    /// should call [`.map()`](Command::map) to lift it into the parent message
    /// type.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Declare the input feeds this controller currently wants.
    ///
    /// Called by the driver after every update. The driver diffs the returned
    /// set against what is already running: feeds that appear are started,
    /// feeds that disappear are cancelled. Returning a feed conditionally is
    /// therefore the way to express "only while X is happening" timers, such
    /// as a zoom pulse that runs only during a hold.
    ///
    /// The default implementation returns an empty list (no feeds).
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
