//! Headless test harness for exercising controllers without a driver.

use crate::command::{Action, Command, CommandInner};
use crate::controller::Controller;

/// A headless harness that drives a [`Controller`] without an event loop.
///
/// `TestDriver` lets you exercise the full update cycle in a plain `#[test]`
/// function, no tokio runtime required. Messages produced by
/// [`Command::message`] are recorded in an emission log (for asserting what
/// the controller told the outside world) and queued (for feeding back
/// through `update` with [`drain`](TestDriver::drain), the way the real
/// driver would).
///
/// # Example
///
/// ```rust,ignore
/// use tenfoot_core::testing::TestDriver;
///
/// let mut driver = TestDriver::new(RemoteControl::new("zoom", navigator));
/// driver.send(Message::Key(KeyInput::down(RemoteKey::Right)));
/// assert_eq!(driver.emitted(), [Message::FocusChanged(1)]);
/// ```
pub struct TestDriver<C: Controller>
where
    C::Message: Clone,
{
    controller: C,
    pending: Vec<C::Message>,
    emitted: Vec<C::Message>,
    quit_requested: bool,
}

impl<C: Controller> TestDriver<C>
where
    C::Message: Clone,
{
    /// Wrap an already-constructed controller.
    pub fn new(controller: C) -> Self {
        Self {
            controller,
            pending: Vec::new(),
            emitted: Vec::new(),
            quit_requested: false,
        }
    }

    /// Send a message, triggering a single update cycle.
    ///
    /// Messages the returned command emits are logged and enqueued; call
    /// [`drain`](TestDriver::drain) to feed them back through `update`.
    pub fn send(&mut self, msg: C::Message) {
        let cmd = self.controller.update(msg);
        self.collect(cmd);
    }

    /// Feed pending emitted messages back through `update` until none remain.
    ///
    /// Useful for chaining scenarios where one update emits a message that
    /// triggers another update, mirroring what the driver's queue does.
    pub fn drain(&mut self) {
        while !self.pending.is_empty() {
            let messages: Vec<_> = self.pending.drain(..).collect();
            for msg in messages {
                let cmd = self.controller.update(msg);
                self.collect(cmd);
            }
        }
    }

    /// Get a shared reference to the controller for assertions.
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Get a mutable reference to the controller for direct test setup.
    ///
    /// Bypasses the message-driven update cycle, which is useful for
    /// arranging state before sending messages.
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Every message the controller has emitted so far, in order.
    pub fn emitted(&self) -> &[C::Message] {
        &self.emitted
    }

    /// Take the emission log, leaving it empty.
    ///
    /// Lets a test assert on one phase of a scenario at a time.
    pub fn take_emitted(&mut self) -> Vec<C::Message> {
        std::mem::take(&mut self.emitted)
    }

    /// Whether any processed command requested quit.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn collect(&mut self, cmd: Command<C::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                self.emitted.push(msg.clone());
                self.pending.push(msg);
            }
            CommandInner::Action(Action::Quit) => {
                self.quit_requested = true;
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}
