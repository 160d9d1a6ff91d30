use crate::command::{Action, Command, CommandInner};
use crate::controller::Controller;
use crate::subscription::SubscriptionManager;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::sync::Notify;

/// A cloneable handle to a running [`Driver`] for external control.
///
/// `DriverHandle` is [`Clone`] and can safely be sent across threads or into
/// async tasks. It provides two capabilities:
///
/// * [`send`](DriverHandle::send) -- inject a message into the driver's
///   event loop from outside (a gate-signal bridge, a network listener).
/// * [`kill`](DriverHandle::kill) -- force the driver to exit immediately.
///
/// Obtain a handle by calling [`Driver::handle`] before entering the run loop.
#[derive(Clone)]
pub struct DriverHandle<Msg: Send + 'static> {
    msg_tx: mpsc::UnboundedSender<Msg>,
    killed: Arc<AtomicBool>,
    kill_signal: Arc<Notify>,
}

impl<Msg: Send + 'static> DriverHandle<Msg> {
    /// Send a message to the running driver.
    ///
    /// The message is enqueued on an unbounded channel and will be processed
    /// on the next iteration of the event loop. Returns silently if the
    /// driver has already exited.
    pub fn send(&self, msg: Msg) {
        let _ = self.msg_tx.send(msg);
    }

    /// Force-kill the driver immediately.
    ///
    /// The driver exits at the next opportunity without processing remaining
    /// messages.
    pub fn kill(&self) {
        self.killed.store(true, Ordering::SeqCst);
        // notify_one stores a permit, so a kill that lands before the loop
        // reaches its select point is still observed.
        self.kill_signal.notify_one();
    }
}

/// The driver runtime. Owns a [`Controller`], its message queue, and its
/// input feeds, and runs the update loop until the controller returns
/// [`Command::quit()`] or the process receives a signal.
///
/// The driver performs no rendering of its own. Hosts pass an observer
/// closure to [`run`](Driver::run); it is called with the controller after
/// each processed batch of messages, which is where a host redraws its UI or
/// forwards emitted state to a scene graph.
///
/// # Example
///
/// ```rust,ignore
/// use tenfoot_core::Driver;
///
/// #[tokio::main]
/// async fn main() {
///     let driver = Driver::new(MyApp::new());
///     let final_state = driver.run(|app| redraw(app)).await;
/// }
/// ```
pub struct Driver<C: Controller> {
    controller: C,
    msg_tx: mpsc::UnboundedSender<C::Message>,
    msg_rx: mpsc::UnboundedReceiver<C::Message>,
    subscriptions: SubscriptionManager<C::Message>,
    killed: Arc<AtomicBool>,
    kill_signal: Arc<Notify>,
    should_quit: bool,
}

impl<C: Controller> Driver<C> {
    /// Create a driver and start the controller's initial input feeds.
    ///
    /// Must be called within a tokio runtime: feeds are spawned as tasks.
    pub fn new(controller: C) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let subscriptions = SubscriptionManager::new(msg_tx.clone());

        let mut driver = Self {
            controller,
            msg_tx,
            msg_rx,
            subscriptions,
            killed: Arc::new(AtomicBool::new(false)),
            kill_signal: Arc::new(Notify::new()),
            should_quit: false,
        };

        log::debug!("driver initialized");
        let subs = driver.controller.subscriptions();
        driver.subscriptions.reconcile(subs);
        driver
    }

    /// Get a sender for external message injection.
    pub fn sender(&self) -> mpsc::UnboundedSender<C::Message> {
        self.msg_tx.clone()
    }

    /// Get a handle for external control (send messages, force-kill).
    pub fn handle(&self) -> DriverHandle<C::Message> {
        DriverHandle {
            msg_tx: self.msg_tx.clone(),
            killed: self.killed.clone(),
            kill_signal: self.kill_signal.clone(),
        }
    }

    /// The controller being driven.
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Process a single message synchronously: update the controller, execute
    /// the returned command, and reconcile input feeds.
    ///
    /// Messages the command emits are queued behind whatever is already
    /// pending, preserving delivery order. The run loop calls this for every
    /// received message; headless hosts with their own loop can call it
    /// directly.
    pub fn step(&mut self, msg: C::Message) {
        let cmd = self.controller.update(msg);
        self.execute_command(cmd);

        let subs = self.controller.subscriptions();
        self.subscriptions.reconcile(subs);
    }

    /// Run the driver. Blocks until quit, kill, or ctrl-c.
    ///
    /// `observe` is called once before the loop starts and again after each
    /// processed batch of messages. Returns the final controller state.
    pub async fn run(mut self, mut observe: impl FnMut(&C) + Send) -> C {
        observe(&self.controller);

        loop {
            if self.killed.load(Ordering::SeqCst) {
                break;
            }

            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c() => {
                    log::debug!("received ctrl+c signal");
                    break;
                }

                _ = self.kill_signal.notified() => {
                    log::debug!("driver killed");
                    break;
                }

                Some(msg) = self.msg_rx.recv() => {
                    self.step(msg);

                    // Micro-batch: drain additional messages within 100μs, up
                    // to 100 messages, so key repeat bursts coalesce into one
                    // observer call.
                    let deadline = Instant::now() + Duration::from_micros(100);
                    let mut batched = 0u32;
                    while Instant::now() < deadline && batched < 100 {
                        match self.msg_rx.try_recv() {
                            Ok(msg) => {
                                self.step(msg);
                                batched += 1;
                            }
                            Err(_) => break,
                        }
                    }

                    if self.should_quit || self.killed.load(Ordering::SeqCst) {
                        break;
                    }

                    observe(&self.controller);
                }
            }
        }

        log::debug!("driver shutting down");
        self.subscriptions.shutdown();
        self.controller
    }

    fn execute_command(&mut self, cmd: Command<C::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                let _ = self.msg_tx.send(msg);
            }
            CommandInner::Action(Action::Quit) => {
                self.should_quit = true;
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_command(cmd);
                }
            }
        }
    }
}
