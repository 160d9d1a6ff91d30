//! Built-in feed sources: interval pulses and terminal key events.

use crate::subscription::{SubscriptionId, SubscriptionSource};
use crossterm::event::{Event, EventStream, KeyEvent};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A repeating pulse that fires at a fixed interval.
///
/// Each pulse emits the current [`Instant`], which downstream consumers use
/// as the time base for speed ramps. The `id` field lets multiple pulse feeds
/// coexist with distinct identities.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use tenfoot_core::sources::Pulse;
/// use tenfoot_core::subscribe;
///
/// let sub = subscribe(Pulse::new(Duration::from_millis(16), "zoom-pulse"))
///     .map(Msg::ZoomPulse);
/// ```
pub struct Pulse {
    /// The interval between pulses.
    pub interval: Duration,
    /// A string identifier used to distinguish this pulse feed from others.
    pub id: &'static str,
}

impl Pulse {
    /// Create a new repeating pulse with the given interval and identifier.
    pub fn new(interval: Duration, id: &'static str) -> Self {
        Self { interval, id }
    }
}

impl SubscriptionSource for Pulse {
    type Output = Instant;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::with_str::<Self>(self.id)
    }

    fn stream(self) -> BoxStream<'static, Instant> {
        let stream = tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(
            self.interval,
        ))
        .map(|tick| tick.into_std());
        Box::pin(stream)
    }
}

/// Marker type giving all terminal key feeds a shared identity.
///
/// There is one physical keyboard; declaring the feed from several places
/// collapses to a single running reader.
pub struct KeyFeed;

/// Create a terminal key-event feed that maps each event through a
/// user-provided function.
///
/// The `map` closure receives every [`KeyEvent`] crossterm reports and returns
/// `Some(Msg)` to forward it to the driver or `None` to discard it. Host
/// applications typically route remote-vocabulary keys through
/// [`KeyInput::from_key_event`](crate::key::KeyInput::from_key_event) and keep
/// a few application keys (quit, toggles) for themselves:
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![key_events(|event| match event.code {
///         KeyCode::Char('q') => Some(Msg::Quit),
///         _ => KeyInput::from_key_event(&event).map(Msg::Remote),
///     })]
/// }
/// ```
///
/// # Input TTY behavior
///
/// crossterm's `EventStream::new()` internally calls `tty_fd()`, which opens
/// `/dev/tty` when stdin is not a TTY. Programs using this feed therefore
/// still receive keyboard input when stdin is redirected.
pub fn key_events<Msg: Send + 'static>(
    map: impl Fn(KeyEvent) -> Option<Msg> + Send + Sync + 'static,
) -> crate::subscription::Subscription<Msg> {
    use crate::subscription::Subscription;
    use tokio::sync::mpsc;
    use tokio::task::AbortHandle;

    let id = SubscriptionId::of::<KeyFeed>();
    let map = Arc::new(map);

    // Create EventStream lazily inside the spawned task, not eagerly.
    // Eager creation touches crossterm's global InternalEventReader on every
    // subscriptions() call (each update cycle), which interferes with the
    // active EventStream's polling.
    Subscription {
        id,
        spawn: Box::new(move |tx: mpsc::UnboundedSender<Msg>| -> AbortHandle {
            let handle = tokio::spawn(async move {
                let stream = EventStream::new().filter_map(move |result| {
                    let map = map.clone();
                    async move {
                        match result {
                            Ok(Event::Key(key)) => map(key),
                            Ok(_) | Err(_) => None,
                        }
                    }
                });
                futures::pin_mut!(stream);
                while let Some(msg) = stream.next().await {
                    if tx.send(msg).is_err() {
                        break;
                    }
                }
            });
            handle.abort_handle()
        }),
    }
}
