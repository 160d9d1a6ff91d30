use futures::stream::BoxStream;
use futures::StreamExt;
use std::any::TypeId;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// A long-lived input feed managed by the driver.
///
/// Feeds are declared in [`Controller::subscriptions`](crate::Controller::subscriptions)
/// and started or stopped through diffing: after every update the driver
/// compares the declared set against what is running, starts feeds that
/// appeared, and aborts feeds that disappeared.
///
/// This makes feed lifetime a pure function of controller state. A zoom pulse
/// declared only while a hold is active is cancelled the moment the controller
/// stops declaring it; there is no separate timer handle to remember, and a
/// restarted hold can never race a stale one.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) spawn: Box<dyn FnOnce(mpsc::UnboundedSender<Msg>) -> AbortHandle + Send>,
}

/// Identity for diffing feeds between update cycles.
///
/// Composed of the source's Rust [`TypeId`] plus a discriminant, so two
/// distinct pulse feeds of the same source type can coexist while repeated
/// declarations of the same feed compare equal and are left running.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    type_id: TypeId,
    discriminant: u64,
}

impl SubscriptionId {
    /// Create an ID from a type and a numeric discriminant.
    pub fn new<T: 'static>(discriminant: u64) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant,
        }
    }

    /// Create an ID from a type alone (for singletons).
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant: 0,
        }
    }

    /// Create an ID from a type and a string discriminant.
    pub fn with_str<T: 'static>(s: &str) -> Self {
        let mut hasher = std::hash::DefaultHasher::new();
        s.hash(&mut hasher);
        Self {
            type_id: TypeId::of::<T>(),
            discriminant: hasher.finish(),
        }
    }
}

/// Trait for types that produce a stream of values.
///
/// Implement this to create custom feed sources. The driver calls
/// [`stream`](SubscriptionSource::stream) once when the feed is first started
/// and drops the stream when the feed is aborted.
pub trait SubscriptionSource: Send + 'static {
    /// The type of values this source emits.
    type Output: Send + 'static;

    /// Unique ID for this feed instance.
    fn id(&self) -> SubscriptionId;

    /// Create the stream of values.
    fn stream(self) -> BoxStream<'static, Self::Output>;
}

/// Create a [`Subscription`] from a [`SubscriptionSource`].
///
/// Spawns a tokio task that drives the source's stream and forwards each
/// emitted value into the driver's message channel.
pub fn subscribe<S>(source: S) -> Subscription<S::Output>
where
    S: SubscriptionSource,
    S::Output: Send + 'static,
{
    let id = source.id();
    Subscription {
        id,
        spawn: Box::new(move |tx| {
            let handle = tokio::spawn(async move {
                let mut stream = source.stream();
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

impl<Msg: Send + 'static> Subscription<Msg> {
    /// Create from a raw stream and id.
    pub fn from_stream(id: SubscriptionId, stream: BoxStream<'static, Msg>) -> Self {
        Subscription {
            id,
            spawn: Box::new(move |tx| {
                let handle = tokio::spawn(async move {
                    let mut stream = stream;
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

    /// The identity this feed is diffed under.
    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// Transform the message type (for controller composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Subscription<NewMsg> {
        let f = std::sync::Arc::new(f);
        Subscription {
            id: self.id,
            spawn: Box::new(move |new_tx: mpsc::UnboundedSender<NewMsg>| {
                let (inner_tx, mut inner_rx) = mpsc::unbounded_channel::<Msg>();
                let abort = (self.spawn)(inner_tx);

                tokio::spawn(async move {
                    while let Some(msg) = inner_rx.recv().await {
                        if new_tx.send(f(msg)).is_err() {
                            break;
                        }
                    }
                });

                // Aborting the source drops inner_tx, so the mapper task
                // drains and ends on its own.
                abort
            }),
        }
    }
}

/// Tracks running feeds and diffs them against each declared set.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    active: HashMap<SubscriptionId, AbortHandle>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            active: HashMap::new(),
            msg_tx,
        }
    }

    /// Diff the declared feeds against the running ones: start what appeared,
    /// abort what disappeared, leave the rest untouched.
    pub fn reconcile(&mut self, declared: Vec<Subscription<Msg>>) {
        let mut declared: HashMap<SubscriptionId, Subscription<Msg>> = declared
            .into_iter()
            .map(|sub| (sub.id.clone(), sub))
            .collect();

        self.active.retain(|id, handle| {
            if declared.contains_key(id) {
                true
            } else {
                log::trace!("stopping input feed {id:?}");
                handle.abort();
                false
            }
        });

        for (id, sub) in declared.drain() {
            if !self.active.contains_key(&id) {
                log::trace!("starting input feed {id:?}");
                let handle = (sub.spawn)(self.msg_tx.clone());
                self.active.insert(id, handle);
            }
        }
    }

    /// Abort all running feeds.
    pub fn shutdown(&mut self) {
        for (_, handle) in self.active.drain() {
            handle.abort();
        }
    }

    /// Number of running feeds (for testing).
    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_feed(id: SubscriptionId) -> Subscription<i32> {
        let stream: BoxStream<'static, i32> = Box::pin(futures::stream::pending());
        Subscription::from_stream(id, stream)
    }

    #[test]
    fn feed_id_equality() {
        let id1 = SubscriptionId::of::<String>();
        let id2 = SubscriptionId::of::<String>();
        assert_eq!(id1, id2);
    }

    #[test]
    fn feed_id_distinguishes_types() {
        let id1 = SubscriptionId::of::<String>();
        let id2 = SubscriptionId::of::<i32>();
        assert_ne!(id1, id2);
    }

    #[test]
    fn feed_id_distinguishes_discriminants() {
        let id1 = SubscriptionId::new::<String>(1);
        let id2 = SubscriptionId::new::<String>(2);
        assert_ne!(id1, id2);
    }

    #[test]
    fn feed_id_with_str() {
        let id1 = SubscriptionId::with_str::<String>("zoom-pulse");
        let id2 = SubscriptionId::with_str::<String>("orbit");
        assert_ne!(id1, id2);

        let id3 = SubscriptionId::with_str::<String>("zoom-pulse");
        assert_eq!(id1, id3);
    }

    #[tokio::test]
    async fn reconcile_starts_declared_feeds() {
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut manager = SubscriptionManager::new(tx);

        manager.reconcile(vec![pending_feed(SubscriptionId::of::<String>())]);
        assert_eq!(manager.active_count(), 1);
    }

    #[tokio::test]
    async fn reconcile_aborts_undeclared_feeds() {
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut manager = SubscriptionManager::new(tx);

        manager.reconcile(vec![pending_feed(SubscriptionId::of::<String>())]);
        assert_eq!(manager.active_count(), 1);

        manager.reconcile(vec![]);
        assert_eq!(manager.active_count(), 0);
    }

    #[tokio::test]
    async fn reconcile_keeps_redeclared_feeds_running() {
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut manager = SubscriptionManager::new(tx);

        let id = SubscriptionId::with_str::<String>("zoom-pulse");
        manager.reconcile(vec![pending_feed(id.clone())]);
        manager.reconcile(vec![pending_feed(id)]);
        assert_eq!(manager.active_count(), 1);
    }

    #[tokio::test]
    async fn hold_lifecycle_runs_exactly_one_pulse_feed() {
        // Declared on hold start, redeclared during the hold, gone on release.
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut manager = SubscriptionManager::new(tx);
        let id = SubscriptionId::with_str::<String>("zoom-pulse");

        manager.reconcile(vec![pending_feed(id.clone())]);
        manager.reconcile(vec![pending_feed(id.clone())]);
        assert_eq!(manager.active_count(), 1);

        manager.reconcile(vec![]);
        assert_eq!(manager.active_count(), 0);

        manager.reconcile(vec![pending_feed(id)]);
        assert_eq!(manager.active_count(), 1);
    }

    #[tokio::test]
    async fn shutdown_aborts_everything() {
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut manager = SubscriptionManager::new(tx);

        manager.reconcile(vec![
            pending_feed(SubscriptionId::new::<String>(1)),
            pending_feed(SubscriptionId::new::<String>(2)),
        ]);
        assert_eq!(manager.active_count(), 2);

        manager.shutdown();
        assert_eq!(manager.active_count(), 0);
    }
}
