// Change notification

use crate::Errors;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::watch;

/// Observable state of a context after a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationState {
    /// Errors snapshot
    pub errors: Errors,

    /// Whether the snapshot is empty
    pub is_valid: bool,
}

impl ValidationState {
    /// Derive the state from an errors snapshot
    pub fn new(errors: Errors) -> Self {
        let is_valid = errors.is_empty();
        Self { errors, is_valid }
    }
}

impl Default for ValidationState {
    fn default() -> Self {
        Self::new(Errors::new())
    }
}

/// Handle returned by a subscription, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback = Arc<dyn Fn(&ValidationState) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    EveryMutation,
    ValidityChange,
}

struct Subscriber {
    id: SubscriptionId,
    trigger: Trigger,
    callback: Callback,
}

/// Subscribers of one context.
///
/// `notify` is called once per committed mutation. States committed while a
/// round of callbacks is running are queued and delivered after it, so every
/// subscriber sees states in mutation order.
pub(crate) struct Observers {
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicU64,
    last_valid: AtomicBool,
    sender: watch::Sender<ValidationState>,
    pending: Mutex<VecDeque<ValidationState>>,
    delivering: AtomicBool,
}

/// Ends a delivery round, dropping undelivered states if a callback panicked
struct DeliveryGuard<'a>(&'a Observers);

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        self.0.pending.lock().clear();
        self.0.delivering.store(false, Ordering::SeqCst);
    }
}

impl Observers {
    pub(crate) fn new() -> Self {
        let (sender, _) = watch::channel(ValidationState::default());
        Self {
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            last_valid: AtomicBool::new(true),
            sender,
            pending: Mutex::new(VecDeque::new()),
            delivering: AtomicBool::new(false),
        }
    }

    pub(crate) fn on_mutation<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ValidationState) + Send + Sync + 'static,
    {
        self.add(Trigger::EveryMutation, Arc::new(callback))
    }

    pub(crate) fn on_validity_change<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ValidationState) + Send + Sync + 'static,
    {
        self.add(Trigger::ValidityChange, Arc::new(callback))
    }

    fn add(&self, trigger: Trigger, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().push(Subscriber {
            id,
            trigger,
            callback,
        });
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        subscribers.len() != before
    }

    pub(crate) fn count(&self) -> usize {
        self.subscribers.read().len()
    }

    pub(crate) fn watch(&self) -> watch::Receiver<ValidationState> {
        self.sender.subscribe()
    }

    /// Deliver `state` to every interested subscriber, in registration order.
    ///
    /// Callbacks run without any subscriber lock held, so they may subscribe,
    /// unsubscribe or mutate the context. A state committed from inside a
    /// callback is delivered once the current round has finished.
    pub(crate) fn notify(&self, state: ValidationState) {
        self.pending.lock().push_back(state);
        if self.delivering.swap(true, Ordering::SeqCst) {
            return;
        }

        let _round = DeliveryGuard(self);
        loop {
            let Some(state) = self.pending.lock().pop_front() else {
                break;
            };
            self.deliver(state);
        }
    }

    fn deliver(&self, state: ValidationState) {
        let was_valid = self.last_valid.swap(state.is_valid, Ordering::SeqCst);
        let flipped = was_valid != state.is_valid;

        let callbacks: Vec<Callback> = self
            .subscribers
            .read()
            .iter()
            .filter(|s| s.trigger == Trigger::EveryMutation || flipped)
            .map(|s| s.callback.clone())
            .collect();

        for callback in callbacks {
            callback(&state);
        }

        self.sender.send_replace(state);
    }
}
