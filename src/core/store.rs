//! # Store
//!
//! Owns the single live `AppState` and the reducer that produces the next one.
//! Views register a subscriber and get called after every state change.
//!
//! The state sits behind an `Arc` and is replaced wholesale, never mutated.
//! An action that changes nothing keeps the same `Arc`, so
//! `Arc::ptr_eq` tells a subscriber whether anything moved.

use std::sync::Arc;

use crate::core::action::Action;
use crate::core::state::AppState;

/// Signature of the function folding actions into state.
pub type Reducer = fn(&AppState, &Action) -> AppState;

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

type Subscriber = Box<dyn FnMut(&Arc<AppState>) + Send>;

pub struct Store {
    state: Arc<AppState>,
    reducer: Reducer,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: usize,
}

impl Store {
    pub fn new(initial_state: AppState, reducer: Reducer) -> Self {
        Self {
            state: Arc::new(initial_state),
            reducer,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&Arc<AppState>) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Runs the reducer. Returns true if the state changed, in which case
    /// every subscriber has been notified.
    pub fn apply(&mut self, action: &Action) -> bool {
        let next = (self.reducer)(&self.state, action);
        if next == *self.state {
            return false;
        }
        self.state = Arc::new(next);
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }
        true
    }
}
