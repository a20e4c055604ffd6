use std::rc::Rc;

use crate::error::EngineResult;
use crate::event::GameEvent;
use crate::manager::GameManager;

/// A subscriber notified on every dispatch.
///
/// `update` receives the manager so it can re-enter dispatch, e.g. to
/// schedule the next round. Observers are shared behind `Rc`, so any state
/// they keep lives in a `Cell` or `RefCell`.
pub trait Observer {
    /// Unique id used for de-duplication and unsubscription.
    fn id(&self) -> &str;

    /// Called once per broadcast event. An `Err` is logged and does not
    /// stop the remaining observers. A panic is not caught: it unwinds
    /// through the dispatch and the observers after this one are skipped.
    fn update(&self, manager: &mut GameManager, event: &GameEvent) -> EngineResult<()>;
}

/// Observers in registration order.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Rc<dyn Observer>>,
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

impl ObserverRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `observer`. An observer with the same id is replaced in place.
    pub fn subscribe(&mut self, observer: Rc<dyn Observer>) {
        match self.observers.iter().position(|o| o.id() == observer.id()) {
            Some(i) => self.observers[i] = observer,
            None => self.observers.push(observer),
        }
    }

    /// Remove the observer with `id`. Returns whether one was removed.
    pub fn unsubscribe(&mut self, id: &str) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id() != id);
        self.observers.len() != before
    }

    /// Registered ids in order.
    pub fn ids(&self) -> Vec<&str> {
        self.observers.iter().map(|o| o.id()).collect()
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Return `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// A copy of the current list for one broadcast to iterate over.
    pub fn snapshot(&self) -> Vec<Rc<dyn Observer>> {
        self.observers.clone()
    }
}
