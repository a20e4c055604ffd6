use std::cell::{Ref, RefCell};

use crate::error::EngineResult;
use crate::event::{EventLog, GameEvent};
use crate::manager::GameManager;
use crate::observer::Observer;

/// Keeps every broadcast event in a bounded [`EventLog`].
///
/// Front ends use it as a history sink; tests use it to assert what was
/// broadcast and in which order.
#[derive(Debug)]
pub struct EventRecorder {
    id: String,
    log: RefCell<EventLog>,
}

impl EventRecorder {
    /// A recorder registered under `id`, keeping at most `max_events`
    /// events (0 = unlimited).
    pub fn new(id: impl Into<String>, max_events: usize) -> Self {
        Self {
            id: id.into(),
            log: RefCell::new(EventLog::new(max_events)),
        }
    }

    /// Borrow the recorded events.
    pub fn log(&self) -> Ref<'_, EventLog> {
        self.log.borrow()
    }
}

impl Observer for EventRecorder {
    fn id(&self) -> &str {
        &self.id
    }

    fn update(&self, _manager: &mut GameManager, event: &GameEvent) -> EngineResult<()> {
        self.log.borrow_mut().push(event.clone());
        Ok(())
    }
}
