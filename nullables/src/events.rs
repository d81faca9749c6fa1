//! Event recorder: captures everything a governance instance emits.

use std::sync::{Arc, Mutex};

use vaultgov_governance::GovernanceEvent;

/// Collects emitted events for later assertions.
///
/// Clones share the same buffer, so one clone can be handed to
/// [`listener`](EventRecorder::listener) while the test keeps another.
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<GovernanceEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener suitable for `GovernanceInstance::subscribe`.
    pub fn listener(&self) -> Box<dyn Fn(&GovernanceEvent) + Send + Sync> {
        let events = Arc::clone(&self.events);
        Box::new(move |event: &GovernanceEvent| events.lock().unwrap().push(event.clone()))
    }

    pub fn events(&self) -> Vec<GovernanceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
