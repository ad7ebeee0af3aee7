use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::error::{ChartError, ChartResult};

use super::events::{ChartEvent, ChartListener};

/// Per-chart listener registry. Listeners are notified in registration order.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: IndexMap<String, Box<dyn ChartListener>>,
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl EventDispatcher {
    /// Registers a listener with a unique, non-empty id.
    pub fn register(&mut self, listener: Box<dyn ChartListener>) -> ChartResult<()> {
        let listener_id = listener.id().to_owned();
        if listener_id.is_empty() {
            warn!("rejected chart listener with empty id");
            return Err(ChartError::InvalidConfig(
                "listener id must not be empty".to_owned(),
            ));
        }
        if self.listeners.contains_key(&listener_id) {
            warn!(listener_id, "rejected duplicate chart listener");
            return Err(ChartError::InvalidConfig(format!(
                "listener with id `{listener_id}` is already registered"
            )));
        }
        self.listeners.insert(listener_id, listener);
        Ok(())
    }

    /// Unregisters a listener by id. Returns `true` when removed.
    pub fn unregister(&mut self, listener_id: &str) -> bool {
        self.listeners.shift_remove(listener_id).is_some()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn has_listener(&self, listener_id: &str) -> bool {
        self.listeners.contains_key(listener_id)
    }

    pub fn dispatch(&mut self, event: &ChartEvent) {
        trace!(event = event.name(), listeners = self.listeners.len(), "dispatch chart event");
        for listener in self.listeners.values_mut() {
            listener.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::EventDispatcher;
    use crate::error::ChartError;
    use crate::interaction::{ChartEvent, ChartListener, PointerInput};

    struct Recorder {
        id: String,
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl ChartListener for Recorder {
        fn id(&self) -> &str {
            &self.id
        }

        fn on_event(&mut self, event: &ChartEvent) {
            self.seen.borrow_mut().push(format!("{}:{}", self.id, event.name()));
        }
    }

    fn recorder(id: &str, seen: &Rc<RefCell<Vec<String>>>) -> Box<Recorder> {
        Box::new(Recorder {
            id: id.to_owned(),
            seen: Rc::clone(seen),
        })
    }

    #[test]
    fn rejects_empty_and_duplicate_ids() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::default();
        dispatcher.register(recorder("a", &seen)).expect("first");
        assert!(matches!(
            dispatcher.register(recorder("a", &seen)),
            Err(ChartError::InvalidConfig(_))
        ));
        assert!(matches!(
            dispatcher.register(recorder("", &seen)),
            Err(ChartError::InvalidConfig(_))
        ));
        assert_eq!(dispatcher.listener_count(), 1);
    }

    #[test]
    fn notifies_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::default();
        dispatcher.register(recorder("second", &seen)).expect("second");
        dispatcher.register(recorder("first", &seen)).expect("first");
        dispatcher.dispatch(&ChartEvent::ChartClick(PointerInput::new(1.0, 2.0)));

        assert!(dispatcher.unregister("second"));
        assert!(!dispatcher.unregister("second"));
        dispatcher.dispatch(&ChartEvent::TooltipHide);

        assert_eq!(
            *seen.borrow(),
            vec![
                "second:chartClick".to_owned(),
                "first:chartClick".to_owned(),
                "first:tooltipHide".to_owned(),
            ]
        );
    }
}
