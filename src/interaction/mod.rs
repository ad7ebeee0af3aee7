//! Typed chart events, listener registration, persisted interactive state and
//! the debounced hit-test index.

mod dispatcher;
mod events;
mod state;

pub use dispatcher::EventDispatcher;
pub use events::{ChartEvent, ChartListener, ElementEvent, PointerInput};
pub use hit_test::{HIT_TEST_DEBOUNCE_MS, HitPoint, HitTestScheduler};
pub use state::{ActiveState, ChartState, Interpolate};
