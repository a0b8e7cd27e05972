pub mod events;
pub mod logging;

pub use events::{DispatchEvent, EventSink, RecordingEventSink};
pub use logging::{truncate_text, TracingEventSink};
