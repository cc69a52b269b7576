pub mod error;
pub mod sink;
pub mod types;

pub use error::{TrailError, TrailResult};
pub use sink::{CaptureSink, EventSink, LogSink, NoOpSink};
pub use types::{AttributeMap, EventRecord};
