//! Write queues for time-series entries.
//!
//! The collector hands each batch to a [`Sink`] and moves on; delivery,
//! retries and durability are the sink's concern.

mod error;
mod influx;
mod line_protocol;
mod logging;
#[cfg(test)]
mod memory;

pub use error::SinkError;
pub use influx::{InfluxConfig, InfluxSink};
pub use line_protocol::{render_batch, render_line};
pub use logging::LogSink;
#[cfg(test)]
pub use memory::{MemorySink, QueuedBatch};

use crate::entry::TimeSeriesEntry;

/// Accepts batches of entries for eventual storage.
pub trait Sink: Send + Sync {
    /// Queue entries for `target` (database name). `retry_hint` is passed
    /// through from the caller and tells the sink how hard to try.
    fn enqueue(&self, entries: Vec<TimeSeriesEntry>, retry_hint: u32, target: &str);
}
