//! Sink that only logs entries.

use chrono::Utc;
use tracing::info;

use crate::entry::TimeSeriesEntry;

use super::Sink;
use super::line_protocol::render_line;

/// Logs each entry as line protocol instead of writing it anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl Sink for LogSink {
    fn enqueue(&self, entries: Vec<TimeSeriesEntry>, retry_hint: u32, target: &str) {
        let timestamp = Utc::now().timestamp_nanos_opt();
        info!(target_db = target, retry_hint, count = entries.len(), "Queued entries");
        for line in entries.iter().filter_map(|e| render_line(e, timestamp)) {
            info!(target_db = target, "{line}");
        }
    }
}
