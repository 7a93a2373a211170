//! Sink that keeps queued batches in memory.

use std::sync::{Mutex, PoisonError};

use crate::entry::TimeSeriesEntry;

use super::Sink;

/// One `enqueue` call as seen by [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedBatch {
    pub entries: Vec<TimeSeriesEntry>,
    pub retry_hint: u32,
    pub target: String,
}

/// Records every batch it is given, for inspecting what a run queued.
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Mutex<Vec<QueuedBatch>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All batches queued so far, in order.
    pub fn batches(&self) -> Vec<QueuedBatch> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// All entries queued so far, flattened across batches.
    pub fn entries(&self) -> Vec<TimeSeriesEntry> {
        self.batches()
            .into_iter()
            .flat_map(|batch| batch.entries)
            .collect()
    }
}

impl Sink for MemorySink {
    fn enqueue(&self, entries: Vec<TimeSeriesEntry>, retry_hint: u32, target: &str) {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(QueuedBatch {
                entries,
                retry_hint,
                target: target.to_string(),
            });
    }
}
