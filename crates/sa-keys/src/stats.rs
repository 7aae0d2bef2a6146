//! Statistics for an aggregation run.

use chrono::{DateTime, Duration, Utc};

/// Counters collected while aggregating one user's keys.
#[derive(Debug, Clone, Default)]
pub struct AggregationStats {
    /// When the run started
    pub started_at: Option<DateTime<Utc>>,

    /// When the run finished
    pub completed_at: Option<DateTime<Utc>>,

    /// Listing pages processed
    pub pages: usize,

    /// Objects returned by the listing
    pub objects_listed: usize,

    /// Objects skipped without a fetch (marker or another user's key)
    pub objects_skipped: usize,

    /// Fetch tasks launched
    pub fetches_launched: usize,

    /// Non-empty records written to the sink
    pub records_written: usize,

    /// Drained records that were empty
    pub records_empty: usize,

    /// Bytes written to the sink
    pub bytes_written: u64,

    /// Writes that failed for a reason other than a closed reader
    pub output_errors: usize,

    /// The reader closed the sink before the listing was exhausted
    pub closed_early: bool,
}

impl AggregationStats {
    /// Create a new stats tracker with the current time as start time.
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Mark the run as complete with the current time.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Record a listing page of `objects` objects.
    pub fn record_page(&mut self, objects: usize) {
        self.pages += 1;
        self.objects_listed += objects;
    }

    pub fn record_skipped(&mut self) {
        self.objects_skipped += 1;
    }

    pub fn record_fetch_launched(&mut self) {
        self.fetches_launched += 1;
    }

    /// Record a record written to the sink.
    pub fn record_written(&mut self, bytes: usize) {
        self.records_written += 1;
        self.bytes_written += bytes as u64;
    }

    pub fn record_empty(&mut self) {
        self.records_empty += 1;
    }

    pub fn record_output_error(&mut self) {
        self.output_errors += 1;
    }

    /// Note that the reader went away.
    pub fn mark_closed_early(&mut self) {
        self.closed_early = true;
    }

    /// Duration of the run, if completed.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}
