//! Ordered result channel for one listing page.
//!
//! Every listed object reserves a slot before its fetch is launched, and the
//! aggregator drains slots in reservation order. Fetches may finish in any
//! order; the output order is fixed at reservation time.

use std::collections::VecDeque;

use tokio::sync::oneshot;
use tracing::warn;

use crate::record::KeyRecord;

/// Sending half of one slot. Consumed by the single send it allows.
#[derive(Debug)]
pub struct ResultSlot {
    tx: oneshot::Sender<KeyRecord>,
}

impl ResultSlot {
    /// Deliver the record for this slot.
    ///
    /// Silently discarded if the channel was dropped, which happens when the
    /// consumer stopped early.
    pub fn send(self, record: KeyRecord) {
        let _ = self.tx.send(record);
    }
}

/// Page-scoped channel with one slot per listed object.
#[derive(Debug, Default)]
pub struct ResultChannel {
    slots: VecDeque<oneshot::Receiver<KeyRecord>>,
}

impl ResultChannel {
    /// Create an empty channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a channel sized for a page of `capacity` objects.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: VecDeque::with_capacity(capacity),
        }
    }

    /// Reserve the next slot in output order.
    pub fn reserve(&mut self) -> ResultSlot {
        let (tx, rx) = oneshot::channel();
        self.slots.push_back(rx);
        ResultSlot { tx }
    }

    /// Reserve a slot and fill it immediately.
    pub fn push_ready(&mut self, record: KeyRecord) {
        self.reserve().send(record);
    }

    /// Wait for the oldest slot and return its record.
    ///
    /// Returns `None` once every reserved slot has been drained. A slot
    /// whose sender went away without sending drains as an empty record.
    pub async fn drain(&mut self) -> Option<KeyRecord> {
        let rx = self.slots.pop_front()?;
        match rx.await {
            Ok(record) => Some(record),
            Err(_) => {
                warn!("Key fetch ended without a result");
                Some(KeyRecord::empty())
            }
        }
    }
}
