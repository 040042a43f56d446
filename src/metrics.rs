//! Lightweight global metrics for walmark.
//!
//! Thread-safe atomic counters for the two subsystems:
//! - snapshot capture (ok / refused)
//! - consistency decisions (compares, refetch required/skipped, out-of-order)

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Capture -----
static SNAPSHOT_CAPTURES: AtomicU64 = AtomicU64::new(0);
static SNAPSHOT_CAPTURES_REFUSED: AtomicU64 = AtomicU64::new(0);

// ----- Decisions -----
static SNAPSHOT_COMPARES: AtomicU64 = AtomicU64::new(0);
static REFETCH_REQUIRED: AtomicU64 = AtomicU64::new(0);
static REFETCH_SKIPPED: AtomicU64 = AtomicU64::new(0);
static OUT_OF_ORDER_DETECTED: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub snapshot_captures: u64,
    pub snapshot_captures_refused: u64,

    pub snapshot_compares: u64,
    pub refetch_required: u64,
    pub refetch_skipped: u64,
    pub out_of_order_detected: u64,
}

impl MetricsSnapshot {
    /// Share of decided gaps that required a re-fetch.
    pub fn refetch_ratio(&self) -> f64 {
        let total = self.refetch_required + self.refetch_skipped;
        if total == 0 {
            0.0
        } else {
            self.refetch_required as f64 / total as f64
        }
    }
}

// ----- Recorders (capture) -----
pub fn record_capture() {
    SNAPSHOT_CAPTURES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_capture_refused() {
    SNAPSHOT_CAPTURES_REFUSED.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (decisions) -----
pub fn record_compare() {
    SNAPSHOT_COMPARES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_refetch_required() {
    REFETCH_REQUIRED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_refetch_skipped() {
    REFETCH_SKIPPED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_out_of_order() {
    OUT_OF_ORDER_DETECTED.fetch_add(1, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        snapshot_captures: SNAPSHOT_CAPTURES.load(Ordering::Relaxed),
        snapshot_captures_refused: SNAPSHOT_CAPTURES_REFUSED.load(Ordering::Relaxed),

        snapshot_compares: SNAPSHOT_COMPARES.load(Ordering::Relaxed),
        refetch_required: REFETCH_REQUIRED.load(Ordering::Relaxed),
        refetch_skipped: REFETCH_SKIPPED.load(Ordering::Relaxed),
        out_of_order_detected: OUT_OF_ORDER_DETECTED.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    SNAPSHOT_CAPTURES.store(0, Ordering::Relaxed);
    SNAPSHOT_CAPTURES_REFUSED.store(0, Ordering::Relaxed);

    SNAPSHOT_COMPARES.store(0, Ordering::Relaxed);
    REFETCH_REQUIRED.store(0, Ordering::Relaxed);
    REFETCH_SKIPPED.store(0, Ordering::Relaxed);
    OUT_OF_ORDER_DETECTED.store(0, Ordering::Relaxed);
}
