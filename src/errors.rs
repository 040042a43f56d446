//! Typed errors for snapshot capture and comparison.
//!
//! Three recoverable kinds, all propagated to the caller unchanged: no retry,
//! no silent downgrade. The correct downgrade (which fallback consistency
//! strategy to use) belongs to the observation pipeline, not to this crate.
//!
//! Precondition violations — comparing without snapshot support, or across
//! different databases — are not errors but caller bugs, and panic instead
//! (see `SnapshotHandle::compare`).

use thiserror::Error;

use crate::engine::CommitPosition;
use crate::support::UnavailableReason;

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Snapshot capability is absent in this build/runtime. Recoverable by
    /// falling back to an alternative consistency strategy; never retried,
    /// since retrying cannot change build-time capability.
    #[error("wal snapshots are unavailable: {reason}")]
    FeatureUnavailable { reason: UnavailableReason },

    /// The engine reports misuse (no active read transaction, closed
    /// connection, ...). The engine's own code and message are preserved.
    #[error("snapshot capture rejected by engine (code {code}): {message}")]
    InvalidState { code: u32, message: String },

    /// Markers compared in an order inconsistent with their capture order:
    /// the subscription marker predates the initial one. A caller bug in how
    /// markers were sequenced; surfaced, never silently treated as
    /// "no refetch needed".
    #[error(
        "snapshots compared out of capture order: initial marker {initial} \
         postdates subscription marker {subscription}"
    )]
    OutOfOrderSnapshots {
        initial: CommitPosition,
        subscription: CommitPosition,
    },
}
