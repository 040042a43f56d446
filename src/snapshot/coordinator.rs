//! Refetch decision for the change-observation pipeline.
//!
//! The pipeline fetches an initial value, later registers for live change
//! notifications, and needs to know whether anything committed in between.
//! The coordinator turns two markers into that yes/no — and refuses to guess
//! when the markers arrive in an impossible order.

use std::cmp::Ordering;

use log::{debug, warn};

use crate::engine::WalConnection;
use crate::errors::SnapshotError;
use crate::metrics::{record_out_of_order, record_refetch_required, record_refetch_skipped};
use crate::snapshot::SnapshotHandle;
use crate::support::SnapshotSupport;

/// Decision maker over pairs of markers. Owns the injected capability value;
/// adds no failure modes beyond ordering validation.
pub struct ConsistencyCoordinator {
    support: SnapshotSupport,
}

impl ConsistencyCoordinator {
    pub fn new(support: SnapshotSupport) -> Self {
        Self { support }
    }

    /// Injected capability value. Callers check this up front to pick a
    /// fallback consistency strategy without a failed-call round trip.
    pub fn support(&self) -> &SnapshotSupport {
        &self.support
    }

    /// Capture a marker on `conn` under this coordinator's support value.
    pub fn capture(
        &self,
        conn: &impl WalConnection,
    ) -> Result<SnapshotHandle, SnapshotError> {
        SnapshotHandle::capture(&self.support, conn)
    }

    /// True exactly when at least one write committed in the log strictly
    /// between `initial` and `subscription`; false when the markers denote
    /// the same position.
    ///
    /// A subscription marker that predates the initial marker means the
    /// markers were sequenced wrong upstream: reported as
    /// `OutOfOrderSnapshots`, never silently read as "no refetch needed".
    pub fn needs_refetch(
        &self,
        initial: &SnapshotHandle,
        subscription: &SnapshotHandle,
    ) -> Result<bool, SnapshotError> {
        match initial.compare(&self.support, subscription) {
            Ordering::Less => {
                record_refetch_required();
                debug!(
                    "log advanced between {} and {}: refetch required",
                    initial.position(),
                    subscription.position()
                );
                Ok(true)
            }
            Ordering::Equal => {
                record_refetch_skipped();
                Ok(false)
            }
            Ordering::Greater => {
                record_out_of_order();
                warn!(
                    "snapshots out of capture order: initial {} postdates subscription {}",
                    initial.position(),
                    subscription.position()
                );
                Err(SnapshotError::OutOfOrderSnapshots {
                    initial: initial.position(),
                    subscription: subscription.position(),
                })
            }
        }
    }
}
