//! SnapshotHandle: a consistency marker for one point in the WAL.
//!
//! A handle records where in the log a connection's read transaction stood at
//! capture time. It owns nothing — the connection and the transaction stay
//! with the caller, and the handle is only meaningful while that transaction
//! remains open. Capture and compare within one transaction scope; there is
//! deliberately no staleness query, since tracking it would require observing
//! transaction lifecycle events the handle does not own.

use std::cmp::Ordering;

use log::{debug, warn};

use crate::engine::{
    CommitPosition, ConnectionId, DatabaseId, WalConnection, CODE_MISUSE,
};
use crate::errors::SnapshotError;
use crate::metrics::{record_capture, record_capture_refused, record_compare};
use crate::support::SnapshotSupport;

/// Immutable marker of a single WAL position, as observed from one connection
/// during one active read transaction.
#[derive(Clone, Debug)]
pub struct SnapshotHandle {
    database: DatabaseId,
    connection: ConnectionId,
    position: CommitPosition,
}

impl SnapshotHandle {
    /// Capture a marker for "right now" on `conn`.
    ///
    /// Fails with `FeatureUnavailable` when `support` says the capability is
    /// absent, and with `InvalidState` when no read transaction is open or
    /// the engine refuses; in the latter case the engine's diagnostic code
    /// and message are carried through unchanged.
    ///
    /// No transaction is started, extended or committed: the only side effect
    /// is copying the position token out of the engine.
    pub fn capture(
        support: &SnapshotSupport,
        conn: &impl WalConnection,
    ) -> Result<SnapshotHandle, SnapshotError> {
        if let Err(e) = support.ensure_available() {
            warn!(
                "snapshot capture refused on {:?}: {e}",
                conn.connection_id()
            );
            record_capture_refused();
            return Err(e);
        }

        if !conn.read_transaction_open() {
            record_capture_refused();
            return Err(SnapshotError::InvalidState {
                code: CODE_MISUSE,
                message: "no active read transaction on this connection".to_string(),
            });
        }

        let position = conn.commit_position().map_err(|diag| {
            record_capture_refused();
            SnapshotError::InvalidState {
                code: diag.code,
                message: diag.message,
            }
        })?;

        record_capture();
        debug!(
            "captured wal marker {position} on {:?}",
            conn.connection_id()
        );

        Ok(SnapshotHandle {
            database: conn.database_id(),
            connection: conn.connection_id(),
            position,
        })
    }

    /// Ordered comparison in WAL commit order: `Less` — self predates
    /// `other`, `Equal` — no commit landed between the two captures,
    /// `Greater` — self postdates `other`.
    ///
    /// Pure in-memory computation; it cannot fail once both handles exist.
    ///
    /// # Panics
    ///
    /// When `support` reports the capability unavailable, or when the handles
    /// come from different databases. Both are caller bugs: returning an
    /// ordering here would corrupt the downstream consistency decision, so
    /// the fault is loud instead of silent.
    pub fn compare(&self, support: &SnapshotSupport, other: &SnapshotHandle) -> Ordering {
        if let Some(reason) = support.unavailable_reason() {
            panic!("snapshot compare called without snapshot support: {reason}");
        }
        assert_eq!(
            self.database, other.database,
            "snapshot compare across different databases"
        );

        record_compare();
        self.position.cmp_commit_order(&other.position)
    }

    pub fn database_id(&self) -> DatabaseId {
        self.database
    }

    /// Connection the marker was captured on (non-owning back-reference).
    pub fn connection_id(&self) -> ConnectionId {
        self.connection
    }

    pub fn position(&self) -> CommitPosition {
        self.position
    }
}
