//! Snapshot core split into submodules:
//! - handle.rs: SnapshotHandle (capability-gated capture, ordered compare).
//! - coordinator.rs: ConsistencyCoordinator (refetch decision consumed by the
//!   change-observation pipeline).
//!
//! External API surface:
//! - SnapshotHandle
//! - ConsistencyCoordinator

mod coordinator;
mod handle;

pub use coordinator::ConsistencyCoordinator;
pub use handle::SnapshotHandle;
