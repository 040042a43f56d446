//! walmark — WAL consistency-point markers for change-observation pipelines.
//!
//! Answers one question: has the log advanced since marker A, as observed at
//! marker B? Capture a marker inside the initial read transaction, capture a
//! second one when live observation is about to start, and let the
//! coordinator decide whether a re-fetch is needed before streaming changes.

// Base modules
pub mod engine;
pub mod errors;
pub mod metrics;
pub mod support;

// Snapshot core (folder with mod.rs)
pub mod snapshot; // src/snapshot/{mod,handle,coordinator}.rs

// Convenience re-exports
pub use engine::{CommitPosition, ConnectionId, DatabaseId, EngineDiagnostic, WalConnection};
pub use errors::SnapshotError;
pub use snapshot::{ConsistencyCoordinator, SnapshotHandle};
pub use support::{EngineCapabilities, SnapshotSupport, StorageEncryption, UnavailableReason};
