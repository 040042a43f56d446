//! Engine seam: identities, the opaque commit-position token and the
//! connection trait the snapshot core talks through.
//!
//! The SQL/transaction layer is an external collaborator. The snapshot core
//! never owns a connection or a transaction; it holds value-type identities
//! (`DatabaseId`, `ConnectionId`) and a `CommitPosition` token copied out of
//! the engine while a read transaction is open.

use std::cmp::Ordering;
use std::fmt;

/// Stable identity of one underlying database file.
///
/// Markers are only comparable within one database; the engine's global
/// commit sequence is totally ordered per database file, not across files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DatabaseId(pub u64);

/// Identity of one live connection. Held by markers as a non-owning
/// back-reference; it never keeps the connection or its transaction alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub u64);

/// Opaque WAL position token.
///
/// `generation` bumps when the engine restarts its WAL (checkpoint restart);
/// `seq` is the commit sequence within the generation. Callers treat the pair
/// as opaque: ordering lives behind the snapshot availability gate, so the
/// token deliberately does not implement `Ord`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitPosition {
    generation: u64,
    seq: u64,
}

impl CommitPosition {
    pub fn new(generation: u64, seq: u64) -> Self {
        Self { generation, seq }
    }

    /// Commit order within one database: a later WAL generation orders after
    /// every position of the prior generation.
    pub(crate) fn cmp_commit_order(&self, other: &Self) -> Ordering {
        (self.generation, self.seq).cmp(&(other.generation, other.seq))
    }
}

impl fmt::Display for CommitPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}:{}", self.generation, self.seq)
    }
}

/// Engine-native failure: numeric code and message preserved verbatim so the
/// original diagnostic survives into `SnapshotError::InvalidState`.
#[derive(Clone, Debug)]
pub struct EngineDiagnostic {
    pub code: u32,
    pub message: String,
}

impl EngineDiagnostic {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for EngineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine error {}: {}", self.code, self.message)
    }
}

/// Misuse code reported when capture is attempted without an open read
/// transaction (same code space the engine uses for API misuse).
pub const CODE_MISUSE: u32 = 21;

/// One live connection to a WAL-mode database.
///
/// Implementations are expected to answer from in-memory state: reading the
/// committed position is a counter read, not disk I/O, and must not start,
/// extend or commit any transaction.
pub trait WalConnection {
    fn database_id(&self) -> DatabaseId;

    fn connection_id(&self) -> ConnectionId;

    /// True while a read transaction is open on this connection.
    fn read_transaction_open(&self) -> bool;

    /// Committed WAL position pinned by the current read transaction.
    fn commit_position(&self) -> Result<CommitPosition, EngineDiagnostic>;
}
