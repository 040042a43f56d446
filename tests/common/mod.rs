//! Shared in-memory WAL engine for integration tests.
//!
//! Models just enough of a WAL-mode engine for the snapshot core: one global
//! commit sequence per database, WAL generation bumps on restart, and read
//! transactions that pin the committed position at begin (so a concurrent
//! commit does not move an already-open reader).

#![allow(dead_code)]

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use walmark::{CommitPosition, ConnectionId, DatabaseId, EngineDiagnostic, WalConnection};

// Process-unique database ids across test threads
static NEXT_DB_ID: AtomicU64 = AtomicU64::new(1);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Default)]
struct WalState {
    generation: u64,
    seq: u64,
}

/// One in-memory database file with a WAL.
pub struct MemEngine {
    id: DatabaseId,
    state: Arc<Mutex<WalState>>,
    next_conn: AtomicU64,
}

impl MemEngine {
    pub fn new() -> Self {
        Self {
            id: DatabaseId(NEXT_DB_ID.fetch_add(1, Ordering::Relaxed)),
            state: Arc::new(Mutex::new(WalState::default())),
            next_conn: AtomicU64::new(1),
        }
    }

    pub fn connect(&self) -> MemConn {
        MemConn {
            id: ConnectionId(self.next_conn.fetch_add(1, Ordering::Relaxed)),
            db: self.id,
            state: Arc::clone(&self.state),
            pinned: Cell::new(None),
        }
    }

    /// Commit one write transaction (advances the global commit sequence).
    pub fn commit_write(&self) {
        let mut g = self.state.lock().expect("wal state");
        g.seq += 1;
    }

    /// Checkpoint restart: new WAL generation, sequence restarts at zero.
    pub fn restart_wal(&self) {
        let mut g = self.state.lock().expect("wal state");
        g.generation += 1;
        g.seq = 0;
    }
}

/// One connection; at most one read transaction at a time.
pub struct MemConn {
    id: ConnectionId,
    db: DatabaseId,
    state: Arc<Mutex<WalState>>,
    pinned: Cell<Option<CommitPosition>>,
}

impl MemConn {
    /// Open a read transaction pinned at the current committed position.
    pub fn begin_read(&self) {
        let g = self.state.lock().expect("wal state");
        self.pinned.set(Some(CommitPosition::new(g.generation, g.seq)));
    }

    pub fn end_read(&self) {
        self.pinned.set(None);
    }
}

impl WalConnection for MemConn {
    fn database_id(&self) -> DatabaseId {
        self.db
    }

    fn connection_id(&self) -> ConnectionId {
        self.id
    }

    fn read_transaction_open(&self) -> bool {
        self.pinned.get().is_some()
    }

    fn commit_position(&self) -> Result<CommitPosition, EngineDiagnostic> {
        self.pinned
            .get()
            .ok_or_else(|| EngineDiagnostic::new(1, "read transaction is not active"))
    }
}
