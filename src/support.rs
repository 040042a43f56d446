//! Snapshot capability detection.
//!
//! Whether WAL snapshots work at all depends on how the engine was built and
//! what the linked runtime exposes; page-level storage encryption rules the
//! feature out entirely and must fail closed. The answer is computed once at
//! process start from `EngineCapabilities` and carried around as a value
//! (`SnapshotSupport`) instead of living in an ambient global, so tests can
//! hold an "available" and an "unavailable" configuration side by side.

use std::fmt;

use log::debug;

use crate::errors::SnapshotError;

/// Env kill switch: set to 1|true|on|yes to refuse all snapshot captures.
pub const ENV_SNAPSHOTS_DISABLE: &str = "WALMARK_SNAPSHOTS_DISABLE";

/// Page-level encryption mode of the underlying engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageEncryption {
    None,
    PageLevel,
}

/// Facts about the engine build and runtime, gathered by the embedder.
#[derive(Clone, Debug)]
pub struct EngineCapabilities {
    /// Engine compiled with its snapshot entry points.
    pub compiled_with_snapshots: bool,

    /// Linked runtime/SDK actually exposes those entry points.
    pub runtime_snapshot_api: bool,

    /// Storage encryption mode; `PageLevel` is categorically unsupported.
    pub encryption: StorageEncryption,

    /// Operator kill switch, see [`ENV_SNAPSHOTS_DISABLE`].
    pub disabled_by_env: bool,
}

impl Default for EngineCapabilities {
    fn default() -> Self {
        // A plain, current engine build.
        Self {
            compiled_with_snapshots: true,
            runtime_snapshot_api: true,
            encryption: StorageEncryption::None,
            disabled_by_env: false,
        }
    }
}

impl EngineCapabilities {
    /// Defaults plus the env kill switch. Unknown or absent values mean "on".
    pub fn from_env() -> Self {
        let mut caps = Self::default();
        if let Ok(v) = std::env::var(ENV_SNAPSHOTS_DISABLE) {
            let s = v.trim().to_ascii_lowercase();
            caps.disabled_by_env = s == "1" || s == "true" || s == "on" || s == "yes";
        }
        caps
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_compiled_with_snapshots(mut self, on: bool) -> Self {
        self.compiled_with_snapshots = on;
        self
    }

    pub fn with_runtime_snapshot_api(mut self, on: bool) -> Self {
        self.runtime_snapshot_api = on;
        self
    }

    pub fn with_encryption(mut self, mode: StorageEncryption) -> Self {
        self.encryption = mode;
        self
    }

    pub fn with_disabled_by_env(mut self, on: bool) -> Self {
        self.disabled_by_env = on;
        self
    }
}

/// Why snapshots are unavailable. Each variant carries an operator-actionable
/// message: "unsupported build" reads differently from "wrong SDK" from
/// "encrypted database".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnavailableReason {
    EncryptedStorage,
    NotCompiledIn,
    RuntimeApiMissing,
    DisabledByEnv,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::EncryptedStorage => write!(
                f,
                "page-level encrypted storage does not support wal snapshots; \
                 use an unencrypted database or a fallback consistency strategy"
            ),
            UnavailableReason::NotCompiledIn => write!(
                f,
                "engine was built without snapshot support; \
                 rebuild with the snapshot feature enabled"
            ),
            UnavailableReason::RuntimeApiMissing => write!(
                f,
                "linked engine runtime does not expose the snapshot api; \
                 upgrade the engine sdk"
            ),
            UnavailableReason::DisabledByEnv => {
                write!(f, "wal snapshots disabled via {}", ENV_SNAPSHOTS_DISABLE)
            }
        }
    }
}

/// The injected availability value. Compute once at startup, pass to whoever
/// captures or compares markers.
#[derive(Clone, Debug)]
pub struct SnapshotSupport {
    reason: Option<UnavailableReason>,
}

impl SnapshotSupport {
    /// Decide availability from engine facts.
    ///
    /// Precedence: encryption (fail closed) over build flag over runtime API
    /// over the env kill switch.
    pub fn detect(caps: &EngineCapabilities) -> Self {
        let reason = if caps.encryption == StorageEncryption::PageLevel {
            Some(UnavailableReason::EncryptedStorage)
        } else if !caps.compiled_with_snapshots {
            Some(UnavailableReason::NotCompiledIn)
        } else if !caps.runtime_snapshot_api {
            Some(UnavailableReason::RuntimeApiMissing)
        } else if caps.disabled_by_env {
            Some(UnavailableReason::DisabledByEnv)
        } else {
            None
        };

        match reason {
            Some(r) => debug!("wal snapshots unavailable: {r}"),
            None => debug!("wal snapshots available"),
        }

        Self { reason }
    }

    pub fn is_available(&self) -> bool {
        self.reason.is_none()
    }

    pub fn unavailable_reason(&self) -> Option<UnavailableReason> {
        self.reason
    }

    /// Gate used by capture: unavailable capability is a recoverable error.
    pub(crate) fn ensure_available(&self) -> Result<(), SnapshotError> {
        match self.reason {
            Some(reason) => Err(SnapshotError::FeatureUnavailable { reason }),
            None => Ok(()),
        }
    }
}
