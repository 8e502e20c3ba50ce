//! # Engine Errors
//!
//! The engine distinguishes two failure policies:
//!
//! - **Lenient**: unresolved module names, unresolved decorator names, and
//!   unregistering an absent id are expected outcomes. They surface as
//!   `Option`/no-op plus a bus notification where the contract calls for
//!   one, never as an error.
//! - **Fatal**: contract violations by the caller or by a module. These are
//!   the variants below.

use thiserror::Error;

/// Errors from engine operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A registry lookup was attempted with an absent, malformed, or unknown
    /// identifier. Callers of the strict lookup path are expected to hold a
    /// valid id, so this indicates a programming error.
    #[error("invalid module identifier {raw:?}")]
    InvalidIdentifier {
        /// The raw annotation value as supplied, if any.
        raw: Option<String>,
    },

    /// A module's start hook returned a value instead of signalling
    /// completion through its ready callback.
    #[error("module {id} start hook returned a value; completion must be signalled via the ready callback")]
    ProtocolViolation {
        /// Registry id of the offending module.
        id: u64,
    },
}
