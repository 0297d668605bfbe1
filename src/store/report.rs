use thiserror::Error;

use crate::codec::CodecError;
use crate::slots::{ChunkError, TransportError};
use crate::types::{ResourceRef, StateVersion};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The serialized state does not fit. Nothing was written and the
    /// previously persisted state is untouched.
    #[error("State needs {required} slots but only {max_slots} are available")]
    CapacityExceeded { required: usize, max_slots: usize },
    #[error("Serialized state is not slot-safe")]
    NonAsciiState,
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl From<ChunkError> for StoreError {
    fn from(err: ChunkError) -> Self {
        match err {
            ChunkError::CapacityExceeded {
                required,
                max_slots,
            } => StoreError::CapacityExceeded {
                required,
                max_slots,
            },
            ChunkError::NonAscii => StoreError::NonAsciiState,
        }
    }
}

/// Non-fatal findings from restore and save. Each one also goes to `tracing`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreWarning {
    #[error("Malformed slot header {header:?}, starting empty")]
    MalformedHeader { header: String },
    #[error("Continuation slot {index} missing, starting empty")]
    MissingSlot { index: usize },
    #[error("Could not read slots: {message}")]
    SlotReadFailed { message: String },
    #[error("Verification error: data length is {actual}, instead of {declared}")]
    LengthMismatch { declared: usize, actual: usize },
    #[error("Could not decode {field}: {error}")]
    UndecodableField { field: String, error: CodecError },
    #[error("Malformed reference {token:?} in working set {set:?}")]
    MalformedReference { set: String, token: String },
    #[error("Reference {token:?} in working set {set:?} no longer resolves")]
    UnresolvedReference { set: String, token: String },
    #[error("Element {element:?} of working set {set:?} is no longer in the tree")]
    DetachedElement { set: String, element: ResourceRef },
    #[error("Duplicate working set {name:?} skipped")]
    DuplicateSet { name: String },
}

/// What one successful save wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub version: StateVersion,
    pub length: usize,
    pub slots_written: usize,
    pub slots_expired: usize,
}
