//! Error types for loading and verifying IR modules.

use thiserror::Error;

use crate::module::{OpId, ValueId};

/// Error raised while loading or verifying a module.
#[derive(Debug, Error)]
pub enum IrError {
    #[error("invalid module JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{what} {id} is out of range (arena holds {len})")]
    DanglingId { what: &'static str, id: u32, len: usize },

    #[error("value {0} has conflicting definition sites")]
    Redefined(ValueId),

    #[error("value {0} is never defined")]
    Undefined(ValueId),

    #[error("operation #{op} ({name}) uses {value} before its definition")]
    UseBeforeDef { op: u32, name: String, value: ValueId },

    #[error("operation #{0} is not placed in exactly one block")]
    Misplaced(u32),

    #[error("operation #{op} ({name}) terminates the function but is not its last operation")]
    MisplacedTerminator { op: u32, name: String },

    #[error("function @{0} declares a result but does not end in `func.return`")]
    MissingReturn(String),

    #[error("implicit context {value} of {owner} is not a crypto context in scope")]
    BadImplicitContext { owner: String, value: ValueId },
}

impl IrError {
    pub(crate) fn dangling_value(id: ValueId, len: usize) -> Self {
        IrError::DanglingId {
            what: "value",
            id: id.0,
            len,
        }
    }

    pub(crate) fn dangling_op(id: OpId, len: usize) -> Self {
        IrError::DanglingId {
            what: "operation",
            id: id.0,
            len,
        }
    }
}
