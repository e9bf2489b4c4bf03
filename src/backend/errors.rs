//! Define error types for IR → OpenFHE emission.
//!
//! [`EmitError`] is what a single dispatcher arm (or the type converter) reports. The emitter wraps it into a
//! [`TranslationError`] carrying the failing operation's name and source location before aborting the module.
//!
//! ## Notes
//! - Every failure aborts the whole translation; there is no partial output.
//! - Diagnostic codes are stable (`pke_emit::<kind>`) so tooling can match on them.

use std::fmt;

use miette::Diagnostic;
use pke_core::Scheme;
use pke_ir::{Location, Type};
use thiserror::Error;

/// Error raised while translating one operation, function or type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("unsupported operation `{0}`")]
    UnsupportedOperation(String),

    #[error("unsupported type `{ty}`: {reason}")]
    UnsupportedType { ty: String, reason: String },

    #[error("expected {expected} {what}, found {found}")]
    ArityMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("`{op}` requires the {required} scheme, but the active scheme is {active}")]
    SchemeMismatch { op: String, required: Scheme, active: Scheme },

    #[error("no crypto context is reachable from this operation")]
    MissingContext,

    #[error("malformed constant `{attr}`: {reason}")]
    MalformedConstant { attr: String, reason: String },

    #[error("`{0}` cannot be used as a C++ identifier")]
    InvalidSymbolName(String),
}

impl EmitError {
    pub fn unsupported_type(ty: &Type, reason: impl Into<String>) -> Self {
        EmitError::UnsupportedType {
            ty: ty.to_string(),
            reason: reason.into(),
        }
    }

    pub fn arity(what: &'static str, expected: usize, found: usize) -> Self {
        EmitError::ArityMismatch { what, expected, found }
    }

    pub fn malformed(attr: impl fmt::Display, reason: impl Into<String>) -> Self {
        EmitError::MalformedConstant {
            attr: attr.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            EmitError::UnsupportedOperation(_) => "pke_emit::unsupported_operation",
            EmitError::UnsupportedType { .. } => "pke_emit::unsupported_type",
            EmitError::ArityMismatch { .. } => "pke_emit::arity_mismatch",
            EmitError::SchemeMismatch { .. } => "pke_emit::scheme_mismatch",
            EmitError::MissingContext => "pke_emit::missing_context",
            EmitError::MalformedConstant { .. } => "pke_emit::malformed_constant",
            EmitError::InvalidSymbolName(_) => "pke_emit::invalid_symbol_name",
        }
    }

    pub fn help(&self) -> Option<&'static str> {
        match self {
            EmitError::UnsupportedOperation(_) => {
                Some("lower this operation to the openfhe/lwe/arith/tensor subset before emission")
            }
            EmitError::UnsupportedType { .. } => {
                Some("only statically shaped ranked tensors, i1..i64, index, f32/f64 and OpenFHE handles are emitted")
            }
            EmitError::MissingContext => Some(
                "pass the crypto context as a function parameter, or annotate the operation with an implicit context",
            ),
            EmitError::SchemeMismatch { .. } => Some("select the matching scheme with `--scheme`"),
            EmitError::MalformedConstant { .. } => {
                Some("dense constants must be splats or flat literals with at most one non-unit dimension")
            }
            EmitError::ArityMismatch { .. } | EmitError::InvalidSymbolName(_) => None,
        }
    }
}

/// A translation failure, tagged with the operation (or function) that could not be translated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to translate `{subject}` at {location}: {cause}")]
pub struct TranslationError {
    /// Operation mnemonic, or `func.func @name` for function-level failures
    pub subject: String,
    pub location: Location,
    pub cause: EmitError,
}

impl TranslationError {
    pub fn new(subject: impl Into<String>, location: Location, cause: EmitError) -> Self {
        Self {
            subject: subject.into(),
            location,
            cause,
        }
    }
}

impl Diagnostic for TranslationError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.cause.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.cause.help().map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_error_message() {
        let err = TranslationError::new(
            "openfhe.make_ckks_packed_plaintext",
            Location::new("circuit.mlir", 4, 9),
            EmitError::SchemeMismatch {
                op: "openfhe.make_ckks_packed_plaintext".to_string(),
                required: Scheme::Ckks,
                active: Scheme::Bgv,
            },
        );
        assert_eq!(
            err.to_string(),
            "failed to translate `openfhe.make_ckks_packed_plaintext` at circuit.mlir:4:9: \
             `openfhe.make_ckks_packed_plaintext` requires the ckks scheme, but the active scheme is bgv"
        );
    }

    #[test]
    fn test_diagnostic_code_follows_cause() {
        let err = TranslationError::new("func.return", Location::default(), EmitError::arity("operands", 1, 2));
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("pke_emit::arity_mismatch"));
        assert!(err.help().is_none());
        assert_eq!(err.cause.to_string(), "expected 1 operands, found 2");
    }

    #[test]
    fn test_unsupported_type_uses_ir_spelling() {
        let err = EmitError::unsupported_type(&Type::unranked_tensor(Type::i64()), "unranked tensors have no spelling");
        assert_eq!(
            err.to_string(),
            "unsupported type `tensor<*xi64>`: unranked tensors have no spelling"
        );
    }
}
