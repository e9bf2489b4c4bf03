//! Type conversion for IR → OpenFHE emission
//!
//! Maps IR types to C++ spellings. Scalars have fixed spellings, ranked tensors nest one
//! `std::vector` level per dimension, and handle types use the aliases declared by the prelude
//! (the plaintext alias depends on the scheme).

use pke_core::{Scheme, openfhe};
use pke_ir::Type;

use super::errors::EmitError;

/// Convert `ty` to its C++ spelling under `scheme`.
pub fn convert_type(ty: &Type, scheme: Scheme) -> Result<String, EmitError> {
    match ty {
        Type::Integer { width } => integer_spelling(*width)
            .map(str::to_string)
            .ok_or_else(|| EmitError::unsupported_type(ty, "integers must be 1, 8, 16, 32 or 64 bits wide")),
        Type::Index => Ok("size_t".to_string()),
        Type::Float { width: 32 } => Ok("float".to_string()),
        Type::Float { width: 64 } => Ok("double".to_string()),
        Type::Float { .. } => Err(EmitError::unsupported_type(ty, "floats must be 32 or 64 bits wide")),
        Type::Tensor { element, .. } => {
            let shape = static_shape(ty)?;
            let mut spelling = convert_type(element, scheme)?;
            for _ in shape {
                spelling = format!("std::vector<{spelling}>");
            }
            Ok(spelling)
        }
        Type::Ciphertext => Ok(openfhe::CIPHERTEXT_T.to_string()),
        Type::Plaintext => Ok(scheme.plaintext_type().to_string()),
        Type::CryptoContext => Ok(openfhe::CRYPTO_CONTEXT_T.to_string()),
        Type::PublicKey => Ok(openfhe::PUBLIC_KEY_T.to_string()),
        Type::PrivateKey => Ok(openfhe::PRIVATE_KEY_T.to_string()),
        Type::EvalKey => Ok(openfhe::EVAL_KEY_T.to_string()),
        Type::ParamsBundle => Ok(openfhe::CC_PARAMS_T.to_string()),
    }
}

fn integer_spelling(width: u32) -> Option<&'static str> {
    match width {
        1 => Some("bool"),
        8 => Some("int8_t"),
        16 => Some("int16_t"),
        32 => Some("int32_t"),
        64 => Some("int64_t"),
        _ => None,
    }
}

/// The shape of a tensor type that can be spelled: ranked, rank ≥ 1, every extent static.
pub fn static_shape(ty: &Type) -> Result<&[i64], EmitError> {
    match ty {
        Type::Tensor { shape: None, .. } => Err(EmitError::unsupported_type(ty, "unranked tensors have no spelling")),
        Type::Tensor { shape: Some(shape), .. } if shape.is_empty() => {
            Err(EmitError::unsupported_type(ty, "zero-rank tensors have no spelling"))
        }
        Type::Tensor { .. } => ty
            .static_shape()
            .ok_or_else(|| EmitError::unsupported_type(ty, "dynamic extents have no spelling")),
        _ => Err(EmitError::unsupported_type(ty, "expected a tensor")),
    }
}

/// The spelling of a statically shaped rank-1 tensor and its length.
pub fn vector_of(ty: &Type, scheme: Scheme) -> Result<(String, i64), EmitError> {
    match static_shape(ty)? {
        [len] => Ok((convert_type(ty, scheme)?, *len)),
        _ => Err(EmitError::unsupported_type(ty, "only rank-1 tensors are supported here")),
    }
}
