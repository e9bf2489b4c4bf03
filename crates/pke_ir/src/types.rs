//! IR type definitions
//!
//! Scalar, tensor and opaque FHE handle types. The `Display` form follows the textual IR
//! (`i32`, `tensor<2x3xf64>`, `!openfhe.crypto_context`) and is what diagnostics print.

use std::fmt;

use serde::{Deserialize, Serialize};

/// IR type representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Type {
    /// Signless integer of the given bit width (`i1` is a boolean).
    Integer { width: u32 },
    /// Target-sized index type.
    Index,
    Float { width: u32 },
    /// Tensor of `element`. `shape == None` is an unranked tensor; negative extents are dynamic.
    Tensor {
        element: Box<Type>,
        shape: Option<Vec<i64>>,
    },

    // Opaque FHE handles
    Ciphertext,
    Plaintext,
    CryptoContext,
    PublicKey,
    PrivateKey,
    EvalKey,
    ParamsBundle,
}

impl Type {
    pub fn int(width: u32) -> Self {
        Type::Integer { width }
    }

    pub fn i64() -> Self {
        Type::int(64)
    }

    pub fn f64() -> Self {
        Type::Float { width: 64 }
    }

    /// Ranked tensor with a static shape.
    pub fn tensor(element: Type, shape: &[i64]) -> Self {
        Type::Tensor {
            element: Box::new(element),
            shape: Some(shape.to_vec()),
        }
    }

    pub fn unranked_tensor(element: Type) -> Self {
        Type::Tensor {
            element: Box::new(element),
            shape: None,
        }
    }

    pub fn is_tensor(&self) -> bool {
        matches!(self, Type::Tensor { .. })
    }

    /// Integer, index or float.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Type::Integer { .. } | Type::Index | Type::Float { .. })
    }

    pub fn is_integer_like(&self) -> bool {
        matches!(self, Type::Integer { .. } | Type::Index)
    }

    /// The shape of a ranked tensor whose every extent is static, else `None`.
    pub fn static_shape(&self) -> Option<&[i64]> {
        match self {
            Type::Tensor { shape: Some(shape), .. } if shape.iter().all(|d| *d >= 0) => Some(shape),
            _ => None,
        }
    }

    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Tensor { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Number of elements of a statically shaped tensor, `None` if it overflows `i64`.
    pub fn num_elements(&self) -> Option<i64> {
        self.static_shape()?
            .iter()
            .try_fold(1i64, |count, dim| count.checked_mul(*dim))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Integer { width } => write!(f, "i{width}"),
            Type::Index => write!(f, "index"),
            Type::Float { width } => write!(f, "f{width}"),
            Type::Tensor { element, shape: None } => write!(f, "tensor<*x{element}>"),
            Type::Tensor {
                element,
                shape: Some(shape),
            } => {
                write!(f, "tensor<")?;
                for dim in shape {
                    if *dim < 0 {
                        write!(f, "?x")?;
                    } else {
                        write!(f, "{dim}x")?;
                    }
                }
                write!(f, "{element}>")
            }
            Type::Ciphertext => write!(f, "!openfhe.ciphertext"),
            Type::Plaintext => write!(f, "!openfhe.plaintext"),
            Type::CryptoContext => write!(f, "!openfhe.crypto_context"),
            Type::PublicKey => write!(f, "!openfhe.public_key"),
            Type::PrivateKey => write!(f, "!openfhe.private_key"),
            Type::EvalKey => write!(f, "!openfhe.eval_key"),
            Type::ParamsBundle => write!(f, "!openfhe.cc_params"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Type::int(1).to_string(), "i1");
        assert_eq!(Type::Index.to_string(), "index");
        assert_eq!(Type::f64().to_string(), "f64");
    }

    #[test]
    fn test_display_tensors() {
        assert_eq!(Type::tensor(Type::int(32), &[2, 3]).to_string(), "tensor<2x3xi32>");
        assert_eq!(Type::tensor(Type::i64(), &[-1]).to_string(), "tensor<?xi64>");
        assert_eq!(Type::unranked_tensor(Type::f64()).to_string(), "tensor<*xf64>");
    }

    #[test]
    fn test_static_shape_rejects_dynamic() {
        assert_eq!(Type::tensor(Type::i64(), &[4]).static_shape(), Some(&[4][..]));
        assert_eq!(Type::tensor(Type::i64(), &[-1, 4]).static_shape(), None);
        assert_eq!(Type::unranked_tensor(Type::i64()).static_shape(), None);
    }

    #[test]
    fn test_num_elements() {
        assert_eq!(Type::tensor(Type::i64(), &[2, 3]).num_elements(), Some(6));
        assert_eq!(Type::Ciphertext.num_elements(), None);
        assert_eq!(Type::tensor(Type::i64(), &[i64::MAX, 2]).num_elements(), None);
    }

    #[test]
    fn test_json_shape() {
        let ty = Type::tensor(Type::int(16), &[8]);
        let json = serde_json::to_string(&ty).unwrap();
        assert_eq!(
            json,
            r#"{"type":"tensor","element":{"type":"integer","width":16},"shape":[8]}"#
        );
        let back: Type = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ty);
    }
}
