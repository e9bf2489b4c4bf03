//! Constant attributes.
//!
//! `arith.constant` carries one [`ConstantAttr`]: a scalar integer, a scalar float, or a dense tensor literal. Dense
//! literals store either a single value (a splat) or every element in row-major order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Type;

/// A single literal element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl Scalar {
    /// Whether the literal can be spelled in C++ source (NaN and infinities cannot).
    pub fn is_finite(&self) -> bool {
        match self {
            Scalar::Float(v) => v.is_finite(),
            Scalar::Bool(_) | Scalar::Int(_) => true,
        }
    }

    /// Whether the literal can initialize an `element` without narrowing.
    pub fn fits(&self, element: &Type) -> bool {
        match (self, element) {
            (Scalar::Bool(_), Type::Integer { width: 1 }) => true,
            (Scalar::Int(v), Type::Integer { width: 1 }) => *v == 0 || *v == 1,
            (Scalar::Int(_), Type::Integer { .. } | Type::Index | Type::Float { .. }) => true,
            (Scalar::Float(_), Type::Float { .. }) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            // `{:?}` always keeps a decimal point or exponent (`2.0`, `1e-7`), so the literal stays a double.
            Scalar::Float(v) => write!(f, "{v:?}"),
        }
    }
}

/// Dense tensor literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseElements {
    /// The tensor type of the literal.
    pub ty: Type,
    /// One value (splat) or all elements in row-major order.
    pub values: Vec<Scalar>,
}

impl DenseElements {
    pub fn new(ty: Type, values: Vec<Scalar>) -> Self {
        Self { ty, values }
    }

    pub fn splat(ty: Type, value: Scalar) -> Self {
        Self { ty, values: vec![value] }
    }

    /// Whether every element has the same value.
    pub fn is_splat(&self) -> bool {
        match self.values.split_first() {
            Some((first, rest)) => rest.iter().all(|v| v == first),
            None => false,
        }
    }

    /// Extents of the literal's shape that are not 1.
    pub fn non_unit_dims(&self) -> Vec<i64> {
        self.ty
            .static_shape()
            .map(|shape| shape.iter().copied().filter(|d| *d != 1).collect())
            .unwrap_or_default()
    }

    pub fn rank(&self) -> Option<usize> {
        self.ty.static_shape().map(<[i64]>::len)
    }

    pub fn num_elements(&self) -> Option<i64> {
        self.ty.num_elements()
    }
}

impl fmt::Display for DenseElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_splat() {
            return write!(f, "dense<{}> : {}", self.values[0], self.ty);
        }
        let items: Vec<String> = self.values.iter().map(Scalar::to_string).collect();
        write!(f, "dense<[{}]> : {}", items.join(", "), self.ty)
    }
}

/// Value of an `arith.constant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstantAttr {
    Int { value: i64 },
    Float { value: f64 },
    Dense(DenseElements),
}

impl fmt::Display for ConstantAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantAttr::Int { value } => write!(f, "{value}"),
            ConstantAttr::Float { value } => write!(f, "{}", Scalar::Float(*value)),
            ConstantAttr::Dense(dense) => write!(f, "{dense}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_literal_keeps_decimal_point() {
        assert_eq!(Scalar::Float(2.0).to_string(), "2.0");
        assert_eq!(Scalar::Float(0.25).to_string(), "0.25");
    }

    #[test]
    fn test_splat_detection() {
        let ty = Type::tensor(Type::int(32), &[5]);
        assert!(DenseElements::splat(ty.clone(), Scalar::Int(2)).is_splat());
        assert!(DenseElements::new(ty.clone(), vec![Scalar::Int(7); 5]).is_splat());
        assert!(!DenseElements::new(ty.clone(), vec![Scalar::Int(1), Scalar::Int(2)]).is_splat());
        assert!(!DenseElements::new(ty, vec![]).is_splat());
    }

    #[test]
    fn test_display_canonical_forms() {
        let splat = DenseElements::splat(Type::tensor(Type::int(32), &[5]), Scalar::Int(2));
        assert_eq!(splat.to_string(), "dense<2> : tensor<5xi32>");

        let dense = DenseElements::new(
            Type::tensor(Type::int(32), &[3]),
            vec![Scalar::Int(1), Scalar::Int(2), Scalar::Int(3)],
        );
        assert_eq!(dense.to_string(), "dense<[1, 2, 3]> : tensor<3xi32>");
    }

    #[test]
    fn test_literal_fits_element_type() {
        assert!(Scalar::Int(3).fits(&Type::i64()));
        assert!(Scalar::Int(3).fits(&Type::f64()));
        assert!(Scalar::Bool(true).fits(&Type::int(1)));
        assert!(Scalar::Int(1).fits(&Type::int(1)));
        assert!(!Scalar::Int(2).fits(&Type::int(1)));
        assert!(!Scalar::Float(1.5).fits(&Type::i64()));
        assert!(!Scalar::Bool(false).fits(&Type::int(8)));
        assert!(!Scalar::Int(0).fits(&Type::Ciphertext));
    }

    #[test]
    fn test_non_unit_dims() {
        let dense = DenseElements::new(Type::tensor(Type::i64(), &[1, 4, 1]), vec![Scalar::Int(0); 4]);
        assert_eq!(dense.non_unit_dims(), vec![4]);
        assert_eq!(dense.rank(), Some(3));
    }

    #[test]
    fn test_json_untagged_scalars() {
        let values: Vec<Scalar> = serde_json::from_str("[1, 2.5, true]").unwrap();
        assert_eq!(values, vec![Scalar::Int(1), Scalar::Float(2.5), Scalar::Bool(true)]);
    }
}
