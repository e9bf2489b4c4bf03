//! Tensor arms: `std::vector` construction and element access.

use pke_ir::{ConstantAttr, OpKind, Operation, Type, ValueId};

use super::{Emitter, Expect};
use crate::backend::errors::EmitError;
use crate::backend::types::{static_shape, vector_of};

impl<'m> Emitter<'m> {
    /// Nested sized constructor, built from the innermost dimension outward:
    /// `std::vector<std::vector<T>> r(2, std::vector<T>(3));`
    pub(super) fn emit_empty(&mut self, op: &'m Operation) -> Result<(), EmitError> {
        self.operands(op, &[])?;
        let result = self.typed_result(op, Expect::Tensor)?;
        let ty = self.ty(result);
        let shape = static_shape(ty)?;
        let spelling = self.spell(ty)?;
        let (Some(element), Some((innermost, outer))) = (ty.element_type(), shape.split_last()) else {
            return Err(EmitError::unsupported_type(ty, "expected a ranked tensor"));
        };
        let mut init = format!("({innermost})");
        for (depth, dim) in outer.iter().enumerate().rev() {
            let inner_ty = self.spell(&Type::tensor(element.clone(), &shape[depth + 1..]))?;
            init = format!("({dim}, {inner_ty}{init})");
        }

        self.line(format!("{spelling} {}{init};", self.name(result)));
        Ok(())
    }

    /// `const auto& r = t[i][j];`
    pub(super) fn emit_extract(&mut self, op: &'m Operation) -> Result<(), EmitError> {
        let (tensor, indices) = match op.operands.split_first() {
            Some((tensor, indices)) => (*tensor, indices),
            None => return Err(EmitError::arity("operands", 1, 0)),
        };
        self.check_operand(tensor, 0, Expect::Tensor)?;
        self.check_indices(tensor, indices, 1)?;
        let result = self.result(op)?;

        self.line(format!(
            "const auto& {} = {}{};",
            self.name(result),
            self.name(tensor),
            self.subscripts(indices)
        ));
        Ok(())
    }

    /// Writes into the destination, then moves it into the result: `d[i] = s;` + `T r = std::move(d);`
    pub(super) fn emit_insert(&mut self, op: &'m Operation) -> Result<(), EmitError> {
        let (scalar, dest, indices) = match op.operands.as_slice() {
            [scalar, dest, indices @ ..] => (*scalar, *dest, indices),
            _ => return Err(EmitError::arity("operands", 2, op.operands.len())),
        };
        self.check_operand(dest, 1, Expect::Tensor)?;
        if let Some(element) = self.ty(dest).element_type() {
            let ty = self.ty(scalar);
            if ty != element {
                return Err(EmitError::unsupported_type(ty, format!("operand 0 must be `{element}`")));
            }
        }
        self.check_indices(dest, indices, 2)?;
        let result = self.typed_result(op, Expect::Tensor)?;
        let spelling = self.spell(self.ty(result))?;
        let dest_name = self.name(dest).to_string();

        self.line(format!("{dest_name}{} = {};", self.subscripts(indices), self.name(scalar)));
        self.line(format!("{spelling} {} = std::move({dest_name});", self.name(result)));
        Ok(())
    }

    /// `T r(n, v);` for rank-1 results only.
    pub(super) fn emit_splat(&mut self, op: &'m Operation) -> Result<(), EmitError> {
        let operands = self.operands(op, &[Expect::Any])?;
        let result = self.typed_result(op, Expect::Tensor)?;
        let (spelling, len) = vector_of(self.ty(result), self.scheme)?;
        self.line(format!("{spelling} {}({len}, {});", self.name(result), self.name(operands[0])));
        Ok(())
    }

    /// One index per dimension of `tensor`, each integer-like.
    fn check_indices(&self, tensor: ValueId, indices: &[ValueId], first_position: usize) -> Result<(), EmitError> {
        let rank = static_shape(self.ty(tensor))?.len();
        if indices.len() != rank {
            return Err(EmitError::arity("indices", rank, indices.len()));
        }
        for (offset, index) in indices.iter().enumerate() {
            self.check_operand(*index, first_position + offset, Expect::Integer)?;
        }
        Ok(())
    }

    /// `[i][j]`, inlining indices that are defined by an integer constant.
    fn subscripts(&self, indices: &[ValueId]) -> String {
        indices.iter().map(|index| format!("[{}]", self.index_text(*index))).collect()
    }

    fn index_text(&self, index: ValueId) -> String {
        let constant = self
            .module
            .defining_op(index)
            .map(|op| &self.module.op(op).kind);
        match constant {
            Some(OpKind::Constant {
                value: ConstantAttr::Int { value },
            }) => value.to_string(),
            _ => self.name(index).to_string(),
        }
    }
}
