//! Constant materialization and cast arms.
//!
//! Scalar constants become typed declarations marked `[[maybe_unused]]`, since tensor indexing may inline the literal
//! instead of referencing the name. Dense constants must be flat: rank 1, or exactly one non-unit extent (which is
//! emitted as a flat vector over the element type). Anything else is rejected rather than guessed at.

use pke_ir::{ConstantAttr, DenseElements, Operation, Scalar, Type, ValueId};

use super::{Emitter, Expect};
use crate::backend::errors::EmitError;

impl<'m> Emitter<'m> {
    pub(super) fn emit_constant(&mut self, op: &'m Operation, attr: &ConstantAttr) -> Result<(), EmitError> {
        self.operands(op, &[])?;
        let result = self.result(op)?;
        let result_ty = self.ty(result);

        match attr {
            ConstantAttr::Int { value } => {
                let spelling = self.scalar_constant_type(attr, result_ty)?;
                self.line(format!("[[maybe_unused]] {spelling} {} = {value};", self.name(result)));
            }
            ConstantAttr::Float { value } => {
                let spelling = self.scalar_constant_type(attr, result_ty)?;
                if !matches!(result_ty, Type::Float { .. }) {
                    return Err(EmitError::malformed(attr, format!("float literal bound to `{result_ty}`")));
                }
                let literal = Scalar::Float(*value);
                if !literal.is_finite() {
                    return Err(EmitError::malformed(attr, "non-finite floats have no C++ literal"));
                }
                self.line(format!("[[maybe_unused]] {spelling} {} = {literal};", self.name(result)));
            }
            ConstantAttr::Dense(dense) => self.emit_dense(attr, dense, result_ty, result)?,
        }
        Ok(())
    }

    fn scalar_constant_type(&self, attr: &ConstantAttr, ty: &Type) -> Result<String, EmitError> {
        if !ty.is_scalar() {
            return Err(EmitError::malformed(attr, format!("scalar literal bound to `{ty}`")));
        }
        self.spell(ty)
    }

    fn emit_dense(
        &mut self,
        attr: &ConstantAttr,
        dense: &DenseElements,
        result_ty: &Type,
        result: ValueId,
    ) -> Result<(), EmitError> {
        if dense.ty != *result_ty {
            return Err(EmitError::malformed(attr, format!("literal type does not match result `{result_ty}`")));
        }
        let (Some(rank), Some(count)) = (dense.rank(), dense.num_elements()) else {
            return Err(EmitError::malformed(attr, "dense literals need a static shape"));
        };
        let flattened = rank > 1 && dense.non_unit_dims().len() == 1;
        if rank != 1 && !flattened {
            return Err(EmitError::malformed(
                attr,
                "only rank-1 literals or literals with one non-unit dimension are supported",
            ));
        }
        if let Some(bad) = dense.values.iter().find(|v| !v.is_finite()) {
            return Err(EmitError::malformed(attr, format!("`{bad}` has no C++ literal")));
        }
        let element = dense.ty.element_type().unwrap_or(&dense.ty);
        if let Some(bad) = dense.values.iter().find(|v| !v.fits(element)) {
            return Err(EmitError::malformed(attr, format!("`{bad}` does not fit `{element}`")));
        }
        if dense.values.len() != 1 && dense.values.len() as i64 != count {
            return Err(EmitError::malformed(
                attr,
                format!("{} values for {count} elements", dense.values.len()),
            ));
        }

        let spelling = match (flattened, dense.ty.element_type()) {
            (true, Some(element)) => format!("std::vector<{}>", self.spell(element)?),
            _ => self.spell(&dense.ty)?,
        };
        let name = self.name(result).to_string();

        if dense.is_splat() {
            self.line(format!("{spelling} {name}({count}, {});", dense.values[0]));
        } else {
            let items: Vec<String> = dense.values.iter().map(Scalar::to_string).collect();
            self.line(format!("{spelling} {name} = {{{}}};", items.join(", ")));
        }
        Ok(())
    }

    /// Widening casts copy into the element type OpenFHE's encoders expect.
    pub(super) fn emit_widen(&mut self, op: &'m Operation, element: &str) -> Result<(), EmitError> {
        let operands = self.operands(op, &[Expect::Tensor])?;
        let result = self.typed_result(op, Expect::Tensor)?;
        let input = self.name(operands[0]).to_string();
        self.line(format!(
            "std::vector<{element}> {}(std::begin({input}), std::end({input}));",
            self.name(result)
        ));
        Ok(())
    }

    pub(super) fn emit_index_cast(&mut self, op: &'m Operation) -> Result<(), EmitError> {
        let operands = self.operands(op, &[Expect::Integer])?;
        let result = self.typed_result(op, Expect::Integer)?;
        let spelling = self.spell(self.ty(result))?;
        self.line(format!(
            "{spelling} {} = static_cast<{spelling}>({});",
            self.name(result),
            self.name(operands[0])
        ));
        Ok(())
    }
}
