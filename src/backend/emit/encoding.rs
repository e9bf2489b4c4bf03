//! Plaintext encoding arms.

use pke_core::openfhe::method;
use pke_ir::{OpId, Operation, Type};

use super::{Emitter, Expect};
use crate::backend::context::resolve_context;
use crate::backend::errors::EmitError;
use crate::backend::names::CAST_SUFFIX;
use crate::backend::types::vector_of;

impl<'m> Emitter<'m> {
    /// Encode operations have no context operand; the context comes from the resolver.
    pub(super) fn emit_make_packed(&mut self, op_id: OpId, op: &'m Operation, method: &str) -> Result<(), EmitError> {
        let operands = self.operands(op, &[Expect::Tensor])?;
        let result = self.typed_result(op, Expect::Plaintext)?;
        let cc = resolve_context(self.module, op_id)?;
        self.line(format!(
            "const auto& {} = {}->{}({});",
            self.name(result),
            self.name(cc),
            method,
            self.name(operands[0])
        ));
        Ok(())
    }

    /// Decoding reads the plaintext's packed slots; vectors must first be trimmed to the tensor length.
    pub(super) fn emit_decode(&mut self, op: &'m Operation) -> Result<(), EmitError> {
        let operands = self.operands(op, &[Expect::Plaintext])?;
        let result = self.result(op)?;
        let input = self.name(operands[0]).to_string();
        let accessor = self.scheme.packed_value_accessor();
        let result_ty = self.ty(result);

        match result_ty {
            Type::Tensor { .. } => {
                let (spelling, len) = vector_of(result_ty, self.scheme)?;
                let output = self.name(result).to_string();
                let cast = format!("{output}{CAST_SUFFIX}");
                self.line(format!("{input}->{}({len});", method::SET_LENGTH));
                self.line(format!("const auto& {cast} = {input}->{accessor}();"));
                self.line(format!("{spelling} {output}(std::begin({cast}), std::end({cast}));"));
            }
            ty if ty.is_scalar() => {
                let spelling = self.spell(ty)?;
                self.line(format!("{spelling} {} = {input}->{accessor}()[0];", self.name(result)));
            }
            ty => return Err(EmitError::unsupported_type(ty, "decoding produces a tensor or a scalar")),
        }
        Ok(())
    }

    /// Reinterpretation changes only the IR-level type; the handle is rebound as is.
    pub(super) fn emit_reinterpret(&mut self, op: &'m Operation) -> Result<(), EmitError> {
        let operands = self.operands(op, &[Expect::Any])?;
        let result = self.result(op)?;
        self.line(format!("const auto& {} = {};", self.name(result), self.name(operands[0])));
        Ok(())
    }
}
