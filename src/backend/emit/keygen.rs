//! Parameter, context and key generation arms.

use pke_core::openfhe::{self, method};
use pke_ir::Operation;

use super::{Emitter, Expect};
use crate::backend::errors::EmitError;

impl<'m> Emitter<'m> {
    pub(super) fn emit_gen_params(
        &mut self,
        op: &'m Operation,
        mul_depth: i64,
        plain_mod: Option<i64>,
    ) -> Result<(), EmitError> {
        self.operands(op, &[])?;
        let params = self.typed_result(op, Expect::Params)?;
        let name = self.name(params).to_string();
        self.line(format!("{} {};", openfhe::CC_PARAMS_T, name));
        self.line(format!("{name}.{}({mul_depth});", method::SET_MULTIPLICATIVE_DEPTH));
        if let Some(modulus) = plain_mod {
            self.line(format!("{name}.{}({modulus});", method::SET_PLAINTEXT_MODULUS));
        }
        Ok(())
    }

    pub(super) fn emit_gen_context(&mut self, op: &'m Operation) -> Result<(), EmitError> {
        let operands = self.operands(op, &[Expect::Params])?;
        let cc = self.typed_result(op, Expect::Context)?;
        let name = self.name(cc).to_string();
        self.line(format!(
            "{} {} = {}({});",
            openfhe::CRYPTO_CONTEXT_T,
            name,
            openfhe::GEN_CRYPTO_CONTEXT,
            self.name(operands[0])
        ));
        for feature in openfhe::CONTEXT_FEATURES {
            self.line(format!("{name}->{}({feature});", method::ENABLE));
        }
        Ok(())
    }

    pub(super) fn emit_gen_mul_key(&mut self, op: &'m Operation) -> Result<(), EmitError> {
        let operands = self.operands(op, &[Expect::Context, Expect::PrivateKey])?;
        self.no_results(op)?;
        self.line(format!(
            "{}->{}({});",
            self.name(operands[0]),
            method::EVAL_MULT_KEY_GEN,
            self.name(operands[1])
        ));
        Ok(())
    }

    pub(super) fn emit_gen_rot_key(&mut self, op: &'m Operation, indices: &[i64]) -> Result<(), EmitError> {
        let operands = self.operands(op, &[Expect::Context, Expect::PrivateKey])?;
        self.no_results(op)?;
        let indices: Vec<String> = indices.iter().map(i64::to_string).collect();
        self.line(format!(
            "{}->{}({}, {{{}}});",
            self.name(operands[0]),
            method::EVAL_ROTATE_KEY_GEN,
            self.name(operands[1]),
            indices.join(", ")
        ));
        Ok(())
    }
}
