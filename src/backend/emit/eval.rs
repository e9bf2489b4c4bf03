//! Ciphertext evaluation arms.
//!
//! Operand 0 of every operation here is the crypto context; the call is made on it and the remaining operands become
//! the call's arguments.

use pke_core::openfhe::{self, method};
use pke_ir::{Operation, ValueId};

use super::{Emitter, Expect};
use crate::backend::errors::EmitError;
use crate::backend::names::EVAL_KEY_MAP_SUFFIX;

impl<'m> Emitter<'m> {
    /// Validate `[context, rest...]` and return `(context, rest)`.
    fn context_call(&self, op: &'m Operation, rest: &[Expect]) -> Result<(ValueId, &'m [ValueId]), EmitError> {
        let mut expect = Vec::with_capacity(rest.len() + 1);
        expect.push(Expect::Context);
        expect.extend_from_slice(rest);
        let operands = self.operands(op, &expect)?;
        Ok((operands[0], &operands[1..]))
    }

    /// `const auto& r = cc->Method(args);`
    pub(super) fn eval_method(&mut self, op: &'m Operation, method: &str, rest: &[Expect]) -> Result<(), EmitError> {
        let (cc, args) = self.context_call(op, rest)?;
        let result = self.typed_result(op, Expect::Ciphertext)?;
        self.line(format!(
            "const auto& {} = {}->{}({});",
            self.name(result),
            self.name(cc),
            method,
            self.joined(args)
        ));
        Ok(())
    }

    /// The rotation offset is an attribute and is printed as a literal.
    pub(super) fn emit_rotate(&mut self, op: &'m Operation, index: i64) -> Result<(), EmitError> {
        let (cc, args) = self.context_call(op, &[Expect::Ciphertext])?;
        let result = self.typed_result(op, Expect::Ciphertext)?;
        self.line(format!(
            "const auto& {} = {}->{}({}, {});",
            self.name(result),
            self.name(cc),
            method::EVAL_ROTATE,
            self.name(args[0]),
            index
        ));
        Ok(())
    }

    /// OpenFHE takes the automorphism key as an index → key map; a single-entry map at index 0 is declared first.
    pub(super) fn emit_automorph(&mut self, op: &'m Operation) -> Result<(), EmitError> {
        let (cc, args) = self.context_call(op, &[Expect::Ciphertext, Expect::EvalKey])?;
        let result = self.typed_result(op, Expect::Ciphertext)?;
        let map = format!("{}{}", self.name(result), EVAL_KEY_MAP_SUFFIX);
        self.line(format!(
            "std::map<uint32_t, {}> {} = {{{{0, {}}}}};",
            openfhe::EVAL_KEY_T,
            map,
            self.name(args[1])
        ));
        self.line(format!(
            "const auto& {} = {}->{}({}, 0, {});",
            self.name(result),
            self.name(cc),
            method::EVAL_AUTOMORPHISM,
            self.name(args[0]),
            map
        ));
        Ok(())
    }

    /// Decrypt writes into an out-parameter, so the plaintext is declared first.
    pub(super) fn emit_decrypt(&mut self, op: &'m Operation) -> Result<(), EmitError> {
        let (cc, args) = self.context_call(op, &[Expect::PrivateKey, Expect::Ciphertext])?;
        let result = self.typed_result(op, Expect::Plaintext)?;
        self.line(format!("{} {};", self.scheme.plaintext_type(), self.name(result)));
        self.line(format!(
            "{}->{}({}, &{});",
            self.name(cc),
            method::DECRYPT,
            self.joined(args),
            self.name(result)
        ));
        Ok(())
    }
}
