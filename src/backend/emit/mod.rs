//! Emit OpenFHE C++ from the circuit IR.
//!
//! This module defines [`Emitter`], the operation dispatcher, and the operand validation shared by every arm. The
//! arms themselves live in focused submodules, each adding methods to `Emitter`.
//!
//! ## Notes
//! - Every arm validates operand count and types before writing anything. As a second line, [`Emitter::emit_op`]
//!   rolls the writer back to the start of the operation when an arm fails, so no partial statement survives.
//! - Arms report [`EmitError`]; the dispatcher wraps it into a [`TranslationError`] naming the operation and its
//!   location.
//!
//! ## See also
//! - [`program`]: module prelude, functions, return
//! - [`eval`]: ciphertext evaluation, encryption, rotation, automorphism
//! - [`keygen`]: parameter, context and key generation
//! - [`encoding`]: plaintext encode/decode and reinterpretation
//! - [`consts`]: constants and scalar/element casts
//! - [`tensor`]: empty/extract/insert/splat

mod consts;
mod encoding;
mod eval;
mod keygen;
mod program;
mod tensor;

use pke_core::Scheme;
use pke_ir::{Module, OpId, OpKind, Operation, Type, ValueId};

use super::errors::{EmitError, TranslationError};
use super::names::NameTable;
use super::types::convert_type;
use super::writer::CodeWriter;
use crate::config::EmitConfig;

/// Operand type accepted at one operand position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Expect {
    Context,
    Ciphertext,
    Plaintext,
    EvalKey,
    PrivateKey,
    /// Public or private key (both can encrypt).
    EncryptionKey,
    Params,
    /// Integer, index or float scalar.
    Scalar,
    Integer,
    Tensor,
    Any,
}

impl Expect {
    fn accepts(self, ty: &Type) -> bool {
        match self {
            Expect::Context => *ty == Type::CryptoContext,
            Expect::Ciphertext => *ty == Type::Ciphertext,
            Expect::Plaintext => *ty == Type::Plaintext,
            Expect::EvalKey => *ty == Type::EvalKey,
            Expect::PrivateKey => *ty == Type::PrivateKey,
            Expect::EncryptionKey => matches!(ty, Type::PublicKey | Type::PrivateKey),
            Expect::Params => *ty == Type::ParamsBundle,
            Expect::Scalar => ty.is_scalar(),
            Expect::Integer => ty.is_integer_like(),
            Expect::Tensor => ty.is_tensor(),
            Expect::Any => true,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Expect::Context => "a crypto context",
            Expect::Ciphertext => "a ciphertext",
            Expect::Plaintext => "a plaintext",
            Expect::EvalKey => "an evaluation key",
            Expect::PrivateKey => "a private key",
            Expect::EncryptionKey => "a public or private key",
            Expect::Params => "a parameter bundle",
            Expect::Scalar => "a scalar",
            Expect::Integer => "an integer or index",
            Expect::Tensor => "a tensor",
            Expect::Any => "any value",
        }
    }
}

/// Translation state for one module: the names, the output buffer and the active scheme.
pub(crate) struct Emitter<'m> {
    module: &'m Module,
    scheme: Scheme,
    config: &'m EmitConfig,
    names: NameTable,
    writer: CodeWriter,
}

impl<'m> Emitter<'m> {
    pub(crate) fn new(module: &'m Module, scheme: Scheme, config: &'m EmitConfig) -> Self {
        Self {
            module,
            scheme,
            config,
            names: NameTable::new(module),
            writer: CodeWriter::new(config.indent_width),
        }
    }

    pub(crate) fn finish(self) -> String {
        self.writer.finish()
    }

    /// Translate one operation, wrapping any failure with the operation's identity.
    fn emit_op(&mut self, op_id: OpId) -> Result<(), TranslationError> {
        let module = self.module;
        let op = module.op(op_id);
        tracing::trace!(op = %op.name(), id = op_id.0, "emitting operation");

        let mark = self.writer.checkpoint();
        self.dispatch(op_id, op).map_err(|cause| {
            self.writer.rollback(mark);
            tracing::debug!(op = %op.name(), id = op_id.0, %cause, "operation failed to translate");
            TranslationError::new(op.name(), op.loc.clone(), cause)
        })
    }

    fn dispatch(&mut self, op_id: OpId, op: &'m Operation) -> Result<(), EmitError> {
        use pke_core::openfhe::method;

        match &op.kind {
            OpKind::Add => self.eval_method(op, method::EVAL_ADD, &[Expect::Ciphertext, Expect::Ciphertext]),
            OpKind::AddPlain => self.eval_method(op, method::EVAL_ADD, &[Expect::Ciphertext, Expect::Plaintext]),
            OpKind::Sub => self.eval_method(op, method::EVAL_SUB, &[Expect::Ciphertext, Expect::Ciphertext]),
            OpKind::MulNoRelin => {
                self.eval_method(op, method::EVAL_MULT_NO_RELIN, &[Expect::Ciphertext, Expect::Ciphertext])
            }
            OpKind::Mul => self.eval_method(op, method::EVAL_MULT, &[Expect::Ciphertext, Expect::Ciphertext]),
            OpKind::MulPlain => self.eval_method(op, method::EVAL_MULT, &[Expect::Ciphertext, Expect::Plaintext]),
            OpKind::MulConst => self.eval_method(op, method::EVAL_MULT, &[Expect::Ciphertext, Expect::Scalar]),
            OpKind::Negate => self.eval_method(op, method::EVAL_NEGATE, &[Expect::Ciphertext]),
            OpKind::Square => self.eval_method(op, method::EVAL_SQUARE, &[Expect::Ciphertext]),
            OpKind::Relin => self.eval_method(op, method::RELINEARIZE, &[Expect::Ciphertext]),
            OpKind::ModReduce => self.eval_method(op, method::MOD_REDUCE, &[Expect::Ciphertext]),
            OpKind::LevelReduce => self.eval_method(op, method::LEVEL_REDUCE, &[Expect::Ciphertext]),
            OpKind::KeySwitch => self.eval_method(op, method::KEY_SWITCH, &[Expect::Ciphertext, Expect::EvalKey]),
            OpKind::Encrypt => self.eval_method(op, method::ENCRYPT, &[Expect::EncryptionKey, Expect::Plaintext]),
            OpKind::Rot { index } => self.emit_rotate(op, *index),
            OpKind::Automorph => self.emit_automorph(op),
            OpKind::Decrypt => self.emit_decrypt(op),

            OpKind::GenParams { mul_depth, plain_mod } => self.emit_gen_params(op, *mul_depth, *plain_mod),
            OpKind::GenContext => self.emit_gen_context(op),
            OpKind::GenMulKey => self.emit_gen_mul_key(op),
            OpKind::GenRotKey { indices } => self.emit_gen_rot_key(op, indices),

            OpKind::MakePackedPlaintext => self.emit_make_packed(op_id, op, method::MAKE_PACKED_PLAINTEXT),
            OpKind::MakeCkksPackedPlaintext => {
                self.require_scheme(op, Scheme::Ckks)?;
                self.emit_make_packed(op_id, op, method::MAKE_CKKS_PACKED_PLAINTEXT)
            }
            OpKind::Decode => self.emit_decode(op),
            OpKind::ReinterpretUnderlyingType => self.emit_reinterpret(op),

            OpKind::Constant { value } => self.emit_constant(op, value),
            OpKind::ExtSi => self.emit_widen(op, "int64_t"),
            OpKind::ExtF => self.emit_widen(op, "double"),
            OpKind::IndexCast => self.emit_index_cast(op),

            OpKind::Empty => self.emit_empty(op),
            OpKind::Extract => self.emit_extract(op),
            OpKind::Insert => self.emit_insert(op),
            OpKind::Splat => self.emit_splat(op),

            OpKind::Return => self.emit_return(op),

            OpKind::Unregistered { name } => Err(EmitError::UnsupportedOperation(name.clone())),
        }
    }

    // ---- shared helpers for the arms ----

    fn name(&self, value: ValueId) -> &str {
        self.names.name_of(value)
    }

    fn ty(&self, value: ValueId) -> &'m Type {
        self.module.value_type(value)
    }

    fn spell(&self, ty: &Type) -> Result<String, EmitError> {
        convert_type(ty, self.scheme)
    }

    /// Comma-joined names of `values`.
    fn joined(&self, values: &[ValueId]) -> String {
        values.iter().map(|v| self.name(*v)).collect::<Vec<_>>().join(", ")
    }

    /// Check operand count and types, returning the operands.
    fn operands(&self, op: &'m Operation, expect: &[Expect]) -> Result<&'m [ValueId], EmitError> {
        if op.operands.len() != expect.len() {
            return Err(EmitError::arity("operands", expect.len(), op.operands.len()));
        }
        for (position, (value, expect)) in op.operands.iter().zip(expect).enumerate() {
            self.check_operand(*value, position, *expect)?;
        }
        Ok(&op.operands)
    }

    fn check_operand(&self, value: ValueId, position: usize, expect: Expect) -> Result<(), EmitError> {
        let ty = self.ty(value);
        if expect.accepts(ty) {
            Ok(())
        } else {
            Err(EmitError::unsupported_type(
                ty,
                format!("operand {position} must be {}", expect.describe()),
            ))
        }
    }

    /// The single result of `op`.
    fn result(&self, op: &Operation) -> Result<ValueId, EmitError> {
        op.result().ok_or_else(|| EmitError::arity("results", 1, op.results.len()))
    }

    /// The single result of `op`, checked against `expect`.
    fn typed_result(&self, op: &Operation, expect: Expect) -> Result<ValueId, EmitError> {
        let result = self.result(op)?;
        let ty = self.ty(result);
        if expect.accepts(ty) {
            Ok(result)
        } else {
            Err(EmitError::unsupported_type(ty, format!("result must be {}", expect.describe())))
        }
    }

    fn no_results(&self, op: &Operation) -> Result<(), EmitError> {
        if op.results.is_empty() {
            Ok(())
        } else {
            Err(EmitError::arity("results", 0, op.results.len()))
        }
    }

    fn require_scheme(&self, op: &Operation, required: Scheme) -> Result<(), EmitError> {
        if self.scheme == required {
            Ok(())
        } else {
            Err(EmitError::SchemeMismatch {
                op: op.name().to_string(),
                required,
                active: self.scheme,
            })
        }
    }

    fn line(&mut self, text: String) {
        self.writer.writeln(&text);
    }
}
