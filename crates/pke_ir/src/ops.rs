//! Operation kinds.
//!
//! [`OpKind`] is the closed set of operations the emitter understands, each carrying the attributes its kind
//! requires. Kinds introduced upstream that this crate does not model are carried as
//! [`OpKind::Unregistered`] so they can still be loaded, verified and reported precisely.

use serde::{Deserialize, Serialize};

use crate::constant::ConstantAttr;

/// Operation kind with per-kind attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OpKind {
    // Ciphertext evaluation (operand 0 is the crypto context)
    Add,
    AddPlain,
    Sub,
    MulNoRelin,
    Mul,
    MulPlain,
    MulConst,
    Negate,
    Square,
    Relin,
    ModReduce,
    LevelReduce,
    KeySwitch,
    Rot {
        index: i64,
    },
    Automorph,
    Encrypt,
    Decrypt,

    // Parameter, context and key generation
    GenParams {
        mul_depth: i64,
        #[serde(default)]
        plain_mod: Option<i64>,
    },
    GenContext,
    GenMulKey,
    GenRotKey {
        indices: Vec<i64>,
    },

    // Encoding (the crypto context is implicit)
    MakePackedPlaintext,
    MakeCkksPackedPlaintext,
    Decode,
    ReinterpretUnderlyingType,

    // Scalar arithmetic
    Constant {
        value: ConstantAttr,
    },
    ExtSi,
    ExtF,
    IndexCast,

    // Tensors
    Empty,
    Extract,
    Insert,
    Splat,

    Return,

    /// Any kind outside the modeled set, by its fully qualified name.
    Unregistered {
        name: String,
    },
}

impl OpKind {
    /// Fully qualified operation name, as printed in the textual IR and in diagnostics.
    pub fn mnemonic(&self) -> &str {
        match self {
            OpKind::Add => "openfhe.add",
            OpKind::AddPlain => "openfhe.add_plain",
            OpKind::Sub => "openfhe.sub",
            OpKind::MulNoRelin => "openfhe.mul_no_relin",
            OpKind::Mul => "openfhe.mul",
            OpKind::MulPlain => "openfhe.mul_plain",
            OpKind::MulConst => "openfhe.mul_const",
            OpKind::Negate => "openfhe.negate",
            OpKind::Square => "openfhe.square",
            OpKind::Relin => "openfhe.relin",
            OpKind::ModReduce => "openfhe.mod_reduce",
            OpKind::LevelReduce => "openfhe.level_reduce",
            OpKind::KeySwitch => "openfhe.key_switch",
            OpKind::Rot { .. } => "openfhe.rot",
            OpKind::Automorph => "openfhe.automorph",
            OpKind::Encrypt => "openfhe.encrypt",
            OpKind::Decrypt => "openfhe.decrypt",
            OpKind::GenParams { .. } => "openfhe.gen_params",
            OpKind::GenContext => "openfhe.gen_context",
            OpKind::GenMulKey => "openfhe.gen_mulkey",
            OpKind::GenRotKey { .. } => "openfhe.gen_rotkey",
            OpKind::MakePackedPlaintext => "openfhe.make_packed_plaintext",
            OpKind::MakeCkksPackedPlaintext => "openfhe.make_ckks_packed_plaintext",
            OpKind::Decode => "lwe.rlwe_decode",
            OpKind::ReinterpretUnderlyingType => "lwe.reinterpret_underlying_type",
            OpKind::Constant { .. } => "arith.constant",
            OpKind::ExtSi => "arith.extsi",
            OpKind::ExtF => "arith.extf",
            OpKind::IndexCast => "arith.index_cast",
            OpKind::Empty => "tensor.empty",
            OpKind::Extract => "tensor.extract",
            OpKind::Insert => "tensor.insert",
            OpKind::Splat => "tensor.splat",
            OpKind::Return => "func.return",
            OpKind::Unregistered { name } => name,
        }
    }

    /// Encode operations take their crypto context from the surrounding circuit instead of an operand.
    pub fn needs_implicit_context(&self) -> bool {
        matches!(self, OpKind::MakePackedPlaintext | OpKind::MakeCkksPackedPlaintext)
    }

    pub fn is_terminator(&self) -> bool {
        matches!(self, OpKind::Return)
    }
}
