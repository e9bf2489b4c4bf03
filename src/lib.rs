#![forbid(unsafe_code)]
//! OpenFHE PKE code emitter
//!
//! Translates straight-line FHE circuits ([`pke_ir::Module`]) into C++ source that calls the
//! OpenFHE public-key encryption API, for either the BGV or the CKKS scheme.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **Arena lookups**: value and operation ids index the module directly. An id from another module is a caller bug
//!   and panics; modules from [`pke_ir::Module::from_json`] are verified so this never happens for loaded input.
//!
//! ## Examples
//! ```rust
//! use pke_emit::{Scheme, translate};
//! use pke_ir::{ModuleBuilder, OpKind, Type};
//!
//! let mut builder = ModuleBuilder::new();
//! let mut f = builder.function(
//!     "add",
//!     vec![Type::CryptoContext, Type::Ciphertext, Type::Ciphertext],
//!     vec![Type::Ciphertext],
//! );
//! let (cc, a, b) = (f.param(0), f.param(1), f.param(2));
//! let sum = f.op1(OpKind::Add, &[cc, a, b], Type::Ciphertext);
//! f.ret(sum);
//! f.finish();
//!
//! let cpp = translate(&builder.finish(), Scheme::Bgv).unwrap();
//! assert!(cpp.contains("const auto& v3 = v0->EvalAdd(v1, v2);"));
//! ```

pub mod backend;
pub mod cli;
pub mod config;

pub use backend::{EmitError, TranslationError, translate, translate_with_config};
pub use config::EmitConfig;
pub use pke_core::Scheme;
