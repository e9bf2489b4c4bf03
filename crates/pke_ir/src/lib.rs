//! Straight-line IR for FHE circuits, as consumed by the OpenFHE PKE emitter.
//!
//! The IR is an arena: a [`Module`] owns every [`Operation`] and every value ([`ValueInfo`]) and refers to them by
//! index ([`OpId`], [`ValueId`]). Functions own ordered blocks of operation ids. Values are in SSA form: each one has
//! exactly one definition site, either a function parameter or an operation result.
//!
//! ## Notes
//! - This crate does not translate anything. It models, builds, loads, verifies and annotates.
//! - A module loaded from JSON is always verified ([`Module::from_json`]); the emitter indexes the arena directly and
//!   relies on that.
//!
//! ## Examples
//! ```rust
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
//! let module = builder.finish();
//! assert!(pke_ir::verify(&module).is_ok());
//! ```

pub mod annotate;
pub mod builder;
pub mod constant;
pub mod errors;
pub mod module;
pub mod ops;
pub mod types;
pub mod verify;

pub use annotate::attach_implicit_contexts;
pub use builder::{FunctionBuilder, ModuleBuilder};
pub use constant::{ConstantAttr, DenseElements, Scalar};
pub use errors::IrError;
pub use module::{Block, FuncId, Function, Location, Module, OpId, Operation, ValueDef, ValueId, ValueInfo};
pub use ops::OpKind;
pub use types::Type;
pub use verify::verify;
