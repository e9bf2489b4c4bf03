//! OpenFHE PKE backend
//!
//! This module translates a verified circuit module into OpenFHE C++ source text.
//!
//! The pipeline is:
//! 1. Name every value ([`NameTable`]) before any text is written
//! 2. Print the scheme prelude
//! 3. Emit each function: signature, then its operations in program order through the dispatcher
//!
//! ## Module Organization
//!
//! - `emit/` - The dispatcher and its per-kind arms
//! - `types.rs` - IR type → C++ spelling
//! - `names.rs` - Deterministic value naming
//! - `context.rs` - Implicit crypto-context resolution
//! - `writer.rs` - Indentation-aware output buffer
//! - `errors.rs` - Emission errors and diagnostics

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod context;
mod emit;
pub mod errors;
pub mod names;
pub mod types;
pub mod writer;

pub use context::resolve_context;
pub use errors::{EmitError, TranslationError};
pub use names::NameTable;
pub use types::convert_type;
pub use writer::CodeWriter;

use pke_core::Scheme;
use pke_ir::Module;

use crate::config::EmitConfig;
use emit::Emitter;

/// Translate `module` to OpenFHE C++ under `scheme` with the default configuration.
///
/// The module must be verified (see [`pke_ir::verify`]); modules loaded with
/// [`pke_ir::Module::from_json`] always are.
pub fn translate(module: &Module, scheme: Scheme) -> Result<String, TranslationError> {
    translate_with_config(module, scheme, &EmitConfig::default())
}

/// Translate `module` to OpenFHE C++ under `scheme`.
///
/// Translation is all or nothing: the first operation that cannot be translated aborts it and
/// is reported in the returned [`TranslationError`].
#[tracing::instrument(skip_all, fields(scheme = %scheme, functions = module.functions.len(), ops = module.ops.len()))]
pub fn translate_with_config(module: &Module, scheme: Scheme, config: &EmitConfig) -> Result<String, TranslationError> {
    let mut emitter = Emitter::new(module, scheme, config);
    match emitter.emit_module() {
        Ok(()) => {
            let output = emitter.finish();
            tracing::debug!(bytes = output.len(), "translation finished");
            Ok(output)
        }
        Err(err) => {
            tracing::debug!(error = %err, "translation failed");
            Err(err)
        }
    }
}
