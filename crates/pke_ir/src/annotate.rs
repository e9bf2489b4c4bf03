//! Implicit crypto-context annotation.
//!
//! Encode operations (`openfhe.make_packed_plaintext` and its CKKS variant) have no context operand. This pass records
//! which context they run under so the emitter can answer the question in constant time:
//! - a function without a declared context gets its first context-typed parameter,
//! - an encode operation without an annotation gets the function's declared context, or failing that the nearest
//!   context value defined before it in the same function.
//!
//! Existing annotations are never overwritten. The module must already be verified.

use crate::module::{Module, OpId};
use crate::types::Type;

/// Attach implicit contexts in place. Returns the number of operations newly annotated.
#[tracing::instrument(skip_all, fields(functions = module.functions.len()))]
pub fn attach_implicit_contexts(module: &mut Module) -> usize {
    let mut attached = 0;

    for fi in 0..module.functions.len() {
        if module.functions[fi].implicit_context.is_none() {
            let first = module.functions[fi]
                .params
                .iter()
                .copied()
                .find(|p| module.values[p.index()].ty == Type::CryptoContext);
            module.functions[fi].implicit_context = first;
        }
        let declared = module.functions[fi].implicit_context;

        let mut nearest = None;
        let op_ids: Vec<OpId> = module.functions[fi].op_ids().collect();
        for op_id in op_ids {
            let op = &mut module.ops[op_id.index()];
            if op.kind.needs_implicit_context() && op.implicit_context.is_none() {
                if let Some(ctx) = declared.or(nearest) {
                    op.implicit_context = Some(ctx);
                    attached += 1;
                }
            }

            let op = &module.ops[op_id.index()];
            if let Some(ctx) = op
                .results
                .iter()
                .rev()
                .copied()
                .find(|r| module.values[r.index()].ty == Type::CryptoContext)
            {
                nearest = Some(ctx);
            }
        }
    }

    tracing::debug!(attached, "attached implicit contexts");
    attached
}
