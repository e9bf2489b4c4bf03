//! Crypto-context resolution for operations without a context operand.
//!
//! The annotation recorded by [`pke_ir::attach_implicit_contexts`] answers in constant time.
//! Without one, a breadth-first worklist walks backward through operand definitions:
//! - a value of type `CryptoContext` is the answer,
//! - an operation result defers to its defining operation's annotation, then that operation's operands,
//! - a function parameter defers to the function's declared implicit context, else its first context parameter.
//!
//! When the walk runs dry, the enclosing function's context answers.
//!
//! The visited set bounds the walk by the size of the def-use graph.

use std::collections::{HashSet, VecDeque};

use pke_ir::{FuncId, Module, OpId, Type, ValueDef, ValueId};

use super::errors::EmitError;

/// Find the crypto context operation `op_id` runs under.
pub fn resolve_context(module: &Module, op_id: OpId) -> Result<ValueId, EmitError> {
    let op = module.op(op_id);
    if let Some(ctx) = op.implicit_context {
        tracing::trace!(op = op_id.0, context = %ctx, "context from annotation");
        return Ok(ctx);
    }

    let mut worklist: VecDeque<ValueId> = op.operands.iter().copied().collect();
    let mut visited: HashSet<ValueId> = HashSet::new();

    while let Some(value) = worklist.pop_front() {
        if !visited.insert(value) {
            continue;
        }
        let info = module.value(value);
        if info.ty == Type::CryptoContext {
            tracing::trace!(op = op_id.0, context = %value, visited = visited.len(), "context from def-use walk");
            return Ok(value);
        }
        match info.def {
            ValueDef::Result { op, .. } => {
                let def = module.op(op);
                if let Some(ctx) = def.implicit_context {
                    return Ok(ctx);
                }
                worklist.extend(def.operands.iter().copied().filter(|v| !visited.contains(v)));
            }
            ValueDef::Param { func, .. } => {
                if let Some(ctx) = declared_context(module, func) {
                    return Ok(ctx);
                }
            }
        }
    }

    if let Some(ctx) = enclosing_function(module, op_id).and_then(|func| declared_context(module, func)) {
        tracing::trace!(op = op_id.0, context = %ctx, "context from enclosing function");
        return Ok(ctx);
    }

    tracing::debug!(op = op_id.0, visited = visited.len(), "no crypto context reachable");
    Err(EmitError::MissingContext)
}

/// The function's annotated context, else its first context-typed parameter.
fn declared_context(module: &Module, func: FuncId) -> Option<ValueId> {
    let function = module.function(func);
    function.implicit_context.or_else(|| {
        function
            .params
            .iter()
            .copied()
            .find(|p| *module.value_type(*p) == Type::CryptoContext)
    })
}

fn enclosing_function(module: &Module, op_id: OpId) -> Option<FuncId> {
    module
        .function_ids()
        .find(|func| module.function(*func).op_ids().any(|id| id == op_id))
}
