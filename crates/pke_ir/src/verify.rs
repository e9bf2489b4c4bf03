//! Structural verification of a module.
//!
//! Checks the invariants the emitter indexes on without re-checking:
//! - every id is in range of its arena,
//! - every value has exactly one definition site, and that site agrees with its [`ValueDef`],
//! - every operation sits in exactly one block and uses only values defined earlier in the same function,
//! - `func.return` only appears last, and ends every function that declares a result,
//! - implicit-context references point at a crypto context in scope.

use std::collections::HashSet;

use crate::errors::IrError;
use crate::module::{FuncId, Module, OpId, ValueDef, ValueId};
use crate::types::Type;

/// Verify `module`, returning the first violation found.
pub fn verify(module: &Module) -> Result<(), IrError> {
    let mut defined = vec![false; module.values.len()];
    let mut placements = vec![0usize; module.ops.len()];

    for value in &module.values {
        match value.def {
            ValueDef::Param { func, .. } if func.index() >= module.functions.len() => {
                return Err(IrError::DanglingId {
                    what: "function",
                    id: func.0,
                    len: module.functions.len(),
                });
            }
            ValueDef::Result { op, .. } if op.index() >= module.ops.len() => {
                return Err(IrError::dangling_op(op, module.ops.len()));
            }
            _ => {}
        }
    }

    for (fi, func) in module.functions.iter().enumerate() {
        let func_id = FuncId(fi as u32);
        let mut scope: HashSet<ValueId> = HashSet::new();

        for (index, &param) in func.params.iter().enumerate() {
            check_value(module, param)?;
            define(module, &mut defined, param, ValueDef::Param { func: func_id, index })?;
            scope.insert(param);
        }

        if let Some(ctx) = func.implicit_context {
            check_context(module, &scope, ctx, || format!("function @{}", func.name))?;
        }

        let op_ids: Vec<OpId> = func.op_ids().collect();
        for (pos, &op_id) in op_ids.iter().enumerate() {
            if op_id.index() >= module.ops.len() {
                return Err(IrError::dangling_op(op_id, module.ops.len()));
            }
            placements[op_id.index()] += 1;
            if placements[op_id.index()] > 1 {
                return Err(IrError::Misplaced(op_id.0));
            }

            let op = module.op(op_id);
            if op.kind.is_terminator() && pos + 1 != op_ids.len() {
                return Err(IrError::MisplacedTerminator {
                    op: op_id.0,
                    name: op.name().to_string(),
                });
            }

            for &operand in &op.operands {
                check_value(module, operand)?;
                if !scope.contains(&operand) {
                    return Err(IrError::UseBeforeDef {
                        op: op_id.0,
                        name: op.name().to_string(),
                        value: operand,
                    });
                }
            }

            if let Some(ctx) = op.implicit_context {
                check_context(module, &scope, ctx, || format!("operation #{} ({})", op_id.0, op.name()))?;
            }

            for (index, &result) in op.results.iter().enumerate() {
                check_value(module, result)?;
                define(module, &mut defined, result, ValueDef::Result { op: op_id, index })?;
                scope.insert(result);
            }
        }

        let returns = op_ids.last().is_some_and(|last| module.op(*last).kind.is_terminator());
        if !func.result_types.is_empty() && !returns {
            return Err(IrError::MissingReturn(func.name.clone()));
        }
    }

    if let Some(pos) = defined.iter().position(|d| !d) {
        return Err(IrError::Undefined(ValueId(pos as u32)));
    }
    if let Some(pos) = placements.iter().position(|p| *p != 1) {
        return Err(IrError::Misplaced(pos as u32));
    }
    Ok(())
}

fn check_value(module: &Module, id: ValueId) -> Result<(), IrError> {
    if id.index() >= module.values.len() {
        return Err(IrError::dangling_value(id, module.values.len()));
    }
    Ok(())
}

fn define(module: &Module, defined: &mut [bool], id: ValueId, site: ValueDef) -> Result<(), IrError> {
    if defined[id.index()] || module.value(id).def != site {
        return Err(IrError::Redefined(id));
    }
    defined[id.index()] = true;
    Ok(())
}

fn check_context(
    module: &Module,
    scope: &HashSet<ValueId>,
    ctx: ValueId,
    owner: impl FnOnce() -> String,
) -> Result<(), IrError> {
    check_value(module, ctx)?;
    if !scope.contains(&ctx) || *module.value_type(ctx) != Type::CryptoContext {
        return Err(IrError::BadImplicitContext { owner: owner(), value: ctx });
    }
    Ok(())
}
