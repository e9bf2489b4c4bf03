//! Programmatic construction of modules.
//!
//! The builder appends to the arenas in program order, so anything it produces satisfies the def-before-use and
//! single-definition rules checked by [`crate::verify`]. Tests and the fuzz target construct their inputs this way.

use crate::constant::ConstantAttr;
use crate::module::{Block, FuncId, Function, Location, Module, OpId, Operation, ValueDef, ValueId, ValueInfo};
use crate::ops::OpKind;
use crate::types::Type;

/// Builds a [`Module`] one function at a time.
#[derive(Debug, Default)]
pub struct ModuleBuilder {
    module: Module,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new function. Its parameters are created immediately, in order.
    pub fn function(
        &mut self,
        name: impl Into<String>,
        params: Vec<Type>,
        result_types: Vec<Type>,
    ) -> FunctionBuilder<'_> {
        let func = FuncId(self.module.functions.len() as u32);
        let params = params
            .into_iter()
            .enumerate()
            .map(|(index, ty)| push_value(&mut self.module, ty, ValueDef::Param { func, index }))
            .collect();
        self.module.functions.push(Function {
            name: name.into(),
            params,
            result_types,
            blocks: vec![Block::default()],
            implicit_context: None,
            loc: Location::default(),
        });
        FunctionBuilder {
            module: &mut self.module,
            func,
            loc: Location::default(),
        }
    }

    pub fn finish(self) -> Module {
        self.module
    }
}

/// Appends operations to one function of a [`ModuleBuilder`].
#[derive(Debug)]
pub struct FunctionBuilder<'m> {
    module: &'m mut Module,
    func: FuncId,
    loc: Location,
}

impl<'m> FunctionBuilder<'m> {
    fn function_mut(&mut self) -> &mut Function {
        &mut self.module.functions[self.func.index()]
    }

    pub fn id(&self) -> FuncId {
        self.func
    }

    /// The `index`-th parameter.
    pub fn param(&self, index: usize) -> ValueId {
        self.module.function(self.func).params[index]
    }

    pub fn params(&self) -> Vec<ValueId> {
        self.module.function(self.func).params.clone()
    }

    /// Attach a preferred identifier to a value.
    pub fn hint(&mut self, value: ValueId, name: impl Into<String>) -> &mut Self {
        self.module.values[value.index()].name_hint = Some(name.into());
        self
    }

    /// Location stamped on the function (if set first) and on every following operation.
    pub fn at(&mut self, loc: Location) -> &mut Self {
        if self.module.function(self.func).blocks.iter().all(|b| b.ops.is_empty()) {
            self.function_mut().loc = loc.clone();
        }
        self.loc = loc;
        self
    }

    /// Declare the crypto context the function body runs under.
    pub fn implicit_context(&mut self, ctx: ValueId) -> &mut Self {
        self.function_mut().implicit_context = Some(ctx);
        self
    }

    /// Start a new block; later operations are appended to it.
    pub fn new_block(&mut self) -> &mut Self {
        self.function_mut().blocks.push(Block::default());
        self
    }

    /// Append an operation with the given result types and return its results.
    pub fn op(&mut self, kind: OpKind, operands: &[ValueId], result_types: Vec<Type>) -> Vec<ValueId> {
        let op = OpId(self.module.ops.len() as u32);
        let results: Vec<ValueId> = result_types
            .into_iter()
            .enumerate()
            .map(|(index, ty)| push_value(&mut *self.module, ty, ValueDef::Result { op, index }))
            .collect();
        self.module.ops.push(Operation {
            kind,
            operands: operands.to_vec(),
            results: results.clone(),
            loc: self.loc.clone(),
            implicit_context: None,
        });
        if let Some(block) = self.function_mut().blocks.last_mut() {
            block.ops.push(op);
        }
        results
    }

    /// Append a single-result operation.
    pub fn op1(&mut self, kind: OpKind, operands: &[ValueId], ty: Type) -> ValueId {
        self.op(kind, operands, vec![ty])[0]
    }

    /// Append an operation with no results.
    pub fn op0(&mut self, kind: OpKind, operands: &[ValueId]) -> OpId {
        self.op(kind, operands, vec![]);
        self.last_op()
    }

    pub fn constant(&mut self, value: ConstantAttr, ty: Type) -> ValueId {
        self.op1(OpKind::Constant { value }, &[], ty)
    }

    pub fn int_constant(&mut self, value: i64, ty: Type) -> ValueId {
        self.constant(ConstantAttr::Int { value }, ty)
    }

    /// Id of the most recently appended operation.
    pub fn last_op(&self) -> OpId {
        OpId(self.module.ops.len().saturating_sub(1) as u32)
    }

    /// Record the crypto context `op` runs under.
    pub fn annotate(&mut self, op: OpId, ctx: ValueId) -> &mut Self {
        self.module.ops[op.index()].implicit_context = Some(ctx);
        self
    }

    /// Terminate the function with `func.return value`.
    pub fn ret(&mut self, value: ValueId) -> OpId {
        self.op0(OpKind::Return, &[value])
    }

    pub fn ret_values(&mut self, values: &[ValueId]) -> OpId {
        self.op0(OpKind::Return, values)
    }

    pub fn finish(self) -> FuncId {
        self.func
    }
}

fn push_value(module: &mut Module, ty: Type, def: ValueDef) -> ValueId {
    let id = ValueId(module.values.len() as u32);
    module.values.push(ValueInfo {
        ty,
        def,
        name_hint: None,
    });
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::verify;

    #[test]
    fn test_builder_assigns_dense_ids() {
        let mut builder = ModuleBuilder::new();
        let mut f = builder.function("neg", vec![Type::CryptoContext, Type::Ciphertext], vec![Type::Ciphertext]);
        let (cc, ct) = (f.param(0), f.param(1));
        let out = f.op1(OpKind::Negate, &[cc, ct], Type::Ciphertext);
        let ret = f.ret(out);
        assert_eq!(f.finish(), FuncId(0));

        let module = builder.finish();
        assert_eq!(out, ValueId(2));
        assert_eq!(ret, OpId(1));
        assert_eq!(module.defining_op(out), Some(OpId(0)));
        assert_eq!(module.defining_op(cc), None);
        assert!(verify(&module).is_ok());
    }

    #[test]
    fn test_location_applies_to_function_and_ops() {
        let mut builder = ModuleBuilder::new();
        let mut f = builder.function("f", vec![Type::i64()], vec![Type::i64()]);
        f.at(Location::new("in.mlir", 1, 1));
        let x = f.param(0);
        f.ret(x);
        f.finish();

        let module = builder.finish();
        assert_eq!(module.functions[0].loc, Location::new("in.mlir", 1, 1));
        assert_eq!(module.ops[0].loc, Location::new("in.mlir", 1, 1));
    }

    #[test]
    fn test_multiple_blocks_stay_in_order() {
        let mut builder = ModuleBuilder::new();
        let mut f = builder.function("f", vec![], vec![Type::i64()]);
        let c = f.int_constant(1, Type::i64());
        f.new_block();
        f.ret(c);
        f.finish();

        let module = builder.finish();
        let ids: Vec<OpId> = module.functions[0].op_ids().collect();
        assert_eq!(ids, vec![OpId(0), OpId(1)]);
        assert!(verify(&module).is_ok());
    }
}
