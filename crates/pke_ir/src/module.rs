//! Module, function, block, operation and value definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::IrError;
use crate::ops::OpKind;
use crate::types::Type;

/// Index of a value in [`Module::values`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueId(pub u32);

/// Index of an operation in [`Module::ops`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpId(pub u32);

/// Index of a function in [`Module::functions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuncId(pub u32);

macro_rules! impl_index {
    ($($id:ident),*) => {
        $(
            impl $id {
                pub fn index(self) -> usize {
                    self.0 as usize
                }
            }
        )*
    };
}

impl_index!(ValueId, OpId, FuncId);

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// Source location carried from the upstream pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column,
        }
    }

    pub fn is_known(&self) -> bool {
        self.file.is_some()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file, self.line, self.column),
            None => write!(f, "<unknown>"),
        }
    }
}

/// Definition site of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueDef {
    /// The `index`-th parameter of function `func`.
    Param { func: FuncId, index: usize },
    /// The `index`-th result of operation `op`.
    Result { op: OpId, index: usize },
}

/// A typed SSA value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueInfo {
    pub ty: Type,
    pub def: ValueDef,
    /// Preferred identifier, if the producer had one (e.g. a source-level parameter name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_hint: Option<String>,
}

/// A single operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OpKind,
    #[serde(default)]
    pub operands: Vec<ValueId>,
    #[serde(default)]
    pub results: Vec<ValueId>,
    #[serde(default)]
    pub loc: Location,
    /// Crypto context this operation runs under when it has no context operand.
    ///
    /// Populated by [`crate::annotate::attach_implicit_contexts`] or by the producer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit_context: Option<ValueId>,
}

impl Operation {
    pub fn name(&self) -> &str {
        self.kind.mnemonic()
    }

    /// The single result, if the operation has exactly one.
    pub fn result(&self) -> Option<ValueId> {
        match self.results.as_slice() {
            [r] => Some(*r),
            _ => None,
        }
    }
}

/// Straight-line sequence of operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub ops: Vec<OpId>,
}

/// A function definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub params: Vec<ValueId>,
    pub result_types: Vec<Type>,
    pub blocks: Vec<Block>,
    /// Crypto context implied for the whole body, usually the first context-typed parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit_context: Option<ValueId>,
    #[serde(default)]
    pub loc: Location,
}

impl Function {
    /// Operation ids of every block, in program order.
    pub fn op_ids(&self) -> impl Iterator<Item = OpId> + '_ {
        self.blocks.iter().flat_map(|b| b.ops.iter().copied())
    }
}

/// The unit of translation: an ordered list of functions plus the arenas they index into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub functions: Vec<Function>,
    pub ops: Vec<Operation>,
    pub values: Vec<ValueInfo>,
    #[serde(default)]
    pub loc: Location,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserialize a module from JSON and verify it.
    #[tracing::instrument(skip_all, fields(len = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, IrError> {
        let module: Module = serde_json::from_str(json)?;
        crate::verify::verify(&module)?;
        tracing::debug!(
            functions = module.functions.len(),
            ops = module.ops.len(),
            values = module.values.len(),
            "loaded module"
        );
        Ok(module)
    }

    pub fn to_json_pretty(&self) -> Result<String, IrError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up an operation. Panics on an id from another module.
    pub fn op(&self, id: OpId) -> &Operation {
        &self.ops[id.index()]
    }

    /// Look up a value. Panics on an id from another module.
    pub fn value(&self, id: ValueId) -> &ValueInfo {
        &self.values[id.index()]
    }

    pub fn value_type(&self, id: ValueId) -> &Type {
        &self.value(id).ty
    }

    pub fn function(&self, id: FuncId) -> &Function {
        &self.functions[id.index()]
    }

    /// The operation producing `value`, or `None` for a function parameter.
    pub fn defining_op(&self, value: ValueId) -> Option<OpId> {
        match self.value(value).def {
            ValueDef::Result { op, .. } => Some(op),
            ValueDef::Param { .. } => None,
        }
    }

    pub fn function_ids(&self) -> impl Iterator<Item = FuncId> + '_ {
        (0..self.functions.len()).map(|i| FuncId(i as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        assert_eq!(Location::new("circuit.mlir", 3, 7).to_string(), "circuit.mlir:3:7");
        assert_eq!(Location::default().to_string(), "<unknown>");
    }

    #[test]
    fn test_operation_single_result() {
        let op = Operation {
            kind: OpKind::Add,
            operands: vec![],
            results: vec![ValueId(4)],
            loc: Location::default(),
            implicit_context: None,
        };
        assert_eq!(op.result(), Some(ValueId(4)));
        assert_eq!(op.name(), "openfhe.add");
    }

    #[test]
    fn test_value_def_json() {
        let def: ValueDef = serde_json::from_str(r#"{"kind":"param","func":0,"index":2}"#).unwrap();
        assert_eq!(
            def,
            ValueDef::Param {
                func: FuncId(0),
                index: 2
            }
        );
    }
}
