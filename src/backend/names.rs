//! Variable naming for emitted code.
//!
//! [`NameTable`] assigns every value of a module a unique C++ identifier before any text is
//! written. Values are visited in program order (each function's parameters, then each
//! operation's results), so identical modules always get identical names.
//!
//! A value's `name_hint` is used when it is bindable and neither it nor any of its derived names
//! is taken; otherwise the value gets the next free `v<N>`. Derived names are the auxiliary
//! locals some operations declare next to their result (see [`CAST_SUFFIX`],
//! [`EVAL_KEY_MAP_SUFFIX`]), and are reserved together with the name itself so they can never
//! collide with another value.

use std::collections::HashSet;

use pke_core::cpp_keywords;
use pke_ir::{Module, ValueId};

/// Suffix of the packed-value temporary declared by a vector decode.
pub const CAST_SUFFIX: &str = "_cast";
/// Suffix of the key map declared by an automorphism.
pub const EVAL_KEY_MAP_SUFFIX: &str = "_evalkeymap";

const DERIVED_SUFFIXES: &[&str] = &[CAST_SUFFIX, EVAL_KEY_MAP_SUFFIX];

/// Identifier of every value in one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTable {
    names: Vec<String>,
}

impl NameTable {
    /// Name every value of `module`.
    #[tracing::instrument(skip_all, fields(values = module.values.len()))]
    pub fn new(module: &Module) -> Self {
        let mut assigner = Assigner {
            names: vec![None; module.values.len()],
            // Function names stay free of locals even when they are shadowable in C++.
            taken: module.functions.iter().map(|f| f.name.clone()).collect(),
            counter: 0,
        };

        for func in &module.functions {
            for &param in &func.params {
                assigner.assign(module, param);
            }
            for op_id in func.op_ids() {
                for &result in &module.op(op_id).results {
                    assigner.assign(module, result);
                }
            }
        }
        // Values no function reaches still get a name so the table stays total.
        for index in 0..module.values.len() {
            assigner.assign(module, ValueId(index as u32));
        }

        Self {
            names: assigner.names.into_iter().map(Option::unwrap_or_default).collect(),
        }
    }

    /// The identifier of `value`. Panics on a value from another module.
    pub fn name_of(&self, value: ValueId) -> &str {
        &self.names[value.index()]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ValueId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (ValueId(i as u32), name.as_str()))
    }
}

struct Assigner {
    names: Vec<Option<String>>,
    taken: HashSet<String>,
    counter: usize,
}

impl Assigner {
    fn assign(&mut self, module: &Module, value: ValueId) {
        let Some(slot) = self.names.get(value.index()) else {
            return;
        };
        if slot.is_some() {
            return;
        }

        let hinted = module.value(value).name_hint.as_deref().filter(|hint| {
            cpp_keywords::is_bindable(hint) && self.is_free(hint)
        });
        let name = match hinted {
            Some(hint) => hint.to_string(),
            None => self.fresh(),
        };

        for suffix in DERIVED_SUFFIXES {
            self.taken.insert(format!("{name}{suffix}"));
        }
        self.taken.insert(name.clone());
        self.names[value.index()] = Some(name);
    }

    fn is_free(&self, name: &str) -> bool {
        !self.taken.contains(name)
            && DERIVED_SUFFIXES
                .iter()
                .all(|suffix| !self.taken.contains(&format!("{name}{suffix}")))
    }

    fn fresh(&mut self) -> String {
        loop {
            let candidate = format!("v{}", self.counter);
            self.counter += 1;
            if self.is_free(&candidate) && !cpp_keywords::is_reserved(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pke_ir::{ModuleBuilder, OpKind, Type};

    fn add_module(hints: &[(usize, &str)]) -> Module {
        let mut builder = ModuleBuilder::new();
        let mut f = builder.function(
            "add",
            vec![Type::CryptoContext, Type::Ciphertext, Type::Ciphertext],
            vec![Type::Ciphertext],
        );
        for (index, hint) in hints {
            let param = f.param(*index);
            f.hint(param, *hint);
        }
        let (cc, a, b) = (f.param(0), f.param(1), f.param(2));
        let sum = f.op1(OpKind::Add, &[cc, a, b], Type::Ciphertext);
        f.ret(sum);
        f.finish();
        builder.finish()
    }

    #[test]
    fn test_sequential_names_in_program_order() {
        let names = NameTable::new(&add_module(&[]));
        let all: Vec<&str> = names.iter().map(|(_, n)| n).collect();
        assert_eq!(all, vec!["v0", "v1", "v2", "v3"]);
    }

    #[test]
    fn test_hints_are_used_when_bindable() {
        let names = NameTable::new(&add_module(&[(0, "cc"), (1, "lhs")]));
        assert_eq!(names.name_of(ValueId(0)), "cc");
        assert_eq!(names.name_of(ValueId(1)), "lhs");
        assert_eq!(names.name_of(ValueId(2)), "v0");
    }

    #[test]
    fn test_reserved_and_duplicate_hints_fall_back() {
        let names = NameTable::new(&add_module(&[(0, "auto"), (1, "x"), (2, "x")]));
        assert_eq!(names.name_of(ValueId(0)), "v0");
        assert_eq!(names.name_of(ValueId(1)), "x");
        assert_eq!(names.name_of(ValueId(2)), "v1");
    }

    #[test]
    fn test_hint_colliding_with_derived_name_falls_back() {
        let names = NameTable::new(&add_module(&[(1, "v0_cast")]));
        // v0 is assigned first, which reserves v0_cast.
        assert_eq!(names.name_of(ValueId(0)), "v0");
        assert_eq!(names.name_of(ValueId(1)), "v1");
    }

    #[test]
    fn test_function_name_is_never_reused() {
        let names = NameTable::new(&add_module(&[(0, "add")]));
        assert_eq!(names.name_of(ValueId(0)), "v0");
    }

    #[test]
    fn test_generated_names_skip_hinted_ones() {
        let names = NameTable::new(&add_module(&[(0, "v1")]));
        assert_eq!(names.name_of(ValueId(0)), "v1");
        assert_eq!(names.name_of(ValueId(1)), "v0");
        assert_eq!(names.name_of(ValueId(2)), "v2");
    }

    #[test]
    fn test_names_are_unique() {
        let names = NameTable::new(&add_module(&[(0, "v3"), (2, "v0")]));
        let unique: HashSet<&str> = names.iter().map(|(_, n)| n).collect();
        assert_eq!(unique.len(), names.len());
    }
}
