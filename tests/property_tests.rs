//! Property-based tests for the emitter
//!
//! These tests use proptest to generate random straight-line ciphertext circuits and check the
//! invariants every translation must keep: output is deterministic, every value gets its own
//! name, and no statement references a name before it is introduced.

use std::collections::HashSet;

use pke_emit::backend::NameTable;
use pke_emit::{EmitConfig, Scheme, translate_with_config};
use pke_ir::{Module, ModuleBuilder, OpKind, Type, ValueId};
use proptest::prelude::*;

/// One randomly chosen evaluation step. Operand picks index into the values built so far.
#[derive(Debug, Clone)]
enum Step {
    Binary(u8, usize, usize),
    Unary(u8, usize),
    Rotate(i64, usize),
}

/// Hints that exercise the namer: keywords, API names, fresh-name look-alikes and derived-name clashes.
const HINTS: &[&str] = &["x", "y", "int", "v0", "v1", "cc", "x_cast", "main", "EvalAdd", "_Reserved", "out"];

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0u8..3, any::<usize>(), any::<usize>()).prop_map(|(k, a, b)| Step::Binary(k, a, b)),
        (0u8..3, any::<usize>()).prop_map(|(k, a)| Step::Unary(k, a)),
        (-8i64..8, any::<usize>()).prop_map(|(i, a)| Step::Rotate(i, a)),
    ]
}

fn circuit_strategy() -> impl Strategy<Value = (Vec<Step>, Vec<Option<usize>>)> {
    (
        prop::collection::vec(step_strategy(), 1..24),
        prop::collection::vec(prop::option::of(0..HINTS.len()), 0..32),
    )
}

/// Build a single-function circuit from `steps`, hinting values in creation order.
fn build_circuit(steps: &[Step], hints: &[Option<usize>]) -> Module {
    let mut builder = ModuleBuilder::new();
    let mut f = builder.function(
        "circuit",
        vec![Type::CryptoContext, Type::Ciphertext, Type::Ciphertext],
        vec![Type::Ciphertext],
    );
    let cc = f.param(0);
    let mut pool = vec![f.param(1), f.param(2)];

    for step in steps {
        let pick = |i: usize| pool[i % pool.len()];
        let value = match *step {
            Step::Binary(kind, a, b) => {
                let kind = match kind {
                    0 => OpKind::Add,
                    1 => OpKind::Sub,
                    _ => OpKind::Mul,
                };
                f.op1(kind, &[cc, pick(a), pick(b)], Type::Ciphertext)
            }
            Step::Unary(kind, a) => {
                let kind = match kind {
                    0 => OpKind::Negate,
                    1 => OpKind::Square,
                    _ => OpKind::Relin,
                };
                f.op1(kind, &[cc, pick(a)], Type::Ciphertext)
            }
            Step::Rotate(index, a) => f.op1(OpKind::Rot { index }, &[cc, pick(a)], Type::Ciphertext),
        };
        pool.push(value);
    }

    let last = *pool.last().expect("pool is never empty");
    f.ret(last);

    let mut all = vec![cc];
    all.extend(pool);
    for (value, hint) in all.iter().zip(hints) {
        if let Some(hint) = hint {
            f.hint(*value, HINTS[*hint]);
        }
    }
    f.finish();
    builder.finish()
}

fn emit(module: &Module) -> String {
    translate_with_config(module, Scheme::Bgv, &EmitConfig::new().with_prelude(false)).expect("translation failed")
}

/// Split a line into identifier-shaped tokens.
fn identifiers(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
}

// =============================================================================
// Translation properties
// =============================================================================

proptest! {
    /// Property: translating the same module twice gives byte-identical output
    #[test]
    fn translation_is_deterministic((steps, hints) in circuit_strategy()) {
        let module = build_circuit(&steps, &hints);
        prop_assert_eq!(emit(&module), emit(&module));
    }

    /// Property: distinct values never share a name, and no name is a reserved identifier
    #[test]
    fn names_are_unique((steps, hints) in circuit_strategy()) {
        let module = build_circuit(&steps, &hints);
        let table = NameTable::new(&module);
        let mut seen = HashSet::new();
        for (value, name) in table.iter() {
            prop_assert!(seen.insert(name.to_string()), "{} reuses `{}`", value, name);
            prop_assert!(pke_core::cpp_keywords::is_bindable(name), "`{}` is not bindable", name);
            prop_assert_ne!(name, "circuit");
        }
        prop_assert_eq!(seen.len(), module.values.len());
    }

    /// Property: every value name a statement references was introduced earlier
    #[test]
    fn names_are_defined_before_use((steps, hints) in circuit_strategy()) {
        let module = build_circuit(&steps, &hints);
        let table = NameTable::new(&module);
        let value_names: HashSet<&str> = table.iter().map(|(_, name)| name).collect();
        let cpp = emit(&module);
        let func = &module.functions[0];
        let mut defined: HashSet<&str> = func.params.iter().map(|p| table.name_of(*p)).collect();

        let body: Vec<&str> = cpp.lines().skip(1).filter(|l| *l != "}").collect();
        for line in body {
            let statement = line.trim_start();
            let (target, uses) = match statement.strip_prefix("const auto& ") {
                Some(rest) => match rest.split_once(" = ") {
                    Some((target, uses)) => (Some(target), uses),
                    None => (None, rest),
                },
                None => (None, statement),
            };
            for ident in identifiers(uses).filter(|t| value_names.contains(t)) {
                prop_assert!(defined.contains(ident), "`{}` used before definition in `{}`", ident, line);
            }
            if let Some(target) = target {
                prop_assert!(defined.insert(target), "`{}` defined twice", target);
            }
        }
    }

    /// Property: every operation's result name appears in the output exactly where it is bound
    #[test]
    fn every_result_is_bound_once((steps, hints) in circuit_strategy()) {
        let module = build_circuit(&steps, &hints);
        let table = NameTable::new(&module);
        let cpp = emit(&module);
        for op in &module.ops {
            if let Some(result) = op.result() {
                let binding = format!("const auto& {} = ", table.name_of(result));
                prop_assert_eq!(cpp.matches(&binding).count(), 1);
            }
        }
        let returned = module.ops.last().map(|op| op.operands[0]).unwrap_or(ValueId(0));
        let return_line = format!("  return {};", table.name_of(returned));
        prop_assert!(cpp.contains(&return_line));
    }
}
