//! Module and function emission.
//!
//! A module is the scheme prelude followed by one C++ function per IR function, separated by blank lines. A function
//! is a typed signature and its operations, in program order, inside an indented body.

use pke_core::cpp_keywords;
use pke_ir::{FuncId, Function, Operation};

use super::{Emitter, Expect};
use crate::backend::errors::{EmitError, TranslationError};

impl<'m> Emitter<'m> {
    /// Emit the whole module.
    #[tracing::instrument(skip_all, fields(functions = self.module.functions.len(), scheme = %self.scheme))]
    pub(crate) fn emit_module(&mut self) -> Result<(), TranslationError> {
        if self.config.emit_prelude {
            let prelude = self.scheme.prelude(&self.config.openfhe_include);
            self.writer.write_lines(&prelude);
        }
        let module = self.module;
        for (i, func_id) in module.function_ids().enumerate() {
            if self.config.emit_prelude || i > 0 {
                self.writer.blank_lines(1);
            }
            self.emit_function(func_id)?;
        }
        Ok(())
    }

    /// `RetT name(T0 a, T1 b) { ... }`
    #[tracing::instrument(skip_all, fields(function = %self.module.function(func_id).name))]
    fn emit_function(&mut self, func_id: FuncId) -> Result<(), TranslationError> {
        let module = self.module;
        let func = module.function(func_id);
        let wrap = |cause: EmitError| TranslationError::new(format!("func.func @{}", func.name), func.loc.clone(), cause);

        let signature = self.signature(func).map_err(wrap)?;
        self.writer.writeln(&format!("{signature} {{"));
        let scope = self.writer.push_scope();
        let body = func.op_ids().try_for_each(|op_id| self.emit_op(op_id));
        self.writer.pop_scope(scope);
        body?;
        self.writer.writeln("}");
        tracing::debug!(ops = func.op_ids().count(), "emitted function");
        Ok(())
    }

    fn signature(&self, func: &Function) -> Result<String, EmitError> {
        if !cpp_keywords::is_bindable(&func.name) {
            return Err(EmitError::InvalidSymbolName(func.name.clone()));
        }
        let ret = match func.result_types.as_slice() {
            [ty] => self.spell(ty)?,
            other => return Err(EmitError::arity("result types", 1, other.len())),
        };
        let params = func
            .params
            .iter()
            .map(|p| Ok(format!("{} {}", self.spell(self.ty(*p))?, self.name(*p))))
            .collect::<Result<Vec<_>, EmitError>>()?;
        Ok(format!("{ret} {}({})", func.name, params.join(", ")))
    }

    pub(super) fn emit_return(&mut self, op: &'m Operation) -> Result<(), EmitError> {
        let operands = self.operands(op, &[Expect::Any])?;
        self.no_results(op)?;
        self.line(format!("return {};", self.name(operands[0])));
        Ok(())
    }
}
