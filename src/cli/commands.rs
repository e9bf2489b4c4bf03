//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use pke_core::Scheme;
use pke_core::scheme::SCHEMES;
use pke_ir::Module;

use super::{CliError, CliResult, ExitCode};
use crate::backend::translate_with_config;
use crate::config::EmitConfig;

/// Maximum module file size (100 MB)
///
/// Files larger than this are rejected before they are read.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read module file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Module file '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))
}

/// Load, verify and annotate a module.
///
/// Operations that need an implicit context but carry none get the nearest one attached before translation.
pub fn load_module(path: &Path) -> CliResult<Module> {
    let source = read_source(path)?;
    let mut module = Module::from_json(&source)
        .map_err(|e| CliError::failure(format!("Error loading '{}': {}", path.display(), e)))?;
    let attached = pke_ir::attach_implicit_contexts(&mut module);
    tracing::debug!(attached, path = %path.display(), "annotated implicit contexts");
    Ok(module)
}

/// Translate `path` and write the C++ to `output` (or stdout).
pub fn emit_file(path: &Path, scheme: Scheme, config: &EmitConfig, output: Option<&Path>) -> CliResult<ExitCode> {
    let module = load_module(path)?;
    let code = translate_with_config(&module, scheme, config).map_err(CliError::diagnostic)?;

    match output {
        Some(out) => {
            fs::write(out, &code)
                .map_err(|e| CliError::failure(format!("Error writing '{}': {}", out.display(), e)))?;
            tracing::info!(path = %out.display(), bytes = code.len(), "wrote translation");
        }
        None => print!("{code}"),
    }
    Ok(ExitCode::SUCCESS)
}

/// Verify `path` and check that it translates under `scheme`, discarding the output.
pub fn check_file(path: &Path, scheme: Scheme) -> CliResult<ExitCode> {
    let module = load_module(path)?;
    translate_with_config(&module, scheme, &EmitConfig::default()).map_err(CliError::diagnostic)?;
    println!(
        "✓ {} translates under {} ({} functions, {} operations)",
        path.display(),
        scheme,
        module.functions.len(),
        module.ops.len()
    );
    Ok(ExitCode::SUCCESS)
}

/// Print every supported scheme with its aliases.
pub fn list_schemes() -> CliResult<ExitCode> {
    for info in SCHEMES {
        println!("{:<6} {} (aliases: {})", info.canonical, info.description, info.aliases.join(", "));
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pke_ir::{ModuleBuilder, OpKind, Type};

    fn unique_temp_path(stem: &str, ext: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("pke_emit_cli_{stem}_{}_{id}.{ext}", std::process::id()))
    }

    fn write_module(module: &Module) -> PathBuf {
        let path = unique_temp_path("module", "json");
        fs::write(&path, module.to_json_pretty().unwrap()).unwrap();
        path
    }

    fn negate_module() -> Module {
        let mut builder = ModuleBuilder::new();
        let mut f = builder.function(
            "negate",
            vec![Type::CryptoContext, Type::Ciphertext],
            vec![Type::Ciphertext],
        );
        let (cc, ct) = (f.param(0), f.param(1));
        let neg = f.op1(OpKind::Negate, &[cc, ct], Type::Ciphertext);
        f.ret(neg);
        f.finish();
        builder.finish()
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.message.contains("Cannot access file"));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn test_load_module_rejects_bad_json() {
        let path = unique_temp_path("bad", "json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_module(&path).unwrap_err();
        assert!(err.message.contains("invalid module JSON"), "{}", err.message);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_emit_file_writes_output() {
        let input = write_module(&negate_module());
        let output = unique_temp_path("out", "cpp");
        let config = EmitConfig::new().with_prelude(false);

        let code = emit_file(&input, Scheme::Bgv, &config, Some(&output)).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("CiphertextT negate(CryptoContextT v0, CiphertextT v1) {"));
        assert!(written.contains("const auto& v2 = v0->EvalNegate(v1);"));

        let _ = fs::remove_file(&input);
        let _ = fs::remove_file(&output);
    }

    #[test]
    fn test_check_file_reports_translation_failure() {
        let mut builder = ModuleBuilder::new();
        let mut f = builder.function("bad", vec![Type::Ciphertext], vec![Type::Ciphertext]);
        let ct = f.param(0);
        let kind = OpKind::Unregistered {
            name: "openfhe.bootstrap".to_string(),
        };
        let out = f.op1(kind, &[ct], Type::Ciphertext);
        f.ret(out);
        f.finish();
        let input = write_module(&builder.finish());

        let err = check_file(&input, Scheme::Bgv).unwrap_err();
        assert!(err.message.contains("openfhe.bootstrap"), "{}", err.message);

        let _ = fs::remove_file(&input);
    }

    #[test]
    fn test_list_schemes_succeeds() {
        assert_eq!(list_schemes().unwrap(), ExitCode::SUCCESS);
    }
}
