//! Emission configuration
//!
//! Knobs that shape the emitted text without changing its meaning.

/// Default OpenFHE umbrella header.
pub const DEFAULT_OPENFHE_INCLUDE: &str = "openfhe/pke/openfhe.h";

/// Emission configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Header path spliced into the prelude's `#include`
    pub openfhe_include: String,
    /// Whether module emission starts with the scheme prelude
    pub emit_prelude: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            openfhe_include: DEFAULT_OPENFHE_INCLUDE.to_string(),
            emit_prelude: true,
        }
    }
}

impl EmitConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the OpenFHE header path
    pub fn with_openfhe_include(mut self, include: impl Into<String>) -> Self {
        self.openfhe_include = include.into();
        self
    }

    /// Enable or disable the prelude
    pub fn with_prelude(mut self, emit: bool) -> Self {
        self.emit_prelude = emit;
        self
    }
}
