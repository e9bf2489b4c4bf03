//! Output writer with indentation tracking
//!
//! Owns the text buffer and the indentation cursor for one translation. A [`Scope`] from
//! [`CodeWriter::push_scope`] restores the exact entry level when popped, and
//! [`CodeWriter::checkpoint`]/[`CodeWriter::rollback`] let a caller discard a statement that
//! failed halfway through.

/// Writer that tracks indentation and builds the emitted source
#[derive(Debug)]
pub struct CodeWriter {
    /// The output buffer
    output: String,
    /// Current indentation level
    indent_level: usize,
    /// Spaces per indentation level
    indent_width: usize,
    /// Whether we're at the start of a line
    at_line_start: bool,
}

/// Indentation level to return to when a scope ends.
#[derive(Debug)]
#[must_use = "a scope must be popped"]
pub struct Scope {
    level: usize,
}

/// Saved writer position, see [`CodeWriter::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    len: usize,
    indent_level: usize,
    at_line_start: bool,
}

impl CodeWriter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_width,
            at_line_start: true,
        }
    }

    /// Get the emitted output
    pub fn finish(self) -> String {
        self.output
    }

    /// Increase indentation level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn write_indent(&mut self) {
        if self.at_line_start {
            let width = self.indent_level * self.indent_width;
            self.output.extend(std::iter::repeat_n(' ', width));
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent)
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.output.push_str(s);
    }

    /// Write a string and newline
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    /// Write just a newline
    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Write multiple blank lines
    pub fn blank_lines(&mut self, count: usize) {
        for _ in 0..count {
            self.newline();
        }
    }

    /// Write pre-formatted text verbatim, line by line, at the current indentation.
    pub fn write_lines(&mut self, text: &str) {
        for line in text.lines() {
            self.writeln(line);
        }
    }

    /// Remember the current position.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            len: self.output.len(),
            indent_level: self.indent_level,
            at_line_start: self.at_line_start,
        }
    }

    /// Discard everything written since `checkpoint` and restore its indentation.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.output.truncate(checkpoint.len);
        self.indent_level = checkpoint.indent_level;
        self.at_line_start = checkpoint.at_line_start;
    }

    /// Enter an indented scope. Hand the returned [`Scope`] to [`CodeWriter::pop_scope`] on every exit path.
    pub fn push_scope(&mut self) -> Scope {
        let scope = Scope {
            level: self.indent_level,
        };
        self.indent();
        scope
    }

    /// Leave `scope`, restoring the level it was entered at regardless of unbalanced indents inside it.
    pub fn pop_scope(&mut self, scope: Scope) {
        self.indent_level = scope.level;
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Write tests
    // ========================================

    #[test]
    fn test_new_writer_empty_output() {
        let writer = CodeWriter::default();
        assert_eq!(writer.finish(), "");
    }

    #[test]
    fn test_write_empty_string() {
        let mut writer = CodeWriter::default();
        writer.indent();
        writer.write("");
        assert_eq!(writer.finish(), "");
    }

    #[test]
    fn test_writeln_multiple() {
        let mut writer = CodeWriter::default();
        writer.writeln("line1");
        writer.writeln("line2");
        assert_eq!(writer.finish(), "line1\nline2\n");
    }

    #[test]
    fn test_write_lines_indents_each_line() {
        let mut writer = CodeWriter::new(2);
        writer.indent();
        writer.write_lines("a;\nb;\n");
        assert_eq!(writer.finish(), "  a;\n  b;\n");
    }

    // ========================================
    // Indent tests
    // ========================================

    #[test]
    fn test_indent_width_4() {
        let mut writer = CodeWriter::new(4);
        writer.indent();
        writer.write("text");
        assert_eq!(writer.finish(), "    text");
    }

    // ========================================
    // Scope tests
    // ========================================

    #[test]
    fn test_scope_indents_body() {
        let mut writer = CodeWriter::new(2);
        writer.writeln("int f() {");
        let scope = writer.push_scope();
        writer.writeln("return 0;");
        writer.pop_scope(scope);
        writer.writeln("}");
        assert_eq!(writer.finish(), "int f() {\n  return 0;\n}\n");
    }

    #[test]
    fn test_nested_scopes() {
        let mut writer = CodeWriter::new(2);
        let outer = writer.push_scope();
        let inner = writer.push_scope();
        writer.writeln("c;");
        writer.pop_scope(inner);
        writer.writeln("b;");
        writer.pop_scope(outer);
        writer.writeln("a;");
        assert_eq!(writer.finish(), "    c;\n  b;\na;\n");
    }

    #[test]
    fn test_pop_restores_unbalanced_indent() {
        let mut writer = CodeWriter::new(2);
        let scope = writer.push_scope();
        writer.indent();
        writer.indent();
        writer.pop_scope(scope);
        writer.writeln("a;");
        assert_eq!(writer.finish(), "a;\n");
    }

    // ========================================
    // Checkpoint tests
    // ========================================

    #[test]
    fn test_rollback_discards_partial_statement() {
        let mut writer = CodeWriter::new(2);
        writer.writeln("keep;");
        let mark = writer.checkpoint();
        writer.indent();
        writer.write("const auto& x = ");
        writer.rollback(mark);
        writer.writeln("next;");
        assert_eq!(writer.finish(), "keep;\nnext;\n");
    }

    #[test]
    fn test_rollback_to_current_is_noop() {
        let mut writer = CodeWriter::new(2);
        writer.write("x");
        let mark = writer.checkpoint();
        writer.rollback(mark);
        assert_eq!(writer.finish(), "x");
    }
}
