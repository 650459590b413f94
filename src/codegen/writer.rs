//! Indentation-aware text buffer for generated C++.

/// Accumulates generated code with tab indentation.
///
/// Lines are indented lazily, when their first fragment is written, so a line can be
/// assembled from several [`CodeWriter::write`] calls. Empty lines carry no indentation.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buffer: String,
    indent: usize,
    needs_indent: bool,
}

impl CodeWriter {
    /// Create an empty writer at indentation level 0
    #[must_use]
    pub fn new() -> Self {
        CodeWriter {
            buffer: String::new(),
            indent: 0,
            needs_indent: true,
        }
    }

    /// Create an empty writer starting at `indent`
    #[must_use]
    pub fn with_indent(indent: usize) -> Self {
        CodeWriter {
            indent,
            ..CodeWriter::new()
        }
    }

    fn pad(&mut self) {
        if self.needs_indent {
            for _ in 0..self.indent {
                self.buffer.push('\t');
            }
            self.needs_indent = false;
        }
    }

    /// Append a fragment to the current line
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.pad();
        self.buffer.push_str(text);
    }

    /// Append a fragment and terminate the line
    pub fn write_line(&mut self, text: &str) {
        if !text.is_empty() {
            self.pad();
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
        self.needs_indent = true;
    }

    /// Terminate the current line, or write an empty line
    pub fn blank_line(&mut self) {
        self.write_line("");
    }

    /// Open a block: ` {` after a fragment, `{` on its own line otherwise
    pub fn open_bracket(&mut self) {
        if self.needs_indent {
            self.pad();
            self.buffer.push('{');
        } else {
            self.buffer.push_str(" {");
        }
        self.buffer.push('\n');
        self.needs_indent = true;
        self.indent += 1;
    }

    /// Close a block, appending `suffix` after the brace (`;` for class bodies)
    pub fn close_bracket(&mut self, suffix: &str) {
        if !self.needs_indent {
            self.buffer.push('\n');
            self.needs_indent = true;
        }
        self.indent = self.indent.saturating_sub(1);
        self.pad();
        self.buffer.push('}');
        self.buffer.push_str(suffix);
        self.buffer.push('\n');
        self.needs_indent = true;
    }

    /// Write a line without the current indentation (access specifiers)
    pub fn write_unindented(&mut self, text: &str) {
        let saved = self.indent;
        self.indent = self.indent.saturating_sub(1);
        self.write_line(text);
        self.indent = saved;
    }

    /// Append the output of another writer, starting on a fresh line
    pub fn append(&mut self, other: CodeWriter) {
        self.append_text(&other.buffer);
    }

    /// Append pre-rendered lines verbatim, starting on a fresh line
    pub fn append_text(&mut self, text: &str) {
        if !self.needs_indent {
            self.buffer.push('\n');
        }
        self.buffer.push_str(text);
        self.needs_indent = true;
    }

    /// Current indentation level
    #[must_use]
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Returns true if nothing has been written
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the writer and return the text
    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }
}
