/// Indentation-aware string builder for emitting C# source code.
///
/// The writer holds no depth of its own: every call takes the
/// `EmitContext` of the construct being written, and indentation is
/// applied from that context whenever a new line starts.
use super::context::EmitContext;
use crate::options::BracingStyle;

pub struct CodeWriter {
    buf: String,
    at_line_start: bool,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter {
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            at_line_start: true,
        }
    }

    /// Append text to the current line, indenting first if the line is new.
    pub fn write(&mut self, ctx: &EmitContext, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..ctx.depth {
                self.buf.push_str(&ctx.options.indent_string);
            }
            self.at_line_start = false;
        }
        self.buf.push_str(text);
    }

    pub fn end_line(&mut self) {
        self.buf.push('\n');
        self.at_line_start = true;
    }

    /// Write a full line at the context's indentation.
    pub fn line(&mut self, ctx: &EmitContext, text: &str) {
        self.write(ctx, text);
        self.end_line();
    }

    /// Preprocessor directive at column 0, on a line of its own.
    pub fn directive(&mut self, text: &str) {
        if !self.at_line_start {
            self.end_line();
        }
        self.buf.push_str(text);
        self.end_line();
    }

    /// Verbatim text; indentation is the text's own business.
    pub fn raw(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.buf.push_str(text);
        self.at_line_start = text.ends_with('\n');
    }

    /// Finish a header line with an opening brace, per the bracing style.
    pub fn open_brace(&mut self, ctx: &EmitContext) {
        match ctx.options.bracing_style {
            BracingStyle::Block => self.write(ctx, " {"),
            BracingStyle::C => {
                self.end_line();
                self.write(ctx, "{");
            }
        }
        self.end_line();
    }

    /// Open a block: write `header {` at the context's indentation.
    /// The block body is written with `ctx.nested()`.
    pub fn open(&mut self, ctx: &EmitContext, header: &str) {
        self.write(ctx, header);
        self.open_brace(ctx);
    }

    /// Close a block: write `}` and end the line.
    pub fn close(&mut self, ctx: &EmitContext) {
        self.line(ctx, "}");
    }

    /// Write `}` and leave the line open for a continuation clause.
    pub fn close_inline(&mut self, ctx: &EmitContext) {
        self.write(ctx, "}");
    }

    /// Continue after `close_inline` with `else`, `catch (...)` or `finally`,
    /// on the same line or the next one depending on `else_on_closing`.
    pub fn continue_block(&mut self, ctx: &EmitContext, header: &str) {
        if ctx.options.else_on_closing {
            self.write(ctx, " ");
        } else {
            self.end_line();
        }
        self.open(ctx, header);
    }

    pub fn is_at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// Consume and return the built string.
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Quote a string as a C# regular string literal.
///
/// Substitution order matters: backslashes are doubled first so the
/// backslashes introduced by later escapes are not doubled again.
pub fn quote_string(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\t', "\\t")
        .replace('\r', "\\r")
        .replace('\n', "\\n");
    format!("\"{escaped}\"")
}

/// Quote a single character as a C# char literal.
pub fn quote_char(c: char) -> String {
    let body = match c {
        '\\' => "\\\\".to_string(),
        '\'' => "\\'".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        '\n' => "\\n".to_string(),
        '\0' => "\\0".to_string(),
        other => other.to_string(),
    };
    format!("'{body}'")
}
