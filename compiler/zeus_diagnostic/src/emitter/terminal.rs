//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.
//!
//! ```text
//! error[E3001]: Variable not defined
//!  --> main.zeus:3:5
//!   |
//! 3 | y = z + 1
//!   |     ^
//! ```

use std::io::{self, Write};

use crate::source_map::SourceMap;
use crate::{Diagnostic, Severity};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse the value of a `--color=` flag.
    pub fn parse(value: &str) -> Option<ColorMode> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Terminal emitter with optional color support.
///
/// With a [`SourceMap`] attached, located diagnostics show the file name,
/// the offending line and a caret run under the span.
pub struct TerminalEmitter<'s, W: Write> {
    writer: W,
    colors: bool,
    sources: Option<&'s SourceMap>,
}

impl<'s, W: Write> TerminalEmitter<'s, W> {
    /// * `is_tty` - Whether output is a TTY (used for `ColorMode::Auto`)
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            sources: None,
        }
    }

    #[must_use]
    pub fn with_sources(mut self, sources: &'s SourceMap) -> Self {
        self.sources = Some(sources);
        self
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
            Severity::Help => colors::HELP,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    /// `--> file:line:col`, the source line and the caret run.
    fn write_snippet(&mut self, diagnostic: &Diagnostic) {
        let (Some(file), Some(span)) = (diagnostic.file, diagnostic.span) else {
            return;
        };
        let Some(source) = self.sources.and_then(|map| map.get(file)) else {
            let _ = writeln!(self.writer, "  --> {file} @ {span}");
            return;
        };

        let content = source.content();
        let lines = source.lines();
        let (line, col) = lines.offset_to_line_col(content, span.start);
        let text = lines.line_text(content, line);
        let gutter = line.to_string();
        let pad = " ".repeat(gutter.len());

        let _ = write!(self.writer, "{pad}");
        self.write_colored("-->", colors::GUTTER);
        let _ = writeln!(self.writer, " {}:{line}:{col}", source.display_name());

        let _ = write!(self.writer, "{pad} ");
        self.write_colored("|", colors::GUTTER);
        let _ = writeln!(self.writer);

        self.write_colored(&format!("{gutter} |"), colors::GUTTER);
        let _ = writeln!(self.writer, " {text}");

        // Carets stop at the end of the line for multi-line spans.
        let line_chars = text.chars().count();
        let start_col = (col as usize).saturating_sub(1);
        let span_chars = content
            .get(span.to_range())
            .map_or(1, |s| s.chars().take_while(|&c| c != '\n').count());
        let width = span_chars
            .min(line_chars.saturating_sub(start_col))
            .max(1);
        let _ = write!(self.writer, "{pad} ");
        self.write_colored("|", colors::GUTTER);
        let _ = write!(self.writer, " {}", " ".repeat(start_col));
        let carets = "^".repeat(width);
        let color = if diagnostic.is_error() {
            colors::ERROR
        } else {
            colors::WARNING
        };
        self.write_colored(&carets, color);
        let _ = writeln!(self.writer);
    }
}

impl TerminalEmitter<'_, io::Stderr> {
    /// Create a terminal emitter for stderr with explicit color mode.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        self.write_snippet(diagnostic);

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };
            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}
