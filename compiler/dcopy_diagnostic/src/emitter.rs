//! Plain-text diagnostic rendering.
//!
//! ```text
//! error[E1001]: constructor parameter `z` of `Point` does not map to any field
//!   --> 42..43: parameter declared here
//!   = note: every constructor parameter must name a field of the same name
//! ```

use std::io::{self, Write};

use crate::Diagnostic;

/// Writes diagnostics as plain text.
pub struct TextEmitter<W: Write> {
    out: W,
}

impl<W: Write> TextEmitter<W> {
    pub fn new(out: W) -> Self {
        TextEmitter { out }
    }

    /// Render one diagnostic.
    pub fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        writeln!(self.out, "{diagnostic}")?;
        for label in &diagnostic.labels {
            let arrow = if label.is_primary { "-->" } else { ":::" };
            if label.span.is_dummy() {
                writeln!(self.out, "  {arrow} {}", label.message)?;
            } else {
                writeln!(
                    self.out,
                    "  {arrow} {}..{}: {}",
                    label.span.start, label.span.end, label.message
                )?;
            }
        }
        for note in &diagnostic.notes {
            writeln!(self.out, "  = note: {note}")?;
        }
        Ok(())
    }

    /// Render every diagnostic, separated by blank lines.
    pub fn emit_all(&mut self, diagnostics: &[Diagnostic]) -> io::Result<()> {
        for (i, diagnostic) in diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(self.out)?;
            }
            self.emit(diagnostic)?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render diagnostics to a `String`.
pub fn render_to_string(diagnostics: &[Diagnostic]) -> String {
    let mut emitter = TextEmitter::new(Vec::new());
    // Writing into a Vec<u8> cannot fail.
    let _ = emitter.emit_all(diagnostics);
    String::from_utf8_lossy(&emitter.into_inner()).into_owned()
}
