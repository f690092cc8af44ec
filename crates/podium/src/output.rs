//! Terminal output: rendered HTML on stdout, messages on stderr.

use console::{Style, Term};

pub(crate) struct Output {
    out: Term,
    err: Term,
    yellow: Style,
    red: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    /// Write rendered content to stdout as is.
    pub(crate) fn content(&self, text: &str) -> std::io::Result<()> {
        self.out.write_str(text)?;
        self.out.flush()
    }

    /// Write one line to stdout.
    pub(crate) fn line(&self, text: &str) -> std::io::Result<()> {
        self.out.write_line(text)
    }

    /// Dimmed hint on stderr.
    pub(crate) fn hint(&self, msg: &str) {
        let _ = self.err.write_line(&self.dim.apply_to(msg).to_string());
    }

    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.err.write_line(&self.yellow.apply_to(msg).to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        let _ = self.err.write_line(&self.red.apply_to(msg).to_string());
    }
}
