//! Reporting channel used by the binder and the argument sorter.
//!
//! Hard failures travel through `Result` values; everything that a pass can
//! recover from (an optional import that is absent, a symbol that is allowed
//! to stay unresolved) is reported here instead so that a single run can
//! surface every problem at once.

use std::fmt;
use std::io::Write;

use hif_tree::{NodeId, Tree};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Note,
    Warning,
    Error,
}

impl Severity {
    fn header(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    fn color(self) -> Color {
        match self {
            Severity::Note => Color::Cyan,
            Severity::Warning => Color::Yellow,
            Severity::Error => Color::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Node the message is attached to, when one exists.
    pub node: Option<NodeId>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, node: Option<NodeId>) -> Diagnostic {
        Diagnostic { severity: Severity::Error, message: message.into(), node }
    }

    pub fn warning(message: impl Into<String>, node: Option<NodeId>) -> Diagnostic {
        Diagnostic { severity: Severity::Warning, message: message.into(), node }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.header(), self.message)
    }
}

pub trait DiagnosticSink {
    fn report(&mut self, tree: &Tree, diagnostic: Diagnostic);
}

/// Collects diagnostics for later inspection. This is what the test suite
/// uses and what callers embed when they present errors themselves.
#[derive(Debug, Default)]
pub struct BatchSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl BatchSink {
    pub fn new() -> BatchSink {
        BatchSink::default()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

impl DiagnosticSink for BatchSink {
    fn report(&mut self, _tree: &Tree, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic)
    }
}

/// Prints diagnostics to stderr, with colored severity headers where the
/// terminal supports them.
pub struct ConsoleSink {
    dst: StandardStream,
}

impl ConsoleSink {
    pub fn stderr() -> ConsoleSink {
        ConsoleSink { dst: StandardStream::stderr(ColorChoice::Auto) }
    }
}

impl DiagnosticSink for ConsoleSink {
    fn report(&mut self, tree: &Tree, diagnostic: Diagnostic) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(diagnostic.severity.color())).set_bold(true);
        let _ = self.dst.set_color(&spec);
        let _ = write!(self.dst, "{}", diagnostic.severity.header());
        let _ = self.dst.reset();
        let _ = write!(self.dst, ": {}", diagnostic.message);
        if let Some(node) = diagnostic.node {
            if let Some(span) = tree.covering_span(node) {
                let path = tree.sources.path(span.file);
                let _ = write!(self.dst, " ({}:{:?})", path.display(), span.range);
            }
        }
        let _ = writeln!(self.dst);
    }
}
