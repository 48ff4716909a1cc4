use crate::span::Span;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Syntax error: {msg}")]
    Syntax { msg: String, span: Span },

    #[error("couldn't parse interface: {reference}")]
    MalformedReference { reference: String },

    #[error("couldn't resolve interface {reference}: {reason}")]
    UnresolvableReference { reference: String, reason: String },

    #[error("unrecognized interface: {reference}")]
    UnrecognizedInterface { reference: String },

    #[error("couldn't find package {path}: {reason}")]
    ModuleNotFound { path: String, reason: String },

    #[error("type {ident} not found in {path}")]
    SymbolNotFound { ident: String, path: String },

    #[error("not an interface: {reference}")]
    NotAnInterface { reference: String },

    #[error("empty interface: {reference}")]
    EmptyInterface { reference: String },

    #[error("cyclic embedding: {}", chain.join(" -> "))]
    CyclicEmbedding { chain: Vec<String> },

    #[error("Config error: {msg}")]
    Config { msg: String, path: PathBuf },
}

impl Error {
    pub fn syntax(msg: impl Into<String>, span: Span) -> Self {
        Self::Syntax { msg: msg.into(), span }
    }

    pub fn malformed(reference: impl Into<String>) -> Self {
        Self::MalformedReference { reference: reference.into() }
    }

    pub fn unresolvable(reference: impl Into<String>, reason: impl ToString) -> Self {
        Self::UnresolvableReference { reference: reference.into(), reason: reason.to_string() }
    }

    pub fn unrecognized(reference: impl Into<String>) -> Self {
        Self::UnrecognizedInterface { reference: reference.into() }
    }

    pub fn module_not_found(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModuleNotFound { path: path.into(), reason: reason.into() }
    }

    pub fn symbol_not_found(ident: impl Into<String>, path: impl Into<String>) -> Self {
        Self::SymbolNotFound { ident: ident.into(), path: path.into() }
    }

    pub fn config(msg: impl Into<String>, path: PathBuf) -> Self {
        Self::Config { msg: msg.into(), path }
    }
}

/// How a report is headed: a fatal error, or input that was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// Render an Error to stderr. `source` and `filename` describe the text a
/// syntax error's span points into.
pub fn render_error(source: &str, filename: &str, err: &Error) {
    render(Severity::Error, &format!("syntax error in {filename}"), source, err);
}

/// Render `err` to stderr under `headline`.
pub fn render(severity: Severity, headline: &str, source: &str, err: &Error) {
    if write_report(&mut std::io::stderr(), severity, headline, source, err).is_err() {
        eprintln!("{}: {headline}: {err}", severity.label());
    }
}

/// Write `err` to `out`. Syntax errors become an ariadne report titled
/// `headline` with the span labelled in `source`; others a plain line.
pub fn write_report(
    out: &mut dyn std::io::Write,
    severity: Severity,
    headline: &str,
    source: &str,
    err: &Error,
) -> std::io::Result<()> {
    use ariadne::{Label, Report, ReportKind, Source};

    match err {
        Error::Syntax { msg, span } => {
            let kind = match severity {
                Severity::Error => ReportKind::Error,
                Severity::Warning => ReportKind::Warning,
            };
            Report::build(kind, (), span.start)
                .with_message(headline)
                .with_label(Label::new(span.start..span.end).with_message(msg))
                .finish()
                .write(Source::from(source), out)
        }
        Error::Config { msg, path } => {
            writeln!(out, "{}[config]: {msg}", severity.label())?;
            writeln!(out, "  --> {}", path.display())
        }
        other => writeln!(out, "{}: {other}", severity.label()),
    }
}
