//! Normalized diagnostics for TLA+ tool output.
//!
//! Tool parsers turn locations printed by the transpiler and analyzer
//! ([`ParseLocation`], 1-based and inclusive) into [`Diagnostic`]s with 0-based
//! half-open [`Range`]s, grouped per file in a [`DiagnosticCollection`].
//!
//! The [`lsp`] module converts the model into [`lsp_types`] values for editor
//! hosts.

mod collection;
mod diagnostic;
mod location;
pub mod lsp;
mod position;

pub use collection::DiagnosticCollection;
pub use diagnostic::{Diagnostic, Severity};
pub use location::{ParseLocation, ToolPosition, ToolSpan};
pub use position::{Position, Range};
