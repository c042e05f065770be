//! Runs the TLA+ tools and parses what they print.
//!
//! [`transpile`] runs the PlusCal transpiler on a module, [`analyze`] runs
//! the SANY analyzer, and [`parse_module`] runs both in sequence and merges
//! their diagnostics. How the tools are launched comes from [`ToolsConfig`].
//!
//! Raw output lines are handed to an [`OutputSink`](tla_tool_output::OutputSink)
//! as they are read.

mod config;
mod error;
mod run;

pub use config::{AnalyzerSettings, CONFIG_ENV, Tool, ToolCommand, ToolsConfig, TranspilerSettings};
pub use error::{ConfigError, Result, ToolError};
pub use run::{ModuleReport, ReportsDiagnostics, ToolRun, analyze, parse_module, run_tool, transpile};
