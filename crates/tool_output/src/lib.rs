//! Streaming parsers for the output of the TLA+ tools.
//!
//! The PlusCal transpiler and the SANY analyzer report problems as plain
//! text. This crate reads that text incrementally, as the tool produces it,
//! and turns it into a [`DiagnosticCollection`](tla_diagnostics::DiagnosticCollection).
//! In extended mode the analyzer parser also collects proof obligation
//! records.
//!
//! ```no_run
//! # async fn run(stdout: impl tokio::io::AsyncRead + Unpin) -> Result<(), tla_tool_output::StreamError> {
//! use tla_tool_output::{AnalyzerParser, read_all};
//!
//! let output = read_all(stdout, AnalyzerParser::new()).await?;
//! for (path, diagnostics) in output.diagnostics.iter() {
//! 	println!("{}: {} problem(s)", path.display(), diagnostics.len());
//! }
//! # Ok(())
//! # }
//! ```

mod analyzer;
pub mod line;
pub mod obligation;
mod pending;
mod reader;
mod sink;
mod transpiler;

pub use analyzer::{AnalyzerOutput, AnalyzerParser, AnalyzerState};
pub use pending::PendingDiagnostic;
pub use reader::{ChunkEvent, OutputParser, READ_CHUNK_SIZE, StreamError, StreamReader, parse_str, read_all, read_events};
pub use sink::{BufferSink, NullSink, OutputSink, Tee, TracingSink};
pub use transpiler::{TranspilerParser, TranspilerState};
