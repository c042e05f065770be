//! Incremental line reader over a tool's output stream.
//!
//! A [`StreamReader`] owns one parse pass. It is driven by two kinds of event:
//! a chunk of bytes arriving ([`StreamReader::push_chunk`]) and the stream
//! terminating, either cleanly ([`StreamReader::end`]) or with an I/O failure
//! ([`StreamReader::fail`]). Chunks need not be line-aligned; the reader keeps
//! the trailing partial line until the next chunk or the end of the stream.
//!
//! [`read_all`] drives a reader from any [`AsyncRead`], suspending between
//! chunks, and [`read_events`] drives one from a channel of [`ChunkEvent`]s
//! for hosts that push output themselves.

use std::io;
use std::ops::ControlFlow;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;

/// Size of the buffer used by [`read_all`].
pub const READ_CHUNK_SIZE: usize = 8 * 1024;

/// A line-driven parser for one tool's output.
pub trait OutputParser {
	/// Structured result produced once the stream ends.
	type Output;

	/// Tool name used in logs and errors.
	const TOOL: &'static str;

	/// Consumes one complete line, without its terminator.
	fn feed_line(&mut self, line: &str);

	/// Flushes pending state and returns the accumulated result.
	fn finish(self) -> Self::Output;
}

/// Failure of the underlying output stream.
///
/// Anything parsed before the failure is discarded.
#[derive(Debug, Error)]
pub enum StreamError {
	/// Reading the stream failed.
	#[error("failed to read {tool} output: {source}")]
	Io {
		/// Tool whose output was being read.
		tool: &'static str,
		/// The underlying I/O error.
		#[source]
		source: io::Error,
	},
	/// The event channel closed without an end-of-stream event.
	#[error("{tool} output channel closed before the end of the stream")]
	Disconnected {
		/// Tool whose output was being read.
		tool: &'static str,
	},
}

/// Events delivered to a reader by a pushing host.
#[derive(Debug)]
pub enum ChunkEvent {
	/// More output arrived.
	Chunk(Vec<u8>),
	/// The stream ended cleanly.
	End,
	/// The stream failed.
	Failed(io::Error),
}

/// Per-invocation state of an incremental parse.
#[derive(Debug)]
pub struct StreamReader<P> {
	parser: P,
	buffer: Vec<u8>,
	/// Prefix of `buffer` known to contain no line break.
	scanned: usize,
	lines: usize,
}

impl<P: OutputParser> StreamReader<P> {
	/// Starts a pass feeding `parser`.
	pub fn new(parser: P) -> Self {
		Self {
			parser,
			buffer: Vec::new(),
			scanned: 0,
			lines: 0,
		}
	}

	/// Number of lines dispatched so far.
	pub fn lines(&self) -> usize {
		self.lines
	}

	/// Appends a chunk and dispatches every line it completes.
	pub fn push_chunk(&mut self, chunk: &[u8]) {
		self.buffer.extend_from_slice(chunk);
		let mut start = 0;
		while let Some(offset) = self.buffer[self.scanned..].iter().position(|&b| b == b'\n') {
			let end = self.scanned + offset;
			dispatch(&mut self.parser, &self.buffer[start..end]);
			self.lines += 1;
			start = end + 1;
			self.scanned = start;
		}
		self.buffer.drain(..start);
		self.scanned = self.buffer.len();
	}

	/// Ends the pass, flushing an unterminated last line.
	pub fn end(mut self) -> P::Output {
		if !self.buffer.is_empty() {
			dispatch(&mut self.parser, &self.buffer);
			self.lines += 1;
		}
		tracing::debug!(tool = P::TOOL, lines = self.lines, "Tool output ended");
		self.parser.finish()
	}

	/// Abandons the pass after a stream failure.
	pub fn fail(self, source: io::Error) -> StreamError {
		tracing::warn!(tool = P::TOOL, lines = self.lines, error = %source, "Tool output stream failed");
		StreamError::Io { tool: P::TOOL, source }
	}

	/// Applies one event, breaking with the final result on termination.
	pub fn on_event(mut self, event: ChunkEvent) -> ControlFlow<Result<P::Output, StreamError>, Self> {
		match event {
			ChunkEvent::Chunk(bytes) => {
				self.push_chunk(&bytes);
				ControlFlow::Continue(self)
			}
			ChunkEvent::End => ControlFlow::Break(Ok(self.end())),
			ChunkEvent::Failed(err) => ControlFlow::Break(Err(self.fail(err))),
		}
	}
}

fn dispatch<P: OutputParser>(parser: &mut P, raw: &[u8]) {
	let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
	let line = String::from_utf8_lossy(raw);
	parser.feed_line(&line);
}

/// Reads `reader` to its end, feeding every line to `parser`.
///
/// Resolves with the parser's result once the stream ends, or with a
/// [`StreamError`] if reading fails. There is no timeout: a producer that
/// never closes its output keeps this pending.
pub async fn read_all<R, P>(mut reader: R, parser: P) -> Result<P::Output, StreamError>
where
	R: AsyncRead + Unpin,
	P: OutputParser,
{
	let mut stream = StreamReader::new(parser);
	let mut buf = vec![0u8; READ_CHUNK_SIZE];
	loop {
		match reader.read(&mut buf).await {
			Ok(0) => return Ok(stream.end()),
			Ok(n) => stream.push_chunk(&buf[..n]),
			Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
			Err(err) => return Err(stream.fail(err)),
		}
	}
}

/// Drives a pass from a channel of events.
///
/// A channel that closes before [`ChunkEvent::End`] counts as a failure.
pub async fn read_events<P: OutputParser>(mut events: mpsc::Receiver<ChunkEvent>, parser: P) -> Result<P::Output, StreamError> {
	let mut stream = StreamReader::new(parser);
	while let Some(event) = events.recv().await {
		match stream.on_event(event) {
			ControlFlow::Continue(next) => stream = next,
			ControlFlow::Break(result) => return result,
		}
	}
	Err(StreamError::Disconnected { tool: P::TOOL })
}

/// Parses complete, already-buffered output in one pass.
pub fn parse_str<P: OutputParser>(text: &str, parser: P) -> P::Output {
	let mut stream = StreamReader::new(parser);
	stream.push_chunk(text.as_bytes());
	stream.end()
}
