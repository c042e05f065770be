use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use pretty_assertions::assert_eq;
use tla_tool_output::{BufferSink, NullSink};
use tokio::io::{AsyncWriteExt, ReadBuf};

use super::*;

/// Stdout that fails on the first read.
struct BrokenPipe;

impl AsyncRead for BrokenPipe {
	fn poll_read(self: Pin<&mut Self>, _cx: &mut Context<'_>, _buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
		Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed")))
	}
}

#[test]
fn test_only_tla_modules_are_accepted() {
	assert!(ensure_tla(Path::new("/specs/Queue.tla")).is_ok());
	assert!(matches!(ensure_tla(Path::new("/specs/Queue.cfg")), Err(ToolError::NotTlaFile { .. })));
	assert!(matches!(ensure_tla(Path::new("/specs/Queue")), Err(ToolError::NotTlaFile { .. })));
}

#[tokio::test]
async fn test_wrong_extension_is_rejected_before_spawning() {
	let err = parse_module(&ToolsConfig::default(), Path::new("notes.txt"), &NullSink).await.unwrap_err();
	assert_eq!(err.to_string(), "notes.txt is not a TLA+ module");
}

#[tokio::test]
async fn test_unconfigured_jar_is_reported() {
	let err = analyze(&ToolsConfig::default(), Path::new("Queue.tla"), NullSink).await.unwrap_err();
	assert!(matches!(err, ToolError::MissingJar));
}

#[tokio::test]
async fn test_stdout_failure_ends_open_stderr() {
	let (mut stderr_writer, stderr) = tokio::io::duplex(64);
	stderr_writer.write_all(b"still running\n").await.unwrap();
	let sink = Arc::new(BufferSink::new());

	let result = read_streams(BrokenPipe, Some(stderr), TranspilerParser::new("Queue.tla"), "pluscal", &sink, move || {
		drop(stderr_writer)
	})
	.await;

	assert!(matches!(result, Err(StreamError::Io { tool: "pluscal", .. })));
	assert_eq!(sink.lines_for("pluscal"), vec!["still running"]);
}

#[tokio::test]
async fn test_clean_stdout_does_not_trigger_failure() {
	let stdout: &[u8] = b"Queue.tla:1:1: error\nbad\n";
	let stderr: &[u8] = b"note\n";
	let mut failed = false;

	let output = read_streams(stdout, Some(stderr), TranspilerParser::new("Queue.tla"), "pluscal", &NullSink, || failed = true)
		.await
		.unwrap();

	assert_eq!(output.len(), 1);
	assert!(!failed);
}
