#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tla_diagnostics::Severity;
use tla_tool_output::{BufferSink, NullSink};
use tla_tools::{ToolError, ToolsConfig, analyze, parse_module, transpile};

fn shell(script: &str) -> Option<Vec<String>> {
	Some(vec!["sh".into(), "-c".into(), script.into(), "sh".into()])
}

fn module() -> (tempfile::TempDir, PathBuf) {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("Queue.tla");
	std::fs::write(&path, "---- MODULE Queue ----\n====\n").unwrap();
	(dir, path)
}

#[tokio::test]
async fn test_transpile_collects_diagnostics_and_status() {
	let (_dir, path) = module();
	let mut config = ToolsConfig::default();
	config.transpiler.command = shell("printf 'Queue.tla:3:5-3:12: error\\n    Expected begin\\n'; exit 1");

	let run = transpile(&config, &path, NullSink).await.unwrap();
	assert_eq!(run.status.code(), Some(1));
	assert!(!run.failed_silently());
	let diags = run.output.get("Queue.tla");
	assert_eq!(diags.len(), 1);
	assert_eq!(diags[0].message, "Expected begin");
}

#[tokio::test]
async fn test_silent_failure_is_not_an_error() {
	let (_dir, path) = module();
	let mut config = ToolsConfig::default();
	config.analyzer.command = shell("exit 3");

	let run = analyze(&config, &path, NullSink).await.unwrap();
	assert!(run.output.diagnostics.is_empty());
	assert!(run.failed_silently());
}

#[tokio::test]
async fn test_parse_module_merges_after_transpiler() {
	let (_dir, path) = module();
	let mut config = ToolsConfig::default();
	config.transpiler.command = shell("printf 'Queue.tla:1:1: error: from transpiler\\n'");
	config.analyzer.command = shell("printf 'Semantic warnings:\\nQueue.tla:2:1: warning: from analyzer\\n'; printf 'noise\\n' >&2");

	let sink = Arc::new(BufferSink::new());
	let report = parse_module(&config, &path, &sink).await.unwrap();
	let messages: Vec<_> = report.diagnostics.get("Queue.tla").iter().map(|d| (d.severity, d.message.as_str())).collect();
	assert_eq!(
		messages,
		vec![(Severity::Error, "from transpiler"), (Severity::Warning, "from analyzer")]
	);
	assert!(!report.failed_silently());
	assert_eq!(sink.lines_for("pluscal"), vec!["Queue.tla:1:1: error: from transpiler"]);
	assert!(sink.lines_for("sany").contains(&"noise".to_owned()));
}

#[tokio::test]
async fn test_module_path_is_passed_last() {
	let (_dir, path) = module();
	let mut config = ToolsConfig::default();
	config.analyzer.options = vec!["-x".into()];
	config.analyzer.command = shell("printf '%s: error: args %s\\n' \"$2\" \"$1\"");

	let run = analyze(&config, &path, NullSink).await.unwrap();
	let diags = run.output.diagnostics.get(&path);
	assert_eq!(diags.len(), 1);
	assert_eq!(diags[0].message, "args -x");
}

#[tokio::test]
async fn test_spawn_failure() {
	let (_dir, path) = module();
	let mut config = ToolsConfig::default();
	config.transpiler.command = Some(vec!["/nonexistent/pcal".into()]);

	let err = transpile(&config, &path, NullSink).await.unwrap_err();
	assert!(matches!(err, ToolError::Spawn { ref program, .. } if Path::new(program) == Path::new("/nonexistent/pcal")));
}
