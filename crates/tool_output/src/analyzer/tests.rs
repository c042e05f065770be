use pretty_assertions::assert_eq;
use tla_diagnostics::Position;

use super::*;
use crate::reader::parse_str;

const SEMANTIC_OUTPUT: &str = "\
Parsing file /specs/Queue.tla
Parsing file /opt/tla/Naturals.tla
Semantic processing of module Naturals
Semantic processing of module Queue
*** Errors: 1

line 7, col 12 to line 7, col 19 of module Queue

Unknown operator: `Enqueu'.

";

#[test]
fn test_native_semantic_error() {
	let output = parse_str(SEMANTIC_OUTPUT, AnalyzerParser::new());
	let diags = output.diagnostics.get("/specs/Queue.tla");
	assert_eq!(diags.len(), 1);
	assert_eq!(diags[0].severity, Severity::Error);
	assert_eq!(diags[0].range, Range::new(Position::new(6, 11), Position::new(6, 19)));
	assert_eq!(diags[0].message, "Unknown operator: `Enqueu'.");
}

#[test]
fn test_module_paths_in_discovery_order() {
	let output = parse_str(SEMANTIC_OUTPUT, AnalyzerParser::new());
	let modules: Vec<_> = output.module_paths.keys().map(String::as_str).collect();
	assert_eq!(modules, vec!["Queue", "Naturals"]);
	assert_eq!(output.module_paths["Naturals"], PathBuf::from("/opt/tla/Naturals.tla"));
}

#[test]
fn test_warning_section_emits_warnings() {
	let text = "Semantic warnings:\nfoo.tla:2:1-2:5: error\n  definition shadows another\nSemantic processing completed.\n";
	let output = parse_str(text, AnalyzerParser::new());
	let diags = output.diagnostics.get("foo.tla");
	assert_eq!(diags.len(), 1);
	assert_eq!(diags[0].severity, Severity::Warning);
	assert_eq!(diags[0].message, "definition shadows another");
}

#[test]
fn test_idle_header_uses_own_tag() {
	let output = parse_str("foo.tla:1:1: warning: stray\n", AnalyzerParser::new());
	assert_eq!(output.diagnostics.get("foo.tla")[0].severity, Severity::Warning);
}

#[test]
fn test_parse_error_section() {
	let text = "Parsing...\nfoo.tla:3:5-3:12: error\nUnexpected token\nSemantic errors...\nfoo.tla:8:1: error\n  Multiply-defined symbol\n";
	let output = parse_str(text, AnalyzerParser::new());
	let diags = output.diagnostics.get("foo.tla");
	assert_eq!(diags.len(), 2);
	assert_eq!(diags[0].message, "Unexpected token");
	assert_eq!(diags[1].message, "Multiply-defined symbol");
	assert!(diags.iter().all(|d| d.severity == Severity::Error));
}

#[test]
fn test_state_transitions() {
	let mut parser = AnalyzerParser::new();
	assert_eq!(parser.state(), AnalyzerState::Idle);
	parser.feed_line("Parsing file /specs/Queue.tla");
	assert_eq!(parser.state(), AnalyzerState::InParseErrorSection);
	parser.feed_line("*** Errors: 3");
	assert_eq!(parser.state(), AnalyzerState::InSemanticErrorSection);
	parser.feed_line("*** Warnings: 1");
	assert_eq!(parser.state(), AnalyzerState::InSemanticWarningSection);
	parser.feed_line("Obligations:");
	assert_eq!(parser.state(), AnalyzerState::InObligationSection);
	parser.feed_line("Obligations completed.");
	assert_eq!(parser.state(), AnalyzerState::Idle);
}

const OBLIGATION_OUTPUT: &str = "\
Obligations:
role=main range=4:1-4:20 status=failed
prover=Zenon meth=auto status=failed reason=timeout
proved=0 failed=1 omitted=0 missing=0 pending=0 progress=0
";

#[test]
fn test_obligation_block_closes_into_one_record() {
	let output = parse_str(OBLIGATION_OUTPUT, AnalyzerParser::extended());
	assert!(output.diagnostics.is_empty());
	assert_eq!(
		output.obligations,
		vec![ObligationRecord {
			obligation: ProofObligationState {
				role: "main".into(),
				range: Range::new(Position::new(3, 0), Position::new(3, 20)),
				status: "failed".into(),
				normalized: String::new(),
				results: vec![ProofObligationResult {
					prover: "Zenon".into(),
					meth: "auto".into(),
					status: "failed".into(),
					reason: Some("timeout".into()),
					obligation: None,
				}],
			},
			counts: CountByStepStatus {
				failed: 1,
				..Default::default()
			},
		}]
	);
}

#[test]
fn test_obligations_ignored_outside_extended_mode() {
	let output = parse_str(OBLIGATION_OUTPUT, AnalyzerParser::new());
	assert!(output.obligations.is_empty());
	assert!(output.diagnostics.is_empty());
}

#[test]
fn test_obligation_text_attaches_to_normalized_and_prover() {
	let text = "\
Obligations:
role=main range=4:1-4:20 status=failed
    ASSUME x \\in Nat
    PROVE x + 1 > x
prover=Zenon meth=auto status=failed reason=timeout
    raw obligation text
prover=SMT status=proved
proved=1 failed=1
";
	let output = parse_str(text, AnalyzerParser::extended());
	let state = &output.obligations[0].obligation;
	assert_eq!(state.normalized, "ASSUME x \\in Nat\nPROVE x + 1 > x");
	assert_eq!(state.results.len(), 2);
	assert_eq!(state.results[0].obligation.as_deref(), Some("raw obligation text"));
	assert_eq!(state.results[1].meth, "");
	assert_eq!(state.results[1].obligation, None);
}

#[test]
fn test_unclosed_obligations_close_with_zero_counts() {
	let text = "\
Obligations:
role=main range=1:1-1:5 status=proved
role=aux range=2:1-2:5 status=proved
";
	let output = parse_str(text, AnalyzerParser::extended());
	assert_eq!(output.obligations.len(), 2);
	assert_eq!(output.obligations[1].obligation.role, "aux");
	assert!(output.obligations.iter().all(|r| r.counts == CountByStepStatus::default()));
}

#[test]
fn test_proof_finish_and_step_rollup() {
	let text = "\
Obligations:
role=main range=4:1-4:20 status=proved
proved=1
role=main range=9:3-12:1 status=failed
proved=0 failed=1
";
	let output = parse_str(text, AnalyzerParser::extended());
	let finish = output.proof_finish();
	assert_eq!(finish.status, ProofFinishStatus::Failure);

	let step = output.proof_step("/specs/Queue.tla").expect("obligations were reported");
	assert_eq!(step.status, "failed");
	assert_eq!(step.sub_count.proved, 1);
	assert_eq!(step.sub_count.failed, 1);
	assert_eq!(step.location.range, Range::new(Position::new(3, 0), Position::new(11, 1)));
	assert_eq!(step.obligations.len(), 2);
}

#[test]
fn test_proof_finish_skipped_without_obligations() {
	let output = parse_str("Parsing completed.\n", AnalyzerParser::extended());
	assert_eq!(output.proof_finish().status, ProofFinishStatus::Skipped);
	assert!(output.proof_step("/specs/Queue.tla").is_none());
}

#[test]
fn test_nonzero_exit_style_output_yields_empty_collection() {
	let output = parse_str("Fatal error: could not find file Queue.tla\n", AnalyzerParser::new());
	assert!(output.diagnostics.is_empty());
}

#[test]
fn test_count_rollup_saturates() {
	let text = "\
Obligations:
role=main range=1:1-1:5 status=proved
proved=4294967295
role=main range=2:1-2:5 status=proved
proved=1 failed=1
";
	let output = parse_str(text, AnalyzerParser::extended());
	assert_eq!(output.obligations[0].counts.total(), u32::MAX);
	assert_eq!(output.obligations[1].counts.total(), 2);

	let step = output.proof_step("/specs/Queue.tla").expect("obligations were reported");
	assert_eq!(step.sub_count.proved, u32::MAX);
	assert_eq!(step.sub_count.failed, 1);
	assert_eq!(step.sub_count.total(), u32::MAX);
}
