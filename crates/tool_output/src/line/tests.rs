use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::obligation::CountByStepStatus;

fn span(line: u32, col: u32, end: Option<(u32, u32)>) -> ToolSpan {
	ToolSpan {
		start: ToolPosition::new(line, col),
		end: end.map(|(l, c)| ToolPosition::new(l, c)),
	}
}

#[test]
fn test_full_range_header() {
	assert_eq!(
		classify("foo.tla:3:5-3:12: error"),
		Line::Location(LocationHeader {
			target: HeaderTarget::Path(PathBuf::from("foo.tla")),
			span: Some(span(3, 5, Some((3, 12)))),
			severity: Some(Severity::Error),
			message: None,
		})
	);
}

#[test]
fn test_point_header_with_inline_message() {
	assert_eq!(
		classify("/specs/Queue.tla:10:2: Warning: unused definition: x"),
		Line::Location(LocationHeader {
			target: HeaderTarget::Path(PathBuf::from("/specs/Queue.tla")),
			span: Some(span(10, 2, None)),
			severity: Some(Severity::Warning),
			message: Some("unused definition: x".into()),
		})
	);
}

#[test]
fn test_windows_path_header() {
	let Line::Location(header) = classify(r"C:\specs\Queue.tla:1:1-2:4: error") else {
		panic!("expected location header");
	};
	assert_eq!(header.target, HeaderTarget::Path(PathBuf::from(r"C:\specs\Queue.tla")));
	assert_eq!(header.span, Some(span(1, 1, Some((2, 4)))));
}

#[test]
fn test_unpositioned_header() {
	assert_eq!(
		classify("-: error: Missing `begin'"),
		Line::Location(LocationHeader {
			target: HeaderTarget::Path(PathBuf::from("-")),
			span: None,
			severity: Some(Severity::Error),
			message: Some("Missing `begin'".into()),
		})
	);
}

#[test]
fn test_module_header() {
	assert_eq!(
		classify("line 7, col 12 to line 7, col 19 of module Queue"),
		Line::Location(LocationHeader {
			target: HeaderTarget::Module("Queue".into()),
			span: Some(span(7, 12, Some((7, 19)))),
			severity: None,
			message: None,
		})
	);
}

#[rstest]
#[case::non_numeric_line("foo.tla:x:5: error")]
#[case::overflowing_line("foo.tla:99999999999:5: error")]
#[case::unknown_tag("foo.tla:3:5: note")]
#[case::missing_tag("foo.tla:3:5:")]
#[case::plain_text("Translation of algorithm failed")]
#[case::blank("")]
fn test_malformed_or_plain_is_unrecognized(#[case] input: &str) {
	assert_eq!(classify(input), Line::Unrecognized(input));
}

#[rstest]
#[case("Parsing completed.", Section::Done)]
#[case("Translation completed.", Section::Done)]
#[case("Semantic processing completed.", Section::Done)]
#[case("Parsing...", Section::Parsing { file: None })]
#[case("***Parse Error***", Section::Parsing { file: None })]
#[case("Parsing file /tmp/Queue.tla", Section::Parsing { file: Some(PathBuf::from("/tmp/Queue.tla")) })]
#[case("Semantic errors...", Section::SemanticErrors)]
#[case("*** Errors: 2", Section::SemanticErrors)]
#[case("Semantic processing of module Queue", Section::SemanticErrors)]
#[case("Semantic warnings:", Section::SemanticWarnings)]
#[case("*** Warnings: 1", Section::SemanticWarnings)]
#[case("Obligations:", Section::Obligations)]
#[case("Proof obligations...", Section::Obligations)]
fn test_section_banners(#[case] input: &str, #[case] expected: Section) {
	assert_eq!(classify(input), Line::Section(expected));
}

#[test]
fn test_completed_banner_wins_over_parsing_prefix() {
	assert_eq!(classify("Parsing completed."), Line::Section(Section::Done));
}

#[test]
fn test_indented_text_is_message() {
	assert_eq!(classify("    Unexpected token  "), Line::Message("Unexpected token"));
	assert_eq!(classify("\tnext line"), Line::Message("next line"));
	assert_eq!(classify("   "), Line::Unrecognized("   "));
}

#[test]
fn test_obligation_status_line() {
	assert_eq!(
		classify("role=main range=4:1-4:20 status=failed"),
		Line::Status(Status::Obligation {
			role: "main".into(),
			span: span(4, 1, Some((4, 20))),
			status: "failed".into(),
			normalized: None,
		})
	);
}

#[test]
fn test_prover_status_line_with_quoted_reason() {
	assert_eq!(
		classify(r#"prover=Zenon meth=auto status=failed reason="time limit""#),
		Line::Status(Status::Prover {
			prover: "Zenon".into(),
			method: Some("auto".into()),
			status: "failed".into(),
			reason: Some("time limit".into()),
		})
	);
}

#[test]
fn test_count_line_defaults_missing_keys() {
	assert_eq!(
		classify("proved=3 failed=1"),
		Line::Status(Status::Counts(CountByStepStatus {
			proved: 3,
			failed: 1,
			..Default::default()
		}))
	);
}

#[rstest]
#[case::unknown_key("role=main range=4:1-4:20 status=failed colour=red")]
#[case::bad_range("role=main range=four status=failed")]
#[case::non_numeric_count("proved=three")]
#[case::unterminated_quote(r#"prover=Zenon status="failed"#)]
#[case::trailing_text("prover=Zenon status=failed and more")]
fn test_malformed_status_is_not_status(#[case] input: &str) {
	assert!(!matches!(classify(input), Line::Status(_)));
}

#[test]
fn test_parse_span_without_end() {
	assert_eq!(parse_span("12:3"), Some(span(12, 3, None)));
	assert_eq!(parse_span("12"), None);
}
