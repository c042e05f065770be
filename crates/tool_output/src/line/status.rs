//! `key=value` records printed in the obligation section.
//!
//! ```text
//! role=main range=4:1-4:20 status=failed
//! prover=Zenon meth=auto status=failed reason=timeout
//! proved=0 failed=1 omitted=0 missing=0 pending=0 progress=0
//! ```
//!
//! Values may be double-quoted to contain spaces. A record whose key set does
//! not match one of the three shapes is not a status line.

use std::sync::LazyLock;

use regex::Regex;
use tla_diagnostics::{ToolPosition, ToolSpan};

use crate::obligation::CountByStepStatus;

/// A structured status record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
	/// Opens a proof obligation.
	Obligation {
		/// Role of the obligation within its step.
		role: String,
		/// Declared range, in tool coordinates.
		span: ToolSpan,
		/// Obligation status as reported.
		status: String,
		/// Normalized obligation text given inline.
		normalized: Option<String>,
	},
	/// Outcome of one prover on the open obligation.
	Prover {
		/// Prover name.
		prover: String,
		/// Proof method.
		method: Option<String>,
		/// Prover status.
		status: String,
		/// Failure reason.
		reason: Option<String>,
	},
	/// Rollup counts closing the open obligation.
	Counts(CountByStepStatus),
}

const OBLIGATION_KEYS: &[&str] = &["role", "range", "status", "normalized"];
const PROVER_KEYS: &[&str] = &["prover", "meth", "status", "reason"];
const COUNT_KEYS: &[&str] = &["proved", "failed", "omitted", "missing", "pending", "progress"];

static SPAN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?P<line>\d+):(?P<col>\d+)(?:-(?P<end_line>\d+):(?P<end_col>\d+))?$").expect("span pattern is valid")
});

/// Parses a `line:col[-line:col]` range field.
pub fn parse_span(text: &str) -> Option<ToolSpan> {
	let caps = SPAN.captures(text)?;
	let start = ToolPosition::new(caps["line"].parse().ok()?, caps["col"].parse().ok()?);
	let end = match (caps.name("end_line"), caps.name("end_col")) {
		(Some(line), Some(col)) => Some(ToolPosition::new(line.as_str().parse().ok()?, col.as_str().parse().ok()?)),
		_ => None,
	};
	Some(ToolSpan { start, end })
}

pub(super) fn parse(line: &str) -> Option<Status> {
	let fields = fields(line)?;
	let get = |key: &str| fields.iter().rev().find(|(k, _)| *k == key).map(|(_, v)| v.clone());
	let only = |allowed: &[&str]| fields.iter().all(|(k, _)| allowed.contains(k));

	if get("role").is_some() && only(OBLIGATION_KEYS) {
		let span = parse_span(&get("range")?)?;
		return Some(Status::Obligation {
			role: get("role")?,
			span,
			status: get("status")?,
			normalized: get("normalized"),
		});
	}
	if get("prover").is_some() && only(PROVER_KEYS) {
		return Some(Status::Prover {
			prover: get("prover")?,
			method: get("meth"),
			status: get("status")?,
			reason: get("reason"),
		});
	}
	if only(COUNT_KEYS) {
		let count = |key: &str| get(key).map_or(Some(0), |v| v.parse::<u32>().ok());
		return Some(Status::Counts(CountByStepStatus {
			proved: count("proved")?,
			failed: count("failed")?,
			omitted: count("omitted")?,
			missing: count("missing")?,
			pending: count("pending")?,
			progress: count("progress")?,
		}));
	}
	None
}

/// Splits a line into `key=value` pairs, or `None` if any token is not one.
fn fields(line: &str) -> Option<Vec<(&str, String)>> {
	let mut fields = Vec::new();
	let mut rest = line.trim();
	while !rest.is_empty() {
		let eq = rest.find('=')?;
		let key = &rest[..eq];
		if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
			return None;
		}
		let after = &rest[eq + 1..];
		let (value, tail) = if let Some(quoted) = after.strip_prefix('"') {
			let close = quoted.find('"')?;
			(quoted[..close].to_owned(), &quoted[close + 1..])
		} else {
			let end = after.find(char::is_whitespace).unwrap_or(after.len());
			(after[..end].to_owned(), &after[end..])
		};
		if !tail.is_empty() && !tail.starts_with(char::is_whitespace) {
			return None;
		}
		fields.push((key, value));
		rest = tail.trim_start();
	}
	(!fields.is_empty()).then_some(fields)
}
