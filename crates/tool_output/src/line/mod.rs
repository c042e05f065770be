//! Classification of single lines of tool output.
//!
//! [`classify`] tries a fixed list of recognizers, most specific first:
//!
//! 1. status lines (`key=value` records of the obligation report),
//! 2. section banners (`Parsing file ...`, `Semantic errors:` ...),
//! 3. location headers (`path:line:col[-line:col]: tag`, or the analyzer's
//!    `line L, col C to line L, col C of module M`),
//! 4. indented message lines,
//! 5. everything else, as [`Line::Unrecognized`].
//!
//! A line that looks structured but carries a malformed field (a line number
//! that does not fit in `u32`, an unparsable range) falls through to the next
//! recognizer and usually ends up unrecognized. Classification never fails.

mod status;

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tla_diagnostics::{Severity, ToolPosition, ToolSpan};

pub use status::{Status, parse_span};

/// A classified line of tool output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
	/// Start of a positioned message.
	Location(LocationHeader),
	/// Indented continuation text, trimmed.
	Message(&'a str),
	/// Banner separating phases of the tool's output.
	Section(Section),
	/// Structured obligation-report record.
	Status(Status),
	/// Any other text, verbatim.
	Unrecognized(&'a str),
}

/// Phase banners printed by the tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
	/// Parsing phase, optionally naming the file being parsed.
	Parsing {
		/// File announced by `Parsing file <path>`.
		file: Option<PathBuf>,
	},
	/// Semantic errors follow.
	SemanticErrors,
	/// Semantic warnings follow.
	SemanticWarnings,
	/// Proof obligation status records follow.
	Obligations,
	/// A phase finished (`Parsing completed.`, `Translation completed.` ...).
	Done,
}

/// What a location header points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderTarget {
	/// A file path as printed (`-` stands for the tool's input file).
	Path(PathBuf),
	/// A module name, to be resolved against the files the analyzer parsed.
	Module(String),
}

/// Parsed `path:line:col[-line:col]: tag[: message]` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationHeader {
	/// File or module the message refers to.
	pub target: HeaderTarget,
	/// Reported span; `None` for headers without a position.
	pub span: Option<ToolSpan>,
	/// Severity tag, when the header carries one.
	pub severity: Option<Severity>,
	/// Message text printed on the header line itself.
	pub message: Option<String>,
}

/// Path used by headers that refer to the tool's input file.
pub const STDIN_PATH: &str = "-";

#[derive(Clone, Copy)]
enum Banner {
	Done,
	ParsingFile,
	Parsing,
	SemanticErrors,
	SemanticWarnings,
	Obligations,
}

static BANNERS: LazyLock<Vec<(Regex, Banner)>> = LazyLock::new(|| {
	[
		(r"^(?:Parsing|Translation|Semantic processing|Obligations) completed\.?$", Banner::Done),
		(r"^Parsing file (?P<file>\S.*)$", Banner::ParsingFile),
		(r"^(?:Parsing\.\.\.|\*\*\* ?Parse Error ?\*\*\*)$", Banner::Parsing),
		(r"^(?:Semantic errors(?:\.\.\.|:)|\*\*\* Errors: \d+)$", Banner::SemanticErrors),
		(r"^(?:Semantic warnings(?:\.\.\.|:)|\*\*\* Warnings: \d+)$", Banner::SemanticWarnings),
		(r"^Semantic processing of module \S+$", Banner::SemanticErrors),
		(r"^(?:Proof obligations\.\.\.|Obligations(?:\.\.\.|:))$", Banner::Obligations),
	]
	.into_iter()
	.map(|(pattern, banner)| (Regex::new(pattern).expect("banner pattern is valid"), banner))
	.collect()
});

static RANGE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^(?P<path>\S.*?):(?P<line>\d+):(?P<col>\d+)(?:-(?P<end_line>\d+):(?P<end_col>\d+))?:\s*(?P<tag>(?i:error|warning))(?::\s*(?P<msg>.*))?$",
	)
	.expect("range header pattern is valid")
});

static UNPOSITIONED_HEADER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?P<path>(?:[A-Za-z]:)?[^:\s]+):\s*(?P<tag>(?i:error|warning))(?::\s*(?P<msg>.*))?$")
		.expect("unpositioned header pattern is valid")
});

static MODULE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^\s*line (?P<line>\d+), col (?P<col>\d+) to line (?P<end_line>\d+), col (?P<end_col>\d+) of module (?P<module>\w+)\s*$",
	)
	.expect("module header pattern is valid")
});

/// Classifies one line of tool output (without its line terminator).
pub fn classify(line: &str) -> Line<'_> {
	if let Some(status) = status::parse(line) {
		return Line::Status(status);
	}
	if let Some(section) = section(line) {
		return Line::Section(section);
	}
	if let Some(header) = location_header(line) {
		return Line::Location(header);
	}
	let trimmed = line.trim();
	if line.starts_with([' ', '\t']) && !trimmed.is_empty() {
		return Line::Message(trimmed);
	}
	Line::Unrecognized(line)
}

fn section(line: &str) -> Option<Section> {
	let trimmed = line.trim();
	let (caps, banner) = BANNERS.iter().find_map(|(re, banner)| re.captures(trimmed).map(|caps| (caps, *banner)))?;
	Some(match banner {
		Banner::Done => Section::Done,
		Banner::ParsingFile => Section::Parsing {
			file: caps.name("file").map(|m| PathBuf::from(m.as_str().trim_end())),
		},
		Banner::Parsing => Section::Parsing { file: None },
		Banner::SemanticErrors => Section::SemanticErrors,
		Banner::SemanticWarnings => Section::SemanticWarnings,
		Banner::Obligations => Section::Obligations,
	})
}

fn location_header(line: &str) -> Option<LocationHeader> {
	if let Some(caps) = RANGE_HEADER.captures(line) {
		return range_header(&caps);
	}
	if let Some(caps) = UNPOSITIONED_HEADER.captures(line) {
		return Some(LocationHeader {
			target: HeaderTarget::Path(PathBuf::from(&caps["path"])),
			span: None,
			severity: Severity::from_tag(&caps["tag"]),
			message: inline_message(&caps),
		});
	}
	if let Some(caps) = MODULE_HEADER.captures(line) {
		let start = position(&caps, "line", "col")?;
		let end = position(&caps, "end_line", "end_col")?;
		return Some(LocationHeader {
			target: HeaderTarget::Module(caps["module"].to_owned()),
			span: Some(ToolSpan { start, end: Some(end) }),
			severity: None,
			message: None,
		});
	}
	None
}

fn range_header(caps: &Captures<'_>) -> Option<LocationHeader> {
	let start = position(caps, "line", "col")?;
	let end = match (caps.name("end_line"), caps.name("end_col")) {
		(Some(_), Some(_)) => Some(position(caps, "end_line", "end_col")?),
		_ => None,
	};
	Some(LocationHeader {
		target: HeaderTarget::Path(PathBuf::from(&caps["path"])),
		span: Some(ToolSpan { start, end }),
		severity: Severity::from_tag(&caps["tag"]),
		message: inline_message(caps),
	})
}

fn position(caps: &Captures<'_>, line: &str, col: &str) -> Option<ToolPosition> {
	let parsed = caps[line].parse().ok().zip(caps[col].parse().ok());
	if parsed.is_none() {
		tracing::debug!(line = &caps[0], "Location header has an out-of-range coordinate");
	}
	parsed.map(|(line, column)| ToolPosition::new(line, column))
}

fn inline_message(caps: &Captures<'_>) -> Option<String> {
	caps.name("msg").map(|m| m.as_str().trim()).filter(|m| !m.is_empty()).map(str::to_owned)
}

#[cfg(test)]
mod tests;
