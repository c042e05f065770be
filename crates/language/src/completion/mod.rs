//! Keyword, operator and symbol completion.
//!
//! Which items are offered depends on the text before the cursor on its
//! line: module names after `EXTENDS`, nothing after `CONSTANT` or
//! `RECURSIVE`, operators after a backslash, and otherwise keywords and the
//! module's own symbols. Block and proof keywords are only offered where a
//! new unit can start, and never inside the PlusCal algorithm.

use std::sync::LazyLock;

use lsp_types::{CompletionItem, CompletionItemKind, SymbolKind};
use regex::Regex;
use tla_diagnostics::Position;

use crate::DocumentInfo;

/// Operators written as `\name`.
pub const OPERATORS: &[&str] = &[
	"E", "A", "X", "lnot", "land", "lor", "cdot", "equiv", "subseteq", "in", "notin", "intersect", "union", "leq", "geq", "cup",
	"cap",
];

/// Keywords that start a top-level unit.
pub const STARTING_KEYWORDS: &[&str] = &[
	"EXTENDS",
	"VARIABLE",
	"VARIABLES",
	"CONSTANT",
	"CONSTANTS",
	"ASSUME",
	"ASSUMPTION",
	"AXIOM",
	"THEOREM",
	"PROOF",
	"LEMMA",
	"PROPOSITION",
	"COROLLARY",
	"RECURSIVE",
];

/// Keywords that start a proof step.
pub const PROOF_STARTING_KEYWORDS: &[&str] = &["DEFINE", "QED", "HIDE", "SUFFICES", "PICK", "HAVE", "TAKE", "WITNESS"];

/// Keywords valid inside expressions.
pub const OTHER_KEYWORDS: &[&str] = &[
	"LET", "IN", "EXCEPT", "ENABLED", "UNCHANGED", "LAMBDA", "DOMAIN", "CHOOSE", "LOCAL", "INSTANCE", "WITH", "SUBSET", "UNION", "SF_",
	"WF_", "USE", "BY", "DEF", "DEFS", "PROVE", "OBVIOUS", "NEW", "ACTION", "OMITTED", "ONLY", "STATE", "TEMPORAL", "IF", "THEN", "ELSE",
	"CASE", "OTHER", "BOOLEAN",
];

pub const CONSTANTS: &[&str] = &["TRUE", "FALSE"];

/// Modules shipped with the tools.
pub const STANDARD_MODULES: &[&str] = &[
	"Bags",
	"FiniteSets",
	"Integers",
	"Naturals",
	"Randomization",
	"Reals",
	"RealTime",
	"Sequences",
	"TLC",
];

static PROOF_STEP_PREFIX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\s*<\d+>[<>\d.a-zA-Z]*\s+[a-zA-Z]*$").expect("proof step pattern is valid"));

static NEW_UNIT_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[a-zA-Z]*$").expect("new unit pattern is valid"));

fn item(label: impl Into<String>, kind: CompletionItemKind, detail: &str) -> CompletionItem {
	CompletionItem {
		label: label.into(),
		kind: Some(kind),
		detail: Some(detail.to_owned()),
		..Default::default()
	}
}

fn keywords(words: &[&str], detail: &str) -> impl Iterator<Item = CompletionItem> {
	words.iter().map(move |w| item(*w, CompletionItemKind::KEYWORD, detail))
}

/// Operator items, labelled with their leading backslash.
pub fn operator_items() -> Vec<CompletionItem> {
	OPERATORS.iter().map(|op| item(format!("\\{op}"), CompletionItemKind::OPERATOR, "(operator) TLA+")).collect()
}

/// Standard module items.
pub fn module_items() -> Vec<CompletionItem> {
	STANDARD_MODULES.iter().map(|m| item(*m, CompletionItemKind::MODULE, "(module) TLA+")).collect()
}

/// Returns true when the text ends in `\` followed by word characters, and
/// the backslash is not the second half of `/\`.
fn ends_with_operator(prev_text: &str) -> bool {
	let head = prev_text.trim_end_matches(|c: char| c.is_ascii_alphanumeric() || c == '_');
	match head.strip_suffix('\\') {
		Some(before) => !before.ends_with('/'),
		None => false,
	}
}

/// Completion items for a cursor at `position`, preceded on its line by
/// `prev_text`.
pub fn complete(prev_text: &str, position: Position, document: &DocumentInfo) -> Vec<CompletionItem> {
	let trimmed = prev_text.trim_start();
	if trimmed.starts_with("EXTENDS") {
		return module_items();
	}
	if trimmed.starts_with("CONSTANT") || trimmed.starts_with("RECURSIVE") {
		return Vec::new();
	}
	if ends_with_operator(prev_text) {
		return operator_items();
	}

	let mut items: Vec<_> = keywords(OTHER_KEYWORDS, "(keyword) TLA+")
		.chain(CONSTANTS.iter().map(|c| item(*c, CompletionItemKind::CONSTANT, "(constant) TLA+")))
		.chain(document.symbols.iter().map(|symbol| {
			let label = match symbol.kind {
				SymbolKind::VARIABLE => "variable",
				SymbolKind::FUNCTION => "function",
				SymbolKind::BOOLEAN | SymbolKind::CONSTANT => "theorem",
				_ => "symbol",
			};
			item(symbol.name.clone(), map_kind(symbol.kind), &format!("({label}) User defined TLA+"))
		}))
		.collect();

	if !document.is_plus_cal_at(position) {
		if PROOF_STEP_PREFIX.is_match(prev_text) {
			items.extend(keywords(PROOF_STARTING_KEYWORDS, "(keyword) TLA+ proof"));
		} else if NEW_UNIT_PREFIX.is_match(prev_text) {
			items.extend(keywords(STARTING_KEYWORDS, "(keyword) TLA+ block start"));
		}
	}
	items
}

/// Fills in the text inserted for a chosen item.
///
/// Keywords get a trailing space; operators drop their backslash, which the
/// user has already typed.
pub fn resolve(mut item: CompletionItem) -> CompletionItem {
	match item.kind {
		Some(CompletionItemKind::KEYWORD) => item.insert_text = Some(format!("{} ", item.label)),
		Some(CompletionItemKind::OPERATOR) => {
			let name = item.label.strip_prefix('\\').unwrap_or(&item.label);
			item.insert_text = Some(format!("{name} "));
		}
		_ => {}
	}
	item
}

/// Completion kind for a symbol kind.
pub fn map_kind(kind: SymbolKind) -> CompletionItemKind {
	match kind {
		SymbolKind::FIELD => CompletionItemKind::FIELD,
		SymbolKind::VARIABLE => CompletionItemKind::VARIABLE,
		SymbolKind::FUNCTION => CompletionItemKind::FUNCTION,
		SymbolKind::METHOD => CompletionItemKind::METHOD,
		SymbolKind::NAMESPACE | SymbolKind::MODULE => CompletionItemKind::MODULE,
		SymbolKind::CONSTANT => CompletionItemKind::CONSTANT,
		_ => CompletionItemKind::TEXT,
	}
}
