//! Proof obligation records produced by the analyzer's extended mode.

use std::ops::AddAssign;
use std::path::PathBuf;

use serde::Serialize;
use tla_diagnostics::Range;

/// Obligation counts by step status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CountByStepStatus {
	/// Proved obligations.
	pub proved: u32,
	/// Failed obligations.
	pub failed: u32,
	/// Omitted obligations.
	pub omitted: u32,
	/// Obligations missing a proof.
	pub missing: u32,
	/// Obligations still pending.
	pub pending: u32,
	/// Obligations in progress.
	pub progress: u32,
}

impl CountByStepStatus {
	/// Sum of all counters, saturating at `u32::MAX`.
	pub fn total(&self) -> u32 {
		[self.failed, self.omitted, self.missing, self.pending, self.progress]
			.into_iter()
			.fold(self.proved, u32::saturating_add)
	}
}

impl AddAssign for CountByStepStatus {
	fn add_assign(&mut self, rhs: Self) {
		self.proved = self.proved.saturating_add(rhs.proved);
		self.failed = self.failed.saturating_add(rhs.failed);
		self.omitted = self.omitted.saturating_add(rhs.omitted);
		self.missing = self.missing.saturating_add(rhs.missing);
		self.pending = self.pending.saturating_add(rhs.pending);
		self.progress = self.progress.saturating_add(rhs.progress);
	}
}

/// Result of one prover on an obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProofObligationResult {
	/// Prover name (`Zenon`, `Isabelle`, `SMT` ...).
	pub prover: String,
	/// Proof method.
	pub meth: String,
	/// Prover status.
	pub status: String,
	/// Failure reason, if any.
	pub reason: Option<String>,
	/// Raw obligation text; present when the prover failed and printed it.
	pub obligation: Option<String>,
}

/// A proof obligation and the prover results attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProofObligationState {
	/// Role of the obligation within its step.
	pub role: String,
	/// Declared range, 0-based and half-open.
	pub range: Range,
	/// Obligation status.
	pub status: String,
	/// Normalized obligation text.
	pub normalized: String,
	/// Per-prover results in report order.
	pub results: Vec<ProofObligationResult>,
}

/// A closed obligation with the rollup counts that closed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObligationRecord {
	/// The obligation.
	pub obligation: ProofObligationState,
	/// Rollup counts declared when the obligation was closed.
	pub counts: CountByStepStatus,
}

impl ObligationRecord {
	/// Returns true when the obligation or its rollup reports a failure.
	pub fn is_failed(&self) -> bool {
		self.obligation.status == "failed" || self.counts.failed > 0 || self.counts.missing > 0
	}
}

/// File location of a proof step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
	/// File containing the step.
	pub path: PathBuf,
	/// Range of the step.
	pub range: Range,
}

/// Summary of a proof step and its obligations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProofStepDetails {
	/// Step kind.
	pub kind: String,
	/// Aggregate status.
	pub status: String,
	/// Where the step is.
	pub location: Location,
	/// Obligations of the step.
	pub obligations: Vec<ProofObligationState>,
	/// Counts summed over the step's obligations.
	pub sub_count: CountByStepStatus,
}

/// Outcome of a complete proof run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofFinishStatus {
	/// Every obligation was proved.
	Success,
	/// At least one obligation failed or is missing.
	Failure,
	/// No obligation was checked.
	Skipped,
}

/// Final report of a proof run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProofFinish {
	/// Outcome.
	pub status: ProofFinishStatus,
	/// Human-readable explanation.
	pub reason: String,
}
