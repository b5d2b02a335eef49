//! The error type returned by every fallible entry point of this crate.

use thiserror::Error;

/// Everything that can go wrong when preparing a tree or running the p-median DP on it.
///
/// Every variant carries a single-line, human-readable message and nothing else: callers that
/// need to distinguish failure causes programmatically should match on the variant, not parse the
/// message.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
	/// The input tree, leaf sets, or `p` violate a precondition of the solver (negative edge
	/// weight, too few leaves, `p` out of range, a malformed prepared tree, ...).
	#[error("invalid input: {0}")]
	InvalidInput( String ),

	/// The input is well-formed, but no assignment of exactly `p` allowed medoids exists (e.g.
	/// fewer than `p` leaves are allowed to be chosen).
	#[error("infeasible: {0}")]
	Infeasible( String ),

	/// The computed objective is not a finite number even though the problem is feasible. This
	/// should not happen in practice (all costs are non-negative and bounded by the sum of edge
	/// weights), but is reported rather than silently propagating a `NaN`.
	#[error("numerical overflow: {0}")]
	NumericalOverflow( String ),
}

/// Convenience alias for results returned by this crate's public functions.
pub type Result<T> = std::result::Result<T, SolverError>;
