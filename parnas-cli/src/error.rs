//! The error type returned by every fallible step of the `parnas-cli` pipeline.

use thiserror::Error;

/// Everything that can go wrong in the CLI layer, wrapping both its own I/O-facing failures and
/// whatever `parnas-core` reports.
///
/// Every variant is printed as a single line by [`crate::main`], matching the original tool's
/// `parser.error(...)` behaviour: one line naming the cause, then a non-zero exit.
#[derive(Debug, Error)]
pub enum CliError {
	/// The tree file could not be read or parsed as Newick/Nexus.
	#[error("cannot read tree \"{path}\": {source}")]
	TreeRead {
		/// Path to the tree file that failed to load.
		path : String,
		/// Underlying parse error.
		#[source]
		source : anyhow::Error
	},

	/// A regex supplied for `--exclude`, `--exclude-fully`, or `--prior-regex` failed to compile.
	#[error("invalid regex \"{pattern}\": {source}")]
	InvalidRegex {
		/// The offending pattern.
		pattern : String,
		/// Underlying regex compilation error.
		#[source]
		source : regex::Error
	},

	/// The similarity threshold or alignment combination is invalid.
	#[error("{0}")]
	InvalidThreshold( String ),

	/// The alignment file could not be read or parsed as FASTA.
	#[error("cannot read alignment \"{path}\": {source}")]
	AlignmentRead {
		/// Path to the alignment file that failed to load.
		path : String,
		/// Underlying I/O or parse error.
		#[source]
		source : anyhow::Error
	},

	/// Ancestral reweighing via the external `treetime` tool failed.
	#[error("ancestral reweighing failed: {0}")]
	Reweigh( String ),

	/// Writing the colourised report failed.
	#[error("cannot write report \"{path}\": {source}")]
	ReportWrite {
		/// Path the report was being written to.
		path : String,
		/// Underlying I/O error.
		#[source]
		source : std::io::Error
	},

	/// `parnas-core` rejected the request or could not find a feasible solution.
	#[error(transparent)]
	Solver( #[from] parnas_core::SolverError )
}

/// Convenience alias for results returned by this crate's fallible steps.
pub type Result<T> = std::result::Result<T, CliError>;
