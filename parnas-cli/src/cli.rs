//! Command line surface (§4 ambient expansion), mirroring the original tool's `argparse` options
//! one-for-one (see `examples/original_source/parnaslib/options.py`).

use std::path::PathBuf;

use clap::Parser;

/// Phylogenetic mAximum RepreseNtAtion Sampling: choose a small set of tips that best represent
/// the diversity of a phylogenetic tree.
#[derive(Parser, Debug)]
#[command(name = "parnas", about, version)]
pub struct Args {
	/// Path to the input tree, in Newick or Nexus format.
	#[arg(short = 't', long = "tree")]
	pub tree : PathBuf,

	/// Number of representatives to choose.
	#[arg(short = 'n', long = "samples")]
	pub samples : usize,

	/// Write a colourised plain-text report of the chosen representatives to this path.
	#[arg(long = "color", value_name = "PATH")]
	pub out_path : Option<PathBuf>,

	/// Regex matching taxa that are already covered by a prior center. Matched against the full
	/// taxon name.
	#[arg(long = "prior-regex")]
	pub prior_regex : Option<String>,

	/// Sequence similarity threshold (0, 100): choose representatives that cover as much
	/// diversity as possible within the implied substitution radius. Requires `--nt` or `--aa`.
	#[arg(long = "threshold")]
	pub percent : Option<f64>,

	/// Regex matching taxa that may not be chosen as representatives (but still contribute to
	/// the objective).
	#[arg(long = "exclude", value_name = "REGEX")]
	pub exclude_regex : Option<String>,

	/// Regex matching taxa to remove from the tree entirely before solving.
	#[arg(long = "exclude-fully", value_name = "REGEX")]
	pub full_regex : Option<String>,

	/// Path to a nucleotide alignment (FASTA) associated with the tree's tips.
	#[arg(long = "nt", conflicts_with = "aa_alignment")]
	pub nt_alignment : Option<PathBuf>,

	/// Path to an amino-acid alignment (FASTA) associated with the tree's tips.
	#[arg(long = "aa", conflicts_with = "nt_alignment")]
	pub aa_alignment : Option<PathBuf>,

	/// Increase log verbosity (info-level messages are printed by default; pass this to also see
	/// debug-level diagnostics from the taxon-matching and radius-conversion steps).
	#[arg(short = 'v', long = "verbose")]
	pub verbose : bool
}

impl Args {
	/// Path to whichever alignment was specified, and whether it is amino-acid.
	pub fn alignment( &self ) -> Option<(&PathBuf, bool)> {
		if let Some( path ) = &self.nt_alignment {
			Some( (path, false) )
		}
		else if let Some( path ) = &self.aa_alignment {
			Some( (path, true) )
		}
		else {
			None
		}
	}
}
