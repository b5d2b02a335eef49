//! `parnas`: command-line interface for choosing representative tips on a weighted phylogenetic
//! tree, wrapping `parnas-core`'s p-median solver with Newick I/O, taxon selection, a
//! similarity-to-radius conversion, optional ancestral reweighing, and a colourised report.

mod cli;
mod distances;
mod error;
mod newick;
mod reweigh;
mod report;
mod taxa;
mod threshold;

use std::process::ExitCode;

use clap::Parser;
use parnas_core::{RawNode, RawTree};

use cli::Args;
use error::CliError;

fn main() -> ExitCode {
	let args = Args::parse();

	let log_level = if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
	env_logger::Builder::new()
		.filter_level( log_level )
		.format_timestamp( None )
		.format_target( false )
		.init();

	match run( &args ) {
		Ok( () ) => ExitCode::SUCCESS,
		Err( e ) => {
			log::error!( "{e}" );
			ExitCode::FAILURE
		}
	}
}

fn run( args : &Args ) -> Result<(), CliError> {
	if args.samples < 1 {
		return Err( CliError::InvalidThreshold( "n should be at least 1 and smaller than the number of taxa in the tree.".to_string() ) );
	}

	let mut tree = newick::load_tree( &args.tree )?;

	let radius = resolve_radius( args )?;

	let labels = leaf_labels( &tree );

	let selection = taxa::resolve_taxon_selection(
		&labels,
		args.exclude_regex.as_deref(),
		args.full_regex.as_deref(),
		args.prior_regex.as_deref()
	)?;

	if let Some( (alignment_path, aa) ) = args.alignment() {
		if args.percent.is_some() {
			tree = reweigh::reweigh_tree_ancestral( &args.tree, alignment_path, aa )?;
		}
	}

	let (objective, medoids) = parnas_core::find_medoids_full(
		&tree,
		args.samples,
		radius,
		&selection.prior_covered,
		&selection.excluded,
		&selection.fully_excluded
	)?;

	let all_labels = leaf_labels( &tree );
	report::print_summary( objective, &medoids, &selection.prior_covered, &all_labels );

	if let Some( out_path ) = &args.out_path {
		let distances = distances::nearest_medoid_distances( &tree, &medoids );
		report::write_report( out_path, objective, &medoids, &distances )?;
		log::info!( "Wrote report to \"{}\".", out_path.display() );
	}

	Ok( () )
}

/// Resolves the coverage radius from `--threshold`, converting a similarity percentage through
/// the associated alignment's length (§4.8). Returns `None` (no radius) when `--threshold` was
/// not given.
fn resolve_radius( args : &Args ) -> Result<Option<f64>, CliError> {
	let Some( percent ) = args.percent else { return Ok( None ); };

	let (alignment_path, _aa) = args.alignment().ok_or_else( || CliError::InvalidThreshold(
		"to use the --threshold parameter, please specify a nucleotide or amino acid alignment associated with the tree tips.".to_string()
	) )?;

	let length = threshold::alignment_length( alignment_path )?;
	let radius = threshold::threshold_to_radius( percent, length )?;
	Ok( Some( radius ) )
}

/// Every leaf label currently present in `tree`, in arbitrary order.
fn leaf_labels( tree : &RawTree ) -> Vec<String> {
	tree.nodes().iter()
		.filter_map( |n| match n {
			RawNode::Leaf{ label } => Some( label.clone() ),
			_ => None
		} )
		.collect()
}
