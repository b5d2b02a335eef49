//! Taxon selection (§4.7, ambient CLI collaborator): turns `--exclude`, `--exclude-fully`, and
//! `--prior-regex` into the label sets `parnas_core::find_medoids_full` consumes.

use std::collections::HashSet;

use regex::Regex;

use crate::error::CliError;

/// Compiles `pattern` and returns every label in `taxa` that it matches as a *prefix*, mirroring
/// Python's `re.match(pattern, taxon.label)` in the original tool — which succeeds as soon as the
/// pattern matches starting at the beginning of the string, without requiring it to consume the
/// whole label.
///
/// Logs the matched taxa at `info` level under `title`, or logs `none_message` if nothing
/// matched, the way the original tool reports matched-taxa counts.
pub fn find_matching_taxa(
	taxa : &[String],
	pattern : &str,
	title : &str,
	none_message : &str
) -> Result<HashSet<String>, CliError> {
	let anchored = format!( "^(?:{pattern})" );
	let regex = Regex::new( &anchored ).map_err( |e| CliError::InvalidRegex{
		pattern : pattern.to_string(),
		source : e
	} )?;

	let matched : HashSet<String> = taxa.iter()
		.filter( |label| regex.is_match( label ) )
		.cloned()
		.collect();

	if matched.is_empty() {
		log::info!( "{none_message}" );
	}
	else {
		log::info!( "{title}" );
		let mut sorted : Vec<&String> = matched.iter().collect();
		sorted.sort();
		for label in sorted {
			log::info!( "\t{label}" );
		}
	}

	Ok( matched )
}

/// Resolves every taxon-selection option against the full set of tip labels in the tree, warning
/// (and resolving in favour of full exclusion) when a taxon matches both `--exclude` and
/// `--exclude-fully`.
pub struct TaxonSelection {
	/// Taxa excluded from being chosen as representatives, but still part of the objective.
	pub excluded : HashSet<String>,
	/// Taxa removed from the tree entirely.
	pub fully_excluded : HashSet<String>,
	/// Taxa already covered by a prior center.
	pub prior_covered : HashSet<String>
}

/// Resolves `--exclude`, `--exclude-fully`, and `--prior-regex` against `taxa`.
pub fn resolve_taxon_selection(
	taxa : &[String],
	exclude_regex : Option<&str>,
	full_regex : Option<&str>,
	prior_regex : Option<&str>
) -> Result<TaxonSelection, CliError> {
	let mut excluded = match exclude_regex {
		Some( p ) => find_matching_taxa(
			taxa, p,
			"Not considering the following as representatives (matched EXCLUDE_REGEX):",
			"No taxa matched EXCLUDE_REGEX"
		)?,
		None => HashSet::new()
	};

	let fully_excluded = match full_regex {
		Some( p ) => find_matching_taxa(
			taxa, p,
			"Ignoring the following taxa (matched FULL_REGEX):",
			"No taxa matched FULL_REGEX"
		)?,
		None => HashSet::new()
	};

	let prior_covered = match prior_regex {
		Some( p ) => find_matching_taxa(
			taxa, p,
			"Prior centers that match the regex:",
			"No taxa matched PRIOR_REGEX"
		)?,
		None => HashSet::new()
	};

	for taxon in excluded.intersection( &fully_excluded ).cloned().collect::<Vec<_>>() {
		log::warn!( "{taxon} matches both EXCLUDE_REGEX and FULL_REGEX. parnas will fully exclude it." );
		excluded.remove( &taxon );
	}

	Ok( TaxonSelection{ excluded, fully_excluded, prior_covered } )
}
