//! Colourised output (§4.10, ambient CLI collaborator): renders the chosen medoids in a
//! human-readable form.
//!
//! Full coloured-Newick rendering with subtree partitioning (the original tool's `--color` output)
//! is out of scope for this expansion; a flat colourised report is the supported subset (§4.10).

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use colored::Colorize;

use crate::error::CliError;

/// Prints a human-readable summary to stdout: the objective value, then every leaf label
/// colourised green if chosen, red if prior-covered, default otherwise.
pub fn print_summary( objective : f64, medoids : &[String], prior_covered : &HashSet<String>, all_labels : &[String] ) {
	println!( "Objective: {objective:.6}" );
	println!( "Representatives ({}):", medoids.len() );
	let chosen : HashSet<&String> = medoids.iter().collect();
	for label in all_labels {
		let line = if chosen.contains( label ) {
			label.green().bold()
		}
		else if prior_covered.contains( label ) {
			label.red()
		}
		else {
			label.normal()
		};
		println!( "  {line}" );
	}
}

/// Writes a companion plain-text report to `path`: the objective value, the medoid list, and
/// (when `distances` is provided) each leaf's distance to its nearest medoid.
pub fn write_report(
	path : &Path,
	objective : f64,
	medoids : &[String],
	distances : &[(String, f64)]
) -> Result<(), CliError> {
	let mut file = std::fs::File::create( path ).map_err( |e| CliError::ReportWrite{
		path : path.display().to_string(),
		source : e
	} )?;

	let write_err = |e : std::io::Error| CliError::ReportWrite{ path : path.display().to_string(), source : e };

	writeln!( file, "objective\t{objective:.6}" ).map_err( write_err )?;
	writeln!( file, "representatives\t{}", medoids.join( "," ) ).map_err( write_err )?;
	writeln!( file, "leaf\tdistance_to_nearest_representative" ).map_err( write_err )?;
	for (leaf, distance) in distances {
		writeln!( file, "{leaf}\t{distance:.6}" ).map_err( write_err )?;
	}

	Ok( () )
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_write_report_contents() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join( "report.tsv" );
		write_report(
			&path, 13.0,
			&[ "A".to_string(), "C".to_string(), "D".to_string() ],
			&[ ("A".to_string(), 0.0), ("B".to_string(), 5.0) ]
		).unwrap();

		let contents = std::fs::read_to_string( &path ).unwrap();
		assert!( contents.contains( "objective\t13.000000" ) );
		assert!( contents.contains( "representatives\tA,C,D" ) );
		assert!( contents.contains( "B\t5.000000" ) );
	}
}
