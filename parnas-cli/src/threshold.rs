//! Similarity-to-radius conversion (§4.8, ambient CLI collaborator).

use bio::io::fasta;

use crate::error::CliError;

/// Reads the FASTA alignment at `path` and returns its column count (alignment length).
///
/// All records are expected to share the same length (that is what makes it an alignment); the
/// length of the first record is used.
pub fn alignment_length( path : &std::path::Path ) -> Result<usize, CliError> {
	let reader = fasta::Reader::from_file( path ).map_err( |e| CliError::AlignmentRead{
		path : path.display().to_string(),
		source : e.into()
	} )?;

	let first = reader.records()
		.next()
		.ok_or_else( || CliError::AlignmentRead{
			path : path.display().to_string(),
			source : anyhow::anyhow!( "alignment is empty" )
		} )?
		.map_err( |e| CliError::AlignmentRead{
			path : path.display().to_string(),
			source : e.into()
		} )?;

	Ok( first.seq().len() )
}

/// Converts a similarity percentage `similarity` in `(0, 100)` into a substitution-count coverage
/// radius over an alignment of `alignment_length` columns: `floor((1 - similarity / 100) *
/// alignment_length)`.
///
/// Returns [`CliError::InvalidThreshold`] if `similarity` is not strictly between 0 and 100.
pub fn threshold_to_radius( similarity : f64, alignment_length : usize ) -> Result<f64, CliError> {
	if ! (similarity > 0.0 && similarity < 100.0) {
		return Err( CliError::InvalidThreshold( format!(
			"invalid \"--threshold {similarity}\" option. The threshold must be between 0 and 100 (exclusive)"
		) ) );
	}

	let radius = ( (1.0 - similarity / 100.0) * alignment_length as f64 ).floor();
	log::info!(
		"{similarity:.3}% similarity threshold implies that a single representative will cover all tips in the {radius}-substitution radius."
	);
	Ok( radius )
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_exact_floor_conversion() {
		// (1 - 95/100) * 1000 = 50.0 exactly
		assert_eq!( threshold_to_radius( 95.0, 1000 ).unwrap(), 50.0 );
		// (1 - 99/100) * 333 = 3.33 -> floors to 3
		assert_eq!( threshold_to_radius( 99.0, 333 ).unwrap(), 3.0 );
	}

	#[test]
	fn test_boundary_values_rejected() {
		assert!( matches!( threshold_to_radius( 0.0, 100 ), Err( CliError::InvalidThreshold( _ ) ) ) );
		assert!( matches!( threshold_to_radius( 100.0, 100 ), Err( CliError::InvalidThreshold( _ ) ) ) );
		assert!( matches!( threshold_to_radius( -5.0, 100 ), Err( CliError::InvalidThreshold( _ ) ) ) );
	}
}
