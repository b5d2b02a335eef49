//! The public interface (§4.5): `find_medoids`, `find_medoids_with_coverage`, and
//! `find_medoids_full`.

use std::collections::HashSet;

use crate::distance::Radius;
use crate::dp;
use crate::error::{Result, SolverError};
use crate::prepare::prepare;
use crate::raw_tree::RawTree;
use crate::traceback::traceback;

/// Finds `p` medoids with no coverage radius, no prior centers, and no exclusions.
pub fn find_medoids( tree : &RawTree, p : usize ) -> Result<(f64, Vec<String>)> {
	find_medoids_full( tree, p, None, &HashSet::new(), &HashSet::new(), &HashSet::new() )
}

/// Finds `p` medoids subject to a coverage radius, with no prior centers or exclusions.
///
/// A leaf farther than `radius` from the nearest chosen medoid contributes exactly `radius` to
/// the objective rather than its true (larger) distance.
pub fn find_medoids_with_coverage( tree : &RawTree, p : usize, radius : f64 ) -> Result<(f64, Vec<String>)> {
	find_medoids_full( tree, p, Some( radius ), &HashSet::new(), &HashSet::new(), &HashSet::new() )
}

/// Finds `p` medoids subject to an optional coverage radius, a set of already-covered leaves, a
/// set of leaves that may not be chosen, and a set of leaves to remove from the tree entirely.
///
/// * `radius` — `None` for no coverage limit, `Some(r)` for a finite, non-negative radius.
/// * `prior_covered` — leaf labels that always contribute 0 to the objective, representing
///   coverage by a center outside this solver's control.
/// * `excluded` — leaf labels that may not be chosen as medoids, but still contribute to the
///   objective.
/// * `fully_excluded` — leaf labels removed from the tree before solving.
///
/// # Errors
///
/// Returns [`SolverError::InvalidInput`] if `radius` is negative or non-finite, if fewer than two
/// leaves remain after exclusion, or if `p` is not strictly between `0` and the number of
/// remaining leaves. Returns [`SolverError::Infeasible`] if no assignment of exactly `p` allowed
/// medoids exists (e.g. fewer than `p` leaves are allowed to be chosen).
pub fn find_medoids_full(
	tree : &RawTree,
	p : usize,
	radius : Option<f64>,
	prior_covered : &HashSet<String>,
	excluded : &HashSet<String>,
	fully_excluded : &HashSet<String>
) -> Result<(f64, Vec<String>)> {
	if let Some( r ) = radius {
		if ! r.is_finite() || r < 0.0 {
			return Err( SolverError::InvalidInput( format!(
				"radius must be a non-negative finite number, got {r}"
			) ) );
		}
	}

	let radius_policy = match radius {
		Some( r ) => Radius::finite( r ),
		None => Radius::infinite()
	};

	let prepared = prepare( tree, p, excluded, fully_excluded, prior_covered )?;
	let dp_result = dp::run( &prepared, p, radius_policy );
	traceback( &prepared, p, &dp_result )
}
