//! Traceback (§4.4): recovers the chosen leaves from the DP tables computed by [`crate::dp`].

use crate::dp::{DpResult, NodeRecord};
use crate::error::{Result, SolverError};
use crate::tree::{NodeIdx, PreparedNode, PreparedTree};

/// Reads off the objective and the chosen leaf labels from a finished DP run.
///
/// Evaluates the root at "no external medoid" (`x = ∞`) by taking the last entry of its running
/// minimum — this is well-defined whether or not `∞` is itself a literal breakpoint of the root's
/// table (it is, when the radius is infinite; it is not, when the radius is finite, in which case
/// the last breakpoint is `r` and the running minimum over the whole table is exactly what an
/// unreachable external medoid would see).
pub(crate) fn traceback( tree : &PreparedTree, p : usize, dp : &DpResult ) -> Result<(f64, Vec<String>)> {
	let root_table = &dp.root_table;
	let last = root_table.d.len() - 1;
	let objective = root_table.prefix_min[p][last];

	if objective.is_nan() {
		return Err( SolverError::NumericalOverflow( "objective value is not a number".to_string() ) );
	}
	if ! objective.is_finite() {
		return Err( SolverError::Infeasible( format!(
			"no assignment of exactly {p} allowed medoids exists"
		) ) );
	}

	let start_k = root_table.prefix_arg[p][last];
	let mut chosen = Vec::with_capacity( p );
	walk( tree, tree.root(), p, start_k, &dp.records, &mut chosen );
	chosen.sort();

	if chosen.len() != p {
		return Err( SolverError::NumericalOverflow( format!(
			"traceback selected {} medoids, expected {p}", chosen.len()
		) ) );
	}

	Ok( (objective, chosen) )
}

fn walk( tree : &PreparedTree, idx : NodeIdx, q : usize, k : usize, records : &[NodeRecord], chosen : &mut Vec<String> ) {
	match (tree.node( idx ), &records[idx.index()]) {
		(PreparedNode::Leaf{ label, .. }, NodeRecord::Leaf) => {
			if q == 1 {
				chosen.push( label.clone() );
			}
		}
		(PreparedNode::Internal{ left, right, .. }, NodeRecord::Internal( record )) => {
			let choice = record[q][k];
			walk( tree, *left, choice.q_a, choice.idx_a, records, chosen );
			walk( tree, *right, choice.q_b, choice.idx_b, records, chosen );
		}
		_ => unreachable!( "prepared tree and DP record shapes must match" )
	}
}
