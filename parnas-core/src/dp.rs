//! The p-median dynamic program (§4.3): the main engine of this crate.
//!
//! For every node `v` of the [`PreparedTree`] (processed bottom-up, in post-order) this computes
//! `F_v(q, x)` — the minimum cost of the leaves in `v`'s subtree given `q` medoids chosen inside
//! it and an external medoid reachable through `v`'s parent at distance `x` — restricted to a
//! finite set of breakpoints `D_v` at which `F_v(q, ·)` can change slope. Combining two children's
//! tables at their parent is the only place real work happens; leaves just seed the recursion.

use crate::distance::Radius;
use crate::tree::{NodeIdx, PreparedNode, PreparedTree};

/// The decomposition that achieved `F_v(q, k)` at an internal node: `q` medoids split into `q_a`
/// in the left subtree and `q_b` in the right, with the external distance propagated to each
/// child landing on breakpoint `idx_a` (resp. `idx_b`) of that child's own table.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CombineChoice {
	pub q_a : usize,
	pub idx_a : usize,
	pub q_b : usize,
	pub idx_b : usize
}

/// The traceback-relevant half of a node's DP result: compact enough to keep around for every
/// node in the tree until the final traceback pass, unlike the full `F`/`Φ` tables (§9).
pub(crate) enum NodeRecord {
	Leaf,
	Internal( Vec<Vec<CombineChoice>> )
}

/// A node's full DP table: breakpoints, plus the running minimum `Φ_v(q, ·)` and the breakpoint
/// index achieving it (earliest index on ties, per the tie-breaking rule in §4.3).
pub(crate) struct NodeTable {
	pub d : Vec<f64>,
	pub prefix_min : Vec<Vec<f64>>,
	pub prefix_arg : Vec<Vec<usize>>
}

/// Everything [`crate::traceback::traceback`] needs: the root's table (for the objective and the
/// traceback's starting point) and every node's compact record.
pub(crate) struct DpResult {
	pub root_table : NodeTable,
	pub records : Vec<NodeRecord>
}

/// Runs the bottom-up DP sweep over `tree` for `p` medoids under the given coverage `radius`.
pub(crate) fn run( tree : &PreparedTree, p : usize, radius : Radius ) -> DpResult {
	let n = tree.len();
	let mut tables : Vec<Option<NodeTable>> = (0..n).map( |_| None ).collect();
	let mut records : Vec<NodeRecord> = Vec::with_capacity( n );

	// `tree`'s nodes are already indexed in post-order (prepare.rs pushes children before their
	// parent), so a single ascending sweep visits every node after both its children.
	for i in 0..n {
		match tree.node( NodeIdx::new( i ) ) {
			PreparedNode::Leaf{ allowed, prior_covered, .. } => {
				tables[i] = Some( leaf_table( p, *allowed, *prior_covered, radius ) );
				records.push( NodeRecord::Leaf );
			}
			PreparedNode::Internal{ left, left_weight, right, right_weight } => {
				let left_table = tables[left.index()].take().expect( "left child processed before parent" );
				let right_table = tables[right.index()].take().expect( "right child processed before parent" );
				let (table, record) = combine( p, &left_table, *left_weight, &right_table, *right_weight, radius );
				tables[i] = Some( table );
				records.push( NodeRecord::Internal( record ) );
			}
		}
	}

	let root_table = tables[tree.root().index()].take().expect( "root must have been processed" );
	DpResult{ root_table, records }
}

fn leaf_breakpoints( radius : Radius ) -> Vec<f64> {
	match radius.value() {
		Some( r ) => vec![ 0.0, r ],
		None => vec![ 0.0, f64::INFINITY ]
	}
}

fn leaf_table( p : usize, allowed : bool, prior_covered : bool, radius : Radius ) -> NodeTable {
	let d = leaf_breakpoints( radius );
	let k_len = d.len();
	let mut f = vec![ vec![ f64::INFINITY; k_len ]; p + 1 ];

	for (k, &x) in d.iter().enumerate() {
		f[0][k] = if prior_covered { 0.0 } else { radius.clamp( x ) };
		if p >= 1 {
			f[1][k] = if allowed { 0.0 } else { f64::INFINITY };
		}
	}

	let (prefix_min, prefix_arg) = prefix_minimize( &f );
	NodeTable{ d, prefix_min, prefix_arg }
}

/// Builds `D_v` for an internal node: the clamped, deduplicated, sorted union of the children's
/// breakpoints shifted by their edge weights, with 0 always present (§4.3).
fn build_breakpoints( d_a : &[f64], w_a : f64, d_b : &[f64], w_b : f64, radius : Radius ) -> Vec<f64> {
	let mut candidates = Vec::with_capacity( d_a.len() + d_b.len() + 1 );
	candidates.push( 0.0 );
	candidates.extend( d_a.iter().map( |&x| radius.clamp( x + w_a ) ) );
	candidates.extend( d_b.iter().map( |&x| radius.clamp( x + w_b ) ) );
	candidates.sort_by( |a, b| a.partial_cmp( b ).expect( "breakpoints are never NaN" ) );
	candidates.dedup();
	candidates
}

/// Returns the largest index `i` such that `d[i] <= y`. `d` is sorted ascending and `d[0] == 0.0`,
/// so this is always well-defined for `y >= 0`.
fn floor_index( d : &[f64], y : f64 ) -> usize {
	let pos = d.partition_point( |&v| v <= y );
	pos.saturating_sub( 1 )
}

fn combine(
	p : usize,
	left : &NodeTable,
	left_weight : f64,
	right : &NodeTable,
	right_weight : f64,
	radius : Radius
) -> (NodeTable, Vec<Vec<CombineChoice>>) {
	let d = build_breakpoints( &left.d, left_weight, &right.d, right_weight, radius );
	let k_len = d.len();
	let mut f = vec![ vec![ f64::INFINITY; k_len ]; p + 1 ];
	let mut record = vec![ vec![ CombineChoice::default(); k_len ]; p + 1 ];

	for (k, &x) in d.iter().enumerate() {
		let idx_a = floor_index( &left.d, x + left_weight );
		let idx_b = floor_index( &right.d, x + right_weight );

		for q in 0..=p {
			let mut best = f64::INFINITY;
			let mut best_choice = CombineChoice::default();

			for q_a in 0..=q {
				let q_b = q - q_a;
				let val = left.prefix_min[q_a][idx_a] + right.prefix_min[q_b][idx_b];
				if val < best {
					best = val;
					best_choice = CombineChoice{
						q_a,
						idx_a : left.prefix_arg[q_a][idx_a],
						q_b,
						idx_b : right.prefix_arg[q_b][idx_b]
					};
				}
			}

			f[q][k] = best;
			record[q][k] = best_choice;
		}
	}

	let (prefix_min, prefix_arg) = prefix_minimize( &f );
	(NodeTable{ d, prefix_min, prefix_arg }, record)
}

/// Computes, for each `q` row, the running minimum of `f[q][..]` over ascending `k` and the index
/// at which that minimum was first achieved (earliest index wins ties, per §4.3).
fn prefix_minimize( f : &[Vec<f64>] ) -> (Vec<Vec<f64>>, Vec<Vec<usize>>) {
	let rows = f.len();
	let k_len = f.first().map_or( 0, |row| row.len() );
	let mut prefix_min = vec![ vec![ f64::INFINITY; k_len ]; rows ];
	let mut prefix_arg = vec![ vec![ 0usize; k_len ]; rows ];

	for q in 0..rows {
		let mut best = f64::INFINITY;
		let mut best_idx = 0usize;
		for k in 0..k_len {
			if f[q][k] < best {
				best = f[q][k];
				best_idx = k;
			}
			prefix_min[q][k] = best;
			prefix_arg[q][k] = best_idx;
		}
	}

	(prefix_min, prefix_arg)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_leaf_table_unrestricted() {
		let t = leaf_table( 2, true, false, Radius::infinite() );
		assert_eq!( t.d, vec![ 0.0, f64::INFINITY ] );
		// q=0: not chosen, pays external distance x.
		assert_eq!( t.prefix_min[0][0], 0.0 );
		assert_eq!( t.prefix_min[0][1], 0.0 ); // running min, not the raw value at k=1
		// q=1: chosen, pays 0 regardless of x.
		assert_eq!( t.prefix_min[1][0], 0.0 );
		assert_eq!( t.prefix_min[1][1], 0.0 );
		// q=2: infeasible for a single leaf.
		assert_eq!( t.prefix_min[2][0], f64::INFINITY );
	}

	#[test]
	fn test_leaf_table_not_allowed_cannot_be_medoid() {
		let t = leaf_table( 1, false, false, Radius::infinite() );
		assert_eq!( t.prefix_min[1][0], f64::INFINITY );
		assert_eq!( t.prefix_min[1][1], f64::INFINITY );
	}

	#[test]
	fn test_leaf_table_prior_covered_is_free() {
		let t = leaf_table( 0, true, true, Radius::finite( 3.0 ) );
		assert_eq!( t.prefix_min[0][0], 0.0 );
		assert_eq!( t.prefix_min[0][1], 0.0 );
	}

	#[test]
	fn test_floor_index() {
		let d = vec![ 0.0, 2.0, 5.0 ];
		assert_eq!( floor_index( &d, 0.0 ), 0 );
		assert_eq!( floor_index( &d, 1.9 ), 0 );
		assert_eq!( floor_index( &d, 2.0 ), 1 );
		assert_eq!( floor_index( &d, 4.9 ), 1 );
		assert_eq!( floor_index( &d, 100.0 ), 2 );
		assert_eq!( floor_index( &d, f64::INFINITY ), 2 );
	}

	#[test]
	fn test_build_breakpoints_includes_zero_and_clamps() {
		let d_a = vec![ 0.0, f64::INFINITY ];
		let d_b = vec![ 0.0, f64::INFINITY ];
		let d = build_breakpoints( &d_a, 3.0, &d_b, 4.0, Radius::finite( 5.0 ) );
		assert_eq!( d, vec![ 0.0, 3.0, 4.0, 5.0 ] );
	}
}
