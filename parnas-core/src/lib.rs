/*!
A p-median solver for weighted phylogenetic trees.

Given a tree with non-negative edge weights and a target count `p`, this crate chooses `p` tips
("medoids") that minimise the total distance from every other tip to its nearest chosen tip. This
is the classical *p-median problem*, specialised to trees, where it can be solved exactly in
polynomial time with a bottom-up dynamic program (a variant of Tamir's algorithm).

# Examples

```
use parnas_core::{RawNode, RawTree, find_medoids};

// ((A:2,B:3):4,(C:5,(D:7,E:1):7):11);
let tree = RawTree::new(
	vec![
		RawNode::leaf( "A" ),
		RawNode::leaf( "B" ),
		RawNode::internal( vec![ (0, 2.0), (1, 3.0) ] ),
		RawNode::leaf( "C" ),
		RawNode::leaf( "D" ),
		RawNode::leaf( "E" ),
		RawNode::internal( vec![ (4, 7.0), (5, 1.0) ] ),
		RawNode::internal( vec![ (3, 5.0), (6, 7.0) ] ),
		RawNode::internal( vec![ (2, 4.0), (7, 11.0) ] ),
	],
	8
);

let (objective, medoids) = find_medoids( &tree, 3 ).unwrap();
assert_eq!( objective, 13.0 );
assert_eq!( medoids, vec![ "A".to_string(), "C".to_string(), "D".to_string() ] );
```

# Crate layout

* [`raw_tree`] — the generic, arbitrary-arity tree accepted as input.
* [`tree`] — the rooted binary tree the dynamic program actually runs on, plus its node index type.
* [`prepare`] — turns a [`raw_tree::RawTree`] into a [`tree::PreparedTree`] (pruning, binarising,
  rooting, post-order indexing).
* [`distance`] — the coverage-radius distance policy.
* [`dp`] — the p-median dynamic program itself.
* [`traceback`] — recovers the chosen leaves from the DP tables.
* [`solver`] — the public `find_medoids*` entry points.
* [`error`] — the error type returned by every fallible entry point.
*/

#![warn(missing_docs)]

pub mod distance;
pub mod dp;
pub mod error;
pub mod prepare;
pub mod raw_tree;
pub mod solver;
pub mod traceback;
pub mod tree;

pub use error::{Result, SolverError};
pub use raw_tree::{RawNode, RawTree};
pub use solver::{find_medoids, find_medoids_full, find_medoids_with_coverage};
pub use tree::{NodeIdx, PreparedNode, PreparedTree};

#[cfg(test)]
mod tests {
	use crate::NodeIdx;

	#[test]
	fn test_node_idx_valid() {
		assert_eq!( NodeIdx::new( 0 ).index(), 0 );
		assert_eq!( NodeIdx::new( usize::MAX ).index(), usize::MAX );
	}
}
