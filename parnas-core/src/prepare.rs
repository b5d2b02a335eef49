//! Tree preparation (§4.1): normalises a [`RawTree`] into a rooted, binary, post-order-indexed
//! [`PreparedTree`].

use std::collections::HashSet;

use crate::error::{Result, SolverError};
use crate::raw_tree::{RawNode, RawTree};
use crate::tree::{NodeIdx, PreparedNode, PreparedTree};

/// What survives of a raw subtree after fully-excluded leaves are pruned.
///
/// `weight` is the edge weight that must be *added* to whatever edge eventually connects `node`
/// to its surviving parent, accumulated across any unifurcations that were contracted away on the
/// path from the original parent down to `node`.
struct Survivor {
	node : NodeIdx,
	weight : f64
}

/// Builds the output arena in post-order as subtrees are resolved bottom-up.
struct Builder {
	nodes : Vec<PreparedNode>,
	excluded : HashSet<String>,
	fully_excluded : HashSet<String>,
	prior_covered : HashSet<String>
}

impl Builder {
	/// Recursively prunes, contracts, and binarises the raw subtree rooted at `raw_idx`, pushing
	/// surviving nodes onto `self.nodes` in post-order. Returns `None` if nothing survives.
	fn build( &mut self, raw : &RawTree, raw_idx : usize ) -> Result<Option<Survivor>> {
		match &raw.nodes()[raw_idx] {
			RawNode::Leaf{ label } => {
				if self.fully_excluded.contains( label ) {
					return Ok( None );
				}
				let allowed = ! self.excluded.contains( label );
				let prior_covered = self.prior_covered.contains( label );
				let idx = NodeIdx::new( self.nodes.len() );
				self.nodes.push( PreparedNode::Leaf{ label : label.clone(), allowed, prior_covered } );
				Ok( Some( Survivor{ node : idx, weight : 0.0 } ) )
			}
			RawNode::Internal{ children } => {
				let mut survivors = Vec::with_capacity( children.len() );
				for &(child_idx, weight) in children {
					if weight < 0.0 {
						return Err( SolverError::InvalidInput( format!(
							"edge weight {weight} to node {child_idx} is negative"
						) ) );
					}
					if let Some( s ) = self.build( raw, child_idx )? {
						survivors.push( Survivor{ node : s.node, weight : s.weight + weight } );
					}
				}
				match survivors.len() {
					0 => Ok( None ),
					// Unifurcation: this node disappears, its weight is folded into the child's.
					1 => Ok( Some( survivors.pop().unwrap() ) ),
					_ => Ok( Some( self.binarize( survivors ) ) )
				}
			}
		}
	}

	/// Arranges two or more surviving children into a binary cascade. The cascade is folded
	/// right-to-left: the last two survivors combine first, then each earlier survivor attaches
	/// to the combined remainder via a fresh internal node. The link to the remainder always
	/// carries weight 0, so every node beyond the first combination is the zero-weight internal
	/// node the spec describes.
	fn binarize( &mut self, mut survivors : Vec<Survivor> ) -> Survivor {
		let mut acc = survivors.pop().unwrap();
		while let Some( next ) = survivors.pop() {
			acc = self.push_internal( next, acc );
		}
		acc
	}

	fn push_internal( &mut self, left : Survivor, right : Survivor ) -> Survivor {
		let idx = NodeIdx::new( self.nodes.len() );
		self.nodes.push( PreparedNode::Internal{
			left : left.node,
			left_weight : left.weight,
			right : right.node,
			right_weight : right.weight
		} );
		Survivor{ node : idx, weight : 0.0 }
	}
}

/// Normalises `raw` into a rooted binary tree suitable for the p-median DP.
///
/// `excluded` leaves may not be chosen as medoids but still contribute to the objective.
/// `fully_excluded` leaves are removed from the tree entirely, as if they never existed.
/// `prior_covered` leaves always contribute 0 to the objective, representing coverage by a center
/// outside the solver's control.
///
/// Fails with [`SolverError::InvalidInput`] if fewer than two leaves survive pruning, if `p` is
/// not in `1..number of surviving leaves`, or if any edge weight is negative.
pub fn prepare(
	raw : &RawTree,
	p : usize,
	excluded : &HashSet<String>,
	fully_excluded : &HashSet<String>,
	prior_covered : &HashSet<String>
) -> Result<PreparedTree> {
	let mut builder = Builder{
		nodes : Vec::new(),
		excluded : excluded.clone(),
		fully_excluded : fully_excluded.clone(),
		prior_covered : prior_covered.clone()
	};

	let survivor = builder.build( raw, raw.root() )?
		.ok_or_else( || SolverError::InvalidInput( "no leaves remain after exclusion".to_string() ) )?;

	let tree = PreparedTree::new( builder.nodes, survivor.node );

	if tree.leaf_count() < 2 {
		return Err( SolverError::InvalidInput( format!(
			"tree has only {} leaf after exclusion, need at least 2", tree.leaf_count()
		) ) );
	}
	if p < 1 {
		return Err( SolverError::InvalidInput( "p must be at least 1".to_string() ) );
	}
	if p >= tree.leaf_count() {
		return Err( SolverError::InvalidInput( format!(
			"p ({p}) must be strictly less than the number of remaining leaves ({})", tree.leaf_count()
		) ) );
	}

	Ok( tree )
}
