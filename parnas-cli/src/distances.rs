//! Per-leaf distance reporting (ambient, supports §4.10's report): computes each leaf's true
//! distance to its nearest chosen representative, for display purposes only — `parnas-core`
//! itself only returns the aggregate objective, not a per-leaf breakdown (§4.5).

use std::collections::{HashMap, HashSet};

use parnas_core::{RawNode, RawTree};

/// Returns `(leaf label, distance to nearest label in `medoids`)` for every leaf in `tree`,
/// sorted by label.
///
/// Walks root-to-node paths for every leaf (the same technique used to cross-check the DP against
/// brute force in `parnas-core`'s own test suite) and finds the lowest common ancestor of each
/// leaf with each medoid by scanning for the first shared node on both paths.
pub fn nearest_medoid_distances( tree : &RawTree, medoids : &[String] ) -> Vec<(String, f64)> {
	let mut parent : HashMap<usize, (usize, f64)> = HashMap::new();
	for (idx, node) in tree.nodes().iter().enumerate() {
		if let RawNode::Internal{ children } = node {
			for &(child, weight) in children {
				parent.insert( child, (idx, weight) );
			}
		}
	}

	let label_of : HashMap<usize, String> = tree.nodes().iter().enumerate()
		.filter_map( |(i, n)| match n {
			RawNode::Leaf{ label } => Some( (i, label.clone()) ),
			_ => None
		} )
		.collect();

	let root_path = |mut idx : usize| -> Vec<(usize, f64)> {
		let mut path = vec![ (idx, 0.0) ];
		let mut acc = 0.0;
		while let Some( &(p, w) ) = parent.get( &idx ) {
			acc += w;
			path.push( (p, acc) );
			idx = p;
		}
		path
	};

	let medoid_set : HashSet<&String> = medoids.iter().collect();
	let medoid_indices : Vec<usize> = label_of.iter()
		.filter( |(_, label)| medoid_set.contains( label ) )
		.map( |(&idx, _)| idx )
		.collect();
	let medoid_paths : Vec<Vec<(usize, f64)>> = medoid_indices.iter().map( |&idx| root_path( idx ) ).collect();

	let mut result : Vec<(String, f64)> = label_of.iter()
		.map( |(&leaf_idx, label)| {
			let leaf_path = root_path( leaf_idx );
			let distance = medoid_paths.iter()
				.map( |medoid_path| {
					leaf_path.iter()
						.filter_map( |&(node, dist_from_leaf)| {
							medoid_path.iter()
								.find( |&&(n, _)| n == node )
								.map( |&(_, dist_from_medoid)| dist_from_leaf + dist_from_medoid )
						} )
						.fold( f64::INFINITY, f64::min )
				} )
				.fold( f64::INFINITY, f64::min );
			(label.clone(), distance)
		} )
		.collect();

	result.sort_by( |a, b| a.0.cmp( &b.0 ) );
	result
}
