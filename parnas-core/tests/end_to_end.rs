//! Whole-crate end-to-end scenarios (S1-S6) and quantified invariants, exercised purely through
//! the public API.

use std::collections::HashSet;

use parnas_core::{find_medoids, find_medoids_full, find_medoids_with_coverage, RawNode, RawTree, SolverError};

// ((A:2,B:3):4,(C:5,(D:7,E:1):7):11);
fn s1_tree() -> RawTree {
	RawTree::new(
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
	)
}

// ((A:1,B:1):1,(C:1,D:1):1);
fn cherries_tree() -> RawTree {
	RawTree::new(
		vec![
			RawNode::leaf( "A" ),
			RawNode::leaf( "B" ),
			RawNode::internal( vec![ (0, 1.0), (1, 1.0) ] ),
			RawNode::leaf( "C" ),
			RawNode::leaf( "D" ),
			RawNode::internal( vec![ (3, 1.0), (4, 1.0) ] ),
			RawNode::internal( vec![ (2, 1.0), (5, 1.0) ] ),
		],
		6
	)
}

#[test]
fn s1_three_medoids_exact_objective() {
	let (objective, mut medoids) = find_medoids( &s1_tree(), 3 ).unwrap();
	medoids.sort();
	assert_eq!( objective, 13.0 );
	assert_eq!( medoids, vec![ "A".to_string(), "C".to_string(), "D".to_string() ] );
}

#[test]
fn s2_one_medoid_matches_exhaustive_search() {
	// Pairwise leaf distances in the S1 tree, computed independently of the DP.
	let dist = |u : &str, v : &str| -> f64 {
		let d = [
			( ("A","B"), 5.0 ), ( ("A","C"), 2.0+4.0+11.0+5.0 ), ( ("A","D"), 2.0+4.0+11.0+7.0+7.0 ),
			( ("A","E"), 2.0+4.0+11.0+7.0+1.0 ),
			( ("B","C"), 3.0+4.0+11.0+5.0 ), ( ("B","D"), 3.0+4.0+11.0+7.0+7.0 ), ( ("B","E"), 3.0+4.0+11.0+7.0+1.0 ),
			( ("C","D"), 5.0+7.0+7.0 ), ( ("C","E"), 5.0+7.0+1.0 ),
			( ("D","E"), 7.0+1.0 ),
		];
		if u == v { return 0.0; }
		for ((a,b), w) in d {
			if (a==u && b==v) || (a==v && b==u) { return w; }
		}
		panic!( "no distance for {u},{v}" );
	};
	let leaves = [ "A", "B", "C", "D", "E" ];
	let (expected_objective, expected_medoid) = leaves.iter()
		.map( |&m| {
			let total : f64 = leaves.iter().map( |&l| dist( l, m ) ).sum();
			(total, m.to_string())
		} )
		.min_by( |a, b| a.0.partial_cmp( &b.0 ).unwrap() )
		.unwrap();

	let (objective, medoids) = find_medoids( &s1_tree(), 1 ).unwrap();
	assert_eq!( medoids, vec![ expected_medoid ] );
	assert_eq!( objective, expected_objective );
}

#[test]
fn s3_radius_one_covers_both_cherries() {
	let (objective, medoids) = find_medoids_with_coverage( &cherries_tree(), 2, 1.0 ).unwrap();
	assert_eq!( objective, 0.0 );
	assert_eq!( medoids.len(), 2 );
}

#[test]
fn s4_radius_zero_writes_off_uncovered_tips() {
	let (objective, medoids) = find_medoids_with_coverage( &cherries_tree(), 2, 0.0 ).unwrap();
	assert_eq!( objective, 0.0 );
	assert_eq!( medoids.len(), 2 );
}

#[test]
fn s5_excluded_taxon_is_never_chosen() {
	let mut excluded = HashSet::new();
	excluded.insert( "A".to_string() );
	let (_objective, medoids) = find_medoids_full(
		&s1_tree(), 1, None, &HashSet::new(), &excluded, &HashSet::new()
	).unwrap();
	assert_ne!( medoids[0], "A" );
}

#[test]
fn s6_prior_covered_taxon_contributes_nothing() {
	let mut prior = HashSet::new();
	prior.insert( "A".to_string() );
	let (objective_with_a_prior, _) = find_medoids_full(
		&s1_tree(), 1, None, &prior, &HashSet::new(), &HashSet::new()
	).unwrap();

	let mut fully_excluded = HashSet::new();
	fully_excluded.insert( "A".to_string() );
	let (objective_without_a, _) = find_medoids_full(
		&s1_tree(), 1, None, &HashSet::new(), &HashSet::new(), &fully_excluded
	).unwrap();

	assert_eq!( objective_with_a_prior, objective_without_a );
}

#[test]
fn medoid_labels_are_unique_and_allowed() {
	let mut excluded = HashSet::new();
	excluded.insert( "A".to_string() );
	let (_objective, medoids) = find_medoids_full(
		&s1_tree(), 2, None, &HashSet::new(), &excluded, &HashSet::new()
	).unwrap();

	assert_eq!( medoids.len(), 2 );
	let unique : HashSet<&String> = medoids.iter().collect();
	assert_eq!( unique.len(), medoids.len() );
	assert!( ! medoids.contains( &"A".to_string() ) );
}

#[test]
fn monotonic_in_p() {
	let tree = s1_tree();
	let mut last = f64::INFINITY;
	for p in 1..=4 {
		let (objective, _) = find_medoids( &tree, p ).unwrap();
		assert!( objective <= last + 1e-9, "objective should not increase with p" );
		last = objective;
	}
}

#[test]
fn monotonic_in_radius() {
	let tree = cherries_tree();
	let mut last = f64::INFINITY;
	for r in [ 10.0, 2.0, 1.0, 0.5, 0.0 ] {
		let (objective, _) = find_medoids_with_coverage( &tree, 2, r ).unwrap();
		assert!( objective <= last + 1e-9, "objective should not increase as radius shrinks" );
		last = objective;
	}
}

#[test]
fn zero_edge_weights_yield_zero_objective() {
	let tree = RawTree::new(
		vec![
			RawNode::leaf( "A" ),
			RawNode::leaf( "B" ),
			RawNode::leaf( "C" ),
			RawNode::internal( vec![ (0, 0.0), (1, 0.0) ] ),
			RawNode::internal( vec![ (3, 0.0), (2, 0.0) ] ),
		],
		4
	);
	let (objective, _) = find_medoids( &tree, 1 ).unwrap();
	assert_eq!( objective, 0.0 );
}

#[test]
fn too_few_allowed_leaves_is_infeasible() {
	let mut excluded = HashSet::new();
	excluded.insert( "A".to_string() );
	excluded.insert( "B".to_string() );
	excluded.insert( "C".to_string() );
	excluded.insert( "D".to_string() );
	let err = find_medoids_full(
		&s1_tree(), 2, None, &HashSet::new(), &excluded, &HashSet::new()
	).unwrap_err();
	assert!( matches!( err, SolverError::Infeasible( _ ) ) );
}

#[test]
fn negative_edge_weight_is_invalid_input() {
	let tree = RawTree::new(
		vec![
			RawNode::leaf( "A" ),
			RawNode::leaf( "B" ),
			RawNode::internal( vec![ (0, -1.0), (1, 1.0) ] )
		],
		2
	);
	let err = find_medoids( &tree, 1 ).unwrap_err();
	assert!( matches!( err, SolverError::InvalidInput( _ ) ) );
}

#[test]
fn root_choice_does_not_affect_the_result() {
	// Same tree shape as S1, rooted at the (C,(D,E)) node instead of the top-level node.
	let rerooted = RawTree::new(
		vec![
			RawNode::leaf( "A" ),
			RawNode::leaf( "B" ),
			RawNode::internal( vec![ (0, 2.0), (1, 3.0) ] ),
			RawNode::leaf( "C" ),
			RawNode::leaf( "D" ),
			RawNode::leaf( "E" ),
			RawNode::internal( vec![ (4, 7.0), (5, 1.0) ] ),
			RawNode::internal( vec![ (3, 5.0), (6, 7.0), (2, 11.0) ] ),
		],
		7
	);
	let (objective, mut medoids) = find_medoids( &rerooted, 3 ).unwrap();
	medoids.sort();
	let (expected_objective, mut expected_medoids) = find_medoids( &s1_tree(), 3 ).unwrap();
	expected_medoids.sort();
	assert_eq!( objective, expected_objective );
	assert_eq!( medoids, expected_medoids );
}
