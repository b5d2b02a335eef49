//! Newick tree loading (§4.6, ambient CLI collaborator): reads a tree from disk and converts it
//! into `parnas-core`'s [`RawTree`] input shape.

use std::path::Path;

use parnas_core::{RawNode, RawTree};
use phylotree::tree::{NodeId, Tree};

use crate::error::CliError;

/// Reads the Newick tree at `path` and converts it into a [`RawTree`].
///
/// Any branch length missing from the Newick string defaults to `0.0`, matching dendropy's
/// behaviour, which the original tool relies on.
pub fn load_tree( path : &Path ) -> Result<RawTree, CliError> {
	let newick = std::fs::read_to_string( path ).map_err( |e| CliError::TreeRead{
		path : path.display().to_string(),
		source : e.into()
	} )?;

	let tree = Tree::from_newick( &newick ).map_err( |e| CliError::TreeRead{
		path : path.display().to_string(),
		source : anyhow::anyhow!( "{e}" )
	} )?;

	let root = tree.get_root().map_err( |e| CliError::TreeRead{
		path : path.display().to_string(),
		source : anyhow::anyhow!( "tree has no root: {e}" )
	} )?;

	let mut nodes = Vec::new();
	convert( &tree, root, &mut nodes );
	let root_idx = nodes.len() - 1;
	Ok( RawTree::new( nodes, root_idx ) )
}

/// Recursively converts the subtree rooted at `id` into `nodes`, post-order, returning the index
/// of the freshly pushed node. Mirrors the post-order `Builder::build` pattern used by
/// `parnas-core`'s own tree preparation.
fn convert( tree : &Tree, id : NodeId, nodes : &mut Vec<RawNode> ) -> usize {
	let node = tree.get( &id ).expect( "node id came from this tree's own traversal" );

	if node.children.is_empty() {
		let label = node.name.clone().unwrap_or_else( || format!( "unnamed_tip_{id:?}" ) );
		nodes.push( RawNode::leaf( label ) );
	}
	else {
		let mut children = Vec::with_capacity( node.children.len() );
		for &child_id in &node.children {
			let weight = tree.get( &child_id )
				.expect( "child id came from this tree's own traversal" )
				.parent_edge
				.unwrap_or( 0.0 );
			let child_idx = convert( tree, child_id, nodes );
			children.push( (child_idx, weight) );
		}
		nodes.push( RawNode::internal( children ) );
	}

	nodes.len() - 1
}
