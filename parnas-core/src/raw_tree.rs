//! The generic, arbitrary-arity tree accepted as input to [`prepare`](crate::prepare::prepare).
//!
//! A [`RawTree`] is format-agnostic: it does not know about Newick, Nexus, or any other
//! serialisation. Callers (e.g. the `parnas-cli` application crate) are responsible for building
//! one from whatever tree representation they parse.

/// One node of a [`RawTree`], referenced by its position in [`RawTree::nodes`].
#[derive(Clone, Debug)]
pub enum RawNode {
	/// A tip of the tree.
	Leaf {
		/// The tip's label. Must be unique among all leaves of the tree.
		label : String
	},

	/// An internal branching point.
	Internal {
		/// `(child index, edge weight to that child)` for every child, in no particular order.
		/// An internal node may have any number of children, including zero (which
		/// [`prepare`](crate::prepare::prepare) removes from the tree entirely, the same as a
		/// fully-pruned subtree) or one (a unifurcation, contracted away).
		children : Vec<(usize, f64)>
	}
}

impl RawNode {
	/// Convenience constructor for a labelled leaf.
	pub fn leaf( label : impl Into<String> ) -> RawNode {
		RawNode::Leaf{ label : label.into() }
	}

	/// Convenience constructor for an internal node.
	pub fn internal( children : Vec<(usize, f64)> ) -> RawNode {
		RawNode::Internal{ children }
	}
}

/// A tree in its original, unprocessed shape: arbitrary arity, not necessarily binary, rooted
/// wherever the caller happened to root it (e.g. the trifurcating root dendropy and similar
/// libraries produce for an unrooted Newick string).
#[derive(Clone, Debug)]
pub struct RawTree {
	nodes : Vec<RawNode>,
	root : usize
}

impl RawTree {
	/// Builds a new raw tree from an arena of nodes and the index of the root node.
	///
	/// `root` need not be a leaf or binary; [`prepare`](crate::prepare::prepare) normalises the
	/// shape. The only requirement is that `nodes` forms a single connected, acyclic structure
	/// reachable from `root` — this is not (and cannot cheaply be) validated here, only once edge
	/// weights and leaf counts are checked during preparation.
	pub fn new( nodes : Vec<RawNode>, root : usize ) -> RawTree {
		RawTree{ nodes, root }
	}

	/// All nodes of this tree, indexed as used by [`RawNode::Internal::children`].
	pub fn nodes( &self ) -> &[RawNode] {
		&self.nodes
	}

	/// Index of the root node.
	pub fn root( &self ) -> usize {
		self.root
	}
}
