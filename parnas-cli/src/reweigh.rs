//! Ancestral reweighing (§4.9, ambient CLI collaborator, optional): re-weighs tree edges by the
//! number of inferred ancestral substitutions per branch, shelling out to `treetime` exactly as
//! the original tool does (`examples/original_source/parnaslib/options.py::reweigh_tree_ancestral`).

use std::path::Path;
use std::process::Command;

use parnas_core::{RawNode, RawTree};
use regex::Regex;

use crate::error::CliError;

/// Runs `treetime ancestral` on `tree_path`/`alignment_path` and returns a [`RawTree`] whose edge
/// weights are substitution counts rather than branch lengths.
///
/// `aa` selects amino-acid mode. The `treetime` log is written to
/// `treetime_ancestral_<tree file name>/treetime.log`, matching the original tool's output
/// directory naming.
pub fn reweigh_tree_ancestral( tree_path : &Path, alignment_path : &Path, aa : bool ) -> Result<RawTree, CliError> {
	let tree_name = tree_path.file_name()
		.map( |n| n.to_string_lossy().into_owned() )
		.unwrap_or_else( || "tree".to_string() );
	let outdir = format!( "treetime_ancestral_{tree_name}" );
	std::fs::create_dir_all( &outdir ).map_err( |e| CliError::Reweigh( format!(
		"could not create output directory \"{outdir}\": {e}"
	) ) )?;

	let log_path = format!( "{outdir}/treetime.log" );
	log::info!( "Inferring ancestral substitutions with TreeTime. The log will be written to \"{log_path}\"." );

	let log_file = std::fs::File::create( &log_path ).map_err( |e| CliError::Reweigh( format!(
		"could not create log file \"{log_path}\": {e}"
	) ) )?;

	let mut command = Command::new( "treetime" );
	command.arg( "ancestral" )
		.arg( "--aln" ).arg( alignment_path )
		.arg( "--tree" ).arg( tree_path )
		.arg( "--outdir" ).arg( &outdir )
		.arg( "--gtr" ).arg( "infer" )
		.stdout( log_file.try_clone().map_err( |e| CliError::Reweigh( e.to_string() ) )? )
		.stderr( log_file );
	if aa {
		command.arg( "--aa" );
	}

	let status = command.status().map_err( |e| CliError::Reweigh( format!(
		"failed to launch treetime: {e}. Please see \"{log_path}\" and consider inferring the ancestral states manually."
	) ) )?;
	if ! status.success() {
		return Err( CliError::Reweigh( format!(
			"treetime exited with {status}. Please see \"{log_path}\" and consider inferring the ancestral states manually."
		) ) );
	}

	let annotated_path = format!( "{outdir}/annotated_tree.nexus" );
	let annotated = std::fs::read_to_string( &annotated_path ).map_err( |e| CliError::Reweigh( format!(
		"failed to read treetime output \"{annotated_path}\": {e}. Please see \"{log_path}\"."
	) ) )?;

	log::info!( "Re-weighing the tree based on ancestral substitutions." );
	parse_annotated_tree( &annotated )
}

/// Extracts the Newick string embedded in a treetime `annotated_tree.nexus` file's `tree ... =
/// (...);` line and converts it into a [`RawTree`] whose edge weights are substitution counts,
/// parsed out of each node's `mutations="..."` comment.
///
/// Mirrors the original's comma-stripping workaround (there, commas inside the annotation are
/// replaced with `||` because dendropy chokes on them); here, mutations are simply counted
/// directly from the comma-separated list without needing that workaround.
fn parse_annotated_tree( nexus : &str ) -> Result<RawTree, CliError> {
	let tree_line = Regex::new( r"(?is)tree\s+\S+\s*=\s*(\(.*;)" ).unwrap();
	let newick = tree_line.captures( nexus )
		.and_then( |c| c.get( 1 ) )
		.map( |m| m.as_str().to_string() )
		.ok_or_else( || CliError::Reweigh( "could not locate a tree statement in treetime's nexus output".to_string() ) )?;

	let mut parser = AnnotatedNewickParser{ chars : newick.chars().collect(), pos : 0, nodes : Vec::new(), last_weight : None };
	let root = parser.parse_subtree()?;
	Ok( RawTree::new( parser.nodes, root ) )
}

/// A small recursive-descent parser for Newick extended with FigTree-style `[&key="value",...]`
/// comments, which is the shape `treetime`'s annotated nexus output embeds per node.
struct AnnotatedNewickParser {
	chars : Vec<char>,
	pos : usize,
	nodes : Vec<RawNode>,
	/// Substitution count parsed from the most recently consumed mutation comment, stashed here
	/// because the comment belongs to the *edge above* a node but is only visible while parsing
	/// that node itself; `parse_child` collects it immediately afterwards.
	last_weight : Option<f64>
}

impl AnnotatedNewickParser {
	fn peek( &self ) -> Option<char> {
		self.chars.get( self.pos ).copied()
	}

	fn bump( &mut self ) -> Option<char> {
		let c = self.peek();
		if c.is_some() {
			self.pos += 1;
		}
		c
	}

	/// Parses one subtree (a leaf or a parenthesised list of children) starting at `self.pos`,
	/// including its trailing label, branch length, and mutation annotation. Returns the index of
	/// the freshly pushed node.
	fn parse_subtree( &mut self ) -> Result<usize, CliError> {
		let children = if self.peek() == Some( '(' ) {
			self.bump();
			let mut kids = Vec::new();
			loop {
				let (child_idx, weight) = self.parse_child()?;
				kids.push( (child_idx, weight) );
				match self.peek() {
					Some( ',' ) => { self.bump(); }
					Some( ')' ) => { self.bump(); break; }
					_ => return Err( CliError::Reweigh( "unexpected end of tree statement".to_string() ) )
				}
			}
			Some( kids )
		}
		else {
			None
		};

		let label = self.parse_label();
		let _branch_length = self.parse_branch_length();
		// parse_mutation_comment stashes the substitution count in self.last_weight; the caller
		// (parse_child) attaches it to the edge above this node, so the return value is unused here.
		let _ = self.parse_mutation_comment();

		match children {
			Some( mut kids ) => {
				if kids.len() == 1 {
					// unifurcation: fold away, matching parnas-core's own contraction rule.
					return Ok( kids.pop().unwrap().0 );
				}
				self.nodes.push( RawNode::internal( kids ) );
			}
			None => {
				self.nodes.push( RawNode::leaf( label.unwrap_or_else( || format!( "unnamed_tip_{}", self.nodes.len() ) ) ) );
			}
		}
		Ok( self.nodes.len() - 1 )
	}

	/// Parses a single child within a parenthesised list, returning its node index and the
	/// substitution count on the edge above it.
	fn parse_child( &mut self ) -> Result<(usize, f64), CliError> {
		let idx = self.parse_subtree()?;
		let weight = self.last_weight.take().unwrap_or( 0.0 );
		Ok( (idx, weight) )
	}

	fn parse_label( &mut self ) -> Option<String> {
		let start = self.pos;
		while let Some( c ) = self.peek() {
			if c == ':' || c == ',' || c == ')' || c == '(' || c == ';' || c == '[' {
				break;
			}
			self.bump();
		}
		if self.pos > start {
			Some( self.chars[start..self.pos].iter().collect() )
		}
		else {
			None
		}
	}

	fn parse_branch_length( &mut self ) -> Option<f64> {
		if self.peek() != Some( ':' ) {
			return None;
		}
		self.bump();
		let start = self.pos;
		while let Some( c ) = self.peek() {
			if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || c == '+' || c == '-' {
				self.bump();
			}
			else {
				break;
			}
		}
		let text : String = self.chars[start..self.pos].iter().collect();
		text.parse().ok()
	}

	/// Parses a trailing `[&key="value",...]` comment, returning the raw `mutations` value if
	/// present, and stashes the resulting substitution count in `self.last_weight` so the parent
	/// call (`parse_child`) can attach it to the edge.
	fn parse_mutation_comment( &mut self ) -> Option<String> {
		if self.peek() != Some( '[' ) {
			self.last_weight = Some( 0.0 );
			return None;
		}
		let start = self.pos;
		while let Some( c ) = self.bump() {
			if c == ']' {
				break;
			}
		}
		let comment : String = self.chars[start..self.pos].iter().collect();

		let re = Regex::new( r#"mutations="([^"]*)""# ).unwrap();
		let value = re.captures( &comment ).and_then( |c| c.get( 1 ) ).map( |m| m.as_str().to_string() );
		self.last_weight = Some( value.as_deref().map_or( 0.0, count_mutations ) as f64 );
		value
	}
}

/// Counts substitutions in a comma-separated `mutations="A1G,C2T"` value: zero for an empty
/// string, otherwise one more than the number of commas.
fn count_mutations( mutations : &str ) -> usize {
	if mutations.trim().is_empty() {
		0
	}
	else {
		mutations.split( ',' ).count()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_count_mutations() {
		assert_eq!( count_mutations( "" ), 0 );
		assert_eq!( count_mutations( "A1G" ), 1 );
		assert_eq!( count_mutations( "A1G,C2T,G3A" ), 3 );
	}

	#[test]
	fn test_parse_annotated_tree_extracts_substitution_weights() {
		let nexus = r#"
#NEXUS
Begin trees;
tree 1 = (A:0.1[&mutations="A1G,C2T"],B:0.2[&mutations=""]):0.05[&mutations=""];
End;
"#;
		let raw = parse_annotated_tree( nexus ).unwrap();
		let leaf_weight = |label : &str| -> f64 {
			for node in raw.nodes() {
				if let RawNode::Internal{ children } = node {
					for &(idx, w) in children {
						if let RawNode::Leaf{ label : l } = &raw.nodes()[idx] {
							if l == label {
								return w;
							}
						}
					}
				}
			}
			panic!( "leaf {label} not found" );
		};
		assert_eq!( leaf_weight( "A" ), 2.0 );
		assert_eq!( leaf_weight( "B" ), 0.0 );
	}
}
