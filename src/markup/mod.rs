//! Structured markup access.
//!
//! The merge layer never looks inside a markup tree. It needs exactly the
//! operations of [`MarkupTree`]: select nodes by path, read a node's text and
//! raw markup, swap a node for new markup, and serialize the result. Parsing
//! belongs to the implementor's constructor ([`XmlDocument::parse`]).
//!
//! Paths use the small language of [`PathExpr`].

pub mod path;
pub mod xml;

pub use path::{PathExpr, local_name};
pub use xml::{NodeId, XmlDocument};

use crate::core::Json2DocError;

/// A markup tree the document merge can drive.
///
/// Node handles stay valid across [`replace_node`](MarkupTree::replace_node)
/// calls on other nodes, except for nodes inside the replaced one, which
/// become stale and report [`Json2DocError::StaleNode`].
pub trait MarkupTree {
    /// Handle to one node of the tree.
    type Node: Copy + Eq + std::fmt::Debug;

    /// Nodes matching `path`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Json2DocError::InvalidPath`] if the path cannot be parsed.
    fn select(&self, path: &str) -> Result<Vec<Self::Node>, Json2DocError>;

    /// Concatenated text beneath `node`, entities resolved.
    ///
    /// # Errors
    ///
    /// Returns [`Json2DocError::StaleNode`] for replaced nodes.
    fn text_content(&self, node: Self::Node) -> Result<String, Json2DocError>;

    /// The node's markup exactly as it appears in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`Json2DocError::StaleNode`] for replaced nodes.
    fn node_markup(&self, node: Self::Node) -> Result<String, Json2DocError>;

    /// Replace `node` with raw markup; an empty string removes it.
    ///
    /// # Errors
    ///
    /// Returns [`Json2DocError::StaleNode`] for replaced nodes.
    fn replace_node(&mut self, node: Self::Node, markup: &str) -> Result<(), Json2DocError>;

    /// The whole tree as text.
    fn serialize(&self) -> String;
}
