//! Hooks for syntax tree construction.
//!
//! The parser hands the tree to rules through `ParseContext::tree` and gives
//! it back after the run. It never reads or writes the tree itself.

/// A syntax tree populated by parser rules.
pub trait Tree: Send + 'static {
    type Node: Node;

    /// Returns the root node, if one has been built.
    fn root(&self) -> Option<&Self::Node>;
}

/// A node of a syntax tree.
pub trait Node: Sized {
    /// Appends `child` below this node.
    fn add_child(&mut self, child: Self);
}

/// The empty tree, for parsers that only validate their input.
impl Tree for () {
    type Node = ();

    fn root(&self) -> Option<&()> {
        None
    }
}

impl Node for () {
    fn add_child(&mut self, _child: ()) {}
}
