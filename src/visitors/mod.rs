//! Node graph visitors

mod bottom_up;

pub use self::bottom_up::BottomUpTransformer;

use crate::errors::GeneratorResult;
use crate::nodes::Node;

/// One rewrite: which nodes it applies to, and what they become.
///
/// `transform` is only called with nodes for which `select` returned true. A
/// transform that finds an unexpected node kind must return
/// [`GeneratorError::NodeKindMismatch`](crate::errors::GeneratorError::NodeKindMismatch)
/// rather than guess.
pub trait TransformRule {
    fn select(&self, node: &Node) -> bool;

    fn transform(&self, node: Node) -> GeneratorResult<Node>;
}

/// A [`TransformRule`] built from two closures
pub struct FnRule<S, T> {
    select: S,
    transform: T,
}

impl<S, T> FnRule<S, T>
where
    S: Fn(&Node) -> bool,
    T: Fn(Node) -> GeneratorResult<Node>,
{
    pub fn new(select: S, transform: T) -> Self {
        Self { select, transform }
    }
}

impl<S, T> TransformRule for FnRule<S, T>
where
    S: Fn(&Node) -> bool,
    T: Fn(Node) -> GeneratorResult<Node>,
{
    fn select(&self, node: &Node) -> bool {
        (self.select)(node)
    }

    fn transform(&self, node: Node) -> GeneratorResult<Node> {
        (self.transform)(node)
    }
}
