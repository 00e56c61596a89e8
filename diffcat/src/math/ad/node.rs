#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One dependency of a tape node: `∂node / ∂parent`, evaluated at the
/// values recorded during the forward pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TapeEdge {
    pub parent: usize,
    pub local_gradient: f64,
}

impl TapeEdge {
    pub fn new(parent: usize, local_gradient: f64) -> Self {
        Self {
            parent,
            local_gradient,
        }
    }
}

/// A recorded value and the edges to the earlier nodes it was computed from.
/// Leaves (variables, constants) have no parents.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TapeNode {
    pub value: f64,
    pub parents: Vec<TapeEdge>,
}

impl TapeNode {
    pub fn leaf(value: f64) -> Self {
        Self {
            value,
            parents: Vec::new(),
        }
    }

    /// Push this node's adjoint into its parents. Accumulates: a parent
    /// reached through several edges receives the sum of every contribution.
    #[inline]
    pub fn propagate_into(&self, adjoint: f64, adjoints: &mut [f64]) {
        for edge in &self.parents {
            adjoints[edge.parent] += adjoint * edge.local_gradient;
        }
    }
}
