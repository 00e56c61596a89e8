use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::node::TapeNode;
use super::tapevar::TapeVar;
use crate::utils::errors::{AdError, Result};

/// Initial node capacity of a tape created with [`Tape::new`].
pub const DEFAULT_TAPE_CAPACITY: usize = 128;

pub(crate) type Nodes = Rc<RefCell<Vec<TapeNode>>>;

/// # Tape
/// Append-only log of one reverse-mode evaluation.
///
/// Nodes are numbered in creation order and every edge points to an
/// earlier node, so the tape is a DAG in topological order by
/// construction. Handles ([`TapeVar`]) only hold a weak reference plus an
/// index; the tape is the single owner of the node storage and is meant to
/// be built, swept backwards once, and dropped within one evaluation.
pub struct Tape {
    nodes: Nodes,
}

impl Tape {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TAPE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Rc::new(RefCell::new(Vec::with_capacity(capacity))),
        }
    }

    /// Record an input leaf.
    pub fn variable(&self, value: f64) -> TapeVar {
        let index = {
            let mut nodes = self.nodes.borrow_mut();
            nodes.push(TapeNode::leaf(value));
            nodes.len() - 1
        };
        TapeVar::new(index, Rc::downgrade(&self.nodes))
    }

    /// A constant is a leaf like any other; it simply never gets read back.
    pub fn constant(&self, value: f64) -> TapeVar {
        self.variable(value)
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    /// Whether `var` was recorded on this tape.
    pub fn owns(&self, var: &TapeVar) -> bool {
        var.is_on(&self.nodes)
    }

    pub fn value(&self, index: usize) -> Option<f64> {
        self.nodes.borrow().get(index).map(|n| n.value)
    }

    /// Snapshot of the recorded nodes.
    pub fn nodes(&self) -> Vec<TapeNode> {
        self.nodes.borrow().clone()
    }

    /// Every edge points strictly backwards.
    pub fn is_topologically_ordered(&self) -> bool {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .all(|(i, node)| node.parents.iter().all(|edge| edge.parent < i))
    }

    /// Reverse sweep seeded at `output_index`.
    ///
    /// Returns one adjoint per node: `∂output / ∂node`. Nodes are visited in
    /// descending index order, which is a valid reverse topological order
    /// because of the append-only invariant, and contributions to a node
    /// reached through several paths are summed before it is propagated
    /// further.
    pub fn backpropagate(&self, output_index: usize) -> Result<Vec<f64>> {
        let nodes = self.nodes.borrow();
        if output_index >= nodes.len() {
            return Err(AdError::NodeOutOfRange {
                index: output_index,
                len: nodes.len(),
            });
        }
        let mut adjoints = vec![0.0; nodes.len()];
        adjoints[output_index] = 1.0;
        // nodes above the output never receive an adjoint
        for i in (0..=output_index).rev() {
            let adjoint = adjoints[i];
            nodes[i].propagate_into(adjoint, &mut adjoints);
        }
        Ok(adjoints)
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.borrow().iter().enumerate() {
            write!(f, "#{} = {}", i, node.value)?;
            if !node.parents.is_empty() {
                let edges: Vec<String> = node
                    .parents
                    .iter()
                    .map(|e| format!("#{}×{}", e.parent, e.local_gradient))
                    .collect();
                write!(f, " <- [{}]", edges.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
