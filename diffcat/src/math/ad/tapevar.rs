//! Handles to values recorded on a [`Tape`](super::tape::Tape).
//!
//! Every arithmetic operation on a `TapeVar` evaluates immediately and
//! appends one node holding the result and the local partials with respect
//! to each operand. The handle itself is just an index plus a weak
//! back-reference to the tape storage.

use std::cell::RefCell;
use std::fmt;
use std::ops::*;
use std::rc::{Rc, Weak};

use super::node::{TapeEdge, TapeNode};
use super::tape::Nodes;
use crate::utils::errors::{AdError, Result};
use crate::utils::num::Real;

/* ═════════════════════  OPERATOR “TYPE CLASSES”  ════════════════════ */

pub trait BinOp {
    fn eval(l: f64, r: f64) -> f64;
    fn d_left(l: f64, r: f64) -> f64;
    fn d_right(l: f64, r: f64) -> f64;
}

pub struct AddOp;
impl BinOp for AddOp {
    fn eval(l: f64, r: f64) -> f64 {
        l + r
    }
    fn d_left(_l: f64, _r: f64) -> f64 {
        1.0
    }
    fn d_right(_l: f64, _r: f64) -> f64 {
        1.0
    }
}

pub struct SubOp;
impl BinOp for SubOp {
    fn eval(l: f64, r: f64) -> f64 {
        l - r
    }
    fn d_left(_l: f64, _r: f64) -> f64 {
        1.0
    }
    fn d_right(_l: f64, _r: f64) -> f64 {
        -1.0
    }
}

pub struct MulOp;
impl BinOp for MulOp {
    fn eval(l: f64, r: f64) -> f64 {
        l * r
    }
    fn d_left(_l: f64, r: f64) -> f64 {
        r
    }
    fn d_right(l: f64, _r: f64) -> f64 {
        l
    }
}

pub struct DivOp;
impl BinOp for DivOp {
    fn eval(l: f64, r: f64) -> f64 {
        l / r
    }
    fn d_left(_l: f64, r: f64) -> f64 {
        1.0 / r
    }
    fn d_right(l: f64, r: f64) -> f64 {
        -l / (r * r)
    }
}

/* ═══════════════════════  HANDLE: TapeVar  ═════════════════════════ */

#[derive(Clone)]
pub struct TapeVar {
    index: usize,
    tape: Weak<RefCell<Vec<TapeNode>>>,
}

impl TapeVar {
    pub(crate) fn new(index: usize, tape: Weak<RefCell<Vec<TapeNode>>>) -> Self {
        Self { index, tape }
    }

    /// Position on the tape.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn try_value(&self) -> Result<f64> {
        let tape = self
            .tape
            .upgrade()
            .ok_or(AdError::DetachedVar { index: self.index })?;
        let nodes = tape.borrow();
        nodes
            .get(self.index)
            .map(|n| n.value)
            .ok_or(AdError::NodeOutOfRange {
                index: self.index,
                len: nodes.len(),
            })
    }

    /// Recorded value. Panics if the tape has already been dropped.
    pub fn value(&self) -> f64 {
        match self.try_value() {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }

    pub(crate) fn is_on(&self, nodes: &Nodes) -> bool {
        std::ptr::eq(self.tape.as_ptr(), Rc::as_ptr(nodes))
    }

    fn storage(&self) -> Nodes {
        match self.tape.upgrade() {
            Some(tape) => tape,
            None => panic!("{}", AdError::DetachedVar { index: self.index }),
        }
    }

    fn push(&self, nodes: &mut Vec<TapeNode>, node: TapeNode) -> TapeVar {
        nodes.push(node);
        TapeVar::new(nodes.len() - 1, self.tape.clone())
    }

    fn binary<O: BinOp>(&self, rhs: &TapeVar) -> TapeVar {
        assert!(
            Weak::ptr_eq(&self.tape, &rhs.tape),
            "TapeVar #{} and TapeVar #{} were recorded on different tapes",
            self.index,
            rhs.index
        );
        let tape = self.storage();
        let mut nodes = tape.borrow_mut();
        let (l, r) = (nodes[self.index].value, nodes[rhs.index].value);
        let node = TapeNode {
            value: O::eval(l, r),
            parents: vec![
                TapeEdge::new(self.index, O::d_left(l, r)),
                TapeEdge::new(rhs.index, O::d_right(l, r)),
            ],
        };
        self.push(&mut nodes, node)
    }

    fn negate(&self) -> TapeVar {
        let tape = self.storage();
        let mut nodes = tape.borrow_mut();
        let node = TapeNode {
            value: -nodes[self.index].value,
            parents: vec![TapeEdge::new(self.index, -1.0)],
        };
        self.push(&mut nodes, node)
    }
}

/* ═══════════════════════  OPERATOR OVERLOADS  ══════════════════════ */

macro_rules! tape_bin_op {
    ($Trait:ident, $method:ident, $Op:ty) => {
        impl $Trait for TapeVar {
            type Output = TapeVar;
            #[inline]
            fn $method(self, rhs: TapeVar) -> TapeVar {
                self.binary::<$Op>(&rhs)
            }
        }

        impl<'a> $Trait<&'a TapeVar> for &'a TapeVar {
            type Output = TapeVar;
            #[inline]
            fn $method(self, rhs: &'a TapeVar) -> TapeVar {
                self.binary::<$Op>(rhs)
            }
        }
    };
}

tape_bin_op!(Add, add, AddOp);
tape_bin_op!(Sub, sub, SubOp);
tape_bin_op!(Mul, mul, MulOp);
tape_bin_op!(Div, div, DivOp);

impl Neg for TapeVar {
    type Output = TapeVar;
    #[inline]
    fn neg(self) -> TapeVar {
        self.negate()
    }
}

impl Neg for &TapeVar {
    type Output = TapeVar;
    #[inline]
    fn neg(self) -> TapeVar {
        self.negate()
    }
}

impl Real for TapeVar {
    #[inline]
    fn value(&self) -> f64 {
        TapeVar::value(self)
    }
}

impl fmt::Display for TapeVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_value() {
            Ok(v) => write!(f, "TapeVar[{}]={}", self.index, v),
            Err(_) => write!(f, "TapeVar[{}]=<detached>", self.index),
        }
    }
}

impl fmt::Debug for TapeVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapeVar")
            .field("index", &self.index)
            .field("value", &self.try_value().ok())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ad::tape::Tape;

    #[test]
    fn test_ops_record_one_node_each() {
        let tape = Tape::new();
        let a = tape.variable(3.0);
        let b = tape.variable(4.0);
        let sum = &a + &b;
        let prod = a.clone() * b.clone();
        let quot = &a / &b;
        let diff = a - b;
        assert_eq!(sum.value(), 7.0);
        assert_eq!(prod.value(), 12.0);
        assert_eq!(quot.value(), 0.75);
        assert_eq!(diff.value(), -1.0);
        assert_eq!(tape.len(), 6);
        assert_eq!(diff.index(), 5);
    }

    #[test]
    fn test_display() {
        let tape = Tape::new();
        let x = tape.variable(2.5);
        let y = -&x;
        assert_eq!(x.to_string(), "TapeVar[0]=2.5");
        assert_eq!(y.to_string(), "TapeVar[1]=-2.5");
    }

    #[test]
    fn test_detached_handle() {
        let x = {
            let tape = Tape::new();
            tape.variable(1.0)
        };
        assert_eq!(x.try_value(), Err(AdError::DetachedVar { index: 0 }));
        assert_eq!(x.to_string(), "TapeVar[0]=<detached>");
    }

    #[test]
    #[should_panic(expected = "outlived the tape")]
    fn test_detached_arithmetic_panics() {
        let x = {
            let tape = Tape::new();
            tape.variable(1.0)
        };
        let _ = -x;
    }

    #[test]
    #[should_panic(expected = "different tapes")]
    fn test_cross_tape_panics() {
        let first = Tape::new();
        let second = Tape::new();
        let a = first.variable(1.0);
        let b = second.variable(2.0);
        let _ = &a + &b;
    }

    #[test]
    fn test_division_by_zero_is_ieee() {
        let tape = Tape::new();
        let one = tape.constant(1.0);
        let zero = tape.variable(0.0);
        let y = &one / &zero;
        assert!(y.value().is_infinite());
        let nodes = tape.nodes();
        assert!(nodes[y.index()].parents[0].local_gradient.is_infinite());
        assert!(nodes[y.index()].parents[1].local_gradient.is_infinite());
    }
}
