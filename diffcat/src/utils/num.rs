use std::ops::{Add, Div, Mul, Neg, Sub};

/// Trait implemented by the scalar carriers the engines compute with.
///
/// Both `Dual` and `TapeVar` implement it, so the ring arrows of every
/// engine are built once, generically, in `Arrow::binary`/`Arrow::unary`.
pub trait Real:
    Clone
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// The primal value carried by this scalar.
    fn value(&self) -> f64;
}
