//! Dual numbers for forward-mode AD.
//!
//! A `Dual` carries a primal value together with its derivative with respect
//! to one chosen input. Arithmetic applies the sum, product and quotient
//! rules exactly, so evaluating a formula on `Dual::variable(x)` yields
//! `(f(x), f'(x))` in a single pass.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::num::Real;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dual {
    pub value: f64,
    pub derivative: f64,
}

impl Dual {
    #[inline]
    pub fn new(value: f64, derivative: f64) -> Self {
        Self { value, derivative }
    }

    /// The seeded input: `dx/dx = 1`.
    #[inline]
    pub fn variable(x: f64) -> Self {
        Self::new(x, 1.0)
    }

    #[inline]
    pub fn constant(c: f64) -> Self {
        Self::new(c, 0.0)
    }
}

impl Add for Dual {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value, self.derivative + rhs.derivative)
    }
}

impl Sub for Dual {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul for Dual {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.value * rhs.value,
            self.derivative * rhs.value + self.value * rhs.derivative,
        )
    }
}

impl Div for Dual {
    type Output = Self;
    /// Quotient rule. A zero divisor is not trapped: the result carries
    /// the IEEE infinities/NaNs of plain `f64` division.
    #[inline]
    fn div(self, rhs: Self) -> Self {
        let denom = rhs.value * rhs.value;
        Self::new(
            self.value / rhs.value,
            (self.derivative * rhs.value - self.value * rhs.derivative) / denom,
        )
    }
}

impl Neg for Dual {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.value, -self.derivative)
    }
}

impl From<f64> for Dual {
    fn from(c: f64) -> Self {
        Dual::constant(c)
    }
}

impl fmt::Display for Dual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.value, self.derivative)
    }
}

impl Real for Dual {
    #[inline]
    fn value(&self) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_seeds() {
        assert_eq!(Dual::variable(3.0), Dual::new(3.0, 1.0));
        assert_eq!(Dual::constant(3.0), Dual::new(3.0, 0.0));
        assert_eq!(Dual::from(2.5), Dual::constant(2.5));
    }

    #[test]
    fn test_product_rule() {
        let x = Dual::variable(3.0);
        let y = x * x;
        assert_eq!(y.value, 9.0);
        assert_eq!(y.derivative, 6.0);
    }

    #[test]
    fn test_quotient_rule() {
        // d/dx (1/x) at 2 = -1/4
        let y = Dual::constant(1.0) / Dual::variable(2.0);
        assert_relative_eq!(y.value, 0.5, epsilon = 1e-12);
        assert_relative_eq!(y.derivative, -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_sub_and_neg() {
        let x = Dual::variable(4.0);
        let y = x - Dual::constant(1.5);
        assert_eq!(y, Dual::new(2.5, 1.0));
        assert_eq!(-x, Dual::new(-4.0, -1.0));
    }

    #[test]
    fn test_division_by_zero_is_ieee() {
        let y = Dual::constant(1.0) / Dual::variable(0.0);
        assert!(y.value.is_infinite());
        assert!(y.derivative.is_infinite() && y.derivative < 0.0);

        let z = Dual::variable(0.0) / Dual::variable(0.0);
        assert!(z.value.is_nan());
        assert!(z.derivative.is_nan());
    }

    #[test]
    fn test_display() {
        assert_eq!(Dual::new(1.5, -2.0).to_string(), "(1.5, -2)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_shape() {
        let json = serde_json::to_string(&Dual::variable(2.0)).unwrap();
        assert_eq!(json, r#"{"value":2.0,"derivative":1.0}"#);
    }
}
