//! # diffcat
//!
//! Automatic differentiation expressed as interpretations of one abstract
//! contract: cartesian categories with scalars, constants and a
//! differential combinator.
//!
//! Formulas such as [`category::differential::square`] are written once
//! against the traits in [`category::traits`] and then evaluated by either
//! engine:
//!
//! - [`math::ad::forward::ForwardMode`] carries dual numbers through the
//!   formula in a single pass;
//! - [`math::ad::reverse::ReverseMode`] records a tape and sweeps it
//!   backwards.
//!
//! ```
//! use diffcat::prelude::*;
//!
//! let fwd = ForwardMode::instance();
//! let rev = ReverseMode::instance();
//! assert_eq!(fwd.derivative_at(&square(fwd), 3.0), 6.0);
//! assert_eq!(rev.derivative_at(&square(rev), 3.0), 6.0);
//! ```

pub mod category;
pub mod math;
pub mod prelude;
pub mod utils;

pub use utils::errors::{AdError, Result};
