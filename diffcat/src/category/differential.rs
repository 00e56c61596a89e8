//! # Generic construction library
//!
//! Scalar formulas written once against the contract. Each function takes
//! the interpretation by reference and returns a reusable morphism; the
//! same formula then differentiates identically under every engine.
//!
//! Formulas that need a literal go through [`HasConstants::constant_from`]
//! and therefore return `Result`: an engine that cannot build constants
//! outside an evaluation rejects them at construction time.

use crate::category::cartesian::{diagonal, product};
use crate::category::traits::{
    Category, Endo, HasBinaryProducts, HasConstants, HasScalars, ScalarPair,
};
use crate::utils::errors::Result;

/// `x ↦ x²`, as `* ∘ ⟨id, id⟩`.
pub fn square<C: HasScalars>(cat: &C) -> Endo<C> {
    let diag = diagonal::<C, C::Scalar>(cat);
    cat.compose::<C::Scalar, ScalarPair<C>, C::Scalar>(&cat.mul(), &diag)
}

/// `x ↦ x³`, as `* ∘ (id × square) ∘ ⟨id, id⟩`.
pub fn cube<C: HasScalars>(cat: &C) -> Endo<C> {
    let id_times_square = product::<C, C::Scalar, C::Scalar, C::Scalar, C::Scalar>(
        cat,
        &cat.id::<C::Scalar>(),
        &square(cat),
    );
    let spread = cat.compose::<C::Scalar, ScalarPair<C>, ScalarPair<C>>(
        &id_times_square,
        &diagonal::<C, C::Scalar>(cat),
    );
    cat.compose::<C::Scalar, ScalarPair<C>, C::Scalar>(&cat.mul(), &spread)
}

/// `x ↦ x + c`
pub fn add_constant<C: HasConstants>(cat: &C, c: f64) -> Result<Endo<C>> {
    let k = cat.constant_from::<C::Scalar>(c)?;
    let split = cat.pair::<C::Scalar, C::Scalar, C::Scalar>(&cat.id::<C::Scalar>(), &k);
    Ok(cat.compose::<C::Scalar, ScalarPair<C>, C::Scalar>(&cat.add(), &split))
}

/// `x ↦ c · x`
pub fn mul_constant<C: HasConstants>(cat: &C, c: f64) -> Result<Endo<C>> {
    let k = cat.constant_from::<C::Scalar>(c)?;
    let split = cat.pair::<C::Scalar, C::Scalar, C::Scalar>(&k, &cat.id::<C::Scalar>());
    Ok(cat.compose::<C::Scalar, ScalarPair<C>, C::Scalar>(&cat.mul(), &split))
}

/// `x ↦ a·x² + b·x + c`
pub fn quadratic<C: HasConstants>(cat: &C, a: f64, b: f64, c: f64) -> Result<Endo<C>> {
    let ax2 = cat.compose::<C::Scalar, C::Scalar, C::Scalar>(&mul_constant(cat, a)?, &square(cat));
    let bx = mul_constant(cat, b)?;
    let linear_part = cat.compose::<C::Scalar, ScalarPair<C>, C::Scalar>(
        &cat.add(),
        &cat.pair::<C::Scalar, C::Scalar, C::Scalar>(&ax2, &bx),
    );
    let k = cat.constant_from::<C::Scalar>(c)?;
    Ok(cat.compose::<C::Scalar, ScalarPair<C>, C::Scalar>(
        &cat.add(),
        &cat.pair::<C::Scalar, C::Scalar, C::Scalar>(&linear_part, &k),
    ))
}

/// `x ↦ 1 / x`. At zero the result is whatever IEEE division gives.
pub fn reciprocal<C: HasConstants>(cat: &C) -> Result<Endo<C>> {
    let one = cat.constant_from::<C::Scalar>(1.0)?;
    let split = cat.pair::<C::Scalar, C::Scalar, C::Scalar>(&one, &cat.id::<C::Scalar>());
    Ok(cat.compose::<C::Scalar, ScalarPair<C>, C::Scalar>(&cat.div(), &split))
}

/// `x ↦ (x + a)(x − a) = x² − a²`
pub fn difference_of_squares<C: HasConstants>(cat: &C, a: f64) -> Result<Endo<C>> {
    let split = cat.pair::<C::Scalar, C::Scalar, C::Scalar>(
        &add_constant(cat, a)?,
        &add_constant(cat, -a)?,
    );
    Ok(cat.compose::<C::Scalar, ScalarPair<C>, C::Scalar>(&cat.mul(), &split))
}

/// `x ↦ Σ coeffs[i]·xⁱ` in Horner form. `coeffs` is in ascending order
/// of degree; an empty slice is the zero polynomial.
pub fn polynomial<C: HasConstants>(cat: &C, coeffs: &[f64]) -> Result<Endo<C>> {
    let (leading, lower) = match coeffs.split_last() {
        Some(split) => split,
        None => return cat.constant_from::<C::Scalar>(0.0),
    };
    let mut acc = cat.constant_from::<C::Scalar>(*leading)?;
    for &c in lower.iter().rev() {
        let times_x = cat.compose::<C::Scalar, ScalarPair<C>, C::Scalar>(
            &cat.mul(),
            &cat.pair::<C::Scalar, C::Scalar, C::Scalar>(&acc, &cat.id::<C::Scalar>()),
        );
        let k = cat.constant_from::<C::Scalar>(c)?;
        acc = cat.compose::<C::Scalar, ScalarPair<C>, C::Scalar>(
            &cat.add(),
            &cat.pair::<C::Scalar, C::Scalar, C::Scalar>(&times_x, &k),
        );
    }
    Ok(acc)
}
