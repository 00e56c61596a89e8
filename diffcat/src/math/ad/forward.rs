use crate::category::arrow::{cartesian_arrows, Arrow};
use crate::category::traits::{
    BinaryOp, DifferentialCategory, Endo, HasConstants, HasScalars, Literal, Object,
};
use crate::math::ad::dual::Dual;
use crate::utils::errors::Result;

/// # ForwardMode
/// The dual-number interpretation of the contract.
///
/// Morphisms are `Arrow<ForwardMode, A, B>`, the scalar object is [`Dual`],
/// the terminal object is `()` and products are tuples. The engine holds no
/// state; use the shared [`FORWARD`] value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardMode;

pub static FORWARD: ForwardMode = ForwardMode;

impl ForwardMode {
    pub fn instance() -> &'static ForwardMode {
        &FORWARD
    }

    /// Value and derivative of `f` at `x` in one pass.
    pub fn evaluate(&self, f: &Arrow<ForwardMode, Dual, Dual>, x: f64) -> Dual {
        f.apply(Dual::variable(x))
    }

    pub fn value_at(&self, f: &Arrow<ForwardMode, Dual, Dual>, x: f64) -> f64 {
        f.apply(Dual::constant(x)).value
    }
}

cartesian_arrows!(ForwardMode);

impl HasScalars for ForwardMode {
    type Scalar = Dual;

    fn add(&self) -> BinaryOp<Self> {
        Arrow::binary(|a: Dual, b: Dual| a + b, "+")
    }

    fn mul(&self) -> BinaryOp<Self> {
        Arrow::binary(|a: Dual, b: Dual| a * b, "*")
    }

    fn neg(&self) -> Endo<Self> {
        Arrow::unary(|a: Dual| -a, "-")
    }

    fn div(&self) -> BinaryOp<Self> {
        Arrow::binary(|a: Dual, b: Dual| a / b, "/")
    }
}

impl HasConstants for ForwardMode {
    fn zero(&self) -> Result<Literal<Self>> {
        Ok(Arrow::named(|_: ()| Dual::constant(0.0), "0"))
    }

    fn one(&self) -> Result<Literal<Self>> {
        Ok(Arrow::named(|_: ()| Dual::constant(1.0), "1"))
    }

    fn constant(&self, value: f64) -> Result<Literal<Self>> {
        Ok(Arrow::named(
            move |_: ()| Dual::constant(value),
            value.to_string(),
        ))
    }
}

impl DifferentialCategory for ForwardMode {
    /// Structural differential: `D[f](x, t) = (f(x), f(t))`.
    ///
    /// Dual arithmetic already carries the tangent through every operation,
    /// so this only repackages `f` onto the doubled object. It is
    /// functorial by construction (`D[g ∘ f] = D[g] ∘ D[f]`, `D[id] = id`,
    /// `D[πᵢ]` projects each component) but it is not a tangent transform
    /// on its own; [`DifferentialCategory::derivative_at`] is the numeric
    /// entry point.
    fn d<A: Object, B: Object>(
        &self,
        f: &Self::Hom<A, B>,
    ) -> Result<Self::Hom<Self::Product<A, A>, Self::Product<B, B>>> {
        let name = format!("D[{}]", f.name().unwrap_or("f"));
        let inner = f.clone();
        Ok(Arrow::named(
            move |(primal, tangent): (A, A)| (inner.apply(primal), inner.apply(tangent)),
            name,
        ))
    }

    fn derivative_at(&self, f: &Endo<Self>, at: f64) -> f64 {
        self.evaluate(f, at).derivative
    }
}

impl std::fmt::Display for ForwardMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ForwardMode")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::traits::{Category, HasBinaryProducts, HasTerminal};
    use approx::assert_relative_eq;

    fn square() -> Endo<ForwardMode> {
        let fwd = ForwardMode::instance();
        let diag = fwd.pair(&fwd.id::<Dual>(), &fwd.id::<Dual>());
        fwd.compose(&fwd.mul(), &diag)
    }

    #[test]
    fn test_square_derivative() {
        let fwd = ForwardMode::instance();
        assert_eq!(fwd.derivative_at(&square(), 3.0), 6.0);
        assert_eq!(fwd.evaluate(&square(), 3.0), Dual::new(9.0, 6.0));
        assert_eq!(fwd.value_at(&square(), -2.0), 4.0);
    }

    #[test]
    fn test_names() {
        let fwd = ForwardMode::instance();
        assert_eq!(square().name(), Some("* ∘ ⟨id, id⟩"));
        assert_eq!(fwd.terminate::<Dual>().name(), Some("!"));
        assert_eq!(fwd.constant(2.5).unwrap().name(), Some("2.5"));
        assert_eq!(fwd.d(&square()).unwrap().name(), Some("D[* ∘ ⟨id, id⟩]"));
        assert_eq!(fwd.to_string(), "ForwardMode");
    }

    #[test]
    fn test_constants_have_zero_derivative() {
        let fwd = ForwardMode::instance();
        assert_eq!(fwd.zero().unwrap().apply(()), Dual::constant(0.0));
        assert_eq!(fwd.one().unwrap().apply(()), Dual::constant(1.0));
        let c = fwd.constant_from::<Dual>(4.0).unwrap();
        assert_eq!(fwd.derivative_at(&c, 10.0), 0.0);
        assert_eq!(fwd.value_at(&c, 10.0), 4.0);
    }

    #[test]
    fn test_derived_sub() {
        let fwd = ForwardMode::instance();
        let sub = fwd.sub();
        let out = sub.apply((Dual::variable(5.0), Dual::constant(2.0)));
        assert_eq!(out, Dual::new(3.0, 1.0));
        assert_eq!(sub.name(), Some("+ ∘ ⟨π₁, - ∘ π₂⟩"));
    }

    #[test]
    fn test_reciprocal_by_hand() {
        let fwd = ForwardMode::instance();
        let one = fwd.constant_from::<Dual>(1.0).unwrap();
        let recip = fwd.compose(&fwd.div(), &fwd.pair(&one, &fwd.id::<Dual>()));
        assert_relative_eq!(fwd.derivative_at(&recip, 2.0), -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_d_is_functorial() {
        let fwd = ForwardMode::instance();
        let sq = square();
        let neg = fwd.neg();
        let composed = fwd.d(&fwd.compose(&neg, &sq)).unwrap();
        let chained = fwd.compose(&fwd.d(&neg).unwrap(), &fwd.d(&sq).unwrap());
        let input = (Dual::variable(3.0), Dual::new(0.5, 2.0));
        assert_eq!(composed.apply(input), chained.apply(input));

        let d_id = fwd.d(&fwd.id::<Dual>()).unwrap();
        assert_eq!(d_id.apply(input), input);
    }

    #[test]
    fn test_d_of_projection_projects_each_component() {
        let fwd = ForwardMode::instance();
        let d_fst = fwd.d(&fwd.fst::<Dual, Dual>()).unwrap();
        let a = (Dual::variable(1.0), Dual::constant(2.0));
        let t = (Dual::new(0.1, 0.0), Dual::new(0.2, 0.0));
        assert_eq!(d_fst.apply((a, t)), (a.0, t.0));
    }

    #[test]
    fn test_gradient_is_unsupported() {
        let fwd = ForwardMode::instance();
        let err = fwd.gradient_at(&fwd.fst::<Dual, Dual>(), &[1.0, 2.0]);
        assert!(matches!(
            err,
            Err(crate::utils::errors::AdError::Unsupported { operation: "gradient_at", .. })
        ));
    }
}
