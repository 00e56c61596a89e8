//! # Contract layer
//!
//! The operation sets every interpretation supplies. Constructions in
//! [`crate::category::cartesian`] and [`crate::category::differential`] are
//! written once against these traits and evaluated by whichever engine is
//! plugged in.
//!
//! Morphism, product and scalar carriers are generic associated types, so
//! an engine picks its own concrete representation while generic code only
//! ever talks about `C::Hom<A, B>`. Generic code has to name the object
//! types explicitly (`cat.id::<A>()`): the projections are not injective,
//! so inference cannot recover them.

use crate::utils::errors::{AdError, Result};

/// Anything usable as an object of a category.
pub trait Object: Clone + 'static {}

impl<T: Clone + 'static> Object for T {}

/// Product of the scalar object with itself, `R × R`.
pub type ScalarPair<C> = <C as HasBinaryProducts>::Product<
    <C as HasScalars>::Scalar,
    <C as HasScalars>::Scalar,
>;

/// A scalar endomorphism `R → R`.
pub type Endo<C> =
    <C as Category>::Hom<<C as HasScalars>::Scalar, <C as HasScalars>::Scalar>;

/// A binary scalar operation `R × R → R`.
pub type BinaryOp<C> = <C as Category>::Hom<ScalarPair<C>, <C as HasScalars>::Scalar>;

/// A scalar literal `1 → R`.
pub type Literal<C> =
    <C as Category>::Hom<<C as HasTerminal>::Terminal, <C as HasScalars>::Scalar>;

/// # Category
/// Identity and composition.
///
/// Laws: `compose(h, compose(g, f)) = compose(compose(h, g), f)` and
/// `compose(id, f) = f = compose(f, id)`.
pub trait Category {
    type Hom<A: Object, B: Object>: Clone;

    fn id<A: Object>(&self) -> Self::Hom<A, A>;

    /// `g ∘ f`: apply `f` first, then `g`.
    fn compose<A: Object, B: Object, C: Object>(
        &self,
        g: &Self::Hom<B, C>,
        f: &Self::Hom<A, B>,
    ) -> Self::Hom<A, C>;
}

/// # HasTerminal
/// A chosen terminal object `1` with the unique arrow `! : A → 1`.
pub trait HasTerminal: Category {
    type Terminal: Object;

    fn terminate<A: Object>(&self) -> Self::Hom<A, Self::Terminal>;
}

/// # HasBinaryProducts
/// Chosen binary products with projections and pairing.
///
/// Laws: `fst ∘ pair(f, g) = f` and `snd ∘ pair(f, g) = g`.
pub trait HasBinaryProducts: Category {
    type Product<A: Object, B: Object>: Object;

    fn fst<A: Object, B: Object>(&self) -> Self::Hom<Self::Product<A, B>, A>;

    fn snd<A: Object, B: Object>(&self) -> Self::Hom<Self::Product<A, B>, B>;

    fn pair<X: Object, A: Object, B: Object>(
        &self,
        f: &Self::Hom<X, A>,
        g: &Self::Hom<X, B>,
    ) -> Self::Hom<X, Self::Product<A, B>>;
}

/// # CartesianCategory
/// Terminal object plus binary products.
pub trait CartesianCategory: HasTerminal + HasBinaryProducts {}

impl<C: HasTerminal + HasBinaryProducts> CartesianCategory for C {}

/// # HasScalars
/// Ring structure on a distinguished scalar object `R`.
pub trait HasScalars: HasBinaryProducts {
    type Scalar: Object;

    fn add(&self) -> BinaryOp<Self>;

    fn mul(&self) -> BinaryOp<Self>;

    fn neg(&self) -> Endo<Self>;

    /// Partial: a zero divisor yields whatever IEEE division yields.
    fn div(&self) -> BinaryOp<Self>;

    /// `sub = add ∘ ⟨π₁, neg ∘ π₂⟩`
    fn sub(&self) -> BinaryOp<Self> {
        let snd = self.snd::<Self::Scalar, Self::Scalar>();
        let neg_snd =
            self.compose::<ScalarPair<Self>, Self::Scalar, Self::Scalar>(&self.neg(), &snd);
        let split = self.pair::<ScalarPair<Self>, Self::Scalar, Self::Scalar>(
            &self.fst::<Self::Scalar, Self::Scalar>(),
            &neg_snd,
        );
        self.compose::<ScalarPair<Self>, ScalarPair<Self>, Self::Scalar>(&self.add(), &split)
    }
}

/// # HasConstants
/// Scalar literals as global elements `1 → R`.
pub trait HasConstants: HasTerminal + HasScalars {
    fn zero(&self) -> Result<Literal<Self>>;

    fn one(&self) -> Result<Literal<Self>>;

    fn constant(&self, value: f64) -> Result<Literal<Self>>;

    /// The constant arrow `A → R`, factored through the terminal object:
    /// `constant(value) ∘ !`.
    fn constant_from<A: Object>(&self, value: f64) -> Result<Self::Hom<A, Self::Scalar>> {
        let literal = self.constant(value)?;
        let term = self.terminate::<A>();
        Ok(self.compose::<A, Self::Terminal, Self::Scalar>(&literal, &term))
    }
}

/// # DifferentialCategory
/// A cartesian category with a differential combinator `D`.
///
/// Given `f: A → B`, `D[f]: A × A → B × B` maps (primal, tangent) pairs.
/// The central law is the chain rule, `D[g ∘ f] = D[g] ∘ D[f]`; the others
/// are `D[id] = id`, `D[⟨f, g⟩] = ⟨D[f], D[g]⟩` and `D[πᵢ] = πᵢ` on the
/// doubled object.
pub trait DifferentialCategory: CartesianCategory + HasScalars + HasConstants {
    fn d<A: Object, B: Object>(
        &self,
        f: &Self::Hom<A, B>,
    ) -> Result<Self::Hom<Self::Product<A, A>, Self::Product<B, B>>>;

    /// `f'(at)`: the tangent component of `D[f](at, 1)`.
    fn derivative_at(&self, f: &Endo<Self>, at: f64) -> f64;

    fn gradient_at<A: Object>(
        &self,
        _f: &Self::Hom<A, Self::Scalar>,
        _at: &[f64],
    ) -> Result<Vec<f64>> {
        Err(AdError::Unsupported {
            operation: "gradient_at",
            reason: "multivariate gradients must be provided by the interpretation",
        })
    }
}
