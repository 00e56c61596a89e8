//! Structural morphisms every cartesian interpretation gets for free.
//!
//! Generic over any `C: HasBinaryProducts`; object types are passed
//! explicitly, e.g. `swap::<_, f64, bool>(&cat)`.

use crate::category::traits::{Category, HasBinaryProducts, Object};

/// `⟨id, id⟩ : A → A × A`
pub fn diagonal<C: HasBinaryProducts, A: Object>(cat: &C) -> C::Hom<A, C::Product<A, A>> {
    cat.pair::<A, A, A>(&cat.id::<A>(), &cat.id::<A>())
}

/// `⟨π₂, π₁⟩ : A × B → B × A`
pub fn swap<C: HasBinaryProducts, A: Object, B: Object>(
    cat: &C,
) -> C::Hom<C::Product<A, B>, C::Product<B, A>> {
    cat.pair::<C::Product<A, B>, B, A>(&cat.snd::<A, B>(), &cat.fst::<A, B>())
}

/// `A × (B × Z) → (A × B) × Z`
pub fn assoc_left<C: HasBinaryProducts, A: Object, B: Object, Z: Object>(
    cat: &C,
) -> C::Hom<C::Product<A, C::Product<B, Z>>, C::Product<C::Product<A, B>, Z>> {
    let a = cat.fst::<A, C::Product<B, Z>>();
    let rest = cat.snd::<A, C::Product<B, Z>>();
    let b = cat.compose::<C::Product<A, C::Product<B, Z>>, C::Product<B, Z>, B>(
        &cat.fst::<B, Z>(),
        &rest,
    );
    let z = cat.compose::<C::Product<A, C::Product<B, Z>>, C::Product<B, Z>, Z>(
        &cat.snd::<B, Z>(),
        &rest,
    );
    let ab = cat.pair::<C::Product<A, C::Product<B, Z>>, A, B>(&a, &b);
    cat.pair::<C::Product<A, C::Product<B, Z>>, C::Product<A, B>, Z>(&ab, &z)
}

/// `(A × B) × Z → A × (B × Z)`
pub fn assoc_right<C: HasBinaryProducts, A: Object, B: Object, Z: Object>(
    cat: &C,
) -> C::Hom<C::Product<C::Product<A, B>, Z>, C::Product<A, C::Product<B, Z>>> {
    let head = cat.fst::<C::Product<A, B>, Z>();
    let a = cat.compose::<C::Product<C::Product<A, B>, Z>, C::Product<A, B>, A>(
        &cat.fst::<A, B>(),
        &head,
    );
    let b = cat.compose::<C::Product<C::Product<A, B>, Z>, C::Product<A, B>, B>(
        &cat.snd::<A, B>(),
        &head,
    );
    let z = cat.snd::<C::Product<A, B>, Z>();
    let bz = cat.pair::<C::Product<C::Product<A, B>, Z>, B, Z>(&b, &z);
    cat.pair::<C::Product<C::Product<A, B>, Z>, A, C::Product<B, Z>>(&a, &bz)
}

/// `f × g = ⟨f ∘ π₁, g ∘ π₂⟩ : A × B → X × Y`
pub fn product<C: HasBinaryProducts, A: Object, B: Object, X: Object, Y: Object>(
    cat: &C,
    f: &C::Hom<A, X>,
    g: &C::Hom<B, Y>,
) -> C::Hom<C::Product<A, B>, C::Product<X, Y>> {
    let left = cat.compose::<C::Product<A, B>, A, X>(f, &cat.fst::<A, B>());
    let right = cat.compose::<C::Product<A, B>, B, Y>(g, &cat.snd::<A, B>());
    cat.pair::<C::Product<A, B>, X, Y>(&left, &right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::traits::HasScalars;
    use crate::math::ad::dual::Dual;
    use crate::math::ad::forward::ForwardMode;
    use crate::math::ad::reverse::ReverseMode;
    use crate::math::ad::tape::Tape;
    use crate::math::ad::tapevar::TapeVar;

    #[test]
    fn test_diagonal() {
        let fwd = ForwardMode::instance();
        let diag = diagonal::<_, Dual>(fwd);
        let x = Dual::variable(2.0);
        assert_eq!(diag.apply(x), (x, x));
        assert_eq!(diag.name(), Some("⟨id, id⟩"));
    }

    #[test]
    fn test_swap() {
        let fwd = ForwardMode::instance();
        let s = swap::<_, i32, &'static str>(fwd);
        assert_eq!(s.apply((1, "a")), ("a", 1));
        assert_eq!(s.name(), Some("⟨π₂, π₁⟩"));
    }

    #[test]
    fn test_associators_are_inverse() {
        let fwd = ForwardMode::instance();
        let left = assoc_left::<_, u8, u16, u32>(fwd);
        let right = assoc_right::<_, u8, u16, u32>(fwd);
        assert_eq!(left.apply((1, (2, 3))), ((1, 2), 3));
        assert_eq!(right.apply(((1, 2), 3)), (1, (2, 3)));
        let round = fwd.compose(&right, &left);
        assert_eq!(round.apply((7, (8, 9))), (7, (8, 9)));
    }

    #[test]
    fn test_product_applies_componentwise() {
        let fwd = ForwardMode::instance();
        let neg_times_id = product::<_, Dual, Dual, Dual, Dual>(fwd, &fwd.neg(), &fwd.id::<Dual>());
        let input = (Dual::variable(3.0), Dual::constant(4.0));
        assert_eq!(
            neg_times_id.apply(input),
            (Dual::new(-3.0, -1.0), Dual::constant(4.0))
        );
        assert_eq!(neg_times_id.name(), Some("⟨- ∘ π₁, id ∘ π₂⟩"));
    }

    #[test]
    fn test_structural_arrows_record_nothing() {
        let rev = ReverseMode::instance();
        let tape = Tape::new();
        let x = tape.variable(1.0);
        let y = tape.variable(2.0);
        let s = swap::<_, TapeVar, TapeVar>(rev);
        let (a, b) = s.apply((x, y));
        assert_eq!((a.index(), b.index()), (1, 0));
        assert_eq!(tape.len(), 2);
    }
}
