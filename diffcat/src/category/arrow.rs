use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::category::traits::Object;
use crate::utils::num::Real;

/// # Arrow
/// A named callable `A → B` belonging to the interpretation `F`.
///
/// `F` is a zero-sized family marker (the engine type itself). It has no
/// runtime payload; it only keeps arrows of different engines from being
/// mixed. Arrows are immutable and cheap to clone: composing two of them
/// builds a new arrow around shared handles to the operands.
pub struct Arrow<F, A, B> {
    func: Arc<dyn Fn(A) -> B + Send + Sync>,
    name: Option<String>,
    _family: PhantomData<fn() -> F>,
}

impl<F, A, B> Clone for Arrow<F, A, B> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
            name: self.name.clone(),
            _family: PhantomData,
        }
    }
}

impl<F: 'static, A: Object, B: Object> Arrow<F, A, B> {
    pub fn new(func: impl Fn(A) -> B + Send + Sync + 'static) -> Self {
        Self {
            func: Arc::new(func),
            name: None,
            _family: PhantomData,
        }
    }

    pub fn named(
        func: impl Fn(A) -> B + Send + Sync + 'static,
        name: impl Into<String>,
    ) -> Self {
        Self {
            func: Arc::new(func),
            name: Some(name.into()),
            _family: PhantomData,
        }
    }

    #[inline]
    pub fn apply(&self, input: A) -> B {
        (self.func)(input)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// `after ∘ self`. The composite is named `"after ∘ self"` only when
    /// both operands carry a name.
    pub fn and_then<C: Object>(&self, after: &Arrow<F, B, C>) -> Arrow<F, A, C> {
        let name = match (&self.name, &after.name) {
            (Some(first), Some(second)) => Some(format!("{} ∘ {}", second, first)),
            _ => None,
        };
        let (first, second) = (self.clone(), after.clone());
        Arrow {
            func: Arc::new(move |input: A| second.apply(first.apply(input))),
            name,
            _family: PhantomData,
        }
    }

    /// `⟨f, g⟩`: feeds one input to both arrows.
    pub fn pair<C: Object>(f: &Self, g: &Arrow<F, A, C>) -> Arrow<F, A, (B, C)> {
        let name = match (&f.name, &g.name) {
            (Some(l), Some(r)) => format!("⟨{}, {}⟩", l, r),
            _ => "⟨f, g⟩".to_string(),
        };
        let (left, right) = (f.clone(), g.clone());
        Arrow::named(
            move |input: A| (left.apply(input.clone()), right.apply(input)),
            name,
        )
    }
}

impl<F: 'static, A: Object> Arrow<F, A, A> {
    pub fn identity() -> Self {
        Self::named(|input: A| input, "id")
    }
}

/* scalar arrows shared by every engine whose scalar is a `Real` */

impl<F: 'static, S: Real> Arrow<F, (S, S), S> {
    pub(crate) fn binary(op: fn(S, S) -> S, name: &'static str) -> Self {
        Self::named(move |(l, r): (S, S)| op(l, r), name)
    }
}

impl<F: 'static, S: Real> Arrow<F, S, S> {
    pub(crate) fn unary(op: fn(S) -> S, name: &'static str) -> Self {
        Self::named(op, name)
    }
}

impl<F, A, B> fmt::Display for Arrow<F, A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "Arrow"),
        }
    }
}

impl<F, A, B> fmt::Debug for Arrow<F, A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arrow").field("name", &self.name).finish()
    }
}

/// Implements `Category`, `HasTerminal` and `HasBinaryProducts` for an
/// engine whose morphisms are `Arrow<Engine, _, _>`, with `()` as terminal
/// object and tuples as products.
macro_rules! cartesian_arrows {
    ($Engine:ty) => {
        impl $crate::category::traits::Category for $Engine {
            type Hom<A: $crate::category::traits::Object, B: $crate::category::traits::Object> =
                $crate::category::arrow::Arrow<$Engine, A, B>;

            fn id<A: $crate::category::traits::Object>(&self) -> Self::Hom<A, A> {
                $crate::category::arrow::Arrow::identity()
            }

            fn compose<
                A: $crate::category::traits::Object,
                B: $crate::category::traits::Object,
                C: $crate::category::traits::Object,
            >(
                &self,
                g: &Self::Hom<B, C>,
                f: &Self::Hom<A, B>,
            ) -> Self::Hom<A, C> {
                f.and_then(g)
            }
        }

        impl $crate::category::traits::HasTerminal for $Engine {
            type Terminal = ();

            fn terminate<A: $crate::category::traits::Object>(&self) -> Self::Hom<A, ()> {
                $crate::category::arrow::Arrow::named(|_: A| (), "!")
            }
        }

        impl $crate::category::traits::HasBinaryProducts for $Engine {
            type Product<A: $crate::category::traits::Object, B: $crate::category::traits::Object> =
                (A, B);

            fn fst<A: $crate::category::traits::Object, B: $crate::category::traits::Object>(
                &self,
            ) -> Self::Hom<(A, B), A> {
                $crate::category::arrow::Arrow::named(|(a, _): (A, B)| a, "π₁")
            }

            fn snd<A: $crate::category::traits::Object, B: $crate::category::traits::Object>(
                &self,
            ) -> Self::Hom<(A, B), B> {
                $crate::category::arrow::Arrow::named(|(_, b): (A, B)| b, "π₂")
            }

            fn pair<
                X: $crate::category::traits::Object,
                A: $crate::category::traits::Object,
                B: $crate::category::traits::Object,
            >(
                &self,
                f: &Self::Hom<X, A>,
                g: &Self::Hom<X, B>,
            ) -> Self::Hom<X, (A, B)> {
                $crate::category::arrow::Arrow::pair(f, g)
            }
        }
    };
}

pub(crate) use cartesian_arrows;
