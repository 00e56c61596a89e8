use crate::category::arrow::{cartesian_arrows, Arrow};
use crate::category::traits::{
    BinaryOp, DifferentialCategory, Endo, HasConstants, HasScalars, Literal, Object,
};
use crate::math::ad::tape::Tape;
use crate::math::ad::tapevar::TapeVar;
use crate::utils::errors::{AdError, Result};
use crate::utils::pareval::EvalConfig;

const NEEDS_TAPE: &str =
    "constants in reverse mode require a tape context; use derivative_at, which manages the tape";

/// # ReverseMode
/// The tape interpretation of the contract.
///
/// Morphisms are `Arrow<ReverseMode, A, B>` over [`TapeVar`]. Applying a
/// morphism records its operations on whatever tape its inputs live on;
/// [`DifferentialCategory::derivative_at`] creates that tape, runs the
/// forward pass, sweeps it backwards and drops it, all within the call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReverseMode;

pub static REVERSE: ReverseMode = ReverseMode;

/// The tape built by one forward pass, with the seeded input and the
/// output it produced.
pub struct Recording {
    pub tape: Tape,
    pub input: TapeVar,
    pub output: TapeVar,
}

impl Recording {
    /// `∂output / ∂input` by one reverse sweep.
    pub fn derivative(&self) -> Result<f64> {
        assert!(
            self.tape.owns(&self.output),
            "morphism returned {} which was not recorded on this evaluation's tape",
            self.output
        );
        let adjoints = self.tape.backpropagate(self.output.index())?;
        Ok(adjoints[self.input.index()])
    }

    pub fn value(&self) -> f64 {
        self.output.value()
    }
}

impl ReverseMode {
    pub fn instance() -> &'static ReverseMode {
        &REVERSE
    }

    pub fn record(&self, f: &Arrow<ReverseMode, TapeVar, TapeVar>, x: f64) -> Recording {
        self.record_on(Tape::new(), f, x)
    }

    pub fn record_with(
        &self,
        f: &Arrow<ReverseMode, TapeVar, TapeVar>,
        x: f64,
        config: &EvalConfig,
    ) -> Recording {
        self.record_on(Tape::with_capacity(config.tape_capacity), f, x)
    }

    fn record_on(&self, tape: Tape, f: &Arrow<ReverseMode, TapeVar, TapeVar>, x: f64) -> Recording {
        let input = tape.variable(x);
        let output = f.apply(input.clone());
        Recording {
            tape,
            input,
            output,
        }
    }

    pub fn value_at(&self, f: &Arrow<ReverseMode, TapeVar, TapeVar>, x: f64) -> f64 {
        self.record(f, x).value()
    }
}

cartesian_arrows!(ReverseMode);

impl HasScalars for ReverseMode {
    type Scalar = TapeVar;

    fn add(&self) -> BinaryOp<Self> {
        Arrow::binary(|a: TapeVar, b: TapeVar| a + b, "+")
    }

    fn mul(&self) -> BinaryOp<Self> {
        Arrow::binary(|a: TapeVar, b: TapeVar| a * b, "*")
    }

    fn neg(&self) -> Endo<Self> {
        Arrow::unary(|a: TapeVar| -a, "-")
    }

    fn div(&self) -> BinaryOp<Self> {
        Arrow::binary(|a: TapeVar, b: TapeVar| a / b, "/")
    }

    /// One `Sub` node instead of the derived `Add` + `Neg` pair.
    fn sub(&self) -> BinaryOp<Self> {
        Arrow::binary(|a: TapeVar, b: TapeVar| a - b, "sub")
    }
}

impl HasConstants for ReverseMode {
    fn zero(&self) -> Result<Literal<Self>> {
        Err(AdError::Unsupported {
            operation: "zero",
            reason: NEEDS_TAPE,
        })
    }

    fn one(&self) -> Result<Literal<Self>> {
        Err(AdError::Unsupported {
            operation: "one",
            reason: NEEDS_TAPE,
        })
    }

    fn constant(&self, _value: f64) -> Result<Literal<Self>> {
        Err(AdError::Unsupported {
            operation: "constant",
            reason: NEEDS_TAPE,
        })
    }
}

impl DifferentialCategory for ReverseMode {
    fn d<A: Object, B: Object>(
        &self,
        _f: &Self::Hom<A, B>,
    ) -> Result<Self::Hom<Self::Product<A, A>, Self::Product<B, B>>> {
        Err(AdError::Unsupported {
            operation: "d",
            reason: "reverse mode differentiates by recording a tape, not by transforming morphisms",
        })
    }

    /// Panics if `f` returns a value recorded on some other tape.
    fn derivative_at(&self, f: &Endo<Self>, at: f64) -> f64 {
        match self.record(f, at).derivative() {
            Ok(d) => d,
            Err(e) => panic!("{}", e),
        }
    }

    fn gradient_at<A: Object>(
        &self,
        _f: &Self::Hom<A, Self::Scalar>,
        _at: &[f64],
    ) -> Result<Vec<f64>> {
        Err(AdError::Unsupported {
            operation: "gradient_at",
            reason: "the tape engine only differentiates single-input morphisms",
        })
    }
}

impl std::fmt::Display for ReverseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReverseMode")
    }
}
