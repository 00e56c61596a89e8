use rayon::{
    iter::{IntoParallelRefIterator, ParallelIterator},
    ThreadPool, ThreadPoolBuilder,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::category::traits::{DifferentialCategory, Endo};
use crate::math::ad::tape::DEFAULT_TAPE_CAPACITY;
use crate::utils::errors::Result;

/// # EvalConfig
/// Settings for batch evaluation. Every field has a default, so a partial
/// JSON document such as `{"num_threads": 4}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EvalConfig {
    /// Worker count; `None` lets rayon choose.
    pub num_threads: Option<usize>,
    pub thread_prefix: String,
    /// Initial node capacity of each tape the reverse engine allocates.
    pub tape_capacity: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            thread_prefix: "diffcat".to_string(),
            tape_capacity: DEFAULT_TAPE_CAPACITY,
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    pub fn with_thread_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_prefix = prefix.into();
        self
    }

    pub fn with_tape_capacity(mut self, capacity: usize) -> Self {
        self.tape_capacity = capacity;
        self
    }

    /// A dedicated pool whose threads are named `<prefix>-<i>`.
    pub fn build_pool(&self) -> Result<ThreadPool> {
        let prefix = self.thread_prefix.clone();
        let mut builder = ThreadPoolBuilder::new().thread_name(move |i| format!("{}-{}", prefix, i));
        if let Some(n) = self.num_threads {
            builder = builder.num_threads(n);
        }
        Ok(builder.build()?)
    }
}

/// `derivative_at` of `f` at every point, in parallel, results in input
/// order.
///
/// Each call to `derivative_at` is independent; the tape engine builds and
/// drops one tape per point on whichever worker evaluates it.
pub fn par_derivatives<C>(
    cat: &C,
    f: &Endo<C>,
    points: &[f64],
    config: &EvalConfig,
) -> Result<Vec<f64>>
where
    C: DifferentialCategory + Sync,
    Endo<C>: Sync,
{
    let pool = config.build_pool()?;
    let results = pool.install(|| {
        points
            .par_iter()
            .map(|&x| cat.derivative_at(f, x))
            .collect::<Vec<f64>>()
    });
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::traits::{Category, HasBinaryProducts, HasScalars};
    use crate::math::ad::dual::Dual;
    use crate::math::ad::forward::ForwardMode;
    use crate::math::ad::reverse::ReverseMode;
    use crate::math::ad::tapevar::TapeVar;

    #[test]
    fn test_defaults() {
        let config = EvalConfig::new();
        assert_eq!(config.num_threads, None);
        assert_eq!(config.thread_prefix, "diffcat");
        assert_eq!(config.tape_capacity, DEFAULT_TAPE_CAPACITY);
    }

    #[test]
    fn test_builder() {
        let config = EvalConfig::new()
            .with_num_threads(3)
            .with_thread_prefix("grad")
            .with_tape_capacity(16);
        assert_eq!(config.num_threads, Some(3));
        assert_eq!(config.thread_prefix, "grad");
        assert_eq!(config.tape_capacity, 16);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json() {
        let config: EvalConfig = serde_json::from_str(r#"{"num_threads": 2}"#).unwrap();
        assert_eq!(config, EvalConfig::new().with_num_threads(2));
    }

    #[test]
    fn test_pool_threads_are_named() {
        let pool = EvalConfig::new()
            .with_num_threads(2)
            .with_thread_prefix("grad")
            .build_pool()
            .unwrap();
        let name = pool.install(|| std::thread::current().name().map(String::from));
        assert!(name.unwrap().starts_with("grad-"));
    }

    #[test]
    fn test_forward_batch_preserves_order() {
        let fwd = ForwardMode::instance();
        let square = fwd.compose(
            &fwd.mul(),
            &fwd.pair(&fwd.id::<Dual>(), &fwd.id::<Dual>()),
        );
        let points: Vec<f64> = (0..64).map(|i| i as f64 * 0.5).collect();
        let config = EvalConfig::new().with_num_threads(4);
        let derivs = par_derivatives(fwd, &square, &points, &config).unwrap();
        let expected: Vec<f64> = points.iter().map(|x| 2.0 * x).collect();
        assert_eq!(derivs, expected);
    }

    #[test]
    fn test_reverse_batch_uses_one_tape_per_point() {
        let rev = ReverseMode::instance();
        let twice = rev.compose(
            &rev.add(),
            &rev.pair(&rev.id::<TapeVar>(), &rev.id::<TapeVar>()),
        );
        let points = vec![-1.0, 0.0, 1.0, 2.0, 3.0];
        let config = EvalConfig::new().with_num_threads(2);
        let derivs = par_derivatives(rev, &twice, &points, &config).unwrap();
        assert_eq!(derivs, vec![2.0; 5]);
    }
}
