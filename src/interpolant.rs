use std::sync::Arc;

use tracing::debug;

use crate::{cache::LruSafeCache, Error};

const CACHE_CAPACITY: usize = 128;

struct Samples {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Samples {
    fn eval(&self, t: f64) -> f64 {
        if t.is_nan() {
            return f64::NAN;
        }
        let last = self.xs.len() - 1;
        // index of the first sample strictly right of t
        let j = self.xs.partition_point(|x| *x <= t);
        if j == 0 {
            return self.ys[0];
        }
        if j > last {
            return self.ys[last];
        }
        let i = j - 1;
        let slope = (self.ys[j] - self.ys[i]) / (self.xs[j] - self.xs[i]);
        self.ys[i] + slope * (t - self.xs[i])
    }
}

/// Piecewise-linear interpolant that clamps to the end values outside its
/// domain. Results are memoized per input.
pub struct Interpolant {
    samples: Arc<Samples>,
    cache: LruSafeCache<u64, f64>,
}

impl Interpolant {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, Error> {
        if xs.len() != ys.len() {
            return Err(Error::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.is_empty() {
            return Err(Error::Empty);
        }
        if let Some(index) = xs
            .iter()
            .zip(&ys)
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(Error::NonFinite { index });
        }
        if let Some(index) = xs.windows(2).position(|w| w[1] < w[0]) {
            return Err(Error::Unsorted { index: index + 1 });
        }

        debug!(points = xs.len(), "built interpolant");
        let samples = Arc::new(Samples { xs, ys });
        let shared = samples.clone();
        let cache = LruSafeCache::new(CACHE_CAPACITY, move |bits: &u64| {
            shared.eval(f64::from_bits(*bits))
        });
        Ok(Self { samples, cache })
    }

    pub fn call(&self, t: f64) -> f64 {
        self.cache.get(t.to_bits())
    }

    pub fn domain(&self) -> (f64, f64) {
        let xs = &self.samples.xs;
        (xs[0], xs[xs.len() - 1])
    }

    pub fn cache(&self) -> &LruSafeCache<u64, f64> {
        &self.cache
    }
}

pub fn interpolant(
    xs: impl IntoIterator<Item = f64>,
    ys: impl IntoIterator<Item = f64>,
) -> Result<Interpolant, Error> {
    Interpolant::new(xs.into_iter().collect(), ys.into_iter().collect())
}
