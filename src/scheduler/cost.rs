use crate::model::path_catalog::PathCatalog;
use rand::Rng;

/// Per-DAG fixed-path reciprocal sums: one randomly chosen path per ordered
/// node pair, used by FixDoc (and separately, with its own seed, by HEFT's
/// communication-cost table). Mirrors `random.randint(0, paths_num - 1)` in
/// the original.
#[derive(Debug, Clone)]
pub struct FixedPaths {
    /// `recip[a][b]` is the reciprocal-bandwidth sum of the randomly chosen
    /// path from `a` to `b`. Zero (unused) on the diagonal.
    recip: Vec<Vec<f64>>,
}

impl FixedPaths {
    /// Samples one path per ordered pair from `catalog`.
    pub fn sample(catalog: &PathCatalog, rng: &mut impl Rng) -> Self {
        let n = catalog.paths.len();
        let mut recip = vec![vec![0.0; n]; n];
        for a in 0..n {
            for b in 0..n {
                if a == b {
                    continue;
                }
                let choices = &catalog.reciprocal_sums[a][b];
                let k = rng.random_range(0..choices.len());
                recip[a][b] = choices[k];
            }
        }
        FixedPaths { recip }
    }

    /// Single-path transmission cost: `s * recip[a][b]`, no proportional
    /// splitting. Zero when `a == b`.
    pub fn transmission_cost(&self, a: usize, b: usize, size: f64) -> f64 {
        if a == b {
            return 0.0;
        }
        size * self.recip[a][b]
    }
}

/// Per-node compute time for a demand `d` given processing power `pp`.
pub fn compute_cost(demand: f64, processing_power: f64) -> f64 {
    demand / processing_power
}
