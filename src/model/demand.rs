use crate::error::Result;
use rand::Rng;

/// Configuration for synthesizing a [`FunctionDemand`] table.
///
/// Mirrors the original's `set_funcs` knobs (`max_func_num`, demand/data
/// ranges), reshaped as an explicit value rather than attributes on a global
/// `Parameter` singleton.
#[derive(Debug, Clone)]
pub struct DemandConfig {
    /// Upper bound on distinct function numbers across the run.
    pub max_func_num: usize,
    /// Inclusive compute-demand range.
    pub demand_range: (i64, i64),
    /// Inclusive outbound-data-size range.
    pub data_range: (i64, i64),
}

/// Compute demand and outbound data size, indexed by global function `num`
/// (1-based; index 0 is unused padding so `num` can index directly).
///
/// Shared read-only across every DAG in a run: each DAG's local function
/// numbers index into the same prefix of this table, mirroring the
/// original's `DAG_pp_required = self.pp_required[:DAG_len]` slicing.
#[derive(Debug, Clone)]
pub struct FunctionDemand {
    compute: Vec<f64>,
    data: Vec<f64>,
}

impl FunctionDemand {
    /// Builds a demand table from explicit per-function vectors. `compute`
    /// and `data` must have equal, non-empty length; `num` values `1..=len`
    /// are then in range.
    pub fn new(compute: Vec<f64>, data: Vec<f64>) -> Result<Self> {
        let mut padded_compute = vec![0.0];
        padded_compute.extend(compute);
        let mut padded_data = vec![0.0];
        padded_data.extend(data);
        Ok(FunctionDemand { compute: padded_compute, data: padded_data })
    }

    /// Synthesizes a demand table of `config.max_func_num` entries, mirroring
    /// `set_funcs`'s uniform-random draws.
    pub fn synthesize(config: &DemandConfig, rng: &mut impl Rng) -> Self {
        let compute = (0..config.max_func_num).map(|_| rng.random_range(config.demand_range.0..=config.demand_range.1) as f64).collect();
        let data = (0..config.max_func_num).map(|_| rng.random_range(config.data_range.0..=config.data_range.1) as f64).collect();
        FunctionDemand::new(compute, data).expect("synthesized vectors have matching length by construction")
    }

    /// Number of distinct function numbers this table covers.
    pub fn max_func_num(&self) -> usize {
        self.compute.len() - 1
    }

    pub fn compute_demand(&self, num: u32) -> Option<f64> {
        self.compute.get(num as usize).copied()
    }

    pub fn data_size(&self, num: u32) -> Option<f64> {
        self.data.get(num as usize).copied()
    }
}
