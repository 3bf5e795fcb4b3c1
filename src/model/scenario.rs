use crate::error::{Error, Result};
use rand::Rng;

/// Configuration for synthesizing a random [`Scenario`].
///
/// Mirrors the knobs of the original `Parameter` class (`bw_lower`/`bw_upper`,
/// `pp_lower`/`pp_upper`, `density`), reshaped as inclusive ranges and an
/// explicit immutable value rather than a global mutable singleton.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Number of compute nodes. Must be `> 1`.
    pub server_num: usize,
    /// Upper bound on per-node random edge additions during synthesis.
    pub density: usize,
    /// Inclusive bandwidth range for generated edges.
    pub bw_range: (i64, i64),
    /// Inclusive processing-power range for generated nodes.
    pub pp_range: (i64, i64),
}

/// A compute substrate: `N` nodes connected by a weighted, symmetric,
/// connected graph.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub node_count: usize,
    /// Symmetric adjacency; `adjacency[n][n]` is always `true`.
    pub adjacency: Vec<Vec<bool>>,
    /// Symmetric bandwidth; `0.0` where no edge exists (and on the diagonal).
    pub bandwidth: Vec<Vec<f64>>,
    /// Per-node scalar processing power.
    pub processing_power: Vec<f64>,
}

impl Scenario {
    /// Builds a [`Scenario`] from explicit data, validating all invariants
    /// from the data model: square/symmetric matrices, self-loops, positive
    /// bandwidth on edges, positive processing power, and connectivity.
    pub fn new(adjacency: Vec<Vec<bool>>, bandwidth: Vec<Vec<f64>>, processing_power: Vec<f64>) -> Result<Self> {
        let node_count = adjacency.len();
        if node_count == 0 {
            return Err(Error::GraphInvalid("scenario has no nodes".to_string()));
        }
        if bandwidth.len() != node_count || processing_power.len() != node_count {
            return Err(Error::GraphInvalid("adjacency, bandwidth and processing_power must have matching node counts".to_string()));
        }
        for (i, row) in adjacency.iter().enumerate() {
            if row.len() != node_count {
                return Err(Error::GraphInvalid(format!("adjacency row {} has wrong length", i)));
            }
            if !row[i] {
                return Err(Error::GraphInvalid(format!("node {} is missing its self-loop", i)));
            }
        }
        for i in 0..node_count {
            for j in 0..node_count {
                if adjacency[i][j] != adjacency[j][i] {
                    return Err(Error::GraphInvalid(format!("adjacency is not symmetric at ({}, {})", i, j)));
                }
                if i != j && adjacency[i][j] && bandwidth[i][j] <= 0.0 {
                    return Err(Error::GraphInvalid(format!("edge ({}, {}) has non-positive bandwidth", i, j)));
                }
            }
        }
        for (n, pp) in processing_power.iter().enumerate() {
            if *pp <= 0.0 {
                return Err(Error::GraphInvalid(format!("node {} has non-positive processing power", n)));
            }
        }

        let scenario = Scenario { node_count, adjacency, bandwidth, processing_power };
        if !scenario.is_connected() {
            return Err(Error::GraphInvalid("scenario graph is not connected".to_string()));
        }
        Ok(scenario)
    }

    /// Verifies all-pairs reachability via a Floyd–Warshall-style closure over
    /// the adjacency matrix (the Rust analogue of the original's repeated
    /// `D[j,k] > D[j,i] + D[i,k]` relaxation, checked to a boolean fixpoint
    /// instead of tracking distances).
    fn is_connected(&self) -> bool {
        let n = self.node_count;
        let mut reach = self.adjacency.clone();
        for k in 0..n {
            for i in 0..n {
                if !reach[i][k] {
                    continue;
                }
                for j in 0..n {
                    if reach[k][j] {
                        reach[i][j] = true;
                    }
                }
            }
        }
        reach.iter().all(|row| row.iter().all(|&r| r))
    }

    /// Synthesizes a random connected scenario, regenerating the edge set
    /// until connectivity holds — the Rust analogue of `generate_scenario`'s
    /// `while not is_connected` loop.
    pub fn synthesize(config: &ScenarioConfig, rng: &mut impl Rng) -> Result<Self> {
        if config.server_num <= 1 {
            return Err(Error::GraphInvalid("server_num must be > 1".to_string()));
        }
        let n = config.server_num;

        loop {
            let mut adjacency = vec![vec![false; n]; n];
            for i in 0..n {
                adjacency[i][i] = true;
            }
            for i in 0..n {
                let conn_node_num = rng.random_range(0..=config.density);
                for _ in 0..conn_node_num {
                    let k = rng.random_range(0..n);
                    adjacency[i][k] = true;
                    adjacency[k][i] = true;
                }
            }

            let candidate = Scenario::build_unchecked(n, adjacency);
            if !candidate.is_connected() {
                continue;
            }

            let mut bandwidth = vec![vec![0.0; n]; n];
            for i in 0..n {
                for j in 0..i {
                    if candidate.adjacency[i][j] {
                        let b = rng.random_range(config.bw_range.0..=config.bw_range.1) as f64;
                        bandwidth[i][j] = b;
                        bandwidth[j][i] = b;
                    }
                }
            }

            let processing_power: Vec<f64> = (0..n).map(|_| rng.random_range(config.pp_range.0..=config.pp_range.1) as f64).collect();

            return Scenario::new(candidate.adjacency, bandwidth, processing_power);
        }
    }

    /// Builds an intermediate scenario (zero bandwidth, zero processing
    /// power) purely to reuse [`Scenario::is_connected`] during synthesis,
    /// before the real bandwidth/processing-power draws are known.
    fn build_unchecked(node_count: usize, adjacency: Vec<Vec<bool>>) -> Self {
        Scenario { node_count, bandwidth: vec![vec![0.0; node_count]; node_count], processing_power: vec![1.0; node_count], adjacency }
    }
}
