use crate::model::scenario::Scenario;

/// All simple paths between every ordered pair of nodes in a [`Scenario`],
/// plus the derived reciprocal-bandwidth sums and first-path traffic
/// proportions used by the cost model.
///
/// Built once per run and immutable afterwards (`spec.md` §5).
#[derive(Debug, Clone)]
pub struct PathCatalog {
    /// `paths[i][j]` is every simple path from `i` to `j` (as a node
    /// sequence), in DFS enumeration order. Empty for `i == j`.
    pub paths: Vec<Vec<Vec<Vec<usize>>>>,
    /// `reciprocal_sums[i][j][k]` is `Σ 1/bw` over the edges of the `k`-th
    /// path from `i` to `j`.
    pub reciprocal_sums: Vec<Vec<Vec<f64>>>,
    /// `proportions[i][j]` is the fraction of traffic routed over the first
    /// enumerated path, `recip[i][j][0] / Σ_k recip[i][j][k]`. Zero for
    /// `i == j` (callers must short-circuit same-node transmission cost).
    pub proportions: Vec<Vec<f64>>,
}

impl PathCatalog {
    /// Enumerates all simple paths and derives the reciprocal sums and
    /// proportions from a [`Scenario`]. Deterministic given the scenario's
    /// adjacency and node ordering.
    pub fn build(scenario: &Scenario) -> Self {
        let paths = enumerate_all_simple_paths(scenario);
        let (reciprocal_sums, proportions) = compute_ratios(&paths, scenario);
        PathCatalog { paths, reciprocal_sums, proportions }
    }

    /// DPE's multi-path-split transmission cost: `prop[a][b] * size *
    /// recip[a][b][0]`. Zero when `a == b`.
    pub fn dpe_transmission_cost(&self, a: usize, b: usize, size: f64) -> f64 {
        if a == b {
            return 0.0;
        }
        self.proportions[a][b] * size * self.reciprocal_sums[a][b][0]
    }
}

/// Depth-first enumeration of all simple paths from every node to every
/// other node. A running "on current path" set prevents revisits; reaching
/// the destination snapshots the path before backtracking. Mirrors the
/// original's `go_forward` subroutine.
fn enumerate_all_simple_paths(scenario: &Scenario) -> Vec<Vec<Vec<Vec<usize>>>> {
    let n = scenario.node_count;
    let mut paths = vec![vec![Vec::new(); n]; n];

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let mut found = Vec::new();
            let mut current = Vec::new();
            let mut on_path = vec![false; n];
            go_forward(i, j, scenario, &mut current, &mut on_path, &mut found);
            paths[i][j] = found;
        }
    }
    paths
}

fn go_forward(node: usize, dst: usize, scenario: &Scenario, current: &mut Vec<usize>, on_path: &mut Vec<bool>, found: &mut Vec<Vec<usize>>) {
    current.push(node);
    if node == dst {
        found.push(current.clone());
        current.pop();
        return;
    }
    on_path[node] = true;
    for next in 0..scenario.node_count {
        if next != node && scenario.adjacency[node][next] && !on_path[next] {
            go_forward(next, dst, scenario, current, on_path, found);
        }
    }
    on_path[node] = false;
    current.pop();
}

/// Reduces the enumerated paths into per-path reciprocal-bandwidth sums and
/// first-path traffic proportions. Mirrors `embedding/scenario.py::get_ratio`.
fn compute_ratios(paths: &[Vec<Vec<Vec<usize>>>], scenario: &Scenario) -> (Vec<Vec<Vec<f64>>>, Vec<Vec<f64>>) {
    let n = scenario.node_count;
    let mut reciprocal_sums = vec![vec![Vec::new(); n]; n];
    let mut proportions = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let sums: Vec<f64> = paths[i][j]
                .iter()
                .map(|path| path.windows(2).map(|edge| 1.0 / scenario.bandwidth[edge[0]][edge[1]]).sum())
                .collect();

            let total: f64 = sums.iter().sum();
            if !sums.is_empty() {
                proportions[i][j] = sums[0] / total;
            }
            reciprocal_sums[i][j] = sums;
        }
    }
    (reciprocal_sums, proportions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_scenario() -> Scenario {
        // 0 - 1 - 2, bandwidth 10 on each edge.
        let adjacency = vec![vec![true, true, false], vec![true, true, true], vec![false, true, true]];
        let mut bandwidth = vec![vec![0.0; 3]; 3];
        bandwidth[0][1] = 10.0;
        bandwidth[1][0] = 10.0;
        bandwidth[1][2] = 10.0;
        bandwidth[2][1] = 10.0;
        Scenario::new(adjacency, bandwidth, vec![1.0; 3]).unwrap()
    }

    #[test]
    fn chain_has_single_simple_path_per_pair() {
        let scenario = chain_scenario();
        let catalog = PathCatalog::build(&scenario);
        assert_eq!(catalog.paths[0][2], vec![vec![0, 1, 2]]);
        assert_eq!(catalog.paths[2][0], vec![vec![2, 1, 0]]);
        assert_eq!(catalog.proportions[0][2], 1.0);
    }

    #[test]
    fn fully_connected_triangle_splits_proportionally() {
        let adjacency = vec![vec![true; 3]; 3];
        let bandwidth = vec![vec![0.0, 10.0, 10.0], vec![10.0, 0.0, 10.0], vec![10.0, 10.0, 0.0]];
        let scenario = Scenario::new(adjacency, bandwidth, vec![1.0; 3]).unwrap();
        let catalog = PathCatalog::build(&scenario);

        // Two simple paths from 0 to 1: direct, and via 2.
        assert_eq!(catalog.paths[0][1].len(), 2);
        let direct_recip = 1.0 / 10.0;
        let via_recip = 1.0 / 10.0 + 1.0 / 10.0;
        let expected_prop = direct_recip / (direct_recip + via_recip);
        assert!((catalog.proportions[0][1] - expected_prop).abs() < 1e-9);
    }
}
