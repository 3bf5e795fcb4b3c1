use crate::model::dag::Dag;
use crate::model::demand::FunctionDemand;
use crate::model::result::DagResult;
use crate::model::scenario::Scenario;
use crate::scheduler::cost::{FixedPaths, compute_cost};
use std::collections::HashMap;

/// Same forward-pass control flow as [`crate::scheduler::dpe::DpeScheduler`],
/// but every transfer uses one path fixed uniformly at random per node pair
/// rather than DPE's proportional multi-path split.
///
/// The only semantic difference from DPE is how transmission cost is
/// computed — see `embedding/algos/fixdoc.py`'s docstring on this point.
pub struct FixDocScheduler<'a> {
    scenario: &'a Scenario,
    fixed_paths: &'a FixedPaths,
}

impl<'a> FixDocScheduler<'a> {
    pub fn new(scenario: &'a Scenario, fixed_paths: &'a FixedPaths) -> Self {
        FixDocScheduler { scenario, fixed_paths }
    }

    pub fn schedule(&self, dag: &Dag, demand: &FunctionDemand) -> DagResult {
        let n = self.scenario.node_count;
        let mut runtime = vec![0.0_f64; n];
        let mut node_of: HashMap<u32, usize> = HashMap::new();
        let mut eft_table: HashMap<u32, Vec<f64>> = HashMap::new();
        let mut process_sequence: Vec<u32> = Vec::new();

        for func in &dag.functions {
            if func.is_entry() {
                continue;
            }

            let mut eft_f = vec![0.0_f64; n];
            for candidate in 0..n {
                let process_cost = compute_cost(demand.compute_demand(func.num).unwrap(), self.scenario.processing_power[candidate]);

                let mut min_phis = Vec::with_capacity(func.preds.len());
                for &pred in &func.preds {
                    let phi = if let Some(&where_deployed) = node_of.get(&pred) {
                        let trans = self.fixed_paths.transmission_cost(where_deployed, candidate, demand.data_size(pred).unwrap());
                        eft_table[&pred][where_deployed] + trans + process_cost
                    } else {
                        let eft_pred = self.recompute_eft_vector(dag, pred, &node_of, &eft_table, &runtime, demand);

                        let mut best_m = 0;
                        let mut best_phi = f64::INFINITY;
                        for m in 0..n {
                            let trans = self.fixed_paths.transmission_cost(m, candidate, demand.data_size(pred).unwrap());
                            let phi_m = eft_pred[m] + trans + process_cost;
                            if phi_m < best_phi {
                                best_phi = phi_m;
                                best_m = m;
                            }
                        }

                        runtime[best_m] = eft_pred[best_m];
                        node_of.insert(pred, best_m);
                        process_sequence.push(pred);
                        eft_table.insert(pred, eft_pred);
                        best_phi
                    };
                    min_phis.push(phi);
                }

                eft_f[candidate] = min_phis.into_iter().fold(f64::NEG_INFINITY, f64::max);
            }
            eft_table.insert(func.num, eft_f);
        }

        let mut makespan = 0.0_f64;
        for exit in dag.exits() {
            if node_of.contains_key(&exit.num) {
                continue;
            }
            let eft_exit = eft_table.entry(exit.num).or_insert_with(|| {
                (0..n).map(|k| compute_cost(demand.compute_demand(exit.num).unwrap(), self.scenario.processing_power[k]) + runtime[k]).collect()
            });

            let (best_m, &best_val) = eft_exit.iter().enumerate().min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap()).unwrap();
            node_of.insert(exit.num, best_m);
            process_sequence.push(exit.num);
            if best_val > makespan {
                makespan = best_val;
            }
        }

        DagResult { dag_id: dag.id.clone(), makespan, node_of, eft_table, process_sequence, orders: Vec::new() }
    }

    fn recompute_eft_vector(
        &self,
        dag: &Dag,
        num: u32,
        node_of: &HashMap<u32, usize>,
        eft_table: &HashMap<u32, Vec<f64>>,
        runtime: &[f64],
        demand: &FunctionDemand,
    ) -> Vec<f64> {
        let n = self.scenario.node_count;
        let func = dag.function(num).expect("predecessor must exist in its own DAG");
        let d = demand.compute_demand(num).unwrap();

        if func.is_entry() {
            return (0..n).map(|k| compute_cost(d, self.scenario.processing_power[k]) + runtime[k]).collect();
        }

        (0..n)
            .map(|k| {
                let mut begin = 0.0_f64;
                for &q in &func.preds {
                    let where_q = node_of[&q];
                    let trans = self.fixed_paths.transmission_cost(where_q, k, demand.data_size(num).unwrap());
                    let candidate_begin = eft_table[&q][where_q] + trans;
                    if candidate_begin > begin {
                        begin = candidate_begin;
                    }
                }
                let begin = begin.max(runtime[k]);
                begin + compute_cost(d, self.scenario.processing_power[k])
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dag::DagFunction;
    use crate::model::path_catalog::PathCatalog;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn two_node_scenario() -> Scenario {
        let adjacency = vec![vec![true, true], vec![true, true]];
        let bandwidth = vec![vec![0.0, 10.0], vec![10.0, 0.0]];
        Scenario::new(adjacency, bandwidth, vec![1.0, 1.0]).unwrap()
    }

    #[test]
    fn co_placement_gives_simple_sum_makespan() {
        let scenario = two_node_scenario();
        let catalog = PathCatalog::build(&scenario);
        let mut rng = StdRng::seed_from_u64(3);
        let fixed = FixedPaths::sample(&catalog, &mut rng);
        let demand = FunctionDemand::new(vec![10.0, 10.0], vec![5.0, 0.0]).unwrap();
        let dag = Dag::new("s1".into(), vec![DagFunction { num: 1, preds: vec![] }, DagFunction { num: 2, preds: vec![1] }]).unwrap();

        let scheduler = FixDocScheduler::new(&scenario, &fixed);
        let result = scheduler.schedule(&dag, &demand);
        assert_eq!(result.makespan, 20.0);
    }

    #[test]
    fn deterministic_given_same_seed() {
        let scenario = two_node_scenario();
        let catalog = PathCatalog::build(&scenario);
        let demand = FunctionDemand::new(vec![10.0, 100.0], vec![5.0, 0.0]).unwrap();
        let dag = Dag::new("s2".into(), vec![DagFunction { num: 1, preds: vec![] }, DagFunction { num: 2, preds: vec![1] }]).unwrap();

        let mut rng_a = StdRng::seed_from_u64(11);
        let fixed_a = FixedPaths::sample(&catalog, &mut rng_a);
        let mut rng_b = StdRng::seed_from_u64(11);
        let fixed_b = FixedPaths::sample(&catalog, &mut rng_b);

        let result_a = FixDocScheduler::new(&scenario, &fixed_a).schedule(&dag, &demand);
        let result_b = FixDocScheduler::new(&scenario, &fixed_b).schedule(&dag, &demand);
        assert_eq!(result_a.makespan, result_b.makespan);
        assert_eq!(result_a.node_of, result_b.node_of);
    }
}
