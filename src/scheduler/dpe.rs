use crate::model::dag::Dag;
use crate::model::demand::FunctionDemand;
use crate::model::path_catalog::PathCatalog;
use crate::model::result::DagResult;
use crate::model::scenario::Scenario;
use crate::scheduler::cost::compute_cost;
use std::collections::HashMap;

/// Forward-pass list scheduler using DPE's multi-path-split transmission
/// cost. Holds an immutable view of the compute substrate; all mutable
/// state lives per-call in [`DpeScheduler::schedule`].
pub struct DpeScheduler<'a> {
    scenario: &'a Scenario,
    catalog: &'a PathCatalog,
}

impl<'a> DpeScheduler<'a> {
    pub fn new(scenario: &'a Scenario, catalog: &'a PathCatalog) -> Self {
        DpeScheduler { scenario, catalog }
    }

    /// Schedules one DAG, returning its makespan, placement, EFT table, and
    /// commitment order.
    ///
    /// Preserves the commit-on-first-consumer quirk deliberately: an
    /// unplaced predecessor is locked to a node the first time any
    /// successor evaluates it, using that successor's *first* candidate
    /// node in iteration order — not necessarily the node ultimately chosen
    /// for the successor itself. This is a known limitation of the source
    /// algorithm and must not be "fixed".
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
                        let trans = self.catalog.dpe_transmission_cost(where_deployed, candidate, demand.data_size(pred).unwrap());
                        eft_table[&pred][where_deployed] + trans + process_cost
                    } else {
                        let eft_pred = self.recompute_eft_vector(dag, pred, &node_of, &eft_table, &runtime, demand);

                        let mut best_m = 0;
                        let mut best_phi = f64::INFINITY;
                        for m in 0..n {
                            let trans = self.catalog.dpe_transmission_cost(m, candidate, demand.data_size(pred).unwrap());
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

    /// Recomputes the full per-node EFT vector for an unplaced function,
    /// using the current (possibly since-changed) runtime backlog — this
    /// must be redone every time an uncommitted predecessor is referenced,
    /// never cached from its own earlier pass.
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
                    let trans = self.catalog.dpe_transmission_cost(where_q, k, demand.data_size(num).unwrap());
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

    fn two_node_scenario() -> Scenario {
        let adjacency = vec![vec![true, true], vec![true, true]];
        let bandwidth = vec![vec![0.0, 10.0], vec![10.0, 0.0]];
        Scenario::new(adjacency, bandwidth, vec![1.0, 1.0]).unwrap()
    }

    #[test]
    fn s1_co_placement_gives_simple_sum_makespan() {
        let scenario = two_node_scenario();
        let catalog = PathCatalog::build(&scenario);
        let demand = FunctionDemand::new(vec![10.0, 10.0], vec![5.0, 0.0]).unwrap();
        let dag = Dag::new("s1".into(), vec![DagFunction { num: 1, preds: vec![] }, DagFunction { num: 2, preds: vec![1] }]).unwrap();

        let scheduler = DpeScheduler::new(&scenario, &catalog);
        let result = scheduler.schedule(&dag, &demand);
        assert_eq!(result.makespan, 20.0);
    }

    #[test]
    fn single_function_dag_makespan_is_fastest_node() {
        let scenario = two_node_scenario();
        let catalog = PathCatalog::build(&scenario);
        let demand = FunctionDemand::new(vec![10.0], vec![0.0]).unwrap();
        let dag = Dag::new("solo".into(), vec![DagFunction { num: 1, preds: vec![] }]).unwrap();

        let scheduler = DpeScheduler::new(&scenario, &catalog);
        let result = scheduler.schedule(&dag, &demand);
        assert_eq!(result.makespan, 10.0);
        assert!(result.node_of.contains_key(&1));
    }

    #[test]
    fn precedence_holds_for_diamond_dag() {
        let scenario = two_node_scenario();
        let catalog = PathCatalog::build(&scenario);
        let demand = FunctionDemand::new(vec![1.0, 1.0, 1.0, 1.0], vec![2.0, 2.0, 2.0, 0.0]).unwrap();
        let dag = Dag::new(
            "diamond".into(),
            vec![
                DagFunction { num: 1, preds: vec![] },
                DagFunction { num: 2, preds: vec![1] },
                DagFunction { num: 3, preds: vec![1] },
                DagFunction { num: 4, preds: vec![2, 3] },
            ],
        )
        .unwrap();

        let scheduler = DpeScheduler::new(&scenario, &catalog);
        let result = scheduler.schedule(&dag, &demand);
        for &pred in &[2u32, 3] {
            let pred_node = result.node_of[&pred];
            let pred_eft = result.eft_table[&pred][pred_node];
            let f4_node = result.node_of[&4];
            let trans = catalog.dpe_transmission_cost(pred_node, f4_node, 2.0);
            let f4_compute = compute_cost(1.0, scenario.processing_power[f4_node]);
            assert!(pred_eft + trans <= result.eft_table[&4][f4_node] - f4_compute + 1e-9);
        }
    }
}
