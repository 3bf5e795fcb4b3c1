use crate::model::dag::Dag;
use crate::model::demand::FunctionDemand;
use crate::model::result::{DagResult, Event};
use crate::model::scenario::Scenario;
use crate::scheduler::cost::{FixedPaths, compute_cost};
use std::collections::HashMap;

/// Upward-rank ordering plus insertion-based earliest-finish-time
/// placement. Uses its own, separately seeded, fixed-path sample for
/// communication cost — distinct from FixDoc's (Open Question (b) in the
/// design notes: both are random, seeded separately, and both are exposed
/// to callers rather than hidden behind one shared seed).
pub struct HeftScheduler<'a> {
    scenario: &'a Scenario,
    fixed_paths: &'a FixedPaths,
}

impl<'a> HeftScheduler<'a> {
    pub fn new(scenario: &'a Scenario, fixed_paths: &'a FixedPaths) -> Self {
        HeftScheduler { scenario, fixed_paths }
    }

    pub fn schedule(&self, dag: &Dag, demand: &FunctionDemand) -> DagResult {
        let n = self.scenario.node_count;

        let avg_compute: HashMap<u32, f64> = dag
            .functions
            .iter()
            .map(|f| {
                let d = demand.compute_demand(f.num).unwrap();
                let avg = (0..n).map(|k| compute_cost(d, self.scenario.processing_power[k])).sum::<f64>() / n as f64;
                (f.num, avg)
            })
            .collect();

        let avg_comm: HashMap<u32, f64> = dag
            .functions
            .iter()
            .map(|f| {
                if dag.successors(f.num).next().is_none() {
                    return (f.num, 0.0);
                }
                let size = demand.data_size(f.num).unwrap();
                let avg = self.average_transmission_cost(size, n);
                (f.num, avg)
            })
            .collect();

        let mut rank_memo: HashMap<u32, f64> = HashMap::new();
        for func in &dag.functions {
            self.rank(dag, func.num, &avg_compute, &avg_comm, &mut rank_memo);
        }

        let mut jobs: Vec<u32> = dag.functions.iter().map(|f| f.num).collect();
        jobs.sort_by(|a, b| rank_memo[b].partial_cmp(&rank_memo[a]).unwrap());

        let mut orders: Vec<Vec<Event>> = vec![Vec::new(); n];
        let mut node_of: HashMap<u32, usize> = HashMap::new();

        for job in jobs {
            let func = dag.function(job).unwrap();
            let duration_per_node: Vec<f64> = (0..n).map(|k| compute_cost(demand.compute_demand(job).unwrap(), self.scenario.processing_power[k])).collect();

            let ready_per_node: Vec<f64> = (0..n)
                .map(|k| {
                    func.preds
                        .iter()
                        .map(|&p| {
                            let p_node = node_of[&p];
                            let p_end = event_end(&orders[p_node], p);
                            let trans = self.fixed_paths.transmission_cost(p_node, k, demand.data_size(p).unwrap());
                            p_end + trans
                        })
                        .fold(0.0_f64, f64::max)
                })
                .collect();

            let mut best_node = 0;
            let mut best_finish = f64::INFINITY;
            let mut best_start = 0.0_f64;
            for k in 0..n {
                let start = find_first_gap(&orders[k], ready_per_node[k], duration_per_node[k]);
                let finish = start + duration_per_node[k];
                if finish < best_finish {
                    best_finish = finish;
                    best_start = start;
                    best_node = k;
                }
            }

            orders[best_node].push(Event { func: job, start: best_start, end: best_finish });
            orders[best_node].sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap());
            node_of.insert(job, best_node);
        }

        let makespan = orders.iter().filter(|o| !o.is_empty()).map(|o| o.last().unwrap().end).fold(0.0_f64, f64::max);

        DagResult { dag_id: dag.id.clone(), makespan, node_of, eft_table: HashMap::new(), process_sequence: Vec::new(), orders }
    }

    fn average_transmission_cost(&self, size: f64, n: usize) -> f64 {
        if n <= 1 {
            return 0.0;
        }
        let mut total = 0.0_f64;
        for a in 0..n {
            for b in 0..n {
                if a != b {
                    total += self.fixed_paths.transmission_cost(a, b, size);
                }
            }
        }
        total / (n * (n - 1)) as f64
    }

    fn rank(&self, dag: &Dag, num: u32, avg_compute: &HashMap<u32, f64>, avg_comm: &HashMap<u32, f64>, memo: &mut HashMap<u32, f64>) -> f64 {
        if let Some(&r) = memo.get(&num) {
            return r;
        }
        let w = avg_compute[&num];
        let successors: Vec<u32> = dag.successors(num).map(|f| f.num).collect();
        let r = if successors.is_empty() {
            w
        } else {
            let c = avg_comm[&num];
            w + successors.iter().map(|&v| c + self.rank(dag, v, avg_compute, avg_comm, memo)).fold(f64::NEG_INFINITY, f64::max)
        };
        memo.insert(num, r);
        r
    }
}

fn event_end(order: &[Event], func: u32) -> f64 {
    order.iter().find(|e| e.func == func).map(|e| e.end).expect("predecessor must already have a scheduled event")
}

/// Finds the earliest slot on a node's event list that starts no earlier
/// than `desired_start` and is at least `duration` long, scanning the gaps
/// between consecutive events (with a virtual event ending at 0 prepended).
fn find_first_gap(order: &[Event], desired_start: f64, duration: f64) -> f64 {
    if order.is_empty() {
        return desired_start;
    }

    let mut prev_end = 0.0_f64;
    for event in order {
        let earliest_start = desired_start.max(prev_end);
        if event.start - earliest_start > duration {
            return earliest_start;
        }
        prev_end = event.end;
    }
    order.last().unwrap().end.max(desired_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dag::DagFunction;
    use crate::model::path_catalog::PathCatalog;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn line_scenario() -> Scenario {
        let adjacency = vec![vec![true, true, false], vec![true, true, true], vec![false, true, true]];
        let mut bandwidth = vec![vec![0.0; 3]; 3];
        bandwidth[0][1] = 10.0;
        bandwidth[1][0] = 10.0;
        bandwidth[1][2] = 10.0;
        bandwidth[2][1] = 10.0;
        Scenario::new(adjacency, bandwidth, vec![1.0; 3]).unwrap()
    }

    #[test]
    fn diamond_dag_ranks_parents_above_join() {
        let scenario = line_scenario();
        let catalog = PathCatalog::build(&scenario);
        let mut rng = StdRng::seed_from_u64(5);
        let fixed = FixedPaths::sample(&catalog, &mut rng);
        let demand = FunctionDemand::new(vec![1.0, 1.0, 1.0], vec![10.0, 10.0, 0.0]).unwrap();
        let dag = Dag::new(
            "s3".into(),
            vec![DagFunction { num: 1, preds: vec![] }, DagFunction { num: 2, preds: vec![] }, DagFunction { num: 3, preds: vec![1, 2] }],
        )
        .unwrap();

        let scheduler = HeftScheduler::new(&scenario, &fixed);
        let result = scheduler.schedule(&dag, &demand);
        assert_eq!(result.node_of.len(), 3);
        for order in &result.orders {
            for pair in order.windows(2) {
                assert!(pair[0].end <= pair[1].start);
            }
        }
    }

    #[test]
    fn events_on_a_node_never_overlap() {
        let scenario = line_scenario();
        let catalog = PathCatalog::build(&scenario);
        let mut rng = StdRng::seed_from_u64(9);
        let fixed = FixedPaths::sample(&catalog, &mut rng);
        let demand = FunctionDemand::new(vec![1.0, 1.0, 1.0, 1.0], vec![1.0, 1.0, 1.0, 0.0]).unwrap();
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

        let result = HeftScheduler::new(&scenario, &fixed).schedule(&dag, &demand);
        for order in &result.orders {
            for pair in order.windows(2) {
                assert!(pair[0].end <= pair[1].start);
            }
        }
        assert_eq!(result.makespan, result.orders.iter().filter(|o| !o.is_empty()).map(|o| o.last().unwrap().end).fold(0.0, f64::max));
    }
}
