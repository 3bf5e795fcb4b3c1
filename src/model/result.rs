use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A single scheduled event on a node: function `num` running `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Event {
    pub func: u32,
    pub start: f64,
    pub end: f64,
}

/// Scheduling result for a single DAG.
///
/// DPE/FixDoc populate `eft_table` and `process_sequence`; HEFT populates
/// `orders` instead. Both populate `node_of` and `makespan`.
#[derive(Debug, Clone, Serialize)]
pub struct DagResult {
    pub dag_id: String,
    pub makespan: f64,
    /// Function `num` → assigned node index.
    pub node_of: HashMap<u32, usize>,
    /// Per-node EFT matrix, `eft_table[func][node]`; empty for HEFT.
    pub eft_table: HashMap<u32, Vec<f64>>,
    /// Commitment order (DPE/FixDoc); empty for HEFT.
    pub process_sequence: Vec<u32>,
    /// Per-node ordered event list (HEFT); empty for DPE/FixDoc.
    pub orders: Vec<Vec<Event>>,
}

impl fmt::Display for DagResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DAG '{}': makespan = {:.3}", self.dag_id, self.makespan)?;
        let mut nodes: Vec<_> = self.node_of.iter().collect();
        nodes.sort_by_key(|(num, _)| **num);
        for (num, node) in nodes {
            writeln!(f, "  func {num} -> node {node}")?;
        }
        Ok(())
    }
}

/// Aggregate report for one algorithm across an entire DAG stream.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    pub algorithm: String,
    pub total_makespan: f64,
    pub average_makespan: f64,
    pub results: Vec<DagResult>,
}

impl ScheduleReport {
    pub fn new(algorithm: impl Into<String>, results: Vec<DagResult>) -> Self {
        let total_makespan: f64 = results.iter().map(|r| r.makespan).sum();
        let average_makespan = if results.is_empty() { 0.0 } else { total_makespan / results.len() as f64 };
        ScheduleReport { algorithm: algorithm.into(), total_makespan, average_makespan, results }
    }
}

impl fmt::Display for ScheduleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.algorithm)?;
        writeln!(f, "total makespan: {:.3}", self.total_makespan)?;
        writeln!(f, "average makespan: {:.3}", self.average_makespan)?;
        writeln!(f, "DAGs scheduled: {}", self.results.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_result(id: &str, makespan: f64) -> DagResult {
        DagResult { dag_id: id.to_string(), makespan, node_of: HashMap::new(), eft_table: HashMap::new(), process_sequence: vec![], orders: vec![] }
    }

    #[test]
    fn report_averages_across_results() {
        let report = ScheduleReport::new("DPE", vec![dummy_result("a", 10.0), dummy_result("b", 20.0)]);
        assert_eq!(report.total_makespan, 30.0);
        assert_eq!(report.average_makespan, 15.0);
    }

    #[test]
    fn report_on_empty_results_has_zero_average() {
        let report = ScheduleReport::new("HEFT", vec![]);
        assert_eq!(report.average_makespan, 0.0);
    }
}
