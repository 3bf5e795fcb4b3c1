use crate::error::{Error, Result};
use crate::model::demand::FunctionDemand;
use std::collections::HashSet;

/// A single function within a [`Dag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DagFunction {
    /// Stable 1-based identifier, local to the owning DAG.
    pub num: u32,
    /// Predecessor `num`s, in the order they appeared in the source name.
    pub preds: Vec<u32>,
}

impl DagFunction {
    pub fn is_entry(&self) -> bool {
        self.preds.is_empty()
    }
}

/// A directed acyclic graph of functions, already in topological order.
#[derive(Debug, Clone)]
pub struct Dag {
    pub id: String,
    pub functions: Vec<DagFunction>,
}

impl Dag {
    /// Builds a [`Dag`] from an already-ordered function list, validating
    /// the invariants from the data model: every predecessor must reference
    /// a function earlier in the given order, the DAG must be non-empty,
    /// and have at least one entry and one exit function.
    pub fn new(id: String, functions: Vec<DagFunction>) -> Result<Self> {
        if functions.is_empty() {
            return Err(Error::EmptyDag { dag: id });
        }

        let mut seen = HashSet::new();
        for func in &functions {
            for &pred in &func.preds {
                if !seen.contains(&pred) {
                    return Err(Error::PrecedenceViolation { dag: id.clone(), func: func.num, pred });
                }
            }
            seen.insert(func.num);
        }

        let dag = Dag { id, functions };
        if dag.entries().next().is_none() {
            return Err(Error::GraphInvalid(format!("DAG '{}' has no entry function", dag.id)));
        }
        if dag.exits().next().is_none() {
            return Err(Error::GraphInvalid(format!("DAG '{}' has no exit function", dag.id)));
        }
        Ok(dag)
    }

    /// Verifies every function `num` falls within `demand`'s table bounds.
    pub fn validate_demand_bounds(&self, demand: &FunctionDemand) -> Result<()> {
        let max = demand.max_func_num();
        for func in &self.functions {
            if func.num as usize > max {
                return Err(Error::IndexOutOfRange { dag: self.id.clone(), func: func.num, max });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn function(&self, num: u32) -> Option<&DagFunction> {
        self.functions.iter().find(|f| f.num == num)
    }

    /// Functions with no predecessors.
    pub fn entries(&self) -> impl Iterator<Item = &DagFunction> {
        self.functions.iter().filter(|f| f.is_entry())
    }

    /// Functions with no successors, i.e. not referenced as a predecessor by
    /// any other function in the DAG.
    pub fn exits(&self) -> impl Iterator<Item = &DagFunction> {
        let preds_union: HashSet<u32> = self.functions.iter().flat_map(|f| f.preds.iter().copied()).collect();
        self.functions.iter().filter(move |f| !preds_union.contains(&f.num))
    }

    /// Direct successors of `num`: functions that list it as a predecessor.
    pub fn successors(&self, num: u32) -> impl Iterator<Item = &DagFunction> {
        self.functions.iter().filter(move |f| f.preds.contains(&num))
    }
}
