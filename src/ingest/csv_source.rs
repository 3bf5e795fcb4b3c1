use crate::error::{Error, Result};
use crate::ingest::parser::parse_function_name;
use crate::model::dag::{Dag, DagFunction};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One row of the workload CSV, named after the Alibaba cluster-trace
/// `batch_task.csv` schema the original dataset ingests.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRecord {
    pub task_name: String,
    pub job_name: String,
}

/// Per-DAG-size-bucket sampling targets, `[size2, size3..10, size11..50,
/// size51..100, size>100]`, mirroring `dataset_processing.py`'s
/// `REQUIRED_NUM`.
#[derive(Debug, Clone, Copy)]
pub struct SamplingConfig {
    pub required_num: [usize; 5],
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig { required_num: [200, 800, 600, 400, 119] }
    }
}

fn size_bucket(len: usize) -> Option<usize> {
    match len {
        2 => Some(0),
        3..=10 => Some(1),
        11..=50 => Some(2),
        51..=100 => Some(3),
        n if n > 100 => Some(4),
        _ => None,
    }
}

/// Reads a workload CSV and groups contiguous same-`job_name` records into
/// [`Dag`]s, parsing each `task_name` via [`parse_function_name`].
///
/// Records for the same DAG must be contiguous and already topologically
/// ordered, per the external-interface contract; a non-contiguous
/// regrouping (the same `job_name` reappearing after another has started)
/// is reported as `Error::InputMalformed`.
pub fn read_dags<R: Read>(reader: R) -> Result<Vec<Dag>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let records: Vec<TaskRecord> = csv_reader.deserialize().collect::<std::result::Result<_, _>>()?;
    group_into_dags(records)
}

pub fn read_dags_from_path(path: impl AsRef<Path>) -> Result<Vec<Dag>> {
    let file = std::fs::File::open(path)?;
    read_dags(file)
}

fn group_into_dags(records: Vec<TaskRecord>) -> Result<Vec<Dag>> {
    let mut dags = Vec::new();
    let mut seen_jobs = std::collections::HashSet::new();
    let mut current_job: Option<String> = None;
    let mut current_funcs: Vec<DagFunction> = Vec::new();

    for record in records {
        if current_job.as_deref() != Some(record.job_name.as_str()) {
            if let Some(job) = current_job.take() {
                dags.push(Dag::new(job, std::mem::take(&mut current_funcs))?);
            }
            if !seen_jobs.insert(record.job_name.clone()) {
                return Err(Error::InputMalformed {
                    dag: record.job_name.clone(),
                    name: record.task_name.clone(),
                    reason: "DAG records are not contiguous".to_string(),
                });
            }
            current_job = Some(record.job_name.clone());
        }
        current_funcs.push(parse_function_name(&record.job_name, &record.task_name)?);
    }
    if let Some(job) = current_job {
        dags.push(Dag::new(job, current_funcs)?);
    }
    Ok(dags)
}

/// Samples DAGs from a raw trace stream into per-size buckets bounded by
/// `config.required_num`, mirroring `dataset_processing.py::sample_DAG`'s
/// counters. `records` must already be grouped contiguously by `job_name`;
/// this does not itself validate DAG structure (callers needing validated
/// [`Dag`]s should route the sampled rows through [`group_into_dags`]).
pub fn sample_dags(records: &[TaskRecord], config: &SamplingConfig) -> Vec<Vec<TaskRecord>> {
    let mut counters = [0usize; 5];
    let mut selected = Vec::new();
    let mut idx = 0;

    while idx < records.len() {
        let job_name = &records[idx].job_name;
        let mut len = 0;
        while idx + len < records.len() && &records[idx + len].job_name == job_name {
            len += 1;
        }

        if let Some(bucket) = size_bucket(len) {
            if counters[bucket] < config.required_num[bucket] {
                selected.push(records[idx..idx + len].to_vec());
                counters[bucket] += 1;
            }
        }

        idx += len;
        if counters.iter().sum::<usize>() == config.required_num.iter().sum::<usize>() {
            break;
        }
    }
    selected
}
