use thiserror::Error;

/// Typed failure taxonomy for ingestion, scenario construction and scheduling.
///
/// Scheduling itself is pure and total: every variant below is raised at a
/// batch boundary (ingestion or scenario construction), never from inside a
/// placement loop.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O failure reading input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse CSV record: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to (de)serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("function name '{name}' in DAG '{dag}' could not be parsed: {reason}")]
    InputMalformed { dag: String, name: String, reason: String },

    #[error("scenario graph is invalid: {0}")]
    GraphInvalid(String),

    #[error("function {func} in DAG '{dag}' references predecessor {pred}, which has not appeared earlier in topological order")]
    PrecedenceViolation { dag: String, func: u32, pred: u32 },

    #[error("function {func} in DAG '{dag}' exceeds the demand table bounds (table covers 1..={max})")]
    IndexOutOfRange { dag: String, func: u32, max: usize },

    #[error("DAG '{dag}' contains no functions")]
    EmptyDag { dag: String },
}

pub type Result<T> = std::result::Result<T, Error>;
