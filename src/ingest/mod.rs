pub mod csv_source;
pub mod parser;

pub use csv_source::{SamplingConfig, TaskRecord, read_dags, read_dags_from_path};
pub use parser::{format_function_name, parse_function_name};
