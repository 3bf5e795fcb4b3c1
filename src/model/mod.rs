pub mod dag;
pub mod demand;
pub mod path_catalog;
pub mod result;
pub mod scenario;

pub use dag::{Dag, DagFunction};
pub use demand::{DemandConfig, FunctionDemand};
pub use path_catalog::PathCatalog;
pub use result::{DagResult, Event, ScheduleReport};
pub use scenario::{Scenario, ScenarioConfig};
