pub mod cost;
pub mod dpe;
pub mod fixdoc;
pub mod heft;

pub use cost::FixedPaths;
pub use dpe::DpeScheduler;
pub use fixdoc::FixDocScheduler;
pub use heft::HeftScheduler;
