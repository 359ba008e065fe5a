pub mod optimizer;
pub mod selection;
pub mod synthetic;

pub use optimizer::{estimate_search_time, OptimizerError, RouteOptimizer};
pub use selection::{select_best, MAX_RESULTS};
