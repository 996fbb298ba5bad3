pub mod grouper;
pub use grouper::*;

pub mod planner;
pub use planner::*;
