pub mod config;
mod merge;
mod report;

pub use config::{ConnectionArgs, resolve_settings};
pub use merge::{CONFIRM_PROMPT, MergeOptions, apply, merge, run};
pub use report::{print_groups, print_plan};
