pub mod link;
pub mod mutation;
pub mod package;
pub mod pattern;

pub use link::*;
pub use mutation::*;
pub use package::*;
pub use pattern::*;
