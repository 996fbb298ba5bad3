//! Domain layer - package records and the pure merge algorithm.
//!
//! Nothing in here talks to pyLoad or the terminal. `model` holds the typed
//! records read from the download manager, `service` turns them into groups
//! and merge mutations.

pub mod error;
pub mod model;
pub mod service;

pub use error::InvalidPatternError;
