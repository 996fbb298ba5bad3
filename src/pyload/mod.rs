//! pyLoad HTTP API client.
//!
//! The merge command only sees the [`PackageSource`] and [`MutationSink`]
//! traits; [`PyloadClient`] implements both against a running pyLoad.

mod client;
mod error;

pub use client::{Destination, MutationSink, PackageSource, PyloadClient};
pub use error::{ApiError, check_status};

#[cfg(test)]
pub use client::{MockMutationSink, MockPackageSource};
