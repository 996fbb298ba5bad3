//! Partition packages into merge groups.

use log::debug;
use std::collections::BTreeMap;

use crate::domain::InvalidPatternError;
use crate::domain::model::{MergePattern, Package};

/// Merge candidates keyed by group key. Iterates in lexicographic key order.
pub type Groups = BTreeMap<String, Vec<Package>>;

/// Group `packages` by the key `pattern` derives from their names.
///
/// Packages whose name does not match are left out. Groups with a single
/// member are dropped. Members are ranked by finished link count, most first;
/// ties keep input order.
#[tracing::instrument(skip(packages))]
pub fn group(packages: &[Package], pattern: &MergePattern) -> Groups {
    let mut buckets: Groups = BTreeMap::new();

    for package in packages {
        match pattern.key_for(&package.name) {
            Some(key) => buckets
                .entry(key.to_string())
                .or_default()
                .push(package.clone()),
            None => debug!("Package {:?} does not match, skipping", package.name),
        }
    }

    buckets
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(key, mut members)| {
            // sort_by_key is stable
            members.sort_by_key(|p| std::cmp::Reverse(p.finished_count()));
            (key, members)
        })
        .collect()
}

/// Compile `pattern` and group `packages` by it.
pub fn group_by_pattern(
    packages: &[Package],
    pattern: &str,
) -> Result<Groups, InvalidPatternError> {
    let pattern = MergePattern::new(pattern)?;
    Ok(group(packages, &pattern))
}
