//! Derive the mutations that collapse a group into one package.

use crate::domain::model::{MergeMutation, Package};

/// Plan the merge of a ranked group.
///
/// `members` must hold at least two packages, ranked as [`super::group`]
/// returns them. The first member is the root and receives every other
/// member's links.
pub fn plan(group_key: &str, members: &[Package]) -> MergeMutation {
    let (root, rest) = members
        .split_first()
        .expect("merge groups have at least two members");

    MergeMutation {
        target_pid: root.pid,
        new_name: (root.name != group_key).then(|| group_key.to_string()),
        appended_links: rest
            .iter()
            .flat_map(|p| p.urls())
            .map(str::to_string)
            .collect(),
        removed_pids: rest.iter().map(|p| p.pid).collect(),
    }
}
