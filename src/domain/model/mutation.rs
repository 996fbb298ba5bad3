use super::Pid;

/// Changes that collapse one group into its root package.
///
/// Applied in field order: rename, append links, delete.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergeMutation {
    pub target_pid: Pid,
    /// Only set when the root is not already named after the group key
    pub new_name: Option<String>,
    pub appended_links: Vec<String>,
    pub removed_pids: Vec<Pid>,
}
