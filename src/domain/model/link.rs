use serde::{Deserialize, Serialize};

/// pyLoad status code of a finished download.
pub const STATUS_FINISHED: i64 = 0;

/// A single download target inside a package (pyLoad `FileData`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Link {
    pub url: String,
    pub status: i64,
    /// Hoster plugin the link is handled by
    pub plugin: String,
    #[serde(default)]
    pub fid: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Link {
    pub fn is_finished(&self) -> bool {
        self.status == STATUS_FINISHED
    }
}
