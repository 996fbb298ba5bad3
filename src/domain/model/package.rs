use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::Link;

/// Package id assigned by pyLoad
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(transparent)]
pub struct Pid(pub u64);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named bundle of download links (pyLoad `PackageData`)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Package {
    pub pid: Pid,
    pub name: String,
    /// pyLoad omits the links for some list calls
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Package {
    /// Number of links that already finished downloading.
    pub fn finished_count(&self) -> usize {
        self.links.iter().filter(|link| link.is_finished()).count()
    }

    /// Distinct hoster plugins across all links, sorted.
    pub fn plugins(&self) -> BTreeSet<&str> {
        self.links.iter().map(|link| link.plugin.as_str()).collect()
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|link| link.url.as_str())
    }
}
