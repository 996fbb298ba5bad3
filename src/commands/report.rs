use anyhow::Result;
use std::io::Write;

use crate::domain::model::{MergeMutation, Package};
use crate::domain::service::Groups;

/// Print the proposed groups, one block per key:
///
/// ```text
/// foobar
/// - foobar (2 files; Zippyshare)
/// - foobar (2 files; BasePlugin, Zippyshare)
///
/// ```
pub fn print_groups<W: Write>(groups: &Groups, out: &mut W) -> Result<()> {
    for (key, members) in groups {
        writeln!(out, "{}", key)?;
        for package in members {
            print_member(package, out)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn print_member<W: Write>(package: &Package, out: &mut W) -> Result<()> {
    let plugins: Vec<&str> = package.plugins().into_iter().collect();
    writeln!(
        out,
        "- {} ({} files; {})",
        package.name,
        package.links.len(),
        plugins.join(", ")
    )?;
    Ok(())
}

/// Print the mutations a merge would issue, without issuing them.
pub fn print_plan<W: Write>(key: &str, mutation: &MergeMutation, out: &mut W) -> Result<()> {
    writeln!(out, "{}", key)?;
    if let Some(name) = &mutation.new_name {
        writeln!(out, "  [REN] {} -> {}", mutation.target_pid, name)?;
    }
    writeln!(
        out,
        "  [ADD] {} link(s) to {}",
        mutation.appended_links.len(),
        mutation.target_pid
    )?;
    let pids: Vec<String> = mutation.removed_pids.iter().map(|p| p.to_string()).collect();
    writeln!(out, "  [DEL] {}", pids.join(", "))?;
    writeln!(out)?;
    Ok(())
}
