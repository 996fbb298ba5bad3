use anyhow::{Context, Result};
use log::{debug, info};
use std::io::{self, Write};

use crate::{
    domain::model::{DEFAULT_PATTERN, MergeMutation, MergePattern},
    domain::service::{group, plan},
    pyload::{MutationSink, PackageSource},
    runtime::Runtime,
};

use super::config::{Config, ConnectionArgs};
use super::report::{print_groups, print_plan};

pub const CONFIRM_PROMPT: &str = "Do you want to merge these packages?";

#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Regex applied to package names; `.*` when absent
    pub pattern: Option<String>,
    /// Skip the confirmation prompt
    pub yes: bool,
    /// Only print what would be changed
    pub dry_run: bool,
}

/// Compile the pattern, connect to pyLoad and merge.
///
/// The pattern is checked before any connection is made.
#[tracing::instrument(skip(runtime, connection))]
pub async fn merge<R: Runtime>(
    runtime: R,
    connection: &ConnectionArgs,
    options: &MergeOptions,
) -> Result<()> {
    let pattern = MergePattern::new(options.pattern.as_deref().unwrap_or(DEFAULT_PATTERN))?;

    let config = Config::new(runtime, connection).await?;
    run(&config.runtime, &config.client, &config.client, &pattern, options).await
}

#[tracing::instrument(skip(runtime, source, sink))]
pub async fn run<R: Runtime, S: PackageSource, M: MutationSink>(
    runtime: &R,
    source: &S,
    sink: &M,
    pattern: &MergePattern,
    options: &MergeOptions,
) -> Result<()> {
    let packages = source
        .fetch_all()
        .await
        .context("Failed to fetch packages from pyLoad")?;
    debug!("Grouping {} package(s) by {:?}", packages.len(), pattern.as_str());

    let groups = group(&packages, pattern);

    let mut stdout = io::stdout();
    print_groups(&groups, &mut stdout)?;

    if groups.is_empty() {
        println!("Nothing to merge");
        return Ok(());
    }

    if options.dry_run {
        println!("=== Merge Plan (dry run) ===");
        println!();
        for (key, members) in &groups {
            print_plan(key, &plan(key, members), &mut stdout)?;
        }
        return Ok(());
    }

    if !options.yes && !runtime.confirm(CONFIRM_PROMPT)? {
        println!("OK, aborting!");
        return Ok(());
    }

    println!();

    for (key, members) in &groups {
        println!("Merging {} ...", key);
        stdout.flush()?;
        apply(sink, &plan(key, members))
            .await
            .with_context(|| format!("Failed to merge packages into '{}'", key))?;
    }

    info!("Merged {} group(s)", groups.len());
    Ok(())
}

/// Issue a planned merge: rename, then append links, then delete.
///
/// Links are appended before their source packages are deleted. Nothing is
/// rolled back when a later call fails.
#[tracing::instrument(skip(sink))]
pub async fn apply<M: MutationSink>(sink: &M, mutation: &MergeMutation) -> Result<()> {
    let pid = mutation.target_pid;

    if let Some(name) = &mutation.new_name {
        debug!("Renaming package {} to {:?}", pid, name);
        sink.rename(pid, name).await?;
    }

    sink.append_links(pid, &mutation.appended_links).await?;
    sink.delete_packages(&mutation.removed_pids).await?;

    Ok(())
}
