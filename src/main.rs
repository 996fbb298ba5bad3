use anyhow::Result;
use clap::Parser;
use pyload_merge::commands::{ConnectionArgs, MergeOptions, merge};
use pyload_merge::pyload::Destination;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  Given the packages
    'foobar'       [http://a, http://b]
    'foobar'       [http://c, http://d]
    'foobaz gamma' [http://e, http://f]
    'foobaz delta' [http://g, http://h]

  pyload-merge                  # merge packages with the same name
    'foobar'       [http://a, http://b, http://c, http://d]
    'foobaz gamma' [http://e, http://f]
    'foobaz delta' [http://g, http://h]

  pyload-merge '.*(foo).*'      # merge everything containing 'foo'
    'foo'          [http://a, ..., http://h]

  pyload-merge '.*(fooba.).*'   # one package per 'foobar', 'foobaz', ...
    'foobar'       [http://a, http://b, http://c, http://d]
    'foobaz'       [http://e, http://f, http://g, http://h]";

/// pyload-merge - merge pyLoad packages
///
/// Merges all packages that have the same name, or the same text in capture
/// group 1 of REGEX. The pattern must match at the start of the package name.
/// The package with the most finished links is kept and renamed after the
/// group; the links of the others are moved into it and they are deleted.
#[derive(Parser, Debug)]
#[command(author, version = env!("PYLOAD_MERGE_VERSION"), about, after_help = EXAMPLES)]
struct Cli {
    /// Regex applied to package names (default: '.*', i.e. the full name)
    #[arg(value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Merge without asking for confirmation
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Only show what would be merged
    #[arg(long = "dry-run", short = 'n')]
    pub dry_run: bool,

    /// Merge packages in the queue instead of the link collector
    #[arg(long = "queue", short = 'q')]
    pub queue: bool,

    /// pyLoad web interface URL (also via PYLOAD_URL; defaults to http://localhost:8000)
    #[arg(long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// pyLoad user (also via PYLOAD_USERNAME)
    #[arg(long = "username", short = 'u', value_name = "USER")]
    pub username: Option<String>,

    /// pyLoad password (also via PYLOAD_PASSWORD)
    #[arg(long = "password", value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Config file (defaults to <config dir>/pyload-merge/config.json)
    #[arg(long = "config", short = 'c', env = "PYLOAD_MERGE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    fn connection(&self) -> ConnectionArgs {
        ConnectionArgs {
            url: self.url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            config_file: self.config.clone(),
            destination: if self.queue {
                Destination::Queue
            } else {
                Destination::Collector
            },
        }
    }

    fn options(&self) -> MergeOptions {
        MergeOptions {
            pattern: self.pattern.clone(),
            yes: self.yes,
            dry_run: self.dry_run,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = pyload_merge::runtime::RealRuntime;

    merge(runtime, &cli.connection(), &cli.options()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_without_pattern() {
        let cli = Cli::try_parse_from(["pyload-merge"]).unwrap();
        assert_eq!(cli.pattern, None);
        assert!(!cli.yes);
        assert_eq!(cli.connection().destination, Destination::Collector);
    }

    #[test]
    fn test_cli_pattern_parsing() {
        let cli = Cli::try_parse_from(["pyload-merge", ".*(fooba.).*"]).unwrap();
        assert_eq!(cli.options().pattern.as_deref(), Some(".*(fooba.).*"));
    }

    #[test]
    fn test_cli_connection_parsing() {
        let cli = Cli::try_parse_from([
            "pyload-merge",
            "--url",
            "http://nas:8000",
            "-u",
            "admin",
            "--password",
            "secret",
            "--queue",
            "-y",
        ])
        .unwrap();

        let connection = cli.connection();
        assert_eq!(connection.url.as_deref(), Some("http://nas:8000"));
        assert_eq!(connection.username.as_deref(), Some("admin"));
        assert_eq!(connection.password.as_deref(), Some("secret"));
        assert_eq!(connection.destination, Destination::Queue);
        assert!(cli.options().yes);
    }

    #[test]
    fn test_cli_rejects_second_pattern() {
        let result = Cli::try_parse_from(["pyload-merge", "a", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_help_is_not_an_error_exit() {
        let err = Cli::try_parse_from(["pyload-merge", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }
}
