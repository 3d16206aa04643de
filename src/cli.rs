//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Administrative tools for OpenLab multisite networks
#[derive(Parser, Debug, Clone)]
#[command(name = "olctl", version, about = "Administrative tools for OpenLab multisite networks")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level operations
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Prepare a JSON manifest and CSV report for a planned update batch
    PrepareUpdate {
        /// Target release version; inferred from OL_VERSION when omitted
        #[arg(long)]
        version: Option<String>,

        /// Comma-separated plugin slugs to exclude (replaces the default list)
        #[arg(long)]
        exclude_plugins: Option<String>,

        /// Comma-separated theme slugs to exclude (replaces the default list)
        #[arg(long)]
        exclude_themes: Option<String>,

        /// Network root directory
        #[arg(long, default_value = ".")]
        path: PathBuf,

        /// Suppress informational output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Apply the updates planned in a previously prepared manifest
    DoUpdate {
        /// Comma-separated plugin slugs to exclude (replaces the default list)
        #[arg(long)]
        exclude_plugins: Option<String>,

        /// Comma-separated theme slugs to exclude (replaces the default list)
        #[arg(long)]
        exclude_themes: Option<String>,

        /// Network root directory
        #[arg(long, default_value = ".")]
        path: PathBuf,

        /// Suppress informational output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Change a site's domain, rewriting URLs across its tables
    ChangeDomain {
        /// The current domain of the site being changed
        #[arg(long)]
        from: String,

        /// The domain the site is being changed to
        #[arg(long)]
        to: String,

        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Network root directory
        #[arg(long, default_value = ".")]
        path: PathBuf,

        /// Suppress informational output
        #[arg(short, long)]
        quiet: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_update_defaults() {
        let args = CliArgs::parse_from(["olctl", "prepare-update"]);
        match args.command {
            Command::PrepareUpdate {
                version,
                exclude_plugins,
                exclude_themes,
                path,
                quiet,
            } => {
                assert!(version.is_none());
                assert!(exclude_plugins.is_none());
                assert!(exclude_themes.is_none());
                assert_eq!(path, PathBuf::from("."));
                assert!(!quiet);
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_prepare_update_flags() {
        let args = CliArgs::parse_from([
            "olctl",
            "prepare-update",
            "--version",
            "1.3.7",
            "--exclude-plugins",
            "foo,bar",
            "--path",
            "/srv/www",
            "--quiet",
        ]);
        match args.command {
            Command::PrepareUpdate {
                version,
                exclude_plugins,
                path,
                quiet,
                ..
            } => {
                assert_eq!(version.as_deref(), Some("1.3.7"));
                assert_eq!(exclude_plugins.as_deref(), Some("foo,bar"));
                assert_eq!(path, PathBuf::from("/srv/www"));
                assert!(quiet);
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_do_update_excludes() {
        let args = CliArgs::parse_from([
            "olctl",
            "do-update",
            "--exclude-themes",
            "twentytwenty",
        ]);
        match args.command {
            Command::DoUpdate { exclude_themes, .. } => {
                assert_eq!(exclude_themes.as_deref(), Some("twentytwenty"));
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_change_domain_requires_from_and_to() {
        assert!(CliArgs::try_parse_from(["olctl", "change-domain"]).is_err());
        assert!(CliArgs::try_parse_from([
            "olctl",
            "change-domain",
            "--from",
            "old.example.org"
        ])
        .is_err());
    }

    #[test]
    fn test_change_domain_full() {
        let args = CliArgs::parse_from([
            "olctl",
            "change-domain",
            "--from",
            "old.example.org",
            "--to",
            "new.example.org",
            "--dry-run",
        ]);
        match args.command {
            Command::ChangeDomain {
                from, to, dry_run, ..
            } => {
                assert_eq!(from, "old.example.org");
                assert_eq!(to, "new.example.org");
                assert!(dry_run);
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(CliArgs::try_parse_from(["olctl"]).is_err());
    }
}
