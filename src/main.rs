//! olctl - administrative CLI for OpenLab multisite networks
//!
//! Three operations:
//! - prepare-update: classify available extension updates into a report
//!   and manifest
//! - do-update: replay a prepared manifest and install resolved versions
//! - change-domain: rename a site's domain across the network's tables

use clap::Parser;
use olctl::cli::{CliArgs, Command};
use olctl::console;
use olctl::domain::Blacklist;
use olctl::registry::{HttpClient, SvnTagRegistry};
use olctl::wp::WpCli;
use olctl::{execute, prepare, rename};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            console::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    match args.command {
        Command::PrepareUpdate {
            version,
            exclude_plugins,
            exclude_themes,
            path,
            quiet,
        } => {
            let current = std::env::var(prepare::VERSION_ENV).ok();
            let version = prepare::infer_release_version(version.as_deref(), current.as_deref());
            let blacklist =
                Blacklist::resolve(exclude_plugins.as_deref(), exclude_themes.as_deref());
            let wp = WpCli::new(path);

            prepare::run(&wp, &version, &blacklist, quiet)?;
            Ok(ExitCode::SUCCESS)
        }

        Command::DoUpdate {
            exclude_plugins,
            exclude_themes,
            path,
            quiet,
        } => {
            let blacklist =
                Blacklist::resolve(exclude_plugins.as_deref(), exclude_themes.as_deref());
            let wp = WpCli::new(path);
            let registry = SvnTagRegistry::new(HttpClient::new()?);

            execute::run(&wp, &registry, &blacklist, quiet).await?;
            Ok(ExitCode::SUCCESS)
        }

        Command::ChangeDomain {
            from,
            to,
            dry_run,
            path,
            quiet,
        } => {
            let wp = WpCli::new(path);
            rename::run(&wp, &from, &to, dry_run, quiet)?;

            // Caches are out of reach from here; the operator has to flush
            // them, and the exit code makes sure that is not missed.
            console::error("olctl cannot flush site caches, so make sure to flush them yourself!");
            Ok(ExitCode::FAILURE)
        }
    }
}
