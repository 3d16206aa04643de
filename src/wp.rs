//! Site-management CLI integration
//!
//! Every mutation and query against the network goes through the `wp`
//! binary. The [`CommandRunner`] trait is the process-execution seam;
//! [`WpCli`] is the typed facade the rest of the crate talks to. Tests
//! substitute a mock runner, so no decision logic ever shells out directly.

use crate::domain::{AvailableUpdate, ExtensionType};
use crate::error::CommandError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The site-management binary
const WP_BINARY: &str = "wp";

/// Environment variable forcing the reported locale for one invocation.
///
/// Translation side-fetches follow the reported locale, so pinning it to
/// `en_US` during installs keeps update runs from pulling language packs.
pub const LOCALE_OVERRIDE_ENV: &str = "WP_CLI_LOCALE";

/// Locale used while installing updates
const INSTALL_LOCALE: &str = "en_US";

/// Captured output of one collaborator invocation
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
    /// Whether the process exited successfully
    pub success: bool,
}

impl CommandOutput {
    /// A successful invocation with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }

    /// A successful exit that nevertheless wrote to stderr
    pub fn with_stderr(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            success: true,
        }
    }

    /// A failed invocation
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
        }
    }
}

/// Trait for executing site-management commands
pub trait CommandRunner: Send + Sync {
    /// Run one `wp` invocation with extra environment variables
    fn run(
        &self,
        args: &[String],
        envs: &[(String, String)],
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandError>;
}

/// Runner that executes the real `wp` binary
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        args: &[String],
        envs: &[(String, String)],
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandError> {
        let mut command = Command::new(WP_BINARY);
        command.args(args).current_dir(working_dir);
        for (key, value) in envs {
            command.env(key, value);
        }

        let output = command
            .output()
            .map_err(|e| CommandError::launch(display_command(args), e))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}

/// Typed facade over the site-management CLI
pub struct WpCli {
    runner: Box<dyn CommandRunner>,
    root: PathBuf,
}

impl WpCli {
    /// Create a facade that shells out to the real binary
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            runner: Box::new(SystemRunner::new()),
            root: root.into(),
        }
    }

    /// Create a facade with an injected runner (for testing)
    pub fn with_runner(runner: Box<dyn CommandRunner>, root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            root: root.into(),
        }
    }

    /// The network root this facade operates in
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List installed extensions of one type with an update available.
    ///
    /// The listing command reporting anything on stderr is treated as a
    /// failed query; no partial rows are returned.
    pub fn available_updates(
        &self,
        extension_type: ExtensionType,
    ) -> Result<Vec<AvailableUpdate>, CommandError> {
        let args = string_args(&[
            extension_type.slug(),
            "list",
            "--update=available",
            "--format=csv",
            "--fields=name,title,update_version,version",
        ]);
        let output = self.run(&args, &[])?;

        if !output.stderr.trim().is_empty() {
            return Err(CommandError::stderr(
                display_command(&args),
                output.stderr.trim(),
            ));
        }

        parse_update_listing(&output.stdout, &display_command(&args))
    }

    /// Look up the site id a domain resolves to, if any
    pub fn site_id_for_domain(&self, domain: &str) -> Result<Option<u64>, CommandError> {
        let args = string_args(&["site", "list", "--format=csv", "--fields=blog_id,domain"]);
        let output = self.run(&args, &[])?;

        if !output.success {
            return Err(CommandError::failed(
                display_command(&args),
                output.stderr.trim(),
            ));
        }

        for line in output.stdout.lines().skip(1) {
            let fields = split_csv_line(line);
            if fields.len() < 2 {
                continue;
            }
            if fields[1] == domain {
                let blog_id = fields[0].parse::<u64>().map_err(|_| {
                    CommandError::invalid_output(
                        display_command(&args),
                        format!("non-numeric site id '{}'", fields[0]),
                    )
                })?;
                return Ok(Some(blog_id));
            }
        }

        Ok(None)
    }

    /// The network's base table prefix
    pub fn table_prefix(&self) -> Result<String, CommandError> {
        let args = string_args(&["config", "get", "table_prefix"]);
        let output = self.run(&args, &[])?;

        if !output.success {
            return Err(CommandError::failed(
                display_command(&args),
                output.stderr.trim(),
            ));
        }

        let prefix = output.stdout.trim().to_string();
        if prefix.is_empty() {
            return Err(CommandError::invalid_output(
                display_command(&args),
                "empty table prefix",
            ));
        }
        Ok(prefix)
    }

    /// Enumerate tables whose names start with a prefix
    pub fn tables_with_prefix(&self, prefix: &str) -> Result<Vec<String>, CommandError> {
        let args = string_args(&[
            "db",
            "tables",
            &format!("{}*", prefix),
            "--all-tables-with-prefix",
            "--format=csv",
        ]);
        let output = self.run(&args, &[])?;

        if !output.success {
            return Err(CommandError::failed(
                display_command(&args),
                output.stderr.trim(),
            ));
        }

        Ok(output
            .stdout
            .trim()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Whether the named plugin is active anywhere on the network
    pub fn is_plugin_active(&self, slug: &str) -> Result<bool, CommandError> {
        let args = string_args(&["plugin", "is-active", slug]);
        let output = self.run(&args, &[])?;
        Ok(output.success)
    }

    /// Rewrite a string across the given tables via search-replace
    pub fn search_replace(
        &self,
        from: &str,
        to: &str,
        tables: &[String],
        dry_run: bool,
    ) -> Result<(), CommandError> {
        let mut args = string_args(&["search-replace", from, to]);
        args.extend(tables.iter().cloned());
        args.push("--skip-columns=guid".to_string());
        args.push("--precise".to_string());
        if dry_run {
            args.push("--dry-run".to_string());
        }

        let output = self.run(&args, &[])?;
        if !output.success {
            return Err(CommandError::failed(
                display_command(&args),
                output.stderr.trim(),
            ));
        }
        Ok(())
    }

    /// Install an extension update, optionally pinned to a version.
    ///
    /// The locale override applies to this one invocation only.
    pub fn install_update(
        &self,
        extension_type: ExtensionType,
        name: &str,
        version: Option<&str>,
    ) -> Result<(), CommandError> {
        let mut args = string_args(&[extension_type.slug(), "update", name]);
        if let Some(version) = version {
            args.push(format!("--version={}", version));
        }

        let envs = [(
            LOCALE_OVERRIDE_ENV.to_string(),
            INSTALL_LOCALE.to_string(),
        )];
        let output = self.run(&args, &envs)?;
        if !output.success {
            return Err(CommandError::failed(
                display_command(&args),
                output.stderr.trim(),
            ));
        }
        Ok(())
    }

    fn run(
        &self,
        args: &[String],
        envs: &[(String, String)],
    ) -> Result<CommandOutput, CommandError> {
        self.runner.run(args, envs, &self.root)
    }
}

fn string_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

fn display_command(args: &[String]) -> String {
    format!("{} {}", WP_BINARY, args.join(" "))
}

fn parse_update_listing(
    stdout: &str,
    command: &str,
) -> Result<Vec<AvailableUpdate>, CommandError> {
    let mut items = Vec::new();

    for line in stdout.trim().lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_csv_line(line);
        if fields.len() < 4 {
            return Err(CommandError::invalid_output(
                command,
                format!("expected 4 fields, got {}: '{}'", fields.len(), line),
            ));
        }

        items.push(AvailableUpdate::new(
            &fields[0], &fields[1], &fields[2], &fields[3],
        ));
    }

    Ok(items)
}

/// Split one CSV line, honoring double-quoted fields
pub(crate) fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                // An escaped quote inside a quoted field.
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}


#[cfg(test)]
mod tests {
    use super::testing::MockRunner;
    use super::*;
    use std::sync::Arc;

    const LISTING: &str = "name,title,update_version,version\n\
        akismet,Akismet Anti-spam,5.4,5.3\n\
        buddypress,\"BuddyPress, Community Edition\",12.1.0,12.0.0\n";

    fn wp_with(runner: Arc<MockRunner>) -> WpCli {
        WpCli::with_runner(Box::new(runner), "/srv/www")
    }

    #[test]
    fn test_available_updates_parses_rows() {
        let runner = Arc::new(MockRunner::new().respond("plugin list", CommandOutput::ok(LISTING)));
        let wp = wp_with(runner);

        let items = wp.available_updates(ExtensionType::Plugin).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "akismet");
        assert_eq!(items[0].update_version, "5.4");
        assert_eq!(items[0].version, "5.3");
        // Quoted title with an embedded comma survives intact.
        assert_eq!(items[1].title, "BuddyPress, Community Edition");
    }

    #[test]
    fn test_available_updates_stderr_is_fatal() {
        let runner = Arc::new(MockRunner::new().respond(
            "plugin list",
            CommandOutput::with_stderr(LISTING, "Error: database gone"),
        ));
        let wp = wp_with(runner);

        let err = wp.available_updates(ExtensionType::Plugin).unwrap_err();
        assert!(matches!(err, CommandError::Stderr { .. }));
    }

    #[test]
    fn test_available_updates_empty_listing() {
        let runner = Arc::new(MockRunner::new().respond(
            "theme list",
            CommandOutput::ok("name,title,update_version,version\n"),
        ));
        let wp = wp_with(runner);

        let items = wp.available_updates(ExtensionType::Theme).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_available_updates_malformed_row() {
        let runner = Arc::new(
            MockRunner::new().respond(
                "plugin list",
                CommandOutput::ok("name,title,update_version,version\nbroken,row\n"),
            ),
        );
        let wp = wp_with(runner);

        let err = wp.available_updates(ExtensionType::Plugin).unwrap_err();
        assert!(matches!(err, CommandError::InvalidOutput { .. }));
    }

    #[test]
    fn test_site_id_for_domain_found() {
        let runner = Arc::new(MockRunner::new().respond(
            "site list",
            CommandOutput::ok("blog_id,domain\n1,openlab.example.org\n42,old.example.org\n"),
        ));
        let wp = wp_with(runner);

        assert_eq!(wp.site_id_for_domain("old.example.org").unwrap(), Some(42));
        assert_eq!(wp.site_id_for_domain("absent.example.org").unwrap(), None);
    }

    #[test]
    fn test_table_prefix_trimmed() {
        let runner =
            Arc::new(MockRunner::new().respond("config get", CommandOutput::ok("wp_\n")));
        let wp = wp_with(runner);

        assert_eq!(wp.table_prefix().unwrap(), "wp_");
    }

    #[test]
    fn test_tables_with_prefix() {
        let runner = Arc::new(MockRunner::new().respond(
            "db tables",
            CommandOutput::ok("wp_42_posts,wp_42_options,wp_42_comments\n"),
        ));
        let wp = wp_with(runner);

        let tables = wp.tables_with_prefix("wp_42_").unwrap();
        assert_eq!(tables, vec!["wp_42_posts", "wp_42_options", "wp_42_comments"]);
    }

    #[test]
    fn test_is_plugin_active_mirrors_exit_status() {
        let runner = Arc::new(
            MockRunner::new().respond("plugin is-active", CommandOutput::failed("")),
        );
        let wp = wp_with(runner);
        assert!(!wp.is_plugin_active("buddypress").unwrap());

        let runner =
            Arc::new(MockRunner::new().respond("plugin is-active", CommandOutput::ok("")));
        let wp = wp_with(runner);
        assert!(wp.is_plugin_active("buddypress").unwrap());
    }

    #[test]
    fn test_search_replace_arguments() {
        let runner = Arc::new(MockRunner::new().respond("search-replace", CommandOutput::ok("")));
        let wp = wp_with(Arc::clone(&runner));

        let tables = vec!["wp_42_posts".to_string(), "wp_42_options".to_string()];
        wp.search_replace("old.example.org", "new.example.org", &tables, true)
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains("search-replace old.example.org new.example.org"));
        assert!(calls[0].contains("wp_42_posts wp_42_options"));
        assert!(calls[0].contains("--skip-columns=guid"));
        assert!(calls[0].contains("--precise"));
        assert!(calls[0].ends_with("--dry-run"));
    }

    #[test]
    fn test_search_replace_without_dry_run() {
        let runner = Arc::new(MockRunner::new().respond("search-replace", CommandOutput::ok("")));
        let wp = wp_with(Arc::clone(&runner));

        wp.search_replace("a", "b", &["wp_posts".to_string()], false)
            .unwrap();
        assert!(!runner.calls()[0].contains("--dry-run"));
    }

    #[test]
    fn test_install_update_pins_version() {
        let runner = Arc::new(MockRunner::new().respond("plugin update", CommandOutput::ok("")));
        let wp = wp_with(Arc::clone(&runner));

        wp.install_update(ExtensionType::Plugin, "akismet", Some("5.3.2"))
            .unwrap();
        assert_eq!(runner.calls()[0], "plugin update akismet --version=5.3.2");
    }

    #[test]
    fn test_install_update_latest_has_no_pin() {
        let runner = Arc::new(MockRunner::new().respond("theme update", CommandOutput::ok("")));
        let wp = wp_with(Arc::clone(&runner));

        wp.install_update(ExtensionType::Theme, "twentytwenty", None)
            .unwrap();
        assert_eq!(runner.calls()[0], "theme update twentytwenty");
    }

    #[test]
    fn test_install_update_failure_propagates() {
        let runner = Arc::new(
            MockRunner::new().respond("plugin update", CommandOutput::failed("download failed")),
        );
        let wp = wp_with(runner);

        let err = wp
            .install_update(ExtensionType::Plugin, "akismet", None)
            .unwrap_err();
        assert!(matches!(err, CommandError::Failed { .. }));
    }

    #[test]
    fn test_split_csv_line_plain() {
        assert_eq!(split_csv_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_csv_line_quoted_comma() {
        assert_eq!(
            split_csv_line("a,\"b, with comma\",c"),
            vec!["a", "b, with comma", "c"]
        );
    }

    #[test]
    fn test_split_csv_line_escaped_quote() {
        assert_eq!(split_csv_line("\"say \"\"hi\"\"\",x"), vec!["say \"hi\"", "x"]);
    }

    #[test]
    fn test_split_csv_line_trailing_empty_field() {
        assert_eq!(split_csv_line("a,b,"), vec!["a", "b", ""]);
    }
}
