//! Application error types using thiserror
//!
//! Error hierarchy:
//! - CommandError: failures of the site-management CLI collaborator
//! - ManifestError: issues with the update manifest file
//! - RegistryError: issues with the remote tag registry
//! - ReportError: failures writing the CSV report
//! - RenameError: domain-rename validation failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Site-management CLI related errors
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Tag registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Report writing errors
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Domain rename validation errors
    #[error(transparent)]
    Rename(#[from] RenameError),
}

/// Errors from invoking the site-management CLI
#[derive(Error, Debug)]
pub enum CommandError {
    /// The command could not be launched at all
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran but exited with a failure status
    #[error("`{command}` failed: {stderr}")]
    Failed { command: String, stderr: String },

    /// The command produced error output where none is tolerated
    #[error("`{command}` reported errors: {stderr}")]
    Stderr { command: String, stderr: String },

    /// The command produced output we could not make sense of
    #[error("unexpected output from `{command}`: {message}")]
    InvalidOutput { command: String, message: String },
}

/// Errors related to the update manifest file
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No manifest exists at the expected path
    #[error("could not find a manifest at {path}")]
    NotFound { path: PathBuf },

    /// Failed to read the manifest file
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the manifest file
    #[error("failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to delete the manifest file
    #[error("failed to delete manifest {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest contents were not valid JSON in the expected shape
    #[error("failed to parse manifest {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Errors related to the remote tag registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Failed to construct the HTTP client
    #[error("failed to create HTTP client: {message}")]
    Client { message: String },

    /// Network request failed
    #[error("failed to fetch tags for '{slug}': {message}")]
    Network { slug: String, message: String },

    /// Request timed out
    #[error("timeout while fetching tags for '{slug}'")]
    Timeout { slug: String },

    /// No tag listing exists for this extension
    #[error("no tag listing found for '{slug}'")]
    NotFound { slug: String },

    /// The registry responded with something unusable
    #[error("invalid response for '{slug}': {message}")]
    InvalidResponse { slug: String, message: String },
}

/// Errors writing the CSV report
#[derive(Error, Debug)]
pub enum ReportError {
    /// Failed to write the report file
    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Domain rename validation errors
#[derive(Error, Debug)]
pub enum RenameError {
    /// The source domain does not resolve to a site
    #[error("no site with the domain {domain} was found")]
    SourceNotFound { domain: String },

    /// The target domain already resolves to a site
    #[error("an existing site was found with the domain {domain}")]
    TargetExists { domain: String },
}

impl CommandError {
    /// Creates a new Launch error
    pub fn launch(command: impl Into<String>, source: std::io::Error) -> Self {
        CommandError::Launch {
            command: command.into(),
            source,
        }
    }

    /// Creates a new Failed error
    pub fn failed(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        CommandError::Failed {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Creates a new Stderr error
    pub fn stderr(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        CommandError::Stderr {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Creates a new InvalidOutput error
    pub fn invalid_output(command: impl Into<String>, message: impl Into<String>) -> Self {
        CommandError::InvalidOutput {
            command: command.into(),
            message: message.into(),
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new Read error
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::Write {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Parse error
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new Network error
    pub fn network(slug: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::Network {
            slug: slug.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(slug: impl Into<String>) -> Self {
        RegistryError::Timeout { slug: slug.into() }
    }

    /// Creates a new NotFound error
    pub fn not_found(slug: impl Into<String>) -> Self {
        RegistryError::NotFound { slug: slug.into() }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(slug: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::InvalidResponse {
            slug: slug.into(),
            message: message.into(),
        }
    }
}
