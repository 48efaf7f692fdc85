use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// All errors that can occur in vault-extract.
#[derive(Debug, Error)]
pub enum ExtractError {
    // --- Input errors ---
    #[error("YAML file '{}' not found", .0.display())]
    YamlFileNotFound(PathBuf),

    #[error("Vault password file '{}' not found", .0.display())]
    PasswordFileNotFound(PathBuf),

    // --- Ansible errors ---
    #[error("Error running ansible command: {status}{}", format_stderr(.stderr))]
    AnsibleFailed { status: ExitStatus, stderr: String },

    #[error("Failed to launch '{program}': {source}")]
    LaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected error: ansible output is not valid UTF-8 (invalid byte at offset {valid_up_to})")]
    InvalidOutputEncoding { valid_up_to: usize },

    // --- Content errors ---
    #[error("Error parsing output: No valid output found in ansible response")]
    NoValidOutput,

    #[error("Error parsing output: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Error parsing output: {0}")]
    UnexpectedStructure(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// True for errors raised while interpreting ansible's output.
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            Self::NoValidOutput | Self::InvalidJson(_) | Self::UnexpectedStructure(_)
        )
    }
}

/// Fold ansible's stderr onto the diagnostic line.
fn format_stderr(stderr: &str) -> String {
    let joined = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        String::new()
    } else {
        format!(" — ansible error output: {joined}")
    }
}

/// Convenience type alias for vault-extract results.
pub type Result<T> = std::result::Result<T, ExtractError>;
