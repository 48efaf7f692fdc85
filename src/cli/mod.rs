//! CLI module — Clap argument parser, output helpers, and the extract command.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::errors::{ExtractError, Result};
use crate::render::OutputMode;

const EXAMPLES: &str = "\
Examples:
  vault-extract --yaml-file secrets.yml --vault-password-file vault_password.txt
  vault-extract --yaml-file secrets.yml --vault-password-file vault_password.txt --debug
  vault-extract --yaml-file secrets.yml --vault-password-file vault_password.txt --env";

/// vault-extract: decrypt Ansible vault-encrypted values from YAML files.
#[derive(Parser, Debug)]
#[command(
    name = "vault-extract",
    about = "Extract and decrypt Ansible vault-encrypted values from YAML files",
    version,
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Path to the YAML file with vault-encrypted values
    #[arg(long, value_name = "PATH")]
    pub yaml_file: PathBuf,

    /// Path to the vault password file
    #[arg(long, value_name = "PATH")]
    pub vault_password_file: PathBuf,

    /// Show verbose ansible debug output
    #[arg(long)]
    pub debug: bool,

    /// Output as exported environment variables with uppercase keys
    #[arg(long)]
    pub env: bool,

    /// Ansible program to run (default: `ansible`, or `ansible_bin` from .vault-extract.toml)
    #[arg(long, value_name = "PROGRAM", env = "VAULT_EXTRACT_ANSIBLE")]
    pub ansible_bin: Option<String>,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.debug, self.env)
    }
}

/// Check that both input files exist, YAML file first.
pub fn validate_inputs(yaml_file: &Path, password_file: &Path) -> Result<()> {
    if !yaml_file.exists() {
        return Err(ExtractError::YamlFileNotFound(yaml_file.to_path_buf()));
    }

    if !password_file.exists() {
        return Err(ExtractError::PasswordFileNotFound(
            password_file.to_path_buf(),
        ));
    }

    Ok(())
}
