//! Ansible invocation — decrypts a vaulted YAML file by asking ansible to
//! dump the host variables of `localhost`.

pub mod inventory;

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use zeroize::Zeroizing;

use crate::errors::{ExtractError, Result};
use inventory::TempInventory;

/// Host every invocation targets; also the marker the extractor looks for.
pub const TARGET_HOST: &str = "localhost";

/// Module argument asking ansible to print the full hostvars dictionary.
pub const DEBUG_VAR_ARG: &str = "var=hostvars[inventory_hostname]";

/// Something that can turn a vaulted YAML file into ansible's raw output.
///
/// The production implementation shells out to ansible; tests substitute
/// their own runner.
pub trait DecryptRunner {
    fn decrypt(&self, yaml_file: &Path, password_file: &Path) -> Result<Zeroizing<String>>;
}

/// Runs the real `ansible` ad-hoc command.
#[derive(Debug, Clone)]
pub struct AnsibleRunner {
    program: String,
}

impl AnsibleRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl DecryptRunner for AnsibleRunner {
    fn decrypt(&self, yaml_file: &Path, password_file: &Path) -> Result<Zeroizing<String>> {
        // Removed when this goes out of scope, on success and on every `?`.
        let inventory = TempInventory::create()?;

        let args = ansible_args(inventory.path(), password_file, yaml_file);
        tracing::info!(program = %self.program, yaml = %yaml_file.display(), "running ansible");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ExtractError::LaunchFailed {
                program: self.program.clone(),
                source,
            })?;

        tracing::debug!(status = %output.status, bytes = output.stdout.len(), "ansible finished");

        if !output.status.success() {
            drop(Zeroizing::new(output.stdout));
            return Err(ExtractError::AnsibleFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        match String::from_utf8(output.stdout) {
            Ok(stdout) => Ok(Zeroizing::new(stdout)),
            Err(e) => {
                let valid_up_to = e.utf8_error().valid_up_to();
                drop(Zeroizing::new(e.into_bytes()));
                Err(ExtractError::InvalidOutputEncoding { valid_up_to })
            }
        }
    }
}

/// Build the argument list for `ansible localhost -m debug ...`.
pub fn ansible_args(inventory: &Path, password_file: &Path, yaml_file: &Path) -> Vec<OsString> {
    let mut extra_vars = OsString::from("@");
    extra_vars.push(yaml_file);

    vec![
        TARGET_HOST.into(),
        "-i".into(),
        inventory.into(),
        "--vault-password-file".into(),
        password_file.into(),
        "-e".into(),
        extra_vars,
        "-m".into(),
        "debug".into(),
        "-a".into(),
        DEBUG_VAR_ARG.into(),
    ]
}
