//! The extract pipeline: validate inputs, decrypt through ansible, then
//! print the variables in the requested mode.

use std::io::{self, Write};

use crate::ansible::{AnsibleRunner, DecryptRunner};
use crate::cli::{output, validate_inputs, Cli};
use crate::config::Settings;
use crate::errors::Result;
use crate::extract::extract_variables;
use crate::render::{render_env, render_key_value, OutputMode};

/// Run the command against the real ansible, printing to stdout.
pub fn run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?.with_ansible_bin(cli.ansible_bin.as_deref());
    let runner = AnsibleRunner::new(settings.ansible_bin);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli, &runner, &mut out)
}

/// Execute the pipeline with the given runner and output sink.
pub fn execute<R, W>(cli: &Cli, runner: &R, out: &mut W) -> Result<()>
where
    R: DecryptRunner + ?Sized,
    W: Write + ?Sized,
{
    validate_inputs(&cli.yaml_file, &cli.vault_password_file)?;
    tracing::debug!(
        yaml = %cli.yaml_file.display(),
        password_file = %cli.vault_password_file.display(),
        "inputs validated"
    );

    let raw = runner.decrypt(&cli.yaml_file, &cli.vault_password_file)?;

    let mode = cli.output_mode();
    let content = match mode {
        OutputMode::Debug => {
            out.write_all(raw.as_bytes())?;
            out.flush()?;
            return Ok(());
        }
        OutputMode::Env => {
            let variables = extract_variables(&raw)?;
            warn_if_empty(cli, variables.is_empty());
            render_env(&variables)
        }
        OutputMode::KeyValue => {
            let variables = extract_variables(&raw)?;
            warn_if_empty(cli, variables.is_empty());
            render_key_value(&variables)
        }
    };

    out.write_all(content.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn warn_if_empty(cli: &Cli, empty: bool) {
    if empty {
        output::warning(&format!(
            "No variables found in '{}'",
            cli.yaml_file.display()
        ));
    }
}
