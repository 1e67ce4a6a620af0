use crate::error::CliError;
use flip7_ai::{DEFAULT_POLICY, POLICIES};
use std::io::Write;

/// Lists every policy spec accepted by `--ai`.
pub fn handle_policies_command(out: &mut dyn Write) -> Result<(), CliError> {
    let width = POLICIES.iter().map(|(s, _)| s.len()).max().unwrap_or(0);
    for (spec, description) in POLICIES {
        writeln!(out, "  {:<width$}  {}", spec, description, width = width)?;
    }
    writeln!(out, "\nDefault: {}", DEFAULT_POLICY)?;
    Ok(())
}
