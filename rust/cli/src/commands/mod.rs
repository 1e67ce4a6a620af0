//! Command handlers for the flip7 CLI.
//!
//! Each command lives in its own module and exposes
//! `pub fn handle_COMMAND_command(...) -> Result<(), CliError>` taking its
//! output streams as `&mut dyn Write`.

pub mod cfg;
pub mod play;
pub mod policies;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
pub use policies::handle_policies_command;
pub use sim::handle_sim_command;

use crate::config::Config;

/// Policy specs for the computer seats: the ones given on the command line,
/// or the configured default policy repeated.
pub(crate) fn computer_specs(ai: &[String], config: &Config) -> Vec<String> {
    if ai.is_empty() {
        vec![config.default_policy.clone(); config.computer_players]
    } else {
        ai.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_default_fills_empty_table() {
        let config = Config::default();
        assert_eq!(computer_specs(&[], &config), vec!["ev", "ev", "ev"]);
        let given = vec!["hit".to_string()];
        assert_eq!(computer_specs(&given, &config), vec!["hit"]);
    }
}
