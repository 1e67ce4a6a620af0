//! Configuration command handler.
//!
//! Prints every setting with its value and source (`default`, `file` or
//! `env`) as pretty JSON:
//!
//! ```json
//! {
//!   "target_score": {
//!     "value": 200,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "target_score": {
            "value": config.target_score,
            "source": sources.target_score,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "default_policy": {
            "value": config.default_policy,
            "source": sources.default_policy,
        },
        "computer_players": {
            "value": config.computer_players,
            "source": sources.computer_players,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
