use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let mut shown = cfg.clone();
            shown.apikey = mask(&shown.apikey);

            let content = toml::to_string_pretty(&shown)
                .map_err(|e| AppError::Config(e.to_string()))?;
            println!("📄 Current configuration:\n");
            println!("{content}");
        }

        if *check {
            cfg.validate()?;
            success(format!(
                "Configuration is valid: every {}s, up to {} tries {}s apart",
                cfg.interval, cfg.tries, cfg.timeout
            ));
        }
    }

    Ok(())
}

/// Keep only the last four characters of a secret.
fn mask(secret: &str) -> String {
    let n = secret.chars().count();
    let tail: String = secret.chars().skip(n.saturating_sub(4)).collect();
    format!("{}{}", "*".repeat(n.saturating_sub(4)), tail)
}
