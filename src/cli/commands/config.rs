use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{migrate_file, missing_keys};
use crate::errors::AppResult;
use crate::ui::messages::{detail, info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            info(format!("Current configuration ({}):\n", path.display()));
            println!("{}", cfg.to_yaml()?);
        }

        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {}; defaults are in use.",
                    path.display()
                ));
            } else {
                let missing = missing_keys(&path)?;
                if missing.is_empty() {
                    success("Configuration file is complete.");
                } else {
                    warning(format!("{} setting(s) missing:", missing.len()));
                    for key in &missing {
                        detail(key);
                    }
                }
            }
        }

        if *migrate {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {}; run `rattendance init` first.",
                    path.display()
                ));
            } else {
                let added = migrate_file(&path)?;
                if added.is_empty() {
                    info("Configuration already up to date.");
                } else {
                    success(format!("Added {} setting(s):", added.len()));
                    for key in &added {
                        detail(key);
                    }
                }
            }
        }
    }

    Ok(())
}
