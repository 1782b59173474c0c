use notegraph_core::config::loader::{default_config_path, ConfigError};
use notegraph_core::config::ResolvedConfig;
use std::path::Path;

pub fn run(cfg_path: Option<&Path>, loaded: Result<ResolvedConfig, ConfigError>) {
    match loaded {
        Ok(rc) => {
            println!("OK   ngraph doctor");
            println!(
                "path: {}",
                cfg_path.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("notes_root: {}", rc.notes_root.display());
            println!("max_depth: {}", rc.max_depth);
            println!("logging.level: {}", rc.logging.level);
            if let Some(ref file) = rc.logging.file {
                println!("logging.file: {}", file.display());
            }
        }
        Err(e) => {
            println!("FAIL ngraph doctor");
            println!("{e}");
            if cfg_path.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
