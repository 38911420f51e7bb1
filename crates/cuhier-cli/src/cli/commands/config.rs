//! `cuhier config` – show where the config lives and what is in effect.

use anyhow::Result;
use cuhier_core::config;

pub fn run_config() -> Result<()> {
    let path = config::config_path()?;
    let mut cfg = config::load_or_init_at(&path)?;
    println!("# {}", path.display());
    if cfg.retry.is_none() {
        println!("# no [retry] section; built-in defaults shown");
        cfg.retry = Some(cfg.retry_or_default());
    }
    print!("{}", cfg.to_toml()?);
    Ok(())
}
