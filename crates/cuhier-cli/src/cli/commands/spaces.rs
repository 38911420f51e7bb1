//! `cuhier spaces` – list the configured spaces.

use anyhow::Result;
use cuhier_core::config;

pub fn run_spaces() -> Result<()> {
    let creds = config::load_credentials()?;
    println!("{:<20} {:<14} {}", "LABEL", "SPACE", "URL");
    for s in &creds.spaces {
        println!("{:<20} {:<14} {}", s.label, s.space_id, s.url);
    }
    Ok(())
}
