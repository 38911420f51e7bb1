//! Credentials and target spaces from the environment (optionally a `.env` file).

use anyhow::{bail, Context, Result};
use std::fmt;

use crate::api::space_id_from_url;

pub const API_KEY_VAR: &str = "CLICKUP_API_KEY";
pub const TEAM_ID_VAR: &str = "CLICKUP_TEAM_ID";
pub const SPACE_URLS_VAR: &str = "CLICKUP_SPACE_URLS";

/// A space to process, as configured in `CLICKUP_SPACE_URLS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceTarget {
    pub label: String,
    pub url: String,
    pub space_id: String,
}

#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub team_id: Option<String>,
    pub spaces: Vec<SpaceTarget>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("team_id", &self.team_id)
            .field("spaces", &self.spaces)
            .finish()
    }
}

/// Loads `.env` from the working directory (if any), then reads the process
/// environment. Variables already set in the process win over `.env`.
pub fn load_credentials() -> Result<Credentials> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("could not read .env: {}", e),
    }
    credentials_from_lookup(|name| std::env::var(name).ok())
}

pub fn credentials_from_lookup<F>(lookup: F) -> Result<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = lookup(API_KEY_VAR)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .with_context(|| format!("{API_KEY_VAR} is not set"))?;
    let team_id = lookup(TEAM_ID_VAR)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let raw_spaces = lookup(SPACE_URLS_VAR).with_context(|| format!("{SPACE_URLS_VAR} is not set"))?;
    let spaces = parse_space_targets(&raw_spaces)?;
    if spaces.is_empty() {
        bail!("{SPACE_URLS_VAR} lists no spaces");
    }

    Ok(Credentials {
        api_key,
        team_id,
        spaces,
    })
}

/// Parses `label|url,label|url,...`. An entry without `|` is a bare URL
/// labeled with its space id.
pub fn parse_space_targets(raw: &str) -> Result<Vec<SpaceTarget>> {
    let mut out = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (label, url) = match entry.split_once('|') {
            Some((label, url)) => (label.trim(), url.trim()),
            None => ("", entry),
        };
        let space_id = space_id_from_url(url)
            .with_context(|| format!("no space id in space url {url:?}"))?;
        let label = if label.is_empty() {
            space_id.clone()
        } else {
            label.to_string()
        };
        out.push(SpaceTarget {
            label,
            url: url.to_string(),
            space_id,
        });
    }
    Ok(out)
}
