//! `cuhier run` – sweep the configured spaces.

use anyhow::{bail, Result};
use cuhier_core::api::{ClickUpClient, DryRunApi};
use cuhier_core::config::{self, CuhierConfig, SpaceTarget};
use cuhier_core::control::AbortToken;
use cuhier_core::sweep::{Pass, SweepOptions, SweepReport, Sweeper};

#[derive(Debug, Clone)]
pub struct RunArgs {
    pub pass: Pass,
    pub spaces: Vec<String>,
    pub dry_run: bool,
    pub keep_empty_lists: bool,
}

/// Picks the spaces named by `--space`, in configured order. No labels means all.
pub fn select_spaces(configured: &[SpaceTarget], labels: &[String]) -> Result<Vec<SpaceTarget>> {
    if labels.is_empty() {
        return Ok(configured.to_vec());
    }
    for label in labels {
        if !configured.iter().any(|s| s.label.eq_ignore_ascii_case(label)) {
            bail!("no configured space is labelled {label:?}");
        }
    }
    Ok(configured
        .iter()
        .filter(|s| labels.iter().any(|l| s.label.eq_ignore_ascii_case(l)))
        .cloned()
        .collect())
}

pub async fn run_sweep(cfg: CuhierConfig, args: RunArgs) -> Result<()> {
    let creds = config::load_credentials()?;
    if let Some(team) = &creds.team_id {
        tracing::info!("team id {}", team);
    }
    let targets = select_spaces(&creds.spaces, &args.spaces)?;

    let mut options = SweepOptions::from_config(&cfg, args.pass);
    if args.keep_empty_lists {
        options.delete_empty_lists = false;
    }
    tracing::info!(
        pass = %args.pass,
        dry_run = args.dry_run,
        "sweeping {} space(s)",
        targets.len()
    );

    let abort = AbortToken::new();
    let interrupt = {
        let abort = abort.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received; stopping after the current list");
                abort.request_abort();
            }
        })
    };

    let dry_run = args.dry_run;
    let report = tokio::task::spawn_blocking(move || -> Result<SweepReport> {
        let client = ClickUpClient::new(&cfg, &creds.api_key)?.with_abort(abort.clone());
        let report = if dry_run {
            Sweeper::new(DryRunApi::new(client), options)
                .with_abort(abort)
                .run(&targets)
        } else {
            Sweeper::new(client, options).with_abort(abort).run(&targets)
        };
        Ok(report)
    })
    .await??;
    interrupt.abort();

    println!("{report}");
    if report.aborted {
        bail!("sweep aborted by user");
    }
    if report.spaces_failed > 0 {
        bail!(
            "{} of {} space(s) failed; see the log for details",
            report.spaces_failed,
            report.spaces
        );
    }
    Ok(())
}
