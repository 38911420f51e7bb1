//! Sweep driver: spaces → folders → lists, running the selected passes.

mod report;

pub use report::SweepReport;

use anyhow::Result;
use std::fmt;
use std::str::FromStr;

use crate::api::TaskApi;
use crate::config::{CuhierConfig, SpaceTarget};
use crate::control::{escalate, AbortToken, SweepAborted};
use crate::hierarchy::LinkPass;
use crate::status::StatusPass;

/// Which passes a sweep runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pass {
    /// Subtask linking only.
    Link,
    /// Status propagation only.
    #[default]
    Status,
    /// Linking, then status propagation, per folder.
    All,
}

impl Pass {
    pub fn links(self) -> bool {
        matches!(self, Pass::Link | Pass::All)
    }

    pub fn statuses(self) -> bool {
        matches!(self, Pass::Status | Pass::All)
    }
}

impl FromStr for Pass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "link" => Ok(Pass::Link),
            "status" => Ok(Pass::Status),
            "all" => Ok(Pass::All),
            other => Err(format!("unknown pass {other:?} (expected link, status or all)")),
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pass::Link => "link",
            Pass::Status => "status",
            Pass::All => "all",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepOptions {
    pub pass: Pass,
    pub delete_empty_lists: bool,
    pub depth_field: String,
}

impl SweepOptions {
    pub fn from_config(cfg: &CuhierConfig, pass: Pass) -> Self {
        Self {
            pass,
            delete_empty_lists: cfg.delete_empty_lists,
            depth_field: cfg.depth_field.clone(),
        }
    }
}

pub struct Sweeper<A> {
    api: A,
    options: SweepOptions,
    abort: AbortToken,
}

impl<A: TaskApi> Sweeper<A> {
    pub fn new(api: A, options: SweepOptions) -> Self {
        Self {
            api,
            options,
            abort: AbortToken::new(),
        }
    }

    pub fn with_abort(mut self, abort: AbortToken) -> Self {
        self.abort = abort;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Processes every space in order. A failing space is logged and counted;
    /// an abort ends the sweep with `report.aborted` set.
    pub fn run(&self, spaces: &[SpaceTarget]) -> SweepReport {
        let mut report = SweepReport::default();
        for space in spaces {
            report.spaces += 1;
            tracing::info!("processing {} ({})", space.label, space.url);
            match self.run_space(space, &mut report) {
                Ok(()) => {}
                Err(e) if e.is::<SweepAborted>() => {
                    tracing::warn!("sweep aborted while processing {}", space.url);
                    report.aborted = true;
                    break;
                }
                Err(e) => {
                    tracing::error!("an error occurred while processing {}: {:#}", space.url, e);
                    report.spaces_failed += 1;
                }
            }
            tracing::info!("finished processing {}", space.url);
        }
        report
    }

    fn run_space(&self, space: &SpaceTarget, report: &mut SweepReport) -> Result<()> {
        self.abort.check()?;
        let folders = self.api.folders(&space.space_id).map_err(escalate)?;
        tracing::debug!(space = %space.space_id, "{} folder(s)", folders.len());

        for folder in &folders {
            self.abort.check()?;
            report.folders += 1;

            if self.options.pass.links() {
                LinkPass::new(&self.api, &self.options.depth_field, &self.abort)
                    .delete_empty_lists(self.options.delete_empty_lists)
                    .run_folder(folder, &mut report.link)?;
            }

            if self.options.pass.statuses() {
                let lists = self.api.lists(&folder.id).map_err(escalate)?;
                tracing::info!("processing folder {} ({})", folder.id, folder.name);
                let pass = StatusPass::new(&self.api, &self.abort);
                for list in &lists {
                    self.abort.check()?;
                    pass.run_list(list, &mut report.status)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
