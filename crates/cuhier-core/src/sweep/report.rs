//! Summary of a sweep.

use std::fmt;

use crate::hierarchy::LinkStats;
use crate::status::StatusStats;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub spaces: usize,
    pub spaces_failed: usize,
    pub folders: usize,
    pub link: LinkStats,
    pub status: StatusStats,
    /// The sweep was stopped by the abort token.
    pub aborted: bool,
}

impl SweepReport {
    /// Every space finished and no update failed.
    pub fn is_clean(&self) -> bool {
        !self.aborted
            && self.spaces_failed == 0
            && self.link.link_failures == 0
            && self.status.update_failures == 0
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "spaces: {} ({} failed)  folders: {}",
            self.spaces, self.spaces_failed, self.folders
        )?;
        writeln!(
            f,
            "linked: {} ({} failed)  lists deleted: {}",
            self.link.tasks_linked, self.link.link_failures, self.link.lists_deleted
        )?;
        write!(
            f,
            "status updates: {} ({} failed) across {} list(s)",
            self.status.tasks_updated, self.status.update_failures, self.status.lists
        )?;
        if self.aborted {
            write!(f, "\naborted before completion")?;
        }
        Ok(())
    }
}
