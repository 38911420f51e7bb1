//! Parent lookup for a task, driven by its list's encoded path.

use super::LinkPass;
use crate::api::{ApiError, TaskApi, TaskQuery};
use crate::control::SweepAborted;
use crate::list_path;
use crate::model::{Task, TaskList};

/// A parent task and the list it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentMatch {
    pub task: Task,
    pub list: TaskList,
}

impl<A: TaskApi> LinkPass<'_, A> {
    /// Finds the parent of `task` if its depth field equals `level`.
    ///
    /// The parent name stays fixed while the probes widen towards the root;
    /// every candidate must sit one level above the task.
    pub(crate) fn decide_parent(
        &self,
        task: &Task,
        list_name: &str,
        lists: &[TaskList],
        level: u32,
    ) -> Result<Option<ParentMatch>, SweepAborted> {
        if !task.field_is_level(self.depth_field, level) {
            tracing::trace!(
                "depth of task {} does not match level {}, skipping",
                task.id,
                level
            );
            return Ok(None);
        }

        let parent = match list_path::parent_task_name(list_name, level) {
            Some(p) if !p.name.trim().is_empty() => p,
            _ => {
                tracing::info!(
                    "list name {} does not name a parent for task {} ({})",
                    list_name,
                    task.id,
                    task.name
                );
                return Ok(None);
            }
        };

        let parent_level = level - 1;
        for probe in list_path::ancestors(list_name, level, &parent) {
            let found = self.find_parent(
                &probe.parent_list_name,
                &parent.name,
                lists,
                parent_level,
                probe.grandparent_task_name.as_deref(),
            )?;
            if found.is_some() {
                return Ok(found);
            }

            if let Some(fallback) = &probe.fallback_list_name {
                let found = self.find_parent(fallback, &parent.name, lists, parent_level, None)?;
                if found.is_some() {
                    return Ok(found);
                }
            }
        }

        tracing::info!(
            "could not find a parent for task {} ({}) in list {}",
            task.id,
            task.name,
            list_name
        );
        Ok(None)
    }

    /// Searches lists named `list_name` for a task whose name contains
    /// `task_name` at `parent_level`. With `grandparent` set, the candidate's
    /// own parent must carry that name.
    pub(crate) fn find_parent(
        &self,
        list_name: &str,
        task_name: &str,
        lists: &[TaskList],
        parent_level: u32,
        grandparent: Option<&str>,
    ) -> Result<Option<ParentMatch>, SweepAborted> {
        let wanted = list_name.trim();
        let needle = task_name.trim();

        for candidate_list in lists.iter().filter(|l| l.name.trim() == wanted) {
            let tasks = match self.api.tasks(&candidate_list.id, TaskQuery::all()) {
                Ok(t) => t,
                Err(ApiError::Aborted) => return Err(SweepAborted),
                Err(e) => {
                    tracing::info!(
                        "no tasks found for list {} ({}): {}",
                        candidate_list.id,
                        candidate_list.name,
                        e
                    );
                    Vec::new()
                }
            };

            for candidate in tasks {
                if !candidate.name.trim().contains(needle)
                    || !candidate.field_is_level(self.depth_field, parent_level)
                {
                    continue;
                }
                let accepted = match grandparent {
                    None => true,
                    Some(expected) => self.grandparent_matches(&candidate, expected)?,
                };
                if accepted {
                    return Ok(Some(ParentMatch {
                        task: candidate,
                        list: candidate_list.clone(),
                    }));
                }
            }
        }

        tracing::debug!("parent task {} does not exist in list {}", needle, wanted);
        Ok(None)
    }

    fn grandparent_matches(&self, candidate: &Task, expected: &str) -> Result<bool, SweepAborted> {
        let Some(parent_id) = candidate.parent.as_deref().filter(|p| !p.trim().is_empty()) else {
            return Ok(false);
        };
        match self.api.task(parent_id) {
            Ok(gp) => Ok(gp.name.trim() == expected.trim()),
            Err(ApiError::Aborted) => Err(SweepAborted),
            Err(e) => {
                tracing::warn!("could not fetch task {}: {}", parent_id, e);
                Ok(false)
            }
        }
    }
}
