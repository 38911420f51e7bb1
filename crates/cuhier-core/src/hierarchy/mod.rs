//! Subtask-linking pass.
//!
//! Lists are visited once per level, deepest level first. Each top-level task
//! whose depth field equals the current level is attached to the parent task
//! named by its list's encoded path (see [`crate::list_path`]). Lists left
//! empty by the import are removed along the way.

mod parent;


pub use parent::ParentMatch;

use std::collections::HashSet;

use crate::api::{ApiError, TaskApi, TaskQuery};
use crate::control::{escalate, or_skip, AbortToken, SweepAborted};
use crate::list_path::{self, MIN_LEVEL};
use crate::model::{Folder, Task, TaskList, TaskUpdate};

/// Counters gathered by the linking pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinkStats {
    /// List visits across all levels.
    pub list_visits: usize,
    pub tasks_linked: usize,
    pub link_failures: usize,
    pub lists_deleted: usize,
}

pub struct LinkPass<'a, A> {
    api: &'a A,
    depth_field: &'a str,
    delete_empty_lists: bool,
    abort: &'a AbortToken,
}

impl<'a, A: TaskApi> LinkPass<'a, A> {
    pub fn new(api: &'a A, depth_field: &'a str, abort: &'a AbortToken) -> Self {
        Self {
            api,
            depth_field,
            delete_empty_lists: true,
            abort,
        }
    }

    pub fn delete_empty_lists(mut self, yes: bool) -> Self {
        self.delete_empty_lists = yes;
        self
    }

    /// Runs every level over the lists of `folder`.
    ///
    /// Fails if the folder's lists cannot be fetched; a list that cannot be
    /// deleted ends the folder early without failing it.
    pub fn run_folder(&self, folder: &Folder, stats: &mut LinkStats) -> anyhow::Result<()> {
        let mut lists = self.api.lists(&folder.id).map_err(escalate)?;
        // Lists already deleted in this folder; a dry run still returns them.
        let mut deleted: HashSet<String> = HashSet::new();
        tracing::info!("processing folder {} ({})", folder.id, folder.name);

        for level in list_path::levels() {
            if level == MIN_LEVEL {
                tracing::info!("processing folder {} at level {}", folder.id, level);
            }
            let snapshot = lists.clone();
            for list in &snapshot {
                self.abort.check()?;
                stats.list_visits += 1;
                if !self.process_list(list, &lists, level, stats)? {
                    continue;
                }

                tracing::info!(
                    "confirmed for deletion: no tasks in list {} ({}) in folder {}",
                    list.id,
                    list.name,
                    folder.name
                );
                if !self.delete_empty_lists {
                    tracing::info!("keeping empty list {}; deletion disabled", list.id);
                    continue;
                }
                if !self.delete_list(list, folder)? {
                    tracing::info!(
                        "could not delete list {} ({}) in folder {}; moving to next folder",
                        list.id,
                        list.name,
                        folder.name
                    );
                    return Ok(());
                }
                stats.lists_deleted += 1;
                deleted.insert(list.id.clone());
                lists = self.api.lists(&folder.id).map_err(escalate)?;
                lists.retain(|l| !deleted.contains(&l.id));
            }
        }
        Ok(())
    }

    /// Links the tasks of one list. Returns true when the list is empty and
    /// may be deleted.
    fn process_list(
        &self,
        list: &TaskList,
        lists: &[TaskList],
        level: u32,
        stats: &mut LinkStats,
    ) -> Result<bool, SweepAborted> {
        tracing::info!(
            "processing list {} in folder {}",
            list.name,
            list.folder_name()
        );
        if list_path::is_root_list(&list.name) && level > MIN_LEVEL {
            tracing::info!("skipping root list at level {}", level);
            return Ok(false);
        }

        let tasks = or_skip(self.api.tasks(&list.id, TaskQuery::top_level()), || {
            format!("tasks of list {} ({})", list.id, list.name)
        })?;

        if tasks.is_empty() {
            if !list_path::deletion_candidate(&list.name) {
                tracing::debug!(
                    "no tasks in list {} ({}), but its name does not mark it for deletion",
                    list.id,
                    list.name
                );
                return Ok(false);
            }
            tracing::info!(
                "candidate for deletion: no tasks found for list {} ({})",
                list.id,
                list.name
            );
            // Subtasks hide from the top-level listing; only delete when none exist.
            return match self.api.tasks(&list.id, TaskQuery::all()) {
                Ok(all) => Ok(all.is_empty()),
                Err(ApiError::Aborted) => Err(SweepAborted),
                Err(e) => {
                    tracing::warn!("could not recheck list {} for subtasks: {}", list.id, e);
                    Ok(false)
                }
            };
        }

        for task in &tasks {
            self.abort.check()?;
            let list_name = if task.list.name.is_empty() {
                list.name.as_str()
            } else {
                task.list.name.as_str()
            };
            self.process_task(task, list_name, lists, level, stats)?;
        }
        Ok(false)
    }

    fn process_task(
        &self,
        task: &Task,
        list_name: &str,
        lists: &[TaskList],
        level: u32,
        stats: &mut LinkStats,
    ) -> Result<(), SweepAborted> {
        tracing::debug!(
            "processing task {} in list {} at level {}",
            task.name,
            list_name,
            level
        );
        if task.has_parent() {
            tracing::debug!(
                "task {} already has parent {}",
                task.id,
                task.parent.as_deref().unwrap_or_default()
            );
            return Ok(());
        }

        let Some(found) = self.decide_parent(task, list_name, lists, level)? else {
            return Ok(());
        };

        let update = TaskUpdate::reparent(&found.task, &found.list);
        match self.api.update_task(&task.id, &update) {
            Ok(()) => {
                tracing::info!(
                    "updated subtask {} ({}) under {} ({}) in list {}",
                    task.id,
                    task.name,
                    found.task.id,
                    found.task.name,
                    found.list.name
                );
                stats.tasks_linked += 1;
            }
            Err(ApiError::Aborted) => return Err(SweepAborted),
            Err(e) => {
                tracing::warn!("failed to update subtask {}: {}", task.id, e);
                stats.link_failures += 1;
            }
        }
        Ok(())
    }

    /// Deletes `list` after confirming it still belongs to `folder`.
    fn delete_list(&self, list: &TaskList, folder: &Folder) -> Result<bool, SweepAborted> {
        let details = match self.api.list(&list.id) {
            Ok(d) => d,
            Err(ApiError::Aborted) => return Err(SweepAborted),
            Err(e) => {
                tracing::info!("error fetching the list details for list {}: {}", list.id, e);
                return Ok(false);
            }
        };

        let home = details.folder.as_ref().map(|f| f.id.as_str());
        if home != Some(folder.id.as_str()) {
            tracing::info!(
                "list {} is not in the expected folder {} (found {:?})",
                list.id,
                folder.id,
                home
            );
            return Ok(false);
        }

        match self.api.delete_list(&list.id) {
            Ok(()) => {
                tracing::info!(
                    "deleted list {} ({}) in folder {}",
                    list.id,
                    list.name,
                    folder.id
                );
                Ok(true)
            }
            Err(ApiError::Aborted) => Err(SweepAborted),
            Err(e) => {
                tracing::info!(
                    "error deleting list {} in folder {}: {}",
                    list.id,
                    folder.id,
                    e
                );
                Ok(false)
            }
        }
    }
}
