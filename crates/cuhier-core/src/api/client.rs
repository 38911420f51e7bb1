//! Blocking ClickUp client on top of curl.
//!
//! Runs in the current thread; call from `spawn_blocking` if used from async code.

use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use super::{ApiError, Endpoints, TaskApi, TaskQuery};
use crate::config::CuhierConfig;
use crate::control::AbortToken;
use crate::model::{
    Folder, FoldersEnvelope, ListsEnvelope, Task, TaskList, TaskUpdate, TasksPage,
};
use crate::retry::{run_with_retry, sleep_unless_aborted, RetryPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Put,
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

pub struct ClickUpClient {
    endpoints: Endpoints,
    api_key: String,
    policy: RetryPolicy,
    page_delay: Duration,
    connect_timeout: Duration,
    timeout: Duration,
    abort: AbortToken,
}

impl std::fmt::Debug for ClickUpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickUpClient")
            .field("endpoints", &self.endpoints)
            .field("policy", &self.policy)
            .field("page_delay", &self.page_delay)
            .finish_non_exhaustive()
    }
}

impl ClickUpClient {
    pub fn new(cfg: &CuhierConfig, api_key: &str) -> Result<Self, ApiError> {
        Ok(Self {
            endpoints: Endpoints::new(&cfg.base_url)?,
            api_key: api_key.to_string(),
            policy: RetryPolicy::from_config(&cfg.retry_or_default()),
            page_delay: cfg.page_delay(),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            abort: AbortToken::new(),
        })
    }

    /// Share an abort token; pending retries and page waits stop when it is set.
    pub fn with_abort(mut self, abort: AbortToken) -> Self {
        self.abort = abort;
        self
    }

    /// One request; anything but HTTP 200 is an error.
    fn perform(&self, method: Method, url: &Url, body: Option<&[u8]>) -> Result<Vec<u8>, ApiError> {
        let mut response = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        match method {
            Method::Get => easy.get(true)?,
            Method::Put | Method::Delete => easy.custom_request(method.as_str())?,
        }
        if let Some(body) = body {
            easy.post_fields_copy(body)?;
        }

        let mut headers = curl::easy::List::new();
        headers.append(&format!("Authorization: {}", self.api_key))?;
        headers.append("Content-Type: application/json")?;
        // Suppress `Expect: 100-continue` on request bodies.
        headers.append("Expect:")?;
        easy.http_headers(headers)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if code != 200 {
            return Err(ApiError::Status {
                code,
                url: url.to_string(),
                body: String::from_utf8_lossy(&response).into_owned(),
            });
        }
        Ok(response)
    }

    fn send(&self, method: Method, url: &Url, body: Option<&[u8]>) -> Result<Vec<u8>, ApiError> {
        tracing::debug!("{} {}", method.as_str(), url);
        run_with_retry(&self.policy, Some(self.abort.flag()), || {
            self.perform(method, url, body)
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ApiError> {
        let bytes = self.send(Method::Get, url, None)?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

fn flag(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

fn with_closed(mut url: Url) -> Url {
    url.query_pairs_mut().append_pair("include_closed", "true");
    url
}

impl TaskApi for ClickUpClient {
    fn folders(&self, space_id: &str) -> Result<Vec<Folder>, ApiError> {
        let url = with_closed(self.endpoints.folders(space_id)?);
        let envelope: FoldersEnvelope = self.get_json(&url)?;
        Ok(envelope.folders)
    }

    fn lists(&self, folder_id: &str) -> Result<Vec<TaskList>, ApiError> {
        let url = with_closed(self.endpoints.lists(folder_id)?);
        let envelope: ListsEnvelope = self.get_json(&url)?;
        Ok(envelope.lists)
    }

    fn tasks(&self, list_id: &str, query: TaskQuery) -> Result<Vec<Task>, ApiError> {
        let mut all = Vec::new();
        let mut page = 0u32;
        loop {
            let mut url = self.endpoints.tasks(list_id)?;
            url.query_pairs_mut()
                .append_pair("include_closed", flag(query.include_closed))
                .append_pair("subtasks", flag(query.subtasks))
                .append_pair("page", &page.to_string());

            let body: TasksPage = self.get_json(&url)?;
            // An empty page ends the listing even if `last_page` says otherwise.
            let last = body.is_last() || body.tasks.is_empty();
            all.extend(body.tasks);
            if last {
                break;
            }
            page += 1;
            if !sleep_unless_aborted(self.page_delay, Some(self.abort.flag())) {
                return Err(ApiError::Aborted);
            }
        }
        tracing::debug!(list = list_id, pages = page + 1, "fetched {} task(s)", all.len());
        Ok(all)
    }

    fn task(&self, task_id: &str) -> Result<Task, ApiError> {
        self.get_json(&self.endpoints.task(task_id)?)
    }

    fn list(&self, list_id: &str) -> Result<TaskList, ApiError> {
        self.get_json(&self.endpoints.list(list_id)?)
    }

    fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<(), ApiError> {
        let url = self.endpoints.task(task_id)?;
        let body = serde_json::to_vec(update).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })?;
        self.send(Method::Put, &url, Some(&body))?;
        Ok(())
    }

    fn delete_list(&self, list_id: &str) -> Result<(), ApiError> {
        self.send(Method::Delete, &self.endpoints.list(list_id)?, None)?;
        Ok(())
    }
}
