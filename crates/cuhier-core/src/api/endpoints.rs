//! ClickUp v2 endpoint URLs.

use url::Url;

use super::ApiError;

/// Builds endpoint URLs under a base such as `https://api.clickup.com/api/v2`.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Result<Self, ApiError> {
        let base = base.trim().trim_end_matches('/').to_string();
        Url::parse(&base).map_err(|_| ApiError::InvalidUrl { url: base.clone() })?;
        Ok(Self { base })
    }

    pub fn folders(&self, space_id: &str) -> Result<Url, ApiError> {
        self.url(&format!("space/{space_id}/folder"))
    }

    pub fn lists(&self, folder_id: &str) -> Result<Url, ApiError> {
        self.url(&format!("folder/{folder_id}/list"))
    }

    pub fn tasks(&self, list_id: &str) -> Result<Url, ApiError> {
        self.url(&format!("list/{list_id}/task"))
    }

    pub fn task(&self, task_id: &str) -> Result<Url, ApiError> {
        self.url(&format!("task/{task_id}"))
    }

    pub fn list(&self, list_id: &str) -> Result<Url, ApiError> {
        self.url(&format!("list/{list_id}"))
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}/{}", self.base, path);
        Url::parse(&raw).map_err(|_| ApiError::InvalidUrl { url: raw })
    }
}

/// Extracts the space id (last path segment) from a space URL, e.g.
/// `https://app.clickup.com/123/v/s/9001` → `9001`.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn space_id_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    Some(segment.to_string())
}
