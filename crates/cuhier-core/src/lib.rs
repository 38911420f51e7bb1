pub mod api;
pub mod config;
pub mod control;
pub mod hierarchy;
pub mod list_path;
pub mod logging;
pub mod model;
pub mod retry;
pub mod status;
pub mod sweep;
