//! CLI command handlers, one file per command.

mod config;
mod parse_list_name;
mod run;
mod spaces;

pub use config::run_config;
pub use parse_list_name::{describe_list_name, run_parse_list_name};
pub use run::{run_sweep, select_spaces, RunArgs};
pub use spaces::run_spaces;
