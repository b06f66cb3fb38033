pub mod app_config;
pub mod export;

pub use app_config::Config;
pub use export::{append_summary, write_summary, ExportError};
