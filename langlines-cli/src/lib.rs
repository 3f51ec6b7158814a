//! Command implementations and shared plumbing, exposed as a library so
//! integration tests can drive them directly.

pub mod config;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;
pub mod session;
pub mod upload;

pub use config::{PanelConfig, load_capabilities};
pub use session::parse_line_spec;
