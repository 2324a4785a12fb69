//! Shared data model, error types, configuration, and logging setup for the
//! PoC execution engine. This is the seam crate: the YAML parser (out of
//! scope here) hands the host a [`model::Poc`], and every other engine crate
//! builds on the types defined here.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod render;
pub mod reverse;
pub mod value;
pub mod varmap;

pub use config::EngineConfig;
pub use error::{PocError, PocResult};
