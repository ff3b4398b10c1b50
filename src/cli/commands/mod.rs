//! CLI command implementations.

mod doctor;
mod mcp;
mod tools;

pub use doctor::run_doctor;
pub use mcp::run_mcp;
pub use tools::run_tools;
