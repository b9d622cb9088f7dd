// Library surface for headless/integration tests and reuse.
// Terminal setup and argument parsing stay in main.rs.
pub mod app;
pub mod app_dirs;
pub mod bubbles;
pub mod config;
pub mod countdown;
pub mod depth;
pub mod error;
pub mod logging;
pub mod picker;
pub mod prompts;
pub mod reward;
pub mod runtime;
pub mod strings;
pub mod typing;
pub mod ui;

pub use error::{Error, Result};
