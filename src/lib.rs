// Library surface for headless/integration tests and reuse.
// Everything the binary needs except terminal setup lives here.
pub mod app_dirs;
pub mod config;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod keys;
pub mod language;
pub mod logging;
pub mod preferences;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod ui;
pub mod word_source;

pub use engine::Engine;
pub use error::{Error, Result};
