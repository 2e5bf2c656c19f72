// Library surface for the binary, headless integration tests and reuse.
pub mod app_dirs;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod language;
pub mod logging;
pub mod projection;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod timer;
pub mod word_generator;

pub use difficulty::Difficulty;
pub use engine::TypingEngine;
pub use error::{Error, Result};
pub use stats::{ResultSink, Stats, TestResult};
