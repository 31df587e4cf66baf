//! Terminal shell around the jester core: CLI, config, logging and rendering.
mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod render;

pub use app::run_app;
