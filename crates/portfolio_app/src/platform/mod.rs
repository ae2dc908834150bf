mod app;
pub mod cli;
mod config;
mod effects;
mod logging;
mod snapshot;
mod ui;

pub use app::run_app;
