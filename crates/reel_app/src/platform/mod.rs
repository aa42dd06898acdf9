//! Headless boundary layer: wires the coordinators to the terminal.
mod app;
mod config;
mod effects;
mod logging;

pub use app::run_app;
