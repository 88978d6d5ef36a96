//! Luxcurve Application
//!
//! The desktop shell: screens, the edit controller wiring chart gestures to
//! the curve store, and persisted connection settings.

mod app;
mod config;
mod controller;
mod ui;

pub use app::{App, Screen};
pub use config::AppConfig;
