//! Desktop configurator
//!
//! - **app**: the eframe application, preview and status line
//! - **controls**: UI buffers and state-to-form reconciliation
//! - **components**: one module per control panel section

mod app;
mod components;
pub mod constants;
pub mod controls;

pub use app::run_gui;
