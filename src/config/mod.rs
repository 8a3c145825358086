//! Configuration management for QR Studio
//!
//! - **model**: the session-only `Configuration` record
//! - **store**: `ConfigStore` mutators and the `Edit` command type
//! - **presets**: built-in style templates
//! - **settings**: application preferences persisted as JSON

pub mod model;
pub mod presets;
pub mod settings;
pub mod store;

pub use settings::AppSettings;
