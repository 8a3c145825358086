//! Render pipeline
//!
//! - **snapshot**: pure normalization of a configuration into a full record
//! - **sync**: debounced pushes to an engine
//! - **engine**: the engine trait and download requests
//! - **raster** / **svg**: the built-in engine and its vector export
//! - **geometry**: layout and shapes shared by both writers

pub mod engine;
pub mod geometry;
pub mod raster;
pub mod snapshot;
pub mod svg;
pub mod sync;
