//! Render engine seam
//!
//! The synchronizer only needs `update` and `download`; anything that can
//! turn a snapshot into an image can sit behind this trait.

use anyhow::Result;
use std::path::PathBuf;

use crate::render::snapshot::Snapshot;
use crate::types::ExportFormat;

/// Where and how to save the current render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub name: String,
    pub extension: ExportFormat,
    pub directory: PathBuf,
}

impl DownloadRequest {
    pub fn new(name: impl Into<String>, extension: ExportFormat, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            extension,
            directory: directory.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.directory
            .join(format!("{}.{}", self.name, self.extension.extension()))
    }
}

pub trait RenderEngine {
    /// Replace the engine state with a full snapshot and re-render
    fn update(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// Save the current render; returns the written path
    fn download(&mut self, request: &DownloadRequest) -> Result<PathBuf>;
}
