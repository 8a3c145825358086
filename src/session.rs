//! Editing session: the configuration store wired to a render synchronizer
//!
//! Both the GUI and script mode drive one of these. Every accepted edit that
//! changed something schedules a debounced push; exports flush first so the
//! saved file always reflects the latest edit.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::store::{Change, ConfigStore, Edit};
use crate::config::model::Configuration;
use crate::error::ConfigError;
use crate::render::engine::{DownloadRequest, RenderEngine};
use crate::render::sync::RenderSynchronizer;

pub struct Session<E> {
    store: ConfigStore,
    sync: RenderSynchronizer<E>,
}

impl<E: RenderEngine> Session<E> {
    /// Start a session and push the initial configuration right away
    pub fn new(store: ConfigStore, engine: E, quiet: Duration) -> Self {
        let mut sync = RenderSynchronizer::new(engine, quiet);
        sync.push(store.config());
        Self { store, sync }
    }

    pub fn config(&self) -> &Configuration {
        self.store.config()
    }

    pub fn active_preset(&self) -> Option<&'static str> {
        self.store.active_preset()
    }

    pub fn engine(&self) -> &E {
        self.sync.engine()
    }

    pub fn synchronizer(&self) -> &RenderSynchronizer<E> {
        &self.sync
    }

    /// Apply one edit and schedule a render if it changed anything
    pub fn apply(&mut self, edit: Edit, now: Instant) -> Result<Change, ConfigError> {
        let change = self.store.apply(edit)?;
        if change.needs_render() {
            self.sync.notify(now);
        } else {
            debug!("Edit left configuration unchanged");
        }
        Ok(change)
    }

    /// Drive the debouncer; returns whether a push happened
    pub fn tick(&mut self, now: Instant) -> bool {
        self.sync.tick(now, self.store.config())
    }

    pub fn flush(&mut self) -> bool {
        self.sync.flush(self.store.config())
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.sync.remaining(now)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.sync.deadline()
    }

    /// Flush any pending render, then ask the engine to save it
    pub fn export(&mut self, request: &DownloadRequest) -> Result<PathBuf> {
        if self.flush() {
            debug!("Flushed pending render before export");
        }
        let path = self
            .sync
            .engine_mut()
            .download(request)
            .with_context(|| format!("Failed to export {}", request.path().display()))?;
        info!(path = %path.display(), renders = self.sync.pushes(), "Export complete");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use crate::render::engine::testing::RecordingEngine;
    use crate::types::{ErrorCorrection, ExportFormat, ShapeType, StyleTarget};

    const QUIET: Duration = Duration::from_millis(150);

    fn session() -> Session<RecordingEngine> {
        Session::new(ConfigStore::new(), RecordingEngine::default(), QUIET)
    }

    #[test]
    fn test_initial_push() {
        let session = session();
        assert_eq!(session.engine().updates.len(), 1);
        assert!(session.deadline().is_none());
    }

    #[test]
    fn test_edits_are_debounced() {
        let start = Instant::now();
        let mut session = session();

        session
            .apply(Edit::ApplyPreset { name: "dots".into() }, start)
            .unwrap();
        session
            .apply(Edit::SetSize { size: 500 }, start + Duration::from_millis(50))
            .unwrap();

        assert!(!session.tick(start + QUIET));
        assert!(session.tick(start + Duration::from_millis(200)));

        let updates = &session.engine().updates;
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1].width, 500);
        assert_eq!(updates[1].dots_options.shape, ShapeType::Dots);
        assert_eq!(session.active_preset(), Some("dots"));
    }

    #[test]
    fn test_unchanged_edit_schedules_nothing() {
        let start = Instant::now();
        let mut session = session();

        let change = session
            .apply(Edit::ApplyPreset { name: "nope".into() }, start)
            .unwrap();
        assert_eq!(change, Change::Unchanged);
        assert!(session.deadline().is_none());
    }

    #[test]
    fn test_rejected_edit_leaves_state_alone() {
        let start = Instant::now();
        let mut session = session();

        let result = session.apply(
            Edit::SetShape {
                target: StyleTarget::CornerDot,
                shape: ShapeType::Classy,
            },
            start,
        );
        assert!(result.is_err());
        assert!(session.deadline().is_none());
        assert_eq!(session.config().corner_dot.shape, ShapeType::Square);
    }

    #[test]
    fn test_export_flushes_pending_edit() {
        let start = Instant::now();
        let mut session = session();

        session
            .apply(
                Edit::AttachLogo {
                    image: "data:image/png;base64,AAAA".into(),
                },
                start,
            )
            .unwrap();
        session
            .apply(
                Edit::SetFlatColor {
                    target: StyleTarget::Dots,
                    role: crate::types::ColorRole::Primary,
                    color: HexColor::WHITE,
                },
                start,
            )
            .unwrap();

        let request = DownloadRequest::new("qr-code", ExportFormat::Svg, "/tmp");
        let path = session.export(&request).unwrap();

        assert_eq!(path, PathBuf::from("/tmp/qr-code.svg"));
        let engine = session.engine();
        assert_eq!(engine.updates.len(), 2);
        assert_eq!(engine.updates[1].qr_options.error_correction_level, ErrorCorrection::H);
        assert_eq!(engine.downloads, vec![request]);
    }
}
