//! Configurator window implemented with egui/eframe

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Result, anyhow};
use eframe::{CreationContext, NativeOptions, egui};
use tracing::{error, info, warn};

use super::components::{
    Action, InfoDialog, background, content, export, footer, geometry, logo as logo_section, presets,
    style,
};
use super::constants::*;
use super::controls::ControlState;
use crate::color::Background;
use crate::config::settings::AppSettings;
use crate::config::store::{Change, ConfigStore, Edit};
use crate::logo;
use crate::render::engine::DownloadRequest;
use crate::render::raster::RasterEngine;
use crate::render::snapshot::normalize;
use crate::session::Session;
use crate::types::{ExportFormat, StyleTarget};

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

struct QrStudioApp {
    session: Session<RasterEngine>,
    controls: ControlState,
    settings: AppSettings,
    preview: Option<egui::TextureHandle>,
    preview_generation: u64,
    status_message: Option<StatusMessage>,
    dialog: Option<InfoDialog>,
}

fn section(ui: &mut egui::Ui, title: &str, open: bool, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::CollapsingHeader::new(egui::RichText::new(title).strong())
        .default_open(open)
        .show(ui, add_contents);
    ui.add_space(ITEM_SPACING);
}

impl QrStudioApp {
    fn new(_cc: &CreationContext<'_>, session: Session<RasterEngine>, settings: AppSettings) -> Self {
        info!("Initializing QR Studio window");
        let controls = ControlState::new(session.config());
        Self {
            session,
            controls,
            settings,
            preview: None,
            preview_generation: 0,
            status_message: None,
            dialog: None,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, color: egui::Color32) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            color,
        });
    }

    fn apply(&mut self, edit: Edit) {
        match self.session.apply(edit, Instant::now()) {
            Ok(Change::PresetApplied(name)) => {
                self.controls.reconcile(self.session.config());
                info!(preset = name, "Preset applied");
            }
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "Edit rejected");
                self.set_status(err.to_string(), STATUS_ERROR);
            }
        }
    }

    fn load_logo(&mut self, path: PathBuf) {
        match logo::load_data_url(&path) {
            Ok(image) => {
                self.controls.logo_path = path.display().to_string();
                self.apply(Edit::AttachLogo { image });
                self.set_status("Logo loaded, error correction raised to H", STATUS_OK);
            }
            Err(err) => {
                error!(error = ?err, path = %path.display(), "Failed to load logo");
                self.set_status(format!("Could not load logo: {err:#}"), STATUS_ERROR);
            }
        }
    }

    fn export(&mut self, format: ExportFormat) {
        let request = DownloadRequest::new(
            self.settings.export_name.clone(),
            format,
            self.settings.export_dir(),
        );
        match self.session.export(&request) {
            Ok(path) => self.set_status(format!("Saved {}", path.display()), STATUS_OK),
            Err(err) => {
                error!(error = ?err, "Export failed");
                self.set_status(format!("Export failed: {err}"), STATUS_ERROR);
            }
        }
    }

    fn handle(&mut self, action: Action) {
        match action {
            Action::Edit(edit) => self.apply(edit),
            Action::LoadLogo(path) => self.load_logo(path),
            Action::Export(format) => self.export(format),
            Action::ShowDialog(dialog) => self.dialog = Some(dialog),
        }
    }

    fn dropped_logo(ctx: &egui::Context) -> Option<PathBuf> {
        ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        })
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        let config = self.session.config();
        let active = self.session.active_preset();
        let controls = &mut self.controls;

        ui.add_space(PADDING);
        ui.heading("QR Studio");
        ui.add_space(SECTION_SPACING);

        section(ui, "Content", true, |ui| content::ui(ui, controls, actions));
        section(ui, "Presets", true, |ui| presets::ui(ui, active, actions));

        for target in StyleTarget::ALL {
            section(ui, target.label(), false, |ui| {
                style::ui(ui, target, config.style(target), controls.style_mut(target), actions)
            });
        }

        section(ui, "Background", false, |ui| background::ui(ui, controls, actions));
        section(ui, "Logo", false, |ui| logo_section::ui(ui, config, controls, actions));
        section(ui, "Settings", false, |ui| geometry::ui(ui, config, actions));

        ui.add_space(SECTION_SPACING);
        export::ui(ui, actions);
    }

    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let engine = self.session.engine();
        if self.preview.is_some() && engine.generation() == self.preview_generation {
            return;
        }

        let canvas = engine.canvas();
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [canvas.width() as usize, canvas.height() as usize],
            canvas.as_raw(),
        );
        match &mut self.preview {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.preview = Some(ctx.load_texture("qr-preview", image, egui::TextureOptions::NEAREST))
            }
        }
        self.preview_generation = engine.generation();
    }

    fn preview_ui(&mut self, ui: &mut egui::Ui) {
        self.refresh_preview(ui.ctx());
        let Some(texture) = &self.preview else {
            return;
        };

        let [w, h] = texture.size();
        let available = ui.available_size();
        let scale = (available.x / w as f32).min(available.y / h as f32).min(1.0);
        let size = egui::vec2(w as f32 * scale, h as f32 * scale);

        ui.vertical_centered(|ui| {
            ui.add_space(((available.y - size.y) / 2.0).max(0.0));
            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
            let painter = ui.painter_at(rect);

            if self.session.config().background == Background::Transparent {
                paint_checkerboard(&painter, rect);
            }
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
        });
    }
}

fn paint_checkerboard(painter: &egui::Painter, rect: egui::Rect) {
    painter.rect_filled(rect, 0.0, CHECKER_LIGHT);
    let cols = (rect.width() / CHECKER_CELL).ceil() as usize;
    let rows = (rect.height() / CHECKER_CELL).ceil() as usize;
    for row in 0..rows {
        for col in (row % 2..cols).step_by(2) {
            let min = rect.min + egui::vec2(col as f32 * CHECKER_CELL, row as f32 * CHECKER_CELL);
            let cell = egui::Rect::from_min_size(min, egui::vec2(CHECKER_CELL, CHECKER_CELL));
            painter.rect_filled(cell.intersect(rect), 0.0, CHECKER_DARK);
        }
    }
}

impl eframe::App for QrStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();
        if let Some(path) = Self::dropped_logo(ctx) {
            actions.push(Action::LoadLogo(path));
        }

        egui::SidePanel::left("controls")
            .resizable(false)
            .exact_width(PANEL_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.controls_ui(ui, &mut actions));
            });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                footer::ui(ui, &mut actions);
                ui.separator();
                if let Some(message) = &self.status_message {
                    ui.colored_label(message.color, &message.text);
                } else if self.session.synchronizer().is_pending() {
                    ui.colored_label(STATUS_INFO, "Rendering...");
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| self.preview_ui(ui));

        footer::show_dialog(ctx, &mut self.dialog);

        for action in actions {
            self.handle(action);
        }

        let now = Instant::now();
        self.session.tick(now);
        if let Some(remaining) = self.session.remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.session.flush();
        info!("QR Studio exiting");
    }
}

pub fn run_gui(settings: AppSettings) -> Result<()> {
    let store = ConfigStore::new();
    let engine = RasterEngine::create(&normalize(store.config()))?;
    let session = Session::new(store, engine, settings.debounce());

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width as f32, settings.window_height as f32])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("QR Studio")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "QR Studio",
        options,
        Box::new(move |cc| Ok(Box::new(QrStudioApp::new(cc, session, settings)))),
    )
    .map_err(|err| anyhow!("Failed to launch QR Studio window: {err}"))
}
