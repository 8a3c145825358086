//! Built-in render engine
//!
//! Paints the snapshot onto an RGBA canvas and exports PNG, JPEG or SVG.
//! Output is a close approximation of the styled look; exact pixel parity
//! with any other renderer is not a goal.

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::color::HexColor;
use crate::config::model::Paint;
use crate::logo;
use crate::render::engine::{DownloadRequest, RenderEngine};
use crate::render::geometry::{
    Bounds, FINDER_DOT_OFFSET, FINDER_DOT_SIZE, FINDER_SIZE, Layout, Shape, gradient_t,
};
use crate::render::snapshot::{Snapshot, StyleOptions};
use crate::render::svg;
use crate::types::ExportFormat;

pub struct RasterEngine {
    snapshot: Snapshot,
    canvas: RgbaImage,
    generation: u64,
    live_output: Option<(PathBuf, ExportFormat)>,
}

impl RasterEngine {
    /// Build an engine and render the initial snapshot
    pub fn create(snapshot: &Snapshot) -> Result<Self> {
        let canvas = render(snapshot)?;
        Ok(Self {
            snapshot: snapshot.clone(),
            canvas,
            generation: 1,
            live_output: None,
        })
    }

    /// Mirror every future render into `path`, starting with the current one
    pub fn attach_to(&mut self, path: impl Into<PathBuf>, format: ExportFormat) -> Result<()> {
        let path = path.into();
        self.write_to(&path, format)?;
        info!(path = %path.display(), "Attached live output");
        self.live_output = Some((path, format));
        Ok(())
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Bumped on every successful render so viewers know when to refresh
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn write_to(&self, path: &Path, format: ExportFormat) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create export directory {:?}", parent))?;
        }

        match format {
            ExportFormat::Png => self
                .canvas
                .save_with_format(path, ImageFormat::Png)
                .with_context(|| format!("Failed to write PNG to {:?}", path)),
            ExportFormat::Jpeg => flatten_on_white(&self.canvas)
                .save_with_format(path, ImageFormat::Jpeg)
                .with_context(|| format!("Failed to write JPEG to {:?}", path)),
            ExportFormat::Svg => {
                let document = svg::render(&self.snapshot)?;
                fs::write(path, document)
                    .with_context(|| format!("Failed to write SVG to {:?}", path))
            }
        }
    }
}

impl RenderEngine for RasterEngine {
    fn update(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.canvas = render(snapshot)?;
        self.snapshot = snapshot.clone();
        self.generation += 1;
        debug!(generation = self.generation, size = snapshot.width, "Rendered snapshot");

        if let Some((path, format)) = &self.live_output {
            self.write_to(path, *format)?;
        }
        Ok(())
    }

    fn download(&mut self, request: &DownloadRequest) -> Result<PathBuf> {
        let path = request.path();
        self.write_to(&path, request.extension)?;
        info!(path = %path.display(), format = request.extension.extension(), "Exported QR code");
        Ok(path)
    }
}

/// Decode the snapshot's logo, if any. Undecodable logos are skipped.
pub(crate) fn decode_logo(snapshot: &Snapshot) -> Option<DynamicImage> {
    let url = snapshot.image.as_deref()?;
    let decoded = logo::decode_data_url(url)
        .and_then(|(_, bytes)| image::load_from_memory(&bytes).context("Unsupported logo image"));
    match decoded {
        Ok(image) => Some(image),
        Err(err) => {
            warn!(error = %err, "Rendering without logo");
            None
        }
    }
}

fn render(snapshot: &Snapshot) -> Result<RgbaImage> {
    let logo = decode_logo(snapshot);
    let layout = Layout::compute(snapshot, logo.as_ref().map(|img| (img.width(), img.height())))?;

    let background = snapshot.background_options.color.rgba();
    let mut canvas = RgbaImage::from_pixel(layout.size, layout.size, Rgba(background));

    let dot_shape = Shape::dot(snapshot.dots_options.shape);
    let dot_paint = paint_of(&snapshot.dots_options);
    let inner = layout.inner_bounds();
    for (x, y) in layout.dots() {
        let cell = layout.module_bounds(x, y);
        fill_shape(&mut canvas, &dot_shape, &cell, layout.module_px, &dot_paint, &inner);
    }

    let square_shape = Shape::corner_square(snapshot.corners_square_options.shape);
    let square_paint = paint_of(&snapshot.corners_square_options);
    let dot_center_shape = Shape::corner_dot(snapshot.corners_dot_options.shape);
    let dot_center_paint = paint_of(&snapshot.corners_dot_options);

    for (fx, fy) in layout.finder_origins() {
        let ring = layout.span_bounds(fx, fy, FINDER_SIZE);
        fill_shape(&mut canvas, &square_shape, &ring, layout.module_px, &square_paint, &ring);

        let center = layout.span_bounds(fx + FINDER_DOT_OFFSET, fy + FINDER_DOT_OFFSET, FINDER_DOT_SIZE);
        fill_shape(&mut canvas, &dot_center_shape, &center, layout.module_px, &dot_center_paint, &center);
    }

    if let (Some(image), Some(placement)) = (logo, layout.logo) {
        let b = placement.bounds;
        let scaled = imageops::resize(
            &image.to_rgba8(),
            b.w.round().max(1.0) as u32,
            b.h.round().max(1.0) as u32,
            FilterType::Triangle,
        );
        imageops::overlay(&mut canvas, &scaled, b.x.round() as i64, b.y.round() as i64);
    }

    Ok(canvas)
}

fn paint_of(options: &StyleOptions) -> Paint {
    options.paint().unwrap_or(Paint::Flat(HexColor::BLACK))
}

fn paint_at(paint: &Paint, x: f32, y: f32, bounds: &Bounds) -> [u8; 4] {
    match paint {
        Paint::Flat(color) => color.rgba(),
        Paint::Gradient(gradient) => {
            let t = gradient_t(gradient, x, y, bounds);
            gradient.start.lerp(&gradient.end, t)
        }
    }
}

/// Fill `shape` placed at `at` (pixel bounds), sampling pixel centers
fn fill_shape(canvas: &mut RgbaImage, shape: &Shape, at: &Bounds, unit: f32, paint: &Paint, gradient_bounds: &Bounds) {
    if unit <= 0.0 {
        return;
    }
    let extent = shape.extent() * unit;
    let x_start = at.x.floor().max(0.0) as u32;
    let y_start = at.y.floor().max(0.0) as u32;
    let x_end = ((at.x + extent).ceil().max(0.0) as u32).min(canvas.width());
    let y_end = ((at.y + extent).ceil().max(0.0) as u32).min(canvas.height());

    for py in y_start..y_end {
        for px in x_start..x_end {
            let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
            let (u, v) = ((cx - at.x) / unit, (cy - at.y) / unit);
            if shape.contains(u, v) {
                canvas.put_pixel(px, py, Rgba(paint_at(paint, cx, cy, gradient_bounds)));
            }
        }
    }
}

/// JPEG has no alpha channel: composite onto white first
fn flatten_on_white(canvas: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let Rgba([r, g, b, a]) = *canvas.get_pixel(x, y);
        let alpha = a as f32 / 255.0;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}
