//! Module layout and shape geometry shared by the raster and SVG writers
//!
//! Shapes are expressed in module units relative to the element's top-left
//! corner and scaled to pixels by the caller.

use anyhow::{Result, anyhow};
use qrcode::{EcLevel, QrCode};

use crate::config::model::Gradient;
use crate::render::snapshot::Snapshot;
use crate::types::{ErrorCorrection, GradientKind, ShapeType};

/// Finder patterns are 7x7 modules; their center dot is 3x3 at offset 2
pub const FINDER_SIZE: usize = 7;
pub const FINDER_DOT_OFFSET: usize = 2;
pub const FINDER_DOT_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Rectangle with independent corner radii (top-left, top-right,
/// bottom-right, bottom-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub radii: [f32; 4],
}

impl RoundedRect {
    fn new(x: f32, y: f32, size: f32, radii: [f32; 4]) -> Self {
        let max = size / 2.0;
        Self {
            x,
            y,
            w: size,
            h: size,
            radii: radii.map(|r| r.clamp(0.0, max)),
        }
    }

    pub fn contains(&self, u: f32, v: f32) -> bool {
        let (u, v) = (u - self.x, v - self.y);
        if u < 0.0 || v < 0.0 || u > self.w || v > self.h {
            return false;
        }

        let [tl, tr, br, bl] = self.radii;
        let in_circle = |cx: f32, cy: f32, r: f32| {
            let (dx, dy) = (u - cx, v - cy);
            dx * dx + dy * dy <= r * r
        };

        if u < tl && v < tl {
            return in_circle(tl, tl, tl);
        }
        if u > self.w - tr && v < tr {
            return in_circle(self.w - tr, tr, tr);
        }
        if u > self.w - br && v > self.h - br {
            return in_circle(self.w - br, self.h - br, br);
        }
        if u < bl && v > self.h - bl {
            return in_circle(bl, self.h - bl, bl);
        }
        true
    }
}

/// A filled outline with an optional hole (corner squares are rings)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub outer: RoundedRect,
    pub hole: Option<RoundedRect>,
}

impl Shape {
    pub fn contains(&self, u: f32, v: f32) -> bool {
        self.outer.contains(u, v) && !self.hole.is_some_and(|hole| hole.contains(u, v))
    }

    pub fn extent(&self) -> f32 {
        self.outer.w
    }

    /// Shape of a single data module
    pub fn dot(shape: ShapeType) -> Self {
        let radii = match shape {
            ShapeType::Square => [0.0; 4],
            ShapeType::Dots | ShapeType::Dot => [0.5; 4],
            ShapeType::Rounded => [0.25; 4],
            ShapeType::ExtraRounded => [0.4; 4],
            ShapeType::Classy => [0.5, 0.0, 0.5, 0.0],
            ShapeType::ClassyRounded => [0.5, 0.15, 0.5, 0.15],
        };
        Self {
            outer: RoundedRect::new(0.0, 0.0, 1.0, radii),
            hole: None,
        }
    }

    /// Outer 7x7 ring of a finder pattern
    pub fn corner_square(shape: ShapeType) -> Self {
        let size = FINDER_SIZE as f32;
        let (outer, inner) = match shape {
            ShapeType::Dot | ShapeType::Dots => (3.5, 2.5),
            ShapeType::ExtraRounded | ShapeType::Rounded => (2.5, 1.5),
            _ => (0.0, 0.0),
        };
        Self {
            outer: RoundedRect::new(0.0, 0.0, size, [outer; 4]),
            hole: Some(RoundedRect::new(1.0, 1.0, size - 2.0, [inner; 4])),
        }
    }

    /// 3x3 center of a finder pattern
    pub fn corner_dot(shape: ShapeType) -> Self {
        let radius = match shape {
            ShapeType::Square => 0.0,
            ShapeType::Dot | ShapeType::Dots => 1.5,
            _ => 0.75,
        };
        Self {
            outer: RoundedRect::new(0.0, 0.0, FINDER_DOT_SIZE as f32, [radius; 4]),
            hole: None,
        }
    }
}

/// Position along a gradient for a pixel, 0 at the start stop and 1 at the end
pub fn gradient_t(gradient: &Gradient, x: f32, y: f32, bounds: &Bounds) -> f32 {
    let (cx, cy) = bounds.center();
    match gradient.kind {
        GradientKind::Linear => {
            let (sin, cos) = gradient.rotation.sin_cos();
            let half = linear_half_extent(gradient, bounds);
            if half <= f32::EPSILON {
                return 0.0;
            }
            0.5 + ((x - cx) * cos + (y - cy) * sin) / (2.0 * half)
        }
        GradientKind::Radial => {
            let radius = radial_radius(bounds);
            if radius <= f32::EPSILON {
                return 0.0;
            }
            ((x - cx).powi(2) + (y - cy).powi(2)).sqrt() / radius
        }
    }
}

/// Half the length of the gradient line across the bounds
pub fn linear_half_extent(gradient: &Gradient, bounds: &Bounds) -> f32 {
    let (sin, cos) = gradient.rotation.sin_cos();
    (bounds.w / 2.0) * cos.abs() + (bounds.h / 2.0) * sin.abs()
}

pub fn radial_radius(bounds: &Bounds) -> f32 {
    (bounds.w * bounds.w + bounds.h * bounds.h).sqrt() / 2.0
}

/// Where the logo sits on the canvas, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoPlacement {
    pub bounds: Bounds,
}

/// Encoded symbol mapped onto the output canvas
#[derive(Debug, Clone)]
pub struct Layout {
    pub size: u32,
    pub modules: usize,
    pub origin: f32,
    pub module_px: f32,
    dark: Vec<bool>,
    hidden: Vec<bool>,
    pub logo: Option<LogoPlacement>,
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::L => EcLevel::L,
        ErrorCorrection::M => EcLevel::M,
        ErrorCorrection::Q => EcLevel::Q,
        ErrorCorrection::H => EcLevel::H,
    }
}

impl Layout {
    /// Encode the payload and place modules; `logo_dims` is the decoded
    /// logo's pixel size, used to keep its aspect ratio
    pub fn compute(snapshot: &Snapshot, logo_dims: Option<(u32, u32)>) -> Result<Self> {
        let level = snapshot.qr_options.error_correction_level;
        let code = QrCode::with_error_correction_level(snapshot.data.as_bytes(), ec_level(level))
            .map_err(|err| anyhow!("Failed to encode payload at level {level}: {err:?}"))?;

        let modules = code.width();
        let dark: Vec<bool> = code
            .to_colors()
            .into_iter()
            .map(|color| color == qrcode::Color::Dark)
            .collect();

        let size = snapshot.width;
        let margin = snapshot.margin.min(size / 2);
        let inner = (size - 2 * margin) as f32;
        let module_px = inner / modules as f32;

        let mut layout = Self {
            size,
            modules,
            origin: margin as f32,
            module_px,
            dark,
            hidden: vec![false; modules * modules],
            logo: None,
        };

        if let Some((w, h)) = logo_dims.filter(|(w, h)| *w > 0 && *h > 0) {
            layout.place_logo(w, h, snapshot.image_options.image_size, snapshot.image_options.margin);
        }

        Ok(layout)
    }

    fn place_logo(&mut self, w: u32, h: u32, image_size: f32, margin: u32) {
        let inner = self.module_px * self.modules as f32;
        let max_box = inner * image_size.clamp(0.0, 1.0);
        let scale = (max_box / w as f32).min(max_box / h as f32);
        let (lw, lh) = (w as f32 * scale, h as f32 * scale);
        let center = self.size as f32 / 2.0;

        let bounds = Bounds {
            x: center - lw / 2.0,
            y: center - lh / 2.0,
            w: lw,
            h: lh,
        };

        let m = margin as f32;
        let clear = Bounds {
            x: bounds.x - m,
            y: bounds.y - m,
            w: bounds.w + 2.0 * m,
            h: bounds.h + 2.0 * m,
        };

        for y in 0..self.modules {
            for x in 0..self.modules {
                if !self.in_finder(x, y) && self.module_bounds(x, y).intersects(&clear) {
                    self.hidden[y * self.modules + x] = true;
                }
            }
        }

        self.logo = Some(LogoPlacement { bounds });
    }

    pub fn in_finder(&self, x: usize, y: usize) -> bool {
        let far = self.modules.saturating_sub(FINDER_SIZE);
        (x < FINDER_SIZE && y < FINDER_SIZE)
            || (x >= far && y < FINDER_SIZE)
            || (x < FINDER_SIZE && y >= far)
    }

    /// Dark data module that is drawn with the dot style
    pub fn is_dot(&self, x: usize, y: usize) -> bool {
        let idx = y * self.modules + x;
        self.dark[idx] && !self.hidden[idx] && !self.in_finder(x, y)
    }

    pub fn dots(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.modules)
            .flat_map(move |y| (0..self.modules).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.is_dot(x, y))
    }

    /// Top-left module of each finder pattern
    pub fn finder_origins(&self) -> [(usize, usize); 3] {
        let far = self.modules.saturating_sub(FINDER_SIZE);
        [(0, 0), (far, 0), (0, far)]
    }

    pub fn module_bounds(&self, x: usize, y: usize) -> Bounds {
        Bounds {
            x: self.origin + x as f32 * self.module_px,
            y: self.origin + y as f32 * self.module_px,
            w: self.module_px,
            h: self.module_px,
        }
    }

    /// Pixel bounds of an element starting at module (x, y) spanning `span` modules
    pub fn span_bounds(&self, x: usize, y: usize, span: usize) -> Bounds {
        let mut bounds = self.module_bounds(x, y);
        bounds.w = span as f32 * self.module_px;
        bounds.h = bounds.w;
        bounds
    }

    /// The area covered by modules, excluding the quiet-zone margin
    pub fn inner_bounds(&self) -> Bounds {
        self.span_bounds(0, 0, self.modules)
    }
}
