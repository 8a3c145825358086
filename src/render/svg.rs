//! SVG export
//!
//! Vector counterpart of the raster engine. Uses the same layout, shapes
//! and gradient geometry, so both formats line up.

use anyhow::Result;
use std::fmt::Write;

use crate::color::{Background, HexColor};
use crate::config::model::Paint;
use crate::render::geometry::{
    Bounds, FINDER_DOT_OFFSET, FINDER_DOT_SIZE, FINDER_SIZE, Layout, RoundedRect, Shape,
    linear_half_extent, radial_radius,
};
use crate::render::raster::decode_logo;
use crate::render::snapshot::{Snapshot, StyleOptions};
use crate::types::GradientKind;

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Path data for a rounded rectangle in shape units, placed at `at` and
/// scaled by `unit`
fn rect_path(out: &mut String, rect: &RoundedRect, at: &Bounds, unit: f32) -> std::fmt::Result {
    let x = at.x + rect.x * unit;
    let y = at.y + rect.y * unit;
    let (w, h) = (rect.w * unit, rect.h * unit);
    let [tl, tr, br, bl] = rect.radii.map(|r| r * unit);

    write!(out, "M{:.2} {:.2}", x + tl, y)?;
    write!(out, "H{:.2}", x + w - tr)?;
    write!(out, "A{tr:.2} {tr:.2} 0 0 1 {:.2} {:.2}", x + w, y + tr)?;
    write!(out, "V{:.2}", y + h - br)?;
    write!(out, "A{br:.2} {br:.2} 0 0 1 {:.2} {:.2}", x + w - br, y + h)?;
    write!(out, "H{:.2}", x + bl)?;
    write!(out, "A{bl:.2} {bl:.2} 0 0 1 {:.2} {:.2}", x, y + h - bl)?;
    write!(out, "V{:.2}", y + tl)?;
    write!(out, "A{tl:.2} {tl:.2} 0 0 1 {:.2} {:.2}Z", x + tl, y)
}

fn shape_path(out: &mut String, shape: &Shape, at: &Bounds, unit: f32) -> std::fmt::Result {
    rect_path(out, &shape.outer, at, unit)?;
    if let Some(hole) = &shape.hole {
        rect_path(out, hole, at, unit)?;
    }
    Ok(())
}

/// Emit a gradient definition if needed and return the fill attribute value
fn fill(defs: &mut String, id: &str, paint: &Paint, bounds: &Bounds) -> Result<String> {
    let gradient = match paint {
        Paint::Flat(color) => return Ok(color.to_string()),
        Paint::Gradient(gradient) => gradient,
    };

    let (cx, cy) = bounds.center();
    match gradient.kind {
        GradientKind::Linear => {
            let (sin, cos) = gradient.rotation.sin_cos();
            let half = linear_half_extent(gradient, bounds);
            write!(
                defs,
                r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}">"#,
                cx - cos * half,
                cy - sin * half,
                cx + cos * half,
                cy + sin * half,
            )?;
        }
        GradientKind::Radial => {
            write!(
                defs,
                r#"<radialGradient id="{id}" gradientUnits="userSpaceOnUse" cx="{cx:.2}" cy="{cy:.2}" r="{:.2}">"#,
                radial_radius(bounds),
            )?;
        }
    }

    for stop in gradient.stops() {
        write!(
            defs,
            r#"<stop offset="{}" stop-color="{}"/>"#,
            stop.offset, stop.color
        )?;
    }

    defs.push_str(match gradient.kind {
        GradientKind::Linear => "</linearGradient>",
        GradientKind::Radial => "</radialGradient>",
    });
    Ok(format!("url(#{id})"))
}

fn paint_of(options: &StyleOptions) -> Paint {
    options.paint().unwrap_or(Paint::Flat(HexColor::BLACK))
}

/// Render the snapshot as a standalone SVG document
pub fn render(snapshot: &Snapshot) -> Result<String> {
    let logo = decode_logo(snapshot);
    let layout = Layout::compute(snapshot, logo.as_ref().map(|img| (img.width(), img.height())))?;
    let size = layout.size;
    let unit = layout.module_px;

    let mut defs = String::new();
    let mut body = String::new();

    if let Background::Color(color) = snapshot.background_options.color {
        write!(body, r#"<rect width="{size}" height="{size}" fill="{color}"/>"#)?;
    }

    let inner = layout.inner_bounds();
    let dots_fill = fill(&mut defs, "dots-fill", &paint_of(&snapshot.dots_options), &inner)?;
    let dot_shape = Shape::dot(snapshot.dots_options.shape);
    let mut dots = String::new();
    for (x, y) in layout.dots() {
        rect_path(&mut dots, &dot_shape.outer, &layout.module_bounds(x, y), unit)?;
    }
    write!(body, r#"<path fill="{dots_fill}" d="{dots}"/>"#)?;

    let square_shape = Shape::corner_square(snapshot.corners_square_options.shape);
    let square_paint = paint_of(&snapshot.corners_square_options);
    let dot_shape = Shape::corner_dot(snapshot.corners_dot_options.shape);
    let dot_paint = paint_of(&snapshot.corners_dot_options);

    for (i, (fx, fy)) in layout.finder_origins().into_iter().enumerate() {
        let ring = layout.span_bounds(fx, fy, FINDER_SIZE);
        let ring_fill = fill(&mut defs, &format!("corner-square-{i}"), &square_paint, &ring)?;
        let mut d = String::new();
        shape_path(&mut d, &square_shape, &ring, unit)?;
        write!(body, r#"<path fill="{ring_fill}" fill-rule="evenodd" d="{d}"/>"#)?;

        let center = layout.span_bounds(fx + FINDER_DOT_OFFSET, fy + FINDER_DOT_OFFSET, FINDER_DOT_SIZE);
        let center_fill = fill(&mut defs, &format!("corner-dot-{i}"), &dot_paint, &center)?;
        let mut d = String::new();
        shape_path(&mut d, &dot_shape, &center, unit)?;
        write!(body, r#"<path fill="{center_fill}" d="{d}"/>"#)?;
    }

    if let (Some(href), Some(placement)) = (snapshot.image.as_deref(), layout.logo) {
        let b = placement.bounds;
        write!(
            body,
            r#"<image href="{}" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/>"#,
            escape(href),
            b.x,
            b.y,
            b.w,
            b.h
        )?;
    }

    let mut out = String::new();
    write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    )?;
    if !defs.is_empty() {
        write!(out, "<defs>{defs}</defs>")?;
    }
    out.push_str(&body);
    out.push_str("</svg>\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::store::ConfigStore;
    use crate::render::snapshot::normalize;
    use crate::types::StyleTarget;

    #[test]
    fn test_default_document() {
        let svg = render(&normalize(ConfigStore::new().config())).unwrap();

        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="300""#));
        assert!(svg.contains(r##"<rect width="300" height="300" fill="#FFFFFF"/>"##));
        assert!(!svg.contains("<defs>"));
        // One dots path plus a ring and a center per finder pattern
        assert_eq!(svg.matches("<path").count(), 7);
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_transparent_background_has_no_rect() {
        let mut store = ConfigStore::new();
        store.set_background(Background::Transparent);
        let svg = render(&normalize(store.config())).unwrap();
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_gradients_become_defs() {
        let mut store = ConfigStore::new();
        store.apply_preset("neon");
        store.set_gradient_kind(StyleTarget::Dots, GradientKind::Radial);
        let svg = render(&normalize(store.config())).unwrap();

        assert!(svg.contains(r#"<radialGradient id="dots-fill""#));
        assert!(svg.contains(r#"fill="url(#dots-fill)""#));
        assert!(svg.contains(r##"<stop offset="0" stop-color="#00F260"/>"##));
        assert!(svg.contains(r##"<stop offset="1" stop-color="#0575E6"/>"##));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a&b"<>"#), "a&amp;b&quot;&lt;&gt;");
    }
}
