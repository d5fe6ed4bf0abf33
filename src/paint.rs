//! Filled shapes on top of `genpdf`'s stroke-only drawing surface.
//!
//! `Area::draw_line` strokes a polyline with the default PDF line width of one
//! point and only honours the colour of its style.  Shapes are therefore
//! filled with horizontal hairlines spaced closer than the line width, each one
//! clipped to the chord of the shape at its height.  Page-sized fills do not go
//! through here; they are written as real fill operations when the document is
//! post-processed (see `postprocess::backdrop`).

use genpdf::render::Area;
use genpdf::style::{Color, Style};
use genpdf::Position;

use crate::units::{mm, MM_PER_PT};

/// Width of a stroke drawn by `genpdf`, in millimetres.
pub const HAIRLINE_MM: f64 = MM_PER_PT;

/// Distance between two hairlines, small enough for neighbours to overlap.
const HATCH_STEP_MM: f64 = 0.3;

/// Vertical centres of the hairlines covering a band `height` tall.
///
/// The outermost lines sit half a line width inside the band so the strokes
/// do not bleed over its edges.  Bands thinner than a hairline get one line
/// through their middle.
pub fn scanlines(top: f64, height: f64) -> Vec<f64> {
    if height <= 0.0 {
        return Vec::new();
    }
    if height <= HAIRLINE_MM {
        return vec![top + height / 2.0];
    }

    let first = top + HAIRLINE_MM / 2.0;
    let last = top + height - HAIRLINE_MM / 2.0;
    let steps = ((last - first) / HATCH_STEP_MM).ceil().max(1.0) as usize;
    let step = (last - first) / steps as f64;
    (0..=steps).map(|index| first + step * index as f64).collect()
}

/// Horizontal extent of a capsule at height `y`.
///
/// The capsule spans `x..x + width` and `top..top + height`; its ends are
/// semicircles of radius `height / 2`, or a single disc when it is narrower
/// than it is tall.
pub fn capsule_chord(x: f64, top: f64, width: f64, height: f64, y: f64) -> Option<(f64, f64)> {
    let radius = (height / 2.0).min(width / 2.0);
    let centre = top + height / 2.0;
    let dy = (y - centre).abs();
    if dy > radius {
        return None;
    }
    let inset = radius - (radius * radius - dy * dy).sqrt();
    let (start, end) = (x + inset, x + width - inset);
    if end > start {
        Some((start, end))
    } else {
        None
    }
}

fn hatch<F>(area: &Area<'_>, top: f64, height: f64, color: Color, chord: F)
where
    F: Fn(f64) -> Option<(f64, f64)>,
{
    let style = Style::new().with_color(color);
    for y in scanlines(top, height) {
        if let Some((start, end)) = chord(y) {
            area.draw_line(
                vec![Position::new(mm(start), mm(y)), Position::new(mm(end), mm(y))],
                style,
            );
        }
    }
}

/// Fills the rectangle with its top-left corner at (`x`, `y`), all values in
/// millimetres relative to the area origin.
pub fn fill_rect(area: &Area<'_>, x: f64, y: f64, width: f64, height: f64, color: Color) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    hatch(area, y, height, color, |_| Some((x, x + width)));
}

/// Fills the disc centred at (`cx`, `cy`).
pub fn fill_circle(area: &Area<'_>, cx: f64, cy: f64, radius: f64, color: Color) {
    if radius <= 0.0 {
        return;
    }
    let (x, top, diameter) = (cx - radius, cy - radius, 2.0 * radius);
    hatch(area, top, diameter, color, |y| {
        capsule_chord(x, top, diameter, diameter, y)
    });
}

/// Fills a rectangle whose short ends are semicircles.
pub fn fill_capsule(area: &Area<'_>, x: f64, y: f64, width: f64, height: f64, color: Color) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    hatch(area, y, height, color, |line| {
        capsule_chord(x, y, width, height, line)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hairlines_cover_the_band_without_gaps() {
        let lines = scanlines(10.0, 4.2);
        assert!(lines.len() > 2);
        assert!((lines[0] - (10.0 + HAIRLINE_MM / 2.0)).abs() < 1e-9);
        assert!((lines[lines.len() - 1] - (14.2 - HAIRLINE_MM / 2.0)).abs() < 1e-9);
        assert!(lines.windows(2).all(|pair| pair[1] - pair[0] <= HAIRLINE_MM));
    }

    #[test]
    fn thin_band_gets_one_centred_line() {
        let lines = scanlines(5.0, 0.2);
        assert_eq!(lines.len(), 1);
        assert!((lines[0] - 5.1).abs() < 1e-9);
        assert!(scanlines(5.0, 0.0).is_empty());
    }

    #[test]
    fn capsule_ends_are_rounded() {
        // 40 x 4 capsule: full width through the middle, narrower near the edge.
        let (start, end) = capsule_chord(0.0, 0.0, 40.0, 4.0, 2.0).unwrap();
        assert!(start.abs() < 1e-9 && (end - 40.0).abs() < 1e-9);

        let (start, end) = capsule_chord(0.0, 0.0, 40.0, 4.0, 0.2).unwrap();
        assert!(start > 0.5 && end < 39.5);
        assert!((start - (40.0 - end)).abs() < 1e-9);

        assert!(capsule_chord(0.0, 0.0, 40.0, 4.0, 4.5).is_none());
    }

    #[test]
    fn narrow_capsule_collapses_into_a_disc() {
        let (start, end) = capsule_chord(0.0, 0.0, 2.0, 4.0, 2.0).unwrap();
        assert!(start.abs() < 1e-9 && (end - 2.0).abs() < 1e-9);
        assert!(capsule_chord(0.0, 0.0, 2.0, 4.0, 0.5).is_none());
    }
}
