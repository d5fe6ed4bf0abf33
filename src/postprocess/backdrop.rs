//! Page backgrounds painted as real fill operations.
//!
//! Every page gets a content stream in front of the one `genpdf` wrote, so the
//! fills end up underneath all text and in-flow shapes.

use genpdf::style::Color;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::PostProcessError;
use crate::model::Background;
use crate::schedule::BackgroundSchedule;
use crate::theme::{blend, PageGeometry, DARK_BG, DISC_CYAN, DISC_PURPLE, PRIMARY, WHITE};
use crate::units::{to_f64, MM_PER_PT};

const PURPLE_DISC_RADIUS_MM: f64 = 80.0;
const PURPLE_DISC_OPACITY: f64 = 0.08;
const CYAN_DISC_RADIUS_MM: f64 = 60.0;
const CYAN_DISC_OPACITY: f64 = 0.05;
const ACCENT_BAR_PT: f64 = 3.0;

/// Control point distance of a quarter circle drawn as a cubic Bézier curve.
const KAPPA: f64 = 0.552_284_749_8;

/// Page box in points, with helpers to place shapes given in millimetres from
/// the top-left corner.
#[derive(Clone, Copy, Debug)]
struct PageBox {
    width_mm: f64,
    height_mm: f64,
    width: f64,
    height: f64,
}

impl PageBox {
    fn new(geometry: &PageGeometry) -> Self {
        let size = geometry.paper_size();
        let (width_mm, height_mm) = (to_f64(size.width), to_f64(size.height));
        Self {
            width_mm,
            height_mm,
            width: width_mm / MM_PER_PT,
            height: height_mm / MM_PER_PT,
        }
    }

    fn x(&self, mm_from_left: f64) -> f64 {
        mm_from_left / MM_PER_PT
    }

    fn y(&self, mm_from_top: f64) -> f64 {
        self.height - mm_from_top / MM_PER_PT
    }
}

fn operation(operator: &str, operands: &[f64]) -> Operation {
    Operation::new(operator, operands.iter().map(|value| Object::from(*value)).collect())
}

fn fill_color(color: Color) -> Operation {
    match color {
        Color::Rgb(r, g, b) => operation(
            "rg",
            &[
                f64::from(r) / 255.0,
                f64::from(g) / 255.0,
                f64::from(b) / 255.0,
            ],
        ),
        Color::Greyscale(v) => operation("g", &[f64::from(v) / 255.0]),
        Color::Cmyk(c, m, y, k) => operation(
            "k",
            &[
                f64::from(c) / 255.0,
                f64::from(m) / 255.0,
                f64::from(y) / 255.0,
                f64::from(k) / 255.0,
            ],
        ),
    }
}

fn rect(ops: &mut Vec<Operation>, x: f64, y: f64, width: f64, height: f64, color: Color) {
    ops.push(fill_color(color));
    ops.push(operation("re", &[x, y, width, height]));
    ops.push(operation("f", &[]));
}

fn disc(ops: &mut Vec<Operation>, cx: f64, cy: f64, r: f64, color: Color) {
    let k = KAPPA * r;
    ops.push(fill_color(color));
    ops.push(operation("m", &[cx + r, cy]));
    ops.push(operation("c", &[cx + r, cy + k, cx + k, cy + r, cx, cy + r]));
    ops.push(operation("c", &[cx - k, cy + r, cx - r, cy + k, cx - r, cy]));
    ops.push(operation("c", &[cx - r, cy - k, cx - k, cy - r, cx, cy - r]));
    ops.push(operation("c", &[cx + k, cy - r, cx + r, cy - k, cx + r, cy]));
    ops.push(operation("f", &[]));
}

/// Fill operations for one page, wrapped in a saved graphics state.
pub(crate) fn page_operations(
    background: Background,
    page: usize,
    geometry: &PageGeometry,
) -> Vec<Operation> {
    let page_box = PageBox::new(geometry);
    let (width, height) = (page_box.width, page_box.height);
    let mut ops = vec![operation("q", &[])];

    match background {
        Background::Dark => {
            rect(&mut ops, 0.0, 0.0, width, height, DARK_BG);
            disc(
                &mut ops,
                page_box.x(page_box.width_mm - 40.0),
                page_box.y(30.0),
                PURPLE_DISC_RADIUS_MM / MM_PER_PT,
                blend(DISC_PURPLE, DARK_BG, PURPLE_DISC_OPACITY),
            );
            disc(
                &mut ops,
                page_box.x(30.0),
                page_box.y(page_box.height_mm - 40.0),
                CYAN_DISC_RADIUS_MM / MM_PER_PT,
                blend(DISC_CYAN, DARK_BG, CYAN_DISC_OPACITY),
            );
        }
        Background::Light => {
            rect(&mut ops, 0.0, 0.0, width, height, WHITE);
            if page > 1 {
                rect(
                    &mut ops,
                    0.0,
                    height - ACCENT_BAR_PT,
                    width,
                    ACCENT_BAR_PT,
                    PRIMARY,
                );
            }
        }
    }

    ops.push(operation("Q", &[]));
    ops
}

fn prepend_content(
    document: &mut Document,
    page: u32,
    page_id: ObjectId,
    content: Vec<u8>,
) -> Result<(), PostProcessError> {
    let stream_id = document.add_object(Stream::new(Dictionary::new(), content));
    let page_dict = document
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|_| PostProcessError::InvalidPage { page })?;

    let mut contents = vec![Object::Reference(stream_id)];
    match page_dict.get(b"Contents") {
        Ok(Object::Reference(id)) => contents.push(Object::Reference(*id)),
        Ok(Object::Array(existing)) => contents.extend(existing.iter().cloned()),
        _ => {}
    }
    page_dict.set("Contents", Object::Array(contents));
    Ok(())
}

/// Paints the scheduled background of every page of `document`.
pub(crate) fn write_backdrops(
    document: &mut Document,
    schedule: &BackgroundSchedule,
    geometry: &PageGeometry,
) -> Result<(), PostProcessError> {
    for (page, page_id) in document.get_pages() {
        let background = schedule.background_for(page as usize);
        let mut content = Content {
            operations: page_operations(background, page as usize, geometry),
        }
        .encode()
        .map_err(PostProcessError::Encode)?;
        // Keeps the last operator apart from the first token of the next stream.
        content.push(b'\n');
        prepend_content(document, page, page_id, content)?;
    }
    Ok(())
}
