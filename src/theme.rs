//! Brand palette and page geometry shared by the style table, the elements and
//! the page painter.

use genpdf::style::Color;
use genpdf::{Margins, Mm, PaperSize, Size};

use crate::units::{mm, to_f64};

pub const PRIMARY: Color = Color::Rgb(0x4A, 0x39, 0xC0);
pub const LIGHT_BG: Color = Color::Rgb(0xF9, 0xF8, 0xFF);
pub const BADGE_BG: Color = Color::Rgb(0xE4, 0xE1, 0xFF);
pub const TEXT_DARK: Color = Color::Rgb(0x1A, 0x1A, 0x2E);
pub const TEXT_MUTED: Color = Color::Rgb(0x6B, 0x6B, 0x80);
pub const CYAN: Color = Color::Rgb(0x00, 0xC8, 0xC8);
pub const WHITE: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
pub const DARK_BG: Color = Color::Rgb(0x1A, 0x1A, 0x2E);

/// Body copy on dark pages.
pub const TEXT_ON_DARK: Color = Color::Rgb(0xE8, 0xE8, 0xF0);
/// Secondary copy on dark pages.
pub const TEXT_ON_DARK_MUTED: Color = Color::Rgb(0xA0, 0xA0, 0xB8);
/// Footer and contact lines on dark pages.
pub const FOOTER_ON_DARK: Color = Color::Rgb(0x88, 0x85, 0xAA);
pub const SUBTITLE_ON_DARK: Color = Color::Rgb(0xD0, 0xCC, 0xFF);
pub const STAT_LABEL_ON_DARK: Color = Color::Rgb(0xB0, 0xAD, 0xCC);
pub const GRID_SEPARATOR: Color = Color::Rgb(0xE0, 0xE0, 0xE5);

/// Decorative disc colours painted on dark pages, before opacity is applied.
pub const DISC_PURPLE: Color = Color::Rgb(74, 56, 191);
pub const DISC_CYAN: Color = Color::Rgb(0, 199, 199);

/// Composites `fg` over `bg` with the given opacity.
///
/// Colours other than RGB are returned unchanged, since the palette is RGB only.
pub fn blend(fg: Color, bg: Color, alpha: f64) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            let mix = |f: u8, b: u8| {
                (f64::from(b) + (f64::from(f) - f64::from(b)) * alpha)
                    .round()
                    .clamp(0.0, 255.0) as u8
            };
            Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
        }
        _ => fg,
    }
}

/// Renders an RGB colour as `#RRGGBB` for use in inline markup.
pub fn hex(color: Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
        Color::Greyscale(v) => format!("#{:02X}{:02X}{:02X}", v, v, v),
        Color::Cmyk(..) => "#000000".to_owned(),
    }
}

/// Paper size and margins of every page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    width_mm: f64,
    height_mm: f64,
    margin_x_mm: f64,
    margin_y_mm: f64,
}

impl PageGeometry {
    /// A4 with 25 mm side margins and 20 mm top/bottom margins.
    pub fn a4() -> Self {
        let size: Size = PaperSize::A4.into();
        Self {
            width_mm: to_f64(size.width),
            height_mm: to_f64(size.height),
            margin_x_mm: 25.0,
            margin_y_mm: 20.0,
        }
    }

    /// Overrides the margins and returns the updated geometry.
    pub fn with_margins(mut self, horizontal_mm: f64, vertical_mm: f64) -> Self {
        self.margin_x_mm = horizontal_mm;
        self.margin_y_mm = vertical_mm;
        self
    }

    pub fn paper_size(&self) -> Size {
        Size::new(mm(self.width_mm), mm(self.height_mm))
    }

    pub fn margins(&self) -> Margins {
        Margins::trbl(
            mm(self.margin_y_mm),
            mm(self.margin_x_mm),
            mm(self.margin_y_mm),
            mm(self.margin_x_mm),
        )
    }

    /// Width of the content frame.
    pub fn frame_width(&self) -> Mm {
        mm(self.width_mm - 2.0 * self.margin_x_mm)
    }

    /// Height of the content frame on an empty page.
    pub fn frame_height(&self) -> Mm {
        mm(self.height_mm - 2.0 * self.margin_y_mm)
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}
