//! Page decorator counting pages and printing footers.
//!
//! The page fills themselves are written after rendering, by
//! `postprocess::backdrop`, from the same [`BackgroundSchedule`].

use std::cell::Cell;
use std::rc::Rc;

use genpdf::elements::Paragraph;
use genpdf::error::Error;
use genpdf::style::{Style, StyledString};
use genpdf::{render, Alignment, Context, Element, PageDecorator, Position};
use log::debug;

use crate::model::Background;
use crate::schedule::BackgroundSchedule;
use crate::theme::{PageGeometry, FOOTER_ON_DARK, TEXT_MUTED};
use crate::units::{mm, pt, to_f64};

const FOOTER_FONT_SIZE: u8 = 8;
const FOOTER_BASELINE_MM: f64 = 12.0;
/// Ascender height of the sans families as a fraction of the font size.
const FOOTER_ASCENT_EM: f64 = 0.905;

/// Footer line of the given 1-based page; the cover page has none.
pub fn footer_text(page: usize) -> Option<String> {
    if page > 1 {
        Some(format!("SOJAI  |  Press Release 2026  |  Page {}", page))
    } else {
        None
    }
}

/// Numbers every page and prints its footer in the colour that suits the
/// scheduled background.
///
/// The page counter belongs to the painter, so every render pass starts at
/// page one.  [`PagePainter::page_counter`] hands out a shared view of it that
/// stays readable after the document took ownership of the painter.
pub struct PagePainter {
    schedule: BackgroundSchedule,
    geometry: PageGeometry,
    page: Rc<Cell<usize>>,
}

impl PagePainter {
    pub fn new(schedule: BackgroundSchedule, geometry: PageGeometry) -> Self {
        Self {
            schedule,
            geometry,
            page: Rc::new(Cell::new(0)),
        }
    }

    /// Number of pages painted so far.
    pub fn page(&self) -> usize {
        self.page.get()
    }

    pub fn page_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.page)
    }

    fn paint_footer(
        context: &Context,
        area: &render::Area<'_>,
        text: String,
        background: Background,
        style: Style,
    ) -> Result<(), Error> {
        let color = match background {
            Background::Dark => FOOTER_ON_DARK,
            Background::Light => TEXT_MUTED,
        };
        let footer_style = Style::new()
            .with_font_size(FOOTER_FONT_SIZE)
            .with_color(color);

        let height = to_f64(area.size().height);
        let ascent = to_f64(pt(f64::from(FOOTER_FONT_SIZE))) * FOOTER_ASCENT_EM;
        let top = height - FOOTER_BASELINE_MM - ascent;

        let mut footer_area = area.clone();
        footer_area.add_offset(Position::new(0, mm(top)));
        let mut footer = Paragraph::new(StyledString::new(text, footer_style));
        footer.set_alignment(Alignment::Center);
        footer.render(context, footer_area, style)?;
        Ok(())
    }
}

impl PageDecorator for PagePainter {
    fn decorate_page<'a>(
        &mut self,
        context: &Context,
        mut area: render::Area<'a>,
        style: Style,
    ) -> Result<render::Area<'a>, Error> {
        let page = self.page.get() + 1;
        self.page.set(page);

        let background = self.schedule.background_for(page);
        debug!("Starting page {} ({:?} background)", page, background);

        if let Some(text) = footer_text(page) {
            Self::paint_footer(context, &area, text, background, style)?;
        }

        area.add_margins(self.geometry.margins());
        Ok(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_has_no_footer() {
        assert_eq!(footer_text(1), None);
        assert_eq!(footer_text(0), None);
    }

    #[test]
    fn footer_names_the_page() {
        assert_eq!(
            footer_text(2).as_deref(),
            Some("SOJAI  |  Press Release 2026  |  Page 2")
        );
        assert!(footer_text(17).unwrap().ends_with("Page 17"));
    }

    #[test]
    fn each_painter_counts_from_zero() {
        let first = PagePainter::new(BackgroundSchedule::uniform(Background::Dark), PageGeometry::a4());
        let counter = first.page_counter();
        counter.set(4);
        assert_eq!(first.page(), 4);

        let second = PagePainter::new(BackgroundSchedule::uniform(Background::Dark), PageGeometry::a4());
        assert_eq!(second.page(), 0);
    }
}
