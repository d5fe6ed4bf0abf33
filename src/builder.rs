//! Document assembly for the press release.
//!
//! Rendering happens in two passes.  The section blocks are split into chunks
//! at every page break, and each chunk is first rendered on its own into a
//! sink to learn how many pages it fills.  Those counts resolve the
//! background of every page.  The second pass renders the whole document with
//! a [`PagePainter`] that reads the resolved table for its footers, and the
//! same table drives the background fills written during post-processing.

use std::io;

use genpdf::elements::PageBreak;
use genpdf::fonts::{FontData, FontFamily};
use genpdf::Document;
use log::{debug, info, warn};

use crate::decorator::PagePainter;
use crate::elements;
use crate::error::PdfBuildError;
use crate::fonts;
use crate::model::{Background, Block, Section};
use crate::postprocess::{self, DocumentInfo, OutlineEntry};
use crate::schedule::{self, BackgroundSchedule, Chunk};
use crate::theme::PageGeometry;

pub const DEFAULT_TITLE: &str = "SOJAI - Press Release 2026";
pub const DEFAULT_AUTHOR: &str = "SOJAI";
pub const DEFAULT_SUBJECT: &str =
    "SOJAI launches the first all-in-one AI platform for dental diagnostics";

/// Output of [`PressReleaseBuilder::render`].
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    /// Background of every page.
    pub schedule: BackgroundSchedule,
    /// Pages painted by the final pass.
    pub page_count: usize,
    /// First page (1-based) of every section.
    pub section_pages: Vec<usize>,
}

/// Collects sections and renders them into a PDF.
#[derive(Clone, Debug)]
pub struct PressReleaseBuilder {
    geometry: PageGeometry,
    title: String,
    author: String,
    subject: Option<String>,
    initial_background: Background,
    sections: Vec<Section>,
}

impl Default for PressReleaseBuilder {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::a4(),
            title: DEFAULT_TITLE.to_owned(),
            author: DEFAULT_AUTHOR.to_owned(),
            subject: Some(DEFAULT_SUBJECT.to_owned()),
            initial_background: Background::Dark,
            sections: Vec::new(),
        }
    }
}

impl PressReleaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Background of the first page.
    pub fn with_initial_background(mut self, background: Background) -> Self {
        self.initial_background = background;
        self
    }

    pub fn add_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Flattens the sections and records the stream index each one starts at.
    fn content_stream(&self) -> (Vec<Block>, Vec<usize>) {
        let mut blocks = Vec::new();
        let mut starts = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            starts.push(blocks.len());
            blocks.extend(section.blocks().iter().cloned());
        }
        (blocks, starts)
    }

    fn new_document(&self, family: FontFamily<FontData>, painter: PagePainter) -> Document {
        let mut document = Document::new(family);
        document.set_title(self.title.as_str());
        document.set_paper_size(self.geometry.paper_size());
        document.set_page_decorator(painter);
        document
    }

    fn push_chunk(&self, document: &mut Document, chunk: &Chunk) -> Result<(), PdfBuildError> {
        for element in elements::flowables(chunk.blocks(), self.geometry.frame_height())? {
            document.push(element);
        }
        Ok(())
    }

    /// Renders `chunk` alone, on pages of the final geometry, and counts them.
    fn count_pages(&self, family: &FontFamily<FontData>, chunk: &Chunk) -> Result<usize, PdfBuildError> {
        let painter = PagePainter::new(BackgroundSchedule::uniform(chunk.background()), self.geometry);
        let counter = painter.page_counter();
        let mut document = self.new_document(family.clone(), painter);
        self.push_chunk(&mut document, chunk)?;
        document.render(io::sink())?;
        Ok(counter.get().max(1))
    }

    fn outline(&self, section_pages: &[usize]) -> Vec<OutlineEntry> {
        self.sections
            .iter()
            .zip(section_pages)
            .map(|(section, page)| OutlineEntry {
                title: section.title().to_owned(),
                identifier: section.identifier().map(str::to_owned),
                page: *page,
            })
            .collect()
    }

    fn document_info(&self) -> DocumentInfo {
        let info = DocumentInfo::new(self.title.as_str(), self.author.as_str())
            .with_creator(env!("CARGO_PKG_NAME"));
        match &self.subject {
            Some(subject) => info.with_subject(subject.as_str()),
            None => info,
        }
    }

    /// Renders all sections into PDF bytes.
    pub fn render(&self) -> Result<RenderedPdf, PdfBuildError> {
        let family = fonts::default_font_family().map_err(PdfBuildError::FontLoad)?;

        let (blocks, section_starts) = self.content_stream();
        let chunks = schedule::split_into_chunks(&blocks, self.initial_background)?;

        let mut counts = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let pages = self.count_pages(&family, chunk)?;
            debug!(
                "Chunk {} ({:?}, {} blocks) fills {} page(s)",
                index,
                chunk.background(),
                chunk.blocks().len(),
                pages
            );
            counts.push(pages);
        }

        let schedule = BackgroundSchedule::resolve(&chunks, &counts)?;
        let chunk_pages = schedule::start_pages(&counts);
        let section_pages = section_starts
            .iter()
            .map(|start| {
                let chunk = chunks
                    .iter()
                    .rposition(|chunk| chunk.first_block() <= *start)
                    .unwrap_or(0);
                chunk_pages.get(chunk).copied().unwrap_or(1)
            })
            .collect::<Vec<_>>();

        let painter = PagePainter::new(schedule.clone(), self.geometry);
        let counter = painter.page_counter();
        let mut document = self.new_document(family, painter);
        for (index, chunk) in chunks.iter().enumerate() {
            if index > 0 {
                document.push(PageBreak::new());
            }
            self.push_chunk(&mut document, chunk)?;
        }

        let mut raw = Vec::new();
        document.render(&mut raw)?;

        let page_count = counter.get();
        if page_count != schedule.len() {
            warn!(
                "Rendered {} pages but scheduled backgrounds for {}",
                page_count,
                schedule.len()
            );
        }

        let outline = self.outline(&section_pages);
        let bytes = postprocess::apply(
            &raw,
            &schedule,
            &self.geometry,
            &self.document_info(),
            &outline,
        )?;
        info!("Rendered {} pages ({} bytes)", page_count, bytes.len());

        Ok(RenderedPdf {
            bytes,
            schedule,
            page_count,
            section_pages,
        })
    }
}
