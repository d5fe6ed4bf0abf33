//! Post-processing of rendered PDF bytes with `lopdf`.
//!
//! `genpdf` only records a document title and can only stroke hairlines.  The
//! rendered bytes are reopened here to paint the page backgrounds, to complete
//! the document information dictionary and to add an outline with one entry
//! per section.

mod backdrop;
mod info;
mod outline;

pub use info::DocumentInfo;
pub use outline::OutlineEntry;

use lopdf::Document;
use thiserror::Error;

use crate::schedule::BackgroundSchedule;
use crate::theme::PageGeometry;

/// Errors raised while rewriting a rendered document.
#[derive(Debug, Error)]
pub enum PostProcessError {
    #[error("failed to parse PDF bytes")]
    Parse(#[from] lopdf::Error),
    #[error("failed to encode page background")]
    Encode(#[source] lopdf::Error),
    #[error("failed to write PDF bytes")]
    Write(#[from] std::io::Error),
    #[error("PDF catalog entry is missing")]
    MissingCatalog,
    #[error("PDF catalog entry is not a dictionary")]
    InvalidCatalog,
    #[error("page {page} is not a dictionary")]
    InvalidPage { page: u32 },
    #[error("outline entry '{title}' refers to missing page {page}")]
    MissingPage { title: String, page: usize },
}

/// Paints the scheduled backgrounds, then applies the document information and
/// the outline to `pdf_bytes`.
pub fn apply(
    pdf_bytes: &[u8],
    schedule: &BackgroundSchedule,
    geometry: &PageGeometry,
    info: &DocumentInfo,
    outline: &[OutlineEntry],
) -> Result<Vec<u8>, PostProcessError> {
    let mut document = Document::load_mem(pdf_bytes)?;

    backdrop::write_backdrops(&mut document, schedule, geometry)?;
    info::write_info(&mut document, info);
    outline::write_outline(&mut document, outline)?;

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}
