//! Renders the SOJAI press release: a branded, multi-page PDF whose pages
//! alternate between dark and light backgrounds.

pub mod assemble;
pub mod builder;
pub mod decorator;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod model;
pub mod paint;
pub mod postprocess;
pub mod richtext;
pub mod schedule;
pub mod sections;
pub mod styles;
pub mod theme;
pub mod units;

pub use assemble::{build_pdf, build_pdf_to, default_output_path};
pub use builder::{PressReleaseBuilder, RenderedPdf};
pub use error::PdfBuildError;
