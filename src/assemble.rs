//! Entry points that render the SOJAI press release to disk.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::builder::PressReleaseBuilder;
use crate::error::PdfBuildError;
use crate::sections;
use crate::styles::StyleSheet;

pub const OUTPUT_FILE_NAME: &str = "SOJAI_Press_Release.pdf";

/// `SOJAI_Press_Release.pdf` in the directory of the running executable.
pub fn default_output_path() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(OUTPUT_FILE_NAME)
}

/// A builder holding every press-release section.
pub fn press_release() -> PressReleaseBuilder {
    let styles = StyleSheet::new();
    sections::build_all(&styles)
        .into_iter()
        .fold(PressReleaseBuilder::new(), PressReleaseBuilder::add_section)
}

/// Renders the press release next to the executable.
pub fn build_pdf() -> Result<PathBuf, PdfBuildError> {
    build_pdf_to(default_output_path())
}

/// Renders the press release to `path`.
pub fn build_pdf_to(path: impl Into<PathBuf>) -> Result<PathBuf, PdfBuildError> {
    let path = path.into();
    let rendered = press_release().render()?;

    fs::write(&path, &rendered.bytes).map_err(|source| PdfBuildError::Io {
        path: path.clone(),
        source,
    })?;

    info!(
        "Wrote {} ({} pages, {} bytes)",
        path.display(),
        rendered.page_count,
        rendered.bytes.len()
    );
    println!("PDF generated: {}", path.display());
    Ok(path)
}
