use std::path::PathBuf;

use thiserror::Error;

use crate::postprocess::PostProcessError;
use crate::richtext::ParseError;
use crate::schedule::ScheduleError;

/// Errors raised while building the press release.
#[derive(Debug, Error)]
pub enum PdfBuildError {
    #[error("failed to load fonts")]
    FontLoad(#[source] genpdf::error::Error),
    #[error("invalid inline markup")]
    Markup(#[from] ParseError),
    #[error("invalid page layout")]
    Schedule(#[from] ScheduleError),
    #[error("failed to render document")]
    Render(#[from] genpdf::error::Error),
    #[error("failed to post-process document")]
    PostProcess(#[from] PostProcessError),
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
