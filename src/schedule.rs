//! Resolution of background markers into a per-page background table.
//!
//! Sections end with `[Background(next), PageBreak]`.  Instead of flipping a
//! flag while the engine lays out pages, the stream is cut into [`Chunk`]s at
//! every page break up front.  Each chunk knows the background it starts with,
//! and once the page count of every chunk is known,
//! [`BackgroundSchedule::resolve`] expands the chunks into one entry per page.

use std::mem;

use log::debug;
use thiserror::Error;

use crate::model::{Background, Block};

/// Problems with the placement of control blocks in a content stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("background marker at block {index} is not followed by a page break")]
    MarkerWithoutPageBreak { index: usize },
    #[error("keep-together group at block {index} contains a page break or background marker")]
    NestedControlBlock { index: usize },
    #[error("{chunks} chunks but {counts} page counts")]
    PageCountMismatch { chunks: usize, counts: usize },
}

/// The blocks between two page breaks and the background they start on.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    background: Background,
    first_block: usize,
    blocks: Vec<Block>,
}

impl Chunk {
    fn new(background: Background, first_block: usize) -> Self {
        Self {
            background,
            first_block,
            blocks: Vec::new(),
        }
    }

    pub fn background(&self) -> Background {
        self.background
    }

    /// Index in the source stream of the first block after the page break
    /// that opened this chunk.
    pub fn first_block(&self) -> usize {
        self.first_block
    }

    /// Drawable blocks of the chunk; control blocks are consumed by the split.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

fn contains_control(blocks: &[Block]) -> bool {
    blocks.iter().any(|block| match block {
        Block::KeepTogether(children) => contains_control(children),
        other => other.is_control(),
    })
}

/// Cuts `blocks` at every page break.
///
/// The first chunk starts on `initial`.  A marker switches the background of
/// the chunk opened by the page break that immediately follows it; without a
/// marker a chunk inherits the background of its predecessor.  A page break
/// at the very end of the stream opens no chunk.
pub fn split_into_chunks(blocks: &[Block], initial: Background) -> Result<Vec<Chunk>, ScheduleError> {
    let mut chunks = Vec::new();
    let mut current = Chunk::new(initial, 0);
    let mut pending = None;

    for (index, block) in blocks.iter().enumerate() {
        match block {
            Block::Background(target) => {
                if !matches!(blocks.get(index + 1), Some(Block::PageBreak)) {
                    return Err(ScheduleError::MarkerWithoutPageBreak { index });
                }
                pending = Some(*target);
            }
            Block::PageBreak => {
                let next = pending.take().unwrap_or(current.background);
                chunks.push(mem::replace(&mut current, Chunk::new(next, index + 1)));
            }
            Block::KeepTogether(children) if contains_control(children) => {
                return Err(ScheduleError::NestedControlBlock { index });
            }
            other => current.blocks.push(other.clone()),
        }
    }

    if current.first_block < blocks.len() || chunks.is_empty() {
        chunks.push(current);
    }

    debug!("Split {} blocks into {} chunks", blocks.len(), chunks.len());
    Ok(chunks)
}

/// First page (1-based) of every chunk, given their page counts.
pub fn start_pages(counts: &[usize]) -> Vec<usize> {
    let mut page = 1;
    counts
        .iter()
        .map(|count| {
            let start = page;
            page += (*count).max(1);
            start
        })
        .collect()
}

/// Background of every page of a rendered document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundSchedule {
    pages: Vec<Background>,
    fallback: Background,
}

impl BackgroundSchedule {
    /// Expands `chunks` into one entry per page.
    ///
    /// `counts[i]` is the number of pages chunk `i` occupies.  A chunk always
    /// occupies at least one page.
    pub fn resolve(chunks: &[Chunk], counts: &[usize]) -> Result<Self, ScheduleError> {
        if chunks.len() != counts.len() {
            return Err(ScheduleError::PageCountMismatch {
                chunks: chunks.len(),
                counts: counts.len(),
            });
        }

        let mut pages = Vec::with_capacity(counts.iter().sum());
        for (chunk, count) in chunks.iter().zip(counts) {
            pages.extend(std::iter::repeat(chunk.background).take((*count).max(1)));
        }
        let fallback = chunks
            .last()
            .map(Chunk::background)
            .unwrap_or_default();

        Ok(Self { pages, fallback })
    }

    /// A schedule that paints every page with `background`.
    pub fn uniform(background: Background) -> Self {
        Self {
            pages: Vec::new(),
            fallback: background,
        }
    }

    /// Background of the 1-based `page`.  Pages past the end keep the last
    /// background.
    pub fn background_for(&self, page: usize) -> Background {
        page.checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn pages(&self) -> &[Background] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
