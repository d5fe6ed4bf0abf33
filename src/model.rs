//! Data structures describing the content stream of the press release.
//!
//! Section builders produce plain [`Block`] values rather than render
//! elements.  Blocks can be compared in tests and turned into `genpdf`
//! elements more than once, which the assembler relies on when it measures
//! page counts before the final render.

use genpdf::style::Color;

use crate::styles::TextStyle;

/// Visual theme of a page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Background {
    /// Dark navy page with decorative discs.
    #[default]
    Dark,
    /// White page with the accent bar on top.
    Light,
}

/// A paragraph of inline markup rendered in one style.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub style: TextStyle,
    pub markup: String,
}

impl TextBlock {
    pub fn new(style: TextStyle, markup: impl Into<String>) -> Self {
        Self {
            style,
            markup: markup.into(),
        }
    }
}

/// A horizontal line.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleSpec {
    /// Fixed width in millimetres; `None` spans the frame.
    pub width_mm: Option<f64>,
    pub color: Color,
    pub thickness_pt: f64,
}

/// One labelled percentage bar.
#[derive(Clone, Debug, PartialEq)]
pub struct BarSpec {
    pub label: String,
    pub value: f64,
}

/// Vertical placement of cell content within a grid row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
}

/// A table of equal-width columns.
///
/// Every row holds one cell per column; a cell is a stack of paragraphs.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSpec {
    pub columns: usize,
    pub rows: Vec<Vec<Vec<TextBlock>>>,
    pub row_height_mm: Option<f64>,
    pub padding_pt: f64,
    pub valign: VerticalAlignment,
    pub background: Option<Color>,
    /// Rules drawn under the given row indices.
    pub separators: Vec<(usize, RuleSpec)>,
}

impl GridSpec {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            row_height_mm: None,
            padding_pt: 0.0,
            valign: VerticalAlignment::Top,
            background: None,
            separators: Vec::new(),
        }
    }

    pub fn with_row(mut self, cells: Vec<Vec<TextBlock>>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn with_row_height_mm(mut self, height: f64) -> Self {
        self.row_height_mm = Some(height);
        self
    }

    pub fn with_padding_pt(mut self, padding: f64) -> Self {
        self.padding_pt = padding;
        self
    }

    pub fn with_valign(mut self, valign: VerticalAlignment) -> Self {
        self.valign = valign;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_separator_below(mut self, row: usize, rule: RuleSpec) -> Self {
        self.separators.push((row, rule));
        self
    }
}

/// Individual units of the content stream.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Text(TextBlock),
    /// Vertical whitespace in millimetres.
    Spacer(f64),
    Rule(RuleSpec),
    Bar(BarSpec),
    Grid(GridSpec),
    /// Blocks that move to the next page as a unit instead of splitting.
    KeepTogether(Vec<Block>),
    /// Schedules the background of the page that follows the next page break.
    Background(Background),
    /// Explicit page break request.
    PageBreak,
}

impl Block {
    pub fn text(style: TextStyle, markup: impl Into<String>) -> Self {
        Self::Text(TextBlock::new(style, markup))
    }

    pub fn spacer(height_mm: f64) -> Self {
        Self::Spacer(height_mm)
    }

    /// A rule of fixed width.
    pub fn rule(width_mm: f64, color: Color, thickness_pt: f64) -> Self {
        Self::Rule(RuleSpec {
            width_mm: Some(width_mm),
            color,
            thickness_pt,
        })
    }

    /// A rule spanning the whole frame.
    pub fn full_rule(color: Color, thickness_pt: f64) -> Self {
        Self::Rule(RuleSpec {
            width_mm: None,
            color,
            thickness_pt,
        })
    }

    pub fn bar(label: impl Into<String>, value: f64) -> Self {
        Self::Bar(BarSpec {
            label: label.into(),
            value,
        })
    }

    pub fn keep_together(blocks: impl IntoIterator<Item = Block>) -> Self {
        Self::KeepTogether(blocks.into_iter().collect())
    }

    pub fn page_break() -> Self {
        Self::PageBreak
    }

    /// Whether the block steers pagination rather than drawing anything.
    pub fn is_control(&self) -> bool {
        matches!(self, Self::Background(_) | Self::PageBreak)
    }
}

/// Logical representation of a document section.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    identifier: Option<String>,
    title: String,
    blocks: Vec<Block>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            identifier: None,
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Creates a builder that appends the page hand-off for the next section.
    pub fn builder(title: impl Into<String>) -> SectionBuilder {
        SectionBuilder::new(title)
    }
}

/// Builder for [`Section`] values.
///
/// The builder owns the end of the section: a scheduled background is always
/// written as `[Background(next), PageBreak]`, so the marker can never end up
/// after the break it belongs to.
#[derive(Clone, Debug, Default)]
pub struct SectionBuilder {
    identifier: Option<String>,
    title: String,
    blocks: Vec<Block>,
    next_background: Option<Background>,
    page_break_after: bool,
}

impl SectionBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn push_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn extend_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }

    /// Ends the section with a page break and schedules `background` for the
    /// page after it.
    pub fn hand_off(mut self, background: Background) -> Self {
        self.next_background = Some(background);
        self.page_break_after = true;
        self
    }

    /// Ends the section with a page break that keeps the current background.
    pub fn page_break_after(mut self) -> Self {
        self.page_break_after = true;
        self
    }

    pub fn build(mut self) -> Section {
        while matches!(self.blocks.last(), Some(block) if block.is_control()) {
            self.blocks.pop();
        }

        if let Some(background) = self.next_background {
            self.blocks.push(Block::Background(background));
        }
        if self.page_break_after {
            self.blocks.push(Block::PageBreak);
        }

        Section {
            identifier: self.identifier,
            title: self.title,
            blocks: self.blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_off_places_marker_before_break() {
        let section = Section::builder("Cover")
            .push_block(Block::spacer(35.0))
            .hand_off(Background::Light)
            .build();

        let blocks = section.blocks();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1], Block::Background(Background::Light));
        assert_eq!(blocks[2], Block::PageBreak);
    }

    #[test]
    fn builder_replaces_trailing_control_blocks() {
        let section = Section::builder("Solution")
            .push_block(Block::spacer(5.0))
            .push_block(Block::PageBreak)
            .push_block(Block::Background(Background::Dark))
            .page_break_after()
            .build();

        assert_eq!(section.blocks(), &[Block::Spacer(5.0), Block::PageBreak]);
    }

    #[test]
    fn final_section_has_no_control_tail() {
        let section = Section::builder("Testimonials")
            .identifier("testimonials")
            .push_block(Block::spacer(5.0))
            .build();

        assert_eq!(section.identifier(), Some("testimonials"));
        assert!(!section.blocks().iter().any(Block::is_control));
    }
}
