//! Render elements for the press-release blocks, built on `genpdf` primitives.
//!
//! Every element implements [`genpdf::Element`] and the crate's [`Flowable`]
//! trait, which reports the height an element needs at a given width.  The
//! height is what lets [`KeepTogether`] decide, before anything is drawn,
//! whether a group fits on the current page.

use genpdf::elements::{LinearLayout, Paragraph};
use genpdf::error::{Error, ErrorKind};
use genpdf::style::{Style, StyledString};
use genpdf::{render, Alignment, Context, Element, Margins, Mm, Position, RenderResult, Size};
use log::warn;

use crate::model::{BarSpec, Block, GridSpec, RuleSpec, TextBlock, VerticalAlignment};
use crate::paint;
use crate::richtext::{self, ParseError, Span};
use crate::styles::TextStyle;
use crate::theme::{BADGE_BG, PRIMARY, TEXT_DARK};
use crate::units::{mm, pt, to_f64};

/// Slack for comparing lengths that went through font metrics.
const EPSILON_MM: f64 = 0.01;

const BAR_TOTAL_HEIGHT_PT: f64 = 26.0;
const BAR_TRACK_HEIGHT_PT: f64 = 12.0;
const BAR_FONT_SIZE: u8 = 10;
const RULE_EXTRA_HEIGHT_PT: f64 = 2.0;

/// An element that can report its height before it is rendered.
pub trait Flowable: Element {
    /// Height needed to lay out the remaining content at `width`.
    fn measure(&self, context: &Context, width: Mm, style: Style) -> Mm;
}

impl Element for Box<dyn Flowable> {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        (**self).render(context, area, style)
    }
}

fn needs_next_page() -> RenderResult {
    let mut result = RenderResult::default();
    result.has_more = true;
    result
}

/// Converts one block into its render element.
///
/// Control blocks (background markers and page breaks) have no element and
/// yield `None`.
pub fn flowable(block: &Block, frame_height: Mm) -> Result<Option<Box<dyn Flowable>>, ParseError> {
    let element: Box<dyn Flowable> = match block {
        Block::Text(text) => Box::new(StyledText::from_block(text)?),
        Block::Spacer(height) => Box::new(Spacer::new(*height)),
        Block::Rule(rule) => Box::new(Rule::from_spec(rule)),
        Block::Bar(bar) => Box::new(PercentBar::from_spec(bar)),
        Block::Grid(grid) => Box::new(GridTable::from_spec(grid)?),
        Block::KeepTogether(blocks) => Box::new(KeepTogether::new(
            flowables(blocks, frame_height)?,
            frame_height,
        )),
        Block::Background(_) | Block::PageBreak => return Ok(None),
    };
    Ok(Some(element))
}

/// Converts a run of blocks, skipping control blocks.
pub fn flowables(blocks: &[Block], frame_height: Mm) -> Result<Vec<Box<dyn Flowable>>, ParseError> {
    let mut elements = Vec::with_capacity(blocks.len());
    for block in blocks {
        if let Some(element) = flowable(block, frame_height)? {
            elements.push(element);
        }
    }
    Ok(elements)
}

/// A paragraph of styled spans with hard line breaks, indents and trailing
/// space.
pub struct StyledText {
    lines: Vec<Vec<Span>>,
    style: TextStyle,
    layout: LinearLayout,
}

impl StyledText {
    pub fn new(style: TextStyle, lines: Vec<Vec<Span>>) -> Self {
        let mut layout = LinearLayout::vertical();
        for line in lines.iter().filter(|line| !line.is_empty()) {
            let mut paragraph = Paragraph::default();
            for span in line {
                paragraph.push(span.to_styled_string());
            }
            paragraph.set_alignment(style.alignment.into());
            let indents = Margins::trbl(0, mm(style.right_indent_mm), 0, mm(style.left_indent_mm));
            layout.push(paragraph.padded(indents).styled(style.to_style()));
        }
        if style.space_after_mm > 0.0 {
            layout.push(Spacer::new(style.space_after_mm));
        }
        Self {
            lines,
            style,
            layout,
        }
    }

    pub fn from_markup(style: TextStyle, markup: &str) -> Result<Self, ParseError> {
        Ok(Self::new(style, richtext::parse_lines(markup)?))
    }

    pub fn from_block(block: &TextBlock) -> Result<Self, ParseError> {
        Self::from_markup(block.style, &block.markup)
    }
}

/// Counts the lines `genpdf`'s paragraph wrapping produces for `spans` when
/// `available` is the width of the text column.
///
/// The rule is the engine's own: a word runs up to and including the next
/// space, so each word carries its trailing space and every extra space of a
/// run is a word of its own.  A line breaks once the next word would overflow.
/// A word wider than the column ends the paragraph, as the engine stops there.
pub fn wrapped_line_count(context: &Context, base: Style, spans: &[Span], available: Mm) -> usize {
    let mut lines = 0;
    let mut x = Mm::default();
    let mut open = false;
    for span in spans {
        let style = base.and(span.style());
        let mut rest = span.text();
        if rest.is_empty() {
            open = true;
        }
        while !rest.is_empty() {
            let end = rest.find(' ').map(|index| index + 1).unwrap_or(rest.len());
            let (word, tail) = rest.split_at(end);
            rest = tail;

            let width = style.str_width(&context.font_cache, word);
            if x + width > available {
                if width > available {
                    return lines + usize::from(open);
                }
                lines += 1;
                x = width;
            } else {
                x += width;
            }
            open = true;
        }
    }
    lines + usize::from(open)
}

impl Flowable for StyledText {
    fn measure(&self, context: &Context, width: Mm, style: Style) -> Mm {
        let base = style.and(self.style.to_style());
        let available = width - (mm(self.style.left_indent_mm) + mm(self.style.right_indent_mm));
        let line_height = to_f64(base.line_height(&context.font_cache));

        let lines: usize = self
            .lines
            .iter()
            .filter(|line| !line.is_empty())
            .map(|line| wrapped_line_count(context, base, line, available))
            .sum();
        mm(line_height * lines as f64 + self.style.space_after_mm)
    }
}

impl Element for StyledText {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        self.layout.render(context, area, style)
    }
}

/// Fixed vertical whitespace.  Truncated at the bottom of a page.
pub struct Spacer {
    height_mm: f64,
}

impl Spacer {
    pub fn new(height_mm: f64) -> Self {
        Self {
            height_mm: height_mm.max(0.0),
        }
    }
}

impl Flowable for Spacer {
    fn measure(&self, _context: &Context, _width: Mm, _style: Style) -> Mm {
        mm(self.height_mm)
    }
}

impl Element for Spacer {
    fn render(
        &mut self,
        _context: &Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let used = self.height_mm.min(to_f64(area.size().height)).max(0.0);
        let mut result = RenderResult::default();
        result.size = Size::new(0, mm(used));
        Ok(result)
    }
}

/// A horizontal line drawn at the bottom of its footprint.
pub struct Rule {
    width_mm: Option<f64>,
    color: genpdf::style::Color,
    thickness_pt: f64,
}

impl Rule {
    pub fn from_spec(spec: &RuleSpec) -> Self {
        Self {
            width_mm: spec.width_mm,
            color: spec.color,
            thickness_pt: spec.thickness_pt,
        }
    }

    fn height(&self) -> f64 {
        to_f64(pt(self.thickness_pt + RULE_EXTRA_HEIGHT_PT))
    }
}

impl Flowable for Rule {
    fn measure(&self, _context: &Context, _width: Mm, _style: Style) -> Mm {
        mm(self.height())
    }
}

impl Element for Rule {
    fn render(
        &mut self,
        _context: &Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let height = self.height();
        if height > to_f64(area.size().height) + EPSILON_MM {
            return Ok(needs_next_page());
        }

        let width = self
            .width_mm
            .unwrap_or_else(|| to_f64(area.size().width));
        let thickness = to_f64(pt(self.thickness_pt));
        paint::fill_rect(&area, 0.0, height - thickness, width, thickness, self.color);

        let mut result = RenderResult::default();
        result.size = Size::new(mm(width), mm(height));
        Ok(result)
    }
}

/// A labelled horizontal bar showing a percentage.
///
/// The label sits on the left, the value on the right, and the rounded track
/// below them is filled in proportion to the value.
pub struct PercentBar {
    label: String,
    value: f64,
}

impl PercentBar {
    /// Creates a bar, clamping `value` into `[0, 100]`.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        let label = label.into();
        let clamped = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 100.0)
        };
        if clamped != value || value.is_nan() {
            warn!(
                "Percentage bar '{}' value {} outside [0, 100]; drawing {}",
                label, value, clamped
            );
        }
        Self {
            label,
            value: clamped,
        }
    }

    pub fn from_spec(spec: &BarSpec) -> Self {
        Self::new(spec.label.clone(), spec.value)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Text printed at the right end of the bar.
    pub fn value_label(&self) -> String {
        format!("{}%", self.value)
    }

    /// Width of the filled part of a track `track_width` long.
    pub fn fill_width(&self, track_width: f64) -> f64 {
        track_width * self.value / 100.0
    }

    /// Height of a bar in millimetres.
    pub fn height() -> f64 {
        to_f64(pt(BAR_TOTAL_HEIGHT_PT))
    }
}

impl Flowable for PercentBar {
    fn measure(&self, _context: &Context, _width: Mm, _style: Style) -> Mm {
        mm(Self::height())
    }
}

impl Element for PercentBar {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let height = Self::height();
        if height > to_f64(area.size().height) + EPSILON_MM {
            return Ok(needs_next_page());
        }

        let width = to_f64(area.size().width);
        let track_height = to_f64(pt(BAR_TRACK_HEIGHT_PT));
        let track_top = height - track_height;

        let mut text_area = area.clone();
        text_area.set_height(mm(track_top));

        let label_style = Style::new()
            .with_font_size(BAR_FONT_SIZE)
            .with_color(TEXT_DARK);
        let mut label = Paragraph::new(StyledString::new(self.label.clone(), label_style));
        label.render(context, text_area.clone(), style)?;

        let mut value_style = Style::new()
            .with_font_size(BAR_FONT_SIZE)
            .with_color(PRIMARY);
        value_style.set_bold();
        let mut value = Paragraph::new(StyledString::new(self.value_label(), value_style));
        value.set_alignment(Alignment::Right);
        value.render(context, text_area, style)?;

        paint::fill_capsule(&area, 0.0, track_top, width, track_height, BADGE_BG);
        paint::fill_capsule(
            &area,
            0.0,
            track_top,
            self.fill_width(width),
            track_height,
            PRIMARY,
        );

        let mut result = RenderResult::default();
        result.size = Size::new(mm(width), mm(height));
        Ok(result)
    }
}

/// A table of equal-width columns whose rows never split across pages.
pub struct GridTable {
    columns: usize,
    rows: Vec<Vec<Vec<StyledText>>>,
    row_height_mm: Option<f64>,
    padding_mm: f64,
    valign: VerticalAlignment,
    background: Option<genpdf::style::Color>,
    separators: Vec<(usize, RuleSpec)>,
    next_row: usize,
}

impl GridTable {
    pub fn from_spec(spec: &GridSpec) -> Result<Self, ParseError> {
        let rows = spec
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.iter().map(StyledText::from_block).collect())
                    .collect()
            })
            .collect::<Result<Vec<Vec<Vec<StyledText>>>, ParseError>>()?;

        Ok(Self {
            columns: spec.columns.max(1),
            rows,
            row_height_mm: spec.row_height_mm,
            padding_mm: to_f64(pt(spec.padding_pt)),
            valign: spec.valign,
            background: spec.background,
            separators: spec.separators.clone(),
            next_row: 0,
        })
    }

    fn column_width(&self, width: f64) -> f64 {
        width / self.columns as f64
    }

    fn stack_height(context: &Context, cell: &[StyledText], width: f64, style: Style) -> f64 {
        cell.iter()
            .map(|item| to_f64(item.measure(context, mm(width), style)))
            .sum()
    }

    fn content_heights(&self, context: &Context, row: usize, width: f64, style: Style) -> Vec<f64> {
        let inner = self.column_width(width) - 2.0 * self.padding_mm;
        self.rows[row]
            .iter()
            .map(|cell| Self::stack_height(context, cell, inner, style))
            .collect()
    }

    fn row_height(&self, content_heights: &[f64]) -> f64 {
        match self.row_height_mm {
            Some(height) => height,
            None => {
                content_heights.iter().copied().fold(0.0, f64::max) + 2.0 * self.padding_mm
            }
        }
    }

    /// Renders one row at `top` and returns the height it occupies.
    ///
    /// Cells get all the room down to the page bottom.  A cell whose content
    /// turns out taller than measured grows the row instead of being cut, and
    /// one that does not fit on the page at all is an error.
    fn render_row(
        &mut self,
        context: &Context,
        area: &render::Area<'_>,
        row: usize,
        top: f64,
        style: Style,
    ) -> Result<f64, Error> {
        let width = to_f64(area.size().width);
        let available = to_f64(area.size().height);
        let content_heights = self.content_heights(context, row, width, style);
        let mut height = self.row_height(&content_heights);
        let column_width = self.column_width(width);
        let padding = self.padding_mm;
        let valign = self.valign;

        if let Some(background) = self.background {
            paint::fill_rect(area, 0.0, top, width, height, background);
        }

        let mut tallest = 0.0_f64;
        for (column, cell) in self.rows[row].iter_mut().enumerate() {
            let content = content_heights.get(column).copied().unwrap_or_default();
            let offset = match valign {
                VerticalAlignment::Top => padding,
                VerticalAlignment::Middle => ((height - content) / 2.0).max(padding),
            };

            let mut cell_area = area.clone();
            cell_area.add_offset(Position::new(
                mm(column as f64 * column_width + padding),
                mm(top + offset),
            ));
            cell_area.set_width(mm((column_width - 2.0 * padding).max(0.0)));
            cell_area.set_height(mm((available - top - offset).max(0.0)));

            let mut used = 0.0;
            for item in cell.iter_mut() {
                let rendered = item.render(context, cell_area.clone(), style)?;
                used += to_f64(rendered.size.height);
                cell_area.add_offset(Position::new(0, rendered.size.height));
                if rendered.has_more {
                    return Err(Error::new(
                        format!(
                            "cell {} of grid row {} does not fit on one page",
                            column + 1,
                            row + 1
                        ),
                        ErrorKind::PageSizeExceeded,
                    ));
                }
            }
            tallest = tallest.max(offset + used + padding);
        }

        if tallest > height + EPSILON_MM {
            warn!(
                "Grid row {} needs {:.2} mm but was measured at {:.2} mm",
                row + 1,
                tallest,
                height
            );
            height = tallest;
        }

        for (_, rule) in self.separators.iter().filter(|(below, _)| *below == row) {
            let thickness = to_f64(pt(rule.thickness_pt));
            let rule_width = rule.width_mm.unwrap_or(width);
            paint::fill_rect(
                area,
                0.0,
                top + height - thickness / 2.0,
                rule_width,
                thickness,
                rule.color,
            );
        }

        Ok(height)
    }
}

impl Flowable for GridTable {
    fn measure(&self, context: &Context, width: Mm, style: Style) -> Mm {
        let width = to_f64(width);
        let total = (self.next_row..self.rows.len())
            .map(|row| self.row_height(&self.content_heights(context, row, width, style)))
            .sum();
        mm(total)
    }
}

impl Element for GridTable {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let width = to_f64(area.size().width);
        let available = to_f64(area.size().height);
        let mut top = 0.0;
        let mut result = RenderResult::default();

        while self.next_row < self.rows.len() {
            let content_heights = self.content_heights(context, self.next_row, width, style);
            let height = self.row_height(&content_heights);
            if top + height > available + EPSILON_MM {
                result.has_more = true;
                break;
            }
            top += self.render_row(context, &area, self.next_row, top, style)?;
            self.next_row += 1;
        }

        result.size = Size::new(mm(width), mm(top));
        Ok(result)
    }
}

/// Where a keep-together group goes, given the space left on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// The group fits into the remaining space.
    Here,
    /// The group fits on an empty page but not in the remaining space.
    NextPage,
    /// The group is taller than a whole page and has to split.
    Split,
}

/// Decides the placement of a group `required` tall with `available` space
/// left on a page whose empty frame is `frame_height` tall.
pub fn place(required: Mm, available: Mm, frame_height: Mm) -> Placement {
    let required = to_f64(required);
    if required <= to_f64(available) + EPSILON_MM {
        Placement::Here
    } else if required <= to_f64(frame_height) + EPSILON_MM {
        Placement::NextPage
    } else {
        Placement::Split
    }
}

/// Renders its children on one page whenever a single page can hold them.
pub struct KeepTogether {
    children: Vec<Box<dyn Flowable>>,
    frame_height: Mm,
    next: usize,
    started: bool,
}

impl KeepTogether {
    pub fn new(children: Vec<Box<dyn Flowable>>, frame_height: Mm) -> Self {
        Self {
            children,
            frame_height,
            next: 0,
            started: false,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Flowable for KeepTogether {
    fn measure(&self, context: &Context, width: Mm, style: Style) -> Mm {
        let total = self.children[self.next..]
            .iter()
            .map(|child| to_f64(child.measure(context, width, style)))
            .sum();
        mm(total)
    }
}

impl Element for KeepTogether {
    fn render(
        &mut self,
        context: &Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        if !self.started {
            let required = self.measure(context, area.size().width, style);
            if place(required, area.size().height, self.frame_height) == Placement::NextPage {
                return Ok(needs_next_page());
            }
            self.started = true;
        }

        let mut result = RenderResult::default();
        while self.next < self.children.len() {
            let child = self.children[self.next].render(context, area.clone(), style)?;
            area.add_offset(Position::new(0, child.size.height));
            result.size = result.size.stack_vertical(child.size);
            if child.has_more {
                result.has_more = true;
                return Ok(result);
            }
            self.next += 1;
        }
        Ok(result)
    }
}
