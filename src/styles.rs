//! The named paragraph styles used by the section builders.
//!
//! Sizes and leading are typographic points, spacing and indents are
//! millimetres.  A [`StyleSheet`] is built once per document and handed to
//! every section builder by reference.

use std::collections::BTreeMap;
use std::ops::Index;

use genpdf::style::{Color, Style};
use genpdf::Alignment;

use crate::theme::{
    CYAN, PRIMARY, SUBTITLE_ON_DARK, TEXT_DARK, TEXT_MUTED, TEXT_ON_DARK, WHITE,
};

/// Ratio between a font's natural line height and its size for the sans
/// families the renderer loads.
const NATURAL_LINE_HEIGHT: f64 = 1.15;

/// Horizontal alignment of a paragraph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
    /// Fully justified paragraphs.  The renderer has no justification and sets
    /// these flush left.
    Justified,
}

impl From<HorizontalAlignment> for Alignment {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Left | HorizontalAlignment::Justified => Alignment::Left,
            HorizontalAlignment::Center => Alignment::Center,
            HorizontalAlignment::Right => Alignment::Right,
        }
    }
}

/// Face of the font family a style renders with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

/// Fully specified text formatting for one paragraph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub weight: FontWeight,
    pub size_pt: f64,
    pub leading_pt: f64,
    pub color: Color,
    pub alignment: HorizontalAlignment,
    pub space_after_mm: f64,
    pub left_indent_mm: f64,
    pub right_indent_mm: f64,
}

impl TextStyle {
    fn new(
        weight: FontWeight,
        size_pt: f64,
        leading_pt: f64,
        color: Color,
        alignment: HorizontalAlignment,
        space_after_mm: f64,
    ) -> Self {
        Self {
            weight,
            size_pt,
            leading_pt,
            color,
            alignment,
            space_after_mm,
            left_indent_mm: 0.0,
            right_indent_mm: 0.0,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Changes the font size, keeping the leading.
    pub fn with_size(mut self, size_pt: f64) -> Self {
        self.size_pt = size_pt;
        self
    }

    pub fn with_leading(mut self, leading_pt: f64) -> Self {
        self.leading_pt = leading_pt;
        self
    }

    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_space_after(mut self, space_after_mm: f64) -> Self {
        self.space_after_mm = space_after_mm;
        self
    }

    pub fn with_indents(mut self, left_mm: f64, right_mm: f64) -> Self {
        self.left_indent_mm = left_mm;
        self.right_indent_mm = right_mm;
        self
    }

    /// Font size in whole points, the resolution of the renderer.
    pub fn font_size(&self) -> u8 {
        self.size_pt.round().clamp(1.0, f64::from(u8::MAX)) as u8
    }

    /// Line spacing factor that reproduces the configured leading.
    pub fn line_spacing(&self) -> f64 {
        self.leading_pt / (f64::from(self.font_size()) * NATURAL_LINE_HEIGHT)
    }

    /// Converts the style into its `genpdf` counterpart.
    pub fn to_style(&self) -> Style {
        let mut style = Style::new()
            .with_font_size(self.font_size())
            .with_line_spacing(self.line_spacing())
            .with_color(self.color);
        match self.weight {
            FontWeight::Regular => {}
            FontWeight::Bold => style.set_bold(),
            FontWeight::Italic => style.set_italic(),
            FontWeight::BoldItalic => {
                style.set_bold();
                style.set_italic();
            }
        }
        style
    }
}

/// Symbolic style names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleId {
    CoverTitle,
    CoverSubtitle,
    CoverTag,
    PageTitle,
    PageTitleWhite,
    SectionBadge,
    SectionBadgeWhite,
    BodyText,
    BodyTextWhite,
    QuoteName,
    QuoteRole,
    QuoteText,
    StatNumber,
    StatLabel,
    FooterText,
    BulletItem,
    BulletItemWhite,
    CtaTitle,
    CtaBody,
}

impl StyleId {
    pub const ALL: [StyleId; 19] = [
        StyleId::CoverTitle,
        StyleId::CoverSubtitle,
        StyleId::CoverTag,
        StyleId::PageTitle,
        StyleId::PageTitleWhite,
        StyleId::SectionBadge,
        StyleId::SectionBadgeWhite,
        StyleId::BodyText,
        StyleId::BodyTextWhite,
        StyleId::QuoteName,
        StyleId::QuoteRole,
        StyleId::QuoteText,
        StyleId::StatNumber,
        StyleId::StatLabel,
        StyleId::FooterText,
        StyleId::BulletItem,
        StyleId::BulletItemWhite,
        StyleId::CtaTitle,
        StyleId::CtaBody,
    ];

    fn definition(self) -> TextStyle {
        use FontWeight::{Bold, Italic, Regular};
        use HorizontalAlignment::{Center, Justified, Left};

        match self {
            StyleId::CoverTitle => TextStyle::new(Bold, 36.0, 44.0, WHITE, Center, 8.0),
            StyleId::CoverSubtitle => {
                TextStyle::new(Regular, 15.0, 22.0, SUBTITLE_ON_DARK, Center, 6.0)
            }
            StyleId::CoverTag => TextStyle::new(Bold, 11.0, 16.0, CYAN, Center, 4.0),
            StyleId::PageTitle => TextStyle::new(Bold, 26.0, 32.0, PRIMARY, Left, 5.0),
            StyleId::PageTitleWhite => TextStyle::new(Bold, 26.0, 32.0, WHITE, Left, 5.0),
            StyleId::SectionBadge => TextStyle::new(Bold, 10.0, 14.0, PRIMARY, Left, 3.0),
            StyleId::SectionBadgeWhite => TextStyle::new(Bold, 10.0, 14.0, CYAN, Left, 3.0),
            StyleId::BodyText => TextStyle::new(Regular, 11.0, 18.0, TEXT_DARK, Justified, 3.5),
            StyleId::BodyTextWhite => {
                TextStyle::new(Regular, 11.0, 18.0, TEXT_ON_DARK, Justified, 3.5)
            }
            StyleId::QuoteName => TextStyle::new(Bold, 12.0, 16.0, PRIMARY, Left, 1.0),
            StyleId::QuoteRole => TextStyle::new(Regular, 10.0, 14.0, TEXT_MUTED, Left, 3.0),
            StyleId::QuoteText => TextStyle::new(Italic, 11.0, 18.0, TEXT_DARK, Justified, 4.0)
                .with_indents(4.0, 4.0),
            StyleId::StatNumber => TextStyle::new(Bold, 28.0, 34.0, PRIMARY, Center, 0.0),
            StyleId::StatLabel => TextStyle::new(Regular, 9.5, 13.0, TEXT_MUTED, Center, 0.0),
            StyleId::FooterText => TextStyle::new(Regular, 8.0, 11.0, TEXT_MUTED, Center, 0.0),
            StyleId::BulletItem => TextStyle::new(Regular, 10.5, 16.0, TEXT_DARK, Left, 2.0)
                .with_indents(6.0, 0.0),
            StyleId::BulletItemWhite => {
                TextStyle::new(Regular, 10.5, 16.0, TEXT_ON_DARK, Left, 2.0).with_indents(6.0, 0.0)
            }
            StyleId::CtaTitle => TextStyle::new(Bold, 22.0, 28.0, PRIMARY, Center, 4.0),
            StyleId::CtaBody => TextStyle::new(Regular, 12.0, 18.0, TEXT_MUTED, Center, 3.0),
        }
    }
}

/// Immutable registry mapping every [`StyleId`] to its [`TextStyle`].
#[derive(Clone, Debug)]
pub struct StyleSheet {
    styles: BTreeMap<StyleId, TextStyle>,
}

impl StyleSheet {
    pub fn new() -> Self {
        let styles = StyleId::ALL
            .iter()
            .map(|&id| (id, id.definition()))
            .collect();
        Self { styles }
    }

    pub fn get(&self, id: StyleId) -> Option<&TextStyle> {
        self.styles.get(&id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<StyleId> for StyleSheet {
    type Output = TextStyle;

    /// Every id is registered by [`StyleSheet::new`], so lookups cannot miss.
    fn index(&self, id: StyleId) -> &TextStyle {
        &self.styles[&id]
    }
}
