//! Inline markup for press-release copy.
//!
//! Paragraph text is written as literals in a small markdown-like syntax so a
//! headline can carry a coloured bullet or a bold run without splitting the
//! literal into separate elements.  The parser turns that text into [`Span`]s,
//! each of which maps onto a `genpdf` [`StyledString`].
//!
//! Hard line breaks are written as `\n` and handled by [`parse_lines`].

use std::fmt;

use genpdf::style::{Color, Style, StyledString};

/// A slice of text together with inline style attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
    italic: bool,
    color: Option<Color>,
}

impl Span {
    /// Creates a new span with the provided text and no styles applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Marks the span as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Marks the span as italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Assigns a color to the span.
    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Inline style of the span, to be layered over the paragraph style.
    pub fn style(&self) -> Style {
        let mut style = Style::new();
        if let Some(color) = self.color {
            style.set_color(color);
        }
        if self.bold {
            style.set_bold();
        }
        if self.italic {
            style.set_italic();
        }
        style
    }

    pub fn to_styled_string(&self) -> StyledString {
        StyledString::new(self.text.clone(), self.style())
    }
}

impl From<&Span> for StyledString {
    fn from(span: &Span) -> Self {
        span.to_styled_string()
    }
}

/// Parse errors produced by [`parse_markup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    index: usize,
    message: String,
}

impl ParseError {
    fn new(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            message: message.into(),
        }
    }

    /// Byte index in the input string where the error was detected.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.index)
    }
}

impl std::error::Error for ParseError {}

#[derive(Clone, Copy, Debug, Default)]
struct StyleState {
    bold: bool,
    italic: bool,
    color: Option<Color>,
}

impl StyleState {
    fn to_span(self, text: impl Into<String>) -> Span {
        Span {
            text: text.into(),
            bold: self.bold,
            italic: self.italic,
            color: self.color,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Bold,
    Italic,
    Color,
}

impl Marker {
    fn closing_token(self) -> &'static str {
        match self {
            Marker::Bold => "**",
            Marker::Italic => "*",
            Marker::Color => "}",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Marker::Bold => "bold span",
            Marker::Italic => "italic span",
            Marker::Color => "color span",
        }
    }
}

/// Parses one line of markup into a list of [`Span`]s.
///
/// Supported constructs:
///
/// - `**bold**`
/// - `*italic*`
/// - `[color=#RRGGBB]{text}`
///
/// Constructs nest, so `[color=#00C8C8]{**title**}` yields a bold, coloured span.
pub fn parse_markup(input: &str) -> Result<Vec<Span>, ParseError> {
    let (spans, _) = parse_inner(input, 0, StyleState::default(), None)?;
    Ok(spans)
}

/// Splits `input` on `\n` and parses every line separately.
///
/// Byte positions in errors are relative to the whole input.
pub fn parse_lines(input: &str) -> Result<Vec<Vec<Span>>, ParseError> {
    let mut offset = 0;
    let mut lines = Vec::new();
    for line in input.split('\n') {
        let spans = parse_markup(line)
            .map_err(|err| ParseError::new(err.index + offset, err.message))?;
        lines.push(spans);
        offset += line.len() + 1;
    }
    Ok(lines)
}

fn parse_inner(
    input: &str,
    mut index: usize,
    state: StyleState,
    closing_marker: Option<Marker>,
) -> Result<(Vec<Span>, usize), ParseError> {
    let mut spans = Vec::new();
    let mut buffer = String::new();

    while let Some(ch) = input[index..].chars().next() {
        let rest = &input[index..];

        if let Some(marker) = closing_marker {
            if rest.starts_with(marker.closing_token()) {
                flush_buffer(&mut buffer, &mut spans, state);
                return Ok((spans, index + marker.closing_token().len()));
            }
        }

        let opened = if rest.starts_with("**") {
            Some((Marker::Bold, index + 2, StyleState { bold: true, ..state }))
        } else if rest.starts_with('*') {
            Some((Marker::Italic, index + 1, StyleState { italic: true, ..state }))
        } else if rest.starts_with("[color=") {
            let (color, after_directive) = parse_color_directive(input, index)?;
            Some((
                Marker::Color,
                after_directive,
                StyleState {
                    color: Some(color),
                    ..state
                },
            ))
        } else {
            None
        };

        if let Some((marker, start, nested_state)) = opened {
            flush_buffer(&mut buffer, &mut spans, state);
            let (nested, new_index) = parse_inner(input, start, nested_state, Some(marker))?;
            spans.extend(nested);
            index = new_index;
            continue;
        }

        match ch {
            '}' => {
                return Err(ParseError::new(
                    index,
                    "unexpected closing token `}` without matching opening `[color=...]`",
                ))
            }
            ']' => return Err(ParseError::new(index, "unexpected closing token `]`")),
            '[' => {
                return Err(ParseError::new(
                    index,
                    "unsupported directive; expected `[color=#RRGGBB]{...}`",
                ))
            }
            _ => {
                buffer.push(ch);
                index += ch.len_utf8();
            }
        }
    }

    if let Some(marker) = closing_marker {
        Err(ParseError::new(
            index,
            format!("unterminated {}", marker.description()),
        ))
    } else {
        flush_buffer(&mut buffer, &mut spans, state);
        Ok((spans, index))
    }
}

fn flush_buffer(buffer: &mut String, spans: &mut Vec<Span>, state: StyleState) {
    if !buffer.is_empty() {
        spans.push(state.to_span(std::mem::take(buffer)));
    }
}

fn parse_color_directive(input: &str, index: usize) -> Result<(Color, usize), ParseError> {
    const PREFIX: &str = "[color=";
    let start_hex = index + PREFIX.len();
    if !input[start_hex..].starts_with('#') {
        return Err(ParseError::new(
            start_hex,
            "expected `#` followed by a hexadecimal RGB value",
        ));
    }

    let hex_start = start_hex + 1;
    let hex = input
        .get(hex_start..hex_start + 6)
        .ok_or_else(|| {
            ParseError::new(
                hex_start,
                "incomplete color specification; expected 6 hexadecimal digits",
            )
        })?;

    let channel = |offset: usize| {
        hex.get(offset..offset + 2)
            .filter(|pair| pair.chars().all(|c| c.is_ascii_hexdigit()))
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(|| {
                ParseError::new(
                    hex_start,
                    "invalid RGB specification; use hexadecimal digits only",
                )
            })
    };
    let color = Color::Rgb(channel(0)?, channel(2)?, channel(4)?);

    let bracket_index = hex_start + 6;
    if !input[bracket_index..].starts_with(']') {
        return Err(ParseError::new(
            bracket_index,
            "expected `]` to close color directive",
        ));
    }

    let brace_index = bracket_index + 1;
    if !input[brace_index..].starts_with('{') {
        return Err(ParseError::new(
            brace_index,
            "expected `{` to start the colored text",
        ));
    }

    Ok((color, brace_index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_style_reflects_flags() {
        let span = Span::new("SOJAI")
            .bold()
            .italic()
            .colored(Color::Rgb(0x4A, 0x39, 0xC0));
        let styled = span.to_styled_string();
        assert_eq!(styled.s, "SOJAI");
        assert!(styled.style.is_bold());
        assert!(styled.style.is_italic());
        assert_eq!(styled.style.color(), Some(Color::Rgb(0x4A, 0x39, 0xC0)));
    }

    #[test]
    fn parse_plain_text() {
        let spans = parse_markup("Cloud-based, accessible from any device").expect("parse succeeds");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text(), "Cloud-based, accessible from any device");
        assert!(!spans[0].is_bold());
    }

    #[test]
    fn parse_colored_bullet_prefix() {
        let spans = parse_markup("[color=#4A39C0]{\u{2022}}  \u{2713}  FDA 510(k) cleared")
            .expect("parse succeeds");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text(), "\u{2022}");
        assert_eq!(spans[0].color(), Some(Color::Rgb(0x4A, 0x39, 0xC0)));
        assert_eq!(spans[1].text(), "  \u{2713}  FDA 510(k) cleared");
        assert_eq!(spans[1].color(), None);
    }

    #[test]
    fn parse_bold_inside_color() {
        let spans = parse_markup("[color=#00C8C8]{**Missed pathologies**}").expect("parse succeeds");
        assert_eq!(spans.len(), 1);
        assert!(spans[0].is_bold());
        assert_eq!(spans[0].color(), Some(Color::Rgb(0x00, 0xC8, 0xC8)));
    }

    #[test]
    fn parse_nested_styles() {
        let spans = parse_markup("This is **very *cool***!").expect("parse succeeds");
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[1].text(), "very ");
        assert!(spans[2].is_bold());
        assert!(spans[2].is_italic());
        assert_eq!(spans[3].text(), "!");
        assert!(!spans[3].is_bold());
    }

    #[test]
    fn parse_lines_splits_on_newline() {
        let lines = parse_lines("The Dark Ages of\nDental Diagnostics").expect("parse succeeds");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0].text(), "The Dark Ages of");
        assert_eq!(lines[1][0].text(), "Dental Diagnostics");
    }

    #[test]
    fn parse_lines_reports_absolute_offsets() {
        let err = parse_lines("fine\n**oops").unwrap_err();
        assert!(err.message().contains("unterminated bold"));
        assert_eq!(err.index(), 11);
    }

    #[test]
    fn error_on_invalid_color() {
        let err = parse_markup("[color=#12FG34]{x}").unwrap_err();
        assert!(err.message().contains("invalid RGB"));
    }

    #[test]
    fn error_on_short_color() {
        let err = parse_markup("[color=#12]").unwrap_err();
        assert!(err.message().contains("incomplete color"));
    }
}
