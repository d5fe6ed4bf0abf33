//! Content of the five press-release sections.
//!
//! Each builder is a pure function of the style sheet.  Every section but the
//! last ends with the hand-off that schedules the background of the next one.

mod announcement;
mod cover;
mod problem;
mod solution;
mod testimonials;

pub use announcement::build_announcement;
pub use cover::build_cover;
pub use problem::build_problem;
pub use solution::build_solution;
pub use testimonials::build_testimonials;

use genpdf::style::Color;

use crate::model::{Block, Section};
use crate::styles::TextStyle;

/// Builds all sections in reading order.
pub fn build_all(styles: &crate::styles::StyleSheet) -> Vec<Section> {
    vec![
        build_cover(styles),
        build_announcement(styles),
        build_problem(styles),
        build_solution(styles),
        build_testimonials(styles),
    ]
}

/// Badge, underline rule and page title opening a content page.
struct Heading<'a> {
    badge: &'a str,
    badge_style: TextStyle,
    rule_width_mm: f64,
    rule_color: Color,
    title: &'a str,
    title_style: TextStyle,
    gap_after_title_mm: f64,
}

impl Heading<'_> {
    fn into_blocks(self) -> Vec<Block> {
        vec![
            Block::spacer(5.0),
            Block::text(self.badge_style, self.badge),
            Block::rule(self.rule_width_mm, self.rule_color, 2.5),
            Block::spacer(3.0),
            Block::text(self.title_style, self.title),
            Block::spacer(self.gap_after_title_mm),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Background, Block};
    use crate::schedule::split_into_chunks;
    use crate::styles::StyleSheet;

    fn markers(section: &Section) -> Vec<(usize, Background)> {
        section
            .blocks()
            .iter()
            .enumerate()
            .filter_map(|(index, block)| match block {
                Block::Background(target) => Some((index, *target)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn every_section_but_the_last_hands_off_once() {
        let sections = build_all(&StyleSheet::new());
        let (last, handing_off) = sections.split_last().expect("sections");

        for section in handing_off.iter().filter(|s| s.identifier() != Some("solution")) {
            let found = markers(section);
            assert_eq!(found.len(), 1, "{} markers", section.title());
            let (index, _) = found[0];
            assert_eq!(index + 2, section.blocks().len(), "{}", section.title());
            assert_eq!(section.blocks().last(), Some(&Block::PageBreak));
        }
        assert!(markers(last).is_empty());
        assert!(!last.blocks().iter().any(Block::is_control));
    }

    #[test]
    fn solution_keeps_the_light_background() {
        let solution = build_solution(&StyleSheet::new());
        assert!(markers(&solution).is_empty());
        assert_eq!(solution.blocks().last(), Some(&Block::PageBreak));
    }

    #[test]
    fn hand_off_targets_alternate() {
        let styles = StyleSheet::new();
        let targets: Vec<_> = [
            build_cover(&styles),
            build_announcement(&styles),
            build_problem(&styles),
        ]
        .iter()
        .map(|section| markers(section)[0].1)
        .collect();
        assert_eq!(
            targets,
            vec![Background::Light, Background::Dark, Background::Light]
        );
    }

    #[test]
    fn whole_stream_splits_into_five_chunks() {
        let blocks: Vec<Block> = build_all(&StyleSheet::new())
            .iter()
            .flat_map(|section| section.blocks().iter().cloned())
            .collect();
        let chunks = split_into_chunks(&blocks, Background::Dark).expect("valid stream");
        let backgrounds: Vec<_> = chunks.iter().map(|chunk| chunk.background()).collect();
        assert_eq!(
            backgrounds,
            vec![
                Background::Dark,
                Background::Light,
                Background::Dark,
                Background::Light,
                Background::Light,
            ]
        );
    }

    #[test]
    fn every_section_is_identified() {
        let sections = build_all(&StyleSheet::new());
        let identifiers: Vec<_> = sections.iter().filter_map(Section::identifier).collect();
        assert_eq!(
            identifiers,
            vec!["cover", "announcement", "problem", "solution", "testimonials"]
        );
    }
}
