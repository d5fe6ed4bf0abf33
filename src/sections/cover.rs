use crate::model::{Background, Block, GridSpec, Section, TextBlock, VerticalAlignment};
use crate::styles::{StyleId, StyleSheet};
use crate::theme::{FOOTER_ON_DARK, STAT_LABEL_ON_DARK};
use crate::units::{pt, to_f64};

const STATS: [(&str, &str); 4] = [
    ("99.8%", "Accuracy"),
    ("130+", "Pathologies"),
    ("<60s", "Analysis Time"),
    ("10,000+", "Practitioners"),
];

/// Dark title page with the headline figures.
pub fn build_cover(styles: &StyleSheet) -> Section {
    let stat_label = styles[StyleId::StatLabel].with_color(STAT_LABEL_ON_DARK);
    let stat_cells = STATS
        .iter()
        .map(|(number, label)| {
            vec![
                TextBlock::new(styles[StyleId::StatNumber], *number),
                TextBlock::new(stat_label, *label),
            ]
        })
        .collect();
    let stats = GridSpec::new(STATS.len())
        .with_row(stat_cells)
        .with_row_height_mm(to_f64(pt(55.0)))
        .with_padding_pt(3.0)
        .with_valign(VerticalAlignment::Middle);

    Section::builder("Cover")
        .identifier("cover")
        .push_block(Block::spacer(35.0))
        .push_block(Block::text(styles[StyleId::CoverTag], "PRESS RELEASE  |  2026"))
        .push_block(Block::spacer(6.0))
        .push_block(Block::text(
            styles[StyleId::CoverTitle],
            "SOJAI Launches the First\nAll-in-One AI Platform for\nDental Diagnostics",
        ))
        .push_block(Block::spacer(6.0))
        .push_block(Block::text(
            styles[StyleId::CoverSubtitle],
            "99.8% accuracy across 130+ pathologies. Full CBCT analysis in under 60 seconds.\n\
             FDA-cleared. HIPAA & GDPR compliant. Trusted by 10,000+ practitioners.",
        ))
        .push_block(Block::spacer(15.0))
        .push_block(Block::Grid(stats))
        .push_block(Block::spacer(20.0))
        .push_block(Block::text(
            styles[StyleId::FooterText].with_color(FOOTER_ON_DARK),
            "www.sojai.com  |  contact@sojai.com",
        ))
        .hand_off(Background::Light)
        .build()
}
