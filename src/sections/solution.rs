use super::Heading;
use crate::model::{Block, GridSpec, RuleSpec, Section, TextBlock, VerticalAlignment};
use crate::styles::{FontWeight, StyleId, StyleSheet};
use crate::theme::{GRID_SEPARATOR, LIGHT_BG, PRIMARY};

const STEPS: [(&str, &str); 3] = [
    (
        "01 \u{2014} Upload Scan",
        "Drag-and-drop any scan \u{2014} DICOM, panoramic, periapical, bitewing. Compatible with all \
         18 major CBCT manufacturers (Dentsply Sirona, Planmeca, Vatech, Carestream, KaVo Kerr, \
         and more). No equipment change required. No plugin to install.",
    ),
    (
        "02 \u{2014} AI Analysis in Under 60 Seconds",
        "A neural network trained on millions of annotated dental images analyzes the full 3D \
         volume: automatic tooth-by-tooth segmentation with FDI numbering, caries detection (99.2%), \
         periapical lesions (98.7%), bone loss (97.9%), root fractures (96.5%), impacted teeth (99.5%). \
         130+ pathologies identified with clinical-grade accuracy.",
    ),
    (
        "03 \u{2014} Review & Report",
        "Review AI findings with interactive overlays and synchronized multiplanar views (axial, \
         sagittal, coronal). Compare scans over time to track progression. One click generates a \
         professional PDF report with your annotations, findings summary, treatment recommendations, \
         practice logo, and digital signature \u{2014} ready to hand to the patient or send to a colleague.",
    ),
];

const CAPABILITY_TITLES: [[&str; 3]; 2] = [
    [
        "3D Tooth Segmentation",
        "Multiplanar Reconstruction",
        "Scan Superimposition",
    ],
    [
        "Professional PDF Reports",
        "Real-Time Collaboration",
        "REST API Integration",
    ],
];

const CAPABILITY_DESCRIPTIONS: [[&str; 3]; 2] = [
    [
        "Individual tooth isolation,\nautomatic FDI numbering,\nSTL export for 3D printing",
        "Axial, sagittal & coronal\nviews with cross-hair sync\nand measurement tools",
        "Temporal scan comparison,\nbone level tracking,\nautomatic alignment",
    ],
    [
        "Custom branding & templates,\nmulti-language support,\ndigital signature ready",
        "Case sharing, annotation tools,\ndiscussion threads, seamless\nreferral workflow",
        "PACS integration, batch\nprocessing, DICOM &\nSTL/OBJ support",
    ],
];

/// Light page with the three workflow steps and the capability grid.
pub fn build_solution(styles: &StyleSheet) -> Section {
    let heading = Heading {
        badge: "THE SOLUTION",
        badge_style: styles[StyleId::SectionBadge],
        rule_width_mm: 50.0,
        rule_color: PRIMARY,
        title: "Three Steps to Transform\nYour Practice",
        title_style: styles[StyleId::PageTitle],
        gap_after_title_mm: 2.0,
    };

    let body = styles[StyleId::BodyText];
    let step_title = body
        .with_size(12.5)
        .with_weight(FontWeight::Bold)
        .with_color(PRIMARY)
        .with_space_after(1.5);
    let steps = STEPS.iter().flat_map(|(title, text)| {
        [
            Block::text(step_title, *title),
            Block::text(body, *text),
            Block::spacer(2.0),
        ]
    });

    let cell = styles[StyleId::StatLabel];
    let feature_title = cell.with_weight(FontWeight::Bold).with_color(PRIMARY);
    let feature_description = cell.with_size(8.5).with_leading(12.0);

    let mut grid = GridSpec::new(3)
        .with_padding_pt(6.0)
        .with_valign(VerticalAlignment::Top)
        .with_background(LIGHT_BG)
        .with_separator_below(
            1,
            RuleSpec {
                width_mm: None,
                color: GRID_SEPARATOR,
                thickness_pt: 0.5,
            },
        );
    for (titles, descriptions) in CAPABILITY_TITLES.iter().zip(&CAPABILITY_DESCRIPTIONS) {
        grid = grid
            .with_row(
                titles
                    .iter()
                    .map(|title| vec![TextBlock::new(feature_title, format!("**{}**", title))])
                    .collect(),
            )
            .with_row(
                descriptions
                    .iter()
                    .map(|description| vec![TextBlock::new(feature_description, *description)])
                    .collect(),
            );
    }

    Section::builder("The Solution")
        .identifier("solution")
        .extend_blocks(heading.into_blocks())
        .extend_blocks(steps)
        .push_block(Block::spacer(4.0))
        .push_block(Block::text(styles[StyleId::SectionBadge], "PLATFORM CAPABILITIES"))
        .push_block(Block::spacer(2.0))
        .push_block(Block::keep_together([Block::Grid(grid)]))
        .page_break_after()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_grid_is_three_by_four() {
        let section = build_solution(&StyleSheet::new());
        let grid = section
            .blocks()
            .iter()
            .find_map(|block| match block {
                Block::KeepTogether(children) => match children.as_slice() {
                    [Block::Grid(grid)] => Some(grid),
                    _ => None,
                },
                _ => None,
            })
            .expect("capability grid");
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.rows.len(), 4);
        assert!(grid.rows.iter().all(|row| row.len() == 3));
        assert_eq!(grid.rows[0][0][0].markup, "**3D Tooth Segmentation**");
        assert_eq!(grid.separators.len(), 1);
        assert_eq!(grid.separators[0].0, 1);
    }
}
