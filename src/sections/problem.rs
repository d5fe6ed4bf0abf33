use super::Heading;
use crate::model::{Background, Block, Section};
use crate::styles::{StyleId, StyleSheet};
use crate::theme::{hex, CYAN, TEXT_ON_DARK_MUTED};

const PARAGRAPHS: [&str; 4] = [
    "Today, a dentist spends an average of 15 to 20 minutes per CBCT scan manually reviewing \
     each slice, identifying pathologies, annotating images, and writing up findings. Multiply \
     that by 8 to 12 patients a day, and it\u{2019}s hours lost to repetitive tasks \u{2014} hours that are \
     neither billed nor spent on patient care.",
    "Worse: the human eye, even an expert one, misses things. An early-stage periapical lesion, \
     a subtle root fracture, progressive bone loss \u{2014} these weak signals go unnoticed when a \
     practitioner is rushing between patients under time pressure.",
    "In multi-location clinics, the problem compounds: no shared diagnostic standard, quality \
     gaps between practitioners, no centralized tool to track consistency.",
    "And on the patient side? A panoramic X-ray displayed on screen without clear visual \
     explanation means a treatment plan declined or postponed. The practitioner knows what \
     they\u{2019}re seeing, but they can\u{2019}t show it convincingly.",
];

const PAIN_POINTS: [(&str, &str); 4] = [
    ("15\u{2013}20 min per scan", "Manual analysis, annotation & reporting"),
    (
        "Missed pathologies",
        "Fatigue and time pressure lead to diagnostic errors",
    ),
    (
        "No standardization",
        "Quality varies across practitioners and locations",
    ),
    (
        "Poor patient communication",
        "Patients can\u{2019}t understand raw imaging",
    ),
];

/// Dark page describing the diagnostic workload SOJAI removes.
pub fn build_problem(styles: &StyleSheet) -> Section {
    let heading = Heading {
        badge: "THE PROBLEM",
        badge_style: styles[StyleId::SectionBadgeWhite],
        rule_width_mm: 40.0,
        rule_color: CYAN,
        title: "The Dark Ages of\nDental Diagnostics",
        title_style: styles[StyleId::PageTitleWhite],
        gap_after_title_mm: 2.0,
    };

    let pain_title = styles[StyleId::BulletItemWhite].with_indents(0.0, 0.0);
    let pain_description = pain_title
        .with_color(TEXT_ON_DARK_MUTED)
        .with_size(9.5);
    let cyan = hex(CYAN);

    let paragraphs = PARAGRAPHS
        .iter()
        .map(|text| Block::text(styles[StyleId::BodyTextWhite], *text));
    let pain_points = PAIN_POINTS.iter().flat_map(|(title, description)| {
        [
            Block::text(pain_title, format!("[color={}]{{**{}**}}", cyan, title)),
            Block::text(pain_description, *description),
            Block::spacer(1.5),
        ]
    });

    Section::builder("The Problem")
        .identifier("problem")
        .extend_blocks(heading.into_blocks())
        .extend_blocks(paragraphs)
        .push_block(Block::spacer(6.0))
        .extend_blocks(pain_points)
        .hand_off(Background::Light)
        .build()
}
