use super::Heading;
use crate::model::{Background, Block, Section};
use crate::styles::{StyleId, StyleSheet};
use crate::theme::PRIMARY;

const FACTS: [&str; 5] = [
    "\u{2713}  FDA 510(k) cleared for periapical pathology detection",
    "\u{2713}  Neural networks trained on millions of annotated dental images",
    "\u{2713}  Compatible with Dentsply Sirona, Planmeca, Vatech, Carestream & 13 more",
    "\u{2713}  DICOM, panoramic, periapical, bitewing \u{2014} all formats supported",
    "\u{2713}  Cloud-based, accessible from any device, anywhere",
];

pub(crate) const ACCURACY: [(&str, f64); 6] = [
    ("Impacted Teeth", 99.5),
    ("Caries Detection", 99.2),
    ("Periapical Lesions", 98.7),
    ("Bone Loss Analysis", 97.9),
    ("Root Fractures", 96.5),
    ("Sinus Pathology", 95.8),
];

/// Light page announcing the platform, with the detection accuracy bars.
pub fn build_announcement(styles: &StyleSheet) -> Section {
    let heading = Heading {
        badge: "THE ANNOUNCEMENT",
        badge_style: styles[StyleId::SectionBadge],
        rule_width_mm: 60.0,
        rule_color: PRIMARY,
        title: "The First All-in-One AI Platform\nfor Dental Diagnostics",
        title_style: styles[StyleId::PageTitle],
        gap_after_title_mm: 2.0,
    };

    let body = styles[StyleId::BodyText];
    let bullet_prefix = format!("[color={}]{{\u{2022}}}  ", crate::theme::hex(PRIMARY));
    let facts = FACTS
        .iter()
        .map(|fact| Block::text(styles[StyleId::BulletItem], format!("{}{}", bullet_prefix, fact)));

    let bars = ACCURACY
        .iter()
        .flat_map(|(label, value)| [Block::bar(*label, *value), Block::spacer(1.0)]);

    Section::builder("The Announcement")
        .identifier("announcement")
        .extend_blocks(heading.into_blocks())
        .push_block(Block::text(
            body,
            "SOJAI, an AI-powered SaaS platform, now enables dental professionals to automatically \
             analyze CBCT scans and 2D radiographs in under 60 seconds, with 99.8% accuracy across \
             130+ pathologies. The technology is FDA 510(k) cleared, HIPAA and GDPR compliant, and \
             already used by over 10,000 practitioners worldwide.",
        ))
        .push_block(Block::text(
            body,
            "The platform covers the entire diagnostic workflow \u{2014} from scan upload to a professional \
             PDF report ready to hand to the patient. Compatible with all 18 major CBCT manufacturers, \
             SOJAI integrates seamlessly into existing practice infrastructure without requiring any \
             equipment change.",
        ))
        .push_block(Block::spacer(4.0))
        .extend_blocks(facts)
        .push_block(Block::spacer(5.0))
        .push_block(Block::text(styles[StyleId::SectionBadge], "AI DETECTION ACCURACY"))
        .push_block(Block::spacer(1.5))
        .push_block(Block::keep_together(bars))
        .hand_off(Background::Dark)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_bars_form_one_group() {
        let section = build_announcement(&StyleSheet::new());
        let groups: Vec<&Vec<Block>> = section
            .blocks()
            .iter()
            .filter_map(|block| match block {
                Block::KeepTogether(children) => Some(children),
                _ => None,
            })
            .collect();
        assert_eq!(groups.len(), 1);

        let labels: Vec<&str> = groups[0]
            .iter()
            .filter_map(|block| match block {
                Block::Bar(bar) => Some(bar.label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0], "Impacted Teeth");
        assert_eq!(labels[5], "Sinus Pathology");
        assert!(!section.blocks().iter().any(|block| matches!(block, Block::Bar(_))));
    }

    #[test]
    fn bullets_carry_a_coloured_dot() {
        let section = build_announcement(&StyleSheet::new());
        let bullets = section
            .blocks()
            .iter()
            .filter(|block| {
                matches!(block, Block::Text(text) if text.markup.starts_with("[color=#4A39C0]{\u{2022}}"))
            })
            .count();
        assert_eq!(bullets, FACTS.len());
    }
}
