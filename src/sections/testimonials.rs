use super::Heading;
use crate::model::{Block, Section};
use crate::styles::{StyleId, StyleSheet};
use crate::theme::{BADGE_BG, LIGHT_BG, PRIMARY, TEXT_MUTED};

struct Quote {
    text: &'static str,
    name: &'static str,
    role: &'static str,
}

const QUOTES: [Quote; 2] = [
    Quote {
        text: "\u{201c}The pathology detection has changed my daily practice. Last week, SOJAI flagged a root \
               fracture on a lower first molar that I would have probably diagnosed as irreversible pulpitis. \
               And the PDF reports \u{2014} my patients finally understand what I\u{2019}m showing them. Treatment plan \
               acceptance rates have gone up significantly since we started using the platform.\u{201d}",
        name: "Dr. Sarah Chen",
        role: "Oral Surgeon \u{2014} Boston, MA",
    },
    Quote {
        text: "\u{201c}Integration with our Planmeca CBCT took literally five minutes. But what really sold me \
               is the 3D segmentation: being able to isolate a tooth, trace the root canal in 3D, and \
               export to STL for planning an endo retreatment \u{2014} that\u{2019}s a massive time saver. We\u{2019}ve cut \
               our pre-operative planning time in half.\u{201d}",
        name: "Dr. Emma Larsson",
        role: "Endodontist \u{2014} Stockholm, Sweden",
    },
];

/// Final light page with practitioner quotes and the call to action.
pub fn build_testimonials(styles: &StyleSheet) -> Section {
    let heading = Heading {
        badge: "WHAT PRACTITIONERS SAY",
        badge_style: styles[StyleId::SectionBadge],
        rule_width_mm: 70.0,
        rule_color: PRIMARY,
        title: "Trusted by Dental\nProfessionals Worldwide",
        title_style: styles[StyleId::PageTitle],
        gap_after_title_mm: 5.0,
    };

    let mut blocks = heading.into_blocks();
    for (index, quote) in QUOTES.iter().enumerate() {
        if index > 0 {
            blocks.push(Block::spacer(8.0));
            blocks.push(Block::rule(30.0, BADGE_BG, 1.5));
            blocks.push(Block::spacer(8.0));
        }
        blocks.push(Block::text(styles[StyleId::QuoteText], quote.text));
        blocks.push(Block::spacer(2.0));
        blocks.push(Block::text(styles[StyleId::QuoteName], quote.name));
        blocks.push(Block::text(styles[StyleId::QuoteRole], quote.role));
    }

    let cta_small = styles[StyleId::CtaBody]
        .with_size(10.0)
        .with_color(TEXT_MUTED);

    Section::builder("What Practitioners Say")
        .identifier("testimonials")
        .extend_blocks(blocks)
        .push_block(Block::spacer(15.0))
        .push_block(Block::full_rule(LIGHT_BG, 1.0))
        .push_block(Block::spacer(8.0))
        .push_block(Block::text(
            styles[StyleId::CtaTitle],
            "Ready to Transform Your Practice?",
        ))
        .push_block(Block::text(
            styles[StyleId::CtaBody],
            "Join 10,000+ dental professionals using AI-powered diagnostics.",
        ))
        .push_block(Block::text(
            cta_small,
            "Free 14-day trial  \u{2022}  No credit card required  \u{2022}  HIPAA compliant",
        ))
        .push_block(Block::spacer(8.0))
        .push_block(Block::text(
            styles[StyleId::FooterText],
            "www.sojai.com  |  contact@sojai.com  |  Book a Demo",
        ))
        .build()
}
