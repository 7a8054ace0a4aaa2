//! Schema fallback synthesizer.
//!
//! Builds a complete report from the description alone: tokens drive the
//! niche and brand names, fixed templates fill the narrative, and numeric
//! fields are drawn from bounded ranges.

pub mod templates;

use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use tracing::info;

use crate::config::SeedPolicy;
use crate::error::GenerationFault;
use crate::report::{CompetitorEntry, DataIntegrity, MarketIntelligenceReport, Provenance, PRODUCT_COUNT};
use templates::TemplateContext;

/// Format and boilerplate words that never name a product.
pub const STOP_WORDS: &[&str] = &[
    "PDF", "XLSX", "DOCX", "GOOGLE", "DRIVE", "FILE", "ANALYSIS", "BATCH", "FOLDER", "THE", "AND",
    "FOR", "WITH",
];

/// Maximum number of tokens kept from the description.
pub const MAX_CLEAN_TOKENS: usize = 5;

pub const PRICE_RANGE: std::ops::RangeInclusive<f64> = 15.0..=150.0;
pub const REVIEWS_RANGE: std::ops::RangeInclusive<u64> = 500..=50_000;
pub const RATING_FLOOR: f64 = 4.0;
pub const RATING_SPREAD: f64 = 0.8;

const NICHE_SUFFIX: &str = "Market";
const GENERIC_NICHE: &str = "Specialized";
const GENERIC_BASE: &str = "Product";
const GENERIC_SECONDARY: &str = "Home";

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]{3,}").expect("valid regex"));

/// Alphabetic tokens of length ≥ 3, stop words removed, title-cased, at most five.
pub fn extract_clean_tokens(description: &str) -> Vec<String> {
    let upper = description.to_uppercase();
    TOKEN
        .find_iter(&upper)
        .map(|m| m.as_str())
        .filter(|token| !STOP_WORDS.contains(token))
        .map(title_case)
        .take(MAX_CLEAN_TOKENS)
        .collect()
}

/// Human-readable niche name.
///
/// More than three words: the first four plus `Market`. Otherwise the first
/// clean token (or `Specialized`) plus `Products`.
pub fn niche_name(description: &str, clean_tokens: &[String]) -> String {
    let words: Vec<&str> = description.split_whitespace().collect();
    if words.len() > 3 {
        format!("{} {}", words[..4].join(" "), NICHE_SUFFIX)
    } else {
        let head = clean_tokens.first().map(String::as_str).unwrap_or(GENERIC_NICHE);
        format!("{} Products", head)
    }
}

/// Stable 64-bit FNV-1a hash, identical across builds and platforms.
pub fn seed_for(description: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    description
        .bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Synthesizes reports without any external dependency.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackSynthesizer {
    seed_policy: SeedPolicy,
}

impl FallbackSynthesizer {
    pub fn new(seed_policy: SeedPolicy) -> Self {
        Self { seed_policy }
    }

    pub fn seed_policy(&self) -> SeedPolicy {
        self.seed_policy
    }

    /// Build a schema-complete report for `description`.
    ///
    /// `cause` is the fault that sent the request here, if any; it is
    /// recorded in the report's provenance block.
    pub fn synthesize(
        &self,
        description: &str,
        cause: Option<&GenerationFault>,
    ) -> MarketIntelligenceReport {
        let clean_tokens = extract_clean_tokens(description);
        let niche_name = niche_name(description, &clean_tokens);
        let ctx = TemplateContext {
            base: clean_tokens.first().cloned().unwrap_or_else(|| GENERIC_BASE.to_string()),
            secondary: clean_tokens.get(1).cloned().unwrap_or_else(|| GENERIC_SECONDARY.to_string()),
            niche_name: niche_name.clone(),
        };

        let mut rng = match self.seed_policy {
            SeedPolicy::FromInput => StdRng::seed_from_u64(seed_for(description)),
            SeedPolicy::Entropy => StdRng::from_entropy(),
        };

        let gap = templates::gap(&ctx);
        let top_10_products: Vec<CompetitorEntry> = (0..PRODUCT_COUNT)
            .map(|i| CompetitorEntry {
                rank: i as u32 + 1,
                name: templates::brand_name(i, &ctx.base),
                price: round_to(rng.gen_range(PRICE_RANGE), 2),
                reviews: rng.gen_range(REVIEWS_RANGE),
                rating: round_to(RATING_FLOOR + rng.gen::<f64>() * RATING_SPREAD, 1),
                advantage: templates::advantage(i),
                vulnerability: templates::VULNERABILITIES[i].to_string(),
                gap: gap.clone(),
                provenance: Provenance::Estimated,
            })
            .collect();

        let competitor_names: Vec<String> = top_10_products.iter().map(|p| p.name.clone()).collect();

        let report = MarketIntelligenceReport {
            social_listening: templates::social_listening(&ctx, &competitor_names),
            content_opportunities: templates::content_opportunities(&ctx),
            trends: templates::trends(),
            keywords: templates::keywords(&ctx),
            sales_intelligence: templates::sales_intelligence(),
            sentiment_summary: templates::sentiment_summary(&ctx),
            scholar_audit: templates::scholar_audit(),
            data_integrity: DataIntegrity::from_fallback(cause.map(|f| f.to_string())),
            niche_name,
            top_10_products,
        };

        info!(
            niche = %report.niche_name,
            tokens = clean_tokens.len(),
            seed_policy = ?self.seed_policy,
            cause = cause.map(|f| f.kind()).unwrap_or("none"),
            "Synthesized fallback report"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportSource;

    #[test]
    fn test_clean_tokens_drop_stop_words() {
        assert_eq!(
            extract_clean_tokens("Electric Toothbrush For Sensitive Gums"),
            vec!["Electric", "Toothbrush", "Sensitive", "Gums"]
        );
        assert_eq!(
            extract_clean_tokens("analysis of the GOOGLE DRIVE folder: yoga mat pdf"),
            vec!["Yoga", "Mat"]
        );
    }

    #[test]
    fn test_clean_tokens_capped_and_short_words_skipped() {
        let tokens = extract_clean_tokens("red big alpha beta gamma delta epsilon zeta");
        assert_eq!(tokens, vec!["Red", "Big", "Alpha", "Beta", "Gamma"]);
        assert!(extract_clean_tokens("a an 12 of").is_empty());
    }

    #[test]
    fn test_niche_name_rules() {
        let desc = "Electric Toothbrush For Sensitive Gums";
        let tokens = extract_clean_tokens(desc);
        assert_eq!(niche_name(desc, &tokens), "Electric Toothbrush For Sensitive Market");

        let tokens = extract_clean_tokens("Yoga Mat");
        assert_eq!(niche_name("Yoga Mat", &tokens), "Yoga Products");
        assert_eq!(niche_name("", &[]), "Specialized Products");
    }

    #[test]
    fn test_seed_is_stable() {
        assert_eq!(seed_for(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(seed_for("a"), 0xaf63_dc4c_8601_ec8c);
        assert_ne!(seed_for("Yoga Mat"), seed_for("Yoga Mats"));
    }

    #[test]
    fn test_toothbrush_scenario() {
        let report = FallbackSynthesizer::default().synthesize("Electric Toothbrush For Sensitive Gums", None);

        assert!(report.niche_name.starts_with("Electric Toothbrush For Sensitive"));
        assert_eq!(report.top_10_products.len(), 10);
        let ranks: Vec<u32> = report.top_10_products.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, (1..=10).collect::<Vec<_>>());
        assert_eq!(report.top_10_products[0].name, "Pro Electric 360");
        assert_eq!(report.top_10_products[9].name, "Vital Electric X");
        assert_eq!(report.top_10_products[1].name, "Elite Electric Max");
        assert!(report.is_valid(), "{:?}", report.validate());
    }

    #[test]
    fn test_empty_description() {
        assert!(extract_clean_tokens("").is_empty());

        let report = FallbackSynthesizer::default().synthesize("", None);
        assert_eq!(report.niche_name, "Specialized Products");
        assert_eq!(report.top_10_products[0].name, "Pro Product 360");
        assert_eq!(report.keywords[2].term, "Product for Home");
        assert!(report.is_valid());
    }

    #[test]
    fn test_numeric_ranges() {
        let synth = FallbackSynthesizer::new(SeedPolicy::Entropy);
        for _ in 0..20 {
            let report = synth.synthesize("Stainless Steel Water Bottle", None);
            for p in &report.top_10_products {
                assert!(PRICE_RANGE.contains(&p.price), "price {}", p.price);
                assert!(REVIEWS_RANGE.contains(&p.reviews));
                assert!((4.0..=4.8).contains(&p.rating), "rating {}", p.rating);
                assert_eq!(round_to(p.price, 2), p.price);
                assert_eq!(p.provenance, Provenance::Estimated);
            }
        }
    }

    #[test]
    fn test_seeded_fallback_is_fully_deterministic() {
        let synth = FallbackSynthesizer::new(SeedPolicy::FromInput);
        let mut a = synth.synthesize("Ceramic Pour Over Coffee Dripper", None);
        let mut b = synth.synthesize("Ceramic Pour Over Coffee Dripper", None);
        a.data_integrity.generated_at.clear();
        b.data_integrity.generated_at.clear();
        assert_eq!(a, b);
    }

    #[test]
    fn test_entropy_fallback_keeps_text_deterministic() {
        let synth = FallbackSynthesizer::new(SeedPolicy::Entropy);
        let a = synth.synthesize("Ceramic Pour Over Coffee Dripper", None);
        let b = synth.synthesize("Ceramic Pour Over Coffee Dripper", None);

        assert_eq!(a.niche_name, b.niche_name);
        let names = |r: &MarketIntelligenceReport| -> Vec<String> {
            r.top_10_products.iter().map(|p| p.name.clone()).collect()
        };
        assert_eq!(names(&a), names(&b));
        assert_eq!(a.social_listening, b.social_listening);
        assert_eq!(a.keywords, b.keywords);
        assert_eq!(a.trends, b.trends);
        assert_eq!(a.sentiment_summary, b.sentiment_summary);
    }

    #[test]
    fn test_records_cause_and_provenance() {
        let fault = GenerationFault::call("timed out after 60s");
        let report = FallbackSynthesizer::default().synthesize("Dog Bed", Some(&fault));
        assert_eq!(report.data_integrity.source, ReportSource::Fallback);
        assert_eq!(report.data_integrity.quantitative, Provenance::Estimated);
        assert_eq!(
            report.data_integrity.fallback_cause.as_deref(),
            Some("Model call failed: timed out after 60s")
        );
    }

    #[test]
    fn test_vulnerabilities_are_distinct() {
        let mut report = FallbackSynthesizer::default().synthesize("Wooden Spice Rack Organizer", None);
        assert!(!crate::rules::flag_generic_vulnerabilities(&mut report.top_10_products));
    }
}
