//! Market-intelligence report.
//!
//! Holds the report model and the structural invariants both generation
//! paths must satisfy.

pub mod model;

pub use model::*;

/// Number of rows in the competitor matrix.
pub const PRODUCT_COUNT: usize = 10;
/// Number of trends.
pub const TREND_COUNT: usize = 4;
/// Number of search keywords.
pub const KEYWORD_COUNT: usize = 10;
/// Number of pain keywords in social listening.
pub const PAIN_KEYWORD_COUNT: usize = 5;
/// Number of competitor gaps in social listening.
pub const COMPETITOR_GAP_COUNT: usize = 3;
/// Number of ideas per content lens.
pub const CONTENT_IDEA_COUNT: usize = 3;

impl MarketIntelligenceReport {
    /// Check rank, count and range invariants.
    ///
    /// Returns one message per violation; an empty list means the report is
    /// structurally valid.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();

        check_count(&mut violations, "top_10_products", self.top_10_products.len(), PRODUCT_COUNT);
        check_count(&mut violations, "trends", self.trends.len(), TREND_COUNT);
        check_count(&mut violations, "keywords", self.keywords.len(), KEYWORD_COUNT);
        check_count(
            &mut violations,
            "social_listening.pain_keywords",
            self.social_listening.pain_keywords.len(),
            PAIN_KEYWORD_COUNT,
        );
        check_count(
            &mut violations,
            "social_listening.competitor_gaps",
            self.social_listening.competitor_gaps.len(),
            COMPETITOR_GAP_COUNT,
        );
        check_count(
            &mut violations,
            "content_opportunities.garyvee_style",
            self.content_opportunities.garyvee_style.len(),
            CONTENT_IDEA_COUNT,
        );
        check_count(
            &mut violations,
            "content_opportunities.patel_style",
            self.content_opportunities.patel_style.len(),
            CONTENT_IDEA_COUNT,
        );

        for (i, entry) in self.top_10_products.iter().enumerate() {
            let expected = i as u32 + 1;
            if entry.rank != expected {
                violations.push(format!(
                    "top_10_products[{}]: rank {} (expected {})",
                    i, entry.rank, expected
                ));
            }
            if !(entry.price.is_finite() && entry.price > 0.0) {
                violations.push(format!("top_10_products[{}]: price {} is not positive", i, entry.price));
            }
            if !(0.0..=5.0).contains(&entry.rating) {
                violations.push(format!("top_10_products[{}]: rating {} outside [0, 5]", i, entry.rating));
            }
        }

        violations
    }

    /// Whether every structural invariant holds.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Downgrade any `VERIFIED` claim to `ESTIMATED`.
    ///
    /// Generated data is never verified; only ingested evidence files can
    /// carry that tag.
    pub fn mark_estimated(&mut self) {
        for entry in &mut self.top_10_products {
            if entry.provenance == Provenance::Verified {
                entry.provenance = Provenance::Estimated;
            }
        }
        if self.data_integrity.quantitative == Provenance::Verified {
            self.data_integrity.quantitative = Provenance::Estimated;
        }
    }
}

fn check_count(violations: &mut Vec<String>, field: &str, actual: usize, expected: usize) {
    if actual != expected {
        violations.push(format!("{}: {} entries (expected {})", field, actual, expected));
    }
}
