//! Market-intelligence report domain model.
//!
//! The shape is closed: every field without `#[serde(default)]` must be
//! present when a report is deserialized, so a model answer that drops a
//! key fails to parse instead of producing a partial report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Complete report for one product description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketIntelligenceReport {
    pub niche_name: String,
    pub top_10_products: Vec<CompetitorEntry>,
    pub social_listening: SocialListening,
    pub content_opportunities: ContentOpportunities,
    pub trends: Vec<Trend>,
    pub keywords: Vec<Keyword>,
    pub sales_intelligence: SalesIntelligence,
    pub sentiment_summary: String,
    pub scholar_audit: Vec<ScholarFinding>,
    /// Filled by the generator, never trusted from model output.
    #[serde(default, skip_deserializing)]
    pub data_integrity: DataIntegrity,
}

/// One row of the competitor matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorEntry {
    pub rank: u32,
    pub name: String,
    pub price: f64,
    pub reviews: u64,
    pub rating: f64,
    #[serde(alias = "adv")]
    pub advantage: String,
    #[serde(alias = "vuln")]
    pub vulnerability: String,
    pub gap: String,
    #[serde(default)]
    pub provenance: Provenance,
}

/// Social-listening signals across review sites and social platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialListening {
    pub amazon_review_audit: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub emotional_analysis: EmotionalAnalysis,
    pub pain_keywords: Vec<PainKeyword>,
    pub competitor_gaps: Vec<CompetitorGap>,
    pub white_space_topics: Vec<String>,
    pub cultural_vibe: String,
    pub tiktok_trends: String,
    pub reddit_insights: String,
    pub youtube_search_gaps: String,
    pub google_search_insights: String,
    pub consumer_desire: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalAnalysis {
    pub frustration: String,
    pub desire: String,
    pub humor: String,
    pub nostalgia: String,
    pub skepticism: String,
}

/// Search term that expresses a customer pain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PainKeyword {
    pub keyword: String,
    pub volume: String,
    pub search_intent: String,
    pub opportunity: String,
}

/// An issue a competitor leaves unresolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorGap {
    pub competitor: String,
    pub ignored_issue: String,
    pub user_frustration: String,
}

/// Content ideas under the two analytical lenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentOpportunities {
    /// Attention-economy ideas: short video, emotional hook.
    pub garyvee_style: Vec<AttentionIdea>,
    /// SEO ideas: keyword-targeted long-form content.
    pub patel_style: Vec<SeoIdea>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionIdea {
    pub idea: String,
    pub format: String,
    pub hook: String,
    pub emotional_trigger: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoIdea {
    pub idea: String,
    pub target_keyword: String,
    pub search_intent: String,
    pub content_gap: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub volume: String,
    pub trend: String,
    pub intent: String,
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesIntelligence {
    pub market_share_by_brand: Vec<MarketShare>,
    /// Sub-category name to percentage of the niche.
    pub sub_category_distribution: BTreeMap<String, f64>,
    pub seasonality: Seasonality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketShare {
    pub brand: String,
    pub share: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    pub peaks: Vec<SeasonalPeak>,
    pub low_points: Vec<String>,
    pub strategy_insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPeak {
    pub month: String,
    pub event: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarFinding {
    pub source: String,
    pub finding: String,
    pub relevance: String,
}

/// Where a quantitative data point came from.
///
/// `Verified` is reserved for externally ingested evidence files; neither
/// generation path in this crate produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Provenance {
    Verified,
    #[default]
    Estimated,
    Pending,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Verified => "VERIFIED",
            Provenance::Estimated => "ESTIMATED",
            Provenance::Pending => "PENDING",
        }
    }
}

/// Which generation path produced the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportSource {
    Llm,
    #[default]
    Fallback,
}

impl ReportSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportSource::Llm => "LLM",
            ReportSource::Fallback => "FALLBACK",
        }
    }
}

/// Provenance block attached to every report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataIntegrity {
    pub source: ReportSource,
    pub quantitative: Provenance,
    pub qualitative_source: String,
    #[serde(default)]
    pub model: Option<String>,
    /// The fault that routed the request to the fallback path.
    #[serde(default)]
    pub fallback_cause: Option<String>,
    #[serde(default)]
    pub generated_at: String,
}

impl DataIntegrity {
    /// Provenance for a report produced by the hosted model.
    pub fn from_model(model: &str) -> Self {
        Self {
            source: ReportSource::Llm,
            quantitative: Provenance::Estimated,
            qualitative_source: "LLM_ANALYSIS".to_string(),
            model: Some(model.to_string()),
            fallback_cause: None,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Provenance for a synthesized report.
    pub fn from_fallback(cause: Option<String>) -> Self {
        Self {
            source: ReportSource::Fallback,
            quantitative: Provenance::Estimated,
            qualitative_source: "TEMPLATE_SYNTHESIS".to_string(),
            model: None,
            fallback_cause: cause,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
