//! Prompt construction for the market-intelligence model call.

use crate::config::{GeneratorConfig, DEFAULT_LANGUAGE};
use crate::report::{
    COMPETITOR_GAP_COUNT, CONTENT_IDEA_COUNT, KEYWORD_COUNT, PAIN_KEYWORD_COUNT, PRODUCT_COUNT,
    TREND_COUNT,
};
use crate::rules;

/// Output schema the model must follow, with the intent of every field.
const REPORT_SCHEMA: &str = r##"{
  "niche_name": "Market category name",
  "top_10_products": [
    {
      "rank": 1,
      "name": "Real competitor product name",
      "price": 29.99,
      "reviews": 15000,
      "rating": 4.5,
      "advantage": "Main competitive advantage",
      "vulnerability": "Weakness specific to THIS product",
      "gap": "Market gap it leaves uncovered"
    }
  ],
  "social_listening": {
    "amazon_review_audit": "Forensic summary of marketplace reviews",
    "pros": ["What buyers praise across the niche"],
    "cons": ["What buyers complain about across the niche"],
    "emotional_analysis": {
      "frustration": "What makes buyers angry",
      "desire": "What buyers truly want",
      "humor": "How the community jokes about the problem",
      "nostalgia": "What buyers miss from older solutions",
      "skepticism": "Which claims buyers no longer believe"
    },
    "pain_keywords": [
      {"keyword": "search term expressing a pain", "volume": "High/Medium/Low/Rising", "search_intent": "Transactional/Informational/Problem-Solving", "opportunity": "Niche Gap/SEO Target/Content Gap"}
    ],
    "competitor_gaps": [
      {"competitor": "Competitor name", "ignored_issue": "Problem they ignore", "user_frustration": "Verbatim-style user complaint"}
    ],
    "white_space_topics": ["Topic nobody covers yet"],
    "cultural_vibe": "Tone and values of the buyer community",
    "tiktok_trends": "Relevant hashtags, creators and formats",
    "reddit_insights": "Dominant opinions in relevant subreddits",
    "youtube_search_gaps": "Searches without good video answers",
    "google_search_insights": "Search demand patterns",
    "consumer_desire": "The product the consumer actually wants"
  },
  "content_opportunities": {
    "garyvee_style": [
      {"idea": "Attention-economy content idea", "format": "Short video format", "hook": "First-second hook", "emotional_trigger": "Emotion it exploits"}
    ],
    "patel_style": [
      {"idea": "SEO content idea", "target_keyword": "Keyword to rank for", "search_intent": "Comparison/Tutorial/Educational", "content_gap": "What existing content misses"}
    ]
  },
  "trends": [
    {"title": "Trend name", "description": "Detailed trend description"}
  ],
  "keywords": [
    {"term": "Search term", "volume": "High/Medium/Low", "trend": "Trending Up/Stable/Emerging", "intent": "Transactional/Informational/Navigational", "difficulty": "Low/Medium/High"}
  ],
  "sales_intelligence": {
    "market_share_by_brand": [
      {"brand": "Leading brand", "share": 30, "status": "Leader/Challenger/Fragmented"}
    ],
    "sub_category_distribution": {"Sub-category": 40},
    "seasonality": {
      "peaks": [{"month": "December", "event": "Holiday", "impact": "High"}],
      "low_points": ["February"],
      "strategy_insight": "Seasonality strategy insight"
    }
  },
  "sentiment_summary": "Overall market sentiment",
  "scholar_audit": [
    {"source": "Academic or industry source", "finding": "Relevant finding", "relevance": "Why it matters for this product"}
  ]
}"##;

/// Renders the instruction payload sent to the model.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    language: String,
    avg_price: Option<f64>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            avg_price: None,
        }
    }
}

impl PromptBuilder {
    pub fn new(language: &str, avg_price: Option<f64>) -> Self {
        Self {
            language: language.to_string(),
            avg_price,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(&config.language, config.avg_price)
    }

    /// Build the full prompt for a product description.
    ///
    /// Pure: the same description always yields the same payload.
    pub fn build(&self, description: &str) -> String {
        let product = rules::sanitize_product_name(description);
        let rules_block = rules::system_rules_block(&product, self.avg_price);
        let language = &self.language;

        format!(
            r#"{rules_block}

You are an expert Amazon market-intelligence analyst working with two lenses at once:
- QUANTITATIVE / SEO lens (Neil Patel style): search demand, keyword intent, ranking difficulty, pricing and review metrics of real competitors.
- QUALITATIVE / ATTENTION lens (Gary Vaynerchuk style): what communities on TikTok, Reddit and YouTube feel, joke about and fail to find.

Analyze this product and produce a detailed competitive analysis:

PRODUCT: "{description}"

Answer with a JSON object that follows EXACTLY this structure:

{REPORT_SCHEMA}

HARD RULES:
- "top_10_products": exactly {PRODUCT_COUNT} entries, ranks 1 to {PRODUCT_COUNT} in ascending order, real brands sold on Amazon, prices in USD greater than 0, reviews as whole numbers, rating between 0 and 5.
- "trends": exactly {TREND_COUNT} entries.
- "keywords": exactly {KEYWORD_COUNT} entries.
- "social_listening.pain_keywords": exactly {PAIN_KEYWORD_COUNT} entries.
- "social_listening.competitor_gaps": exactly {COMPETITOR_GAP_COUNT} entries.
- "content_opportunities.garyvee_style" and "content_opportunities.patel_style": exactly {CONTENT_IDEA_COUNT} entries each.
- Every key shown above is mandatory. Do not add or omit keys.
- Write every narrative text in {language}. Keys, numbers and enumerated labels stay as shown.
- Be specific; no generic placeholders.
- Respond ONLY with the JSON object, no additional text."#
        )
    }
}
