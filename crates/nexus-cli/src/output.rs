//! Terminal output formatting.

use colored::Colorize;
use nexus_core::{MarketIntelligenceReport, ReportSource};

/// Print a short human-readable summary of a report.
pub fn print_report_summary(report: &MarketIntelligenceReport) {
    let integrity = &report.data_integrity;
    let source = match integrity.source {
        ReportSource::Llm => "LLM".green(),
        ReportSource::Fallback => "FALLBACK".yellow(),
    };

    println!("{}", report.niche_name.cyan().bold());
    println!("{}", "─".repeat(72));
    println!("  {}: {}", "Source".bold(), source);
    println!("  {}: {}", "Quantitative data".bold(), integrity.quantitative.as_str().yellow());
    if let Some(model) = &integrity.model {
        println!("  {}: {}", "Model".bold(), model);
    }
    if let Some(cause) = &integrity.fallback_cause {
        println!("  {}: {}", "Fallback cause".bold(), cause.dimmed());
    }

    println!();
    println!("{:<4} {:<34} {:>9} {:>9} {:>6}", "#", "Product", "Price", "Reviews", "Rating");
    println!("{}", "-".repeat(66));
    for p in &report.top_10_products {
        println!(
            "{:<4} {:<34} {:>9} {:>9} {:>6}",
            p.rank,
            truncate(&p.name, 32),
            format!("${:.2}", p.price),
            p.reviews,
            format!("{:.1}", p.rating)
        );
    }

    println!();
    println!("{}", "Trends".bold());
    for trend in &report.trends {
        println!("  {} {}", "•".dimmed(), trend.title);
    }

    println!();
    println!("{}", "Top keywords".bold());
    for kw in report.keywords.iter().take(5) {
        println!("  {} {} ({}, {})", "•".dimmed(), kw.term, kw.volume, kw.trend);
    }
}

/// Truncate to `max` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Pro Yoga 360", 32), "Pro Yoga 360");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("cepillo eléctrico", 10), "cepillo...");
    }
}
