// src/report.rs
// =============================================================================
// Turns a BatchReport into something a person (or a script) can read.
//
// - Table mode: results sorted by page count, a summary block, and a list of
//   domains that came back with no pages
// - JSON mode: the same data as one JSON document on stdout
// =============================================================================

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;

use crate::batch::{BatchReport, DomainResult, Summary};

// Shape of the --json output
#[derive(Serialize)]
struct JsonReport<'a> {
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    elapsed_secs: f64,
    timed_out: bool,
    summary: Summary,
    results: Vec<&'a DomainResult>,
}

// Prints the results either as a table or JSON
pub fn print_report(report: &BatchReport, json: bool) -> Result<()> {
    if json {
        println!("{}", render_json(report)?);
    } else {
        print!("{}", render_table(report));
    }
    Ok(())
}

pub fn render_json(report: &BatchReport) -> Result<String> {
    let document = JsonReport {
        started_at: report.started_at,
        finished_at: report.finished_at,
        elapsed_secs: report.elapsed().as_secs_f64(),
        timed_out: report.timed_out,
        summary: report.summary(),
        results: report.sorted_by_pages(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

pub fn render_table(report: &BatchReport) -> String {
    let mut out = String::new();

    // Writing into a String can't fail, so the fmt::Results are ignored
    let _ = writeln!(out, "{:<45} {:>10}  {:<30}", "DOMAIN", "PAGES", "METHOD");
    let _ = writeln!(out, "{}", "=".repeat(87));

    for result in report.sorted_by_pages() {
        let _ = writeln!(
            out,
            "{:<45} {:>10}  {:<30}",
            truncate(result.domain.as_str(), 45),
            format_count(result.pages),
            result.method
        );
    }
    out.push('\n');

    let summary = report.summary();
    let average = summary
        .average_pages
        .map(|avg| format_count(avg.round() as u64))
        .unwrap_or_else(|| "N/A".to_string());

    let _ = writeln!(out, "📊 Summary:");
    let _ = writeln!(out, "   Domains processed: {}", summary.processed);
    let _ = writeln!(out, "   Successful scans:  {}", summary.successful);
    let _ = writeln!(out, "   Total pages found: {}", format_count(summary.total_pages));
    let _ = writeln!(out, "   Average pages:     {}", average);
    let _ = writeln!(out, "   Processing time:   {:.1}s", report.elapsed().as_secs_f64());
    if report.timed_out {
        let _ = writeln!(out, "   ⏱️  Overall time limit reached; unfinished domains marked as Timeout");
    }

    let issues = report.issues();
    if !issues.is_empty() {
        let _ = writeln!(out, "\n⚠️  Issues with {} domain(s):", issues.len());
        for result in issues {
            let _ = writeln!(out, "   {:<45} {}", truncate(result.domain.as_str(), 45), result.method);
        }
    }

    out
}

// 1234567 -> "1,234,567"
fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width - 3).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::normalize;
    use crate::sitemap::{Method, PageEstimate};

    fn sample_report() -> BatchReport {
        let now = Utc::now();
        BatchReport {
            started_at: now,
            finished_at: now + chrono::Duration::seconds(2),
            results: vec![
                DomainResult::new(
                    normalize("small.com").unwrap(),
                    PageEstimate::new(1, Method::HomepageOnly),
                ),
                DomainResult::new(
                    normalize("big.com").unwrap(),
                    PageEstimate::new(12_500, Method::SitemapIndex { sitemaps: 4 }),
                ),
                DomainResult::new(
                    normalize("gone.com").unwrap(),
                    PageEstimate::new(0, Method::DomainInaccessible),
                ),
            ],
            timed_out: false,
        }
    }

    #[test]
    fn test_format_count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_table_lists_biggest_first_and_issues() {
        let table = render_table(&sample_report());
        let big = table.find("big.com").unwrap();
        let small = table.find("small.com").unwrap();
        assert!(big < small);
        assert!(table.contains("12,500"));
        assert!(table.contains("Sitemap index (4 sitemaps)"));
        assert!(table.contains("Total pages found: 12,501"));
        assert!(table.contains("Issues with 1 domain(s)"));
        assert!(table.contains("Domain inaccessible"));
    }

    #[test]
    fn test_json_report_shape() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&sample_report()).unwrap()).unwrap();
        assert_eq!(json["timed_out"], false);
        assert_eq!(json["summary"]["processed"], 3);
        assert_eq!(json["summary"]["successful"], 2);
        assert_eq!(json["summary"]["total_pages"], 12_501);
        assert_eq!(json["results"][0]["domain"], "big.com");
        assert_eq!(json["results"][0]["method"], "Sitemap index (4 sitemaps)");
        assert_eq!(json["elapsed_secs"], 2.0);
    }

    #[test]
    fn test_long_domains_are_truncated() {
        assert_eq!(truncate("abcdef", 10), "abcdef");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }
}
