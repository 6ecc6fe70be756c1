//! Single-signal inspection commands.

use chrono::{DateTime, Utc};
use console::style;

use verus::config::Settings;
use verus::services::age::{age_in_days, format_age};
use verus::services::date_detection::detect_date_with_min_year;
use verus::services::tech_detection::{scan_debt, scan_modern, LEGACY_PATTERNS, MODERN_PATTERNS};
use verus::services::url_classification::{
    detect_platform, is_authority_domain, AUTHORITY_DOMAINS, PLATFORM_PATTERNS,
};

/// Show the date detected for a snippet and URL.
pub fn cmd_date(
    settings: &Settings,
    text: &str,
    url: Option<&str>,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let Some(finding) = detect_date_with_min_year(text, url, now, settings.url_min_year) else {
        println!("{} No date found", style("!").yellow());
        return Ok(());
    };

    let days = age_in_days(finding.date, now).max(0);
    println!(
        "{} {} (source: {})",
        style("✓").green(),
        finding.date.format("%Y-%m-%d"),
        finding.source.as_str()
    );
    println!(
        "  Age: {} ({} days, {})",
        format_age(days),
        days,
        settings.age_thresholds.classify(days).as_str()
    );
    Ok(())
}

/// Show technology findings for a piece of text.
pub fn cmd_scan(text: &str) -> anyhow::Result<()> {
    let debt = scan_debt(text);
    let modern = scan_modern(text);

    if debt.is_empty() && modern.is_empty() {
        println!("{} No technology signals found", style("!").yellow());
        return Ok(());
    }

    if !debt.is_empty() {
        println!("{}", style("Legacy").bold());
        for finding in &debt {
            let severity = finding.severity.map(|s| s.as_str()).unwrap_or("-");
            println!("  {:<8} {:<28} {}", severity, finding.term, finding.label);
        }
    }

    if !modern.is_empty() {
        println!("{}", style("Modern").bold());
        for finding in &modern {
            println!("  {:<28} {}", finding.term, finding.label);
        }
    }
    Ok(())
}

/// Show the authority and platform classification of a URL.
pub fn cmd_url(url: &str) -> anyhow::Result<()> {
    let authority = is_authority_domain(url);
    let platform = detect_platform(Some(url));

    println!(
        "Official docs: {}",
        if authority {
            style("yes").green()
        } else {
            style("no").dim()
        }
    );
    match platform {
        Some(p) => println!("Platform:      {} ({})", p.label, p.platform.as_str()),
        None => println!("Platform:      {}", style("none").dim()),
    }
    Ok(())
}

/// List the built-in tables.
pub fn cmd_patterns() -> anyhow::Result<()> {
    println!("\n{}", style("Legacy patterns").bold());
    println!("{}", "-".repeat(60));
    println!("{:<28} {:<8} Label", "Term", "Severity");
    for p in LEGACY_PATTERNS {
        let severity = p.severity.map(|s| s.as_str()).unwrap_or("-");
        println!("{:<28} {:<8} {}", format!("{:?}", p.term), severity, p.label);
    }

    println!("\n{}", style("Modern patterns").bold());
    println!("{}", "-".repeat(60));
    for p in MODERN_PATTERNS {
        println!("{:<28} {}", format!("{:?}", p.term), p.label);
    }

    println!("\n{}", style("Authority domains").bold());
    println!("{}", "-".repeat(60));
    for domain in AUTHORITY_DOMAINS {
        println!("{}", domain);
    }

    println!("\n{}", style("Platforms").bold());
    println!("{}", "-".repeat(60));
    for (platform, pattern) in PLATFORM_PATTERNS.iter() {
        println!("{:<16} {}", platform.label(), pattern.as_str());
    }
    Ok(())
}
