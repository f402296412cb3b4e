use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use super::seeds::SeedInfo;
use super::simulation::{DriveRecord, StrategyAggregate};

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    seeds: &'a [SeedInfo],
    iterations: usize,
    aggregates: &'a [StrategyAggregate],
    drives: &'a [DriveRecord],
}

fn percent(rate: f64) -> f64 {
    rate * 100.0
}

pub fn generate_console_report(
    out: &mut dyn Write,
    aggregates: &[StrategyAggregate],
    records: &[DriveRecord],
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Drive Simulation Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "===========================".cyan())?;
    writeln!(out, "Total drives: {}", records.len())?;
    writeln!(out)?;

    for aggregate in aggregates {
        writeln!(out, "{}", aggregate.strategy.label().bold())?;
        writeln!(
            out,
            "   Touchdowns: {} ({:.1}%)",
            aggregate.touchdowns.to_string().green(),
            percent(aggregate.touchdown_rate)
        )?;
        writeln!(
            out,
            "   Out of plays: {:.1}%",
            percent(aggregate.out_of_plays_rate)
        )?;
        writeln!(
            out,
            "   Avg plays used: {:.2} | Avg final yard line: {:.1} | Avg net yards: {:.1}",
            aggregate.mean_plays_used, aggregate.mean_final_position, aggregate.mean_net_yards
        )?;
        writeln!(
            out,
            "   Fumbles: {} ({:.2} per drive)",
            aggregate.fumbles.to_string().red(),
            aggregate.fumbles_per_drive
        )?;
        writeln!(out)?;
    }

    if let Some(best) = aggregates
        .iter()
        .max_by(|a, b| a.touchdown_rate.total_cmp(&b.touchdown_rate))
    {
        writeln!(out, "{}", "🏈 Best Strategy".bright_yellow().bold())?;
        writeln!(out, "{}", "================".yellow())?;
        writeln!(
            out,
            "{} ({:.1}% touchdowns)",
            best.strategy.label().green(),
            percent(best.touchdown_rate)
        )?;
    }
    Ok(())
}

pub fn generate_json_report(
    out: &mut dyn Write,
    seeds: &[SeedInfo],
    iterations: usize,
    aggregates: &[StrategyAggregate],
    records: &[DriveRecord],
) -> Result<()> {
    let report = JsonReport {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        seeds,
        iterations,
        aggregates,
        drives: records,
    };
    let json_output = serde_json::to_string_pretty(&report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    seeds: &[SeedInfo],
    aggregates: &[StrategyAggregate],
    records: &[DriveRecord],
) -> Result<()> {
    writeln!(out, "# Gridiron Drive Simulation\n")?;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total drives**: {}", records.len())?;
    let labels: Vec<String> = seeds.iter().map(SeedInfo::label).collect();
    writeln!(out, "- **Seeds**: {}\n", labels.join(", "))?;

    writeln!(out, "## Strategies\n")?;
    writeln!(
        out,
        "| Strategy | Drives | Touchdown % | Out of plays % | Avg plays | Avg yard line | Fumbles |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|")?;
    for aggregate in aggregates {
        writeln!(
            out,
            "| {} | {} | {:.1} | {:.1} | {:.2} | {:.1} | {} |",
            aggregate.strategy.label(),
            aggregate.drives,
            percent(aggregate.touchdown_rate),
            percent(aggregate.out_of_plays_rate),
            aggregate.mean_plays_used,
            aggregate.mean_final_position,
            aggregate.fumbles
        )?;
    }
    writeln!(out)?;
    Ok(())
}
