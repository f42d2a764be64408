use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use facilities_index::cli::Args;
use facilities_index::models::Facility;
use facilities_index::{FacilitiesIndex, LoadOptions, LoadStats};
use std::process;

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    if let Err(error) = run(&args) {
        eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let options = LoadOptions {
        show_progress: !args.json,
        ..Default::default()
    };

    let (index, stats) = FacilitiesIndex::load(&args.dataset_path, &options)
        .with_context(|| format!("failed to load dataset {}", args.dataset_path.display()))?;

    if !args.json {
        print_summary(&stats);
    }

    let results: Vec<&Facility> = if let Some(id) = &args.id {
        index.resolve(id).into_iter().collect()
    } else if let Some(prefix) = &args.geohash {
        index.nearby_hash(prefix).collect()
    } else if let Some((latitude, longitude)) = args.parse_point()? {
        index.nearby_point(latitude, longitude)?.collect()
    } else {
        return Ok(());
    };

    let limit = args.limit.unwrap_or(usize::MAX);
    let shown: Vec<&Facility> = results.into_iter().take(limit).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else if shown.is_empty() {
        println!("{}", "No facilities matched the query.".bright_yellow());
    } else {
        for facility in &shown {
            println!(
                "  {:<10} {:<44} {:<16} {}",
                facility.key.id.bright_yellow(),
                facility.name.bright_cyan(),
                facility.location.address.city,
                facility.location.hash.bright_black()
            );
        }
        println!();
        println!("{} facilities matched.", shown.len());
    }

    Ok(())
}

fn print_summary(stats: &LoadStats) {
    println!(
        "{} {} facilities from {} lines ({} geohash buckets) in {:.2}s",
        "Loaded".bright_green().bold(),
        stats.facilities_loaded,
        stats.lines_read,
        stats.bucket_count,
        stats.load_duration.as_secs_f64()
    );
}
