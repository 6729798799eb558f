use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;

use apod_archive::assets::DirectoryAssetSink;
use apod_archive::cli::commands::RangeArgs;
use apod_archive::cli::{Cli, Commands};
use apod_archive::config::Config;
use apod_archive::domain::{DateRange, ResultSet};
use apod_archive::logging;
use apod_archive::services::{FetchService, ReconcileOptions, ReconcileService, ReconcileSummary};
use apod_archive::sources::ApodApiSource;
use apod_archive::storage::{read_result_set, write_result_set};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Load configuration
    let config = Config::from_env()?;

    match cli.command {
        Commands::Fetch {
            range,
            output,
            image_dir,
            skip_images,
            strict,
            dry_run,
        } => {
            let mut config = config;
            if let Some(output) = output {
                config.output_path = output;
            }
            if let Some(dir) = image_dir {
                config.image_dir = dir;
            }
            if dry_run {
                return cmd_plan(&range, &config, true);
            }
            cmd_fetch(&range, &config, skip_images, strict)
        }
        Commands::Images {
            input,
            image_dir,
            clean,
            clean_output,
        } => {
            let mut config = config;
            if let Some(dir) = image_dir {
                config.image_dir = dir;
            }
            let input = input.unwrap_or_else(|| config.output_path.clone());
            cmd_images(&input, &config, clean, clean_output)
        }
        Commands::Plan { range } => cmd_plan(&range, &config, false),
    }
}

fn resolve_range(args: &RangeArgs, config: &Config) -> anyhow::Result<(DateRange, u32)> {
    let range = DateRange::new(args.start, args.end)?;
    let max_chunk_days = args.max_chunk_days.unwrap_or(config.max_chunk_days);
    Ok((range, max_chunk_days))
}

fn cmd_plan(args: &RangeArgs, config: &Config, dry_run: bool) -> anyhow::Result<()> {
    let (range, max_chunk_days) = resolve_range(args, config)?;
    let service = FetchService::new(ApodApiSource::from_config(config)?, max_chunk_days);
    let chunks = service.plan(&range);

    println!(
        "{} ({} days) in {} requests of at most {} days:\n",
        range,
        range.span_days() + 1,
        chunks.len(),
        max_chunk_days.saturating_add(1)
    );
    for (i, chunk) in chunks.iter().enumerate() {
        println!("  {}. {} to {}", i + 1, chunk.start(), chunk.end());
    }

    if dry_run {
        println!();
        println!("[DRY RUN] Source: {}", config.api_url);
        println!("[DRY RUN] Output: {}", config.output_path.display());
        println!("[DRY RUN] Images: {}", config.image_dir.display());
    }

    Ok(())
}

fn cmd_fetch(
    args: &RangeArgs,
    config: &Config,
    skip_images: bool,
    strict: bool,
) -> anyhow::Result<()> {
    let (range, max_chunk_days) = resolve_range(args, config)?;
    let source = ApodApiSource::from_config(config)?;
    let service = FetchService::new(source, max_chunk_days);

    println!("Fetching {} from {}...\n", range, config.api_url);

    let report = service.fetch(&range);
    let missing_days = report.missing_days();
    let (records, failures) = match report.into_result() {
        Ok(records) => (records, Vec::new()),
        Err(partial) => (partial.records, partial.failures),
    };

    if !failures.is_empty() {
        println!(
            "Failed {} chunks ({} days not covered):",
            failures.len(),
            missing_days
        );
        for failure in &failures {
            println!("  ! {}: {}", failure.range, failure.error);
        }
        println!();
    }

    if records.is_empty() {
        println!("No data was downloaded.");
    } else {
        write_result_set(&config.output_path, &records)
            .with_context(|| format!("Failed to write {}", config.output_path.display()))?;

        if failures.is_empty() {
            println!(
                "Successfully downloaded and saved all data to {}",
                config.output_path.display()
            );
        } else {
            println!(
                "Saved {} records to {} (partial coverage)",
                records.len(),
                config.output_path.display()
            );
        }

        if !skip_images {
            println!("\nDownloading images to {}...", config.image_dir.display());
            let summary = reconcile_service(config, false).reconcile(records.as_slice());
            print_summary(&summary);
        }
    }

    if strict && !failures.is_empty() {
        bail!("{} of the requested days could not be fetched", missing_days);
    }

    Ok(())
}

fn cmd_images(
    input: &Path,
    config: &Config,
    clean: bool,
    clean_output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let records = read_result_set(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    if records.is_empty() {
        println!("No records in {}.", input.display());
        return Ok(());
    }

    println!(
        "Reconciling {} records against {}...",
        records.len(),
        config.image_dir.display()
    );

    let service = reconcile_service(config, clean);

    if !clean {
        let summary = service.reconcile(records.as_slice());
        print_summary(&summary);
        return Ok(());
    }

    let (kept, summary): (ResultSet, ReconcileSummary) = service.reconcile_clean(records.into_vec());
    print_summary(&summary);

    let output = clean_output.unwrap_or_else(|| input.with_extension("clean.json"));
    write_result_set(&output, &kept)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Saved {} records with valid images to {}", kept.len(), output.display());

    Ok(())
}

fn reconcile_service(config: &Config, clean: bool) -> ReconcileService<DirectoryAssetSink> {
    let options = ReconcileOptions {
        prefer_hd: config.prefer_hd,
        verify: clean || config.verify_images,
    };
    ReconcileService::new(DirectoryAssetSink::from_config(config), options)
}

fn print_summary(summary: &ReconcileSummary) {
    println!("  Downloaded:      {}", summary.stored);
    println!("  Already present: {}", summary.already_present);
    println!("  Not an image:    {}", summary.not_image);
    println!("  Missing url:     {}", summary.missing_url);
    println!("  Missing date:    {}", summary.missing_date);
    if summary.failed > 0 {
        println!("  Failed:          {}", summary.failed);
    }
    if summary.corrupt > 0 {
        println!("  Corrupt:         {}", summary.corrupt);
    }
}
