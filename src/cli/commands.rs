use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "apod-archive")]
#[command(about = "Fetch APOD records in date chunks and mirror their images locally")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct RangeArgs {
    /// First day to fetch (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Last day to fetch, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// Maximum span of one request in days (overrides APOD_MAX_CHUNK_DAYS)
    #[arg(long)]
    pub max_chunk_days: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch records for a date range, save them as JSON and download images
    Fetch {
        #[command(flatten)]
        range: RangeArgs,

        /// Output JSON file (overrides APOD_OUTPUT_PATH)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Image directory (overrides APOD_IMAGE_DIR)
        #[arg(long)]
        image_dir: Option<PathBuf>,

        /// Save records only, do not download images
        #[arg(long)]
        skip_images: bool,

        /// Exit with an error if any chunk could not be fetched
        #[arg(long)]
        strict: bool,

        /// Dry run - print the request plan without contacting the server
        #[arg(long)]
        dry_run: bool,
    },

    /// Download missing images for a previously saved JSON file
    Images {
        /// JSON file written by `fetch` (defaults to APOD_OUTPUT_PATH)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Image directory (overrides APOD_IMAGE_DIR)
        #[arg(long)]
        image_dir: Option<PathBuf>,

        /// Verify images and write only records with a valid image
        #[arg(long)]
        clean: bool,

        /// Where to write the cleaned records (defaults to <input>.clean.json)
        #[arg(long, requires = "clean")]
        clean_output: Option<PathBuf>,
    },

    /// Show how a date range would be split into requests
    Plan {
        #[command(flatten)]
        range: RangeArgs,
    },
}
