use clap::{Parser, Subcommand};
use quillpress::{config, generate, output, scan};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "quillpress")]
#[command(about = "Static blog generator for plain-text posts")]
#[command(long_about = "\
Static blog generator for plain-text posts

Every .md file in the source directory becomes an HTML page, and an index
page lists all posts newest first.

Post format:

  ---
  title: Notes on Parsing          # optional, else first '# heading', else filename
  date: 2025-01-14                 # optional, else file modification time
  authors:
  - ada lovelace
  - charles babbage
  tags:
  - parsing
  ---
  Body text with **strong**, *emphasis*, `code` and [links](https://example.com).

  ## Headings

  - and bullet lists

Run 'quillpress gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing the posts
    #[arg(long, default_value = "blog", global = true)]
    source: PathBuf,

    /// Output directory (defaults to the source directory)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".quillpress-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse all posts into a manifest
    Scan,
    /// Produce HTML pages from a previously written manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate all posts without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let output_dir = cli.output.clone().unwrap_or_else(|| cli.source.clone());

    match cli.command {
        Command::Scan => {
            let manifest = run_scan(&cli.source, &output_dir)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Manifest written to {}", manifest_path.display());
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let (manifest, _report) = generate::generate(&manifest_path, &output_dir)?;
            output::print_generate_output(&manifest);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = run_scan(&cli.source, &output_dir)?;
            output::print_scan_output(&manifest, &cli.source);
            if manifest.collection.is_empty() {
                println!("==> No posts found, nothing to generate");
                return Ok(());
            }

            println!("==> Stage 2: Generating HTML → {}", output_dir.display());
            generate::write_site(&manifest, &output_dir)?;
            output::print_generate_output(&manifest);

            println!("==> Build complete: {}", output_dir.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = run_scan(&cli.source, &output_dir)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Size the rayon pool from config, then scan with that same config.
fn run_scan(
    source: &Path,
    output_dir: &Path,
) -> Result<scan::Manifest, Box<dyn std::error::Error>> {
    let blog_config = config::load_config(source)?;
    init_thread_pool(&blog_config.processing);
    Ok(scan::scan_with_config(source, output_dir, blog_config)?)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

fn write_manifest(
    manifest: &scan::Manifest,
    temp_dir: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}
