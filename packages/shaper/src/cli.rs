//! Command-line interface.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use roxmltree::Document;

use crate::config::{default_output_path, StreetTables, DEFAULT_INPUT_PATH};
use crate::convert::{process_map, ConvertOptions, ErrorPolicy};
use crate::error::{Result, ShaperError};
use crate::stats::{check_keys, count_tags};
use crate::street::audit_document;

/// osmclean - Clean OpenStreetMap XML exports into JSON records.
#[derive(Parser)]
#[command(name = "osmclean")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Input file argument shared by every command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct InputArgs {
    /// OSM XML file
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count the elements of each tag name.
    CountTags(InputArgs),

    /// Classify tag keys (lower, lower_colon, problemchars, other).
    CheckKeys(InputArgs),

    /// List street names whose street type is not recognized.
    Audit {
        #[command(flatten)]
        input: InputArgs,

        /// YAML file with street tables (default: built-in tables)
        #[arg(long)]
        streets: Option<PathBuf>,
    },

    /// Clean the elements and write them as JSON lines.
    Convert {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (default: <INPUT>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write indented JSON
        #[arg(long)]
        pretty: bool,

        /// Stop at the first element that cannot be shaped
        #[arg(long)]
        fail_fast: bool,

        /// YAML file with street tables (default: built-in tables)
        #[arg(long)]
        streets: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CountTags(args) => count_tags_command(&args.input),
        Commands::CheckKeys(args) => check_keys_command(&args.input),
        Commands::Audit { input, streets } => audit_command(&input.input, streets.as_deref()),
        Commands::Convert {
            input,
            output,
            pretty,
            fail_fast,
            streets,
        } => {
            let options = ConvertOptions {
                pretty,
                policy: if fail_fast {
                    ErrorPolicy::FailFast
                } else {
                    ErrorPolicy::SkipAndContinue
                },
            };
            convert_command(&input.input, output.as_deref(), streets.as_deref(), options)
        }
    }
}

/// Fail early with a readable message when the input file is missing.
fn ensure_input_file(input: &Path) -> Result<()> {
    if !input.is_file() {
        return Err(ShaperError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input file does not exist: {}", input.display()),
        )));
    }
    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    ensure_input_file(input)?;
    Ok(std::fs::read_to_string(input)?)
}

fn count_tags_command(input: &Path) -> Result<()> {
    println!("{} {}", style("Counting tags in").bold(), style(input.display()).cyan());

    let xml = read_input(input)?;
    let doc = Document::parse(&xml)?;

    for (tag, count) in count_tags(&doc) {
        println!("  {tag}: {}", style(count).green());
    }
    Ok(())
}

fn check_keys_command(input: &Path) -> Result<()> {
    println!("{} {}", style("Checking keys in").bold(), style(input.display()).cyan());

    let xml = read_input(input)?;
    let doc = Document::parse(&xml)?;

    for (category, count) in check_keys(&doc).entries() {
        println!("  {}: {}", category.as_str(), style(count).green());
    }
    Ok(())
}

fn audit_command(input: &Path, streets: Option<&Path>) -> Result<()> {
    let tables = StreetTables::load(streets)?;
    println!("{} {}", style("Auditing street names in").bold(), style(input.display()).cyan());

    let xml = read_input(input)?;
    let doc = Document::parse(&xml)?;
    let audit = audit_document(&doc, &tables);

    if audit.is_empty() {
        println!("  {}", style("All street types are recognized").green());
        return Ok(());
    }

    for (street_type, names) in audit.street_types() {
        println!("  {}", style(street_type).yellow().bold());
        for name in names {
            println!("    {name}");
        }
    }
    Ok(())
}

fn convert_command(
    input: &Path,
    output: Option<&Path>,
    streets: Option<&Path>,
    options: ConvertOptions,
) -> Result<()> {
    let tables = StreetTables::load(streets)?;
    ensure_input_file(input)?;
    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));

    println!(
        "{} {} to {}",
        style("Converting").bold(),
        style(input.display()).cyan(),
        style(output_path.display()).green()
    );

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Shaping elements...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let summary = match process_map(input, &output_path, &tables, options) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Records: {}", style(summary.records).green());
    println!("  Skipped elements: {}", summary.skipped);
    if summary.failed > 0 {
        println!("  Failed: {}", style(summary.failed).yellow().bold());
        for warning in &summary.warnings {
            println!("    {warning}");
        }
    }
    println!();
    println!("{} {}", style("Saved to:").green().bold(), output_path.display());

    Ok(())
}
