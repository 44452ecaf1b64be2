//! glyphline CLI - reading-order text from PDF text blocks

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use glyphline::{ExportOptions, Exporter, JsonSource, LayoutOptions, PageSelection, PageSource};

#[derive(Parser)]
#[command(name = "glyphline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild reading-order text from PDF text blocks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract plain text from a JSON page dump
    Text {
        /// Input JSON page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Process pages one at a time
        #[arg(long)]
        sequential: bool,

        /// Keep bytes outside the printable ASCII range
        #[arg(long)]
        include_special: bool,

        /// Row height used to group text into lines
        #[arg(long, default_value_t = glyphline::layout::DEFAULT_ROW_HEIGHT)]
        row_height: f64,
    },

    /// Print the reading-order placements of one page as JSON
    Layout {
        /// Input JSON page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Keep bytes outside the printable ASCII range
        #[arg(long)]
        include_special: bool,
    },

    /// Show page and font statistics
    Info {
        /// Input JSON page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Text {
            input,
            output,
            pages,
            sequential,
            include_special,
            row_height,
        } => {
            let layout = LayoutOptions::new()
                .with_row_height(row_height)
                .with_special_chars(include_special);
            cmd_text(&input, output.as_deref(), pages.as_deref(), sequential, layout)
        }
        Commands::Layout {
            input,
            page,
            compact,
            include_special,
        } => cmd_layout(&input, page, compact, include_special),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
    sequential: bool,
    layout: LayoutOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = if let Some(p) = pages {
        PageSelection::parse(p)?
    } else {
        PageSelection::All
    };

    let options = ExportOptions::new()
        .with_pages(page_selection)
        .with_parallel(!sequential)
        .with_layout(layout);
    let exporter = Exporter::with_options(JsonSource::open(input)?, options);

    if let Some(path) = output {
        exporter.export_to_file(path)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", exporter.export_to_string()?);
    }

    Ok(())
}

fn cmd_layout(
    input: &Path,
    page: u32,
    compact: bool,
    include_special: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ExportOptions::new().with_special_chars(include_special);
    let exporter = Exporter::with_options(JsonSource::open(input)?, options);
    let placements = exporter.page_placements(page)?;

    let json = if compact {
        serde_json::to_string(&placements)?
    } else {
        serde_json::to_string_pretty(&placements)?
    };
    println!("{}", json);

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = JsonSource::open(input)?;
    let size = fs::metadata(input)?.len();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {} bytes", "Size".bold(), size);
    println!("{}: {}", "Pages".bold(), source.page_count());

    println!();
    println!("{}", "Page Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for page in 1..=source.page_count() {
        let blocks = source.page_text_blocks(page)?;
        let fonts = source.font_definitions(page)?;
        let names: Vec<&str> = fonts.iter().map(|f| f.name.as_str()).collect();
        println!(
            "{} {}: {} blocks, fonts [{}]",
            "Page".bold(),
            page,
            blocks.len(),
            names.join(", ")
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "glyphline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Reading-order text reconstruction for PDF text blocks");
    println!();
    println!("License: MIT");
}
