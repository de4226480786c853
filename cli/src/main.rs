//! puremark CLI - Markdown to paginated PDF export tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use puremark::{
    build, BlockToken, EmptyPolicy, ExportOptions, ExporterRegistry, Geometry,
    JsonFormat, LayoutOptions, PageRole, TocPages, TokenizeOptions, Tokenizer, UnsupportedBlocks,
};

#[derive(Parser)]
#[command(name = "puremark")]
#[command(version)]
#[command(about = "Export Markdown to paginated PDF with a table of contents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a Markdown file as PDF, Markdown or JSON
    Export {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pdf")]
        format: Format,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Write uncompressed PDF content streams
        #[arg(long)]
        uncompressed: bool,
    },

    /// Print the resolved table of contents
    Toc {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show document information
    Info {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// Title printed on the title page
    #[arg(long, env = "PUREMARK_TITLE")]
    title: Option<String>,

    /// Page size
    #[arg(long, value_enum, default_value = "a4")]
    page_size: PageSize,

    /// Table of contents capacity
    #[arg(long, value_enum, default_value = "single")]
    toc: TocMode,

    /// Behavior when the input has no content
    #[arg(long, value_enum, default_value = "error")]
    on_empty: OnEmpty,

    /// Handling of tables, block quotes and HTML
    #[arg(long, value_enum, default_value = "degrade")]
    unsupported: Unsupported,

    /// Stamp a page number on the last page too
    #[arg(long)]
    number_last_page: bool,

    /// Generation date (YYYY-MM-DD or RFC 3339), defaults to now
    #[arg(long, value_name = "DATE")]
    date: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Paginated PDF
    Pdf,
    /// Markdown source, unchanged
    Md,
    /// Laid-out pages as JSON
    Json,
}

impl Format {
    fn name(self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Md => "markdown",
            Format::Json => "json",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageSize {
    /// A4 (210 x 297 mm)
    A4,
    /// US Letter (8.5 x 11 in)
    Letter,
}

impl From<PageSize> for Geometry {
    fn from(size: PageSize) -> Self {
        match size {
            PageSize::A4 => Geometry::a4(),
            PageSize::Letter => Geometry::letter(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TocMode {
    /// One TOC page (default)
    Single,
    /// As many TOC pages as the headings need
    Fit,
}

impl From<TocMode> for TocPages {
    fn from(mode: TocMode) -> Self {
        match mode {
            TocMode::Single => TocPages::Single,
            TocMode::Fit => TocPages::Fit,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OnEmpty {
    /// Fail with an error
    Error,
    /// Produce a title and TOC shell
    Shell,
}

impl From<OnEmpty> for EmptyPolicy {
    fn from(mode: OnEmpty) -> Self {
        match mode {
            OnEmpty::Error => EmptyPolicy::Error,
            OnEmpty::Shell => EmptyPolicy::Shell,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Unsupported {
    /// Render as plain paragraphs
    Degrade,
    /// Leave out
    Skip,
}

impl From<Unsupported> for UnsupportedBlocks {
    fn from(mode: Unsupported) -> Self {
        match mode {
            Unsupported::Degrade => UnsupportedBlocks::Degrade,
            Unsupported::Skip => UnsupportedBlocks::Skip,
        }
    }
}

impl LayoutArgs {
    fn export_options(&self) -> Result<ExportOptions, Box<dyn std::error::Error>> {
        let layout = LayoutOptions::new()
            .with_geometry(self.page_size.into())
            .with_toc_pages(self.toc.into())
            .with_empty_policy(self.on_empty.into())
            .with_last_page_number(self.number_last_page);
        let tokenize = TokenizeOptions::new().with_unsupported(self.unsupported.into());

        let mut options = ExportOptions::new()
            .with_layout_options(layout)
            .with_tokenize_options(tokenize);
        if let Some(ref title) = self.title {
            options = options.with_title(title);
        }
        if let Some(ref date) = self.date {
            options = options.with_generated_at(parse_date(date)?);
        }
        Ok(options)
    }
}

fn parse_date(value: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", value, e))?;
    let at = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("Invalid date '{}'", value))?;
    Ok(at.and_utc())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Export {
            input,
            output,
            layout,
            format,
            compact,
            uncompressed,
        }) => cmd_export(
            &input,
            output.as_deref(),
            &layout,
            format,
            compact,
            uncompressed,
        ),
        Some(Commands::Toc { input, layout }) => cmd_toc(&input, &layout),
        Some(Commands::Info { input, layout }) => cmd_info(&input, &layout),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: puremark export <FILE> [-o DIR]".yellow());
            println!("       puremark --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_export(
    input: &Path,
    output: Option<&Path>,
    layout: &LayoutArgs,
    format: Format,
    compact: bool,
    uncompressed: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let markdown = fs::read_to_string(input)?;
    log::debug!(
        "Exporting {} ({} bytes) as {}",
        input.display(),
        markdown.len(),
        format.name()
    );

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let json_format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let options = layout
        .export_options()?
        .with_json_format(json_format)
        .with_compression(!uncompressed);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(format!("Exporting {}...", input.display()));

    let registry = ExporterRegistry::with_defaults();
    let exported = registry.export(format.name(), &markdown, &options);
    let result = match exported {
        Ok(result) => result,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    pb.set_message("Saving...");
    let path = result.save(&output_dir)?;
    pb.finish_and_clear();
    log::debug!("Wrote {} bytes to {}", result.bytes.len(), path.display());

    match result.page_count {
        Some(pages) => println!(
            "{} {} ({} pages)",
            "Saved to".green(),
            path.display(),
            pages
        ),
        None => println!("{} {}", "Saved to".green(), path.display()),
    }

    Ok(())
}

fn cmd_toc(input: &Path, layout: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let markdown = fs::read_to_string(input)?;
    let doc = build(&markdown, &layout.export_options()?)?;
    log::debug!("{} TOC entries for {}", doc.toc.len(), input.display());

    println!("{}", puremark::layout::TOC_TITLE.cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    if doc.toc.is_empty() {
        println!("{}", "(no headings)".dimmed());
    }
    for entry in &doc.toc {
        let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
        println!("{}{} {}", indent, entry.text, entry.page.to_string().dimmed());
    }

    Ok(())
}

fn cmd_info(input: &Path, layout: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let markdown = fs::read_to_string(input)?;
    let options = layout.export_options()?;

    let tokens = Tokenizer::new(options.tokenize.clone()).tokenize(&markdown);
    let doc = build(&markdown, &options)?;
    log::debug!("{} tokens, {} pages", tokens.len(), doc.page_count());

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Title".bold(), doc.metadata.title);
    println!(
        "{}: {} x {} {:?}",
        "Page size".bold(),
        doc.geometry.width,
        doc.geometry.height,
        doc.geometry.unit
    );
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!(
        "{}: {}",
        "TOC pages".bold(),
        doc.pages_with_role(PageRole::Toc).count()
    );
    println!(
        "{}: {}",
        "Body pages".bold(),
        doc.pages_with_role(PageRole::Body).count()
    );

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let count = |kind: &str| tokens.iter().filter(|t| t.kind() == kind).count();
    let code_lines: usize = tokens
        .iter()
        .map(|t| match t {
            BlockToken::Code { lines, .. } => lines.len(),
            _ => 0,
        })
        .sum();
    let words = doc
        .pages_with_role(PageRole::Body)
        .map(|p| p.plain_text().split_whitespace().count())
        .sum::<usize>();

    println!("{}: {}", "Blocks".bold(), tokens.len());
    println!("{}: {}", "Headings".bold(), count("heading"));
    println!("{}: {}", "Paragraphs".bold(), count("paragraph"));
    println!("{}: {} ({} lines)", "Code blocks".bold(), count("code"), code_lines);
    println!("{}: {}", "Lists".bold(), count("list"));
    println!("{}: {}", "Words".bold(), words);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "puremark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown to paginated PDF export tool");
    println!();
    println!("License: MIT");
}
