//! ocrlayout CLI - document reconstruction from OCR output

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use ocrlayout::{
    detect_shape, reconstruct_file_with_options, reconstruct_value_with_options, Document,
    DocumentStats, JsonFormat, NodeKind, ReconstructOptions, RenderOptions, RuleSet,
};

#[derive(Parser)]
#[command(name = "ocrlayout")]
#[command(version)]
#[command(about = "Reconstruct structured documents from OCR JSON output", long_about = None)]
struct Cli {
    /// Input OCR JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Reconstruction flags shared by every command.
#[derive(Args, Clone, Default)]
struct LayoutArgs {
    /// Vertical distance within which lines merge into one paragraph
    #[arg(long, value_name = "UNITS", env = "OCRLAYOUT_Y_THRESHOLD")]
    y_threshold: Option<f64>,

    /// Only merge lines strictly closer than the threshold
    #[arg(long)]
    exclusive_threshold: bool,

    /// Classifier rule set (defaults to the one matching the input shape)
    #[arg(long, value_enum)]
    rules: Option<Rules>,

    /// Replace the document with a single error on any bad record
    #[arg(long)]
    strict: bool,

    /// Drop fragments below this confidence (0-1)
    #[arg(long, value_name = "FLOOR")]
    min_confidence: Option<f64>,
}

impl LayoutArgs {
    fn options(&self) -> ReconstructOptions {
        let mut options = ReconstructOptions::new();
        if let Some(threshold) = self.y_threshold {
            options = options.with_y_threshold(threshold);
        }
        if self.exclusive_threshold {
            options = options.exclusive_threshold();
        }
        if let Some(rules) = self.rules {
            options = options.with_rule_set(rules.into());
        }
        if self.strict {
            options = options.strict();
        }
        if let Some(floor) = self.min_confidence {
            options = options.with_min_confidence(floor);
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert OCR output to all formats (JSON, Markdown, text)
    Convert {
        /// Input OCR JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Convert OCR output to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input OCR JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Table rendering mode
        #[arg(long, value_enum, default_value = "markdown")]
        table_mode: TableMode,

        /// Markdown heading level (1-6)
        #[arg(long, default_value = "2")]
        heading_level: u8,

        /// Omit error nodes
        #[arg(long)]
        no_errors: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Convert OCR output to plain text
    Text {
        /// Input OCR JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Omit tables
        #[arg(long)]
        no_tables: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Convert OCR output to document JSON
    Json {
        /// Input OCR JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show document information
    Info {
        /// Input OCR JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Rules {
    /// List, heading (structured analysis results)
    Structured,
    /// Bullet list, question (flat OCR lines)
    Flat,
}

impl From<Rules> for RuleSet {
    fn from(rules: Rules) -> Self {
        match rules {
            Rules::Structured => RuleSet::Structured,
            Rules::Flat => RuleSet::Flat,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TableMode {
    /// Standard Markdown tables
    Markdown,
    /// HTML tables
    Html,
}

impl From<TableMode> for ocrlayout::TableFallback {
    fn from(mode: TableMode) -> Self {
        match mode {
            TableMode::Markdown => ocrlayout::TableFallback::Markdown,
            TableMode::Html => ocrlayout::TableFallback::Html,
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            layout,
        }) => cmd_convert(&input, output.as_deref(), &layout),
        Some(Commands::Markdown {
            input,
            output,
            table_mode,
            heading_level,
            no_errors,
            layout,
        }) => {
            let render_options = RenderOptions::new()
                .with_table_fallback(table_mode.into())
                .with_heading_level(heading_level)
                .with_errors(!no_errors);
            cmd_markdown(&input, output.as_deref(), &render_options, &layout)
        }
        Some(Commands::Text {
            input,
            output,
            no_tables,
            layout,
        }) => cmd_text(&input, output.as_deref(), no_tables, &layout),
        Some(Commands::Json {
            input,
            output,
            compact,
            layout,
        }) => cmd_json(&input, output.as_deref(), compact, &layout),
        Some(Commands::Info { input, layout }) => cmd_info(&input, &layout),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &cli.layout)
            } else {
                println!("{}", "Usage: ocrlayout <FILE> [OUTPUT]".yellow());
                println!("       ocrlayout --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load(input: &Path, layout: &LayoutArgs) -> Result<Document, Box<dyn std::error::Error>> {
    let doc = reconstruct_file_with_options(input, &layout.options())?;
    if doc.has_errors() {
        log::warn!("{}: reconstruction reported errors", input.display());
    }
    Ok(doc)
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(input: &Path, output: Option<&Path>, layout: &LayoutArgs) -> CliResult {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    println!("{} {}", "Reconstructing".cyan(), input.display());
    let doc = load(input, layout)?;
    let render_options = RenderOptions::new();

    let json = ocrlayout::render::to_json(&doc, JsonFormat::Pretty)?;
    fs::write(output_dir.join("document.json"), &json)?;

    let markdown = ocrlayout::render::to_markdown(&doc, &render_options)?;
    fs::write(output_dir.join("document.md"), &markdown)?;

    let text = ocrlayout::render::to_text(&doc, &render_options)?;
    fs::write(output_dir.join("document.txt"), &text)?;

    println!("\n{} {}", "Output files:".green().bold(), output_dir.display());
    println!("  {} document.json", "├─".dimmed());
    println!("  {} document.md", "├─".dimmed());
    println!("  {} document.txt", "└─".dimmed());

    if doc.has_errors() {
        println!(
            "\n{} {} error node(s); see document.json",
            "Warning:".yellow().bold(),
            doc.count(NodeKind::Error)
        );
    }

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    render_options: &RenderOptions,
    layout: &LayoutArgs,
) -> CliResult {
    let doc = load(input, layout)?;
    let markdown = ocrlayout::render::to_markdown(&doc, render_options)?;
    write_or_print(output, &markdown)
}

fn cmd_text(input: &Path, output: Option<&Path>, no_tables: bool, layout: &LayoutArgs) -> CliResult {
    let doc = load(input, layout)?;
    let render_options = RenderOptions::new().with_tables(!no_tables);
    let text = ocrlayout::render::to_text(&doc, &render_options)?;
    write_or_print(output, &text)
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool, layout: &LayoutArgs) -> CliResult {
    let doc = load(input, layout)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = ocrlayout::render::to_json(&doc, format)?;
    write_or_print(output, &json)
}

fn cmd_info(input: &Path, layout: &LayoutArgs) -> CliResult {
    let data = fs::read(input)?;
    let value: serde_json::Value = serde_json::from_slice(&data)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    match detect_shape(&value) {
        Ok(shape) => println!("{}: {}", "Shape".bold(), shape),
        Err(e) => println!("{}: {}", "Shape".bold(), e.to_string().red()),
    }

    let doc = reconstruct_value_with_options(&value, &layout.options());
    let stats = DocumentStats::from_document(&doc);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    for kind in NodeKind::ALL {
        let count = stats.node_count(kind);
        let label = format!("{} nodes", kind);
        if kind == NodeKind::Error && count > 0 {
            println!("{}: {}", label.bold(), count.to_string().red());
        } else {
            println!("{}: {}", label.bold(), count);
        }
    }
    println!("{}: {}", "List items".bold(), stats.list_item_count);

    let text = doc.plain_text();
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "ocrlayout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("OCR layout reconstruction tool");
    println!();
    println!("License: MIT");
}
