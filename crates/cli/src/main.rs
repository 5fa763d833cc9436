//! # huji-cli
//!
//! Command-line interface for reviewing and printing household registers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use huji_core::{Household, HouseholdStore, MemberField};
use huji_render::{FilePrintHost, HtmlRenderer, Renderer};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// huji - group a household register spreadsheet and print households
#[derive(Parser)]
#[command(name = "huji")]
#[command(author, version, about = "Household register viewer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show every household in a workbook
    Show {
        /// Excel file (.xlsx or .xls)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (html, json, text)
        #[arg(short = 'f', long = "format", default_value = "text")]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(short = 'o', long = "output", value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Print one household as a standalone document
    Print {
        /// Excel file (.xlsx or .xls)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// 0-based household index, in sorted order
        #[arg(short = 'n', long = "index")]
        index: usize,

        /// Directory for the print document
        #[arg(long = "out-dir", default_value = ".")]
        out_dir: PathBuf,

        /// Command to hand the document to, e.g. `lp`
        #[arg(long = "print-command")]
        print_command: Option<String>,
    },
}

/// Output format for `show`.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// Full review page
    Html,
    /// JSON array of households
    Json,
    /// Plain text (default)
    #[default]
    Text,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    match cli.command {
        Command::Show {
            file,
            format,
            output,
        } => {
            let store = load(&file).await?;
            let rendered = render(&store, format)?;
            match output {
                Some(path) => std::fs::write(&path, rendered)
                    .with_context(|| format!("Failed to write output: {}", path.display()))?,
                None => print!("{rendered}"),
            }
            Ok(())
        }
        Command::Print {
            file,
            index,
            out_dir,
            print_command,
        } => {
            let store = load(&file).await?;
            let mut renderer = HtmlRenderer::new();
            renderer.render_all(store.households());

            let mut host = FilePrintHost::new(out_dir);
            if let Some(command) = print_command {
                host = host.with_print_command(command);
            }

            if renderer.print_one(index, &mut host)? {
                for path in host.written() {
                    println!("{} {}", "Wrote".green().bold(), path.display());
                }
            } else {
                println!(
                    "{} no household at index {index} ({} rendered)",
                    "Nothing to print:".yellow(),
                    renderer.block_count()
                );
            }
            Ok(())
        }
    }
}

/// Read a workbook and group it into a fresh store.
async fn load(file: &Path) -> Result<HouseholdStore> {
    let rows = huji_sheet::read_workbook(file)
        .await
        .map_err(|e| {
            let notice = e.user_message();
            anyhow::Error::new(e).context(notice)
        })?;

    let mut store = HouseholdStore::new();
    store.ingest(rows);
    tracing::info!(file = %file.display(), households = store.len(), "loaded register");
    Ok(store)
}

/// Render the store in the requested format.
fn render(store: &HouseholdStore, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => {
            let mut renderer = HtmlRenderer::new();
            renderer.render_all(store.households());
            Ok(renderer.page(""))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(store.households())? + "\n"),
        OutputFormat::Text => Ok(format_text(store.households())),
    }
}

/// Format households as plain text.
fn format_text(households: &[Household]) -> String {
    if households.is_empty() {
        return format!("{}\n", "未找到户籍数据".yellow());
    }

    let mut out = String::new();
    for (index, household) in households.iter().enumerate() {
        let mut heading = format!("户号：{}", household.household_id);
        if !household.address.is_empty() {
            heading.push_str(&format!(" | 地址：{}", household.address));
        }
        out.push_str(&format!("[{index}] {}\n", heading.cyan().bold()));

        for member in &household.members {
            let fields: Vec<String> = MemberField::ALL
                .iter()
                .map(|field| format!("{}：{}", field.label(), member.field(*field)))
                .collect();
            out.push_str(&format!("  {}\n", fields.join("  ")));
        }
    }
    out
}
