use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "linecast",
    about = "Project structural change trees onto per-line annotations",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with `[projection]` and `[palette]` sections
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render both documents with their line annotations
    Render(RenderArgs),
    /// Show change tallies and the service summary
    Summary(ResultArgs),
    /// Project the tree and report diagnostics
    Check(ResultArgs),
}

#[derive(Args)]
pub struct ResultArgs {
    /// Comparison result JSON
    #[arg(short, long)]
    pub result: PathBuf,
}

#[derive(Args)]
pub struct RenderArgs {
    /// Comparison result JSON
    #[arg(short, long)]
    pub result: PathBuf,
    /// Original document; defaults to the result's formatted content
    #[arg(long)]
    pub file_a: Option<PathBuf>,
    /// Revised document; defaults to the result's formatted content
    #[arg(long)]
    pub file_b: Option<PathBuf>,
    #[arg(long, default_value = "both")]
    pub side: SideArg,
    /// Override the configured document kind
    #[arg(long)]
    pub document_kind: Option<DocumentKindArg>,
    /// Override the configured highlight mode
    #[arg(long)]
    pub highlight_mode: Option<HighlightModeArg>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SideArg {
    A,
    B,
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum DocumentKindArg {
    Source,
    KeyValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum HighlightModeArg {
    Trusted,
    Verified,
    Search,
}
