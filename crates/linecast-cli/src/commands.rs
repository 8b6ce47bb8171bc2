use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use linecast_highlight::HighlightMode;
use linecast_projection::{
    render_side, BlockIndex, Diagnostic, DocumentKind, LineStyle, LineView, Projection, Projector,
};
use linecast_types::{ComparisonResult, Side, Summary, Tallies};

use crate::cli::*;
use crate::config::{CliConfig, Palette};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli { command, format, config, .. } = cli;
    let config = CliConfig::load(config.as_deref())?;
    match command {
        Command::Render(args) => cmd_render(args, config, format),
        Command::Summary(args) => cmd_summary(args, format),
        Command::Check(args) => cmd_check(args, config, format),
    }
}

fn load_result(path: &Path) -> anyhow::Result<ComparisonResult> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading comparison result {}", path.display()))?;
    let result = ComparisonResult::from_json(&text)
        .with_context(|| format!("parsing comparison result {}", path.display()))?;
    debug!(
        path = %path.display(),
        roots = result.differences.len(),
        "loaded comparison result"
    );
    Ok(result)
}

/// The text of one document: the given file, else the service's copy.
fn load_document(path: Option<&Path>, embedded: Option<&str>, side: Side) -> anyhow::Result<String> {
    match (path, embedded) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("reading document {side} {}", path.display())),
        (None, Some(text)) => Ok(text.to_string()),
        (None, None) => anyhow::bail!(
            "no text for document {side}: pass --file-{}",
            side.to_string().to_lowercase()
        ),
    }
}

fn is_json_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Everything `render` prints, in both output formats.
#[derive(Debug, Serialize)]
pub struct RenderReport {
    pub tallies: Tallies,
    pub diagnostics: Vec<Diagnostic>,
    pub sides: Vec<RenderedSide>,
}

#[derive(Debug, Serialize)]
pub struct RenderedSide {
    pub side: Side,
    pub name: String,
    pub lines: Vec<LineView>,
}

pub fn build_render(args: &RenderArgs, mut config: CliConfig) -> anyhow::Result<RenderReport> {
    let result = load_result(&args.result)?;
    let doc_a = load_document(args.file_a.as_deref(), result.file_a.formatted_content.as_deref(), Side::A)?;
    let doc_b = load_document(args.file_b.as_deref(), result.file_b.formatted_content.as_deref(), Side::B)?;

    match args.document_kind {
        Some(DocumentKindArg::Source) => config.projection.document_kind = DocumentKind::Source,
        Some(DocumentKindArg::KeyValue) => config.projection.document_kind = DocumentKind::KeyValue,
        None if is_json_name(&result.file_a.original_filename) => {
            config.projection.document_kind = DocumentKind::KeyValue;
        }
        None => {}
    }
    if let Some(mode) = args.highlight_mode {
        config.projection.highlight_mode = match mode {
            HighlightModeArg::Trusted => HighlightMode::Trusted,
            HighlightModeArg::Verified => HighlightMode::Verified,
            HighlightModeArg::Search => HighlightMode::Search,
        };
    }
    debug!(
        document_kind = ?config.projection.document_kind,
        highlight_mode = ?config.projection.highlight_mode,
        "render settings"
    );

    let projector = Projector::new(config.projection.clone());
    let projection = projector.project_documents(&result.differences, &doc_a, &doc_b)?;
    let blocks = BlockIndex::build(&result.differences);

    let sides: &[Side] = match args.side {
        SideArg::A => &[Side::A],
        SideArg::B => &[Side::B],
        SideArg::Both => &[Side::A, Side::B],
    };
    let sides = sides
        .iter()
        .map(|&side| {
            let (document, info) = match side {
                Side::A => (&doc_a, &result.file_a),
                Side::B => (&doc_b, &result.file_b),
            };
            RenderedSide {
                side,
                name: info.original_filename.clone(),
                lines: render_side(&projection, &blocks, side, document, &config.projection),
            }
        })
        .collect();

    Ok(RenderReport {
        tallies: projection.tallies,
        diagnostics: projection.diagnostics,
        sides,
    })
}

fn cmd_render(args: RenderArgs, config: CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let palette = config.palette.clone();
    let report = build_render(&args, config)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            for side in &report.sides {
                print!("{}", format_side(side, &palette));
            }
            for diagnostic in &report.diagnostics {
                eprintln!("{} {}", "warning:".yellow().bold(), diagnostic);
            }
        }
    }
    Ok(())
}

fn gutter(style: LineStyle) -> char {
    match style {
        LineStyle::Unchanged => ' ',
        LineStyle::Added => '+',
        LineStyle::Deleted => '-',
        LineStyle::Modified => '~',
        LineStyle::Moved | LineStyle::MovedModified => '>',
    }
}

pub fn format_side(side: &RenderedSide, palette: &Palette) -> String {
    let mut out = format!("── {} {} ──", side.side, side.name).bold().to_string();
    out.push('\n');
    let width = side.lines.len().to_string().len().max(3);
    for view in &side.lines {
        let style = view.resolution.style;
        let color = palette.style_color(style);
        if let Some(badge) = &view.resolution.badge {
            let text = badge.to_string();
            let text = match color {
                Some(color) => text.color(color).bold(),
                None => text.bold(),
            };
            out.push_str(&format!("{:width$}   {}\n", "", text));
        }

        let mut line = format!("{:>width$} {} ", view.number, gutter(style)).dimmed().to_string();
        for segment in &view.segments {
            let text = match color {
                Some(color) => segment.text.as_str().color(color),
                None => segment.text.as_str().normal(),
            };
            let text = if segment.highlighted {
                text.on_color(palette.highlight_color()).bold()
            } else {
                text
            };
            line.push_str(&text.to_string());
        }
        if let Some(marker) = view.resolution.marker {
            line.push_str(&format!("  {}", marker.to_string().italic()));
        } else if let Some(counterpart) = view.resolution.counterpart_line {
            line.push_str(&format!("  {}", format!("→ {counterpart}").dimmed()));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    file_a: &'a str,
    file_b: &'a str,
    message: Option<&'a str>,
    tallies: Tallies,
    summary: &'a Summary,
}

fn cmd_summary(args: ResultArgs, format: OutputFormat) -> anyhow::Result<()> {
    let result = load_result(&args.result)?;
    let report = SummaryReport {
        file_a: &result.file_a.original_filename,
        file_b: &result.file_b.original_filename,
        message: result.message.as_deref(),
        tallies: result.tallies(),
        summary: &result.summary,
    };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", format_summary(&report)),
    }
    Ok(())
}

fn format_summary(report: &SummaryReport<'_>) -> String {
    let t = report.tallies;
    let s = report.summary;
    let mut out = format!("{} → {}\n", report.file_a.bold(), report.file_b.bold());
    if let Some(message) = report.message {
        out.push_str(&format!("  {message}\n"));
    }
    if s.is_identical {
        out.push_str(&format!("  {}\n", "identical".green()));
    }
    out.push_str(&format!(
        "  {} added, {} deleted, {} modified, {} moved ({} changes)\n",
        t.added.to_string().green(),
        t.deleted.to_string().red(),
        t.modified.to_string().yellow(),
        t.moved.to_string().blue(),
        t.total(),
    ));
    out.push_str(&format!(
        "  Blocks: {} in A, {} in B, {} unchanged\n",
        s.total_blocks_a, s.total_blocks_b, s.blocks_unchanged
    ));
    out.push_str(&format!("  Structural similarity: {:.1}%\n", s.structural_similarity));
    out
}

/// Project the tree and collect its diagnostics.
pub fn build_check(args: &ResultArgs, config: &CliConfig) -> anyhow::Result<Projection> {
    let result = load_result(&args.result)?;
    let projector = Projector::new(config.projection.clone());
    let projection = match (
        result.file_a.formatted_content.as_deref(),
        result.file_b.formatted_content.as_deref(),
    ) {
        (Some(a), Some(b)) => projector.project_documents(&result.differences, a, b)?,
        _ => projector.project(&result.differences)?,
    };
    Ok(projection)
}

fn cmd_check(args: ResultArgs, config: CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let projection = build_check(&args, &config)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&projection.diagnostics)?),
        OutputFormat::Text => {
            for diagnostic in &projection.diagnostics {
                let tag = if diagnostic.kind.skips_node() {
                    "error:".red().bold()
                } else {
                    "warning:".yellow().bold()
                };
                println!("{tag} {diagnostic}");
            }
            if projection.diagnostics.is_empty() {
                println!(
                    "{} {} lines in A, {} lines in B annotated",
                    "✓".green().bold(),
                    projection.map_a.len(),
                    projection.map_b.len()
                );
            }
        }
    }
    if projection.has_skipped_nodes() {
        let skipped = projection
            .diagnostics
            .iter()
            .filter(|d| d.kind.skips_node())
            .count();
        anyhow::bail!("{skipped} node(s) could not be projected");
    }
    Ok(())
}
