use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use gridsys_core::{
    DemoElement, DesignTool, GridPreferences, GridSystem, GridSystemSnapshot, OffsetEdge,
    PreferenceField, RangeEdge, default_snapshot,
};
use gridsys_scss::{generate_scss, percentage, rem};

use crate::config::GridsysConfig;
use crate::error::{CliError, Result};
use crate::logging;
use crate::query::{decode_query, encode_query};

#[derive(Debug, Parser)]
#[command(
    name = "gridsys",
    about = "Edit responsive grid systems and generate SCSS or design-tool layout grids",
    version
)]
pub struct Cli {
    /// Configuration file (defaults to ./gridsys.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate SCSS source for a grid system.
    Generate(GenerateArgs),

    /// Print the built-in default grid system snapshot.
    Default(DefaultArgs),

    /// Compute a Sketch or Figma layout grid at one artboard width.
    Export(ExportArgs),

    /// Print a per-breakpoint summary.
    Inspect(InspectArgs),

    /// Read or write a grid system in a URL query string.
    Query(QueryArgs),

    /// Apply one edit and print the resulting snapshot.
    Edit(EditArgs),
}

/// Where the grid system comes from. Without either flag the default
/// grid system is used.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Snapshot JSON file.
    #[arg(long, conflicts_with = "query")]
    pub input: Option<PathBuf>,

    /// URL query string holding the snapshot.
    #[arg(long)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct DefaultArgs {
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Artboard width in pixels (config `export.artboard_width`).
    #[arg(long)]
    pub width: Option<u32>,

    /// Target tool (config `export.tool`).
    #[arg(long, value_enum)]
    pub tool: Option<ToolArg>,

    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Highlight the breakpoint matching this viewport width.
    #[arg(long)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    #[command(subcommand)]
    pub command: QueryCommands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum QueryCommands {
    /// Store a grid system in a query string, keeping other parameters.
    Encode {
        #[command(flatten)]
        source: SourceArgs,

        /// Existing query string to update.
        #[arg(long, default_value = "")]
        base: String,
    },
    /// Print the snapshot stored in a query string.
    Decode {
        query: String,

        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write the edited snapshot to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub op: EditOp,
}

/// Entries are addressed by zero-based position; ids are not serialized.
#[derive(Debug, Clone, Subcommand)]
pub enum EditOp {
    /// Split the widest breakpoint, appending a new tail entry.
    Add,
    /// Remove one breakpoint; a neighbour absorbs its range.
    Remove { index: usize },
    /// Move a shared breakpoint.
    Resize {
        index: usize,
        #[arg(value_enum)]
        edge: EdgeArg,
        value: u32,
    },
    /// Replace one preference field. `content-max-width` accepts `none`.
    Set {
        index: usize,
        #[arg(value_enum)]
        field: FieldArg,
        value: String,
    },
    /// Replace one demo offset edge.
    Offset {
        index: usize,
        #[arg(value_enum)]
        element: ElementArg,
        #[arg(value_enum)]
        edge: OffsetEdgeArg,
        value: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ToolArg {
    Sketch,
    Figma,
}

impl From<ToolArg> for DesignTool {
    fn from(tool: ToolArg) -> Self {
        match tool {
            ToolArg::Sketch => Self::Sketch,
            ToolArg::Figma => Self::Figma,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EdgeArg {
    Min,
    Max,
}

impl From<EdgeArg> for RangeEdge {
    fn from(edge: EdgeArg) -> Self {
        match edge {
            EdgeArg::Min => Self::MinWidth,
            EdgeArg::Max => Self::MaxWidth,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    ContentMaxWidth,
    Columns,
    Gutter,
    Margin,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ElementArg {
    Heading1,
    Heading2,
    Paragraph,
}

impl From<ElementArg> for DemoElement {
    fn from(element: ElementArg) -> Self {
        match element {
            ElementArg::Heading1 => Self::Heading1,
            ElementArg::Heading2 => Self::Heading2,
            ElementArg::Paragraph => Self::Paragraph,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OffsetEdgeArg {
    Start,
    End,
}

impl From<OffsetEdgeArg> for OffsetEdge {
    fn from(edge: OffsetEdgeArg) -> Self {
        match edge {
            OffsetEdgeArg::Start => Self::Start,
            OffsetEdgeArg::End => Self::End,
        }
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let config = GridsysConfig::load(cli.config.as_deref())?;
    logging::init(&config.log.filter);
    dispatch(cli.command, &config, &mut std::io::stdout().lock())
}

pub fn run(cli: Cli) -> Result<()> {
    run_with_output(cli, &mut std::io::stdout().lock())
}

/// Same as [`run`], writing command output to `out`.
pub fn run_with_output(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = GridsysConfig::load(cli.config.as_deref())?;
    dispatch(cli.command, &config, out)
}

fn dispatch(command: Commands, config: &GridsysConfig, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Generate(args) => {
            let system = load_system(&args.source, config)?;
            emit(out, args.output.as_deref(), &generate_scss(&system))
        }
        Commands::Default(args) => {
            let json = snapshot_json(&default_snapshot(), args.pretty)?;
            emit(out, args.output.as_deref(), &format!("{json}\n"))
        }
        Commands::Export(args) => run_export(&args, config, out),
        Commands::Inspect(args) => run_inspect(&args, config, out),
        Commands::Query(args) => run_query(args.command, config, out),
        Commands::Edit(args) => run_edit(&args, config, out),
    }
}

// ── Input / output ─────────────────────────────────────────────────────

fn load_system(source: &SourceArgs, config: &GridsysConfig) -> Result<GridSystem> {
    if let Some(path) = &source.input {
        if !path.exists() {
            return Err(CliError::MissingPath { path: path.clone() });
        }
        let content = std::fs::read_to_string(path)?;
        let snapshot = GridSystemSnapshot::from_json_str(&content)?;
        return Ok(GridSystem::from_snapshot(&snapshot)?);
    }
    if let Some(query) = &source.query {
        return decode_query(query, &config.query.key)?.ok_or_else(|| {
            CliError::invalid(format!("query has no `{}` parameter", config.query.key))
        });
    }
    Ok(GridSystem::reset())
}

fn snapshot_json(snapshot: &GridSystemSnapshot, pretty: bool) -> Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(snapshot)?)
    } else {
        Ok(snapshot.to_json_string()?)
    }
}

fn emit(out: &mut dyn Write, path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)?;
            tracing::info!(path = %path.display(), bytes = content.len(), "wrote output");
        }
        None => out.write_all(content.as_bytes())?,
    }
    Ok(())
}

// ── Commands ───────────────────────────────────────────────────────────

fn run_export(args: &ExportArgs, config: &GridsysConfig, out: &mut dyn Write) -> Result<()> {
    let system = load_system(&args.source, config)?;
    let width = args.width.unwrap_or(config.export.artboard_width);
    let tool = args.tool.map_or(config.export.tool, DesignTool::from);

    let layout = system
        .compute_external_layout(width, tool)?
        .ok_or_else(|| CliError::invalid("grid system has no breakpoints"))?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&layout)?
    } else {
        serde_json::to_string(&layout)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

fn run_inspect(args: &InspectArgs, config: &GridsysConfig, out: &mut dyn Write) -> Result<()> {
    let system = load_system(&args.source, config)?;
    let matched = args
        .width
        .and_then(|width| system.match_for(width))
        .map(GridPreferences::id);

    writeln!(
        out,
        "  {:<3} {:<12} {:<8} {:<9} {:<9} {:<10} {}",
        "#", "range", "columns", "gutter", "margin", "max width", "root"
    )?;
    for (index, prefs) in system.iter().enumerate() {
        let marker = if Some(prefs.id()) == matched { ">" } else { " " };
        let max_width = prefs
            .content_max_width()
            .map_or_else(|| "none".to_string(), |px| rem(f64::from(px)));
        writeln!(
            out,
            "{marker} {:<3} {:<12} {:<8} {:<9} {:<9} {:<10} {}",
            index,
            prefs.range().label(),
            prefs.columns(),
            rem(f64::from(prefs.gutter())),
            rem(f64::from(prefs.margin())),
            max_width,
            percentage(prefs.scale()),
        )?;
    }
    Ok(())
}

fn run_query(command: QueryCommands, config: &GridsysConfig, out: &mut dyn Write) -> Result<()> {
    let key = &config.query.key;
    match command {
        QueryCommands::Encode { source, base } => {
            let system = load_system(&source, config)?;
            let query = encode_query(&base, key, &system)?;
            if query.is_empty() {
                writeln!(out)?;
            } else {
                writeln!(out, "?{query}")?;
            }
        }
        QueryCommands::Decode { query, pretty } => {
            let system = decode_query(&query, key)?
                .ok_or_else(|| CliError::invalid(format!("query has no `{key}` parameter")))?;
            writeln!(out, "{}", snapshot_json(&system.to_snapshot(), pretty)?)?;
        }
    }
    Ok(())
}

fn run_edit(args: &EditArgs, config: &GridsysConfig, out: &mut dyn Write) -> Result<()> {
    let system = load_system(&args.source, config)?;
    let edited = apply_edit(&system, &args.op)?;
    let json = snapshot_json(&edited.to_snapshot(), false)?;
    emit(out, args.output.as_deref(), &format!("{json}\n"))
}

fn apply_edit(system: &GridSystem, op: &EditOp) -> Result<GridSystem> {
    let id_at = |index: usize| {
        system.get(index).map(GridPreferences::id).ok_or_else(|| {
            CliError::invalid(format!(
                "no breakpoint at index {index} (grid system has {})",
                system.len()
            ))
        })
    };

    let edited = match op {
        EditOp::Add => system.add_breakpoint()?,
        EditOp::Remove { index } => system.remove_breakpoint(id_at(*index)?)?,
        EditOp::Resize { index, edge, value } => {
            system.resize_breakpoint(id_at(*index)?, RangeEdge::from(*edge), *value)?
        }
        EditOp::Set {
            index,
            field,
            value,
        } => system.update_field(id_at(*index)?, parse_field(*field, value)?)?,
        EditOp::Offset {
            index,
            element,
            edge,
            value,
        } => system.update_demo_offset(
            id_at(*index)?,
            DemoElement::from(*element),
            OffsetEdge::from(*edge),
            *value,
        )?,
    };
    Ok(edited)
}

fn parse_field(field: FieldArg, value: &str) -> Result<PreferenceField> {
    let whole = |value: &str| {
        value
            .parse::<u32>()
            .map_err(|_| CliError::invalid(format!("expected a whole number, got `{value}`")))
    };
    Ok(match field {
        FieldArg::ContentMaxWidth if value.eq_ignore_ascii_case("none") => {
            PreferenceField::ContentMaxWidth(None)
        }
        FieldArg::ContentMaxWidth => PreferenceField::ContentMaxWidth(Some(whole(value)?)),
        FieldArg::Columns => PreferenceField::Columns(whole(value)?),
        FieldArg::Gutter => PreferenceField::Gutter(whole(value)?),
        FieldArg::Margin => PreferenceField::Margin(whole(value)?),
        FieldArg::Scale => PreferenceField::Scale(
            value
                .parse::<f64>()
                .map_err(|_| CliError::invalid(format!("expected a number, got `{value}`")))?,
        ),
    })
}
