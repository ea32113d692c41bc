//! End-to-end dispatch through `run_with_output`, with files in a tempdir.

use std::path::{Path, PathBuf};

use gridsys_cli::cli::{
    Cli, Commands, DefaultArgs, EdgeArg, EditArgs, EditOp, ExportArgs, FieldArg, GenerateArgs,
    InspectArgs, QueryArgs, QueryCommands, SourceArgs, ToolArg,
};
use gridsys_cli::{CliError, run_with_output};
use gridsys_core::{GridSystem, GridSystemSnapshot};
use tempfile::tempdir;

fn run_captured(config: Option<&Path>, command: Commands) -> Result<String, CliError> {
    let mut out = Vec::new();
    run_with_output(
        Cli {
            config: config.map(Path::to_path_buf),
            command,
        },
        &mut out,
    )?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

fn from_file(path: &Path) -> SourceArgs {
    SourceArgs {
        input: Some(path.to_path_buf()),
        query: None,
    }
}

fn edit(source: SourceArgs, output: &Path, op: EditOp) -> Commands {
    Commands::Edit(EditArgs {
        source,
        output: Some(output.to_path_buf()),
        op,
    })
}

fn read_snapshot(path: &Path) -> GridSystemSnapshot {
    let json = std::fs::read_to_string(path).expect("snapshot written");
    GridSystemSnapshot::from_json_str(&json).expect("snapshot parses")
}

fn bounds(snapshot: &GridSystemSnapshot) -> Vec<(u32, Option<u32>)> {
    snapshot
        .grid_preferences_list
        .iter()
        .map(|entry| {
            (
                entry.breakpoint_range.min_width(),
                entry.breakpoint_range.max_width(),
            )
        })
        .collect()
}

#[test]
fn edit_chain_through_files() {
    let temp = tempdir().expect("tempdir");
    let base = temp.path().join("base.json");
    let grown = temp.path().join("grown.json");
    let resized = temp.path().join("resized.json");
    let trimmed = temp.path().join("trimmed.json");

    run_captured(
        None,
        Commands::Default(DefaultArgs {
            output: Some(base.clone()),
            pretty: true,
        }),
    )
    .expect("default");
    assert!(read_snapshot(&base).is_default());

    run_captured(None, edit(from_file(&base), &grown, EditOp::Add)).expect("add");
    assert_eq!(
        bounds(&read_snapshot(&grown))[4..],
        [(1600, Some(1839)), (1840, None)]
    );

    run_captured(
        None,
        edit(
            from_file(&grown),
            &resized,
            EditOp::Resize {
                index: 1,
                edge: EdgeArg::Min,
                value: 800,
            },
        ),
    )
    .expect("resize");
    assert_eq!(
        bounds(&read_snapshot(&resized))[..2],
        [(0, Some(799)), (800, Some(1023))]
    );

    run_captured(
        None,
        edit(from_file(&resized), &trimmed, EditOp::Remove { index: 2 }),
    )
    .expect("remove");
    let snapshot = read_snapshot(&trimmed);
    assert_eq!(snapshot.grid_preferences_list.len(), 5);
    assert_eq!(
        bounds(&snapshot)[..3],
        [(0, Some(799)), (800, Some(1023)), (1024, Some(1599))]
    );
}

#[test]
fn rejected_edit_leaves_no_output_file() {
    let temp = tempdir().expect("tempdir");
    let output = temp.path().join("never.json");

    let error = run_captured(
        None,
        edit(
            SourceArgs::default(),
            &output,
            EditOp::Resize {
                index: 0,
                edge: EdgeArg::Min,
                value: 10,
            },
        ),
    )
    .expect_err("first min width is fixed");
    assert!(matches!(error, CliError::Grid(_)));
    assert_eq!(error.exit_code(), 3);
    assert!(!output.exists());
}

#[test]
fn set_field_updates_one_entry() {
    let temp = tempdir().expect("tempdir");
    let output = temp.path().join("set.json");

    run_captured(
        None,
        edit(
            SourceArgs::default(),
            &output,
            EditOp::Set {
                index: 0,
                field: FieldArg::ContentMaxWidth,
                value: "480".to_string(),
            },
        ),
    )
    .expect("set");
    let snapshot = read_snapshot(&output);
    assert_eq!(snapshot.grid_preferences_list[0].content_max_width, Some(480));
    assert!(!snapshot.is_default());
}

#[test]
fn export_uses_config_defaults_and_flags() {
    let temp = tempdir().expect("tempdir");
    let config = temp.path().join("gridsys.toml");
    std::fs::write(&config, "[export]\ntool = \"sketch\"\nartboard_width = 320\n").expect("config");

    let sketch = run_captured(
        Some(&config),
        Commands::Export(ExportArgs {
            source: SourceArgs::default(),
            width: None,
            tool: None,
            pretty: false,
        }),
    )
    .expect("sketch export");
    assert_eq!(
        sketch.trim_end(),
        r#"{"columns":{"totalWidth":288,"offset":0,"numberOfColumns":4,"gutterOnOutside":false,"gutterWidth":16,"columnWidth":60}}"#
    );

    let figma = run_captured(
        Some(&config),
        Commands::Export(ExportArgs {
            source: SourceArgs::default(),
            width: Some(1024),
            tool: Some(ToolArg::Figma),
            pretty: false,
        }),
    )
    .expect("figma export");
    assert_eq!(
        figma.trim_end(),
        r#"{"columns":{"count":12,"type":"Stretch","margin":16,"gutter":32}}"#
    );
}

#[test]
fn export_rejects_scaled_breakpoint() {
    let error = run_captured(
        None,
        Commands::Export(ExportArgs {
            source: SourceArgs::default(),
            width: Some(1920),
            tool: None,
            pretty: false,
        }),
    )
    .expect_err("1600+ has scale 1.25");
    assert!(matches!(error, CliError::Precondition(_)));
}

#[test]
fn query_round_trip_with_custom_key() {
    let temp = tempdir().expect("tempdir");
    let config = temp.path().join("gridsys.toml");
    std::fs::write(&config, "[query]\nkey = \"g\"\n").expect("config");
    let snapshot_path = temp.path().join("custom.json");

    run_captured(
        None,
        edit(
            SourceArgs::default(),
            &snapshot_path,
            EditOp::Set {
                index: 1,
                field: FieldArg::Gutter,
                value: "24".to_string(),
            },
        ),
    )
    .expect("customize");

    let encoded = run_captured(
        Some(&config),
        Commands::Query(QueryArgs {
            command: QueryCommands::Encode {
                source: from_file(&snapshot_path),
                base: "?lang=en".to_string(),
            },
        }),
    )
    .expect("encode");
    let query = encoded.trim_end().to_string();
    assert!(query.starts_with("?lang=en&g=%7B"));

    let decoded = run_captured(
        Some(&config),
        Commands::Query(QueryArgs {
            command: QueryCommands::Decode {
                query: query.clone(),
                pretty: false,
            },
        }),
    )
    .expect("decode");
    assert_eq!(
        GridSystemSnapshot::from_json_str(decoded.trim_end()).expect("json"),
        read_snapshot(&snapshot_path)
    );

    let scss = run_captured(
        Some(&config),
        Commands::Generate(GenerateArgs {
            source: SourceArgs {
                input: None,
                query: Some(query),
            },
            output: None,
        }),
    )
    .expect("generate from query");
    assert!(scss.contains("$mq1\\:grid-gutter: rem(24);"));
}

#[test]
fn query_encode_of_default_drops_key() {
    let encoded = run_captured(
        None,
        Commands::Query(QueryArgs {
            command: QueryCommands::Encode {
                source: SourceArgs::default(),
                base: "gridSystem=stale".to_string(),
            },
        }),
    )
    .expect("encode");
    assert_eq!(encoded, "\n");
}

#[test]
fn query_without_key_is_invalid() {
    let error = run_captured(
        None,
        Commands::Generate(GenerateArgs {
            source: SourceArgs {
                input: None,
                query: Some("lang=en".to_string()),
            },
            output: None,
        }),
    )
    .expect_err("no gridSystem parameter");
    assert!(
        matches!(error, CliError::InvalidArgument { message } if message.contains("gridSystem"))
    );
}

#[test]
fn inspect_marks_matched_breakpoint() {
    let output = run_captured(
        None,
        Commands::Inspect(InspectArgs {
            source: SourceArgs::default(),
            width: Some(800),
        }),
    )
    .expect("inspect");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[2].starts_with("> 1"));
    assert!(lines[2].contains("720 – 1023"));
    assert!(lines[2].contains("45rem"));
    assert!(lines[5].contains("1600 +"));
    assert!(lines[5].contains("125%"));
    assert!(lines.iter().filter(|line| line.starts_with('>')).count() == 1);
}

#[test]
fn invalid_config_is_rejected() {
    let temp = tempdir().expect("tempdir");
    let config: PathBuf = temp.path().join("gridsys.toml");
    std::fs::write(&config, "[export]\nartboard_width = 0\n").expect("config");

    let error = run_captured(
        Some(&config),
        Commands::Default(DefaultArgs {
            output: None,
            pretty: false,
        }),
    )
    .expect_err("artboard width 0");
    assert!(matches!(error, CliError::Config { .. }));
}

#[test]
fn generated_source_matches_library_output() {
    let scss = run_captured(
        None,
        Commands::Generate(GenerateArgs {
            source: SourceArgs::default(),
            output: None,
        }),
    )
    .expect("generate");
    assert_eq!(scss, gridsys_scss::generate_scss(&GridSystem::reset()));
}
