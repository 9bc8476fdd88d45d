#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Kaiju Rampage session to completion.

mod config;
mod layout_transfer;
mod placement;
mod render;

use std::path::PathBuf;

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use kaiju_rampage_board::{self as board, query, Board};
use kaiju_rampage_core::{Command, Event, GameConfig, MapLayout};
use kaiju_rampage_system_bootstrap::Bootstrap;
use kaiju_rampage_system_map_generation::MapGenerator;

use config::{Overrides, SettingsFile};
use layout_transfer::LayoutSnapshot;
use placement::{parse_placement, PlacementRequest};

#[derive(Debug, Parser)]
#[command(name = "kaiju-rampage", version, about = "Plays a Kaiju Rampage session")]
struct CliArgs {
    /// TOML settings file with an optional `seed` and a `[game]` table.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of grid rows.
    #[arg(long)]
    rows: Option<u32>,

    /// Number of grid columns.
    #[arg(long)]
    columns: Option<u32>,

    /// Steps after which the session ends.
    #[arg(long)]
    move_limit: Option<u32>,

    /// Budget available for floor commands.
    #[arg(long)]
    budget: Option<u32>,

    /// Seed for procedural layout generation; a random one is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Play an exported layout (`kaiju:v1:<rows>x<columns>:<payload>`) instead of generating one.
    #[arg(long, value_name = "LAYOUT")]
    layout: Option<String>,

    /// Purchase a floor command before the first step; may be repeated.
    #[arg(long = "place", value_name = "ROW,COL,FLOOR,COMMAND", value_parser = parse_placement)]
    placements: Vec<PlacementRequest>,

    /// Print the layout string for the session and exit.
    #[arg(long)]
    export_layout: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Entry point for the Kaiju Rampage command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let settings = match &args.config {
        Some(path) => SettingsFile::load(path)?,
        None => SettingsFile::default(),
    };
    let seed = resolve_seed(args.seed, settings.seed);
    log::info!("using layout seed {seed}");

    let imported = args
        .layout
        .as_deref()
        .map(LayoutSnapshot::decode)
        .transpose()
        .context("invalid --layout value")?;
    if let Some(snapshot) = &imported {
        ensure!(
            !snapshot.layout.is_empty(),
            "imported layout contains no entities"
        );
    }
    let config = resolve_config(&args, settings.game, imported.as_ref())?;

    let mut board = Board::new(config);
    let mut events = Vec::new();
    board::apply(&mut board, Command::Configure { config }, &mut events);

    let layout = match imported {
        Some(snapshot) => snapshot.layout,
        None => generate_layout(&config, seed, &events)?,
    };

    if args.export_layout {
        let snapshot = LayoutSnapshot {
            rows: config.rows,
            columns: config.columns,
            layout,
        };
        println!("{}", snapshot.encode()?);
        return Ok(());
    }

    events.clear();
    board::apply(&mut board, Command::LoadLayout { layout }, &mut events);
    report(&events);

    let bootstrap = Bootstrap;
    println!("{}", bootstrap.welcome_banner(&board));
    let (rows, columns) = bootstrap.dimensions(&board);
    println!("{rows}x{columns} board, seed {seed}");
    println!("Floor commands:");
    for command in bootstrap.catalog(&board) {
        println!("  {}", render::describe_command(command));
    }

    for request in args.placements {
        events.clear();
        board::apply(&mut board, request.into_command(), &mut events);
        report(&events);
    }

    println!();
    print!("{}", render::render_grid(&bootstrap.grid_view(&board)));
    println!("{}", render::render_status(&bootstrap.status(&board)));

    while !board.is_game_over() {
        events.clear();
        board::apply(&mut board, Command::Advance, &mut events);
        report(&events);

        println!();
        print!("{}", render::render_grid(&query::grid_view(&board)));
        println!("{}", render::render_status(&query::status(&board)));
    }

    println!();
    print!("{}", render::render_kaiju(&query::kaiju_view(&board)));
    let status = query::status(&board);
    println!(
        "Final score {} after {} of {} moves",
        status.score, status.moves_taken, status.move_limit
    );
    Ok(())
}

/// Picks the `--seed` flag, then the settings file, then a random seed.
fn resolve_seed(flag: Option<u64>, file: Option<u64>) -> u64 {
    flag.or(file).unwrap_or_else(rand::random)
}

/// Merges settings, flags and the dimensions of an imported layout.
fn resolve_config(
    args: &CliArgs,
    base: GameConfig,
    imported: Option<&LayoutSnapshot>,
) -> Result<GameConfig> {
    let mut overrides = Overrides {
        rows: args.rows,
        columns: args.columns,
        move_limit: args.move_limit,
        budget: args.budget,
    };
    if let Some(snapshot) = imported {
        if overrides.rows.is_some_and(|rows| rows != snapshot.rows)
            || overrides.columns.is_some_and(|columns| columns != snapshot.columns)
        {
            bail!(
                "--rows/--columns conflict with the {}x{} imported layout",
                snapshot.rows,
                snapshot.columns
            );
        }
        overrides.rows = Some(snapshot.rows);
        overrides.columns = Some(snapshot.columns);
    }
    overrides.apply(base)
}

fn generate_layout(config: &GameConfig, seed: u64, events: &[Event]) -> Result<MapLayout> {
    let mut generator = MapGenerator::for_config(config, seed);
    let mut commands = Vec::new();
    generator.handle(events, &mut commands);
    commands
        .into_iter()
        .find_map(|command| match command {
            Command::LoadLayout { layout } => Some(layout),
            _ => None,
        })
        .context("map generator produced no layout")
}

/// Logs the events produced by a single command.
fn report(events: &[Event]) {
    for event in events {
        match event {
            Event::LayoutLoaded { placed, rejected } if *rejected > 0 => {
                log::warn!("layout loaded with {rejected} rejected entries ({placed} placed)");
            }
            Event::FloorCommandPlaced {
                cell,
                floor,
                command,
                budget_remaining,
                ..
            } => log::info!(
                "placed {} on floor {floor} at ({}, {}), {budget_remaining} left",
                render::describe_command(*command),
                cell.row(),
                cell.column()
            ),
            Event::FloorCommandRejected {
                cell,
                floor,
                command,
                reason,
            } => log::warn!(
                "rejected {} on floor {floor} at ({}, {}): {reason}",
                render::describe_command(*command),
                cell.row(),
                cell.column()
            ),
            Event::KaijuArrived {
                kaiju, slot, power, ..
            } => log::info!(
                "kaiju {} arrived home in slot {slot} with power {power}",
                kaiju.get()
            ),
            Event::KaijuDefeated { kaiju, .. } => log::info!("kaiju {} was defeated", kaiju.get()),
            other => log::debug!("{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(flags: &[&str]) -> CliArgs {
        let argv = std::iter::once("kaiju-rampage").chain(flags.iter().copied());
        CliArgs::try_parse_from(argv).expect("flags parse")
    }

    fn snapshot(rows: u32, columns: u32) -> LayoutSnapshot {
        LayoutSnapshot {
            rows,
            columns,
            layout: MapLayout::default(),
        }
    }

    #[test]
    fn imported_layout_sets_the_board_dimensions() {
        let args = parse(&["--move-limit", "12"]);
        let config = resolve_config(&args, GameConfig::default(), Some(&snapshot(4, 7)))
            .expect("config resolves");
        assert_eq!((config.rows, config.columns), (4, 7));
        assert_eq!(config.move_limit, 12);
    }

    #[test]
    fn conflicting_dimensions_are_rejected_for_imported_layouts() {
        let imported = snapshot(5, 5);

        let rows = parse(&["--rows", "6"]);
        let error = resolve_config(&rows, GameConfig::default(), Some(&imported))
            .expect_err("rows conflict");
        assert!(error.to_string().contains("5x5 imported layout"));

        let columns = parse(&["--columns", "3"]);
        assert!(resolve_config(&columns, GameConfig::default(), Some(&imported)).is_err());

        let matching = parse(&["--rows", "5", "--columns", "5"]);
        assert!(resolve_config(&matching, GameConfig::default(), Some(&imported)).is_ok());
    }

    #[test]
    fn dimension_flags_apply_without_an_imported_layout() {
        let args = parse(&["--rows", "6", "--columns", "8"]);
        let config = resolve_config(&args, GameConfig::default(), None).expect("config resolves");
        assert_eq!((config.rows, config.columns), (6, 8));
    }

    #[test]
    fn seed_flag_wins_over_settings_file() {
        assert_eq!(resolve_seed(Some(3), Some(9)), 3);
        assert_eq!(resolve_seed(None, Some(9)), 9);
    }

    #[test]
    fn placements_are_parsed_from_repeated_flags() {
        let args = parse(&["--place", "1,2,0,stomp", "--place", "0,0,1,west"]);
        assert_eq!(args.placements.len(), 2);
    }
}
