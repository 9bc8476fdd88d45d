use kaiju_rampage_board::{self as board, invariants::check_invariants, query, Board};
use kaiju_rampage_core::{
    BedTier, CellCoord, Command, Direction, EntityKind, Event, GameConfig, KaijuKind,
    ObstacleKind,
};
use kaiju_rampage_system_map_generation::MapGenerator;

#[test]
fn places_kaiju_and_beds_on_opposite_edges() {
    let layout = MapGenerator::new(5, 5, 7).generate();

    let kaijus: Vec<_> = layout
        .kaijus
        .iter()
        .map(|seed| (seed.cell, seed.kind, seed.facing))
        .collect();
    assert_eq!(
        kaijus,
        vec![
            (CellCoord::new(0, 0), KaijuKind::Blue, Direction::East),
            (CellCoord::new(2, 0), KaijuKind::Green, Direction::East),
            (CellCoord::new(4, 0), KaijuKind::Red, Direction::East),
        ]
    );

    let beds: Vec<_> = layout
        .beds
        .iter()
        .map(|seed| (seed.cell, seed.owner, seed.tier))
        .collect();
    assert_eq!(
        beds,
        vec![
            (CellCoord::new(0, 4), KaijuKind::Blue, BedTier::Top),
            (CellCoord::new(2, 4), KaijuKind::Green, BedTier::Middle),
            (CellCoord::new(4, 4), KaijuKind::Red, BedTier::Bottom),
        ]
    );

    let obstacles: Vec<_> = layout
        .obstacles
        .iter()
        .map(|seed| (seed.cell, seed.kind))
        .collect();
    assert_eq!(
        obstacles,
        vec![
            (CellCoord::new(0, 2), ObstacleKind::Mud),
            (CellCoord::new(1, 2), ObstacleKind::SpikeTrap),
        ]
    );
    assert_eq!(layout.buildings.len(), 25 - 3 - 3 - 2);
}

#[test]
fn same_seed_yields_same_layout() {
    let first = MapGenerator::new(9, 12, 42).generate();
    let second = MapGenerator::new(9, 12, 42).generate();
    assert_eq!(first, second);
}

#[test]
fn generated_layout_fills_the_board_without_collisions() {
    let config = GameConfig {
        rows: 7,
        columns: 9,
        ..GameConfig::default()
    };
    let mut board = Board::new(config);
    let layout = MapGenerator::for_config(&config, 11).generate();

    let summary = board.load_layout(&layout);
    assert_eq!(summary.rejected, 0);
    assert_eq!(summary.placed, 63);
    assert!(check_invariants(&board).is_empty());

    let view = query::grid_view(&board);
    for row in 0..view.rows() {
        for column in 0..view.columns() {
            assert!(view.occupant(CellCoord::new(row, column)).is_some());
        }
    }
    assert_eq!(board.entity_ids(EntityKind::Kaiju).count(), 3);
}

#[test]
fn emits_layout_on_configure_and_reset() {
    let mut generator = MapGenerator::new(5, 5, 3);
    let mut board = Board::default();
    let config = GameConfig {
        rows: 6,
        columns: 8,
        ..GameConfig::default()
    };

    let mut events = Vec::new();
    board::apply(&mut board, Command::Configure { config }, &mut events);
    let mut commands = Vec::new();
    generator.handle(&events, &mut commands);

    assert_eq!(generator.dimensions(), (6, 8));
    assert_eq!(commands.len(), 1);
    let Command::LoadLayout { layout } = &commands[0] else {
        panic!("expected a layout command, got {:?}", commands[0]);
    };
    assert_eq!(layout.len(), 48);

    let mut load_events = Vec::new();
    for command in commands.drain(..) {
        board::apply(&mut board, command, &mut load_events);
    }
    assert_eq!(
        load_events,
        vec![Event::LayoutLoaded {
            placed: 48,
            rejected: 0
        }]
    );

    generator.handle(&[Event::SessionReset], &mut commands);
    assert_eq!(commands.len(), 1);

    generator.handle(&[Event::StepStarted { move_index: 1 }], &mut commands);
    assert_eq!(commands.len(), 1);
}

#[test]
fn generated_sessions_replay_identically() {
    let run = || {
        let mut board = Board::default();
        let _ = board.load_layout(&MapGenerator::new(5, 5, 99).generate());
        let mut events = Vec::new();
        while !board.is_game_over() {
            board::apply(&mut board, Command::Advance, &mut events);
        }
        (board.score(), board.moves_taken(), events)
    };

    assert_eq!(run(), run());
}
