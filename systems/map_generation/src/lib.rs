#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic procedural layout generation for Kaiju Rampage boards.
//!
//! Kaiju start in the leftmost column facing east and their beds wait in
//! the rightmost column, a few obstacles sit in the centre column, and every
//! other cell is filled with a building of random kind. The random stream is
//! seeded, so a generator always produces the same layout for the same
//! dimensions.

use std::collections::BTreeSet;

use kaiju_rampage_core::{
    BedSeed, BedTier, BuildingKind, BuildingSeed, CellCoord, Command, Direction, Event,
    GameConfig, KaijuKind, KaijuSeed, MapLayout, ObstacleKind, ObstacleSeed,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Upper bound on the number of obstacles placed on any board.
const MAX_OBSTACLES: u32 = 3;
/// One obstacle is granted per this many cells, up to [`MAX_OBSTACLES`].
const CELLS_PER_OBSTACLE: u32 = 10;
/// Obstacle kinds cycled through in placement order.
const OBSTACLE_CYCLE: [ObstacleKind; 3] = [
    ObstacleKind::Mud,
    ObstacleKind::SpikeTrap,
    ObstacleKind::Boulder,
];

/// Pure system that produces seeded board layouts.
#[derive(Clone, Debug)]
pub struct MapGenerator {
    rows: u32,
    columns: u32,
    seed: u64,
}

impl MapGenerator {
    /// Creates a generator for a board of the provided dimensions.
    #[must_use]
    pub const fn new(rows: u32, columns: u32, seed: u64) -> Self {
        Self {
            rows,
            columns,
            seed,
        }
    }

    /// Creates a generator sized for the provided configuration.
    #[must_use]
    pub const fn for_config(config: &GameConfig, seed: u64) -> Self {
        Self::new(config.rows, config.columns, seed)
    }

    /// Board dimensions as `(rows, columns)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    /// Emits a fresh layout whenever the board is configured or reset.
    ///
    /// A `Configured` event also resizes the generator to the new board.
    pub fn handle(&mut self, events: &[Event], out_commands: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::Configured { config } => {
                    self.rows = config.rows;
                    self.columns = config.columns;
                }
                Event::SessionReset => {}
                _ => continue,
            }
            out_commands.push(Command::LoadLayout {
                layout: self.generate(),
            });
        }
    }

    /// Generates the layout for the configured dimensions and seed.
    #[must_use]
    pub fn generate(&self) -> MapLayout {
        let mut layout = MapLayout::default();
        if self.rows == 0 || self.columns == 0 {
            return layout;
        }

        let mut taken = BTreeSet::new();
        let last_column = self.columns - 1;
        for (row, kind, tier) in self.lanes() {
            let start = CellCoord::new(row, 0);
            if taken.insert(start) {
                layout.kaijus.push(KaijuSeed {
                    cell: start,
                    kind,
                    facing: Direction::East,
                });
            }
            let bed = CellCoord::new(row, last_column);
            if taken.insert(bed) {
                layout.beds.push(BedSeed {
                    cell: bed,
                    owner: kind,
                    tier,
                });
            }
        }

        let centre = self.columns / 2;
        let cells = self.rows.saturating_mul(self.columns);
        let obstacles = MAX_OBSTACLES.min(cells / CELLS_PER_OBSTACLE);
        for (index, kind) in (0..obstacles).zip(OBSTACLE_CYCLE.iter().cycle()) {
            let cell = CellCoord::new(index % self.rows, centre);
            if taken.insert(cell) {
                layout.obstacles.push(ObstacleSeed { cell, kind: *kind });
            }
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        for row in 0..self.rows {
            for column in 0..self.columns {
                let cell = CellCoord::new(row, column);
                if taken.contains(&cell) {
                    continue;
                }
                let kind = BuildingKind::ALL[rng.gen_range(0..BuildingKind::ALL.len())];
                layout.buildings.push(BuildingSeed { cell, kind });
            }
        }

        log::debug!(
            "generated {}x{} layout from seed {}: {} entries, {} buildings, {} obstacles",
            self.rows,
            self.columns,
            self.seed,
            layout.len(),
            layout.buildings.len(),
            layout.obstacles.len()
        );
        layout
    }

    /// Start rows of each kaiju family with the tier of its bed.
    fn lanes(&self) -> [(u32, KaijuKind, BedTier); 3] {
        [
            (0, KaijuKind::Blue, BedTier::Top),
            (self.rows / 2, KaijuKind::Green, BedTier::Middle),
            (self.rows - 1, KaijuKind::Red, BedTier::Bottom),
        ]
    }
}
