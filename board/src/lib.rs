#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for Kaiju Rampage.
//!
//! The [`Board`] owns the grid, the entity arena with its per-kind indices,
//! and the session counters. Callers either use its direct methods, which
//! report success as booleans, or drive it through [`apply`], which reports
//! every resolved interaction as an [`Event`].

mod entities;
mod floors;
mod grid;
pub mod invariants;
mod turn;

use kaiju_rampage_core::{
    AdvanceError, CellCoord, Command, EntityId, EntityKind, EntityPlacementError, Event,
    FloorCommand, GameConfig, MapLayout, PlacementError, WELCOME_BANNER,
};

pub use entities::{Bed, Building, Entity, Kaiju, Obstacle};

use entities::{EntityArena, EntityRecord};
use grid::OccupancyGrid;

/// Outcome of loading a layout onto the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Number of layout entries written to the grid.
    pub placed: u32,
    /// Number of layout entries that were out of bounds or collided.
    pub rejected: u32,
}

/// Represents the authoritative state of a single game session.
#[derive(Debug)]
pub struct Board {
    banner: &'static str,
    config: GameConfig,
    grid: OccupancyGrid,
    entities: EntityArena,
    moves_taken: u32,
    budget_remaining: u32,
    score: u64,
}

impl Board {
    /// Creates an empty board for the provided configuration.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid: OccupancyGrid::new(config.rows, config.columns),
            entities: EntityArena::default(),
            moves_taken: 0,
            budget_remaining: config.initial_budget,
            score: 0,
            config,
        }
    }

    /// Number of grid rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.config.rows
    }

    /// Number of grid columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.config.columns
    }

    /// Accumulated score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Number of steps taken in this session.
    #[must_use]
    pub const fn moves_taken(&self) -> u32 {
        self.moves_taken
    }

    /// Number of steps after which the session ends.
    #[must_use]
    pub const fn move_limit(&self) -> u32 {
        self.config.move_limit
    }

    /// Budget left for purchasing floor commands.
    #[must_use]
    pub const fn budget_remaining(&self) -> u32 {
        self.budget_remaining
    }

    /// Budget the session started with.
    #[must_use]
    pub const fn initial_budget(&self) -> u32 {
        self.config.initial_budget
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.grid.contains(cell)
    }

    /// Visible occupant of the cell, if any.
    #[must_use]
    pub fn entity_at(&self, cell: CellCoord) -> Option<EntityId> {
        self.grid.visible(cell)
    }

    /// Building or bed hidden beneath the kaiju standing on the cell, if any.
    #[must_use]
    pub fn covered_at(&self, cell: CellCoord) -> Option<EntityId> {
        self.grid.covered(cell)
    }

    /// Looks up an entity by identifier.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id).map(|record| &record.entity)
    }

    /// Cell occupied by the entity.
    #[must_use]
    pub fn position(&self, id: EntityId) -> Option<CellCoord> {
        self.entities.get(id).map(|record| record.cell)
    }

    /// Looks up a kaiju by identifier.
    #[must_use]
    pub fn kaiju(&self, id: EntityId) -> Option<&Kaiju> {
        match self.entity(id)? {
            Entity::Kaiju(kaiju) => Some(kaiju),
            _ => None,
        }
    }

    /// Looks up a building by identifier.
    #[must_use]
    pub fn building(&self, id: EntityId) -> Option<&Building> {
        match self.entity(id)? {
            Entity::Building(building) => Some(building),
            _ => None,
        }
    }

    /// Identifiers of every live entity of the provided kind, in ascending order.
    pub fn entity_ids(&self, kind: EntityKind) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.index(kind).iter().copied()
    }

    /// Writes a new entity onto an empty in-bounds cell.
    pub fn try_place_entity(
        &mut self,
        cell: CellCoord,
        entity: Entity,
    ) -> Result<EntityId, EntityPlacementError> {
        if !self.grid.contains(cell) {
            return Err(EntityPlacementError::OutOfBounds);
        }
        if self.grid.visible(cell).is_some() {
            return Err(EntityPlacementError::Occupied);
        }
        let id = self.entities.insert(cell, entity);
        let _ = self.grid.occupy(cell, id);
        Ok(id)
    }

    /// Writes a new entity onto the board, returning `None` when rejected.
    pub fn place_entity(&mut self, cell: CellCoord, entity: Entity) -> Option<EntityId> {
        self.try_place_entity(cell, entity).ok()
    }

    /// Moves an entity to a new cell.
    ///
    /// Fails when the destination is out of bounds, or when it is occupied in
    /// a way that cannot be layered: only a kaiju may stand on another entity,
    /// and never on another kaiju. Conflicts must be resolved beforehand.
    pub fn move_entity(&mut self, id: EntityId, to: CellCoord) -> bool {
        let Some(record) = self.entities.get(id) else {
            return false;
        };
        let from = record.cell;
        let mover_is_kaiju = matches!(record.entity, Entity::Kaiju(_));
        if !self.grid.contains(to) {
            return false;
        }
        if from == to {
            return true;
        }
        if let Some(slot) = self.grid.slot(to) {
            if slot.covered.is_some() {
                return false;
            }
            if let Some(occupant) = slot.visible {
                let occupant_is_kaiju = matches!(self.entity(occupant), Some(Entity::Kaiju(_)));
                if !mover_is_kaiju || occupant_is_kaiju {
                    return false;
                }
            }
        }

        let _ = self.grid.vacate(from, id);
        let _ = self.grid.occupy(to, id);
        if let Some(record) = self.entities.get_mut(id) {
            record.cell = to;
        }
        true
    }

    /// Removes an entity from the grid and from its kind index.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let Some(EntityRecord { cell, .. }) = self.entities.remove(id) else {
            return false;
        };
        let _ = self.grid.vacate(cell, id);
        true
    }

    /// Debits the budget, failing without mutation when funds are insufficient.
    pub fn spend_budget(&mut self, amount: u32) -> bool {
        if amount > self.budget_remaining {
            return false;
        }
        self.budget_remaining -= amount;
        true
    }

    /// True once the move limit is reached or every kaiju is dead or home.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        if self.moves_taken >= self.config.move_limit {
            return true;
        }
        self.entity_ids(EntityKind::Kaiju)
            .filter_map(|id| self.kaiju(id))
            .all(|kaiju| !kaiju.is_eligible())
    }

    /// Clears every entity and restores the session counters.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.entities.clear();
        self.moves_taken = 0;
        self.budget_remaining = self.config.initial_budget;
        self.score = 0;
    }

    /// Populates the board from a layout. Entries that cannot be placed are skipped.
    pub fn load_layout(&mut self, layout: &MapLayout) -> LoadSummary {
        let mut summary = LoadSummary::default();
        let entries = layout
            .buildings
            .iter()
            .map(|seed| (seed.cell, Entity::Building(Building::new(seed.kind))))
            .chain(
                layout
                    .obstacles
                    .iter()
                    .map(|seed| (seed.cell, Entity::Obstacle(Obstacle::new(seed.kind)))),
            )
            .chain(
                layout
                    .beds
                    .iter()
                    .map(|seed| (seed.cell, Entity::Bed(Bed::new(seed.owner, seed.tier)))),
            )
            .chain(layout.kaijus.iter().map(|seed| {
                (
                    seed.cell,
                    Entity::Kaiju(Kaiju::new(seed.kind, seed.facing)),
                )
            }));

        for (cell, entity) in entries {
            let kind = entity.kind();
            match self.try_place_entity(cell, entity) {
                Ok(_) => summary.placed += 1,
                Err(reason) => {
                    log::warn!(
                        "skipping {kind:?} at ({}, {}): {reason}",
                        cell.row(),
                        cell.column()
                    );
                    summary.rejected += 1;
                }
            }
        }
        log::debug!(
            "loaded layout: {} placed, {} rejected",
            summary.placed,
            summary.rejected
        );
        summary
    }

    /// Purchases a floor command, reporting why it was rejected.
    pub fn try_place_command(
        &mut self,
        cell: CellCoord,
        floor: u32,
        command: FloorCommand,
    ) -> Result<EntityId, PlacementError> {
        floors::place(self, cell, floor, command)
    }

    /// Purchases a floor command and attaches it to the building at `cell`.
    pub fn place_command(&mut self, cell: CellCoord, floor: u32, command: FloorCommand) -> bool {
        self.try_place_command(cell, floor, command).is_ok()
    }

    /// Advances the simulation by one step, reporting every resolved interaction.
    pub fn try_advance(&mut self, out_events: &mut Vec<Event>) -> Result<(), AdvanceError> {
        turn::advance(self, out_events)
    }

    /// Advances the simulation by one step. Returns false once the session is over.
    pub fn advance(&mut self) -> bool {
        let mut events = Vec::new();
        self.try_advance(&mut events).is_ok()
    }

    fn kaiju_mut(&mut self, id: EntityId) -> Option<&mut Kaiju> {
        match &mut self.entities.get_mut(id)?.entity {
            Entity::Kaiju(kaiju) => Some(kaiju),
            _ => None,
        }
    }

    fn building_mut(&mut self, id: EntityId) -> Option<&mut Building> {
        match &mut self.entities.get_mut(id)?.entity {
            Entity::Building(building) => Some(building),
            _ => None,
        }
    }

    fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

/// Applies the provided command to the board, mutating state deterministically.
pub fn apply(board: &mut Board, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Configure { config } => {
            *board = Board::new(config);
            log::debug!(
                "configured {}x{} board, {} moves, budget {}",
                config.rows,
                config.columns,
                config.move_limit,
                config.initial_budget
            );
            out_events.push(Event::Configured { config });
        }
        Command::LoadLayout { layout } => {
            board.reset();
            let summary = board.load_layout(&layout);
            out_events.push(Event::LayoutLoaded {
                placed: summary.placed,
                rejected: summary.rejected,
            });
        }
        Command::PlaceFloorCommand {
            cell,
            floor,
            command,
        } => match floors::place(board, cell, floor, command) {
            Ok(building) => out_events.push(Event::FloorCommandPlaced {
                building,
                cell,
                floor,
                command,
                budget_remaining: board.budget_remaining,
            }),
            Err(reason) => out_events.push(Event::FloorCommandRejected {
                cell,
                floor,
                command,
                reason,
            }),
        },
        Command::Advance => {
            if let Err(reason) = turn::advance(board, out_events) {
                out_events.push(Event::AdvanceRejected { reason });
            }
        }
        Command::Reset => {
            board.reset();
            out_events.push(Event::SessionReset);
        }
    }
}

/// Query functions that provide read-only access to the board state.
pub mod query {
    use kaiju_rampage_core::{
        command_catalog, BedSnapshot, BuildingSnapshot, CellCoord, CellSnapshot, EntityId,
        EntityKind, FloorCommand, GridView, KaijuSnapshot, KaijuView, ObstacleSnapshot,
        SessionStatus,
    };

    use super::{Board, Entity};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(board: &Board) -> &'static str {
        board.banner
    }

    /// Lists the purchasable floor commands with their prices.
    #[must_use]
    pub fn catalog(_board: &Board) -> [FloorCommand; 6] {
        command_catalog()
    }

    /// Captures the session counters.
    #[must_use]
    pub fn status(board: &Board) -> SessionStatus {
        SessionStatus {
            score: board.score(),
            moves_taken: board.moves_taken(),
            move_limit: board.move_limit(),
            budget_remaining: board.budget_remaining(),
            initial_budget: board.initial_budget(),
            game_over: board.is_game_over(),
        }
    }

    /// Captures a snapshot of the entity with the provided identifier.
    #[must_use]
    pub fn snapshot(board: &Board, id: EntityId) -> Option<CellSnapshot> {
        let record = board.entities.get(id)?;
        let cell = record.cell;
        Some(match &record.entity {
            Entity::Kaiju(kaiju) => CellSnapshot::Kaiju(KaijuSnapshot {
                id,
                cell,
                kind: kaiju.kind(),
                power: kaiju.power(),
                facing: kaiju.facing(),
                immobilized: kaiju.is_immobilized(),
                home: kaiju.is_home(),
            }),
            Entity::Building(building) => CellSnapshot::Building(BuildingSnapshot {
                id,
                cell,
                kind: building.kind(),
                intact_floors: building.intact_floors(),
                floors: building.commands(),
            }),
            Entity::Obstacle(obstacle) => CellSnapshot::Obstacle(ObstacleSnapshot {
                id,
                cell,
                kind: obstacle.kind(),
            }),
            Entity::Bed(bed) => CellSnapshot::Bed(BedSnapshot {
                id,
                cell,
                owner: bed.owner(),
                tier: bed.tier(),
            }),
        })
    }

    /// Captures the visible occupant of every cell.
    #[must_use]
    pub fn grid_view(board: &Board) -> GridView {
        let (rows, columns) = board.grid.dimensions();
        let cells = board
            .grid
            .iter()
            .map(|(_, slot)| slot.visible.and_then(|id| snapshot(board, id)))
            .collect();
        GridView::new(rows, columns, cells)
    }

    /// Captures the building at the provided cell, whether visible or covered.
    #[must_use]
    pub fn building_at(board: &Board, cell: CellCoord) -> Option<BuildingSnapshot> {
        [board.entity_at(cell), board.covered_at(cell)]
            .into_iter()
            .flatten()
            .find_map(|id| match snapshot(board, id) {
                Some(CellSnapshot::Building(building)) => Some(building),
                _ => None,
            })
    }

    /// Captures a read-only view of every kaiju on the board.
    #[must_use]
    pub fn kaiju_view(board: &Board) -> KaijuView {
        let snapshots = board
            .entity_ids(EntityKind::Kaiju)
            .filter_map(|id| match snapshot(board, id) {
                Some(CellSnapshot::Kaiju(kaiju)) => Some(kaiju),
                _ => None,
            })
            .collect();
        KaijuView::from_snapshots(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaiju_rampage_core::{
        BedSeed, BedTier, BuildingKind, BuildingSeed, Direction, KaijuKind, KaijuSeed,
        ObstacleKind,
    };

    fn blue_kaiju() -> Entity {
        Entity::Kaiju(Kaiju::new(KaijuKind::Blue, Direction::East))
    }

    #[test]
    fn place_entity_rejects_out_of_bounds_cells() {
        let mut board = Board::default();
        assert_eq!(
            board.try_place_entity(CellCoord::new(5, 0), blue_kaiju()),
            Err(EntityPlacementError::OutOfBounds)
        );
        assert!(board.entity_ids(EntityKind::Kaiju).next().is_none());
    }

    #[test]
    fn place_entity_rejects_occupied_cells() {
        let mut board = Board::default();
        let cell = CellCoord::new(1, 1);
        assert!(board.place_entity(cell, blue_kaiju()).is_some());
        assert_eq!(
            board.try_place_entity(cell, Entity::Obstacle(Obstacle::new(ObstacleKind::Mud))),
            Err(EntityPlacementError::Occupied)
        );
    }

    #[test]
    fn move_entity_updates_cell_and_position() {
        let mut board = Board::default();
        let id = board
            .place_entity(CellCoord::new(0, 0), blue_kaiju())
            .expect("placed");

        assert!(board.move_entity(id, CellCoord::new(0, 1)));
        assert_eq!(board.entity_at(CellCoord::new(0, 0)), None);
        assert_eq!(board.entity_at(CellCoord::new(0, 1)), Some(id));
        assert_eq!(board.position(id), Some(CellCoord::new(0, 1)));
        assert!(!board.move_entity(id, CellCoord::new(0, 5)));
        assert_eq!(board.position(id), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn kaiju_covers_and_uncovers_a_building() {
        let mut board = Board::default();
        let kaiju = board
            .place_entity(CellCoord::new(0, 0), blue_kaiju())
            .expect("placed");
        let building = board
            .place_entity(
                CellCoord::new(0, 1),
                Entity::Building(Building::new(BuildingKind::LowValue)),
            )
            .expect("placed");

        assert!(board.move_entity(kaiju, CellCoord::new(0, 1)));
        assert_eq!(board.entity_at(CellCoord::new(0, 1)), Some(kaiju));
        assert_eq!(board.covered_at(CellCoord::new(0, 1)), Some(building));

        assert!(board.move_entity(kaiju, CellCoord::new(0, 2)));
        assert_eq!(board.entity_at(CellCoord::new(0, 1)), Some(building));
        assert_eq!(board.covered_at(CellCoord::new(0, 1)), None);
    }

    #[test]
    fn stationary_entities_cannot_be_stacked() {
        let mut board = Board::default();
        let mud = board
            .place_entity(
                CellCoord::new(2, 2),
                Entity::Obstacle(Obstacle::new(ObstacleKind::Mud)),
            )
            .expect("placed");
        let _ = board
            .place_entity(
                CellCoord::new(2, 3),
                Entity::Building(Building::new(BuildingKind::HighValue)),
            )
            .expect("placed");
        assert!(!board.move_entity(mud, CellCoord::new(2, 3)));
        assert_eq!(board.position(mud), Some(CellCoord::new(2, 2)));
    }

    #[test]
    fn kaiju_cannot_move_onto_another_kaiju() {
        let mut board = Board::default();
        let first = board
            .place_entity(CellCoord::new(0, 0), blue_kaiju())
            .expect("placed");
        let second = board
            .place_entity(CellCoord::new(0, 2), blue_kaiju())
            .expect("placed");
        let building = board
            .place_entity(
                CellCoord::new(0, 1),
                Entity::Building(Building::new(BuildingKind::LowValue)),
            )
            .expect("placed");

        assert!(!board.move_entity(first, CellCoord::new(0, 2)));
        assert!(board.move_entity(second, CellCoord::new(0, 1)));
        assert!(!board.move_entity(first, CellCoord::new(0, 1)));
        assert_eq!(board.position(first), Some(CellCoord::new(0, 0)));
        assert_eq!(board.entity_at(CellCoord::new(0, 1)), Some(second));
        assert_eq!(board.covered_at(CellCoord::new(0, 1)), Some(building));

        assert!(board.move_entity(second, CellCoord::new(0, 1)));
        assert!(board.remove_entity(second));
        assert!(!board.move_entity(second, CellCoord::new(1, 1)));
        assert_eq!(board.entity_at(CellCoord::new(0, 1)), Some(building));
    }

    #[test]
    fn remove_entity_clears_grid_and_index() {
        let mut board = Board::default();
        let id = board
            .place_entity(CellCoord::new(3, 3), blue_kaiju())
            .expect("placed");
        assert!(board.remove_entity(id));
        assert_eq!(board.entity_at(CellCoord::new(3, 3)), None);
        assert!(board.entity(id).is_none());
        assert!(!board.remove_entity(id));
    }

    #[test]
    fn spend_budget_never_overdraws() {
        let mut board = Board::default();
        assert!(!board.spend_budget(111));
        assert_eq!(board.budget_remaining(), 110);
        assert!(board.spend_budget(110));
        assert_eq!(board.budget_remaining(), 0);
        assert!(!board.spend_budget(1));
    }

    #[test]
    fn board_without_kaiju_is_over() {
        let board = Board::default();
        assert!(board.is_game_over());
    }

    #[test]
    fn reset_restores_counters_and_clears_entities() {
        let mut board = Board::default();
        let _ = board.place_entity(CellCoord::new(0, 0), blue_kaiju());
        assert!(board.spend_budget(30));
        assert!(board.advance());
        board.reset();

        assert_eq!(board.moves_taken(), 0);
        assert_eq!(board.budget_remaining(), 110);
        assert_eq!(board.score(), 0);
        assert_eq!(board.entity_at(CellCoord::new(0, 1)), None);
        assert!(board.entity_ids(EntityKind::Kaiju).next().is_none());
    }

    #[test]
    fn load_layout_counts_rejected_entries() {
        let mut board = Board::default();
        let layout = MapLayout {
            buildings: vec![BuildingSeed {
                cell: CellCoord::new(0, 1),
                kind: BuildingKind::HighValue,
            }],
            beds: vec![BedSeed {
                cell: CellCoord::new(0, 9),
                owner: KaijuKind::Blue,
                tier: BedTier::Top,
            }],
            kaijus: vec![
                KaijuSeed {
                    cell: CellCoord::new(0, 0),
                    kind: KaijuKind::Blue,
                    facing: Direction::East,
                },
                KaijuSeed {
                    cell: CellCoord::new(0, 1),
                    kind: KaijuKind::Red,
                    facing: Direction::East,
                },
            ],
            ..MapLayout::default()
        };

        let summary = board.load_layout(&layout);
        assert_eq!(summary, LoadSummary { placed: 2, rejected: 2 });
    }

    #[test]
    fn apply_reports_rejected_advance_once_over() {
        let mut board = Board::default();
        let mut events = Vec::new();
        apply(&mut board, Command::Advance, &mut events);
        assert_eq!(
            events,
            vec![Event::AdvanceRejected {
                reason: AdvanceError::GameOver
            }]
        );
        assert_eq!(board.moves_taken(), 0);
    }

    #[test]
    fn apply_configure_replaces_the_board() {
        let mut board = Board::default();
        let config = GameConfig {
            rows: 7,
            columns: 9,
            move_limit: 20,
            initial_budget: 50,
        };
        let mut events = Vec::new();
        apply(&mut board, Command::Configure { config }, &mut events);

        assert_eq!(events, vec![Event::Configured { config }]);
        assert_eq!((board.rows(), board.columns()), (7, 9));
        assert_eq!(board.budget_remaining(), 50);
        assert_eq!(query::grid_view(&board).rows(), 7);
        assert_eq!(query::welcome_banner(&board), WELCOME_BANNER);
    }
}
