#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Kaiju Rampage engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative board, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the board executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing every
//! interaction it resolved. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Kaiju Rampage.";

/// Price of a floor command that turns a kaiju toward a new direction.
pub const TURN_DIRECTION_PRICE: u32 = 10;
/// Price of a floor command that breaks two floors at once.
pub const STOMP_PRICE: u32 = 20;
/// Price of a floor command that powers up a kaiju.
pub const POWER_UP_PRICE: u32 = 30;

/// Number of floors every building is constructed with.
pub const FLOORS_PER_BUILDING: u8 = 2;

/// Commands that express all permissible board mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Rebuilds the board for a new session configuration, discarding all entities.
    Configure {
        /// Dimensions, move limit and budget of the new session.
        config: GameConfig,
    },
    /// Resets the board and populates it from a generated layout.
    LoadLayout {
        /// Layout produced by a map generator.
        layout: MapLayout,
    },
    /// Purchases a floor command and attaches it to a building floor.
    PlaceFloorCommand {
        /// Cell occupied by the target building.
        cell: CellCoord,
        /// Zero-based floor index, where zero is the lower floor.
        floor: u32,
        /// Command to attach to the floor.
        command: FloorCommand,
    },
    /// Advances the simulation by exactly one step.
    Advance,
    /// Clears all entities and restores counters to their initial values.
    Reset,
}

/// Events broadcast by the board after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the board was rebuilt for a new configuration.
    Configured {
        /// Configuration that became active.
        config: GameConfig,
    },
    /// Confirms that a layout was loaded onto a freshly reset board.
    LayoutLoaded {
        /// Number of entities written to the grid.
        placed: u32,
        /// Number of layout entries that could not be placed.
        rejected: u32,
    },
    /// Confirms that the session counters and entities were reset.
    SessionReset,
    /// Confirms that a floor command was purchased and attached.
    FloorCommandPlaced {
        /// Building that received the command.
        building: EntityId,
        /// Cell occupied by the building.
        cell: CellCoord,
        /// Floor that received the command.
        floor: u32,
        /// Command that was attached.
        command: FloorCommand,
        /// Budget left after paying for the command.
        budget_remaining: u32,
    },
    /// Reports that a floor command placement was rejected without side effects.
    FloorCommandRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Floor provided in the placement request.
        floor: u32,
        /// Command provided in the placement request.
        command: FloorCommand,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces the start of a simulation step.
    StepStarted {
        /// One-based index of the step that started.
        move_index: u32,
    },
    /// Reports that an immobilized kaiju sat out the step.
    KaijuRested {
        /// Kaiju that stayed in place.
        kaiju: EntityId,
    },
    /// Reports that a kaiju could not enter the cell it faces.
    KaijuBlocked {
        /// Kaiju that stayed in place.
        kaiju: EntityId,
        /// Reason the move was refused.
        reason: BlockReason,
    },
    /// Confirms that a kaiju moved between two cells.
    KaijuMoved {
        /// Kaiju that moved.
        kaiju: EntityId,
        /// Cell the kaiju occupied before moving.
        from: CellCoord,
        /// Cell the kaiju occupies after moving.
        to: CellCoord,
    },
    /// Reports the outcome of a kaiju walking into another kaiju.
    CombatResolved {
        /// Kaiju that initiated the combat by moving.
        attacker: EntityId,
        /// Kaiju that occupied the contested cell.
        defender: EntityId,
        /// Result of the power comparison.
        outcome: CombatOutcome,
    },
    /// Reports that a kaiju died and was removed from the board.
    KaijuDefeated {
        /// Kaiju that died.
        kaiju: EntityId,
        /// Cell the kaiju occupied when it died.
        cell: CellCoord,
    },
    /// Reports that one or more building floors were broken.
    FloorsBroken {
        /// Building that lost floors.
        building: EntityId,
        /// Number of floors broken in this interaction.
        floors: u8,
        /// Points added to the score.
        points: u64,
        /// Indicates whether a stomp command triggered the breakage.
        stomped: bool,
    },
    /// Reports that a building lost its last floor and was removed.
    BuildingDestroyed {
        /// Building that was removed.
        building: EntityId,
        /// Cell the building occupied.
        cell: CellCoord,
    },
    /// Reports a change to a kaiju's power.
    PowerChanged {
        /// Kaiju whose power changed.
        kaiju: EntityId,
        /// Power before the change.
        from: u64,
        /// Power after the change.
        to: u64,
    },
    /// Reports that a kaiju became stuck in mud and will sit out its next step.
    KaijuMired {
        /// Kaiju that became immobilized.
        kaiju: EntityId,
    },
    /// Reports that a kaiju bounced off a boulder and reversed its facing.
    KaijuBounced {
        /// Kaiju that bounced.
        kaiju: EntityId,
        /// Facing after the reversal.
        facing: Direction,
    },
    /// Reports that a hazard was used up by a kaiju stepping onto it.
    ObstacleConsumed {
        /// Obstacle that was removed.
        obstacle: EntityId,
        /// Kind of the removed obstacle.
        kind: ObstacleKind,
    },
    /// Reports that a kaiju reached its own bed.
    KaijuArrived {
        /// Kaiju that arrived home.
        kaiju: EntityId,
        /// Bed the kaiju arrived at.
        bed: EntityId,
        /// Zero-based arrival slot used to select the bonus.
        slot: u32,
        /// Power after the arrival bonus, which is also added to the score.
        power: u64,
    },
    /// Reports that an advance request was refused without side effects.
    AdvanceRejected {
        /// Specific reason the step was refused.
        reason: AdvanceError,
    },
}

/// Outcome of a combat between two kaiju.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatOutcome {
    /// The moving kaiju had strictly greater power.
    AttackerWon,
    /// The occupying kaiju had strictly greater power.
    DefenderWon,
    /// Both kaiju had equal power; neither moved nor died.
    Tie,
}

/// Reasons a kaiju may be refused entry into the cell it faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockReason {
    /// The faced cell lies outside the grid.
    Edge,
    /// The faced cell holds a bed owned by another kaiju kind.
    ForeignBed,
}

/// Cardinal directions a kaiju may face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

/// Unique identifier assigned to every entity loaded onto the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Discriminates the four families of board occupants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Mobile agent.
    Kaiju,
    /// Breakable two-floor structure.
    Building,
    /// Stationary hazard.
    Obstacle,
    /// Stationary goal.
    Bed,
}

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Returns the neighbouring cell one step away in `direction`.
    ///
    /// Steps that would leave the non-negative quadrant yield `None`; the
    /// upper grid bounds are checked by the board.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self::new(row, self.column)),
            Direction::South => self.row.checked_add(1).map(|row| Self::new(row, self.column)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(self.row, column)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(self.row, column)),
        }
    }
}

/// Kaiju families. Each bed belongs to exactly one of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KaijuKind {
    /// Strongest family.
    Blue,
    /// Middle family.
    Green,
    /// Weakest family.
    Red,
}

impl KaijuKind {
    /// All kaiju kinds in canonical order.
    pub const ALL: [KaijuKind; 3] = [Self::Blue, Self::Green, Self::Red];

    /// Power a kaiju of this kind starts a session with.
    #[must_use]
    pub const fn initial_power(self) -> u64 {
        match self {
            Self::Blue => 3_000,
            Self::Green => 2_000,
            Self::Red => 1_000,
        }
    }
}

/// Categories of breakable buildings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    /// Building worth 500 points per floor.
    HighValue,
    /// Building worth 250 points per floor.
    LowValue,
    /// Building worth nothing that doubles the power of any kaiju entering it.
    PowerPlant,
}

impl BuildingKind {
    /// All building kinds in canonical order.
    pub const ALL: [BuildingKind; 3] = [Self::HighValue, Self::LowValue, Self::PowerPlant];

    /// Points awarded for every floor broken.
    #[must_use]
    pub const fn value_per_floor(self) -> u64 {
        match self {
            Self::HighValue => 500,
            Self::LowValue => 250,
            Self::PowerPlant => 0,
        }
    }
}

/// Categories of stationary hazards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    /// Immobilizes the kaiju for its following step.
    Mud,
    /// Halves the kaiju's power.
    SpikeTrap,
    /// Reverses the kaiju's facing without letting it through.
    Boulder,
}

/// Priority ranking of a bed. `Top` outranks `Middle`, which outranks `Bottom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BedTier {
    /// Highest priority.
    Top,
    /// Middle priority.
    Middle,
    /// Lowest priority.
    Bottom,
}

/// Effect carried by a purchasable floor command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorCommandKind {
    /// Turns a kaiju toward the provided direction.
    TurnDirection(Direction),
    /// Breaks the exposed floor together with the floor beneath it.
    Stomp,
    /// Powers up a kaiju.
    PowerUp,
}

/// Purchasable modifier that can be attached to a building floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloorCommand {
    kind: FloorCommandKind,
}

impl FloorCommand {
    /// Creates a directional command.
    #[must_use]
    pub const fn turn(direction: Direction) -> Self {
        Self {
            kind: FloorCommandKind::TurnDirection(direction),
        }
    }

    /// Creates a stomp command.
    #[must_use]
    pub const fn stomp() -> Self {
        Self {
            kind: FloorCommandKind::Stomp,
        }
    }

    /// Creates a power-up command.
    #[must_use]
    pub const fn power_up() -> Self {
        Self {
            kind: FloorCommandKind::PowerUp,
        }
    }

    /// Effect carried by the command.
    #[must_use]
    pub const fn kind(&self) -> FloorCommandKind {
        self.kind
    }

    /// Fixed purchase price of the command.
    #[must_use]
    pub const fn price(&self) -> u32 {
        match self.kind {
            FloorCommandKind::TurnDirection(_) => TURN_DIRECTION_PRICE,
            FloorCommandKind::Stomp => STOMP_PRICE,
            FloorCommandKind::PowerUp => POWER_UP_PRICE,
        }
    }

    /// Reports whether the command is a stomp.
    #[must_use]
    pub const fn is_stomp(&self) -> bool {
        matches!(self.kind, FloorCommandKind::Stomp)
    }
}

/// Lists every purchasable floor command in presentation order.
#[must_use]
pub const fn command_catalog() -> [FloorCommand; 6] {
    [
        FloorCommand::turn(Direction::North),
        FloorCommand::turn(Direction::South),
        FloorCommand::turn(Direction::East),
        FloorCommand::turn(Direction::West),
        FloorCommand::stomp(),
        FloorCommand::power_up(),
    ]
}

/// Dimensions and limits that define a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of grid rows.
    pub rows: u32,
    /// Number of grid columns.
    pub columns: u32,
    /// Number of steps after which the session ends.
    pub move_limit: u32,
    /// Budget available for purchasing floor commands.
    pub initial_budget: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            columns: 5,
            move_limit: 15,
            initial_budget: 110,
        }
    }
}

/// Initial entity layout consumed by the board when a session starts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapLayout {
    /// Buildings to place.
    pub buildings: Vec<BuildingSeed>,
    /// Obstacles to place.
    pub obstacles: Vec<ObstacleSeed>,
    /// Beds to place.
    pub beds: Vec<BedSeed>,
    /// Kaiju to place.
    pub kaijus: Vec<KaijuSeed>,
}

impl MapLayout {
    /// Total number of entries across all entity families.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buildings.len() + self.obstacles.len() + self.beds.len() + self.kaijus.len()
    }

    /// Reports whether the layout contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Layout entry describing a building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingSeed {
    /// Cell the building occupies.
    pub cell: CellCoord,
    /// Category of the building.
    pub kind: BuildingKind,
}

/// Layout entry describing an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleSeed {
    /// Cell the obstacle occupies.
    pub cell: CellCoord,
    /// Category of the obstacle.
    pub kind: ObstacleKind,
}

/// Layout entry describing a bed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedSeed {
    /// Cell the bed occupies.
    pub cell: CellCoord,
    /// Kaiju kind the bed belongs to.
    pub owner: KaijuKind,
    /// Priority ranking of the bed.
    pub tier: BedTier,
}

/// Layout entry describing a kaiju.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KaijuSeed {
    /// Cell the kaiju starts in.
    pub cell: CellCoord,
    /// Family of the kaiju.
    pub kind: KaijuKind,
    /// Direction the kaiju initially faces.
    pub facing: Direction,
}

/// Reasons a floor command placement may be rejected by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// No building is visible at the requested cell.
    #[error("no building occupies the requested cell")]
    MissingBuilding,
    /// The floor index was neither 0 nor 1.
    #[error("floor {0} does not exist; buildings have floors 0 and 1")]
    InvalidFloor(u32),
    /// The floor already carries a command.
    #[error("the floor already carries a command")]
    FloorOccupied,
    /// The remaining budget cannot cover the command's price.
    #[error("command costs {price} but only {remaining} remains")]
    InsufficientBudget {
        /// Price of the rejected command.
        price: u32,
        /// Budget remaining at the time of the request.
        remaining: u32,
    },
}

/// Reasons an entity may not be written to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum EntityPlacementError {
    /// The entity's position lies outside the grid.
    #[error("cell lies outside the grid")]
    OutOfBounds,
    /// Another entity already occupies the cell.
    #[error("cell is already occupied")]
    Occupied,
}

/// Reasons a simulation step may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum AdvanceError {
    /// The move limit was reached or every kaiju is dead or home.
    #[error("the session is over")]
    GameOver,
}

/// Immutable representation of a single kaiju's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KaijuSnapshot {
    /// Unique identifier assigned to the kaiju.
    pub id: EntityId,
    /// Cell currently occupied by the kaiju.
    pub cell: CellCoord,
    /// Family of the kaiju.
    pub kind: KaijuKind,
    /// Current power.
    pub power: u64,
    /// Current facing.
    pub facing: Direction,
    /// Indicates whether the kaiju sits out its next step.
    pub immobilized: bool,
    /// Indicates whether the kaiju reached its bed.
    pub home: bool,
}

/// Immutable representation of a single building's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildingSnapshot {
    /// Unique identifier assigned to the building.
    pub id: EntityId,
    /// Cell occupied by the building.
    pub cell: CellCoord,
    /// Category of the building.
    pub kind: BuildingKind,
    /// Number of floors still standing.
    pub intact_floors: u8,
    /// Commands attached to the lower and upper floor respectively.
    pub floors: [Option<FloorCommand>; 2],
}

/// Immutable representation of an obstacle used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObstacleSnapshot {
    /// Unique identifier assigned to the obstacle.
    pub id: EntityId,
    /// Cell occupied by the obstacle.
    pub cell: CellCoord,
    /// Category of the obstacle.
    pub kind: ObstacleKind,
}

/// Immutable representation of a bed used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BedSnapshot {
    /// Unique identifier assigned to the bed.
    pub id: EntityId,
    /// Cell occupied by the bed.
    pub cell: CellCoord,
    /// Kaiju kind the bed belongs to.
    pub owner: KaijuKind,
    /// Priority ranking of the bed.
    pub tier: BedTier,
}

/// Snapshot of the visible occupant of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellSnapshot {
    /// A kaiju stands in the cell.
    Kaiju(KaijuSnapshot),
    /// A building stands in the cell.
    Building(BuildingSnapshot),
    /// An obstacle lies in the cell.
    Obstacle(ObstacleSnapshot),
    /// A bed lies in the cell.
    Bed(BedSnapshot),
}

/// Read-only snapshot of every grid cell in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridView {
    rows: u32,
    columns: u32,
    cells: Vec<Option<CellSnapshot>>,
}

impl GridView {
    /// Creates a grid view from row-major cell snapshots.
    #[must_use]
    pub fn new(rows: u32, columns: u32, cells: Vec<Option<CellSnapshot>>) -> Self {
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Number of rows captured by the view.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns captured by the view.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Returns the visible occupant of the provided cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<&CellSnapshot> {
        if cell.row() >= self.rows || cell.column() >= self.columns {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        self.cells.get(row * width + column)?.as_ref()
    }
}

/// Read-only snapshot describing all kaiju on the board.
#[derive(Clone, Debug, Default)]
pub struct KaijuView {
    snapshots: Vec<KaijuSnapshot>,
}

impl KaijuView {
    /// Creates a new kaiju view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<KaijuSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured kaiju snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &KaijuSnapshot> {
        self.snapshots.iter()
    }
}

/// Session counters exposed to presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionStatus {
    /// Accumulated score.
    pub score: u64,
    /// Number of steps taken so far.
    pub moves_taken: u32,
    /// Number of steps after which the session ends.
    pub move_limit: u32,
    /// Budget left for purchasing floor commands.
    pub budget_remaining: u32,
    /// Budget the session started with.
    pub initial_budget: u32,
    /// Indicates whether the session reached its terminal state.
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::{
        command_catalog, BuildingKind, CellCoord, Direction, EntityId, FloorCommand,
        FloorCommandKind, GameConfig, KaijuKind, PlacementError,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn step_moves_one_cell_in_each_direction() {
        let origin = CellCoord::new(2, 2);
        assert_eq!(origin.step(Direction::North), Some(CellCoord::new(1, 2)));
        assert_eq!(origin.step(Direction::South), Some(CellCoord::new(3, 2)));
        assert_eq!(origin.step(Direction::East), Some(CellCoord::new(2, 3)));
        assert_eq!(origin.step(Direction::West), Some(CellCoord::new(2, 1)));
    }

    #[test]
    fn step_off_the_origin_edges_yields_none() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Direction::North), None);
        assert_eq!(corner.step(Direction::West), None);
    }

    #[test]
    fn reversing_twice_is_identity() {
        for direction in [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ] {
            assert_ne!(direction.reversed(), direction);
            assert_eq!(direction.reversed().reversed(), direction);
        }
    }

    #[test]
    fn catalog_prices_are_fixed() {
        let catalog = command_catalog();
        assert_eq!(catalog.len(), 6);
        for command in catalog {
            let expected = match command.kind() {
                FloorCommandKind::TurnDirection(_) => 10,
                FloorCommandKind::Stomp => 20,
                FloorCommandKind::PowerUp => 30,
            };
            assert_eq!(command.price(), expected);
        }
        assert_eq!(catalog.iter().filter(|command| command.is_stomp()).count(), 1);
    }

    #[test]
    fn kaiju_and_building_constants_match_rules() {
        assert_eq!(KaijuKind::Blue.initial_power(), 3_000);
        assert_eq!(KaijuKind::Green.initial_power(), 2_000);
        assert_eq!(KaijuKind::Red.initial_power(), 1_000);
        assert_eq!(BuildingKind::HighValue.value_per_floor(), 500);
        assert_eq!(BuildingKind::LowValue.value_per_floor(), 250);
        assert_eq!(BuildingKind::PowerPlant.value_per_floor(), 0);
    }

    #[test]
    fn default_config_matches_reference_session() {
        let config = GameConfig::default();
        assert_eq!((config.rows, config.columns), (5, 5));
        assert_eq!(config.move_limit, 15);
        assert_eq!(config.initial_budget, 110);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn entity_id_round_trips_through_bincode() {
        assert_round_trip(&EntityId::new(42));
    }

    #[test]
    fn floor_command_round_trips_through_bincode() {
        assert_round_trip(&FloorCommand::turn(Direction::West));
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::InsufficientBudget {
            price: 30,
            remaining: 10,
        });
    }

    #[test]
    fn placement_error_messages_name_the_problem() {
        assert_eq!(
            PlacementError::InvalidFloor(2).to_string(),
            "floor 2 does not exist; buildings have floors 0 and 1"
        );
    }
}
