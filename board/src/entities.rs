//! Entity model and the arena that owns every board occupant.

use std::collections::BTreeSet;

use kaiju_rampage_core::{
    BedTier, BuildingKind, CellCoord, Direction, EntityId, EntityKind, FloorCommand, KaijuKind,
    ObstacleKind, FLOORS_PER_BUILDING,
};

/// Closed set of board occupants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// Mobile agent.
    Kaiju(Kaiju),
    /// Breakable structure.
    Building(Building),
    /// Stationary hazard.
    Obstacle(Obstacle),
    /// Stationary goal.
    Bed(Bed),
}

impl Entity {
    /// Family the entity belongs to.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Kaiju(_) => EntityKind::Kaiju,
            Self::Building(_) => EntityKind::Building,
            Self::Obstacle(_) => EntityKind::Obstacle,
            Self::Bed(_) => EntityKind::Bed,
        }
    }
}

/// Mobile agent that walks one cell per step in the direction it faces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Kaiju {
    kind: KaijuKind,
    power: u64,
    facing: Direction,
    immobilized: bool,
    alive: bool,
    home: bool,
}

impl Kaiju {
    /// Creates a kaiju with the initial power of its kind.
    #[must_use]
    pub const fn new(kind: KaijuKind, facing: Direction) -> Self {
        Self {
            kind,
            power: kind.initial_power(),
            facing,
            immobilized: false,
            alive: true,
            home: false,
        }
    }

    /// Overrides the starting power. A power of zero yields a dead kaiju.
    #[must_use]
    pub const fn with_power(mut self, power: u64) -> Self {
        self.power = power;
        self.alive = power > 0;
        self
    }

    /// Family of the kaiju.
    #[must_use]
    pub const fn kind(&self) -> KaijuKind {
        self.kind
    }

    /// Current power.
    #[must_use]
    pub const fn power(&self) -> u64 {
        self.power
    }

    /// Current facing.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Indicates whether the kaiju sits out its next step.
    #[must_use]
    pub const fn is_immobilized(&self) -> bool {
        self.immobilized
    }

    /// Indicates whether the kaiju is alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Indicates whether the kaiju reached its bed.
    #[must_use]
    pub const fn is_home(&self) -> bool {
        self.home
    }

    /// Alive and not yet home.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.alive && !self.home
    }

    pub(crate) fn add_power(&mut self, amount: u64) {
        self.power = self.power.saturating_add(amount);
    }

    pub(crate) fn double_power(&mut self) {
        self.power = self.power.saturating_mul(2);
    }

    pub(crate) fn halve_power(&mut self) {
        self.power /= 2;
        if self.power == 0 {
            self.alive = false;
        }
    }

    pub(crate) fn kill(&mut self) {
        self.power = 0;
        self.alive = false;
    }

    pub(crate) fn immobilize(&mut self) {
        self.immobilized = true;
    }

    /// Clears the immobilized flag, reporting whether it was set.
    pub(crate) fn take_immobilized(&mut self) -> bool {
        std::mem::replace(&mut self.immobilized, false)
    }

    pub(crate) fn reverse_facing(&mut self) {
        self.facing = self.facing.reversed();
    }

    pub(crate) fn mark_home(&mut self) {
        self.home = true;
    }
}

/// Two-floor structure that yields points as its floors break.
///
/// Floor `0` is the lower floor and floor `1` the upper one. Floors break
/// top-down, so the exposed floor is always `intact_floors - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Building {
    kind: BuildingKind,
    floors: [Option<FloorCommand>; FLOORS_PER_BUILDING as usize],
    intact_floors: u8,
}

impl Building {
    /// Creates an intact building without commands.
    #[must_use]
    pub const fn new(kind: BuildingKind) -> Self {
        Self {
            kind,
            floors: [None; FLOORS_PER_BUILDING as usize],
            intact_floors: FLOORS_PER_BUILDING,
        }
    }

    /// Category of the building.
    #[must_use]
    pub const fn kind(&self) -> BuildingKind {
        self.kind
    }

    /// Number of floors still standing.
    #[must_use]
    pub const fn intact_floors(&self) -> u8 {
        self.intact_floors
    }

    /// Command attached to the provided floor, if any.
    #[must_use]
    pub fn command(&self, floor: usize) -> Option<FloorCommand> {
        self.floors.get(floor).copied().flatten()
    }

    /// Commands attached to the lower and upper floor.
    #[must_use]
    pub const fn commands(&self) -> [Option<FloorCommand>; FLOORS_PER_BUILDING as usize] {
        self.floors
    }

    /// Index of the topmost intact floor, or `None` once destroyed.
    #[must_use]
    pub fn exposed_floor(&self) -> Option<usize> {
        usize::from(self.intact_floors).checked_sub(1)
    }

    /// Reports whether every floor has been broken.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.intact_floors == 0
    }

    pub(crate) fn set_command(&mut self, floor: usize, command: FloorCommand) {
        if let Some(slot) = self.floors.get_mut(floor) {
            *slot = Some(command);
        }
    }

    /// Breaks the exposed floor, clearing its command and returning its value.
    pub(crate) fn break_exposed_floor(&mut self) -> Option<u64> {
        let floor = self.exposed_floor()?;
        self.intact_floors -= 1;
        if let Some(slot) = self.floors.get_mut(floor) {
            *slot = None;
        }
        Some(self.kind.value_per_floor())
    }
}

/// Stationary hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Obstacle {
    kind: ObstacleKind,
}

impl Obstacle {
    /// Creates an obstacle of the provided kind.
    #[must_use]
    pub const fn new(kind: ObstacleKind) -> Self {
        Self { kind }
    }

    /// Category of the obstacle.
    #[must_use]
    pub const fn kind(&self) -> ObstacleKind {
        self.kind
    }
}

/// Goal cell owned by one kaiju kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bed {
    owner: KaijuKind,
    tier: BedTier,
}

impl Bed {
    /// Creates a bed for the provided kaiju kind.
    #[must_use]
    pub const fn new(owner: KaijuKind, tier: BedTier) -> Self {
        Self { owner, tier }
    }

    /// Kaiju kind the bed belongs to.
    #[must_use]
    pub const fn owner(&self) -> KaijuKind {
        self.owner
    }

    /// Priority ranking of the bed.
    #[must_use]
    pub const fn tier(&self) -> BedTier {
        self.tier
    }
}

/// Entity together with the cell it occupies.
#[derive(Clone, Debug)]
pub(crate) struct EntityRecord {
    pub(crate) cell: CellCoord,
    pub(crate) entity: Entity,
}

/// Arena that owns entities and keeps one identity index per entity family.
#[derive(Debug, Default)]
pub(crate) struct EntityArena {
    slots: Vec<Option<EntityRecord>>,
    kaijus: BTreeSet<EntityId>,
    buildings: BTreeSet<EntityId>,
    obstacles: BTreeSet<EntityId>,
    beds: BTreeSet<EntityId>,
}

impl EntityArena {
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.kaijus.clear();
        self.buildings.clear();
        self.obstacles.clear();
        self.beds.clear();
    }

    pub(crate) fn insert(&mut self, cell: CellCoord, entity: Entity) -> EntityId {
        let id = EntityId::new(u32::try_from(self.slots.len()).unwrap_or(u32::MAX));
        let _ = self.index_mut(entity.kind()).insert(id);
        self.slots.push(Some(EntityRecord { cell, entity }));
        id
    }

    pub(crate) fn remove(&mut self, id: EntityId) -> Option<EntityRecord> {
        let record = self.slot_mut(id)?.take()?;
        let _ = self.index_mut(record.entity.kind()).remove(&id);
        Some(record)
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<&EntityRecord> {
        let index = usize::try_from(id.get()).ok()?;
        self.slots.get(index)?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut EntityRecord> {
        self.slot_mut(id)?.as_mut()
    }

    pub(crate) fn index(&self, kind: EntityKind) -> &BTreeSet<EntityId> {
        match kind {
            EntityKind::Kaiju => &self.kaijus,
            EntityKind::Building => &self.buildings,
            EntityKind::Obstacle => &self.obstacles,
            EntityKind::Bed => &self.beds,
        }
    }

    /// Iterates over every live record in identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (EntityId, &EntityRecord)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let id = EntityId::new(u32::try_from(index).ok()?);
            slot.as_ref().map(|record| (id, record))
        })
    }

    fn index_mut(&mut self, kind: EntityKind) -> &mut BTreeSet<EntityId> {
        match kind {
            EntityKind::Kaiju => &mut self.kaijus,
            EntityKind::Building => &mut self.buildings,
            EntityKind::Obstacle => &mut self.obstacles,
            EntityKind::Bed => &mut self.beds,
        }
    }

    fn slot_mut(&mut self, id: EntityId) -> Option<&mut Option<EntityRecord>> {
        let index = usize::try_from(id.get()).ok()?;
        self.slots.get_mut(index)
    }
}
