//! Board invariants: sanity checks that detect grid and index drift.
//!
//! These should never report anything on a board driven only through its
//! public operations. Tests run them after every mutation.

use std::{collections::BTreeMap, fmt};

use kaiju_rampage_core::{CellCoord, EntityId, EntityKind};

use crate::{Board, Entity};

/// Invariant violation found on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

const KINDS: [EntityKind; 4] = [
    EntityKind::Kaiju,
    EntityKind::Building,
    EntityKind::Obstacle,
    EntityKind::Bed,
];

/// Checks grid/index consistency and per-entity invariants.
///
/// Returns every violation found, or an empty list when the board is sound.
#[must_use]
pub fn check_invariants(board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut report = |message: String| violations.push(InvariantViolation { message });

    let mut grid_refs: BTreeMap<EntityId, CellCoord> = BTreeMap::new();
    for (cell, slot) in board.grid.iter() {
        if slot.covered.is_some() && !is_kaiju(board, slot.visible) {
            report(format!("{cell:?} covers an entity without a kaiju on top"));
        }
        if is_kaiju(board, slot.covered) {
            report(format!("{cell:?} has a kaiju covered by another entity"));
        }
        for id in [slot.visible, slot.covered].into_iter().flatten() {
            if let Some(previous) = grid_refs.insert(id, cell) {
                report(format!("{id:?} appears at both {previous:?} and {cell:?}"));
            }
        }
    }

    for (id, record) in board.entities.iter() {
        let indexed = KINDS
            .iter()
            .filter(|kind| board.entities.index(**kind).contains(&id))
            .count();
        if indexed != 1 || !board.entities.index(record.entity.kind()).contains(&id) {
            report(format!("{id:?} is listed in {indexed} indices"));
        }
        match grid_refs.remove(&id) {
            Some(cell) if cell == record.cell => {}
            Some(cell) => report(format!(
                "{id:?} is declared at {:?} but drawn at {cell:?}",
                record.cell
            )),
            None => report(format!("{id:?} is missing from the grid")),
        }
        if let Entity::Kaiju(kaiju) = &record.entity {
            if kaiju.power() == 0 && kaiju.is_alive() {
                report(format!("{id:?} is alive with zero power"));
            }
        }
        if let Entity::Building(building) = &record.entity {
            if building.is_destroyed() {
                report(format!("{id:?} is destroyed but still on the board"));
            }
        }
    }

    for kind in KINDS {
        for id in board.entities.index(kind) {
            if board.entities.get(*id).is_none() {
                report(format!("{kind:?} index holds unknown {id:?}"));
            }
        }
    }

    for (id, cell) in grid_refs {
        report(format!("{cell:?} references unknown {id:?}"));
    }

    violations
}

fn is_kaiju(board: &Board, id: Option<EntityId>) -> bool {
    matches!(id.and_then(|id| board.entity(id)), Some(Entity::Kaiju(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Building, Kaiju};
    use kaiju_rampage_core::{BuildingKind, Direction, KaijuKind};

    #[test]
    fn fresh_board_is_sound() {
        assert!(check_invariants(&Board::default()).is_empty());
    }

    #[test]
    fn layered_cells_are_sound() {
        let mut board = Board::default();
        let kaiju = board
            .place_entity(
                CellCoord::new(0, 0),
                Entity::Kaiju(Kaiju::new(KaijuKind::Red, Direction::East)),
            )
            .expect("placed");
        let _ = board
            .place_entity(
                CellCoord::new(0, 1),
                Entity::Building(Building::new(BuildingKind::LowValue)),
            )
            .expect("placed");
        assert!(board.move_entity(kaiju, CellCoord::new(0, 1)));
        assert_eq!(check_invariants(&board), Vec::new());
    }

    #[test]
    fn orphaned_grid_reference_is_reported() {
        let mut board = Board::default();
        let _ = board.grid.occupy(CellCoord::new(2, 2), EntityId::new(99));
        let violations = check_invariants(&board);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("unknown"));
    }
}
