//! Floor command placement: the only path through which the budget is spent.

use kaiju_rampage_core::{CellCoord, EntityId, FloorCommand, PlacementError, FLOORS_PER_BUILDING};

use crate::{Board, Entity};

/// Validates and pays for a floor command, then attaches it to the building.
///
/// Every check runs before the budget is debited, so a rejected request
/// leaves the board untouched. Floor indices are fixed: `0` is the lower
/// floor and `1` the upper one, however many floors are still standing.
pub(crate) fn place(
    board: &mut Board,
    cell: CellCoord,
    floor: u32,
    command: FloorCommand,
) -> Result<EntityId, PlacementError> {
    let building_id = board
        .entity_at(cell)
        .filter(|id| matches!(board.entity(*id), Some(Entity::Building(_))))
        .ok_or(PlacementError::MissingBuilding)?;

    let floor_index = usize::try_from(floor)
        .ok()
        .filter(|index| *index < usize::from(FLOORS_PER_BUILDING))
        .ok_or(PlacementError::InvalidFloor(floor))?;

    if board
        .building(building_id)
        .and_then(|building| building.command(floor_index))
        .is_some()
    {
        return Err(PlacementError::FloorOccupied);
    }

    let price = command.price();
    let remaining = board.budget_remaining();
    if !board.spend_budget(price) {
        return Err(PlacementError::InsufficientBudget { price, remaining });
    }

    if let Some(building) = board.building_mut(building_id) {
        building.set_command(floor_index, command);
    }
    log::debug!(
        "placed {:?} on floor {floor} of building {} at ({}, {}); budget {}",
        command.kind(),
        building_id.get(),
        cell.row(),
        cell.column(),
        board.budget_remaining()
    );
    Ok(building_id)
}
