//! Turn engine: resolves exactly one simulation step per call.
//!
//! Eligible kaiju (alive and not home) act one at a time in ascending order
//! of power, so a weaker kaiju always resolves before a stronger one that
//! might walk into the same cell. The order is rebuilt on every step and
//! power gained mid-step only affects later steps. Each kaiju looks at the
//! visible occupant of the cell it faces and resolves the interaction:
//!
//! | occupant      | effect                                                         |
//! |---------------|----------------------------------------------------------------|
//! | empty         | move                                                           |
//! | kaiju         | stronger survives, weaker dies; ties leave both in place       |
//! | building      | break one floor (two with a stomp), then move in               |
//! | mud           | sit out the next step, obstacle consumed, move in              |
//! | spike trap    | power halved; die at zero, else obstacle consumed and move in  |
//! | boulder       | facing reversed, no movement                                   |
//! | own bed       | arrival bonus, score the power, move in                        |
//! | foreign bed   | blocked                                                        |

use std::cmp::Ordering;

use kaiju_rampage_core::{
    AdvanceError, BlockReason, BuildingKind, CellCoord, CombatOutcome, EntityId, EntityKind,
    Event, KaijuKind, ObstacleKind,
};

use crate::{Board, Entity};

/// Flat bonus granted to the first kaiju to arrive home.
const FIRST_ARRIVAL_BONUS: u64 = 2_000;
/// Multiple of its own power added to the second arrival (net triple).
const SECOND_ARRIVAL_FACTOR: u64 = 2;
/// Multiple of its own power added to the third arrival (net quintuple).
const THIRD_ARRIVAL_FACTOR: u64 = 4;

/// What the mover finds in the cell it faces.
#[derive(Clone, Copy, Debug)]
enum Contact {
    Empty,
    Kaiju(EntityId),
    Building(EntityId),
    Obstacle(EntityId, ObstacleKind),
    Bed(EntityId, KaijuKind),
}

pub(crate) fn advance(board: &mut Board, out_events: &mut Vec<Event>) -> Result<(), AdvanceError> {
    if board.is_game_over() {
        log::debug!(
            "advance refused: session over after {} moves",
            board.moves_taken
        );
        return Err(AdvanceError::GameOver);
    }

    board.moves_taken = board.moves_taken.saturating_add(1);
    out_events.push(Event::StepStarted {
        move_index: board.moves_taken,
    });

    let order = eligible_order(board);
    log::debug!(
        "step {}/{}: {} eligible kaiju",
        board.moves_taken,
        board.config.move_limit,
        order.len()
    );
    for kaiju in order {
        resolve(board, kaiju, out_events);
    }
    log::debug!("step {} done, score {}", board.moves_taken, board.score);
    Ok(())
}

/// Eligible kaiju sorted by ascending power, identifier breaking ties.
fn eligible_order(board: &Board) -> Vec<EntityId> {
    let mut order: Vec<(u64, EntityId)> = board
        .entity_ids(EntityKind::Kaiju)
        .filter_map(|id| {
            board
                .kaiju(id)
                .filter(|kaiju| kaiju.is_eligible())
                .map(|kaiju| (kaiju.power(), id))
        })
        .collect();
    order.sort_unstable();
    order.into_iter().map(|(_, id)| id).collect()
}

fn resolve(board: &mut Board, id: EntityId, out_events: &mut Vec<Event>) {
    // An earlier mover may have killed this kaiju during the same step.
    let Some(kaiju) = board.kaiju_mut(id) else {
        return;
    };
    if !kaiju.is_eligible() {
        return;
    }
    if kaiju.take_immobilized() {
        log::trace!("kaiju {} rests", id.get());
        out_events.push(Event::KaijuRested { kaiju: id });
        return;
    }
    let facing = kaiju.facing();
    let Some(from) = board.position(id) else {
        return;
    };

    let Some(target) = from.step(facing).filter(|cell| board.contains(*cell)) else {
        log::trace!("kaiju {} faces the edge", id.get());
        out_events.push(Event::KaijuBlocked {
            kaiju: id,
            reason: BlockReason::Edge,
        });
        return;
    };

    match contact(board, target) {
        Contact::Empty => move_kaiju(board, id, target, out_events),
        Contact::Kaiju(defender) => fight(board, id, defender, target, out_events),
        Contact::Building(building) => smash(board, id, building, target, out_events),
        Contact::Obstacle(obstacle, kind) => {
            trample(board, id, obstacle, kind, target, out_events)
        }
        Contact::Bed(bed, owner) => arrive(board, id, bed, owner, target, out_events),
    }
}

fn contact(board: &Board, cell: CellCoord) -> Contact {
    let Some(occupant) = board.entity_at(cell) else {
        return Contact::Empty;
    };
    match board.entity(occupant) {
        Some(Entity::Kaiju(_)) => Contact::Kaiju(occupant),
        Some(Entity::Building(_)) => Contact::Building(occupant),
        Some(Entity::Obstacle(obstacle)) => Contact::Obstacle(occupant, obstacle.kind()),
        Some(Entity::Bed(bed)) => Contact::Bed(occupant, bed.owner()),
        None => Contact::Empty,
    }
}

fn move_kaiju(board: &mut Board, id: EntityId, to: CellCoord, out_events: &mut Vec<Event>) {
    let Some(from) = board.position(id) else {
        return;
    };
    if board.move_entity(id, to) {
        log::trace!(
            "kaiju {} moves ({}, {}) -> ({}, {})",
            id.get(),
            from.row(),
            from.column(),
            to.row(),
            to.column()
        );
        out_events.push(Event::KaijuMoved {
            kaiju: id,
            from,
            to,
        });
    }
}

fn defeat(board: &mut Board, id: EntityId, out_events: &mut Vec<Event>) {
    let Some(cell) = board.position(id) else {
        return;
    };
    if let Some(kaiju) = board.kaiju_mut(id) {
        kaiju.kill();
    }
    if board.remove_entity(id) {
        log::trace!("kaiju {} defeated", id.get());
        out_events.push(Event::KaijuDefeated { kaiju: id, cell });
    }
}

fn change_power(
    board: &mut Board,
    id: EntityId,
    out_events: &mut Vec<Event>,
    change: impl FnOnce(&mut crate::Kaiju),
) {
    let Some(kaiju) = board.kaiju_mut(id) else {
        return;
    };
    let from = kaiju.power();
    change(kaiju);
    let to = kaiju.power();
    if from != to {
        out_events.push(Event::PowerChanged {
            kaiju: id,
            from,
            to,
        });
    }
}

fn fight(
    board: &mut Board,
    attacker: EntityId,
    defender: EntityId,
    target: CellCoord,
    out_events: &mut Vec<Event>,
) {
    let (Some(attack), Some(defence)) = (
        board.kaiju(attacker).map(|kaiju| kaiju.power()),
        board.kaiju(defender).map(|kaiju| kaiju.power()),
    ) else {
        return;
    };

    let outcome = match attack.cmp(&defence) {
        Ordering::Greater => CombatOutcome::AttackerWon,
        Ordering::Less => CombatOutcome::DefenderWon,
        Ordering::Equal => CombatOutcome::Tie,
    };
    log::trace!(
        "kaiju {} ({attack}) fights kaiju {} ({defence}): {outcome:?}",
        attacker.get(),
        defender.get()
    );
    out_events.push(Event::CombatResolved {
        attacker,
        defender,
        outcome,
    });

    match outcome {
        CombatOutcome::AttackerWon => {
            defeat(board, defender, out_events);
            move_kaiju(board, attacker, target, out_events);
        }
        CombatOutcome::DefenderWon => defeat(board, attacker, out_events),
        CombatOutcome::Tie => {}
    }
}

fn smash(
    board: &mut Board,
    kaiju: EntityId,
    building_id: EntityId,
    target: CellCoord,
    out_events: &mut Vec<Event>,
) {
    let Some(building) = board.building_mut(building_id) else {
        return;
    };
    let stomped = building
        .exposed_floor()
        .and_then(|floor| building.command(floor))
        .is_some_and(|command| command.is_stomp());

    let mut floors = 0_u8;
    let mut points = 0_u64;
    let attempts = if stomped { 2 } else { 1 };
    for _ in 0..attempts {
        let Some(value) = building.break_exposed_floor() else {
            break;
        };
        floors += 1;
        points = points.saturating_add(value);
    }
    let kind = building.kind();
    let destroyed = building.is_destroyed();

    if floors > 0 {
        board.add_score(points);
        log::trace!(
            "kaiju {} breaks {floors} floor(s) of building {} for {points}",
            kaiju.get(),
            building_id.get()
        );
        out_events.push(Event::FloorsBroken {
            building: building_id,
            floors,
            points,
            stomped,
        });
    }

    if kind == BuildingKind::PowerPlant {
        change_power(board, kaiju, out_events, |state| state.double_power());
    }

    if destroyed && board.remove_entity(building_id) {
        out_events.push(Event::BuildingDestroyed {
            building: building_id,
            cell: target,
        });
    }

    move_kaiju(board, kaiju, target, out_events);
}

fn trample(
    board: &mut Board,
    kaiju: EntityId,
    obstacle: EntityId,
    kind: ObstacleKind,
    target: CellCoord,
    out_events: &mut Vec<Event>,
) {
    match kind {
        ObstacleKind::Mud => {
            if let Some(state) = board.kaiju_mut(kaiju) {
                state.immobilize();
            }
            out_events.push(Event::KaijuMired { kaiju });
            consume(board, obstacle, kind, out_events);
            move_kaiju(board, kaiju, target, out_events);
        }
        ObstacleKind::SpikeTrap => {
            change_power(board, kaiju, out_events, |state| state.halve_power());
            let alive = board.kaiju(kaiju).is_some_and(|state| state.is_alive());
            if alive {
                consume(board, obstacle, kind, out_events);
                move_kaiju(board, kaiju, target, out_events);
            } else {
                defeat(board, kaiju, out_events);
            }
        }
        ObstacleKind::Boulder => {
            let Some(state) = board.kaiju_mut(kaiju) else {
                return;
            };
            state.reverse_facing();
            let facing = state.facing();
            log::trace!("kaiju {} bounces, now facing {facing:?}", kaiju.get());
            out_events.push(Event::KaijuBounced { kaiju, facing });
        }
    }
}

fn consume(
    board: &mut Board,
    obstacle: EntityId,
    kind: ObstacleKind,
    out_events: &mut Vec<Event>,
) {
    if board.remove_entity(obstacle) {
        out_events.push(Event::ObstacleConsumed { obstacle, kind });
    }
}

fn arrive(
    board: &mut Board,
    kaiju: EntityId,
    bed: EntityId,
    owner: KaijuKind,
    target: CellCoord,
    out_events: &mut Vec<Event>,
) {
    if board.kaiju(kaiju).map(|state| state.kind()) != Some(owner) {
        out_events.push(Event::KaijuBlocked {
            kaiju,
            reason: BlockReason::ForeignBed,
        });
        return;
    }

    let slot = board
        .entity_ids(EntityKind::Kaiju)
        .filter_map(|id| board.kaiju(id))
        .filter(|state| state.is_home())
        .count();

    change_power(board, kaiju, out_events, |state| {
        let bonus = match slot {
            0 => FIRST_ARRIVAL_BONUS,
            1 => state.power().saturating_mul(SECOND_ARRIVAL_FACTOR),
            2 => state.power().saturating_mul(THIRD_ARRIVAL_FACTOR),
            _ => 0,
        };
        state.add_power(bonus);
    });

    let Some(state) = board.kaiju_mut(kaiju) else {
        return;
    };
    state.mark_home();
    let power = state.power();
    board.add_score(power);

    let slot = u32::try_from(slot).unwrap_or(u32::MAX);
    log::trace!(
        "kaiju {} arrives home in slot {slot} with power {power}",
        kaiju.get()
    );
    out_events.push(Event::KaijuArrived {
        kaiju,
        bed,
        slot,
        power,
    });
    move_kaiju(board, kaiju, target, out_events);
}
