//! Plain-text rendering of board views.

use std::fmt::Write as _;

use kaiju_rampage_core::{
    BuildingKind, CellCoord, CellSnapshot, FloorCommand, FloorCommandKind, GridView, KaijuKind,
    KaijuView, ObstacleKind, SessionStatus,
};

/// Renders the grid one row per line.
///
/// Kaiju are upper-case (`B`, `G`, `R`) and their beds lower-case. Buildings
/// show as `H`, `L` or `P`, lower-cased once a floor is broken. Mud is `~`,
/// spike traps `^` and boulders `o`.
pub(crate) fn render_grid(view: &GridView) -> String {
    let mut out = String::new();
    for row in 0..view.rows() {
        let line: Vec<String> = (0..view.columns())
            .map(|column| {
                view.occupant(CellCoord::new(row, column))
                    .map_or('.', glyph)
                    .to_string()
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

fn glyph(snapshot: &CellSnapshot) -> char {
    match snapshot {
        CellSnapshot::Kaiju(kaiju) => kaiju_letter(kaiju.kind),
        CellSnapshot::Bed(bed) => kaiju_letter(bed.owner).to_ascii_lowercase(),
        CellSnapshot::Building(building) => {
            let letter = match building.kind {
                BuildingKind::HighValue => 'H',
                BuildingKind::LowValue => 'L',
                BuildingKind::PowerPlant => 'P',
            };
            if building.intact_floors < 2 {
                letter.to_ascii_lowercase()
            } else {
                letter
            }
        }
        CellSnapshot::Obstacle(obstacle) => match obstacle.kind {
            ObstacleKind::Mud => '~',
            ObstacleKind::SpikeTrap => '^',
            ObstacleKind::Boulder => 'o',
        },
    }
}

const fn kaiju_letter(kind: KaijuKind) -> char {
    match kind {
        KaijuKind::Blue => 'B',
        KaijuKind::Green => 'G',
        KaijuKind::Red => 'R',
    }
}

/// One line per kaiju with its power and state.
pub(crate) fn render_kaiju(view: &KaijuView) -> String {
    let mut out = String::new();
    for kaiju in view.iter() {
        let state = if kaiju.home {
            "home"
        } else if kaiju.immobilized {
            "stuck"
        } else {
            "roaming"
        };
        let _ = writeln!(
            out,
            "{:<5} at ({}, {}) facing {:?}, power {}, {state}",
            format!("{:?}", kaiju.kind),
            kaiju.cell.row(),
            kaiju.cell.column(),
            kaiju.facing,
            kaiju.power
        );
    }
    out
}

/// Summary line with score, moves and budget.
pub(crate) fn render_status(status: &SessionStatus) -> String {
    format!(
        "score {} | move {}/{} | budget {}/{}{}",
        status.score,
        status.moves_taken,
        status.move_limit,
        status.budget_remaining,
        status.initial_budget,
        if status.game_over { " | game over" } else { "" }
    )
}

/// Catalog line such as `stomp (20)`.
pub(crate) fn describe_command(command: FloorCommand) -> String {
    let name = match command.kind() {
        FloorCommandKind::TurnDirection(direction) => format!("turn {direction:?}").to_lowercase(),
        FloorCommandKind::Stomp => "stomp".to_owned(),
        FloorCommandKind::PowerUp => "power-up".to_owned(),
    };
    format!("{name} ({})", command.price())
}
