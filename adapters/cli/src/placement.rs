//! Parsing of `--place ROW,COL,FLOOR,COMMAND` requests.

use kaiju_rampage_core::{CellCoord, Command, Direction, FloorCommand};

/// Floor command purchase requested on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PlacementRequest {
    pub(crate) cell: CellCoord,
    pub(crate) floor: u32,
    pub(crate) command: FloorCommand,
}

impl PlacementRequest {
    pub(crate) fn into_command(self) -> Command {
        Command::PlaceFloorCommand {
            cell: self.cell,
            floor: self.floor,
            command: self.command,
        }
    }
}

/// Parses a placement request for clap.
pub(crate) fn parse_placement(value: &str) -> Result<PlacementRequest, String> {
    let fields: Vec<&str> = value.split(',').map(str::trim).collect();
    let [row, column, floor, command] = fields.as_slice() else {
        return Err(format!(
            "expected ROW,COL,FLOOR,COMMAND but got '{value}'"
        ));
    };

    let number = |field: &str, name: &str| {
        field
            .parse::<u32>()
            .map_err(|_| format!("{name} '{field}' is not a non-negative integer"))
    };

    Ok(PlacementRequest {
        cell: CellCoord::new(number(row, "row")?, number(column, "column")?),
        floor: number(floor, "floor")?,
        command: parse_command(command)?,
    })
}

fn parse_command(value: &str) -> Result<FloorCommand, String> {
    let command = match value.to_ascii_lowercase().as_str() {
        "north" | "n" => FloorCommand::turn(Direction::North),
        "south" | "s" => FloorCommand::turn(Direction::South),
        "east" | "e" => FloorCommand::turn(Direction::East),
        "west" | "w" => FloorCommand::turn(Direction::West),
        "stomp" => FloorCommand::stomp(),
        "power-up" | "powerup" => FloorCommand::power_up(),
        _ => {
            return Err(format!(
                "unknown command '{value}'; expected north, south, east, west, stomp or power-up"
            ))
        }
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_requests() {
        assert_eq!(
            parse_placement("2, 3, 1, stomp"),
            Ok(PlacementRequest {
                cell: CellCoord::new(2, 3),
                floor: 1,
                command: FloorCommand::stomp(),
            })
        );
        assert_eq!(
            parse_placement("0,0,0,W").map(|request| request.command),
            Ok(FloorCommand::turn(Direction::West))
        );
    }

    #[test]
    fn reports_malformed_requests() {
        assert!(parse_placement("1,2,stomp").is_err());
        assert!(parse_placement("1,-2,0,stomp").is_err());
        assert!(parse_placement("1,2,0,jump")
            .unwrap_err()
            .contains("unknown command"));
    }
}
