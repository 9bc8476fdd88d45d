#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Kaiju Rampage experience.

use kaiju_rampage_board::{query, Board};
use kaiju_rampage_core::{FloorCommand, GridView, SessionStatus};

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self, board: &Board) -> &'static str {
        query::welcome_banner(board)
    }

    /// Board dimensions as `(rows, columns)`.
    #[must_use]
    pub fn dimensions(&self, board: &Board) -> (u32, u32) {
        (board.rows(), board.columns())
    }

    /// Floor commands the player may purchase before the first step.
    #[must_use]
    pub fn catalog(&self, board: &Board) -> [FloorCommand; 6] {
        query::catalog(board)
    }

    /// Exposes the grid contents required for rendering.
    #[must_use]
    pub fn grid_view(&self, board: &Board) -> GridView {
        query::grid_view(board)
    }

    /// Exposes the session counters shown alongside the board.
    #[must_use]
    pub fn status(&self, board: &Board) -> SessionStatus {
        query::status(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaiju_rampage_core::{GameConfig, STOMP_PRICE, WELCOME_BANNER};

    #[test]
    fn greets_with_fresh_session_data() {
        let board = Board::new(GameConfig {
            rows: 4,
            columns: 6,
            ..GameConfig::default()
        });
        let bootstrap = Bootstrap;

        assert_eq!(bootstrap.welcome_banner(&board), WELCOME_BANNER);
        assert_eq!(bootstrap.dimensions(&board), (4, 6));
        assert_eq!(bootstrap.grid_view(&board).columns(), 6);
        assert_eq!(bootstrap.catalog(&board)[4].price(), STOMP_PRICE);

        let status = bootstrap.status(&board);
        assert_eq!(status.budget_remaining, status.initial_budget);
        assert_eq!(status.moves_taken, 0);
    }
}
