//! Dense occupancy grid with room for one stationary entity beneath a kaiju.

use kaiju_rampage_core::{CellCoord, EntityId};

/// Occupants of a single cell.
///
/// `visible` is what the cell shows; `covered` holds the building or bed a
/// kaiju is standing on and is only ever set while `visible` holds a kaiju.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct CellSlot {
    pub(crate) visible: Option<EntityId>,
    pub(crate) covered: Option<EntityId>,
}

#[derive(Clone, Debug)]
pub(crate) struct OccupancyGrid {
    rows: u32,
    columns: u32,
    cells: Vec<CellSlot>,
}

impl OccupancyGrid {
    pub(crate) fn new(rows: u32, columns: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            rows,
            columns,
            cells: vec![CellSlot::default(); capacity],
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(CellSlot::default());
    }

    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        self.index(cell).is_some()
    }

    pub(crate) fn slot(&self, cell: CellCoord) -> Option<CellSlot> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    pub(crate) fn visible(&self, cell: CellCoord) -> Option<EntityId> {
        self.slot(cell).and_then(|slot| slot.visible)
    }

    pub(crate) fn covered(&self, cell: CellCoord) -> Option<EntityId> {
        self.slot(cell).and_then(|slot| slot.covered)
    }

    /// Makes `id` the visible occupant, tucking any current occupant beneath it.
    pub(crate) fn occupy(&mut self, cell: CellCoord, id: EntityId) -> bool {
        let Some(slot) = self.slot_mut(cell) else {
            return false;
        };
        if slot.covered.is_some() {
            return false;
        }
        slot.covered = slot.visible.replace(id);
        true
    }

    /// Removes `id` from the cell, surfacing whatever it covered.
    pub(crate) fn vacate(&mut self, cell: CellCoord, id: EntityId) -> bool {
        let Some(slot) = self.slot_mut(cell) else {
            return false;
        };
        if slot.visible == Some(id) {
            slot.visible = slot.covered.take();
            true
        } else if slot.covered == Some(id) {
            slot.covered = None;
            true
        } else {
            false
        }
    }

    /// Iterates over every cell in row-major order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (CellCoord, CellSlot)> + '_ {
        let width = self.columns.max(1);
        self.cells.iter().enumerate().filter_map(move |(index, slot)| {
            let index = u32::try_from(index).ok()?;
            Some((CellCoord::new(index / width, index % width), *slot))
        })
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    fn slot_mut(&mut self, cell: CellCoord) -> Option<&mut CellSlot> {
        let index = self.index(cell)?;
        self.cells.get_mut(index)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupying_a_taken_cell_covers_the_previous_occupant() {
        let mut grid = OccupancyGrid::new(2, 2);
        let cell = CellCoord::new(1, 1);
        let building = EntityId::new(0);
        let kaiju = EntityId::new(1);

        assert!(grid.occupy(cell, building));
        assert!(grid.occupy(cell, kaiju));
        assert_eq!(grid.visible(cell), Some(kaiju));
        assert_eq!(grid.covered(cell), Some(building));

        assert!(grid.vacate(cell, kaiju));
        assert_eq!(grid.visible(cell), Some(building));
        assert_eq!(grid.covered(cell), None);
    }

    #[test]
    fn a_cell_holds_at_most_two_layers() {
        let mut grid = OccupancyGrid::new(1, 1);
        let cell = CellCoord::new(0, 0);
        assert!(grid.occupy(cell, EntityId::new(0)));
        assert!(grid.occupy(cell, EntityId::new(1)));
        assert!(!grid.occupy(cell, EntityId::new(2)));
        assert_eq!(grid.visible(cell), Some(EntityId::new(1)));
    }

    #[test]
    fn vacating_the_covered_layer_keeps_the_visible_one() {
        let mut grid = OccupancyGrid::new(1, 1);
        let cell = CellCoord::new(0, 0);
        assert!(grid.occupy(cell, EntityId::new(0)));
        assert!(grid.occupy(cell, EntityId::new(1)));

        assert!(grid.vacate(cell, EntityId::new(0)));
        assert_eq!(grid.visible(cell), Some(EntityId::new(1)));
        assert_eq!(grid.covered(cell), None);
        assert!(!grid.vacate(cell, EntityId::new(0)));
    }

    #[test]
    fn out_of_bounds_cells_are_rejected() {
        let mut grid = OccupancyGrid::new(2, 3);
        let outside = CellCoord::new(2, 0);
        assert!(!grid.contains(outside));
        assert!(!grid.occupy(outside, EntityId::new(0)));
        assert!(grid.contains(CellCoord::new(1, 2)));
        assert_eq!(grid.dimensions(), (2, 3));
    }

    #[test]
    fn iteration_is_row_major() {
        let grid = OccupancyGrid::new(2, 3);
        let cells: Vec<CellCoord> = grid.iter().map(|(cell, _)| cell).collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], CellCoord::new(0, 0));
        assert_eq!(cells[2], CellCoord::new(0, 2));
        assert_eq!(cells[3], CellCoord::new(1, 0));
    }
}
