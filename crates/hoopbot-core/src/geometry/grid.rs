//! Quantization of continuous positions into grid cells.

use serde::{Deserialize, Serialize};

use super::{Cell, Point, Roi};

/// A region of interest partitioned into `x_divisions * y_divisions` cells.
///
/// Quantization assumes the position lies inside the region; that is the
/// caller's contract and is only checked in debug builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub roi: Roi,
    pub x_divisions: u32,
    pub y_divisions: u32,
}

impl GridSpec {
    pub fn new(roi: Roi, x_divisions: u32, y_divisions: u32) -> Self {
        Self {
            roi,
            x_divisions,
            y_divisions,
        }
    }

    /// Total number of cells.
    pub fn cells(&self) -> u32 {
        self.x_divisions * self.y_divisions
    }

    /// Cell containing `position`. The position must lie inside the region.
    pub fn cell_of(&self, position: Point) -> Cell {
        debug_assert!(
            self.roi.contains(position),
            "position {position:?} outside grid region {:?}",
            self.roi
        );
        let cell_width = self.roi.width() as f64 / self.x_divisions as f64;
        let cell_height = self.roi.height() as f64 / self.y_divisions as f64;
        Cell {
            i: ((position.x - self.roi.x0 as f64) / cell_width) as u32,
            j: ((position.y - self.roi.y0 as f64) / cell_height) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridSpec {
        GridSpec::new(Roi::new(0, 202, 250, 360), 7, 1)
    }

    #[test]
    fn top_left_corner_maps_to_origin_cell() {
        let cell = grid().cell_of(Point::new(0.0, 250.0));
        assert_eq!(cell, Cell { i: 0, j: 0 });
    }

    #[test]
    fn one_cell_width_short_of_right_edge_maps_to_last_column() {
        let grid = grid();
        let cell_width = grid.roi.width() as f64 / grid.x_divisions as f64;
        let cell = grid.cell_of(Point::new(grid.roi.x1 as f64 - cell_width, 250.0));
        assert_eq!(cell.i, grid.x_divisions - 1);
    }

    #[test]
    fn offset_region_subtracts_its_origin() {
        let grid = GridSpec::new(Roi::new(0, 202, 50, 200), 9, 9);
        let cell = grid.cell_of(Point::new(101.0, 125.0));
        // cells are 202/9 wide and 150/9 tall
        assert_eq!(cell, Cell { i: 4, j: 4 });
    }

    #[test]
    fn truncation_keeps_boundary_positions_in_their_cell() {
        let grid = GridSpec::new(Roi::new(0, 100, 0, 100), 4, 4);
        assert_eq!(grid.cell_of(Point::new(24.9, 24.9)), Cell { i: 0, j: 0 });
        assert_eq!(grid.cell_of(Point::new(25.0, 25.0)), Cell { i: 1, j: 1 });
    }
}
