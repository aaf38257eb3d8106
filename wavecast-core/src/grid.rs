//! Uniform bucket grid over the unit square.
//!
//! Cells are at least `radius` wide, so every point within `radius` of a query
//! lies in the 3×3 block of cells around the query's own cell. Members are
//! stored in one flat array addressed by per-cell offsets (counting sort), and
//! each cell lists its members in ascending id order.

use crate::positions::Position;

/// Upper bound on cells per axis; keeps memory bounded for tiny radii.
const MAX_CELLS_PER_AXIS: usize = 4_096;

#[derive(Debug)]
pub(crate) struct SpatialGrid {
    cells_per_axis: usize,
    inv_cell_size: f64,
    cell_starts: Vec<usize>,
    members: Vec<usize>,
}

impl SpatialGrid {
    /// Buckets `positions` into cells sized for queries of `radius`.
    pub(crate) fn new(positions: &[Position], radius: f64) -> Self {
        let cells_per_axis = cells_per_axis(radius, positions.len());
        #[expect(
            clippy::cast_precision_loss,
            reason = "cells_per_axis is bounded by MAX_CELLS_PER_AXIS"
        )]
        let inv_cell_size = cells_per_axis as f64;

        let mut grid = Self {
            cells_per_axis,
            inv_cell_size,
            cell_starts: Vec::new(),
            members: Vec::new(),
        };

        let cell_count = cells_per_axis * cells_per_axis;
        let mut counts = vec![0_usize; cell_count + 1];
        let cells: Vec<usize> = positions
            .iter()
            .map(|&position| grid.cell_index(position))
            .collect();
        for &cell in &cells {
            counts[cell + 1] += 1;
        }
        for cell in 0..cell_count {
            counts[cell + 1] += counts[cell];
        }

        let mut cursor = counts.clone();
        let mut members = vec![0_usize; positions.len()];
        for (node, &cell) in cells.iter().enumerate() {
            members[cursor[cell]] = node;
            cursor[cell] += 1;
        }

        grid.cell_starts = counts;
        grid.members = members;
        grid
    }

    pub(crate) const fn cells_per_axis(&self) -> usize {
        self.cells_per_axis
    }

    /// Calls `visit` with every node stored in the 3×3 block around `position`.
    ///
    /// Nodes arrive grouped by cell, not globally sorted.
    pub(crate) fn for_each_nearby(&self, position: Position, mut visit: impl FnMut(usize)) {
        let (column, row) = self.cell_coordinates(position);
        let last = self.cells_per_axis - 1;
        for cell_row in row.saturating_sub(1)..=(row + 1).min(last) {
            for cell_column in column.saturating_sub(1)..=(column + 1).min(last) {
                let cell = cell_row * self.cells_per_axis + cell_column;
                let start = self.cell_starts[cell];
                let end = self.cell_starts[cell + 1];
                for &node in &self.members[start..end] {
                    visit(node);
                }
            }
        }
    }

    fn cell_index(&self, position: Position) -> usize {
        let (column, row) = self.cell_coordinates(position);
        row * self.cells_per_axis + column
    }

    fn cell_coordinates(&self, position: Position) -> (usize, usize) {
        (self.axis_cell(position.x), self.axis_cell(position.y))
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the scaled coordinate is clamped to [0, cells_per_axis) before the cast"
    )]
    fn axis_cell(&self, coordinate: f64) -> usize {
        let scaled = (coordinate * self.inv_cell_size).floor();
        let last = self.cells_per_axis - 1;
        if scaled.is_nan() || scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(last)
        }
    }
}

/// Picks the axis resolution: as fine as `radius` allows, capped so the cell
/// table never outgrows the point set by more than a constant factor.
fn cells_per_axis(radius: f64, point_count: usize) -> usize {
    if !radius.is_finite() || radius <= 0.0 {
        return 1;
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        reason = "the value is clamped to [1, MAX_CELLS_PER_AXIS] before the cast"
    )]
    let by_radius = (1.0 / radius).floor().clamp(1.0, MAX_CELLS_PER_AXIS as f64) as usize;
    let by_points = point_count.isqrt().max(1);
    by_radius.min(by_points.saturating_mul(2)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn nearby(grid: &SpatialGrid, position: Position) -> Vec<usize> {
        let mut found = Vec::new();
        grid.for_each_nearby(position, |node| found.push(node));
        found.sort_unstable();
        found
    }

    #[rstest]
    #[case::non_positive(0.0, 100, 1)]
    #[case::nan(f64::NAN, 100, 1)]
    #[case::whole_square(1.0, 100, 1)]
    #[case::quarter(0.25, 100, 4)]
    #[case::points_cap(0.001, 16, 8)]
    fn resolution_respects_radius_and_population(
        #[case] radius: f64,
        #[case] points: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(cells_per_axis(radius, points), expected);
    }

    #[test]
    fn query_covers_every_point_within_radius() {
        let positions = vec![
            Position::new(0.05, 0.05),
            Position::new(0.24, 0.05),
            Position::new(0.55, 0.55),
            Position::new(0.95, 0.95),
            Position::new(0.30, 0.10),
        ];
        let radius = 0.25;
        let grid = SpatialGrid::new(&positions, radius);
        assert_eq!(grid.cells_per_axis(), 4);

        for (node, &origin) in positions.iter().enumerate() {
            let found = nearby(&grid, origin);
            assert!(found.contains(&node));
            for (other, &candidate) in positions.iter().enumerate() {
                if origin.distance(candidate) <= radius {
                    assert!(found.contains(&other), "{other} missing near {node}");
                }
            }
        }
    }

    #[test]
    fn coordinates_on_the_upper_edge_land_in_the_last_cell() {
        let positions = vec![Position::new(1.0, 1.0), Position::new(0.99, 0.99)];
        let grid = SpatialGrid::new(&positions, 0.5);
        assert_eq!(nearby(&grid, Position::new(1.0, 1.0)), vec![0, 1]);
    }
}
