//! Grid geometry for one tier

use crate::config::{BadgePreset, Padding};

use super::types::{BoundingBox, Point};

/// Grid dimensions of a tier, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub count: usize,
    pub columns: usize,
    pub rows: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    /// `rows * cell_height` plus the tier's top and bottom padding
    pub tier_height: f64,
    pub available_width: f64,
}

impl GridGeometry {
    /// Compute the grid for `count` sponsors rendered with `preset`
    ///
    /// At least one column is used even when a single box is wider than
    /// `available_width`; the overflowing row simply extends past the edge.
    pub fn compute(
        preset: &BadgePreset,
        count: usize,
        available_width: f64,
        padding: Padding,
    ) -> Self {
        let columns = if preset.box_width > 0.0 {
            ((available_width / preset.box_width).floor() as usize).max(1)
        } else {
            1
        };
        let rows = count.div_ceil(columns);
        Self {
            count,
            columns,
            rows,
            cell_width: preset.box_width,
            cell_height: preset.box_height,
            tier_height: rows as f64 * preset.box_height + padding.top + padding.bottom,
            available_width,
        }
    }

    /// Height of the sponsor rows alone
    pub fn grid_height(&self) -> f64 {
        self.rows as f64 * self.cell_height
    }

    /// Number of cells in row `row` (the last row may be partial)
    pub fn row_len(&self, row: usize) -> usize {
        if row >= self.rows {
            return 0;
        }
        (self.count - row * self.columns).min(self.columns)
    }

    /// Top-left corner of cell `index`, relative to the top of the grid
    ///
    /// Cells fill rows left to right, top to bottom. Each row is centered
    /// horizontally within the available width.
    pub fn cell_origin(&self, index: usize) -> Point {
        let row = index / self.columns;
        let column = index % self.columns;
        let row_width = self.row_len(row) as f64 * self.cell_width;
        let offset_x = (self.available_width - row_width) / 2.0;
        Point::new(
            offset_x + column as f64 * self.cell_width,
            row as f64 * self.cell_height,
        )
    }

    /// Box occupied by cell `index`, shifted down by `top`
    pub fn cell_bounds(&self, index: usize, top: f64) -> BoundingBox {
        let origin = self.cell_origin(index);
        BoundingBox::at(
            Point::new(origin.x, origin.y + top),
            self.cell_width,
            self.cell_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(box_width: f64, box_height: f64) -> BadgePreset {
        BadgePreset::new(40.0, box_width, box_height)
    }

    #[test]
    fn test_seven_sponsors_in_250px() {
        let geometry = GridGeometry::compute(&preset(100.0, 50.0), 7, 250.0, Padding::new(3.0, 4.0));
        assert_eq!(geometry.columns, 2);
        assert_eq!(geometry.rows, 4);
        assert_eq!(geometry.tier_height, 4.0 * 50.0 + 3.0 + 4.0);
    }

    #[test]
    fn test_overwide_box_still_gets_one_column() {
        let geometry = GridGeometry::compute(&preset(800.0, 50.0), 3, 700.0, Padding::default());
        assert_eq!(geometry.columns, 1);
        assert_eq!(geometry.rows, 3);
        // Centering an overwide row pushes it left of the origin
        assert_eq!(geometry.cell_origin(0).x, -50.0);
    }

    #[test]
    fn test_zero_box_width_is_single_column() {
        let geometry = GridGeometry::compute(&preset(0.0, 0.0), 4, 700.0, Padding::default());
        assert_eq!(geometry.columns, 1);
        assert_eq!(geometry.rows, 4);
        assert_eq!(geometry.tier_height, 0.0);
    }

    #[test]
    fn test_empty_tier_has_no_rows() {
        let geometry = GridGeometry::compute(&preset(100.0, 50.0), 0, 700.0, Padding::new(10.0, 10.0));
        assert_eq!(geometry.rows, 0);
        assert_eq!(geometry.tier_height, 20.0);
    }

    #[test]
    fn test_height_is_linear_in_rows() {
        let p = preset(100.0, 30.0);
        for count in 1..40 {
            let g = GridGeometry::compute(&p, count, 500.0, Padding::default());
            assert_eq!(g.columns, 5);
            assert_eq!(g.rows, count.div_ceil(5));
            assert_eq!(g.tier_height, g.rows as f64 * 30.0);
        }
    }

    #[test]
    fn test_row_major_origins_centered_per_row() {
        let geometry = GridGeometry::compute(&preset(100.0, 50.0), 5, 300.0, Padding::default());
        assert_eq!(geometry.columns, 3);
        assert_eq!(geometry.row_len(0), 3);
        assert_eq!(geometry.row_len(1), 2);
        assert_eq!(geometry.row_len(2), 0);

        assert_eq!(geometry.cell_origin(0), Point::new(0.0, 0.0));
        assert_eq!(geometry.cell_origin(2), Point::new(200.0, 0.0));
        assert_eq!(geometry.cell_origin(3), Point::new(50.0, 50.0));
        assert_eq!(geometry.cell_origin(4), Point::new(150.0, 50.0));
    }

    #[test]
    fn test_cells_never_overlap() {
        let geometry = GridGeometry::compute(&preset(90.0, 40.0), 11, 400.0, Padding::default());
        let cells: Vec<_> = (0..11).map(|i| geometry.cell_bounds(i, 25.0)).collect();
        for i in 0..cells.len() {
            for j in (i + 1)..cells.len() {
                assert!(!cells[i].intersects(&cells[j]), "cells {i} and {j} overlap");
            }
        }
        assert_eq!(cells[0].y, 25.0);
    }
}
