//! Grid mapping
//!
//! Maps a card index to its page and cell on the front document and to the
//! mirrored cell on the back document.

use std::ops::Range;

use crate::types::{CardError, Result};

use super::{DuplexPolicy, Placement, Side};

// =============================================================================
// Grid
// =============================================================================

/// Page grid for one render pass. Dimensions are in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    columns: usize,
    rows: usize,
    page_width: f32,
    page_height: f32,
}

impl GridSpec {
    /// Validate and build a grid.
    ///
    /// Fails with `InvalidLayout` when either count is zero or a cell would
    /// have a non-positive (or non-finite) size.
    pub fn new(columns: usize, rows: usize, page_width: f32, page_height: f32) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(CardError::InvalidLayout(format!(
                "grid must have at least one column and one row (got {columns}x{rows})"
            )));
        }
        let grid = Self {
            columns,
            rows,
            page_width,
            page_height,
        };
        let (cell_width, cell_height) = (grid.cell_width(), grid.cell_height());
        if !(cell_width.is_finite() && cell_width > 0.0 && cell_height.is_finite() && cell_height > 0.0)
        {
            return Err(CardError::InvalidLayout(format!(
                "cell size {cell_width}x{cell_height}pt is not positive"
            )));
        }
        Ok(grid)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    pub fn cards_per_page(&self) -> usize {
        self.columns * self.rows
    }

    pub fn cell_width(&self) -> f32 {
        self.page_width / self.columns as f32
    }

    pub fn cell_height(&self) -> f32 {
        self.page_height / self.rows as f32
    }

    /// Number of pages needed for `card_count` cards on one side.
    pub fn page_count(&self, card_count: usize) -> usize {
        card_count.div_ceil(self.cards_per_page())
    }
}

// =============================================================================
// Mapper
// =============================================================================

/// Placement calculator for one deck under one duplex policy.
///
/// The card count is needed because the reversed-pages policy numbers back
/// pages from the end of the deck.
#[derive(Debug, Clone, Copy)]
pub struct GridMapper {
    grid: GridSpec,
    policy: DuplexPolicy,
    card_count: usize,
}

impl GridMapper {
    pub fn new(grid: GridSpec, policy: DuplexPolicy, card_count: usize) -> Self {
        Self {
            grid,
            policy,
            card_count,
        }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn policy(&self) -> DuplexPolicy {
        self.policy
    }

    pub fn card_count(&self) -> usize {
        self.card_count
    }

    pub fn page_count(&self) -> usize {
        self.grid.page_count(self.card_count)
    }

    pub fn place(&self, index: usize, side: Side) -> Placement {
        match side {
            Side::Front => self.front(index),
            Side::Back => self.back(index),
        }
    }

    /// Row-major placement from the top-left cell.
    pub fn front(&self, index: usize) -> Placement {
        let per_page = self.grid.cards_per_page();
        let page = index / per_page;
        let pos_on_page = index % per_page;
        let row = pos_on_page / self.grid.columns;
        let col = pos_on_page % self.grid.columns;
        self.placement(page, row, col)
    }

    /// Same row, mirrored column; page depends on the duplex policy.
    pub fn back(&self, index: usize) -> Placement {
        let front = self.front(index);
        let col = self.grid.columns - 1 - front.col;
        let page = self.back_page_for(front.page);
        self.placement(page, front.row, col)
    }

    /// Back-document page that sits behind the given front page.
    pub fn back_page_for(&self, front_page: usize) -> usize {
        match self.policy {
            DuplexPolicy::MirroredColumns => front_page,
            DuplexPolicy::ReversedPages => self.page_count().saturating_sub(1 + front_page),
        }
    }

    /// Front page whose cards appear on the given back-document page.
    pub fn front_page_for_back(&self, back_page: usize) -> usize {
        // Both policies are involutions.
        self.back_page_for(back_page)
    }

    /// Card indices printed on a front page.
    pub fn cards_on_page(&self, front_page: usize) -> Range<usize> {
        let per_page = self.grid.cards_per_page();
        let start = (front_page * per_page).min(self.card_count);
        let end = (start + per_page).min(self.card_count);
        start..end
    }

    /// True when the card at `index` opens a new page after an earlier one.
    pub fn starts_new_page(&self, index: usize) -> bool {
        index != 0 && index % self.grid.cards_per_page() == 0
    }

    fn placement(&self, page: usize, row: usize, col: usize) -> Placement {
        let width = self.grid.cell_width();
        let height = self.grid.cell_height();
        Placement {
            page,
            row,
            col,
            x: col as f32 * width,
            y: self.grid.page_height - (row + 1) as f32 * height,
            width,
            height,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const A4: (f32, f32) = (595.28, 841.89);

    fn mapper(columns: usize, rows: usize, policy: DuplexPolicy, cards: usize) -> GridMapper {
        let grid = GridSpec::new(columns, rows, A4.0, A4.1).unwrap();
        GridMapper::new(grid, policy, cards)
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert!(matches!(
            GridSpec::new(0, 3, 100.0, 100.0),
            Err(CardError::InvalidLayout(_))
        ));
        assert!(matches!(
            GridSpec::new(2, 0, 100.0, 100.0),
            Err(CardError::InvalidLayout(_))
        ));
        assert!(matches!(
            GridSpec::new(2, 2, 0.0, 100.0),
            Err(CardError::InvalidLayout(_))
        ));
        assert!(matches!(
            GridSpec::new(2, 2, 100.0, f32::NAN),
            Err(CardError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_cell_dimensions() {
        let grid = GridSpec::new(2, 4, 400.0, 800.0).unwrap();
        assert_eq!(grid.cards_per_page(), 8);
        assert_eq!(grid.cell_width(), 200.0);
        assert_eq!(grid.cell_height(), 200.0);
    }

    #[test]
    fn test_page_count_is_ceiling() {
        for columns in 1..4 {
            for rows in 1..4 {
                let grid = GridSpec::new(columns, rows, 300.0, 300.0).unwrap();
                let per_page = columns * rows;
                for n in 0..30 {
                    let expected = (n + per_page - 1) / per_page;
                    assert_eq!(grid.page_count(n), expected, "{columns}x{rows}, n={n}");
                }
            }
        }
    }

    #[test]
    fn test_scenario_single_page() {
        let m = mapper(2, 5, DuplexPolicy::MirroredColumns, 10);
        assert_eq!(m.page_count(), 1);

        let front = m.front(0);
        assert_eq!((front.page, front.row, front.col), (0, 0, 0));
        let back = m.back(0);
        assert_eq!((back.page, back.row, back.col), (0, 0, 1));
    }

    #[test]
    fn test_scenario_three_pages() {
        let m = mapper(3, 4, DuplexPolicy::MirroredColumns, 25);
        assert_eq!(m.page_count(), 3);
        assert_eq!(m.cards_on_page(0).len(), 12);
        assert_eq!(m.cards_on_page(1).len(), 12);
        assert_eq!(m.cards_on_page(2).len(), 1);
        assert_eq!(m.cards_on_page(2), 24..25);
    }

    #[test]
    fn test_front_coordinates() {
        let grid = GridSpec::new(2, 2, 200.0, 400.0).unwrap();
        let m = GridMapper::new(grid, DuplexPolicy::MirroredColumns, 4);

        // Top-left cell
        let p = m.front(0);
        assert_eq!((p.x, p.y), (0.0, 200.0));
        // Bottom-right cell
        let p = m.front(3);
        assert_eq!((p.row, p.col), (1, 1));
        assert_eq!((p.x, p.y), (100.0, 0.0));
        assert_eq!((p.width, p.height), (100.0, 200.0));
    }

    #[test]
    fn test_mirror_invariant() {
        for columns in 1..5 {
            let m = mapper(columns, 3, DuplexPolicy::MirroredColumns, 40);
            for i in 0..40 {
                let front = m.front(i);
                let back = m.back(i);
                assert_eq!(front.col + back.col, columns - 1);
                assert_eq!(front.row, back.row);
                assert_eq!(front.page, back.page);
                assert_eq!(front.y, back.y);
                assert_eq!(back.x, back.col as f32 * back.width);
            }
        }
    }

    #[test]
    fn test_reversed_pages() {
        let m = mapper(2, 2, DuplexPolicy::ReversedPages, 10);
        assert_eq!(m.page_count(), 3);

        for i in 0..10 {
            let front = m.front(i);
            let back = m.back(i);
            assert_eq!(back.page, 2 - front.page);
            assert_eq!(front.col + back.col, 1);
            assert_eq!(front.row, back.row);
        }
        assert_eq!(m.front_page_for_back(0), 2);
        assert_eq!(m.front_page_for_back(2), 0);
    }

    #[test]
    fn test_page_breaks() {
        let m = mapper(2, 2, DuplexPolicy::MirroredColumns, 9);
        let breaks: Vec<usize> = (0..9).filter(|&i| m.starts_new_page(i)).collect();
        assert_eq!(breaks, vec![4, 8]);
    }

    #[test]
    fn test_single_column_mirrors_onto_itself() {
        let m = mapper(1, 3, DuplexPolicy::MirroredColumns, 3);
        for i in 0..3 {
            assert_eq!(m.front(i).col, 0);
            assert_eq!(m.back(i).col, 0);
        }
    }
}
