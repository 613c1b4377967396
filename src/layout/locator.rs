use tracing::trace;

use super::occupancy::OccupancyGrid;

/// Default lookback window, in rows, for gap discovery.
pub const MAX_ROW_INTERVAL: u32 = 3;

/// A cell position in row-major grid order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GridCell {
    pub row: u32,
    pub column: u32,
}

impl GridCell {
    pub const ORIGIN: Self = Self { row: 0, column: 0 };

    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    pub fn linear(self, columns: u32) -> usize {
        self.row as usize * columns as usize + self.column as usize
    }

    pub fn from_linear(index: usize, columns: u32) -> Self {
        let columns = columns.max(1) as usize;
        Self {
            row: (index / columns) as u32,
            column: (index % columns) as u32,
        }
    }
}

/// Tracks the frontier and a cached free cell before it.
///
/// `near_gap` is `None` when no gap is known, which is the same as the gap
/// sitting on the frontier. A `Some` gap is always free and strictly before
/// the frontier.
#[derive(Debug, Clone)]
pub struct SpaceLocator {
    columns: u32,
    max_row_interval: u32,
    frontier: GridCell,
    near_gap: Option<GridCell>,
}

impl SpaceLocator {
    pub fn new(max_row_interval: u32) -> Self {
        Self {
            columns: 0,
            max_row_interval,
            frontier: GridCell::ORIGIN,
            near_gap: None,
        }
    }

    pub fn frontier(&self) -> GridCell {
        self.frontier
    }

    pub fn near_gap(&self) -> Option<GridCell> {
        self.near_gap
    }

    pub fn frontier_linear(&self) -> usize {
        self.frontier.linear(self.columns)
    }

    /// Back to the origin for a grid of `columns` columns.
    pub fn reset(&mut self, columns: u32) {
        self.columns = columns;
        self.frontier = GridCell::ORIGIN;
        self.near_gap = None;
    }

    /// Moves the frontier to `span` columns past `from`, wrapping when the
    /// row is exactly filled.
    pub fn advance_from(&mut self, from: GridCell, span: u32) {
        let mut next = GridCell::new(from.row, from.column + span);
        if next.column == self.columns {
            next = GridCell::new(next.row + 1, 0);
        }
        self.frontier = next;
    }

    /// Jumps the frontier straight to `row`, column 0.
    pub fn set_frontier_row(&mut self, row: u32) {
        self.frontier = GridCell::new(row, 0);
    }

    /// Remembers `cell` as the next backfill target.
    pub fn remember_gap(&mut self, cell: GridCell) {
        self.near_gap = (cell < self.frontier).then_some(cell);
    }

    /// Drops a cached gap that fell out of the lookback window and rescans
    /// only the last `max_row_interval` rows.
    ///
    /// Gaps older than the window are left behind for good.
    pub fn refresh_if_stale(&mut self, grid: &OccupancyGrid) {
        let Some(gap) = self.near_gap else {
            return;
        };
        if self.frontier.row - gap.row <= self.max_row_interval {
            return;
        }

        let start_row = self.frontier.row.saturating_sub(self.max_row_interval);
        trace!(
            stale_row = gap.row,
            frontier_row = self.frontier.row,
            start_row,
            "Gap outside lookback window, rescanning"
        );
        self.find_from(grid, GridCell::new(start_row, 0).linear(self.columns));
    }

    /// Caches the first free cell between `start` and the frontier, or
    /// clears the cache if there is none.
    pub fn find_from(&mut self, grid: &OccupancyGrid, start: usize) {
        self.near_gap = grid
            .first_free(start, self.frontier_linear())
            .map(|index| GridCell::from_linear(index, self.columns));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator(columns: u32) -> SpaceLocator {
        let mut locator = SpaceLocator::new(MAX_ROW_INTERVAL);
        locator.reset(columns);
        locator
    }

    #[test]
    fn test_linear_mapping() {
        assert_eq!(GridCell::new(2, 1).linear(3), 7);
        assert_eq!(GridCell::from_linear(7, 3), GridCell::new(2, 1));
        assert_eq!(GridCell::from_linear(0, 4), GridCell::ORIGIN);
    }

    #[test]
    fn test_row_major_ordering() {
        assert!(GridCell::new(0, 2) < GridCell::new(1, 0));
        assert!(GridCell::new(1, 0) < GridCell::new(1, 1));
    }

    #[test]
    fn test_advance_wraps_only_on_exact_fill() {
        let mut loc = locator(3);
        loc.advance_from(GridCell::new(0, 0), 2);
        assert_eq!(loc.frontier(), GridCell::new(0, 2));
        loc.advance_from(GridCell::new(0, 2), 1);
        assert_eq!(loc.frontier(), GridCell::new(1, 0));
        loc.advance_from(GridCell::new(1, 1), 2);
        assert_eq!(loc.frontier(), GridCell::new(2, 0));
    }

    #[test]
    fn test_remember_gap_ignores_frontier() {
        let mut loc = locator(2);
        loc.advance_from(GridCell::new(0, 0), 1);
        loc.remember_gap(GridCell::new(0, 1));
        assert_eq!(loc.near_gap(), None);

        loc.set_frontier_row(2);
        loc.remember_gap(GridCell::new(0, 1));
        assert_eq!(loc.near_gap(), Some(GridCell::new(0, 1)));
    }

    #[test]
    fn test_find_from_stops_at_frontier() {
        let mut grid = OccupancyGrid::new();
        let mut loc = locator(2);
        grid.mark_range(0, 4);
        loc.set_frontier_row(2);
        loc.find_from(&grid, 0);
        assert_eq!(loc.near_gap(), None);

        grid.reset();
        grid.mark_range(0, 1);
        grid.mark_range(2, 4);
        loc.find_from(&grid, 0);
        assert_eq!(loc.near_gap(), Some(GridCell::new(0, 1)));
    }

    #[test]
    fn test_fresh_gap_is_kept() {
        let grid = OccupancyGrid::new();
        let mut loc = locator(2);
        loc.set_frontier_row(3);
        loc.remember_gap(GridCell::new(0, 1));
        loc.refresh_if_stale(&grid);
        assert_eq!(loc.near_gap(), Some(GridCell::new(0, 1)));
    }

    #[test]
    fn test_stale_gap_is_dropped() {
        let mut grid = OccupancyGrid::new();
        let mut loc = locator(2);
        // Row 0 has a hole at column 1, rows 1..=4 are full.
        grid.mark_range(0, 1);
        grid.mark_range(2, 10);
        loc.set_frontier_row(5);
        loc.remember_gap(GridCell::new(0, 1));

        loc.refresh_if_stale(&grid);
        assert_eq!(loc.near_gap(), None);
        assert!(grid.is_free(1));
    }

    #[test]
    fn test_stale_refresh_finds_gap_in_window() {
        let mut grid = OccupancyGrid::new();
        let mut loc = locator(2);
        grid.mark_range(0, 1);
        grid.mark_range(2, 6);
        grid.mark_range(7, 10);
        loc.set_frontier_row(5);
        loc.remember_gap(GridCell::new(0, 1));

        loc.refresh_if_stale(&grid);
        assert_eq!(loc.near_gap(), Some(GridCell::new(3, 0)));
    }
}
