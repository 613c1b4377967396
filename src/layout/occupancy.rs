/// Smallest backing buffer the grid ever allocates.
pub const MIN_CAPACITY: usize = 50;

/// Growable flat bitmap of grid cells, addressed by `row * columns + column`.
///
/// Cells past the end of the buffer read as free. The buffer only grows;
/// resets clear in place.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    cells: Vec<bool>,
    /// End of the highest range ever marked since the last reset.
    high_water: usize,
}

impl OccupancyGrid {
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: vec![false; capacity.max(1)],
            high_water: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Marks `[start, end)` occupied, growing the buffer first if needed.
    pub fn mark_range(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        if end > self.cells.len() {
            self.grow(end);
        }
        self.cells[start..end].fill(true);
        self.high_water = self.high_water.max(end);
    }

    /// `true` if the cell was never marked, including cells past the buffer.
    pub fn is_free(&self, index: usize) -> bool {
        !self.cells.get(index).copied().unwrap_or(false)
    }

    /// First free cell in `[start, end)`.
    pub fn first_free(&self, start: usize, end: usize) -> Option<usize> {
        (start..end).find(|&index| self.is_free(index))
    }

    /// Frees every cell in `[0, end)`.
    pub fn clear_through(&mut self, end: usize) {
        let end = end.min(self.cells.len());
        self.cells[..end].fill(false);
        if end >= self.high_water {
            self.high_water = 0;
        }
    }

    /// Frees everything written since the last reset, whatever column count
    /// it was written under.
    pub fn reset(&mut self) {
        self.clear_through(self.high_water);
    }

    fn grow(&mut self, required: usize) {
        let new_len = (self.cells.len() * 2)
            .max(required + required / 2)
            .max(MIN_CAPACITY);
        self.cells.resize(new_len, false);
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_free() {
        let grid = OccupancyGrid::new();
        assert_eq!(grid.capacity(), MIN_CAPACITY);
        assert!((0..MIN_CAPACITY).all(|i| grid.is_free(i)));
        assert!(grid.is_free(10_000));
    }

    #[test]
    fn test_mark_range() {
        let mut grid = OccupancyGrid::new();
        grid.mark_range(3, 5);
        assert!(grid.is_free(2));
        assert!(!grid.is_free(3));
        assert!(!grid.is_free(4));
        assert!(grid.is_free(5));
        assert_eq!(grid.high_water(), 5);
    }

    #[test]
    fn test_empty_range_is_noop() {
        let mut grid = OccupancyGrid::new();
        grid.mark_range(4, 4);
        assert!(grid.is_free(4));
        assert_eq!(grid.high_water(), 0);
    }

    #[test]
    fn test_growth_doubles_at_least() {
        let mut grid = OccupancyGrid::with_capacity(10);
        grid.mark_range(9, 11);
        assert!(grid.capacity() >= 20);
        assert!(!grid.is_free(10));
    }

    #[test]
    fn test_growth_for_far_write() {
        let mut grid = OccupancyGrid::new();
        grid.mark_range(998, 1000);
        assert!(grid.capacity() >= 1500);
        assert!(!grid.is_free(999));
        assert!(grid.is_free(997));
    }

    #[test]
    fn test_first_free() {
        let mut grid = OccupancyGrid::new();
        grid.mark_range(0, 4);
        grid.mark_range(5, 8);
        assert_eq!(grid.first_free(0, 8), Some(4));
        assert_eq!(grid.first_free(5, 8), None);
        assert_eq!(grid.first_free(5, 9), Some(8));
    }

    #[test]
    fn test_clear_through() {
        let mut grid = OccupancyGrid::new();
        grid.mark_range(0, 10);
        grid.clear_through(4);
        assert!(grid.is_free(3));
        assert!(!grid.is_free(4));
        assert_eq!(grid.high_water(), 10);
    }

    #[test]
    fn test_reset_clears_past_requested_range() {
        let mut grid = OccupancyGrid::new();
        grid.mark_range(0, 120);
        let capacity = grid.capacity();
        grid.reset();
        assert!((0..capacity).all(|i| grid.is_free(i)));
        assert_eq!(grid.high_water(), 0);
        // The buffer is kept for reuse.
        assert_eq!(grid.capacity(), capacity);
    }
}
