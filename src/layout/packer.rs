use tracing::{debug, trace};

use super::columns::ColumnStrategy;
use super::config::SpanConfig;
use super::locator::{GridCell, SpaceLocator};
use super::occupancy::OccupancyGrid;
use crate::error::{Result, SpanError};
use crate::models::{Placement, SpanTile, SpanWidth};

/// Assigns `(row, column, span)` placements to a tile sequence laid out on
/// an N-column grid.
///
/// Wide tiles take two columns and never straddle a row boundary. When a wide
/// tile has to skip the last cell of a row, that cell is remembered and the
/// next narrow tile backfills it instead of extending the frontier.
///
/// The packer does not own the tiles. Each notification takes the sequence
/// as it looks after the change being reported, and placements written to
/// the tiles stay valid until the next notification.
///
/// # Example
/// ```
/// use std::path::PathBuf;
/// use thumbspan::{SpanConfig, SpanPacker, SpanTile, ThumbTile};
///
/// let mut tiles = vec![
///     ThumbTile::new(PathBuf::from("a.jpg"), 100, 150),
///     ThumbTile::new(PathBuf::from("b.jpg"), 300, 100),
///     ThumbTile::new(PathBuf::from("c.jpg"), 100, 150),
/// ];
/// let mut packer = SpanPacker::new(SpanConfig::with_columns(2));
/// packer.on_sequence_replaced(&mut tiles);
///
/// // The wide tile drops to row 1, so the last tile backfills row 0.
/// let c = tiles[2].placement().unwrap();
/// assert_eq!((c.row, c.column), (0, 1));
/// ```
#[derive(Debug, Clone)]
pub struct SpanPacker {
    enabled: bool,
    columns: u32,
    column_size: Option<u32>,
    strategy: ColumnStrategy,
    grid: OccupancyGrid,
    locator: SpaceLocator,
    /// Tiles `[0, processed)` hold current placements.
    processed: usize,
}

impl SpanPacker {
    /// Creates a packer without validating the config.
    ///
    /// No placements are computed until the first notification.
    pub fn new(config: SpanConfig) -> Self {
        let mut locator = SpaceLocator::new(config.max_row_interval);
        locator.reset(config.columns);
        Self {
            enabled: config.enabled,
            columns: config.columns,
            column_size: config.column_size,
            strategy: config.strategy,
            grid: OccupancyGrid::with_capacity(config.initial_capacity),
            locator,
            processed: 0,
        }
    }

    pub fn try_new(config: SpanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enabled with a positive column count.
    pub fn is_active(&self) -> bool {
        self.enabled && self.columns > 0
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of leading tiles that currently hold placements.
    pub fn processed_count(&self) -> usize {
        self.processed
    }

    pub fn frontier(&self) -> GridCell {
        self.locator.frontier()
    }

    pub fn near_gap(&self) -> Option<GridCell> {
        self.locator.near_gap()
    }

    /// Rows touched by placed tiles.
    pub fn row_count(&self) -> u32 {
        let frontier = self.locator.frontier();
        if frontier.column > 0 {
            frontier.row + 1
        } else {
            frontier.row
        }
    }

    /// Turns packing on or off.
    ///
    /// Disabling drops all state and forgets the column count. Enabling
    /// rebuilds only if a column count is already known.
    pub fn set_enabled<T: SpanTile>(&mut self, enabled: bool, tiles: &mut [T]) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        debug!(enabled, columns = self.columns, "Span packing toggled");

        if !enabled {
            self.columns = 0;
            self.clear();
        } else if self.columns > 0 {
            self.rebuild(tiles);
        }
    }

    /// Changes the grid width. Ignored while disabled.
    pub fn set_column_count<T: SpanTile>(&mut self, columns: u32, tiles: &mut [T]) {
        if !self.enabled || columns == self.columns {
            return;
        }
        debug!(from = self.columns, to = columns, "Span column count changed");
        self.columns = columns;
        if columns > 0 {
            self.rebuild(tiles);
        } else {
            self.clear();
        }
    }

    /// Derives the column count from `width` using the configured column
    /// size and strategy, then applies it.
    ///
    /// # Returns
    /// The column count now in effect. While disabled the derived count is
    /// ignored, so this is the unchanged current count.
    pub fn update_viewport_width<T: SpanTile>(
        &mut self,
        width: u32,
        tiles: &mut [T],
    ) -> Result<u32> {
        let column_size = self.column_size.ok_or(SpanError::AutoColumnsUnset)?;
        let columns = self.strategy.column_count(width, column_size)?;
        self.set_column_count(columns, tiles);
        Ok(self.columns)
    }

    /// The whole sequence may have changed.
    pub fn on_sequence_replaced<T: SpanTile>(&mut self, tiles: &mut [T]) {
        if !self.is_active() {
            return;
        }
        self.rebuild(tiles);
    }

    /// `count` tiles were removed at `start`.
    ///
    /// Any removal can shift every later tile and invalidate the cached gap,
    /// so this always rebuilds.
    pub fn on_range_removed<T: SpanTile>(&mut self, start: usize, count: usize, tiles: &mut [T]) {
        if !self.is_active() {
            return;
        }
        debug!(start, count, "Tiles removed");
        self.rebuild(tiles);
    }

    /// `count` tiles were inserted at `start`.
    ///
    /// A trailing append is packed incrementally; anything else rebuilds.
    pub fn on_range_inserted<T: SpanTile>(&mut self, start: usize, count: usize, tiles: &mut [T]) {
        if !self.is_active() {
            return;
        }
        if start == self.processed {
            trace!(start, count, "Appending tiles");
            self.append(tiles);
        } else {
            debug!(start, count, processed = self.processed, "Tiles inserted mid-sequence");
            self.rebuild(tiles);
        }
    }

    fn clear(&mut self) {
        self.grid.reset();
        self.locator.reset(self.columns);
        self.processed = 0;
    }

    fn rebuild<T: SpanTile>(&mut self, tiles: &mut [T]) {
        debug!(columns = self.columns, tiles = tiles.len(), "Rebuilding span layout");
        self.clear();
        self.append(tiles);
    }

    fn append<T: SpanTile>(&mut self, tiles: &mut [T]) {
        let start = self.processed;
        match self.columns {
            0 => return,
            1 => {
                for (index, tile) in tiles.iter_mut().enumerate().skip(start) {
                    tile.set_placement(Placement::new(SpanWidth::Single, index as u32, 0));
                }
                self.locator.set_frontier_row(tiles.len() as u32);
            }
            _ => {
                for (index, tile) in tiles.iter_mut().enumerate().skip(start) {
                    let (width, height) = tile.aspect_hints();
                    let span = SpanWidth::from_hints(width, height);
                    let cell = match span {
                        SpanWidth::Single => self.place_single(),
                        SpanWidth::Double => self.place_double(),
                    };
                    tile.set_placement(Placement::new(span, cell.row, cell.column));
                    trace!(
                        index,
                        ?span,
                        row = cell.row,
                        column = cell.column,
                        frontier = ?self.locator.frontier(),
                        near_gap = ?self.locator.near_gap(),
                        "Placed tile"
                    );
                }
            }
        }
        self.processed = tiles.len();
    }

    /// Backfills the cached gap if there is one, otherwise takes the frontier.
    fn place_single(&mut self) -> GridCell {
        self.locator.refresh_if_stale(&self.grid);
        let columns = self.columns;

        match self.locator.near_gap() {
            Some(gap) => {
                let index = gap.linear(columns);
                self.grid.mark_range(index, index + 1);
                // The frontier stays put; look for the next hole behind it.
                self.locator.find_from(&self.grid, index + 1);
                gap
            }
            None => {
                let cell = self.locator.frontier();
                let index = cell.linear(columns);
                self.grid.mark_range(index, index + 1);
                self.locator.advance_from(cell, 1);
                cell
            }
        }
    }

    /// Places at the frontier if two columns remain in its row, otherwise at
    /// the start of the next row.
    fn place_double(&mut self) -> GridCell {
        let frontier = self.locator.frontier();
        let had_gap = self.locator.near_gap().is_some();

        let cell = if self.columns - frontier.column >= 2 {
            frontier
        } else {
            GridCell::new(frontier.row + 1, 0)
        };
        let index = cell.linear(self.columns);
        self.grid.mark_range(index, index + 2);
        self.locator.advance_from(cell, 2);

        // A skipped cell only becomes the cached gap when nothing older is
        // cached; otherwise the rescan after the older gap fills will find it.
        if cell != frontier && !had_gap {
            self.locator.remember_gap(frontier);
        }
        cell
    }
}

impl Default for SpanPacker {
    fn default() -> Self {
        Self::new(SpanConfig::default())
    }
}
