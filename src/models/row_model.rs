use std::collections::BTreeMap;

use super::tile::{SpanTile, SpanWidth};

/// One placed tile as seen by a row renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCell {
    /// Position of the tile in the source sequence.
    pub tile_index: usize,
    pub column: u32,
    pub span: SpanWidth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRow {
    pub row_index: u32,
    pub cells: Vec<RowCell>,
}

impl SpanRow {
    pub fn new(row_index: u32, cells: Vec<RowCell>) -> Self {
        Self { row_index, cells }
    }

    /// Groups placed tiles into rows, ordered by row and then column.
    ///
    /// Tiles that have not been placed yet are skipped. Rows that hold no
    /// tile at all are not emitted.
    pub fn group<T: SpanTile>(tiles: &[T]) -> Vec<SpanRow> {
        let mut rows: BTreeMap<u32, Vec<RowCell>> = BTreeMap::new();
        for (tile_index, tile) in tiles.iter().enumerate() {
            let Some(placement) = tile.placement() else {
                continue;
            };
            rows.entry(placement.row).or_default().push(RowCell {
                tile_index,
                column: placement.column,
                span: placement.span,
            });
        }

        rows.into_iter()
            .map(|(row_index, mut cells)| {
                cells.sort_by_key(|cell| cell.column);
                SpanRow::new(row_index, cells)
            })
            .collect()
    }

    /// Columns covered by tiles in this row.
    pub fn filled_columns(&self) -> u32 {
        self.cells.iter().map(|cell| cell.span.columns()).sum()
    }

    /// Total scroll height for `row_count` rows of equal height.
    pub fn total_height(row_count: u32, row_height: f32, row_gap: f32) -> f32 {
        if row_count == 0 {
            return 0.0;
        }
        row_count as f32 * row_height + (row_count - 1) as f32 * row_gap
    }
}
