//! Span packing for thumbnail grids.
//!
//! Tiles with landscape hints occupy two columns of an N-column grid, all
//! others occupy one. [`SpanPacker`] assigns each tile a `(row, column,
//! span)` placement that never splits a wide tile across rows and backfills
//! single cells left behind when a wide tile had to wrap.
//!
//! The packer is fed list-change notifications (sequence replaced, range
//! removed, range inserted) and extends its placements incrementally for
//! trailing appends, rebuilding from scratch for anything else.

pub mod error;
pub mod layout;
pub mod models;

pub use error::SpanError;
pub use layout::{ColumnStrategy, GridCell, OccupancyGrid, SpaceLocator, SpanConfig, SpanPacker};
pub use models::{Placement, RowCell, SpanRow, SpanTile, SpanWidth, ThumbTile};
