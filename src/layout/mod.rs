pub mod columns;
pub mod config;
pub mod locator;
pub mod occupancy;
pub mod packer;

pub use columns::ColumnStrategy;
pub use config::SpanConfig;
pub use locator::{GridCell, SpaceLocator, MAX_ROW_INTERVAL};
pub use occupancy::OccupancyGrid;
pub use packer::SpanPacker;
